use {
    super::Service,
    crate::per_metrics::AUCTIONS_ADMITTED_METRIC,
    axum_prometheus::metrics,
};

impl Service {
    pub async fn update_metrics(&self) {
        metrics::gauge!(AUCTIONS_ADMITTED_METRIC).set(self.admission.admitted() as f64);
        self.repo.update_metrics().await;
    }
}
