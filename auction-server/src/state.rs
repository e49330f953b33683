use {
    crate::{
        auction::service::Service as AuctionService,
        user::service::Service as UserService,
    },
    axum_prometheus::metrics_exporter_prometheus::PrometheusHandle,
};

pub struct Store {
    pub auction_service:  AuctionService,
    pub user_service:     UserService,
    pub secret_key:       String,
    pub metrics_recorder: PrometheusHandle,
}
