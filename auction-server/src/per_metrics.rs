use {
    crate::{
        config::RunOptions,
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
        state::Store,
    },
    anyhow::Result,
    axum::{
        routing::get,
        Router,
    },
    axum_prometheus::{
        metrics,
        PrometheusMetricLayerBuilder,
    },
    std::{
        fmt::Debug,
        sync::{
            atomic::Ordering,
            Arc,
        },
        time::Instant,
    },
    tracing::{
        field::{
            Field,
            Visit,
        },
        span::Record,
        Id,
        Metadata,
    },
    tracing_subscriber::{
        layer::Context,
        Layer,
    },
};

pub const AUCTIONS_ADMITTED_METRIC: &str = "auctions_admitted";
pub const AUCTION_EXPIRATIONS_PENDING_METRIC: &str = "auction_expirations_pending";
pub const AUCTION_EXPIRATIONS_STUCK_METRIC: &str = "auction_expirations_stuck";
pub const AUCTIONS_CREATED_METRIC: &str = "auctions_created_total";
pub const AUCTIONS_CLOSED_METRIC: &str = "auctions_closed_total";

/// Timing and outcome of a span emitted with the `metrics` target.
#[derive(Debug, Clone)]
struct SpanMetrics {
    category:   String,
    started_at: Instant,
    result:     String,
    name:       String,
}

impl SpanMetrics {
    fn new(name: &str) -> Self {
        Self {
            category:   "unknown".to_string(),
            started_at: Instant::now(),
            result:     "unknown".to_string(),
            name:       name.to_string(),
        }
    }
}

impl Visit for SpanMetrics {
    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "result" {
            self.result = format!("{:?}", value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "category" => self.category = value.to_string(),
            "result" => self.result = value.to_string(),
            "name" => self.name = value.to_string(),
            _ => {}
        }
    }
}

fn is_metrics(metadata: &Metadata) -> bool {
    metadata.target().starts_with("metrics")
        && metadata
            .fields()
            .iter()
            .any(|field| field.name() == "tracing_enabled")
}

/// Turns `metrics` spans into `<category>_duration_seconds` and `<category>_total` series.
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer
where
    S: tracing::Subscriber,
    S: for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &tracing::span::Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        if !is_metrics(attrs.metadata()) {
            return;
        }
        match ctx.span(id) {
            Some(span) => {
                let mut data = SpanMetrics::new(span.metadata().name());
                attrs.record(&mut data);
                span.extensions_mut().replace(data);
            }
            None => tracing::error!("span not found: {:?}", id),
        }
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            if let Some(data) = span.extensions_mut().get_mut::<SpanMetrics>() {
                values.record(data);
            }
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(&id) {
            if let Some(data) = span.extensions().get::<SpanMetrics>() {
                let latency = data.started_at.elapsed().as_secs_f64();
                let labels = [("name", data.name.clone()), ("result", data.result.clone())];
                metrics::histogram!(format!("{}_duration_seconds", data.category), &labels)
                    .record(latency);
                metrics::counter!(format!("{}_total", data.category), &labels).increment(1);
            }
        }
    }
}

pub async fn start_metrics(run_options: RunOptions, store: Arc<Store>) -> Result<()> {
    tracing::info!(addr = %run_options.server.metrics_addr, "Starting Metrics Server...");

    let (_, metric_handle) = PrometheusMetricLayerBuilder::new()
        .with_metrics_from_fn(|| store.metrics_recorder.clone())
        .build_pair();
    let app = Router::new();
    let app = app.route("/metrics", get(|| async move { metric_handle.render() }));

    let listener = tokio::net::TcpListener::bind(&run_options.server.metrics_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            while !SHOULD_EXIT.load(Ordering::Acquire) {
                tokio::time::sleep(EXIT_CHECK_INTERVAL).await;
            }
            tracing::info!("Shutting down metrics server...");
        })
        .await?;
    Ok(())
}
