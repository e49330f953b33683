use {
    crate::{
        api::start_api,
        auction::service::{
            Config as AuctionConfig,
            Service as AuctionService,
        },
        config::RunOptions,
        kernel::db::connect_and_migrate,
        per_metrics::start_metrics,
        state::Store,
        user::service::Service as UserService,
    },
    anyhow::anyhow,
    axum_prometheus::metrics_exporter_prometheus::PrometheusBuilder,
    futures::future::join_all,
    std::{
        future::Future,
        sync::{
            atomic::{
                AtomicBool,
                Ordering,
            },
            Arc,
        },
        time::Duration,
    },
    tokio_util::task::TaskTracker,
};

/// Runs a long-lived task and stops the whole server if it fails.
async fn run_until_exit<F>(name: &'static str, task: F)
where
    F: Future<Output = anyhow::Result<()>>,
{
    if let Err(err) = task.await {
        tracing::error!(error = ?err, "{} failed, shutting down", name);
        SHOULD_EXIT.store(true, Ordering::Release);
    }
}

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    tokio::spawn(async move {
        tracing::info!("Registered shutdown signal handler...");
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?e, "Failed to listen for the shutdown signal");
        }
        tracing::info!("Shut down signal received, waiting for tasks...");
        SHOULD_EXIT.store(true, Ordering::Release);
    });

    let metrics_recorder = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|err| anyhow!("Failed to install prometheus recorder: {:?}", err))?;

    let pool = connect_and_migrate(
        &run_options.server.database_url,
        run_options.server.database_max_connections,
    )
    .await?;

    let config = AuctionConfig {
        auction_duration:        run_options.auction.auction_duration(),
        max_concurrent_auctions: run_options.auction.max_concurrent_auctions,
    };
    tracing::info!(
        auction_duration = ?config.auction_duration,
        max_concurrent_auctions = config.max_concurrent_auctions,
        "Auction lifecycle configured"
    );

    let task_tracker = TaskTracker::new();
    let auction_service = AuctionService::new(pool.clone(), config, task_tracker.clone());
    let user_service = UserService::new(pool);

    let store = Arc::new(Store {
        auction_service: auction_service.clone(),
        user_service,
        secret_key: run_options.secret_key.clone(),
        metrics_recorder,
    });

    // Creation requests wait until this pass completes.
    task_tracker.spawn({
        let service = auction_service.clone();
        async move { service.recover_active_auctions().await }
    });

    let expiration_loop = tokio::spawn(run_until_exit("Expiration loop", {
        let service = auction_service.clone();
        async move { service.run_expiration_loop().await }
    }));
    let metrics_loop = tokio::spawn(run_until_exit("Auction metrics loop", {
        let service = auction_service.clone();
        async move { service.run_metrics_loop().await }
    }));
    let server_loop = tokio::spawn(run_until_exit(
        "API server",
        start_api(run_options.clone(), store.clone()),
    ));
    let metrics_server = tokio::spawn(run_until_exit(
        "Metrics server",
        start_metrics(run_options, store),
    ));
    join_all(vec![expiration_loop, metrics_loop, server_loop, metrics_server]).await;

    // Pending expirations are re-armed by recovery on the next start.
    task_tracker.close();
    task_tracker.wait().await;
    tracing::info!("All in-flight tasks finished");

    Ok(())
}

// A static exit flag to indicate to running threads that we're shutting down. This is used to
// gracefully shutdown the application.
//
// NOTE: A more idiomatic approach would be to use a tokio::sync::broadcast channel, and to send a
// shutdown signal to all running tasks. However, this is a bit more complicated to implement and
// we don't rely on global state for anything else.
pub(crate) static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);
pub const EXIT_CHECK_INTERVAL: Duration = Duration::from_secs(1);
