use crate::cli::ServeArgs;
use crate::infra::{AppState, OutboxNotifier};
use crate::routes::with_board_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use job_board::board::{seed, Dispatcher, InMemoryEntityStore, SeedPlan};
use job_board::config::AppConfig;
use job_board::error::AppError;
use job_board::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if args.seed_samples {
        config.board.seed_samples = true;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let outbox = Arc::new(OutboxNotifier::new(config.board.outbox_capacity));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        outbox: Arc::clone(&outbox),
    };

    let store = Arc::new(InMemoryEntityStore::new());
    let plan = SeedPlan {
        samples: config.board.seed_samples,
        csv: args.vacancies_csv.take(),
    };
    let report = seed(store.as_ref(), &plan, config.board.sample_employer)?;
    if report.inserted > 0 {
        info!(inserted = report.inserted, "vacancies loaded");
    }

    let dispatcher = Arc::new(Dispatcher::new(store, outbox, config.board.settings()));

    let app = with_board_routes(dispatcher)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job board ready");

    axum::serve(listener, app).await?;
    Ok(())
}
