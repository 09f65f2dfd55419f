use std::{fs::OpenOptions, net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rust_decimal::Decimal;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use admin_dashboard::{
    AppState, DEFAULT_HOURLY_RATE, DashboardConfig, HoursAdjustment, RentPolicy, build_router,
    graceful_shutdown, logging_middleware,
};

/// The web server for the admin dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The port to serve the dashboard from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// How many months, ending at the current month, the rent tracker shows.
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u16).range(1..=24))]
    months_displayed: u16,

    /// The amount each kitchen hour adds to (or takes off) a member's rent.
    #[arg(long, default_value_t = DEFAULT_HOURLY_RATE)]
    hourly_rate: Decimal,

    /// Whether kitchen hours add to or take off a member's rent.
    #[arg(long, value_enum, default_value_t = HoursAdjustment::Surcharge)]
    hours_adjustment: HoursAdjustment,

    /// Also write debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log the headers and body of every request and response.
    #[arg(long)]
    log_requests: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(args.log_file.as_ref());

    let config = DashboardConfig {
        local_timezone: args.timezone,
        months_displayed: usize::from(args.months_displayed),
        rent_policy: RentPolicy {
            unit_rate: args.hourly_rate,
            adjustment: args.hours_adjustment,
        },
    };

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not start the dashboard: {error}");
            std::process::exit(1);
        }
    };

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state);

    let router = if args.log_requests {
        router.layer(middleware::from_fn(logging_middleware))
    } else {
        router
    };

    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on http://{}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("Server exited with an error");
}

fn setup_logging(log_file: Option<&PathBuf>) {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(filter::LevelFilter::INFO);

    let debug_log = log_file.map(|path| {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("Could not create log file");

        tracing_subscriber::fmt::layer()
            .pretty()
            .with_writer(Arc::new(log_file))
            .with_filter(filter::LevelFilter::DEBUG)
    });

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
