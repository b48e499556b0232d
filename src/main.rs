#[macro_use]
extern crate tracing;

use doodle_gallery::{AppState, Config, routes, run_migrations};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::signal::unix::SignalKind;
use tracing::Level;

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt()
		.pretty()
		.with_thread_names(true)
		.with_max_level(Level::DEBUG)
		.init();

	let config = Config::from_env();
	info!(
		"serving drawings from {} under {}",
		config.upload_dir.display(),
		config.static_url_prefix
	);

	let pool = config.create_database_pool();
	run_migrations(&pool).await.expect("COULD NOT MIGRATE DATABASE");

	let address = config.server_address.clone();
	let app = routes::get_app_router(AppState::new(config, pool));

	let listener = TcpListener::bind(&address)
		.await
		.unwrap_or_else(|e| panic!("COULD NOT BIND {address} -- {e}"));
	debug!("listening on {address}");

	axum::serve(listener, app)
		.with_graceful_shutdown(wait_for_shutdown())
		.await
		.expect("SERVER ERROR");

	info!("shut down cleanly");
}

/// Resolve once SIGINT or SIGTERM is received
async fn wait_for_shutdown() {
	let interrupt = async {
		signal::ctrl_c().await.expect("COULD NOT LISTEN FOR SIGINT");
	};

	let terminate = async {
		signal::unix::signal(SignalKind::terminate())
			.expect("COULD NOT LISTEN FOR SIGTERM")
			.recv()
			.await;
	};

	tokio::select! {
		() = interrupt => debug!("received SIGINT"),
		() = terminate => debug!("received SIGTERM"),
	}
}
