use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::admin::{
	approve_image,
	create_image,
	delete_image,
	get_all_images,
	get_image,
	reject_image,
	update_image,
};
use crate::controllers::healthcheck;
use crate::controllers::image::{get_approved_images, save_image};
use crate::controllers::pages::{draw_page, gallery_admin_page, gallery_page};

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let timeout = state.config.request_timeout;
	let static_files = ServeDir::new(state.image_store.root());

	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.route("/images", get(get_approved_images))
		.route(
			"/save",
			post(save_image)
				.layer(DefaultBodyLimit::max(state.config.max_upload_bytes)),
		)
		.nest("/admin", admin_routes());

	let page_routes = Router::new()
		.route("/draw", get(draw_page))
		.route("/gallery", get(gallery_page))
		.route("/gallery_admin", get(gallery_admin_page));

	Router::new()
		.merge(api_routes)
		.merge(page_routes)
		.nest_service(state.image_store.url_prefix(), static_files)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::with_status_code(
					StatusCode::REQUEST_TIMEOUT,
					timeout,
				))
				.layer(CompressionLayer::new()),
		)
		.with_state(state)
}

/// Image moderation routes
///
/// These are not protected and must only be exposed on a trusted network
fn admin_routes() -> Router<AppState> {
	Router::new()
		.route("/images", get(get_all_images).post(create_image))
		.route(
			"/images/{id}",
			get(get_image).patch(update_image).delete(delete_image),
		)
		.route("/images/{id}/approve", post(approve_image))
		.route("/images/{id}/reject", post(reject_image))
}
