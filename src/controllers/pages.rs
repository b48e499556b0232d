//! Server rendered HTML pages

use askama::Template;
use axum::extract::State;
use axum::response::Html;
use common::{DbPool, Error};
use image_record::{ImageRecord, ImageRecordFilter};

use crate::templates::{DrawTemplate, GalleryAdminTemplate, GalleryTemplate};

/// The drawing canvas
pub async fn draw_page() -> Result<Html<String>, Error> {
	let page = DrawTemplate { save_url: "/save" };

	Ok(Html(page.render()?))
}

/// The public gallery, only showing approved images
#[instrument(skip(pool))]
pub async fn gallery_page(
	State(pool): State<DbPool>,
) -> Result<Html<String>, Error> {
	let conn = pool.get().await?;

	let images = ImageRecord::get_approved(&conn).await?;
	let page = GalleryTemplate { images };

	Ok(Html(page.render()?))
}

/// The moderation overview, showing every image
#[instrument(skip(pool))]
pub async fn gallery_admin_page(
	State(pool): State<DbPool>,
) -> Result<Html<String>, Error> {
	let conn = pool.get().await?;

	let images =
		ImageRecord::get_latest(ImageRecordFilter::default(), &conn).await?;
	let page = GalleryAdminTemplate { images };

	Ok(Html(page.render()?))
}
