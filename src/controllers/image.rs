//! Controllers for submitting drawings and reading the public gallery

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use image_record::ImageRecord;
use utils::image::{ImageStore, store_submission};
use validator::Validate;

use crate::schemas::image::{ImageResponse, SaveImageRequest, SaveImageResponse};

/// Store a drawing from the canvas page as an unapproved image
#[instrument(skip(pool, store))]
pub async fn save_image(
	State(pool): State<DbPool>,
	State(store): State<ImageStore>,
	Json(request): Json<SaveImageRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	store_submission(&store, &request.image, request.nickname, &conn).await?;

	Ok((StatusCode::OK, Json(SaveImageResponse::saved())))
}

/// Get all approved images, most recent first
#[instrument(skip(pool))]
pub async fn get_approved_images(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let images = ImageRecord::get_approved(&conn).await?;
	let response: Vec<ImageResponse> =
		images.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}
