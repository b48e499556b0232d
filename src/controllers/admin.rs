//! Moderation controllers for [`ImageRecord`]s

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use common::{DbPool, Error};
use image_record::{ImageRecord, ImageRecordFilter};
use utils::image::ImageStore;
use validator::Validate;

use crate::schemas::image::{
	CreateImageRequest,
	ImageResponse,
	UpdateImageRequest,
};

/// Get every image, approved or not, in insertion order
#[instrument(skip(pool))]
pub async fn get_all_images(
	State(pool): State<DbPool>,
	Query(filter): Query<ImageRecordFilter>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let images = ImageRecord::get_all(filter, &conn).await?;
	let response: Vec<ImageResponse> =
		images.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_image(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let image = ImageRecord::get_by_id(id, &conn).await?;
	let response: ImageResponse = image.into();

	Ok((StatusCode::OK, Json(response)))
}

/// Create an image record by hand
///
/// No file is written, the filename is stored as given
#[instrument(skip(pool))]
pub async fn create_image(
	State(pool): State<DbPool>,
	Json(request): Json<CreateImageRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let image = request.to_insertable().insert(&conn).await?;
	let response: ImageResponse = image.into();

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub async fn update_image(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
	Json(request): Json<UpdateImageRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let image = request.to_insertable().apply_to(id, &conn).await?;
	let response: ImageResponse = image.into();

	Ok((StatusCode::OK, Json(response)))
}

/// Approve an image, making it visible in the gallery
#[instrument(skip(pool))]
pub async fn approve_image(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let image = ImageRecord::set_status(id, true, &conn).await?;
	let response: ImageResponse = image.into();

	Ok((StatusCode::OK, Json(response)))
}

/// Withdraw an image from the gallery
#[instrument(skip(pool))]
pub async fn reject_image(
	State(pool): State<DbPool>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let image = ImageRecord::set_status(id, false, &conn).await?;
	let response: ImageResponse = image.into();

	Ok((StatusCode::OK, Json(response)))
}

/// Delete an image record and its stored file
#[instrument(skip(pool, store))]
pub async fn delete_image(
	State(pool): State<DbPool>,
	State(store): State<ImageStore>,
	Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	utils::image::delete_image(id, &store, &conn).await?;

	Ok(NoContent)
}
