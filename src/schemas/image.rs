use chrono::NaiveDateTime;
use image_record::{ImageRecord, ImageRecordUpdate, NewImageRecord};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
	pub id:         i32,
	pub filename:   String,
	pub nickname:   String,
	pub created_at: NaiveDateTime,
	pub status:     bool,
}

impl From<ImageRecord> for ImageResponse {
	fn from(value: ImageRecord) -> Self {
		Self {
			id:         value.id,
			filename:   value.filename,
			nickname:   value.nickname,
			created_at: value.created_at,
			status:     value.status,
		}
	}
}

/// A drawing submitted from the canvas page
#[derive(Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveImageRequest {
	/// Base64 encoded PNG, optionally prefixed with its data URI header
	pub image:    String,
	#[validate(length(
		min = 1,
		max = 80,
		message = "nickname must be between 1 and 80 characters long"
	))]
	pub nickname: String,
}

// The payload can be megabytes of base64, keep it out of the logs
impl std::fmt::Debug for SaveImageRequest {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SaveImageRequest")
			.field("image", &format_args!("<{} bytes>", self.image.len()))
			.field("nickname", &self.nickname)
			.finish()
	}
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct SaveImageResponse {
	pub status: String,
}

impl SaveImageResponse {
	#[must_use]
	pub fn saved() -> Self { Self { status: "saved".to_string() } }
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageRequest {
	#[validate(length(min = 1, message = "filename must not be empty"))]
	pub filename:   String,
	#[validate(length(
		min = 1,
		max = 80,
		message = "nickname must be between 1 and 80 characters long"
	))]
	pub nickname:   String,
	#[serde(default)]
	pub status:     bool,
	#[serde(default)]
	pub created_at: Option<NaiveDateTime>,
}

impl CreateImageRequest {
	#[must_use]
	pub fn to_insertable(self) -> NewImageRecord {
		NewImageRecord {
			filename:   self.filename,
			nickname:   self.nickname,
			status:     self.status,
			created_at: self.created_at,
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImageRequest {
	#[validate(length(min = 1, message = "filename must not be empty"))]
	pub filename:   Option<String>,
	#[validate(length(
		min = 1,
		max = 80,
		message = "nickname must be between 1 and 80 characters long"
	))]
	pub nickname:   Option<String>,
	pub created_at: Option<NaiveDateTime>,
	pub status:     Option<bool>,
}

impl UpdateImageRequest {
	#[must_use]
	pub fn to_insertable(self) -> ImageRecordUpdate {
		ImageRecordUpdate {
			filename:   self.filename,
			nickname:   self.nickname,
			created_at: self.created_at,
			status:     self.status,
		}
	}
}
