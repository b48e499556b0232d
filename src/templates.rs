//! Askama templates for the HTML pages

use askama::Template;
use image_record::ImageRecord;

#[derive(Clone, Debug, Template)]
#[template(path = "draw.html")]
pub struct DrawTemplate {
	pub save_url: &'static str,
}

#[derive(Clone, Debug, Template)]
#[template(path = "gallery.html")]
pub struct GalleryTemplate {
	pub images: Vec<ImageRecord>,
}

#[derive(Clone, Debug, Template)]
#[template(path = "gallery_admin.html")]
pub struct GalleryAdminTemplate {
	pub images: Vec<ImageRecord>,
}
