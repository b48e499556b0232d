//! Request and response bodies of the JSON API

pub mod image;
