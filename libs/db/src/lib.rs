//! Database schema definitions

mod schema;

pub use schema::*;
