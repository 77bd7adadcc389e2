//! Generic CRUD over named backend collections.

pub mod api;
pub mod schema;
pub mod ui;
