pub mod api;
pub mod model;
pub mod shelf;
pub mod ui;
