pub mod data_table;
pub mod form_fields;
pub mod pagination_controls;
pub mod star_rating;
pub mod ui;
