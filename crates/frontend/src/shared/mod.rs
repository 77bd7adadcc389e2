pub mod alert;
pub mod api;
pub mod api_utils;
pub mod chart;
pub mod components;
pub mod error;
pub mod format;
pub mod icons;
pub mod list_utils;
pub mod modal;
pub mod once;
pub mod tab_registry;
