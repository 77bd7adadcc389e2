pub mod actions;
pub mod api_error;
pub mod de;
pub mod period;
