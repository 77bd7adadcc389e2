pub mod context;
pub mod navigator;
pub mod routes;
pub mod table;

pub use context::RouterContext;
pub use table::{PageKind, Params};
