//! Home dashboard: KPI cards, month charts, savings and loans.

pub mod api;
pub mod kpi;
pub mod savings;
pub mod ui;
