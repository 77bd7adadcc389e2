mod dashboard;
mod kpi_cards;
mod loans_table;
mod recent_expenses;
mod savings_page;
mod savings_table;

pub use dashboard::HomeDashboard;
pub use kpi_cards::KpiCards;
pub use loans_table::LoansTable;
pub use recent_expenses::RecentExpenses;
pub use savings_page::SavingsPage;
pub use savings_table::SavingsTable;
