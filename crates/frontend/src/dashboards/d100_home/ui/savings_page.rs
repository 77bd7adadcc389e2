use super::SavingsTable;
use chrono::{Datelike, Local};
use leptos::prelude::*;

/// `/saving`: the savings table on its own.
#[component]
pub fn SavingsPage() -> impl IntoView {
    let year = Local::now().year();

    view! {
        <div class="saving-page">
            <h2 class="section-title">
                "Danh sách tiết kiệm "
                <span id="chart-period-save">{format!("(Năm {})", year)}</span>
            </h2>
            <SavingsTable />
        </div>
    }
}
