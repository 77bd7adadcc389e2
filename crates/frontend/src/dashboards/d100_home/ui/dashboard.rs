use super::{KpiCards, LoansTable, RecentExpenses, SavingsTable};
use crate::dashboards::d100_home::api::{fetch_category_slices, fetch_summary, fetch_years};
use crate::shared::alert::AlertService;
use crate::shared::api::ApiClient;
use crate::shared::chart::{category_chart, create_js_chart, summary_chart, ChartRegistry, JsChart};
use crate::shared::components::ui::Select;
use crate::shared::error::commit;
use crate::shared::format::today;
use chrono::Datelike;
use leptos::prelude::*;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;

const SUMMARY_CANVAS: &str = "summary-chart";
const CATEGORY_CANVAS: &str = "expense-category-chart";

/// The four mutually exclusive panels under the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubView {
    Summary,
    Category,
    Savings,
    Loans,
}

impl SubView {
    pub const ALL: [SubView; 4] = [
        SubView::Summary,
        SubView::Category,
        SubView::Savings,
        SubView::Loans,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SubView::Summary => "Thu chi theo ngày",
            SubView::Category => "Tỷ trọng chi",
            SubView::Savings => "Tiết kiệm",
            SubView::Loans => "Khoản vay",
        }
    }

    pub fn canvas(&self) -> Option<&'static str> {
        match self {
            SubView::Summary => Some(SUMMARY_CANVAS),
            SubView::Category => Some(CATEGORY_CANVAS),
            SubView::Savings | SubView::Loans => None,
        }
    }
}

/// Year options for the filter; the current year is always offered.
pub fn year_options(mut years: Vec<i32>, current: i32) -> Vec<i32> {
    if !years.contains(&current) {
        years.push(current);
    }
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

#[component]
pub fn HomeDashboard() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let alerts = expect_context::<AlertService>();

    let now = today();
    let years = RwSignal::new(vec![now.year()]);
    let year_text = RwSignal::new(now.year().to_string());
    let month_text = RwSignal::new(now.month().to_string());
    let sub_view = RwSignal::new(SubView::Summary);
    let chart_note = RwSignal::new(None::<String>);

    let year = Memo::new(move |_| year_text.get().parse::<i32>().unwrap_or(0));
    let month = Memo::new(move |_| month_text.get().parse::<u32>().unwrap_or(0));

    let charts = StoredValue::new_local(ChartRegistry::<JsChart>::new());
    on_cleanup(move || {
        _ = charts.try_update_value(|r| r.destroy_all());
    });

    {
        let api = api.clone();
        spawn_local(async move {
            if let Ok(list) = fetch_years(&api).await {
                commit(years, year_options(list, now.year()), "year filter");
            }
        });
    }

    // draw the active chart whenever the filter or the panel changes
    Effect::new(move |_| {
        let (panel, y, m) = (sub_view.get(), year.get(), month.get());
        chart_note.set(None);
        // only the active panel's canvas is in the page
        charts.update_value(|r| r.retain_only(panel.canvas()));
        let Some(canvas) = panel.canvas() else {
            return;
        };
        if y == 0 || m == 0 {
            return;
        }
        let api = api.clone();
        spawn_local(async move {
            let config: Option<Value> = match panel {
                SubView::Summary => fetch_summary(&api, y, m)
                    .await
                    .ok()
                    .map(|s| summary_chart(&s, y, m)),
                _ => match fetch_category_slices(&api, y, m).await {
                    Ok(slices) if slices.is_empty() => {
                        commit(chart_note, Some("Không có khoản chi nào trong tháng này.".into()), "chart");
                        None
                    }
                    Ok(slices) => Some(category_chart(&slices)),
                    Err(_) => None,
                },
            };
            let still_current = sub_view.try_get_untracked() == Some(panel)
                && year.try_get_untracked() == Some(y)
                && month.try_get_untracked() == Some(m);
            if !still_current {
                return;
            }
            let drawn = charts.try_update_value(|r| match &config {
                Some(config) => r.replace(canvas, || create_js_chart(canvas, config)),
                None => {
                    r.destroy(canvas);
                    Ok(())
                }
            });
            if let Some(Err(err)) = drawn {
                log::error!("chart on #{}: {}", canvas, err);
                alerts.error("Không thể vẽ biểu đồ.");
            }
        });
    });

    let year_choices = Signal::derive(move || {
        years
            .get()
            .into_iter()
            .map(|y| (y.to_string(), format!("Năm {}", y)))
            .collect::<Vec<_>>()
    });
    let month_choices = Signal::derive(|| {
        (1..=12u32)
            .map(|m| (m.to_string(), format!("Tháng {}", m)))
            .collect::<Vec<_>>()
    });

    view! {
        <div class="dashboard">
            <div class="dashboard__filter">
                <Select label="Năm" name="home-year-select" value=year_text options=year_choices />
                <Select label="Tháng" name="home-month-select" value=month_text options=month_choices />
                <span id="current_date" class="dashboard__period">
                    {move || format!("tháng {} năm {}", month.get(), year.get())}
                </span>
            </div>

            <KpiCards year=year month=month />
            <RecentExpenses year=year month=month />

            <div class="dashboard__tabs" role="tablist">
                {SubView::ALL
                    .into_iter()
                    .map(|panel| view! {
                        <button
                            role="tab"
                            class=move || if sub_view.get() == panel { "tab tab--active" } else { "tab" }
                            on:click=move |_| sub_view.set(panel)
                        >
                            {panel.label()}
                        </button>
                    })
                    .collect_view()}
            </div>

            <div class="dashboard__panel">
                {move || match sub_view.get() {
                    SubView::Summary | SubView::Category => {
                        let canvas = sub_view.get_untracked().canvas().unwrap_or(SUMMARY_CANVAS);
                        view! {
                            <div class="chart-box">
                                {move || chart_note.get().map(|text| view! { <p class="chart-box__empty">{text}</p> })}
                                <canvas id=canvas></canvas>
                            </div>
                        }
                        .into_any()
                    }
                    SubView::Savings => view! { <SavingsTable /> }.into_any(),
                    SubView::Loans => view! { <LoansTable /> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_year_is_always_offered() {
        assert_eq!(year_options(vec![2022, 2023], 2024), vec![2024, 2023, 2022]);
        assert_eq!(year_options(vec![2024, 2023, 2024], 2024), vec![2024, 2023]);
    }

    #[test]
    fn only_chart_panels_have_canvases() {
        let canvases: Vec<_> = SubView::ALL.iter().filter_map(|v| v.canvas()).collect();
        assert_eq!(canvases, vec![SUMMARY_CANVAS, CATEGORY_CANVAS]);
    }
}
