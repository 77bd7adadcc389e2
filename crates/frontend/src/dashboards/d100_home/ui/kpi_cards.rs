use crate::dashboards::d100_home::api::{fetch_book_count, fetch_savings, fetch_summary};
use crate::dashboards::d100_home::kpi::{previous_period, Trend};
use crate::dashboards::d100_home::savings::{savings_rows, savings_totals};
use crate::shared::api::ApiClient;
use crate::shared::error::commit;
use crate::shared::format::{format_currency, today};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq)]
struct MonthFigures {
    income: f64,
    expense: f64,
    trend: Option<Trend>,
}

#[component]
fn KpiCard(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] note: MaybeProp<String>,
    #[prop(optional, into)] note_class: MaybeProp<String>,
) -> impl IntoView {
    view! {
        <div class="kpi">
            <div class="kpi__label">{label}</div>
            <div class="kpi__value">{move || value.get()}</div>
            {move || note.get().map(|text| view! {
                <div class=move || note_class.get().unwrap_or_else(|| "kpi__note".to_string())>{text}</div>
            })}
        </div>
    }
}

/// Month income/expense/balance with the change against the previous month,
/// plus savings and library totals.
#[component]
pub fn KpiCards(#[prop(into)] year: Signal<i32>, #[prop(into)] month: Signal<u32>) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let figures = RwSignal::new(None::<MonthFigures>);
    let savings = RwSignal::new(None::<(f64, f64)>);
    let books = RwSignal::new(None::<usize>);

    {
        let api = api.clone();
        Effect::new(move |_| {
            let (y, m) = (year.get(), month.get());
            if y == 0 {
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                let (py, pm) = previous_period(y, m);
                let (current, previous) =
                    futures::join!(fetch_summary(&api, y, m), fetch_summary(&api, py, pm));
                let Ok(current) = current else {
                    return;
                };
                if year.try_get_untracked() != Some(y) || month.try_get_untracked() != Some(m) {
                    return;
                }
                let income = current.income.total();
                commit(
                    figures,
                    Some(MonthFigures {
                        income,
                        expense: current.expense.total(),
                        trend: Trend::against(income, previous.map(|p| p.income.total())),
                    }),
                    "kpi cards",
                );
            });
        });
    }

    spawn_local(async move {
        let (deposits, count) = futures::join!(fetch_savings(&api), fetch_book_count(&api));
        if let Ok(deposits) = deposits {
            let rows = savings_rows(&deposits, today());
            commit(savings, Some(savings_totals(&rows)), "kpi cards");
        }
        if let Ok(count) = count {
            commit(books, Some(count), "kpi cards");
        }
    });

    let money = |v: Option<f64>| v.map(format_currency).unwrap_or_else(|| "...".to_string());

    view! {
        <div class="kpi-grid">
            <KpiCard
                label="Tổng thu tháng"
                value=Signal::derive(move || money(figures.get().map(|f| f.income)))
                note=Signal::derive(move || figures.get().and_then(|f| f.trend).map(|t| t.text()))
                note_class=Signal::derive(move || figures.get().and_then(|f| f.trend).map(|t| t.css_class().to_string()))
            />
            <KpiCard
                label="Tổng chi tháng"
                value=Signal::derive(move || money(figures.get().map(|f| f.expense)))
            />
            <KpiCard
                label="Số dư"
                value=Signal::derive(move || money(figures.get().map(|f| f.income - f.expense)))
            />
            <KpiCard
                label="Tổng tiết kiệm"
                value=Signal::derive(move || money(savings.get().map(|s| s.0)))
            />
            <KpiCard
                label="Lãi tiết kiệm tạm tính"
                value=Signal::derive(move || money(savings.get().map(|s| s.1)))
            />
            <KpiCard
                label="Tủ sách"
                value=Signal::derive(move || {
                    books.get().map(|n| format!("{} cuốn", n)).unwrap_or_else(|| "...".to_string())
                })
            />
        </div>
    }
}
