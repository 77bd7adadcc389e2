use crate::dashboards::d100_home::api::fetch_savings;
use crate::dashboards::d100_home::savings::{savings_rows, SavingsRow};
use crate::shared::api::ApiClient;
use crate::shared::components::data_table::row_class;
use crate::shared::error::commit;
use crate::shared::format::{format_currency, format_date, format_number, today};
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, PartialEq)]
enum Load {
    Pending,
    Ready(Vec<SavingsRow>),
    Failed,
}

/// Deposits with days held, accrued yield and maturity status.
#[component]
pub fn SavingsTable() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let state = RwSignal::new(Load::Pending);

    spawn_local(async move {
        let next = match fetch_savings(&api).await {
            Ok(deposits) => Load::Ready(savings_rows(&deposits, today())),
            Err(_) => Load::Failed,
        };
        commit(state, next, "savings table");
    });

    view! {
        <div class="table-wrapper">
            <table class="table savings-table">
                <thead>
                    <tr>
                        <th class="table__header">"Số tiền"</th>
                        <th class="table__header">"Lãi suất"</th>
                        <th class="table__header">"Kỳ hạn"</th>
                        <th class="table__header">"Ngày gửi"</th>
                        <th class="table__header">"Lợi tức (VND)"</th>
                        <th class="table__header">"Ghi chú"</th>
                        <th class="table__header">"Trạng thái"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || match state.get() {
                        Load::Pending => view! {
                            <tr><td colspan="7" class="table__cell table__cell--center"><Spinner /></td></tr>
                        }.into_any(),
                        Load::Failed => view! {
                            <tr><td colspan="7" class="table__cell table__cell--center">"Không thể tải bảng tiết kiệm."</td></tr>
                        }.into_any(),
                        Load::Ready(rows) if rows.is_empty() => view! {
                            <tr><td colspan="7" class="table__cell table__cell--center">"Chưa có khoản tiết kiệm nào."</td></tr>
                        }.into_any(),
                        Load::Ready(rows) => rows
                            .into_iter()
                            .enumerate()
                            .map(|(i, row)| view! {
                                <tr class=row_class(i) data-id=row.deposit.id.clone()>
                                    <td class="table__cell">{format_currency(row.deposit.amount)}</td>
                                    <td class="table__cell">{format!("{}%", format_number(row.deposit.rate))}</td>
                                    <td class="table__cell">{format!("{} tháng", row.deposit.term)}</td>
                                    <td class="table__cell">{format_date(&row.deposit.date)}</td>
                                    <td class="table__cell">{format_number(row.accrued_yield)}</td>
                                    <td class="table__cell">{row.deposit.note.clone().unwrap_or_default()}</td>
                                    <td class=format!("table__cell {}", row.status.css_class())>{row.status.label()}</td>
                                </tr>
                            })
                            .collect_view()
                            .into_any(),
                    }}
                </tbody>
            </table>
        </div>
    }
}
