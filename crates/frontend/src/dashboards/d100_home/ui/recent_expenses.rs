use crate::dashboards::d100_home::api::fetch_recent_expenses;
use crate::shared::api::ApiClient;
use crate::shared::components::data_table::row_class;
use crate::shared::error::commit;
use crate::shared::format::{format_currency, format_date};
use contracts::dashboards::d100_home::RecentTransaction;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

/// Latest expenses of the filtered month; reloads with the filter.
#[component]
pub fn RecentExpenses(#[prop(into)] year: Signal<i32>, #[prop(into)] month: Signal<u32>) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    // `None` while loading
    let rows = RwSignal::new(None::<Vec<RecentTransaction>>);

    Effect::new(move |_| {
        let (y, m) = (year.get(), month.get());
        if y == 0 || m == 0 {
            return;
        }
        rows.set(None);
        let api = api.clone();
        spawn_local(async move {
            let fetched = fetch_recent_expenses(&api, y, m).await.unwrap_or_default();
            if year.try_get_untracked() != Some(y) || month.try_get_untracked() != Some(m) {
                return;
            }
            commit(rows, Some(fetched), "recent expenses");
        });
    });

    view! {
        <section class="recent-expenses">
            <h3 class="recent-expenses__title">"Chi tiêu gần đây"</h3>
            <table class="table" id="recent-transactions">
                <thead>
                    <tr>
                        <th class="table__header">"Ngày"</th>
                        <th class="table__header">"Nội dung"</th>
                        <th class="table__header">"Số tiền"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || match rows.get() {
                        None => view! {
                            <tr><td colspan="3" class="table__cell table__cell--center"><Spinner /></td></tr>
                        }.into_any(),
                        Some(list) if list.is_empty() => view! {
                            <tr class="table__row table__row--empty">
                                <td colspan="3" class="table__cell">"Không có khoản chi nào trong tháng này."</td>
                            </tr>
                        }.into_any(),
                        Some(list) => list
                            .into_iter()
                            .enumerate()
                            .map(|(i, tx)| view! {
                                <tr class=row_class(i)>
                                    <td class="table__cell">{format_date(&tx.date)}</td>
                                    <td class="table__cell">{tx.name}</td>
                                    <td class="table__cell table__cell--number">{format_currency(tx.amount)}</td>
                                </tr>
                            })
                            .collect_view()
                            .into_any(),
                    }}
                </tbody>
            </table>
        </section>
    }
}
