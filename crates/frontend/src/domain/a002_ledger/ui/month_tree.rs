use super::view_model::{LedgerVm, SelectedMonth, TreeState};
use leptos::prelude::*;

/// Expandable year list with one link per month.
#[component]
pub fn MonthTree(vm: LedgerVm) -> impl IntoView {
    move || match vm.tree.get() {
        TreeState::Loading => view! { <p class="tree__hint">"Đang tải..."</p> }.into_any(),
        TreeState::Failed(reason) => view! {
            <p class="text-error">{format!("Lỗi khi tải cây quản lý: {}", reason)}</p>
        }
        .into_any(),
        TreeState::Ready(nodes) => view! {
            <ul class="tree">
                {nodes.into_iter().map(|node| {
                    let year = node.year.clone();
                    let toggle_year = year.clone();
                    let open_year = year.clone();
                    let is_open = Memo::new(move |_| vm.expanded.with(|e| e.contains(&open_year)));
                    view! {
                        <li>
                            <span
                                class=move || if is_open.get() { "toggle caret-down" } else { "toggle" }
                                on:click=move |_| vm.toggle_year(&toggle_year)
                            >
                                {year.clone()}
                            </span>
                            <ul class=move || if is_open.get() { "nested active" } else { "nested" }>
                                {node.months.into_iter().map(|month| {
                                    let here = SelectedMonth { year: year.clone(), month: month.clone() };
                                    let (y, m) = (year.clone(), month.clone());
                                    view! {
                                        <li>
                                            <span
                                                class=move || {
                                                    if vm.selected.get().as_ref() == Some(&here) {
                                                        "month-link active-month"
                                                    } else {
                                                        "month-link"
                                                    }
                                                }
                                                data-year=y.clone()
                                                data-month=m.clone()
                                                on:click=move |_| vm.select_month(&y, &m)
                                            >
                                                {format!("Tháng {}", month)}
                                            </span>
                                        </li>
                                    }
                                }).collect_view()}
                            </ul>
                        </li>
                    }
                }).collect_view()}
            </ul>
        }
        .into_any(),
    }
}
