use super::view_model::{LedgerVm, RecordTarget};
use crate::domain::a002_ledger::model::record_yield;
use crate::shared::components::data_table::row_class;
use crate::shared::format::{format_currency, format_date, format_number, today};
use crate::shared::icons::icon;
use contracts::domain::a002_ledger::CategoryItem;
use leptos::prelude::*;

fn or_na(value: Option<String>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or_else(|| "N/A".to_string())
}

/// Records of one category; the savings category gets rate, term, accrued
/// yield and note columns.
#[component]
pub fn RecordsTable(vm: LedgerVm, item: CategoryItem) -> impl IntoView {
    if item.records.is_empty() {
        return view! {
            <p class="records__empty">"Không có dữ liệu cho mục này."</p>
        }
        .into_any();
    }
    let savings = item.is_savings();
    let now = today();

    view! {
        <div class="records">
            <table class="table">
                <thead>
                    <tr>
                        <th class="table__header table__header--ordinal">"STT"</th>
                        <th class="table__header">"Tên"</th>
                        <th class="table__header">"Số tiền"</th>
                        {savings.then(|| view! {
                            <th class="table__header">"Lãi suất (%/năm)"</th>
                            <th class="table__header">"Kỳ hạn (Tháng)"</th>
                            <th class="table__header">"LS tính đến hôm nay"</th>
                            <th class="table__header">"Ghi chú"</th>
                        })}
                        <th class="table__header">"Ngày"</th>
                        <th class="table__header table__header--actions">"Hành động"</th>
                    </tr>
                </thead>
                <tbody>
                    {item.records.iter().enumerate().map(|(i, record)| {
                        let target = RecordTarget {
                            category_id: item.id.clone(),
                            savings,
                            record: record.clone(),
                        };
                        let delete_target = target.clone();
                        let extra = savings.then(|| {
                            let accrued = format_currency(record_yield(record, now));
                            view! {
                                <td class="table__cell">{or_na(record.rate.map(format_number))}</td>
                                <td class="table__cell">{or_na(record.term.map(format_number))}</td>
                                <td class="table__cell">{accrued}</td>
                                <td class="table__cell">{or_na(record.note.clone())}</td>
                            }
                        });
                        view! {
                            <tr class=row_class(i) data-id=record.id.clone()>
                                <td class="table__cell table__cell--ordinal">{(i + 1).to_string()}</td>
                                <td class="table__cell">{or_na(record.name.clone())}</td>
                                <td class="table__cell">{format_currency(record.amount)}</td>
                                {extra}
                                <td class="table__cell">{or_na(record.date.as_deref().map(format_date))}</td>
                                <td class="table__cell table__cell--actions">
                                    <button class="button button--icon" title="Sửa"
                                        on:click=move |_| vm.editing.set(Some(target.clone()))>
                                        {icon("edit")}
                                    </button>
                                    <button class="button button--icon button--danger" title="Xóa"
                                        on:click=move |_| vm.pending_delete.set(Some(delete_target.clone()))>
                                        {icon("trash")}
                                    </button>
                                </td>
                            </tr>
                        }
                    }).collect_view()}
                </tbody>
            </table>
        </div>
    }
    .into_any()
}
