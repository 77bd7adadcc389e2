//! `/management`: month tree on the left, category tabs on the right.

mod month_tree;
mod new_item_form;
mod record_editor;
mod records_table;
mod view_model;

pub use view_model::{LedgerVm, MonthState, RecordTarget, SelectedMonth, TreeState};

use crate::domain::a002_ledger::model::{tab_id, NEW_ITEM_TAB};
use crate::shared::alert::AlertService;
use crate::shared::api::ApiClient;
use crate::shared::icons::icon;
use crate::shared::modal::ConfirmDialog;
use leptos::prelude::*;
use month_tree::MonthTree;
use new_item_form::NewItemForm;
use record_editor::RecordEditor;
use records_table::RecordsTable;
use thaw::*;

#[component]
pub fn LedgerPage() -> impl IntoView {
    let vm = LedgerVm::new(expect_context::<ApiClient>(), expect_context::<AlertService>());
    vm.load_tree();

    let pane_style = move |id: String| {
        move || {
            if vm.tabs.with(|t| t.is_active(&id)) {
                "display: block"
            } else {
                "display: none"
            }
        }
    };

    view! {
        <div class="management">
            <aside class="management__tree" id="management-tree">
                <MonthTree vm=vm />
            </aside>
            <section class="management__viewer">
                {move || match vm.month.get() {
                    MonthState::Idle => view! {
                        <p id="viewer-placeholder">"Chọn một tháng để xem chi tiết."</p>
                    }.into_any(),
                    MonthState::Loading => view! {
                        <p id="viewer-placeholder"><Spinner /> " Đang tải dữ liệu..."</p>
                    }.into_any(),
                    MonthState::Failed(reason) => view! {
                        <p id="viewer-placeholder" class="text-error">
                            {format!("Lỗi khi tải dữ liệu: {}", reason)}
                        </p>
                    }.into_any(),
                    MonthState::Ready(items) => {
                        let empty = items.is_empty();
                        let tab_bar = items.iter().map(|item| {
                            let id = tab_id(item);
                            let target = id.clone();
                            let kind_class = if item.is_income() { "tab-thu" } else { "tab-chi" };
                            view! {
                                <div
                                    class=move || {
                                        let active = vm.tabs.with(|t| t.is_active(&id));
                                        format!("item-tab {}{}", kind_class, if active { " active-tab" } else { "" })
                                    }
                                    data-tab-id=target.clone()
                                    on:click=move |_| { vm.tabs.update(|t| { t.activate(&target); }); }
                                >
                                    <span>{item.title().to_string()}</span>
                                </div>
                            }
                        }).collect_view();
                        let panes = items.into_iter().map(|item| {
                            let id = tab_id(&item);
                            let style = pane_style(id.clone());
                            view! {
                                <div class="item-tab-content" id=id style=style>
                                    <RecordsTable vm=vm item=item />
                                </div>
                            }
                        }).collect_view();
                        view! {
                            <div id="item-tab-bar" class="item-tab-bar">
                                {tab_bar}
                                <div class="item-tab-bar__add">
                                    <Button
                                        appearance=ButtonAppearance::Primary
                                        on_click=move |_| { vm.tabs.update(|t| { t.activate(NEW_ITEM_TAB); }); }
                                    >
                                        {icon("plus")} " Thêm khoản mục"
                                    </Button>
                                </div>
                            </div>
                            {empty.then(|| view! {
                                <p id="viewer-placeholder">"Không có khoản chi nào trong tháng này."</p>
                            })}
                            <div id="item-tab-content-container">
                                {panes}
                                <div class="item-tab-content" id=NEW_ITEM_TAB style=pane_style(NEW_ITEM_TAB.to_string())>
                                    <NewItemForm vm=vm />
                                </div>
                            </div>
                        }.into_any()
                    }
                }}
            </section>

            {move || vm.editing.get().map(|target| view! { <RecordEditor vm=vm target=target /> })}

            <Show when=move || vm.pending_delete.get().is_some()>
                <ConfirmDialog
                    message="Bạn có chắc chắn muốn xóa bản ghi này?"
                    on_confirm=Callback::new(move |_| vm.confirm_delete())
                    on_cancel=Callback::new(move |_| vm.pending_delete.set(None))
                    busy=vm.deleting
                />
            </Show>
        </div>
    }
}
