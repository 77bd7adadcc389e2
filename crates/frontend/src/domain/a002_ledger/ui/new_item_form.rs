use super::view_model::LedgerVm;
use crate::domain::a002_ledger::api::create_item;
use crate::domain::a002_ledger::model::ItemDraft;
use crate::shared::components::ui::{Input, Select};
use crate::shared::error::commit;
use crate::shared::format::today_ymd;
use contracts::domain::a002_ledger::TransactionType;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

/// Add form of the "new item" tab.
#[component]
pub fn NewItemForm(vm: LedgerVm) -> impl IntoView {
    let kind = RwSignal::new(TransactionType::Income.label().to_string());
    let name = RwSignal::new(String::new());
    let amount = RwSignal::new(String::new());
    let date = RwSignal::new(today_ymd());
    let rate = RwSignal::new(String::new());
    let term = RwSignal::new(String::new());
    let note = RwSignal::new(String::new());
    let saving = RwSignal::new(false);

    let is_savings = Memo::new(move |_| {
        TransactionType::from_label(&kind.get()).is_some_and(|t| t.is_savings())
    });

    let kind_options = Signal::derive(|| {
        TransactionType::ALL
            .iter()
            .map(|t| (t.label().to_string(), t.label().to_string()))
            .collect::<Vec<_>>()
    });
    let name_options = Signal::derive(move || {
        vm.item_names
            .get()
            .into_iter()
            .map(|n| (n.clone(), n))
            .collect::<Vec<_>>()
    });

    let submit = move || {
        let Some(selected) = vm.selected.get_untracked() else {
            vm.alerts.error("Vui lòng chọn một tháng từ menu.");
            return;
        };
        let draft = ItemDraft {
            kind: TransactionType::from_label(&kind.get_untracked()).unwrap_or(TransactionType::Income),
            name: name.get_untracked(),
            amount: amount.get_untracked(),
            date: date.get_untracked(),
            rate: rate.get_untracked(),
            term: term.get_untracked(),
            note: note.get_untracked(),
        };
        let request = match draft.to_request(&selected.year, &selected.month) {
            Ok(request) => request,
            Err(err) => {
                vm.alerts.error(err.to_string());
                return;
            }
        };
        saving.set(true);
        spawn_local(async move {
            let api = vm.api.get_value();
            let result = create_item(&api, &request).await;
            if !commit(saving, false, "new item form") {
                return;
            }
            if result.is_ok() {
                vm.alerts.success("Tạo mục mới thành công!");
                vm.reload_month();
            }
        });
    };

    view! {
        <form class="item-form" data-tab-id="new-item-tab" on:submit=move |ev| {
            ev.prevent_default();
            submit();
        }>
            <h3 class="item-form__title">"Tạo khoản thu/chi mới"</h3>
            <div class="item-form__grid">
                <Select label="Loại (Thu/Chi)" name="Loại" value=kind options=kind_options required=true />
                <Select label="Tên khoản" name="Tên" value=name options=name_options placeholder="Chọn mục" required=true />
                <Input label="Số tiền (VND)" name="Số tiền" input_type="number" value=amount required=true />
                <Input label="Ngày" name="date" input_type="date" value=date required=true />
            </div>
            <Show when=move || is_savings.get()>
                <div class="saving-fields">
                    <Input label="Lãi suất (%/năm)" name="rate" input_type="number" step="0.01" value=rate />
                    <Input label="Kỳ hạn (tháng)" name="term" input_type="number" value=term />
                    <Input label="Ghi chú" name="note" value=note />
                </div>
            </Show>
            <div class="form-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=saving
                    on_click=move |_| submit()
                >
                    {move || if saving.get() { "Đang lưu..." } else { "Lưu mới" }}
                </Button>
            </div>
        </form>
    }
}
