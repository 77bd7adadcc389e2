use super::view_model::{LedgerVm, RecordTarget};
use crate::domain::a002_ledger::api::update_record;
use crate::domain::a002_ledger::model::RecordDraft;
use crate::shared::components::ui::{Input, Textarea};
use crate::shared::error::commit;
use crate::shared::format::{format_currency, format_date};
use crate::shared::modal::Modal;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn RecordEditor(vm: LedgerVm, target: RecordTarget) -> impl IntoView {
    let draft = RecordDraft::from_record(&target.record);
    let amount = RwSignal::new(draft.amount);
    let rate = RwSignal::new(draft.rate);
    let term = RwSignal::new(draft.term);
    let note = RwSignal::new(draft.note);
    let saving = RwSignal::new(false);
    let close = Callback::new(move |_| vm.editing.set(None));

    let record = target.record.clone();
    let name_text = record.name.clone().unwrap_or_else(|| "N/A".to_string());
    let date_text = record.date.as_deref().map(format_date).unwrap_or_else(|| "N/A".to_string());
    let current_amount = format_currency(record.amount);
    let savings = target.savings;

    let on_save = move |_| {
        let Some(selected) = vm.selected.get_untracked() else {
            vm.alerts.error("Không thể xác định năm/tháng hiện tại");
            return;
        };
        let draft = RecordDraft {
            amount: amount.get_untracked(),
            rate: rate.get_untracked(),
            term: term.get_untracked(),
            note: note.get_untracked(),
        };
        let request = match draft.to_request(
            &selected.year,
            &selected.month,
            &target.category_id,
            target.savings,
            &target.record,
        ) {
            Ok(request) => request,
            Err(err) => {
                vm.alerts.error(err.to_string());
                return;
            }
        };
        saving.set(true);
        spawn_local(async move {
            let api = vm.api.get_value();
            let result = update_record(&api, &request).await;
            if !commit(saving, false, "record editor") {
                return;
            }
            if result.is_ok() {
                vm.alerts.success("Cập nhật thành công!");
                vm.editing.set(None);
                vm.reload_month();
            }
        });
    };

    view! {
        <Modal title="Chỉnh sửa bản ghi".to_string() on_close=close>
            <form class="form record-form" on:submit=|ev| ev.prevent_default()>
                <div class="record-form__summary">
                    <div><span>"Tên khoản:"</span> <strong>{name_text}</strong></div>
                    <div><span>"Ngày:"</span> <strong>{date_text}</strong></div>
                </div>
                <Input label="Số tiền (VND) *" name="amount" input_type="number" value=amount required=true disabled=saving />
                <p class="form__hint">{format!("Số tiền hiện tại: {}", current_amount)}</p>
                {savings.then(|| view! {
                    <fieldset class="record-form__savings">
                        <legend>"Thông tin tiết kiệm"</legend>
                        <Input label="Lãi suất (%/năm) *" name="rate" input_type="number" step="0.01" value=rate disabled=saving />
                        <Input label="Kỳ hạn (tháng) *" name="term" input_type="number" value=term disabled=saving />
                        <Textarea label="Ghi chú" name="note" value=note rows=2 disabled=saving />
                    </fieldset>
                })}
                <div class="modal-footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| close.run(())>
                        "Hủy"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary disabled=saving on_click=on_save>
                        {move || if saving.get() { "Đang lưu..." } else { "Lưu thay đổi" }}
                    </Button>
                </div>
            </form>
        </Modal>
    }
}
