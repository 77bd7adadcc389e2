//! Add/edit modal for one collection document.

use super::list::{CollectionsVm, EditorMode};
use crate::domain::a001_collection::api::{create_document, update_document};
use crate::shared::alert::Severity;
use crate::shared::components::form_fields::{
    field_specs, initial_values, serialize_fields, values_match, FormFields,
};
use crate::shared::error::commit;
use crate::shared::modal::Modal;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn DocumentEditor(vm: CollectionsVm, mode: EditorMode) -> impl IntoView {
    let specs = vm
        .headers
        .with_untracked(|h| vm.rows.with_untracked(|rows| field_specs(h, rows)));
    let original = match &mode {
        EditorMode::Edit { original, .. } => Some(original.clone()),
        EditorMode::Add => None,
    };
    let values: Vec<RwSignal<String>> = initial_values(&specs, original.as_ref())
        .into_iter()
        .map(RwSignal::new)
        .collect();
    let saving = RwSignal::new(false);
    let no_fields = specs.is_empty();

    let title = match &mode {
        EditorMode::Add => "Thêm mới".to_string(),
        EditorMode::Edit { .. } => "Chỉnh sửa".to_string(),
    };

    let submit_specs = specs.clone();
    let submit_values = values.clone();
    let on_save = move |_| {
        let raw: Vec<String> = submit_values.iter().map(|v| v.get_untracked()).collect();
        let body = match serialize_fields(&submit_specs, &raw) {
            Ok(body) => body,
            Err(err) => {
                vm.alerts.error(err.to_string());
                return;
            }
        };
        if let EditorMode::Edit { original, .. } = &mode {
            if values_match(&body, original) {
                vm.alerts.show(Severity::Info, "Không có thay đổi.");
                vm.close_editor();
                return;
            }
        }

        let mode = mode.clone();
        saving.set(true);
        spawn_local(async move {
            let api = vm.api.get_value();
            let collection = vm.collection();
            let result = match &mode {
                EditorMode::Add => create_document(&api, &collection, &body).await,
                EditorMode::Edit { id, .. } => update_document(&api, &collection, id, &body).await,
            };
            if !commit(saving, false, "document editor") {
                return;
            }
            // failures were already alerted; the modal stays open for a retry
            if result.is_err() {
                return;
            }
            vm.close_editor();
            match mode {
                EditorMode::Add => {
                    vm.alerts.success("Thêm mới thành công!");
                    vm.reset();
                }
                EditorMode::Edit { .. } => {
                    vm.alerts.success("Cập nhật thành công!");
                    vm.reload();
                }
            }
        });
    };

    view! {
        <Modal title=title on_close=Callback::new(move |_| vm.close_editor())>
            <form class="form document-form" on:submit=|ev| ev.prevent_default()>
                {no_fields.then(|| view! {
                    <p class="form__hint">"Chưa xác định được các trường của bộ sưu tập này."</p>
                })}
                <FormFields specs=specs values=values disabled=saving />
                <div class="modal-footer">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.close_editor()>
                        "Hủy"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || saving.get() || no_fields)
                        on_click=on_save
                    >
                        {move || if saving.get() { "Đang lưu..." } else { "Lưu" }}
                    </Button>
                </div>
            </form>
        </Modal>
    }
}
