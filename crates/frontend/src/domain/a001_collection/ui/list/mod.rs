//! `/collections[/:collection]`: paginated document table with add, edit
//! and delete.

mod view_model;

pub use view_model::{CollectionsVm, EditorMode};

use super::details::DocumentEditor;
use crate::config::AppConfig;
use crate::domain::a001_collection::api::fetch_collection_names;
use crate::routes::RouterContext;
use crate::shared::alert::AlertService;
use crate::shared::api::ApiClient;
use crate::shared::api_utils::segment;
use crate::shared::components::data_table::DataTable;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::ui::Select;
use crate::shared::error::commit;
use crate::shared::icons::icon;
use crate::shared::modal::ConfirmDialog;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

#[component]
pub fn CollectionsPage(
    /// Collection from the path; the configured default when absent.
    #[prop(optional)]
    collection: Option<String>,
) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let alerts = expect_context::<AlertService>();
    let config = expect_context::<AppConfig>();
    let router = use_context::<RouterContext>();

    let collection = collection
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| config.default_collection.clone());
    let vm = CollectionsVm::new(api.clone(), alerts, collection.clone(), config.collection_page_size);
    vm.load(1);

    // collection switcher
    let names = RwSignal::new(vec![collection.clone()]);
    let selected = RwSignal::new(collection.clone());
    spawn_local(async move {
        if let Ok(mut list) = fetch_collection_names(&api.silent()).await {
            let current = vm.collection();
            if !list.contains(&current) {
                list.insert(0, current);
            }
            commit(names, list, "collection picker");
        }
    });
    Effect::new(move |prev: Option<String>| {
        let chosen = selected.get();
        if prev.is_some() && chosen != vm.collection() {
            if let Some(router) = router {
                router.go(&format!("/collections/{}", segment(&chosen)));
            }
        }
        chosen
    });
    let name_options = Signal::derive(move || {
        names.get().into_iter().map(|n| (n.clone(), n)).collect::<Vec<_>>()
    });

    view! {
        <div class="collections" id="collections-content" data-collection=collection.clone()>
            <div class="collections__toolbar">
                <Select label="Bộ sưu tập" name="collection-select" value=selected options=name_options />
                <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.open_add()>
                    {icon("plus")} " Thêm mới"
                </Button>
            </div>

            <div class="collections__table">
                <Show when=move || vm.loading.get()>
                    <div class="table-overlay"><Spinner /></div>
                </Show>
                <DataTable
                    headers=vm.headers
                    rows=vm.rows
                    offset=Signal::derive(move || vm.offset())
                    on_edit=Callback::new(move |id: String| vm.open_edit(&id))
                    on_delete=Callback::new(move |id: String| vm.pending_delete.set(Some(id)))
                    empty_text="Không có dữ liệu cho mục này.".to_string()
                />
            </div>
            <PaginationControls
                pager=vm.pager
                on_page_change=Callback::new(move |page| vm.load(page))
                disabled=vm.loading
            />

            {move || vm.editor.get().map(|mode| view! { <DocumentEditor vm=vm mode=mode /> })}

            <Show when=move || vm.pending_delete.get().is_some()>
                <ConfirmDialog
                    message="Bạn có chắc chắn muốn xóa mục này không?"
                    on_confirm=Callback::new(move |_| vm.confirm_delete())
                    on_cancel=Callback::new(move |_| vm.pending_delete.set(None))
                    busy=vm.deleting
                />
            </Show>
        </div>
    }
}
