use crate::domain::a001_collection::api::{delete_document, fetch_page};
use crate::domain::a001_collection::schema::headers_for;
use crate::shared::alert::AlertService;
use crate::shared::api::ApiClient;
use crate::shared::api_utils::PageQuery;
use crate::shared::components::data_table::HeaderSpec;
use crate::shared::components::pagination_controls::CursorPager;
use crate::shared::error::{commit, commit_update};
use contracts::domain::a001_collection::{document_id, Document};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// What the add/edit modal is doing.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorMode {
    Add,
    Edit { id: String, original: Document },
}

/// Per-mount state of the collections page.
#[derive(Clone, Copy)]
pub struct CollectionsVm {
    pub api: StoredValue<ApiClient>,
    pub alerts: AlertService,
    pub collection: StoredValue<String>,
    pub rows: RwSignal<Vec<Document>>,
    pub headers: RwSignal<Vec<HeaderSpec>>,
    pub pager: RwSignal<CursorPager>,
    pub loading: RwSignal<bool>,
    pub editor: RwSignal<Option<EditorMode>>,
    pub pending_delete: RwSignal<Option<String>>,
    pub deleting: RwSignal<bool>,
}

impl CollectionsVm {
    pub fn new(api: ApiClient, alerts: AlertService, collection: String, page_size: usize) -> Self {
        Self {
            api: StoredValue::new(api),
            alerts,
            collection: StoredValue::new(collection),
            rows: RwSignal::new(Vec::new()),
            headers: RwSignal::new(Vec::new()),
            pager: RwSignal::new(CursorPager::new(page_size)),
            loading: RwSignal::new(false),
            editor: RwSignal::new(None),
            pending_delete: RwSignal::new(None),
            deleting: RwSignal::new(false),
        }
    }

    pub fn collection(&self) -> String {
        self.collection.get_value()
    }

    /// Ordinal offset of the first row on the current page.
    pub fn offset(&self) -> usize {
        let p = self.pager.get();
        (p.current() - 1) * p.page_size()
    }

    pub fn load(&self, page: usize) {
        let Some(req) = self.pager.get_untracked().request(page) else {
            log::warn!("page {} of '{}' requested before its cursor is known", page, self.collection());
            return;
        };
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            let api = this.api.get_value();
            let collection = this.collection();
            let query = PageQuery {
                page_size: this.pager.get_untracked().page_size(),
                start_after: req.start_after.clone(),
            };
            if let Ok(result) = fetch_page(&api, &collection, &query).await {
                let count = result.data.len();
                // a delete can empty the last page; step back to the previous one
                if count == 0 && req.page > 1 {
                    commit(this.loading, false, "collection table");
                    this.load(req.page - 1);
                    return;
                }
                commit_update(this.pager, "collection table", |p| {
                    p.record(
                        req.page,
                        count,
                        result.last_doc_id.clone(),
                        result.total_pages,
                        result.total_records,
                    )
                });
                commit(this.headers, headers_for(&collection, &result.data), "collection table");
                commit(this.rows, result.data, "collection table");
            }
            commit(this.loading, false, "collection table");
        });
    }

    pub fn reload(&self) {
        self.load(self.pager.get_untracked().current());
    }

    /// Back to page 1 with every cursor forgotten.
    pub fn reset(&self) {
        self.pager.update(|p| p.reset());
        self.load(1);
    }

    pub fn open_add(&self) {
        self.editor.set(Some(EditorMode::Add));
    }

    pub fn open_edit(&self, id: &str) {
        let original = self
            .rows
            .with_untracked(|rows| rows.iter().find(|d| document_id(d).as_deref() == Some(id)).cloned());
        match original {
            Some(original) => self.editor.set(Some(EditorMode::Edit {
                id: id.to_string(),
                original,
            })),
            None => log::warn!("edit requested for unknown row {}", id),
        }
    }

    pub fn close_editor(&self) {
        self.editor.set(None);
    }

    pub fn confirm_delete(&self) {
        let Some(id) = self.pending_delete.get_untracked() else {
            return;
        };
        let this = *self;
        this.deleting.set(true);
        spawn_local(async move {
            let api = this.api.get_value();
            let result = delete_document(&api, &this.collection(), &id).await;
            commit(this.deleting, false, "delete dialog");
            if result.is_ok() {
                this.alerts.success("Đã xóa thành công!");
                commit(this.pending_delete, None, "delete dialog");
                this.reload();
            }
        });
    }
}
