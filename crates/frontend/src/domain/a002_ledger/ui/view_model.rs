use crate::domain::a002_ledger::api::{delete_record, fetch_item_names, fetch_month_items, fetch_tree};
use crate::domain::a002_ledger::model::{tab_id, year_nodes, YearNode, NEW_ITEM_TAB};
use crate::shared::alert::AlertService;
use crate::shared::api::ApiClient;
use crate::shared::error::{commit, commit_update};
use crate::shared::tab_registry::TabRegistry;
use contracts::domain::a002_ledger::{CategoryItem, DeleteRecordRequest, LedgerRecord};
use leptos::prelude::*;
use std::collections::BTreeSet;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, PartialEq)]
pub enum TreeState {
    Loading,
    Ready(Vec<YearNode>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedMonth {
    pub year: String,
    pub month: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MonthState {
    Idle,
    Loading,
    Ready(Vec<CategoryItem>),
    Failed(String),
}

/// A record together with the category it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTarget {
    pub category_id: String,
    pub savings: bool,
    pub record: LedgerRecord,
}

#[derive(Clone, Copy)]
pub struct LedgerVm {
    pub api: StoredValue<ApiClient>,
    pub alerts: AlertService,
    pub tree: RwSignal<TreeState>,
    pub expanded: RwSignal<BTreeSet<String>>,
    pub selected: RwSignal<Option<SelectedMonth>>,
    pub month: RwSignal<MonthState>,
    pub tabs: RwSignal<TabRegistry>,
    pub item_names: RwSignal<Vec<String>>,
    pub editing: RwSignal<Option<RecordTarget>>,
    pub pending_delete: RwSignal<Option<RecordTarget>>,
    pub deleting: RwSignal<bool>,
    /// Bumped per month load; older completions are dropped.
    load_seq: StoredValue<u64>,
}

impl LedgerVm {
    pub fn new(api: ApiClient, alerts: AlertService) -> Self {
        Self {
            api: StoredValue::new(api),
            alerts,
            tree: RwSignal::new(TreeState::Loading),
            expanded: RwSignal::new(BTreeSet::new()),
            selected: RwSignal::new(None),
            month: RwSignal::new(MonthState::Idle),
            tabs: RwSignal::new(TabRegistry::new()),
            item_names: RwSignal::new(Vec::new()),
            editing: RwSignal::new(None),
            pending_delete: RwSignal::new(None),
            deleting: RwSignal::new(false),
            load_seq: StoredValue::new(0),
        }
    }

    pub fn load_tree(&self) {
        let this = *self;
        spawn_local(async move {
            let api = this.api.get_value();
            let state = match fetch_tree(&api.silent()).await {
                Ok(tree) => TreeState::Ready(year_nodes(tree)),
                Err(err) => TreeState::Failed(err.detail()),
            };
            commit(this.tree, state, "management tree");
        });
    }

    pub fn toggle_year(&self, year: &str) {
        self.expanded.update(|open| {
            if !open.remove(year) {
                open.insert(year.to_string());
            }
        });
    }

    pub fn select_month(&self, year: &str, month: &str) {
        let selected = SelectedMonth {
            year: year.to_string(),
            month: month.to_string(),
        };
        self.selected.set(Some(selected.clone()));
        self.load_month(selected, None);
    }

    /// Reloads the selected month and keeps the visible tab when it still exists.
    pub fn reload_month(&self) {
        let Some(selected) = self.selected.get_untracked() else {
            return;
        };
        let keep = self.tabs.with_untracked(|t| t.active().map(str::to_string));
        self.load_month(selected, keep);
    }

    fn load_month(&self, selected: SelectedMonth, keep_tab: Option<String>) {
        self.load_seq.update_value(|s| *s += 1);
        let seq = self.load_seq.get_value();
        self.month.set(MonthState::Loading);

        let this = *self;
        spawn_local(async move {
            let api = this.api.get_value();
            match fetch_item_names(&api.silent()).await {
                Ok(names) => {
                    commit(this.item_names, names, "ledger item names");
                }
                Err(err) => log::warn!("ledger item names unavailable: {}", err),
            }
            let result = fetch_month_items(&api, &selected.year, &selected.month).await;
            if this.load_seq.try_get_value() != Some(seq) {
                log::debug!("dropping stale ledger load {}/{}", selected.year, selected.month);
                return;
            }
            match result {
                Ok(items) => {
                    commit_update(this.tabs, "ledger tabs", |tabs| {
                        tabs.reset();
                        for item in &items {
                            tabs.open(tab_id(item));
                        }
                        tabs.open(NEW_ITEM_TAB);
                        let first = items
                            .first()
                            .map(tab_id)
                            .unwrap_or_else(|| NEW_ITEM_TAB.to_string());
                        let target = keep_tab.filter(|t| tabs.is_open(t)).unwrap_or(first);
                        tabs.activate(&target);
                    });
                    commit(this.month, MonthState::Ready(items), "ledger month");
                }
                Err(err) => {
                    commit(this.month, MonthState::Failed(err.detail()), "ledger month");
                }
            }
        });
    }

    pub fn confirm_delete(&self) {
        let (Some(target), Some(selected)) = (
            self.pending_delete.get_untracked(),
            self.selected.get_untracked(),
        ) else {
            return;
        };
        let request = DeleteRecordRequest {
            year: selected.year,
            month: selected.month,
            type_id: target.category_id,
            record_id: target.record.id,
        };
        let this = *self;
        this.deleting.set(true);
        spawn_local(async move {
            let api = this.api.get_value();
            let result = delete_record(&api, &request).await;
            if !commit(this.deleting, false, "ledger delete") {
                return;
            }
            if result.is_ok() {
                this.alerts.success("Xóa thành công!");
                this.pending_delete.set(None);
                this.reload_month();
            }
        });
    }
}
