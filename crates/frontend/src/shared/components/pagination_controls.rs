use crate::shared::icons::icon;
use leptos::prelude::*;

/// Cursor bookkeeping for "startAfter" pagination.
///
/// `cursors[i]` is the `startAfter` value that fetches page `i + 1`, so
/// `cursors[0]` is always `None`. A cursor is only learned by fetching the
/// page before it and is never overwritten afterwards; earlier pages are
/// re-fetched with the cursor recorded on the way forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorPager {
    page_size: usize,
    current: usize,
    cursors: Vec<Option<String>>,
    has_next: bool,
    total_pages: Option<u32>,
    total_records: Option<u32>,
}

/// What to ask the server for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub start_after: Option<String>,
}

impl CursorPager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
            cursors: vec![None],
            has_next: false,
            total_pages: None,
            total_records: None,
        }
    }

    /// Forgets every cursor; the next request is page 1.
    pub fn reset(&mut self) {
        *self = Self::new(self.page_size);
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Pages whose cursor is known and can be jumped to.
    pub fn known_pages(&self) -> usize {
        self.cursors.len()
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    pub fn total_records(&self) -> Option<u32> {
        self.total_records
    }

    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Request for `page`, or `None` when its cursor is not known yet.
    pub fn request(&self, page: usize) -> Option<PageRequest> {
        if page == 0 {
            return None;
        }
        let start_after = self.cursors.get(page - 1)?.clone();
        Some(PageRequest { page, start_after })
    }

    pub fn request_current(&self) -> PageRequest {
        self.request(self.current).unwrap_or(PageRequest {
            page: 1,
            start_after: None,
        })
    }

    pub fn request_next(&self) -> Option<PageRequest> {
        if !self.has_next {
            return None;
        }
        self.request(self.current + 1)
    }

    pub fn request_prev(&self) -> Option<PageRequest> {
        if !self.has_prev() {
            return None;
        }
        self.request(self.current - 1)
    }

    /// Records the outcome of fetching `page`.
    pub fn record(
        &mut self,
        page: usize,
        rows: usize,
        last_doc_id: Option<String>,
        total_pages: Option<u32>,
        total_records: Option<u32>,
    ) {
        self.current = page.max(1);
        self.total_pages = total_pages.or(self.total_pages);
        self.total_records = total_records.or(self.total_records);

        let full_page = rows >= self.page_size;
        let more = match self.total_pages {
            Some(total) => (self.current as u32) < total,
            None => full_page,
        };

        if let Some(cursor) = last_doc_id.filter(|c| !c.is_empty()) {
            if more && self.cursors.len() == self.current {
                self.cursors.push(Some(cursor));
            }
        }
        self.has_next = more && self.cursors.len() > self.current;
    }
}

/// Prev/next plus one button per page whose cursor is known.
#[component]
pub fn PaginationControls(
    #[prop(into)] pager: Signal<CursorPager>,
    /// Called with the 1-based page to load
    on_page_change: Callback<usize>,
    #[prop(optional, into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| {
                    if let Some(req) = pager.get_untracked().request_prev() {
                        on_page_change.run(req.page);
                    }
                }
                disabled=move || disabled.get() || !pager.get().has_prev()
                title="Trang trước"
            >
                {icon("chevron-left")}
            </button>
            {move || {
                let p = pager.get();
                (1..=p.known_pages())
                    .map(|page| {
                        let is_current = page == p.current();
                        view! {
                            <button
                                class=if is_current { "pagination-btn pagination-btn--active" } else { "pagination-btn" }
                                disabled=move || disabled.get() || is_current
                                on:click=move |_| on_page_change.run(page)
                            >
                                {page.to_string()}
                            </button>
                        }
                    })
                    .collect_view()
            }}
            <span class="pagination-info">
                {move || {
                    let p = pager.get();
                    match (p.total_pages(), p.total_records()) {
                        (Some(pages), Some(records)) => {
                            format!("Trang {} / {} ({} bản ghi)", p.current(), pages.max(1), records)
                        }
                        (Some(pages), None) => format!("Trang {} / {}", p.current(), pages.max(1)),
                        _ => format!("Trang {}", p.current()),
                    }
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    if let Some(req) = pager.get_untracked().request_next() {
                        on_page_change.run(req.page);
                    }
                }
                disabled=move || disabled.get() || !pager.get().has_next()
                title="Trang sau"
            >
                {icon("chevron-right")}
            </button>
        </div>
    }
}
