//! `/bookstore`: the shelf wall.

use super::{BookForm, BookFormMode, BookInfo};
use crate::domain::a003_book::api::{delete_book, fetch_books, fetch_shelves};
use crate::domain::a003_book::shelf::{shelf_grid, spine_style};
use crate::shared::alert::AlertService;
use crate::shared::api::ApiClient;
use crate::shared::error::{commit, commit_update};
use crate::shared::list_utils::{filter_list, SearchInput};
use crate::shared::modal::{ConfirmDialog, Modal};
use contracts::domain::a003_book::{Book, Orientation, ShelfLocation, ShelfRow};
use leptos::ev;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, PartialEq)]
enum LibraryModal {
    Add(ShelfLocation),
    View(Book),
    Edit(Book),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Load {
    Loading,
    Ready,
    Failed,
}

#[component]
pub fn LibraryPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let alerts = expect_context::<AlertService>();

    let shelves = RwSignal::new(Vec::<ShelfRow>::new());
    let books = RwSignal::new(Vec::<Book>::new());
    let load = RwSignal::new(Load::Loading);
    let query = RwSignal::new(String::new());
    let modal = RwSignal::new(None::<LibraryModal>);
    let pending_delete = RwSignal::new(None::<Book>);
    let deleting = RwSignal::new(false);

    let refetch_books = {
        let api = api.clone();
        move || {
            let api = api.clone();
            spawn_local(async move {
                if let Ok(list) = fetch_books(&api).await {
                    commit(books, list, "library");
                }
            });
        }
    };

    {
        let api = api.silent();
        spawn_local(async move {
            let (layout, list) = futures::join!(fetch_shelves(&api), fetch_books(&api));
            match (layout, list) {
                (Ok(layout), Ok(list)) => {
                    commit(shelves, layout, "library");
                    commit(books, list, "library");
                    commit(load, Load::Ready, "library");
                }
                (layout, list) => {
                    let err = layout.err().or(list.err());
                    log::error!("library load failed: {:?}", err);
                    if commit(load, Load::Failed, "library") {
                        alerts.error("Không thể tải thư viện.");
                    }
                }
            }
        });
    }

    let grid = Memo::new(move |_| {
        let q = query.get();
        books.with(|all| {
            let matched = filter_list(all, &q);
            shelves.with(|rows| shelf_grid(rows, &matched))
        })
    });
    let match_count = Memo::new(move |_| {
        let q = query.get();
        books.with(|all| (!q.trim().is_empty()).then(|| filter_list(all, &q).len()))
    });

    let on_saved = Callback::new(move |stored: Option<Book>| {
        let edited = matches!(modal.get_untracked(), Some(LibraryModal::Edit(_)));
        modal.set(None);
        match stored {
            Some(book) if edited => books.update(|all| {
                if let Some(slot) = all.iter_mut().find(|b| b.id == book.id) {
                    *slot = book;
                }
            }),
            Some(book) => books.update(|all| all.push(book)),
            None => refetch_books(),
        }
    });

    let confirm_delete = {
        let api = api.clone();
        move |_: ()| {
            let Some(book) = pending_delete.get_untracked() else {
                return;
            };
            deleting.set(true);
            let api = api.clone();
            spawn_local(async move {
                let result = delete_book(&api, &book.id).await;
                if !commit(deleting, false, "library delete") {
                    return;
                }
                if result.is_ok() {
                    alerts.success("Đã xóa sách.");
                    pending_delete.set(None);
                    modal.set(None);
                    commit_update(books, "library", |all| all.retain(|b| b.id != book.id));
                }
            });
        }
    };

    view! {
        <div class="library">
            <div class="library__toolbar">
                <SearchInput
                    on_change=Callback::new(move |text: String| query.set(text))
                    placeholder="Tìm theo tên sách, tác giả, thể loại..."
                />
                {move || match_count.get().map(|n| view! {
                    <span class="library__count">{format!("Tìm thấy {} sách", n)}</span>
                })}
            </div>

            <div id="library-container" class="library__wall">
                {move || match load.get() {
                    Load::Loading => view! { <div class="library__loading"><Spinner /></div> }.into_any(),
                    Load::Failed => view! {
                        <p class="error-message">"Không thể tải thư viện."</p>
                    }.into_any(),
                    Load::Ready => {
                        let (rows, unplaced) = grid.get();
                        view! {
                            {rows.into_iter().map(|units| view! {
                                <div class="library-row">
                                    {units.into_iter().map(|unit| {
                                        let orientation = unit.orientation;
                                        let class = match orientation {
                                            Orientation::Vertical => "unit unit-vertical",
                                            Orientation::Horizontal => "unit unit-horizontal",
                                        };
                                        let grow = format!("flex-grow: {}", unit.compartments.len());
                                        view! {
                                            <div class=class style=grow>
                                                {unit.compartments.into_iter().map(|comp| {
                                                    let location = comp.location;
                                                    view! {
                                                        <div
                                                            class="compartment"
                                                            title=location.label()
                                                            on:click=move |_| modal.set(Some(LibraryModal::Add(location)))
                                                        >
                                                            {comp.books.into_iter().map(|book| {
                                                                view! { <BookSpine book=book orientation=orientation modal=modal /> }
                                                            }).collect_view()}
                                                        </div>
                                                    }
                                                }).collect_view()}
                                            </div>
                                        }
                                    }).collect_view()}
                                </div>
                            }).collect_view()}
                            {(!unplaced.is_empty()).then(|| view! {
                                <div class="library__unplaced">
                                    <h4>"Sách chưa xếp kệ"</h4>
                                    {unplaced.into_iter().map(|book| view! {
                                        <BookSpine book=book orientation=Orientation::Horizontal modal=modal />
                                    }).collect_view()}
                                </div>
                            })}
                        }.into_any()
                    }
                }}
            </div>

            {move || modal.get().map(|current| {
                let close = Callback::new(move |_| modal.set(None));
                match current {
                    LibraryModal::Add(location) => view! {
                        <Modal title="Thêm sách mới".to_string() on_close=close>
                            <BookForm mode=BookFormMode::Add(location) on_saved=on_saved on_cancel=close />
                        </Modal>
                    }.into_any(),
                    LibraryModal::Edit(book) => view! {
                        <Modal title="Chỉnh sửa sách".to_string() on_close=close>
                            <BookForm mode=BookFormMode::Edit(book) on_saved=on_saved on_cancel=close />
                        </Modal>
                    }.into_any(),
                    LibraryModal::View(book) => {
                        let title = book.title.clone();
                        let for_edit = book.clone();
                        let for_delete = book.clone();
                        view! {
                            <Modal title=title on_close=close>
                                <BookInfo
                                    book=book
                                    link_to_detail=true
                                    on_edit=Callback::new(move |_| modal.set(Some(LibraryModal::Edit(for_edit.clone()))))
                                    on_delete=Callback::new(move |_| pending_delete.set(Some(for_delete.clone())))
                                />
                            </Modal>
                        }.into_any()
                    }
                }
            })}

            {move || pending_delete.get().map(|book| view! {
                <ConfirmDialog
                    message=format!("Bạn có chắc chắn muốn xóa sách \"{}\"?", book.title)
                    on_confirm=Callback::new(confirm_delete.clone())
                    on_cancel=Callback::new(move |_| pending_delete.set(None))
                    busy=deleting
                />
            })}
        </div>
    }
}

#[component]
fn BookSpine(
    book: Book,
    orientation: Orientation,
    modal: RwSignal<Option<LibraryModal>>,
) -> impl IntoView {
    let class = match orientation {
        Orientation::Vertical => "book book-vertical",
        Orientation::Horizontal => "book book-horizontal",
    };
    let style = spine_style(&book, orientation);
    let title = book.title.clone();
    let label = title.clone();
    let id = book.id.clone();
    view! {
        <div
            class=class
            style=style
            data-book-id=id
            title=title
            on:click=move |e: ev::MouseEvent| {
                // keep the compartment from opening the add form
                e.stop_propagation();
                modal.set(Some(LibraryModal::View(book.clone())));
            }
        >
            {label}
        </div>
    }
}
