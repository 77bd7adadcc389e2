//! `/book/:bookId`.

use super::{BookForm, BookFormMode, BookInfo};
use crate::domain::a003_book::api::{delete_book, fetch_book};
use crate::routes::RouterContext;
use crate::shared::alert::AlertService;
use crate::shared::api::ApiClient;
use crate::shared::error::commit;
use crate::shared::modal::{ConfirmDialog, Modal};
use contracts::domain::a003_book::Book;
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, PartialEq)]
enum Detail {
    Loading,
    Found(Book),
    Missing(String),
}

#[component]
pub fn BookDetailPage(book_id: String) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let alerts = expect_context::<AlertService>();
    let router = expect_context::<RouterContext>();

    let detail = RwSignal::new(Detail::Loading);
    let editing = RwSignal::new(false);
    let confirming = RwSignal::new(false);
    let deleting = RwSignal::new(false);

    let load = {
        let api = api.clone();
        let id = book_id.clone();
        move || {
            let api = api.silent();
            let id = id.clone();
            spawn_local(async move {
                let state = match fetch_book(&api, &id).await {
                    Ok(book) => Detail::Found(book),
                    Err(err) => Detail::Missing(err.detail()),
                };
                commit(detail, state, "book detail");
            });
        }
    };
    load();

    let on_saved = Callback::new({
        let load = load.clone();
        move |stored: Option<Book>| {
            editing.set(false);
            match stored {
                Some(book) => detail.set(Detail::Found(book)),
                None => load(),
            }
        }
    });

    let confirm_delete = move |_: ()| {
        deleting.set(true);
        let api = api.clone();
        let id = book_id.clone();
        spawn_local(async move {
            let result = delete_book(&api, &id).await;
            if !commit(deleting, false, "book detail") {
                return;
            }
            if result.is_ok() {
                alerts.success("Đã xóa sách.");
                router.go("/bookstore");
            }
        });
    };

    view! {
        <div class="book-detail-container">
            {move || match detail.get() {
                Detail::Loading => view! { <Spinner /> }.into_any(),
                Detail::Missing(reason) => view! {
                    <div class="book-detail__missing">
                        <p>{format!("Không tìm thấy sách: {}", reason)}</p>
                        <a href="/bookstore">"Quay lại thư viện"</a>
                    </div>
                }.into_any(),
                Detail::Found(book) => {
                    let for_edit = StoredValue::new(book.clone());
                    view! {
                        <BookInfo
                            book=book
                            on_edit=Callback::new(move |_| editing.set(true))
                            on_delete=Callback::new(move |_| confirming.set(true))
                        />
                        <Show when=move || editing.get()>
                            <Modal title="Chỉnh sửa sách".to_string() on_close=Callback::new(move |_| editing.set(false))>
                                <BookForm
                                    mode=BookFormMode::Edit(for_edit.get_value())
                                    on_saved=on_saved
                                    on_cancel=Callback::new(move |_| editing.set(false))
                                />
                            </Modal>
                        </Show>
                    }.into_any()
                }
            }}
            {move || confirming.get().then(|| {
                let title = match detail.get_untracked() {
                    Detail::Found(book) => book.title,
                    _ => String::new(),
                };
                view! {
                    <ConfirmDialog
                        message=format!("Bạn có chắc chắn muốn xóa sách \"{}\"?", title)
                        on_confirm=Callback::new(confirm_delete.clone())
                        on_cancel=Callback::new(move |_| confirming.set(false))
                        busy=deleting
                    />
                }
            })}
        </div>
    }
}
