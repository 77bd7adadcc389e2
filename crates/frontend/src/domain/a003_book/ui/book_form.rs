use crate::domain::a003_book::api::{create_book, fetch_genres, generate_description, update_book};
use crate::domain::a003_book::model::BookDraft;
use crate::shared::alert::AlertService;
use crate::shared::api::ApiClient;
use crate::shared::components::star_rating::StarRating;
use crate::shared::components::ui::{Input, Select, Textarea};
use crate::shared::error::commit;
use crate::shared::icons::icon;
use contracts::domain::a003_book::{Book, ShelfLocation};
use leptos::prelude::*;
use thaw::*;
use wasm_bindgen_futures::spawn_local;

#[derive(Debug, Clone, PartialEq)]
pub enum BookFormMode {
    /// New book in an empty or partly filled compartment.
    Add(ShelfLocation),
    /// Existing book; its location is kept.
    Edit(Book),
}

impl BookFormMode {
    fn location(&self) -> ShelfLocation {
        match self {
            BookFormMode::Add(location) => *location,
            BookFormMode::Edit(book) => book.location,
        }
    }
}

/// Add/edit form with genre list, star rating and the description generator.
///
/// `on_saved` receives the stored book when the server returned one.
#[component]
pub fn BookForm(
    mode: BookFormMode,
    on_saved: Callback<Option<Book>>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let alerts = expect_context::<AlertService>();

    let draft = match &mode {
        BookFormMode::Add(_) => BookDraft::default(),
        BookFormMode::Edit(book) => BookDraft::from_book(book),
    };
    let title = RwSignal::new(draft.title);
    let author = RwSignal::new(draft.author);
    let description = RwSignal::new(draft.description);
    let cover = RwSignal::new(draft.cover_image);
    let genre = RwSignal::new(draft.genre);
    let rating = RwSignal::new(draft.rating);
    let genres = RwSignal::new(Vec::<(String, String)>::new());
    let describing = RwSignal::new(false);
    let saving = RwSignal::new(false);

    {
        let api = api.clone();
        spawn_local(async move {
            match fetch_genres(&api.silent()).await {
                Ok(list) => {
                    let options = list.into_iter().map(|g| (g.name.clone(), g.name)).collect();
                    commit(genres, options, "genre select");
                }
                Err(err) => log::warn!("genres unavailable: {}", err),
            }
        });
    }

    let current_draft = move || BookDraft {
        title: title.get_untracked(),
        author: author.get_untracked(),
        description: description.get_untracked(),
        cover_image: cover.get_untracked(),
        genre: genre.get_untracked(),
        rating: rating.get_untracked(),
    };

    let describe = {
        let api = api.clone();
        move |_| {
            let draft = current_draft();
            if !draft.can_describe() {
                alerts.error("Vui lòng nhập tên sách và tác giả trước.");
                return;
            }
            describing.set(true);
            let api = api.clone();
            spawn_local(async move {
                let result = generate_description(&api, &draft.title, &draft.author).await;
                if !commit(describing, false, "book description") {
                    return;
                }
                match result {
                    Ok(text) if !text.trim().is_empty() => {
                        description.set(text);
                    }
                    Ok(_) => log::warn!("empty description reply"),
                    Err(err) => {
                        log::error!("description generator failed: {:?}", err);
                        alerts.error("Không thể tạo mô tả tự động.");
                    }
                }
            });
        }
    };

    let location = mode.location();
    let location_text = location.label();
    let save = move |_| {
        let payload = match current_draft().to_payload(location) {
            Ok(payload) => payload,
            Err(err) => {
                alerts.error(err.to_string());
                return;
            }
        };
        saving.set(true);
        let api = api.clone();
        let mode = mode.clone();
        spawn_local(async move {
            let result = match &mode {
                BookFormMode::Add(_) => create_book(&api, &payload).await,
                BookFormMode::Edit(book) => update_book(&api, &book.id, &payload).await,
            };
            if !commit(saving, false, "book form") {
                return;
            }
            if let Ok(stored) = result {
                alerts.success(match mode {
                    BookFormMode::Add(_) => "Đã thêm sách mới!",
                    BookFormMode::Edit(_) => "Cập nhật sách thành công!",
                });
                on_saved.run(stored);
            }
        });
    };

    view! {
        <form class="form book-form" on:submit=|ev| ev.prevent_default()>
            <p class="book-form__location" id="form-location-text">{location_text}</p>
            <Input label="Tên sách" name="title" value=title required=true disabled=saving />
            <Input label="Tác giả" name="author" value=author disabled=saving />
            <Select
                label="Thể loại"
                name="genre"
                value=genre
                options=genres
                placeholder="-- Chọn thể loại --"
                disabled=saving
            />
            <div class="form__group">
                <span class="form__label">"Đánh giá"</span>
                <StarRating value=rating />
            </div>
            <Input label="Ảnh bìa (URL)" name="coverImage" value=cover disabled=saving />
            <div class="book-form__description">
                <Textarea label="Mô tả" name="description" value=description rows=5 disabled=saving />
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || describing.get() || saving.get())
                    on_click=describe
                >
                    {icon("sparkles")}
                    {move || if describing.get() { " Đang tạo..." } else { " Tạo mô tả bằng AI" }}
                </Button>
            </div>
            <div class="modal-footer">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Hủy"
                </Button>
                <Button appearance=ButtonAppearance::Primary disabled=saving on_click=save>
                    {move || if saving.get() { "Đang lưu..." } else { "Lưu" }}
                </Button>
            </div>
        </form>
    }
}
