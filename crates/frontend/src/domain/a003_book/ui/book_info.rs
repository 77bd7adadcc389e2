use crate::shared::components::star_rating::StarDisplay;
use crate::shared::icons::icon;
use contracts::domain::a003_book::Book;
use leptos::prelude::*;
use thaw::*;

/// Read-only book card with edit and delete actions.
#[component]
pub fn BookInfo(
    book: Book,
    on_edit: Callback<()>,
    on_delete: Callback<()>,
    /// Adds a link to `/book/:id`
    #[prop(optional)]
    link_to_detail: bool,
) -> impl IntoView {
    let cover = (!book.cover_image.is_empty()).then(|| book.cover_image.clone());
    let detail_href = format!("/book/{}", urlencoding::encode(&book.id));

    view! {
        <div class="book-info" data-book-id=book.id.clone()>
            {cover.map(|src| view! { <img class="book-info__cover" src=src alt=book.title.clone() /> })}
            <div class="book-info__body">
                <h3 class="book-info__title">{book.title.clone()}</h3>
                <p class="book-info__author">{format!("Tác giả: {}", book.author)}</p>
                {(!book.genre.is_empty()).then(|| view! {
                    <p class="book-info__genre">{format!("Thể loại: {}", book.genre)}</p>
                })}
                <StarDisplay rating=book.rating />
                <p class="book-info__location">{book.location.label()}</p>
                <p class="book-info__description">{book.description.clone()}</p>
                {link_to_detail.then(|| view! {
                    <a class="book-info__link" href=detail_href>"Xem chi tiết"</a>
                })}
            </div>
            <div class="modal-footer">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_edit.run(())>
                    {icon("edit")} " Sửa"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| on_delete.run(())>
                    {icon("trash")} " Xóa"
                </Button>
            </div>
        </div>
    }
}
