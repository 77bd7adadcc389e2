mod book_form;
mod book_info;
mod detail;
mod library;

pub use book_form::{BookForm, BookFormMode};
pub use book_info::BookInfo;
pub use detail::BookDetailPage;
pub use library::LibraryPage;
