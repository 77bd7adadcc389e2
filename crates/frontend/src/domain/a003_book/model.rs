//! Book form drafts and search.

use crate::shared::error::AppError;
use crate::shared::list_utils::Searchable;
use contracts::domain::a003_book::{Book, BookPayload, ShelfLocation};

impl Searchable for Book {
    fn haystack(&self) -> String {
        format!("{} {} {}", self.title, self.author, self.genre)
    }
}

pub fn description_prompt(title: &str, author: &str) -> String {
    format!(
        "Bạn là chuyên gia phân tích văn học. Bạn tóm tắt giúp tôi tác phẩm {} của tác giả {} trong 100 từ",
        title.trim(),
        author.trim()
    )
}

/// Input texts of the add/edit book form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub description: String,
    pub cover_image: String,
    pub genre: String,
    pub rating: u32,
}

impl BookDraft {
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            cover_image: book.cover_image.clone(),
            genre: book.genre.clone(),
            rating: book.rating,
        }
    }

    /// Both title and author are needed to ask for a description.
    pub fn can_describe(&self) -> bool {
        !self.title.trim().is_empty() && !self.author.trim().is_empty()
    }

    pub fn to_payload(&self, location: ShelfLocation) -> Result<BookPayload, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Vui lòng nhập tên sách.".to_string()));
        }
        Ok(BookPayload {
            title: title.to_string(),
            author: self.author.trim().to_string(),
            description: self.description.trim().to_string(),
            cover_image: self.cover_image.trim().to_string(),
            genre: self.genre.clone(),
            rating: self.rating.min(crate::shared::components::star_rating::MAX_STARS),
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_utils::filter_list;

    fn book(id: &str, title: &str, author: &str, genre: &str) -> Book {
        serde_json::from_value(serde_json::json!({
            "id": id, "title": title, "author": author, "genre": genre
        }))
        .unwrap()
    }

    #[test]
    fn search_matches_title_author_and_genre() {
        let books = vec![
            book("1", "Dế Mèn phiêu lưu ký", "Tô Hoài", "Thiếu nhi"),
            book("2", "Số đỏ", "Vũ Trọng Phụng", "Trào phúng"),
            book("3", "Vợ chồng A Phủ", "Tô Hoài", "Truyện ngắn"),
        ];
        let ids = |q: &str| filter_list(&books, q).iter().map(|b| b.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids("tô hoài"), vec!["1", "3"]);
        assert_eq!(ids("TÔ HOÀI phủ"), vec!["3"]);
        assert_eq!(ids("trào"), vec!["2"]);
        assert_eq!(ids("  "), vec!["1", "2", "3"]);
        assert!(ids("kafka").is_empty());
    }

    #[test]
    fn payload_keeps_location_and_clamps_rating() {
        let draft = BookDraft {
            title: "  Số đỏ ".into(),
            author: "Vũ Trọng Phụng".into(),
            rating: 8,
            ..BookDraft::default()
        };
        let location = ShelfLocation { row: 1, unit: 2, compartment: 0 };
        let payload = draft.to_payload(location).unwrap();
        assert_eq!(payload.title, "Số đỏ");
        assert_eq!(payload.rating, 5);
        assert_eq!(payload.location, location);

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["unitIndex"], 2);
        assert_eq!(value["coverImage"], "");
    }

    #[test]
    fn blank_title_is_rejected() {
        let draft = BookDraft {
            author: "Nam Cao".into(),
            ..BookDraft::default()
        };
        assert!(matches!(
            draft.to_payload(ShelfLocation::default()),
            Err(AppError::Validation(_))
        ));
        assert!(!draft.can_describe());
    }

    #[test]
    fn prompt_names_title_and_author() {
        let prompt = description_prompt(" Chí Phèo ", "Nam Cao");
        assert!(prompt.contains("tác phẩm Chí Phèo của tác giả Nam Cao"));
    }
}
