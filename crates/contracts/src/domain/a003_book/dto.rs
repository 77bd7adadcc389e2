use crate::shared::de::{string_or_number, u32_or_string};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// One physical shelf unit within a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfUnit {
    #[serde(rename = "type", default)]
    pub orientation: Orientation,
    #[serde(default = "one", deserialize_with = "u32_or_string")]
    pub compartments: u32,
}

fn one() -> u32 {
    1
}

/// Entry of `GET /api/shelves`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfRow {
    #[serde(default)]
    pub units: Vec<ShelfUnit>,
}

/// Zero-based position of a compartment in the shelf layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ShelfLocation {
    #[serde(rename = "rowIndex", default, deserialize_with = "u32_or_string")]
    pub row: u32,
    #[serde(rename = "unitIndex", default, deserialize_with = "u32_or_string")]
    pub unit: u32,
    #[serde(rename = "compIndex", default, deserialize_with = "u32_or_string")]
    pub compartment: u32,
}

impl ShelfLocation {
    /// Human label, one-based: "Hàng 1, Kệ 2, Ngăn 3".
    pub fn label(&self) -> String {
        format!(
            "Hàng {}, Kệ {}, Ngăn {}",
            self.row + 1,
            self.unit + 1,
            self.compartment + 1
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "coverImage", default)]
    pub cover_image: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default, deserialize_with = "u32_or_string")]
    pub rating: u32,
    #[serde(flatten)]
    pub location: ShelfLocation,
}

/// Body of `POST /api/books` and `PUT /api/books/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub description: String,
    #[serde(rename = "coverImage")]
    pub cover_image: String,
    pub genre: String,
    pub rating: u32,
    #[serde(flatten)]
    pub location: ShelfLocation,
}

impl From<&Book> for BookPayload {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            cover_image: book.cover_image.clone(),
            genre: book.genre.clone(),
            rating: book.rating,
            location: book.location,
        }
    }
}

/// Entry of `GET /api/genres/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_location_is_flattened() {
        let book: Book = serde_json::from_str(
            r#"{"id":"b1","title":"Dế Mèn","author":"Tô Hoài","rating":"4",
                "rowIndex":1,"unitIndex":0,"compIndex":"2"}"#,
        )
        .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(book.location.row, 1);
        assert_eq!(book.location.compartment, 2);
        assert_eq!(book.rating, 4);
        assert_eq!(book.location.label(), "Hàng 2, Kệ 1, Ngăn 3");
    }

    #[test]
    fn shelf_unit_defaults() {
        let rows: Vec<ShelfRow> =
            serde_json::from_str(r#"[{"units":[{"type":"horizontal","compartments":3},{}]}]"#)
                .unwrap();
        assert_eq!(rows[0].units[0].orientation, Orientation::Horizontal);
        assert_eq!(rows[0].units[1].orientation, Orientation::Vertical);
        assert_eq!(rows[0].units[1].compartments, 1);
    }
}
