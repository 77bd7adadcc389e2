//! Shelf layout: rows of units, units of compartments, books placed by
//! their zero-based location.

use contracts::domain::a003_book::{Book, Orientation, ShelfLocation, ShelfRow};

#[derive(Debug, Clone, PartialEq)]
pub struct Compartment {
    pub location: ShelfLocation,
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub orientation: Orientation,
    pub compartments: Vec<Compartment>,
}

/// Places `books` into the layout. Books whose location does not exist in
/// the layout are returned separately.
pub fn shelf_grid(rows: &[ShelfRow], books: &[&Book]) -> (Vec<Vec<Unit>>, Vec<Book>) {
    let grid: Vec<Vec<Unit>> = rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            row.units
                .iter()
                .enumerate()
                .map(|(u, unit)| Unit {
                    orientation: unit.orientation,
                    compartments: (0..unit.compartments)
                        .map(|c| {
                            let location = ShelfLocation {
                                row: r as u32,
                                unit: u as u32,
                                compartment: c,
                            };
                            Compartment {
                                location,
                                books: books
                                    .iter()
                                    .filter(|b| b.location == location)
                                    .map(|b| (*b).clone())
                                    .collect(),
                            }
                        })
                        .collect(),
                })
                .collect()
        })
        .collect();

    let unplaced = books
        .iter()
        .filter(|b| !fits(rows, &b.location))
        .map(|b| (*b).clone())
        .collect();
    (grid, unplaced)
}

fn fits(rows: &[ShelfRow], loc: &ShelfLocation) -> bool {
    rows.get(loc.row as usize)
        .and_then(|row| row.units.get(loc.unit as usize))
        .is_some_and(|unit| loc.compartment < unit.compartments)
}

/// Stable 32-bit string hash (`h * 31 + c`, wrapping).
fn title_hash(title: &str) -> i32 {
    title
        .encode_utf16()
        .fold(0i32, |h, c| h.wrapping_mul(31).wrapping_add(c as i32))
}

/// Spine colour derived from the title, so a book keeps its colour.
pub fn spine_hue(title: &str) -> u32 {
    title_hash(title).rem_euclid(360) as u32
}

/// Spine length in px; vertical units hold taller books.
pub fn spine_height(title: &str, orientation: Orientation) -> u32 {
    let spread = (title_hash(title) as u32 >> 8) % 40;
    match orientation {
        Orientation::Vertical => 100 + spread,
        Orientation::Horizontal => 70 + spread * 3 / 4,
    }
}

pub fn spine_style(book: &Book, orientation: Orientation) -> String {
    format!(
        "height: {}px; background-color: hsl({}, 50%, 60%)",
        spine_height(&book.title, orientation),
        spine_hue(&book.title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<ShelfRow> {
        serde_json::from_str(
            r#"[{"units":[{"type":"vertical","compartments":2},{"type":"horizontal","compartments":1}]},
                {"units":[{"compartments":3}]}]"#,
        )
        .unwrap()
    }

    fn book(id: &str, row: u32, unit: u32, comp: u32) -> Book {
        serde_json::from_value(serde_json::json!({
            "id": id, "title": format!("Sách {}", id),
            "rowIndex": row, "unitIndex": unit, "compIndex": comp
        }))
        .unwrap()
    }

    #[test]
    fn books_land_in_their_compartment() {
        let books = vec![book("a", 0, 0, 1), book("b", 1, 0, 2), book("c", 0, 0, 1)];
        let refs: Vec<&Book> = books.iter().collect();
        let (grid, unplaced) = shelf_grid(&layout(), &refs);

        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0].len(), 2);
        assert_eq!(grid[0][0].compartments.len(), 2);
        assert_eq!(grid[0][1].orientation, Orientation::Horizontal);

        let ids: Vec<_> = grid[0][0].compartments[1].books.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(grid[1][0].compartments[2].books[0].id, "b");
        assert_eq!(
            grid[1][0].compartments[2].location.label(),
            "Hàng 2, Kệ 1, Ngăn 3"
        );
        assert!(unplaced.is_empty());
    }

    #[test]
    fn out_of_layout_books_are_reported() {
        let books = vec![book("x", 5, 0, 0), book("y", 0, 1, 1)];
        let refs: Vec<&Book> = books.iter().collect();
        let (_, unplaced) = shelf_grid(&layout(), &refs);
        let ids: Vec<_> = unplaced.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }

    #[test]
    fn spine_is_stable_per_title() {
        assert_eq!(spine_hue("Số đỏ"), spine_hue("Số đỏ"));
        assert!(spine_hue("Số đỏ") < 360);
        let h = spine_height("Truyện Kiều", Orientation::Vertical);
        assert!((100..140).contains(&h));
        let h = spine_height("Truyện Kiều", Orientation::Horizontal);
        assert!((70..100).contains(&h));
    }
}
