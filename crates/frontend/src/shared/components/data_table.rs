//! Generic document table with per-row edit/delete actions.

use crate::shared::format::format_cell;
use crate::shared::icons::icon;
use contracts::domain::a001_collection::{document_id, Document, ID_FIELD};
use leptos::prelude::*;

/// One column: document field and its header text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSpec {
    pub field: String,
    pub label: String,
}

impl HeaderSpec {
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
        }
    }
}

/// Headers that get a column; the identifier never does.
pub fn visible_headers(headers: &[HeaderSpec]) -> Vec<HeaderSpec> {
    headers
        .iter()
        .filter(|h| h.field != ID_FIELD)
        .cloned()
        .collect()
}

pub fn row_class(index: usize) -> &'static str {
    if index % 2 == 0 {
        "table__row table__row--even"
    } else {
        "table__row table__row--odd"
    }
}

/// Formatted cell texts of one row, in header order.
pub fn row_cells(doc: &Document, headers: &[HeaderSpec]) -> Vec<String> {
    headers
        .iter()
        .map(|h| doc.get(&h.field).map(format_cell).unwrap_or_default())
        .collect()
}

#[component]
pub fn DataTable(
    /// Column definitions (an `id` entry is ignored)
    #[prop(into)]
    headers: Signal<Vec<HeaderSpec>>,
    #[prop(into)] rows: Signal<Vec<Document>>,
    /// Ordinal of the first row minus one (page offset)
    #[prop(into)]
    offset: Signal<usize>,
    on_edit: Callback<String>,
    on_delete: Callback<String>,
    #[prop(optional, into)] empty_text: MaybeProp<String>,
) -> impl IntoView {
    let columns = Memo::new(move |_| visible_headers(&headers.get()));

    view! {
        <table class="table data-table">
            <thead>
                <tr>
                    <th class="table__header table__header--ordinal">"STT"</th>
                    {move || columns.get().into_iter().map(|h| view! {
                        <th class="table__header" data-field=h.field.clone()>{h.label}</th>
                    }).collect_view()}
                    <th class="table__header table__header--actions">"Hành động"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    let docs = rows.get();
                    let cols = columns.get();
                    if docs.is_empty() {
                        let text = empty_text.get().unwrap_or_else(|| "Không có dữ liệu.".to_string());
                        return view! {
                            <tr class="table__row table__row--empty">
                                <td class="table__cell" colspan=(cols.len() + 2).to_string()>{text}</td>
                            </tr>
                        }.into_any();
                    }
                    let start = offset.get();
                    docs.iter().enumerate().map(|(i, doc)| {
                        let id = document_id(doc).unwrap_or_default();
                        let edit_id = id.clone();
                        let delete_id = id.clone();
                        view! {
                            <tr class=row_class(i) data-id=id>
                                <td class="table__cell table__cell--ordinal">{(start + i + 1).to_string()}</td>
                                {row_cells(doc, &cols).into_iter().map(|text| view! {
                                    <td class="table__cell">{text}</td>
                                }).collect_view()}
                                <td class="table__cell table__cell--actions">
                                    <button class="button button--icon" title="Sửa"
                                        on:click=move |_| on_edit.run(edit_id.clone())>
                                        {icon("edit")}
                                    </button>
                                    <button class="button button--icon button--danger" title="Xóa"
                                        on:click=move |_| on_delete.run(delete_id.clone())>
                                        {icon("trash")}
                                    </button>
                                </td>
                            </tr>
                        }
                    }).collect_view().into_any()
                }}
            </tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<HeaderSpec> {
        vec![
            HeaderSpec::new("id", "ID"),
            HeaderSpec::new("name", "Tên"),
            HeaderSpec::new("amount", "Số tiền"),
            HeaderSpec::new("date", "Ngày"),
        ]
    }

    #[test]
    fn id_column_is_hidden() {
        let visible = visible_headers(&headers());
        let fields: Vec<_> = visible.iter().map(|h| h.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "amount", "date"]);
    }

    #[test]
    fn rows_alternate_and_cells_are_formatted() {
        assert_ne!(row_class(0), row_class(1));
        assert_eq!(row_class(0), row_class(2));

        let doc: Document = serde_json::from_str(
            r#"{"id":"x1","name":"Tiền điện","amount":850000,"date":"2024-06-30"}"#,
        )
        .unwrap();
        let cells = row_cells(&doc, &visible_headers(&headers()));
        assert_eq!(cells, vec!["Tiền điện", "850.000", "30/06/2024"]);
    }

    #[test]
    fn missing_fields_render_empty() {
        let doc: Document = serde_json::from_str(r#"{"id":"x2"}"#).unwrap();
        let cells = row_cells(&doc, &visible_headers(&headers()));
        assert_eq!(cells, vec!["", "", ""]);
    }
}
