//! Client-side filtering of cached lists.

use crate::shared::icons::icon;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const DEBOUNCE_MS: u32 = 250;

/// Types that can be matched against a search box.
pub trait Searchable {
    /// Lower-cased text the query is matched against.
    fn haystack(&self) -> String;
}

/// Items whose haystack contains every whitespace-separated query term,
/// ignoring case. A blank query keeps everything.
pub fn filter_list<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let terms: Vec<String> = query
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect();
    if terms.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| {
            let hay = item.haystack().to_lowercase();
            terms.iter().all(|t| hay.contains(t.as_str()))
        })
        .collect()
}

/// Search box that reports its text after the user stops typing.
#[component]
pub fn SearchInput(
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: MaybeProp<String>,
) -> impl IntoView {
    let text = RwSignal::new(String::new());
    let pending = StoredValue::new_local(None::<Timeout>);

    let schedule = move |value: String| {
        text.set(value.clone());
        let timeout = Timeout::new(DEBOUNCE_MS, move || on_change.run(value));
        // dropping the previous Timeout cancels it
        pending.set_value(Some(timeout));
    };

    let clear = move |_| {
        pending.set_value(None);
        text.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="search"
                class="form__input search-input__field"
                placeholder=move || placeholder.get().unwrap_or_else(|| "Tìm kiếm...".to_string())
                prop:value=move || text.get()
                on:input=move |ev| schedule(event_target_value(&ev))
            />
            <Show when=move || !text.get().is_empty()>
                <button class="button button--icon search-input__clear" title="Xóa" on:click=clear>
                    {icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Title(&'static str, &'static str);

    impl Searchable for Title {
        fn haystack(&self) -> String {
            format!("{} {}", self.0, self.1)
        }
    }

    fn books() -> Vec<Title> {
        vec![
            Title("Dế Mèn phiêu lưu ký", "Tô Hoài"),
            Title("Số đỏ", "Vũ Trọng Phụng"),
            Title("Tắt đèn", "Ngô Tất Tố"),
        ]
    }

    #[test]
    fn blank_query_keeps_all() {
        let list = books();
        assert_eq!(filter_list(&list, "  ").len(), 3);
    }

    #[test]
    fn matches_title_or_author_ignoring_case() {
        let list = books();
        let hits = filter_list(&list, "TÔ hoài");
        let titles: Vec<_> = hits.iter().map(|b| b.0).collect();
        assert_eq!(titles, vec!["Dế Mèn phiêu lưu ký"]);

        let hits = filter_list(&list, "SỐ vũ");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, "Số đỏ");
    }

    #[test]
    fn tone_marks_distinguish_letters() {
        let list = books();
        let titles = |q: &str| -> Vec<&'static str> { filter_list(&list, q).iter().map(|b| b.0).collect() };
        assert_eq!(titles("tô"), vec!["Dế Mèn phiêu lưu ký"]);
        assert_eq!(titles("tố"), vec!["Tắt đèn"]);
        assert!(titles("to").is_empty());
    }
}
