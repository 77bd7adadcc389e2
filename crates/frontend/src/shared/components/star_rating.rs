use leptos::prelude::*;

pub const MAX_STARS: u32 = 5;

/// `★`/`☆` glyphs for a rating, clamped to the maximum.
pub fn star_glyphs(rating: u32) -> Vec<bool> {
    let filled = rating.min(MAX_STARS);
    (1..=MAX_STARS).map(|i| i <= filled).collect()
}

/// Five clickable stars. Hovering previews a value without changing it.
#[component]
pub fn StarRating(value: RwSignal<u32>) -> impl IntoView {
    let hover = RwSignal::new(None::<u32>);
    let shown = move || hover.get().unwrap_or_else(|| value.get());

    view! {
        <div
            class="star-rating"
            on:mouseleave=move |_| hover.set(None)
        >
            {(1..=MAX_STARS)
                .map(|star| {
                    view! {
                        <span
                            class=move || if star <= shown() { "star star--filled" } else { "star" }
                            data-value=star.to_string()
                            on:mouseenter=move |_| hover.set(Some(star))
                            on:click=move |_| value.set(star)
                        >
                            {move || if star <= shown() { "★" } else { "☆" }}
                        </span>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Static stars for listings.
#[component]
pub fn StarDisplay(rating: u32) -> impl IntoView {
    view! {
        <span class="star-rating star-rating--readonly" title=format!("{}/{}", rating.min(MAX_STARS), MAX_STARS)>
            {star_glyphs(rating)
                .into_iter()
                .map(|filled| if filled { "★" } else { "☆" })
                .collect::<String>()}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_are_clamped() {
        assert_eq!(star_glyphs(3), vec![true, true, true, false, false]);
        assert_eq!(star_glyphs(0), vec![false; 5]);
        assert_eq!(star_glyphs(9), vec![true; 5]);
    }
}
