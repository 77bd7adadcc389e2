use crate::shared::format::clock_line;
use chrono::{Datelike, Local};
use gloo_timers::callback::Interval;
use leptos::prelude::*;

fn now_line() -> String {
    clock_line(Local::now().naive_local())
}

#[component]
pub fn Footer() -> impl IntoView {
    let year = Local::now().year();
    let clock = RwSignal::new(now_line());

    let ticker = StoredValue::new_local(Some(Interval::new(1_000, move || {
        _ = clock.try_set(now_line());
    })));
    on_cleanup(move || {
        // dropping the Interval cancels it
        _ = ticker.try_update_value(|t| t.take());
    });

    view! {
        <footer class="app-footer">
            <div class="app-footer__ticker">
                <span id="time-ticker-content">{move || clock.get()}</span>
            </div>
            <p class="app-footer__copy">
                "© " <span id="footer-year">{year}</span> " Quản lý tài chính gia đình"
            </p>
        </footer>
    }
}
