pub mod footer;
pub mod menu;

use footer::Footer;
use leptos::prelude::*;
use menu::Menu;

/// Page frame: menu on top, routed content, footer.
///
/// ```text
/// +------------------------------+
/// |  Menu (fetched markup)       |
/// +------------------------------+
/// |  content region              |
/// +------------------------------+
/// |  Footer (year, clock)        |
/// +------------------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <Menu />
            <div class="app-main">
                {children()}
            </div>
            <Footer />
        </div>
    }
}
