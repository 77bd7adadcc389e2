use crate::routes::context::fetch_template;
use crate::routes::RouterContext;
use crate::shared::error::commit;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

const MENU_LOCATION: &str = "/components/menu.html";

/// Links shown when the menu markup cannot be fetched.
const FALLBACK_LINKS: &[(&str, &str)] = &[
    ("/", "Trang chủ"),
    ("/management", "Quản lý thu chi"),
    ("/collections", "Danh mục"),
    ("/saving", "Tiết kiệm"),
    ("/loan-payment", "Trả nợ vay"),
    ("/bookstore", "Tủ sách"),
    ("/about", "Giới thiệu"),
];

/// Whether a menu link should be highlighted for `current`.
pub fn is_active_link(href: &str, current: &str) -> bool {
    if href == "/" {
        return current == "/";
    }
    current == href || current.starts_with(&format!("{}/", href.trim_end_matches('/')))
}

/// Global navigation. The router starts once the markup is in place so the
/// delegated link listener sees real anchors.
#[component]
pub fn Menu() -> impl IntoView {
    let router = use_context::<RouterContext>();
    let markup = RwSignal::new(None::<String>);
    let loaded = RwSignal::new(false);
    let container = NodeRef::<leptos::html::Nav>::new();

    spawn_local(async move {
        match fetch_template(MENU_LOCATION).await {
            Ok(html) => {
                commit(markup, Some(html), "menu");
            }
            Err(err) => log::error!("{}; using built-in links", err),
        }
        if commit(loaded, true, "menu") {
            if let Some(router) = router {
                router.start();
            }
        }
    });

    // highlight the link of the current page
    if let Some(router) = router {
        let current = router.current_path();
        Effect::new(move |_| {
            let path = current.get();
            markup.track();
            let Some(nav) = container.get() else {
                return;
            };
            let Ok(links) = nav.query_selector_all("a[href]") else {
                return;
            };
            for i in 0..links.length() {
                let Some(link) = links.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok())
                else {
                    continue;
                };
                let href = link.get_attribute("href").unwrap_or_default();
                let classes = link.class_list();
                let _ = if is_active_link(&href, &path) {
                    classes.add_1("active")
                } else {
                    classes.remove_1("active")
                };
            }
        });
    }

    view! {
        <nav id="menu-container" class="app-menu" node_ref=container>
            {move || match markup.get() {
                Some(html) => view! { <div class="app-menu__markup" inner_html=html></div> }.into_any(),
                None if loaded.get() => view! {
                    <ul class="app-menu__links">
                        {FALLBACK_LINKS
                            .iter()
                            .map(|(href, label)| view! { <li><a href=*href>{*label}</a></li> })
                            .collect_view()}
                    </ul>
                }
                .into_any(),
                None => view! { <></> }.into_any(),
            }}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_link_is_active_only_on_root() {
        assert!(is_active_link("/", "/"));
        assert!(!is_active_link("/", "/saving"));
    }

    #[test]
    fn section_links_cover_their_children() {
        assert!(is_active_link("/collections", "/collections"));
        assert!(is_active_link("/collections", "/collections/Chi"));
        assert!(!is_active_link("/book", "/bookstore"));
    }
}
