//! Browser side of the router: template fetching, History API and the
//! app-lifetime link/popstate listeners.

use super::navigator::{NavOutcome, NavTrigger, Navigator, RenderedPage};
use crate::shared::alert::{AlertService, AlertSink, Severity};
use crate::shared::error::{commit, AppError};
use crate::shared::once::AttachOnce;
use gloo_net::http::Request;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;

static LISTENERS: AttachOnce = AttachOnce::new();

#[derive(Clone, Copy)]
pub struct RouterContext {
    navigator: StoredValue<Navigator>,
    page: RwSignal<Option<RenderedPage>>,
    alerts: AlertService,
}

impl RouterContext {
    pub fn new(alerts: AlertService) -> Self {
        Self {
            navigator: StoredValue::new(Navigator::new()),
            page: RwSignal::new(None),
            alerts,
        }
    }

    pub fn page(&self) -> Signal<Option<RenderedPage>> {
        self.page.into()
    }

    /// Normalized path of the page on screen.
    pub fn current_path(&self) -> Memo<String> {
        let page = self.page;
        Memo::new(move |_| page.with(|p| p.as_ref().map(|p| p.path.clone()).unwrap_or_default()))
    }

    /// Attaches the global listeners and shows the page for the current URL.
    /// Runs once; later calls are ignored.
    pub fn start(&self) {
        let this = *self;
        LISTENERS.attach(move || {
            attach_listeners(this);
            log::info!("router started");
            this.navigate(&location_path(), NavTrigger::InitialLoad);
        });
    }

    pub fn go(&self, path: &str) {
        self.navigate(path, NavTrigger::Link);
    }

    pub fn navigate(&self, raw_path: &str, trigger: NavTrigger) {
        let Some(pending) = self.navigator.try_update_value(|n| n.begin(raw_path, trigger)) else {
            return;
        };
        log::info!(
            "navigation #{} to {} ({:?})",
            pending.nav_id,
            pending.path,
            trigger
        );

        let this = *self;
        spawn_local(async move {
            let template = fetch_template(pending.template()).await;
            let Some(outcome) = this.navigator.try_update_value(|n| n.complete(pending, template))
            else {
                return;
            };
            if let Some(page) = settle_navigation(outcome, &this.alerts) {
                commit(this.page, Some(page), "route outlet");
            }
        });
    }
}

/// Page to show for a finished navigation. A failed template is reported to
/// `alerts` once and leaves the current page in place.
pub fn settle_navigation<S: AlertSink>(outcome: NavOutcome, alerts: &S) -> Option<RenderedPage> {
    match outcome {
        NavOutcome::Render(page) => Some(page),
        NavOutcome::Failed(err) => {
            log::error!("{}", err);
            alerts.show(Severity::Error, &err.to_string());
            None
        }
        NavOutcome::Superseded => None,
    }
}

/// Fetches a static HTML fragment from the app origin.
pub async fn fetch_template(location: &'static str) -> Result<String, AppError> {
    let template_err = |reason: String| AppError::Template {
        location: location.to_string(),
        reason,
    };
    let response = Request::get(location)
        .send()
        .await
        .map_err(|e| template_err(e.to_string()))?;
    if !response.ok() {
        return Err(template_err(format!("HTTP {}", response.status())));
    }
    response.text().await.map_err(|e| template_err(e.to_string()))
}

fn location_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn location_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Records `path` in browser history after its page has been shown.
pub fn push_history(path: &str) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(path)) {
        log::warn!("pushState({}) failed: {:?}", path, err);
    }
}

/// App path for an anchor `href`, or `None` when the browser should handle
/// the click itself.
pub fn internal_href(href: &str, origin: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let rest = if let Some(rest) = href.strip_prefix(origin).filter(|_| !origin.is_empty()) {
        if rest.is_empty() {
            "/"
        } else {
            rest
        }
    } else {
        href
    };
    if !rest.starts_with('/') || rest.starts_with("//") {
        return None;
    }
    // fragments and static files stay with the browser
    let path = rest.split(['?', '#']).next().unwrap_or(rest);
    let last = path.rsplit('/').next().unwrap_or("");
    if last.contains('.') {
        return None;
    }
    Some(rest.to_string())
}

fn attach_listeners(router: RouterContext) {
    let origin = location_origin();

    // delegated: covers the menu and links inside page templates
    let _ = window_event_listener(ev::click, move |event: web_sys::MouseEvent| {
        if event.default_prevented()
            || event.button() != 0
            || event.ctrl_key()
            || event.meta_key()
            || event.shift_key()
            || event.alt_key()
        {
            return;
        }
        let Some(anchor) = event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest("a[href]").ok().flatten())
        else {
            return;
        };
        if anchor.has_attribute("download")
            || anchor
                .get_attribute("target")
                .is_some_and(|t| !t.is_empty() && t != "_self")
        {
            return;
        }
        let Some(path) = anchor
            .get_attribute("href")
            .and_then(|href| internal_href(&href, &origin))
        else {
            return;
        };
        event.prevent_default();
        router.go(&path);
    });

    let _ = window_event_listener(ev::popstate, move |_| {
        router.navigate(&location_path(), NavTrigger::HistoryPop);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::alert::RecordingSink;

    const ORIGIN: &str = "http://localhost:5000";

    fn template_error() -> Result<String, AppError> {
        Err(AppError::Template {
            location: "/pages/management.html".into(),
            reason: "HTTP 404".into(),
        })
    }

    #[test]
    fn failed_template_alerts_exactly_once() {
        let sink = RecordingSink::default();
        let mut navigator = Navigator::new();

        let home = navigator.begin("/", NavTrigger::InitialLoad);
        let shown = settle_navigation(navigator.complete(home, Ok("<h1>home</h1>".into())), &sink);
        assert_eq!(shown.map(|p| p.path), Some("/".to_string()));

        let first = navigator.begin("/management", NavTrigger::Link);
        let second = navigator.begin("/management", NavTrigger::Link);
        // the superseded attempt fails silently
        assert!(settle_navigation(navigator.complete(first, template_error()), &sink).is_none());
        assert!(sink.0.borrow().is_empty());

        assert!(settle_navigation(navigator.complete(second, template_error()), &sink).is_none());
        let alerts = sink.0.borrow();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].0, Severity::Error);
        assert!(alerts[0].1.contains("/pages/management.html"));
    }

    #[test]
    fn internal_links_are_routed() {
        assert_eq!(internal_href("/management", ORIGIN).as_deref(), Some("/management"));
        assert_eq!(
            internal_href("http://localhost:5000/book/7", ORIGIN).as_deref(),
            Some("/book/7")
        );
        assert_eq!(internal_href("http://localhost:5000", ORIGIN).as_deref(), Some("/"));
    }

    #[test]
    fn browser_keeps_foreign_and_static_links() {
        assert_eq!(internal_href("https://example.com/x", ORIGIN), None);
        assert_eq!(internal_href("//cdn.example.com/a", ORIGIN), None);
        assert_eq!(internal_href("#top", ORIGIN), None);
        assert_eq!(internal_href("mailto:a@b.c", ORIGIN), None);
        assert_eq!(internal_href("/static/report.pdf", ORIGIN), None);
        assert_eq!(internal_href("", ORIGIN), None);
    }
}
