//! Navigation state machine.
//!
//! `Idle -> Navigating -> Rendered`, or `Navigating -> Error` when the
//! template could not be fetched. Each `begin` supersedes every navigation
//! still in flight; their completions are discarded.

use super::table::{resolve, PageKind, Params, RouteMatch};
use crate::shared::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTrigger {
    /// Click on an internal link.
    Link,
    /// Browser back/forward.
    HistoryPop,
    InitialLoad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    Idle,
    Navigating,
    Rendered,
    Error,
}

/// A navigation waiting for its template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNav {
    pub nav_id: u64,
    pub path: String,
    pub matched: RouteMatch,
    pub trigger: NavTrigger,
}

impl PendingNav {
    pub fn template(&self) -> &'static str {
        self.matched.route.template
    }
}

/// Everything the outlet needs to show a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub nav_id: u64,
    pub path: String,
    pub page: Option<PageKind>,
    pub params: Params,
    pub template_html: String,
    /// Whether a history entry should be pushed once the page is shown.
    pub push_history: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    Render(RenderedPage),
    /// The template failed; the previous page stays.
    Failed(AppError),
    /// A newer navigation started meanwhile.
    Superseded,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    next_id: u64,
    latest: Option<u64>,
    phase: NavPhase,
    current_path: Option<String>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            latest: None,
            phase: NavPhase::Idle,
            current_path: None,
        }
    }

    pub fn phase(&self) -> NavPhase {
        self.phase
    }

    /// Path of the page currently on screen.
    pub fn current_path(&self) -> Option<&str> {
        self.current_path.as_deref()
    }

    pub fn begin(&mut self, raw_path: &str, trigger: NavTrigger) -> PendingNav {
        self.next_id += 1;
        self.latest = Some(self.next_id);
        self.phase = NavPhase::Navigating;

        let matched = resolve(raw_path);
        // a fallback is shown under the default route's own path
        let path = if matched.fallback {
            matched.route.pattern.to_string()
        } else {
            super::table::normalize_path(raw_path)
        };
        PendingNav {
            nav_id: self.next_id,
            path,
            matched,
            trigger,
        }
    }

    pub fn complete(&mut self, nav: PendingNav, template: Result<String, AppError>) -> NavOutcome {
        if self.latest != Some(nav.nav_id) {
            log::debug!("navigation #{} to {} superseded", nav.nav_id, nav.path);
            return NavOutcome::Superseded;
        }

        match template {
            Ok(html) => {
                let push_history = nav.trigger == NavTrigger::Link
                    && self.current_path.as_deref() != Some(nav.path.as_str());
                self.phase = NavPhase::Rendered;
                self.current_path = Some(nav.path.clone());
                NavOutcome::Render(RenderedPage {
                    nav_id: nav.nav_id,
                    path: nav.path,
                    page: nav.matched.route.page,
                    params: nav.matched.params,
                    template_html: html,
                    push_history,
                })
            }
            Err(err) => {
                self.phase = NavPhase::Error;
                let err = match err {
                    AppError::Template { .. } => err,
                    other => AppError::Template {
                        location: nav.template().to_string(),
                        reason: other.detail(),
                    },
                };
                NavOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(s: &str) -> Result<String, AppError> {
        Ok(s.to_string())
    }

    #[test]
    fn link_navigation_renders_and_pushes() {
        let mut nav = Navigator::new();
        assert_eq!(nav.phase(), NavPhase::Idle);

        let pending = nav.begin("/book/42/", NavTrigger::Link);
        assert_eq!(nav.phase(), NavPhase::Navigating);
        assert_eq!(pending.template(), "/pages/book.html");

        match nav.complete(pending, html("<h1>Sách</h1>")) {
            NavOutcome::Render(page) => {
                assert_eq!(page.path, "/book/42");
                assert_eq!(page.page, Some(PageKind::BookDetail));
                assert_eq!(page.params.get("bookId").map(String::as_str), Some("42"));
                assert!(page.push_history);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(nav.phase(), NavPhase::Rendered);
        assert_eq!(nav.current_path(), Some("/book/42"));
    }

    #[test]
    fn pop_and_initial_load_never_push() {
        let mut nav = Navigator::new();
        for trigger in [NavTrigger::InitialLoad, NavTrigger::HistoryPop] {
            let pending = nav.begin("/saving", trigger);
            let NavOutcome::Render(page) = nav.complete(pending, html("")) else {
                panic!("expected render");
            };
            assert!(!page.push_history);
        }
    }

    #[test]
    fn link_to_the_current_page_does_not_duplicate_history() {
        let mut nav = Navigator::new();
        let first = nav.begin("/management", NavTrigger::Link);
        nav.complete(first, html(""));
        let again = nav.begin("/management/", NavTrigger::Link);
        let NavOutcome::Render(page) = nav.complete(again, html("")) else {
            panic!("expected render");
        };
        assert!(!page.push_history);
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut nav = Navigator::new();
        let slow = nav.begin("/bookstore", NavTrigger::Link);
        let fast = nav.begin("/saving", NavTrigger::Link);

        assert!(matches!(nav.complete(fast, html("saving")), NavOutcome::Render(_)));
        assert_eq!(nav.complete(slow, html("books")), NavOutcome::Superseded);
        assert_eq!(nav.current_path(), Some("/saving"));
    }

    #[test]
    fn failed_template_keeps_previous_page() {
        let mut nav = Navigator::new();
        let home = nav.begin("/", NavTrigger::InitialLoad);
        nav.complete(home, html("home"));

        let broken = nav.begin("/bookstore", NavTrigger::Link);
        let outcome = nav.complete(broken, Err(AppError::Network("offline".into())));
        match outcome {
            NavOutcome::Failed(AppError::Template { location, .. }) => {
                assert_eq!(location, "/pages/bookstore.html");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(nav.phase(), NavPhase::Error);
        assert_eq!(nav.current_path(), Some("/"));
    }

    #[test]
    fn unknown_path_renders_home_under_root() {
        let mut nav = Navigator::new();
        let pending = nav.begin("/does-not-exist", NavTrigger::Link);
        assert!(pending.matched.fallback);
        let NavOutcome::Render(page) = nav.complete(pending, html("home")) else {
            panic!("expected render");
        };
        assert_eq!(page.path, "/");
        assert_eq!(page.page, Some(PageKind::Home));
    }
}
