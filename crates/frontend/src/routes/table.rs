//! Static route table and path resolution.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Controller mounted for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Collections,
    Management,
    Library,
    BookDetail,
    LoanPayment,
    Savings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// `/book/:bookId` style pattern.
    pub pattern: &'static str,
    /// Static HTML fragment fetched from the app origin.
    pub template: &'static str,
    pub page: Option<PageKind>,
}

pub type Params = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: Route,
    pub params: Params,
    /// Set when nothing matched and the default route was used.
    pub fallback: bool,
}

const DEFAULT_PATTERN: &str = "/";

pub const ROUTES: &[Route] = &[
    Route {
        pattern: "/",
        template: "/pages/home.html",
        page: Some(PageKind::Home),
    },
    Route {
        pattern: "/collections",
        template: "/pages/collections.html",
        page: Some(PageKind::Collections),
    },
    Route {
        pattern: "/collections/:collection",
        template: "/pages/collections.html",
        page: Some(PageKind::Collections),
    },
    Route {
        pattern: "/management",
        template: "/pages/management.html",
        page: Some(PageKind::Management),
    },
    Route {
        pattern: "/bookstore",
        template: "/pages/bookstore.html",
        page: Some(PageKind::Library),
    },
    Route {
        pattern: "/book/:bookId",
        template: "/pages/book.html",
        page: Some(PageKind::BookDetail),
    },
    Route {
        pattern: "/loan-payment",
        template: "/pages/loan_payment.html",
        page: Some(PageKind::LoanPayment),
    },
    Route {
        pattern: "/saving",
        template: "/pages/saving.html",
        page: Some(PageKind::Savings),
    },
    Route {
        pattern: "/about",
        template: "/pages/about.html",
        page: None,
    },
];

#[derive(Debug)]
enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

struct Compiled {
    route: Route,
    segments: Vec<Segment>,
}

impl Compiled {
    fn is_static(&self) -> bool {
        self.segments.iter().all(|s| matches!(s, Segment::Literal(_)))
    }

    fn capture(&self, parts: &[&str]) -> Option<Params> {
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    let value = urlencoding::decode(part)
                        .map(|v| v.into_owned())
                        .unwrap_or_else(|_| part.to_string());
                    params.insert(name.to_string(), value);
                }
            }
        }
        Some(params)
    }
}

static COMPILED: Lazy<Vec<Compiled>> = Lazy::new(|| {
    ROUTES
        .iter()
        .map(|route| Compiled {
            route: *route,
            segments: split(route.pattern)
                .into_iter()
                .map(|s| match s.strip_prefix(':') {
                    Some(name) => Segment::Param(name),
                    None => Segment::Literal(s),
                })
                .collect(),
        })
        .collect()
});

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Drops query, fragment and trailing slashes; always starts with `/`.
pub fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let path = raw[..end].trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn default_route() -> Route {
    ROUTES
        .iter()
        .copied()
        .find(|r| r.pattern == DEFAULT_PATTERN)
        .unwrap_or(ROUTES[0])
}

/// Exact static match first, then parameterized patterns in table order,
/// else the default route.
pub fn resolve(raw: &str) -> RouteMatch {
    let path = normalize_path(raw);

    if let Some(c) = COMPILED
        .iter()
        .find(|c| c.is_static() && c.route.pattern == path)
    {
        return RouteMatch {
            route: c.route,
            params: Params::new(),
            fallback: false,
        };
    }

    let parts = split(&path);
    for c in COMPILED.iter().filter(|c| !c.is_static()) {
        if let Some(params) = c.capture(&parts) {
            return RouteMatch {
                route: c.route,
                params,
                fallback: false,
            };
        }
    }

    log::warn!("no route for '{}', using default", path);
    RouteMatch {
        route: default_route(),
        params: Params::new(),
        fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_trailing_slash_query_and_fragment() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("/management/"), "/management");
        assert_eq!(normalize_path("/bookstore?q=1#top"), "/bookstore");
        assert_eq!(normalize_path("saving"), "/saving");
    }

    #[test]
    fn static_routes_match_exactly() {
        let m = resolve("/management/");
        assert_eq!(m.route.page, Some(PageKind::Management));
        assert!(m.params.is_empty());
        assert!(!m.fallback);

        let about = resolve("/about");
        assert_eq!(about.route.page, None);
        assert_eq!(about.route.template, "/pages/about.html");
    }

    #[test]
    fn parameters_are_captured_and_decoded() {
        let m = resolve("/book/abc123");
        assert_eq!(m.route.page, Some(PageKind::BookDetail));
        assert_eq!(m.params.get("bookId").map(String::as_str), Some("abc123"));

        let m = resolve("/collections/Ti%E1%BA%BFt%20ki%E1%BB%87m");
        assert_eq!(m.route.pattern, "/collections/:collection");
        assert_eq!(
            m.params.get("collection").map(String::as_str),
            Some("Tiết kiệm")
        );
    }

    #[test]
    fn static_wins_over_parameterized() {
        let m = resolve("/collections");
        assert_eq!(m.route.pattern, "/collections");
        assert!(m.params.is_empty());
    }

    #[test]
    fn unknown_paths_fall_back_to_home() {
        for path in ["/nope", "/book", "/book/1/extra", "/collections/a/b"] {
            let m = resolve(path);
            assert!(m.fallback, "{path}");
            assert_eq!(m.route.page, Some(PageKind::Home));
        }
    }

    #[test]
    fn exactly_one_route_per_pattern() {
        let mut patterns: Vec<_> = ROUTES.iter().map(|r| r.pattern).collect();
        patterns.sort_unstable();
        patterns.dedup();
        assert_eq!(patterns.len(), ROUTES.len());
    }
}
