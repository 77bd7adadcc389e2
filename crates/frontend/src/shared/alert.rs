//! Toast notifications.
//!
//! [`AlertService`] is provided through context; [`AlertHost`] renders the
//! queue and must be mounted once in the shell. Until the host is mounted,
//! `show` only logs.

use crate::shared::icons::icon;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::Success => "alert alert--success",
            Severity::Error => "alert alert--error",
            Severity::Warning => "alert alert--warning",
            Severity::Info => "alert alert--info",
        }
    }

    fn icon_name(&self) -> &'static str {
        match self {
            Severity::Success => "check-circle",
            Severity::Error => "alert-circle",
            Severity::Warning => "alert-triangle",
            Severity::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
}

/// Ordered list of visible alerts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertQueue {
    next_id: u64,
    items: Vec<Alert>,
}

impl AlertQueue {
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Alert {
            id,
            severity,
            message: message.into(),
        });
        id
    }

    /// Removes an alert; returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|a| a.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Alert] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Anything that can surface a message to the user.
pub trait AlertSink {
    fn show(&self, severity: Severity, message: &str);
}

#[derive(Clone, Copy)]
pub struct AlertService {
    queue: RwSignal<AlertQueue>,
    host_mounted: RwSignal<bool>,
    default_duration_ms: u32,
}

impl AlertService {
    pub fn new(default_duration_ms: u32) -> Self {
        Self {
            queue: RwSignal::new(AlertQueue::default()),
            host_mounted: RwSignal::new(false),
            default_duration_ms,
        }
    }

    pub fn show(&self, severity: Severity, message: impl Into<String>) {
        self.show_for(severity, message, self.default_duration_ms);
    }

    pub fn show_for(&self, severity: Severity, message: impl Into<String>, duration_ms: u32) {
        let message = message.into();
        if !self.host_mounted.get_untracked() {
            log::warn!("alert host not mounted, dropping {:?}: {}", severity, message);
            return;
        }
        let Some(id) = self.queue.try_update(|q| q.push(severity, message)) else {
            return;
        };
        let this = *self;
        Timeout::new(duration_ms, move || this.dismiss(id)).forget();
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(Severity::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(Severity::Error, message);
    }

    pub fn dismiss(&self, id: u64) {
        _ = self.queue.try_update(|q| q.dismiss(id));
    }

    /// Registers the host; returns `false` if one is already registered.
    fn register_host(&self) -> bool {
        if self.host_mounted.get_untracked() {
            return false;
        }
        self.host_mounted.set(true);
        true
    }

    fn unregister_host(&self) {
        _ = self.host_mounted.try_set(false);
    }
}

/// Sink that keeps every alert, for tests.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingSink(pub std::cell::RefCell<Vec<(Severity, String)>>);

#[cfg(test)]
impl AlertSink for RecordingSink {
    fn show(&self, severity: Severity, message: &str) {
        self.0.borrow_mut().push((severity, message.to_string()));
    }
}

impl AlertSink for AlertService {
    fn show(&self, severity: Severity, message: &str) {
        AlertService::show(self, severity, message.to_string());
    }
}

#[component]
pub fn AlertHost() -> impl IntoView {
    let Some(service) = use_context::<AlertService>() else {
        log::error!("AlertHost mounted without AlertService in context");
        return view! { <></> }.into_any();
    };
    if !service.register_host() {
        log::warn!("second AlertHost ignored");
        return view! { <></> }.into_any();
    }
    on_cleanup(move || service.unregister_host());

    view! {
        <div class="alert-host" role="status" aria-live="polite">
            <For
                each=move || service.queue.get().items().to_vec()
                key=|alert| alert.id
                let:alert
            >
                {
                    let id = alert.id;
                    view! {
                        <div class=alert.severity.css_class()>
                            <span class="alert__icon">{icon(alert.severity.icon_name())}</span>
                            <span class="alert__message">{alert.message.clone()}</span>
                            <button
                                class="alert__close"
                                title="Đóng"
                                on:click=move |_| service.dismiss(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            </For>
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_is_idempotent() {
        let mut queue = AlertQueue::default();
        let first = queue.push(Severity::Info, "một");
        let second = queue.push(Severity::Error, "hai");
        assert_ne!(first, second);

        assert!(queue.dismiss(first));
        assert!(!queue.dismiss(first));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.items()[0].message, "hai");
    }

    #[test]
    fn show_without_host_is_a_no_op() {
        let owner = Owner::new();
        owner.with(|| {
            let service = AlertService::new(4000);
            service.show(Severity::Error, "lost");
            assert!(service.queue.get_untracked().is_empty());
        });
    }
}
