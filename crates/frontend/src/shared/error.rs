//! Client error taxonomy.

use leptos::prelude::*;
use thiserror::Error;

pub const NETWORK_MESSAGE: &str =
    "Không thể kết nối đến máy chủ. Vui lòng kiểm tra lại kết nối mạng.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// The request never reached the server.
    #[error("{NETWORK_MESSAGE}")]
    Network(String),

    /// Non-2xx response; `message` is what the server said.
    #[error("Lỗi API: {message}")]
    Request { status: u16, message: String },

    /// 2xx response whose body did not match the expected shape.
    #[error("Lỗi API: dữ liệu phản hồi không hợp lệ ({0})")]
    Decode(String),

    /// A view target disappeared because its page was replaced.
    #[error("render target is gone: {0}")]
    Render(String),

    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// A page template could not be loaded.
    #[error("Không thể tải trang {location}: {reason}")]
    Template { location: String, reason: String },
}

impl AppError {
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short text for inline placement (chat bubbles, placeholders).
    pub fn detail(&self) -> String {
        match self {
            AppError::Request { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Writes `value` into `target` unless the owning view has been disposed.
///
/// Async completions call this after every await; a disposed signal means the
/// page was replaced while the request was in flight.
pub fn commit<T>(target: RwSignal<T>, value: T, region: &str) -> bool
where
    T: Send + Sync + 'static,
{
    if target.try_set(value).is_some() {
        log::debug!("{}", AppError::Render(region.to_string()));
        false
    } else {
        true
    }
}

/// Like [`commit`] for in-place updates.
pub fn commit_update<T>(target: RwSignal<T>, region: &str, f: impl FnOnce(&mut T)) -> bool
where
    T: Send + Sync + 'static,
{
    if target.try_update(f).is_none() {
        log::debug!("{}", AppError::Render(region.to_string()));
        false
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages() {
        assert_eq!(
            AppError::Network("TypeError: Failed to fetch".into()).to_string(),
            NETWORK_MESSAGE
        );
        let err = AppError::Request {
            status: 404,
            message: "Tài liệu không tồn tại".into(),
        };
        assert_eq!(err.to_string(), "Lỗi API: Tài liệu không tồn tại");
        assert_eq!(err.detail(), "Tài liệu không tồn tại");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn disposed_signal_is_not_written() {
        let owner = Owner::new();
        let signal = owner.with(|| RwSignal::new(1));
        assert!(commit(signal, 2, "test"));
        assert_eq!(signal.get_untracked(), 2);

        signal.dispose();
        assert!(!commit(signal, 3, "test"));
        assert!(!commit_update(signal, "test", |v| *v += 1));
    }
}
