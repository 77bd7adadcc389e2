//! Runtime configuration.
//!
//! The host page may define `window.APP_CONFIG` (camelCase keys) before the
//! wasm bundle loads. The older `window.API_KEY` global is still honoured when
//! no key is configured there.

use crate::shared::error::AppError;
use js_sys::Reflect;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

/// How the API key travels with each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    #[default]
    Bearer,
    /// `X-API-KEY: <key>`
    ApiKeyHeader,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Prefix for API paths; empty means same origin.
    pub api_base: String,
    pub api_key: Option<String>,
    pub auth_scheme: AuthScheme,
    pub alert_duration_ms: u32,
    pub collection_page_size: usize,
    pub loan_page_size: usize,
    /// Collection shown on `/collections` without a name segment.
    pub default_collection: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            api_key: None,
            auth_scheme: AuthScheme::Bearer,
            alert_duration_ms: 4000,
            collection_page_size: 10,
            loan_page_size: 5,
            default_collection: "Chi".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads the configuration from the page globals, falling back to
    /// defaults when they are absent or malformed.
    pub fn from_window() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let mut config = match Reflect::get(&window, &JsValue::from_str("APP_CONFIG")) {
            Ok(value) if !value.is_undefined() && !value.is_null() => {
                Self::from_js(value).unwrap_or_else(|e| {
                    log::warn!("ignoring window.APP_CONFIG: {}", e);
                    Self::default()
                })
            }
            _ => Self::default(),
        };

        if config.api_key.is_none() {
            config.api_key = Reflect::get(&window, &JsValue::from_str("API_KEY"))
                .ok()
                .and_then(|v| v.as_string());
        }
        config.normalize()
    }

    pub fn from_js(value: JsValue) -> Result<Self, AppError> {
        serde_wasm_bindgen::from_value::<AppConfig>(value)
            .map(Self::normalize)
            .map_err(|e| AppError::Decode(e.to_string()))
    }

    /// Clamps nonsensical values back to defaults.
    pub fn normalize(mut self) -> Self {
        let defaults = Self::default();
        self.api_base = self.api_base.trim().trim_end_matches('/').to_string();
        self.api_key = self.api_key.filter(|k| !k.trim().is_empty());
        if self.alert_duration_ms == 0 {
            self.alert_duration_ms = defaults.alert_duration_ms;
        }
        if self.collection_page_size == 0 {
            self.collection_page_size = defaults.collection_page_size;
        }
        if self.loan_page_size == 0 {
            self.loan_page_size = defaults.loan_page_size;
        }
        if self.default_collection.trim().is_empty() {
            self.default_collection = defaults.default_collection;
        }
        self
    }
}
