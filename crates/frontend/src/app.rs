use crate::config::AppConfig;
use crate::routes::context::RouterContext;
use crate::routes::routes::AppRoutes;
use crate::shared::alert::AlertService;
use crate::shared::api::ApiClient;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_window();
    log::info!(
        "starting client: api_base='{}', auth={:?}, key configured={}",
        config.api_base,
        config.auth_scheme,
        config.api_key.is_some()
    );

    let alerts = AlertService::new(config.alert_duration_ms);
    let api = ApiClient::new(&config, alerts);

    provide_context(config);
    provide_context(alerts);
    provide_context(api);
    provide_context(RouterContext::new(alerts));

    view! {
        <AppRoutes />
    }
}
