//! Household finance web client: a Leptos CSR app talking to the `/api`
//! backend, with pages mounted by a small client-side router.

pub mod app;
pub mod config;
pub mod dashboards;
pub mod domain;
pub mod layout;
pub mod routes;
pub mod shared;

use wasm_bindgen::prelude::wasm_bindgen;

fn init_logging() {
    if console_log::init_with_level(log::Level::Debug).is_err() {
        // already installed by an earlier start
        return;
    }
    console_error_panic_hook::set_once();
}

#[wasm_bindgen(start)]
pub fn start() {
    init_logging();
    log::info!("mounting household finance client");
    leptos::mount::mount_to_body(app::App);
}
