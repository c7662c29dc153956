//! # forecast-client
//!
//! Leptos + WASM frontend for the forecast planner: login, registration,
//! and a profile page backed by the planner's REST API.
//!
//! The session lifecycle (stores, auth client, navigation expiry check, and
//! signal bus) is plain Rust behind `Transport`, `KeyValueStorage`, and
//! `Clock` seams, so it runs natively under test. The `csr` feature adds the
//! browser implementations and mounts the UI.

#[cfg(any(feature = "csr", not(target_arch = "wasm32")))]
pub mod app;
#[cfg(any(feature = "csr", not(target_arch = "wasm32")))]
pub mod components;
pub mod config;
pub mod context;
pub mod net;
#[cfg(any(feature = "csr", not(target_arch = "wasm32")))]
pub mod pages;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// Browser entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
