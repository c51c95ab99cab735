//! Hankki Frontend Entry Point

mod api;
mod app;
mod auth;
mod components;
mod config;
mod context;
mod debounce;
mod dialog;
mod models;
mod recipe_form;
mod screens;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("[App] Starting, API base {}", config::client().api_base);
    mount_to_body(App);
}
