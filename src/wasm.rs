use wasm_bindgen::prelude::*;

use crate::config::AppConfig;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let level = AppConfig::load_from_local_storage()
        .map(|config| config.preferences.log_level)
        .unwrap_or_default();
    if let Err(e) = console_log::init_with_level(level.to_level()) {
        web_sys::console::log_1(&format!("Logger already initialized: {}", e).into());
    }

    log::info!("Atelier WASM starting...");
}
