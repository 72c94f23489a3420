/// Native entry point: `atelier-native <gallery.json>`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use atelier::AppConfig;
    use std::path::PathBuf;

    let config = AppConfig::load_from_default_path().unwrap_or_else(AppConfig::new);

    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let Some(gallery_path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("Usage: atelier-native <gallery.json>");
        std::process::exit(2);
    };

    if let Err(e) = atelier::native::run(&gallery_path, &config) {
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
