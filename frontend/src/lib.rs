pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

/// Browser entry point: installs logging, starts loading the runtime config
/// and mounts the app.
#[cfg(target_arch = "wasm32")]
pub fn run() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"Logger was already initialized".into());
    }
    log::info!("Starting Lab Access frontend");

    // window.__LAB_ACCESS_ENV (env.js) takes precedence over ./config.json.
    wasm_bindgen_futures::spawn_local(config::init());

    router::mount_app();
}
