#[cfg(target_arch = "wasm32")]
fn main() {
    lab_access_frontend::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("lab-access-frontend runs in the browser; build it for wasm32-unknown-unknown (e.g. `trunk serve`).");
}
