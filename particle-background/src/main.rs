mod config;
mod engine;
mod host;
mod rpc;

use engine::core::app_setup::create_app;
use host::page::PageSnapshot;

fn main() {
    // A missing mount element disables the background silently.
    let Some(snapshot) = capture_page() else {
        return;
    };

    let mut app = create_app(snapshot);

    #[cfg(target_arch = "wasm32")]
    {
        wasm_bindgen_futures::spawn_local(async move {
            app.run();
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.run();
    }
}

#[cfg(target_arch = "wasm32")]
fn capture_page() -> Option<PageSnapshot> {
    use host::browser::BrowserPage;

    let page = match BrowserPage::connect() {
        Ok(page) => page,
        Err(e) => {
            web_sys::console::warn_1(&format!("Particle background unavailable: {e}").into());
            return None;
        }
    };

    let snapshot = PageSnapshot::capture(&page)?;

    if let Err(e) = page.mount_canvas(&snapshot.config.mount_id) {
        web_sys::console::error_1(&format!("Failed to mount background canvas: {e}").into());
        return None;
    }

    Some(snapshot)
}

#[cfg(not(target_arch = "wasm32"))]
fn capture_page() -> Option<PageSnapshot> {
    PageSnapshot::capture(&host::page::StaticPage::from_env())
}
