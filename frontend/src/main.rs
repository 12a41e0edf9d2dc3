use leptos::prelude::*;
use listaria_frontend::App;
use listaria_frontend::config::RuntimeConfig;

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();

    let config = RuntimeConfig::from_build_env();
    listaria_frontend::logging::init(config.log_level);
    config.warn_if_incomplete();
    tracing::info!(api = %config.api_base_url, "starting Listaria");

    mount_to_body(move || view! { <App config=config /> });
}
