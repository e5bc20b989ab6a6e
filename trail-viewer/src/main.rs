mod engine;
mod recording;
mod rpc;
mod ui;

use engine::core::app_setup::create_app;

fn main() {
    #[cfg(target_arch = "wasm32")]
    engine::core::error_page::install_error_page_hook();

    let mut app = create_app();

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
