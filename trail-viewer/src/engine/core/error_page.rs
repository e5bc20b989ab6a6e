use std::panic;

use crate::ui::html::escape_html;

/// Replace the page body with an error message when the app panics.
pub fn install_error_page_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let message = info.to_string();
        web_sys::console::error_1(&message.as_str().into());
        show_error_page(&message);
        default_hook(info);
    }));
}

fn show_error_page(message: &str) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };

    body.set_inner_html(&format!(
        "<div style=\"color:#fff;background:#222;font-family:sans-serif;padding:2em\">\
         <h1>Application Error</h1><pre>{}</pre></div>",
        escape_html(message)
    ));
}
