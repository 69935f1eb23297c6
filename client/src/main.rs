mod app;
mod canvas;
mod config;
mod lobby;
mod logging;
mod match_view;
mod queue;
mod render_loop;
mod renderer;
mod socket;
mod time_format;

use leptos::mount::mount_to;
use leptos::prelude::*;
use std::any::Any;
use std::cell::RefCell;
use wasm_bindgen::JsCast;

thread_local! {
    static APP_MOUNT_HANDLE: RefCell<Option<Box<dyn Any>>> = RefCell::new(None);
}

fn main() {
    console_error_panic_hook::set_once();
    let config = config::ClientConfig::load();
    logging::init(config.max_level());

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let mount_target = document
        .get_element_by_id("app")
        .and_then(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .or_else(|| document.body());
    let Some(target) = mount_target else {
        tracing::error!("no mount target for the client");
        return;
    };
    let pathname = window.location().pathname().unwrap_or_default();

    APP_MOUNT_HANDLE.with(move |slot| {
        // Drop a previous mount if main() runs again, so its socket and
        // timers are released first.
        let _old = slot.borrow_mut().take();
        let handle = mount_to(target, move || {
            view! { <app::App config=config.clone() pathname=pathname.clone() /> }
        });
        *slot.borrow_mut() = Some(Box::new(handle));
    });
}
