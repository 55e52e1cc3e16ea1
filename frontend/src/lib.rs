use std::cell::RefCell;

use wasm_bindgen::prelude::wasm_bindgen;

pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod state;
pub mod utils;

use components::Context;
use config::EnhanceConfig;
use utils::events::Bindings;

#[cfg(all(test, target_arch = "wasm32"))]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

thread_local! {
    static ACTIVE: RefCell<Bindings> = RefCell::new(Bindings::default());
}

fn keep(bindings: Bindings) {
    ACTIVE.with(|active| active.borrow_mut().extend(bindings));
}

/// Whether enhancements must wait for `DOMContentLoaded` instead of running
/// right away.
fn waits_for_dom(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn run(config: EnhanceConfig) {
    let ctx = match Context::from_browser(config) {
        Ok(ctx) => ctx,
        Err(err) => {
            log::warn!("Site enhancements skipped: {}", err);
            return;
        }
    };
    let bindings = components::enhance(&ctx);
    log::info!(
        "Site enhancements ready ({} listeners, {} observers)",
        bindings.listener_count(),
        bindings.observer_count()
    );
    keep(bindings);
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let config = config::load();
    let _ = console_log::init_with_level(config.log_level());
    log::info!("Starting site enhancements (wasm)");

    let document = match utils::browser::document() {
        Ok(document) => document,
        Err(err) => {
            log::warn!("Site enhancements skipped: {}", err);
            return;
        }
    };
    dom::mark_js_enabled(&document);

    if !waits_for_dom(&document.ready_state()) {
        run(config);
        return;
    }

    let mut ready = Bindings::default();
    let attached = ready.listen(&document, "DOMContentLoaded", move |_| run(config.clone()));
    match attached {
        Ok(()) => keep(ready),
        Err(err) => log::warn!("Could not wait for DOMContentLoaded: {}", err),
    }
}

/// Detaches every listener and observer the enhancements added.
#[wasm_bindgen]
pub fn teardown() {
    let bindings = ACTIVE.with(|active| active.take());
    log::info!(
        "Removing site enhancements ({} listeners, {} observers)",
        bindings.listener_count(),
        bindings.observer_count()
    );
}
