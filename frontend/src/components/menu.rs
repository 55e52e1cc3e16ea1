use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, KeyboardEvent};

use crate::components::Context;
use crate::dom::{Node, Page};
use crate::error::EnhanceError;
use crate::utils::events::Bindings;

pub const TOGGLE_SELECTOR: &str = ".mobile-menu-toggle";
pub const LINKS_SELECTOR: &str = ".nav-links";
pub const OPEN_CLASS: &str = "active";
const EXPANDED_ATTRIBUTE: &str = "aria-expanded";
const CLOSE_KEY: &str = "Escape";

pub struct MobileMenu<N> {
    toggle: N,
    links: N,
}

impl<N: Node> MobileMenu<N> {
    /// `None` unless both the toggle button and the link container exist.
    pub fn find<P: Page<Node = N>>(page: &P) -> Option<Self> {
        Some(Self {
            toggle: page.select(TOGGLE_SELECTOR)?,
            links: page.select(LINKS_SELECTOR)?,
        })
    }

    pub fn is_expanded(&self) -> bool {
        self.toggle.attribute(EXPANDED_ATTRIBUTE).as_deref() == Some("true")
    }

    pub fn is_open(&self) -> bool {
        self.links.has_class(OPEN_CLASS)
    }

    pub fn set_open(&self, open: bool) {
        self.toggle
            .set_attribute(EXPANDED_ATTRIBUTE, if open { "true" } else { "false" });
        for node in [&self.toggle, &self.links] {
            if open {
                node.add_class(OPEN_CLASS);
            } else {
                node.remove_class(OPEN_CLASS);
            }
        }
    }

    pub fn toggle(&self) {
        self.set_open(!self.is_expanded());
    }

    pub fn close(&self) {
        self.set_open(false);
    }

    /// Collapses on Escape while open. Returns whether the key was handled.
    pub fn handle_key(&self, key: &str) -> bool {
        if key == CLOSE_KEY && self.is_open() {
            self.close();
            true
        } else {
            false
        }
    }

    pub fn links(&self) -> Vec<N> {
        self.links.select_all("a")
    }
}

pub fn attach(ctx: &Context) -> Result<Bindings, EnhanceError> {
    let mut bindings = Bindings::default();
    let Some(menu) = MobileMenu::<Element>::find(&ctx.document) else {
        log::debug!("no mobile menu markup; menu toggle skipped");
        return Ok(bindings);
    };
    let menu = Rc::new(menu);

    let on_toggle = Rc::clone(&menu);
    bindings.listen(&menu.toggle, "click", move |_| on_toggle.toggle())?;

    for link in menu.links() {
        let on_link = Rc::clone(&menu);
        bindings.listen(&link, "click", move |_| on_link.close())?;
    }

    let on_key = Rc::clone(&menu);
    bindings.listen(&ctx.document, "keydown", move |event| {
        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
            on_key.handle_key(&event.key());
        }
    })?;

    Ok(bindings)
}
