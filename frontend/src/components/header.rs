use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::components::Context;
use crate::dom::{Node, Page};
use crate::error::EnhanceError;
use crate::utils::browser;
use crate::utils::events::Bindings;

pub const HEADER_SELECTOR: &str = ".site-header";
const SHADOW_PROPERTY: &str = "box-shadow";
const NO_SHADOW: &str = "none";

pub struct HeaderShadow<N> {
    header: N,
    threshold: f64,
    shadow: String,
}

impl<N: Node> HeaderShadow<N> {
    pub fn find<P: Page<Node = N>>(page: &P, threshold: f64, shadow: &str) -> Option<Self> {
        Some(Self {
            header: page.select(HEADER_SELECTOR)?,
            threshold,
            shadow: shadow.to_string(),
        })
    }

    pub fn style_for(&self, scroll_y: f64) -> &str {
        if scroll_y > self.threshold {
            self.shadow.as_str()
        } else {
            NO_SHADOW
        }
    }

    pub fn update(&self, scroll_y: f64) {
        self.header
            .set_style(SHADOW_PROPERTY, self.style_for(scroll_y));
    }
}

/// Allows one pending animation-frame update at a time.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    pending: Cell<bool>,
}

impl FrameThrottle {
    /// True when the caller should schedule a frame; false while one is
    /// already pending.
    pub fn try_schedule(&self) -> bool {
        !self.pending.replace(true)
    }

    pub fn release(&self) {
        self.pending.set(false);
    }
}

pub fn attach(ctx: &Context) -> Result<Bindings, EnhanceError> {
    let mut bindings = Bindings::default();
    let Some(shadow) = HeaderShadow::<Element>::find(
        &ctx.document,
        ctx.config.shadow_threshold,
        &ctx.config.header_shadow,
    ) else {
        log::debug!("no {} on page; header shadow skipped", HEADER_SELECTOR);
        return Ok(bindings);
    };
    let shadow = Rc::new(shadow);
    let throttle = Rc::new(FrameThrottle::default());

    let window = ctx.window.clone();
    let on_scroll = Rc::clone(&shadow);
    bindings.listen(&ctx.window, "scroll", move |_| {
        if !throttle.try_schedule() {
            return;
        }
        let frame_window = window.clone();
        let frame_shadow = Rc::clone(&on_scroll);
        let frame_throttle = Rc::clone(&throttle);
        let frame = Closure::once_into_js(move || {
            frame_shadow.update(browser::scroll_y(&frame_window));
            frame_throttle.release();
        });
        if window
            .request_animation_frame(frame.unchecked_ref())
            .is_err()
        {
            throttle.release();
        }
    })?;

    shadow.update(browser::scroll_y(&ctx.window));
    Ok(bindings)
}
