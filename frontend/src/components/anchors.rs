use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::components::header::HEADER_SELECTOR;
use crate::components::Context;
use crate::dom::Page;
use crate::error::EnhanceError;
use crate::utils::browser;
use crate::utils::events::Bindings;

pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// The element id an in-page href points at. Bare `#` points nowhere.
pub fn fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offsets {
    pub scroll_y: f64,
    pub header_height: f64,
    pub gutter: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScrollPlan {
    pub top: f64,
    pub hash: String,
}

/// Where to scroll for a click on `href`, or `None` when the link should be
/// left to the browser. `target_top` resolves an id to its viewport-relative
/// top edge.
pub fn plan_scroll<F>(href: &str, target_top: F, offsets: Offsets) -> Option<ScrollPlan>
where
    F: FnOnce(&str) -> Option<f64>,
{
    let id = fragment(href)?;
    let top = target_top(id)?;
    Some(ScrollPlan {
        top: top + offsets.scroll_y - offsets.header_height - offsets.gutter,
        hash: format!("#{}", id),
    })
}

fn header_height(document: &Document) -> f64 {
    document
        .select(HEADER_SELECTOR)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| f64::from(el.offset_height()))
        .unwrap_or(0.0)
}

fn scroll_smoothly(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

fn push_hash(window: &Window, hash: &str) -> Result<(), EnhanceError> {
    window
        .history()?
        .push_state_with_url(&JsValue::NULL, "", Some(hash))?;
    Ok(())
}

pub fn attach(ctx: &Context) -> Result<Bindings, EnhanceError> {
    let mut bindings = Bindings::default();
    for anchor in ctx.document.select_all(ANCHOR_SELECTOR) {
        let link = anchor.clone();
        let window = ctx.window.clone();
        let document = ctx.document.clone();
        let gutter = ctx.config.header_gutter;

        bindings.listen(&anchor, "click", move |event| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let offsets = Offsets {
                scroll_y: browser::scroll_y(&window),
                header_height: header_height(&document),
                gutter,
            };
            let target_top =
                |id: &str| document.by_id(id).map(|t| t.get_bounding_client_rect().top());
            let Some(plan) = plan_scroll(&href, target_top, offsets) else {
                return;
            };

            event.prevent_default();
            scroll_smoothly(&window, plan.top);
            if let Err(err) = push_hash(&window, &plan.hash) {
                log::debug!("could not update URL to {}: {}", plan.hash, err);
            }
        })?;
    }
    Ok(bindings)
}
