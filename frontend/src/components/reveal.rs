use crate::components::Context;
use crate::dom::{IntersectionEntry, Node, Page};
use crate::error::EnhanceError;
use crate::utils::events::{Bindings, Observer};

pub const FADE_SELECTOR: &str = ".fade-in";
pub const VISIBLE_CLASS: &str = "visible";

/// Marks intersecting targets visible and hands each one to `release` so the
/// observer stops watching it. Returns how many were revealed.
pub fn reveal<N, F>(entries: impl IntoIterator<Item = IntersectionEntry<N>>, mut release: F) -> usize
where
    N: Node,
    F: FnMut(&N),
{
    let mut revealed = 0;
    for entry in entries.into_iter().filter(|entry| entry.is_intersecting) {
        entry.target.add_class(VISIBLE_CLASS);
        release(&entry.target);
        revealed += 1;
    }
    revealed
}

pub fn attach(ctx: &Context) -> Result<Bindings, EnhanceError> {
    let mut bindings = Bindings::default();
    let targets = ctx.document.select_all(FADE_SELECTOR);
    if targets.is_empty() {
        log::debug!("no {} elements; reveal skipped", FADE_SELECTOR);
        return Ok(bindings);
    }

    let observer = Observer::new(
        &ctx.config.fade_root_margin,
        ctx.config.fade_threshold,
        |entries, observer| {
            reveal(entries, |target| observer.unobserve(target));
        },
    )?;
    for target in &targets {
        observer.observe(target);
    }
    bindings.keep_observer(observer);
    Ok(bindings)
}
