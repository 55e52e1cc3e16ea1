//! The page enhancements. Each module pairs host-independent logic (written
//! against [`crate::dom`] traits) with an `attach` function that wires it to
//! the live document and returns the handles it created.

use web_sys::{Document, Window};

use crate::config::EnhanceConfig;
use crate::error::EnhanceError;
use crate::utils::browser;
use crate::utils::events::Bindings;

pub mod anchors;
pub mod header;
pub mod hero;
pub mod menu;
pub mod reveal;
pub mod sections;
pub mod theme;

pub struct Context {
    pub window: Window,
    pub document: Document,
    pub config: EnhanceConfig,
}

impl Context {
    pub fn from_browser(config: EnhanceConfig) -> Result<Self, EnhanceError> {
        Ok(Self {
            window: browser::window()?,
            document: browser::document()?,
            config,
        })
    }
}

pub type Attach<C> = fn(&C) -> Result<Bindings, EnhanceError>;

const INITIALIZERS: [(&str, Attach<Context>); 7] = [
    ("fade-in reveal", reveal::attach),
    ("mobile menu", menu::attach),
    ("smooth anchors", anchors::attach),
    ("header shadow", header::attach),
    ("active section", sections::attach),
    ("hero typing", hero::attach),
    ("theme toggle", theme::attach),
];

/// Runs every enhancement in order.
pub fn enhance(ctx: &Context) -> Bindings {
    run_initializers(ctx, &INITIALIZERS)
}

/// Runs `initializers` in order. A failing one is logged and skipped; the
/// rest still run.
pub fn run_initializers<C>(ctx: &C, initializers: &[(&str, Attach<C>)]) -> Bindings {
    let mut bindings = Bindings::default();
    for (name, attach) in initializers {
        match attach(ctx) {
            Ok(attached) => {
                log::debug!(
                    "{}: {} listener(s), {} observer(s)",
                    name,
                    attached.listener_count(),
                    attached.observer_count()
                );
                bindings.extend(attached);
            }
            Err(err) => log::warn!("{} enhancement failed: {}", name, err),
        }
    }
    bindings
}
