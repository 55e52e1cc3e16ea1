use serde::Deserialize;
use std::str::FromStr;

use crate::error::EnhanceError;

/// Name of the optional global object the page can set before the module loads:
/// `window.__SITE_ENHANCE_CONFIG = { theme_key: "site-theme", ... }`.
pub const CONFIG_GLOBAL: &str = "__SITE_ENHANCE_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    /// localStorage key holding the persisted theme.
    pub theme_key: String,
    /// Extra space kept between the fixed header and a scrolled-to anchor.
    pub header_gutter: f64,
    /// Scroll offset past which the header gets its shadow.
    pub shadow_threshold: f64,
    pub header_shadow: String,
    pub fade_root_margin: String,
    pub fade_threshold: f64,
    pub section_root_margin: String,
    pub log_level: String,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            theme_key: "theme".into(),
            header_gutter: 20.0,
            shadow_threshold: 10.0,
            header_shadow: "0 2px 20px rgba(0, 0, 0, 0.08)".into(),
            fade_root_margin: "0px 0px -50px 0px".into(),
            fade_threshold: 0.1,
            section_root_margin: "-50% 0px -50% 0px".into(),
            log_level: "info".into(),
        }
    }
}

impl EnhanceConfig {
    pub fn from_json(raw: &str) -> Result<Self, EnhanceError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn log_level(&self) -> log::Level {
        log::Level::from_str(self.log_level.trim()).unwrap_or(log::Level::Info)
    }
}

fn raw_from_global() -> Option<String> {
    let window = web_sys::window()?;
    let any = js_sys::Reflect::get(&window, &CONFIG_GLOBAL.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    js_sys::JSON::stringify(&any).ok()?.as_string()
}

/// Reads the runtime config global, falling back to defaults when it is
/// missing or malformed. Runs before logging is set up, so failures go to the
/// console directly.
pub fn load() -> EnhanceConfig {
    let Some(raw) = raw_from_global() else {
        return EnhanceConfig::default();
    };
    match EnhanceConfig::from_json(&raw) {
        Ok(config) => config,
        Err(err) => {
            web_sys::console::warn_1(
                &format!("Ignoring window.{}: {}", CONFIG_GLOBAL, err).into(),
            );
            EnhanceConfig::default()
        }
    }
}
