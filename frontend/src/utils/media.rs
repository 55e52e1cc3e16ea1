use web_sys::{MediaQueryList, Window};

use crate::state::theme::ColorScheme;

pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

pub fn dark_scheme_query(window: &Window) -> Option<MediaQueryList> {
    window.match_media(DARK_SCHEME_QUERY).ok().flatten()
}

impl ColorScheme for MediaQueryList {
    fn prefers_dark(&self) -> bool {
        self.matches()
    }
}

/// Used when the host has no `matchMedia`; reports a light system theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSchemePreference;

impl ColorScheme for NoSchemePreference {
    fn prefers_dark(&self) -> bool {
        false
    }
}
