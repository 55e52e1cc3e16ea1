use std::rc::Rc;

use web_sys::Element;

use crate::components::Context;
use crate::dom::{Node, Page};
use crate::error::EnhanceError;
use crate::state::theme::{ColorScheme, PreferenceStore, Theme};
use crate::utils::events::Bindings;
use crate::utils::media::{dark_scheme_query, NoSchemePreference};
use crate::utils::storage::preference_store;

pub const TOGGLE_SELECTOR: &str = ".theme-toggle";
pub const THEME_ATTRIBUTE: &str = "data-theme";
const LABEL_ATTRIBUTE: &str = "aria-label";
pub const LABEL_TO_LIGHT: &str = "Switch to light mode";
pub const LABEL_TO_DARK: &str = "Switch to dark mode";

/// Light/dark switch. The applied theme lives on `<html data-theme>`; the
/// persisted one in the preference store. Neither set means "follow the
/// system".
pub struct ThemeToggle<N> {
    toggle: N,
    root: N,
    store: Box<dyn PreferenceStore>,
    scheme: Box<dyn ColorScheme>,
    key: String,
}

impl<N: Node> ThemeToggle<N> {
    pub fn find<P: Page<Node = N>>(
        page: &P,
        store: Box<dyn PreferenceStore>,
        scheme: Box<dyn ColorScheme>,
        key: &str,
    ) -> Option<Self> {
        Some(Self {
            toggle: page.select(TOGGLE_SELECTOR)?,
            root: page.root()?,
            store,
            scheme,
            key: key.to_string(),
        })
    }

    pub fn persisted(&self) -> Option<Theme> {
        self.store.get(&self.key)?.parse().ok()
    }

    pub fn applied(&self) -> Option<Theme> {
        self.root.attribute(THEME_ATTRIBUTE)?.parse().ok()
    }

    /// Applies the persisted preference, if any, and syncs the label.
    pub fn restore(&self) -> Option<Theme> {
        let persisted = self.persisted();
        if let Some(theme) = persisted {
            self.root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
        }
        self.refresh_label();
        persisted
    }

    pub fn is_dark(&self) -> bool {
        match self.applied() {
            Some(theme) => theme == Theme::Dark,
            None => self.scheme.prefers_dark(),
        }
    }

    pub fn label(&self) -> &'static str {
        if self.is_dark() {
            LABEL_TO_LIGHT
        } else {
            LABEL_TO_DARK
        }
    }

    pub fn refresh_label(&self) {
        self.toggle.set_attribute(LABEL_ATTRIBUTE, self.label());
    }

    /// Switches to the opposite of what is showing and persists the choice.
    /// The new theme is applied even if persisting it fails.
    pub fn toggle(&self) -> Result<Theme, EnhanceError> {
        let next = Theme::from_dark(self.is_dark()).opposite();
        self.root.set_attribute(THEME_ATTRIBUTE, next.as_str());
        self.refresh_label();
        self.store.set(&self.key, next.as_str())?;
        Ok(next)
    }

    /// System preference changed. Only the label can follow it, and only
    /// while no recognised theme is persisted.
    pub fn on_system_change(&self) {
        if self.persisted().is_none() {
            self.refresh_label();
        }
    }
}

pub fn attach(ctx: &Context) -> Result<Bindings, EnhanceError> {
    let mut bindings = Bindings::default();
    if ctx.document.select(TOGGLE_SELECTOR).is_none() {
        log::debug!("no {} on page; theme toggle skipped", TOGGLE_SELECTOR);
        return Ok(bindings);
    }

    let query = dark_scheme_query(&ctx.window);
    let scheme: Box<dyn ColorScheme> = match query.clone() {
        Some(list) => Box::new(list),
        None => Box::new(NoSchemePreference),
    };
    let Some(theme) = ThemeToggle::<Element>::find(
        &ctx.document,
        preference_store(),
        scheme,
        &ctx.config.theme_key,
    ) else {
        log::debug!("no document element; theme toggle skipped");
        return Ok(bindings);
    };
    let theme = Rc::new(theme);
    if let Some(restored) = theme.restore() {
        log::debug!("restored {} theme", restored);
    }

    let on_click = Rc::clone(&theme);
    bindings.listen(&theme.toggle, "click", move |_| match on_click.toggle() {
        Ok(next) => log::debug!("switched to {} theme", next),
        Err(err) => log::warn!("theme applied but not saved: {}", err),
    })?;

    if let Some(list) = query {
        let on_change = Rc::clone(&theme);
        bindings.listen(&list, "change", move |_| on_change.on_system_change())?;
    }

    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fake::{FakeNode, FakePage, FakeScheme};
    use crate::utils::storage::MemoryStore;

    const KEY: &str = "theme";

    struct Fixture {
        theme: ThemeToggle<FakeNode>,
        button: FakeNode,
        root: FakeNode,
        store: MemoryStore,
        scheme: FakeScheme,
    }

    fn fixture(scheme: FakeScheme, stored: Option<&str>) -> Fixture {
        let button = FakeNode::new();
        let page = FakePage::new().with(TOGGLE_SELECTOR, button.clone());
        let store = MemoryStore::default();
        if let Some(value) = stored {
            store.set(KEY, value).unwrap();
        }
        let theme = ThemeToggle::find(
            &page,
            Box::new(store.clone()),
            Box::new(scheme.clone()),
            KEY,
        )
        .unwrap();
        Fixture {
            theme,
            button,
            root: page.root_node(),
            store,
            scheme,
        }
    }

    fn label(f: &Fixture) -> Option<String> {
        f.button.attribute("aria-label")
    }

    #[test]
    fn page_without_toggle_is_not_enhanced() {
        let found = ThemeToggle::find(
            &FakePage::new(),
            Box::new(MemoryStore::default()),
            Box::new(FakeScheme::dark()),
            KEY,
        );
        assert!(found.is_none());
    }

    #[test]
    fn restore_applies_persisted_theme() {
        let f = fixture(FakeScheme::light(), Some("dark"));
        assert_eq!(f.theme.restore(), Some(Theme::Dark));
        assert_eq!(f.root.attribute(THEME_ATTRIBUTE).as_deref(), Some("dark"));
        assert_eq!(label(&f).as_deref(), Some(LABEL_TO_LIGHT));
    }

    #[test]
    fn restore_without_preference_labels_from_system() {
        let f = fixture(FakeScheme::dark(), None);
        assert_eq!(f.theme.restore(), None);
        assert_eq!(f.root.attribute(THEME_ATTRIBUTE), None);
        assert_eq!(label(&f).as_deref(), Some(LABEL_TO_LIGHT));
    }

    #[test]
    fn unknown_stored_value_is_treated_as_unset() {
        let f = fixture(FakeScheme::light(), Some("sepia"));
        assert_eq!(f.theme.restore(), None);
        assert_eq!(f.root.attribute(THEME_ATTRIBUTE), None);
        assert_eq!(f.theme.toggle().unwrap(), Theme::Dark);
        assert_eq!(f.store.get(KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn unknown_stored_value_keeps_label_in_sync_with_system() {
        let f = fixture(FakeScheme::dark(), Some("sepia"));
        f.theme.restore();
        assert_eq!(label(&f).as_deref(), Some(LABEL_TO_LIGHT));

        f.scheme.set_dark(false);
        f.theme.on_system_change();
        assert_eq!(label(&f).as_deref(), Some(LABEL_TO_DARK));
        assert_eq!(f.theme.toggle().unwrap(), Theme::Dark);
        assert_eq!(label(&f).as_deref(), Some(LABEL_TO_LIGHT));
    }

    #[test]
    fn first_toggle_flips_system_dark_then_alternates() {
        let f = fixture(FakeScheme::dark(), None);
        f.theme.restore();

        assert_eq!(f.theme.toggle().unwrap(), Theme::Light);
        assert_eq!(f.store.get(KEY).as_deref(), Some("light"));
        assert_eq!(f.root.attribute(THEME_ATTRIBUTE).as_deref(), Some("light"));
        assert_eq!(label(&f).as_deref(), Some(LABEL_TO_DARK));

        assert_eq!(f.theme.toggle().unwrap(), Theme::Dark);
        assert_eq!(f.store.get(KEY).as_deref(), Some("dark"));
        assert_eq!(label(&f).as_deref(), Some(LABEL_TO_LIGHT));
    }

    #[test]
    fn first_toggle_from_system_light_picks_dark() {
        let f = fixture(FakeScheme::light(), None);
        assert_eq!(f.theme.toggle().unwrap(), Theme::Dark);
        assert_eq!(f.theme.persisted(), Some(Theme::Dark));
    }

    #[test]
    fn system_change_relabels_while_unset() {
        let f = fixture(FakeScheme::light(), None);
        f.theme.restore();
        assert_eq!(label(&f).as_deref(), Some(LABEL_TO_DARK));

        f.scheme.set_dark(true);
        f.theme.on_system_change();
        assert_eq!(label(&f).as_deref(), Some(LABEL_TO_LIGHT));
        assert_eq!(f.store.get(KEY), None);
        assert_eq!(f.root.attribute(THEME_ATTRIBUTE), None);
    }

    #[test]
    fn system_change_never_touches_persisted_choice() {
        let f = fixture(FakeScheme::dark(), None);
        f.theme.toggle().unwrap();
        let label_before = label(&f);

        for dark in [false, true, false] {
            f.scheme.set_dark(dark);
            f.theme.on_system_change();
            assert_eq!(f.store.get(KEY).as_deref(), Some("light"));
            assert_eq!(label(&f), label_before);
        }
    }
}
