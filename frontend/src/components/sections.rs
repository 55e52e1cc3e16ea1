use std::rc::Rc;

use web_sys::Element;

use crate::components::Context;
use crate::dom::{IntersectionEntry, Node, Page};
use crate::error::EnhanceError;
use crate::utils::events::{Bindings, Observer};

pub const SECTION_SELECTOR: &str = "section[id]";
pub const NAV_LINK_SELECTOR: &str = ".nav-links a[href^=\"#\"]";
pub const ACTIVE_CLASS: &str = "active";

pub struct SectionHighlighter<N> {
    links: Vec<N>,
}

impl<N: Node> SectionHighlighter<N> {
    /// The highlighter and the sections it should observe; `None` when the
    /// page has no sections or no in-page nav links.
    pub fn find<P: Page<Node = N>>(page: &P) -> Option<(Self, Vec<N>)> {
        let sections = page.select_all(SECTION_SELECTOR);
        let links = page.select_all(NAV_LINK_SELECTOR);
        if sections.is_empty() || links.is_empty() {
            return None;
        }
        Some((Self { links }, sections))
    }

    pub fn highlight(&self, id: &str) {
        let href = format!("#{}", id);
        for link in &self.links {
            link.remove_class(ACTIVE_CLASS);
            if link.attribute("href").as_deref() == Some(href.as_str()) {
                link.add_class(ACTIVE_CLASS);
            }
        }
    }

    /// Applies intersecting entries in the order given, so when several
    /// sections cross the band in one batch the last one stays highlighted.
    /// Returns the id highlighted last, if any.
    pub fn apply(&self, entries: impl IntoIterator<Item = IntersectionEntry<N>>) -> Option<String> {
        let mut last = None;
        for entry in entries.into_iter().filter(|entry| entry.is_intersecting) {
            let Some(id) = entry.target.attribute("id") else {
                continue;
            };
            self.highlight(&id);
            last = Some(id);
        }
        last
    }
}

pub fn attach(ctx: &Context) -> Result<Bindings, EnhanceError> {
    let mut bindings = Bindings::default();
    let Some((highlighter, sections)) = SectionHighlighter::<Element>::find(&ctx.document) else {
        log::debug!("no sections or in-page nav links; highlighting skipped");
        return Ok(bindings);
    };
    let highlighter = Rc::new(highlighter);

    let observer = Observer::new(&ctx.config.section_root_margin, 0.0, move |entries, _| {
        highlighter.apply(entries);
    })?;
    for section in &sections {
        observer.observe(section);
    }
    bindings.keep_observer(observer);
    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fake::{FakeNode, FakePage};

    struct Fixture {
        highlighter: SectionHighlighter<FakeNode>,
        sections: Vec<FakeNode>,
        links: Vec<FakeNode>,
    }

    fn fixture() -> Fixture {
        let sections = vec![
            FakeNode::section("about"),
            FakeNode::section("work"),
            FakeNode::section("contact"),
        ];
        let links = vec![
            FakeNode::link("#about"),
            FakeNode::link("#work"),
            FakeNode::link("#contact"),
        ];
        let page = FakePage::new()
            .with_all(SECTION_SELECTOR, sections.clone())
            .with_all(NAV_LINK_SELECTOR, links.clone());
        let (highlighter, observed) = SectionHighlighter::find(&page).unwrap();
        assert_eq!(observed.len(), 3);
        Fixture {
            highlighter,
            sections,
            links,
        }
    }

    fn entry(target: &FakeNode, is_intersecting: bool) -> IntersectionEntry<FakeNode> {
        IntersectionEntry {
            target: target.clone(),
            is_intersecting,
        }
    }

    fn active(links: &[FakeNode]) -> Vec<bool> {
        links.iter().map(|link| link.has_class(ACTIVE_CLASS)).collect()
    }

    #[test]
    fn needs_both_sections_and_links() {
        let only_sections = FakePage::new().with(SECTION_SELECTOR, FakeNode::section("a"));
        let only_links = FakePage::new().with(NAV_LINK_SELECTOR, FakeNode::link("#a"));
        assert!(SectionHighlighter::find(&only_sections).is_none());
        assert!(SectionHighlighter::find(&only_links).is_none());
    }

    #[test]
    fn intersecting_section_activates_its_link_only() {
        let f = fixture();
        f.links[0].add_class(ACTIVE_CLASS);

        let id = f.highlighter.apply(vec![entry(&f.sections[1], true)]);
        assert_eq!(id.as_deref(), Some("work"));
        assert_eq!(active(&f.links), vec![false, true, false]);
    }

    #[test]
    fn leaving_entries_change_nothing() {
        let f = fixture();
        f.highlighter.apply(vec![entry(&f.sections[0], true)]);
        let id = f.highlighter.apply(vec![entry(&f.sections[0], false)]);
        assert_eq!(id, None);
        assert_eq!(active(&f.links), vec![true, false, false]);
    }

    #[test]
    fn last_intersecting_entry_in_a_batch_wins() {
        let f = fixture();
        let id = f.highlighter.apply(vec![
            entry(&f.sections[2], true),
            entry(&f.sections[1], false),
            entry(&f.sections[0], true),
        ]);
        assert_eq!(id.as_deref(), Some("about"));
        assert_eq!(active(&f.links), vec![true, false, false]);
    }

    #[test]
    fn section_without_matching_link_clears_all() {
        let f = fixture();
        f.highlighter.apply(vec![entry(&f.sections[0], true)]);
        f.highlighter
            .apply(vec![entry(&FakeNode::section("pricing"), true)]);
        assert_eq!(active(&f.links), vec![false, false, false]);
    }
}
