use crate::components::Context;
use crate::dom::{Node, Page};
use crate::error::EnhanceError;
use crate::utils::events::Bindings;

pub const HERO_LINE_SELECTOR: &str = ".hero-title .line";
pub const TYPED_ATTRIBUTE: &str = "data-typed";

/// Flags the hero line for the CSS typing animation. Returns false when
/// there is no hero line or it was already flagged.
pub fn mark_typed<P: Page>(page: &P) -> bool {
    let Some(line) = page.select(HERO_LINE_SELECTOR) else {
        return false;
    };
    if line
        .attribute(TYPED_ATTRIBUTE)
        .filter(|value| !value.is_empty())
        .is_some()
    {
        return false;
    }
    line.set_attribute(TYPED_ATTRIBUTE, "true");
    true
}

pub fn attach(ctx: &Context) -> Result<Bindings, EnhanceError> {
    if !mark_typed(&ctx.document) {
        log::debug!("hero line missing or already marked");
    }
    Ok(Bindings::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fake::{FakeNode, FakePage};

    #[test]
    fn marks_once() {
        let line = FakeNode::new();
        let page = FakePage::new().with(HERO_LINE_SELECTOR, line.clone());

        assert!(mark_typed(&page));
        assert_eq!(line.attribute(TYPED_ATTRIBUTE).as_deref(), Some("true"));
        assert!(!mark_typed(&page));
        assert_eq!(line.attribute(TYPED_ATTRIBUTE).as_deref(), Some("true"));
    }

    #[test]
    fn empty_marker_counts_as_unmarked() {
        let line = FakeNode::new().with_attribute(TYPED_ATTRIBUTE, "");
        let page = FakePage::new().with(HERO_LINE_SELECTOR, line.clone());

        assert!(mark_typed(&page));
        assert_eq!(line.attribute(TYPED_ATTRIBUTE).as_deref(), Some("true"));
    }

    #[test]
    fn missing_hero_is_a_no_op() {
        assert!(!mark_typed(&FakePage::new()));
    }
}
