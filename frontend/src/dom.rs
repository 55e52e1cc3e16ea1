//! Minimal view of the DOM the enhancements need.
//!
//! Components are written against [`Page`] and [`Node`] so their logic runs
//! the same against `web_sys` in the browser and against in-memory fakes in
//! host tests.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList};

pub trait Node: Clone {
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn set_style(&self, property: &str, value: &str);
    /// Descendants matching `selector`, in document order.
    fn select_all(&self, selector: &str) -> Vec<Self>;
}

pub trait Page {
    type Node: Node;

    /// The `<html>` element.
    fn root(&self) -> Option<Self::Node>;
    fn body(&self) -> Option<Self::Node>;
    fn select(&self, selector: &str) -> Option<Self::Node>;
    fn select_all(&self, selector: &str) -> Vec<Self::Node>;
    fn by_id(&self, id: &str) -> Option<Self::Node>;
}

/// One record handed to a visibility observer callback.
#[derive(Debug, Clone)]
pub struct IntersectionEntry<N> {
    pub target: N,
    pub is_intersecting: bool,
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl Node for Element {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = Element::set_attribute(self, name, value) {
            log::debug!("set_attribute({}) failed: {:?}", name, err);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.class_list().remove_1(class);
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Some(el) = self.dyn_ref::<HtmlElement>() {
            let _ = el.style().set_property(property, value);
        }
    }

    fn select_all(&self, selector: &str) -> Vec<Self> {
        self.query_selector_all(selector)
            .map(elements)
            .unwrap_or_default()
    }
}

impl Page for Document {
    type Node = Element;

    fn root(&self) -> Option<Element> {
        self.document_element()
    }

    fn body(&self) -> Option<Element> {
        Document::body(self).map(Element::from)
    }

    fn select(&self, selector: &str) -> Option<Element> {
        self.query_selector(selector).ok().flatten()
    }

    fn select_all(&self, selector: &str) -> Vec<Element> {
        self.query_selector_all(selector)
            .map(elements)
            .unwrap_or_default()
    }

    fn by_id(&self, id: &str) -> Option<Element> {
        self.get_element_by_id(id)
    }
}

/// Class added to `<html>` and `<body>` once the module runs, so stylesheets
/// can opt into the enhanced presentation.
pub const JS_ENABLED_CLASS: &str = "js-enabled";

pub fn mark_js_enabled<P: Page>(page: &P) {
    for node in [page.root(), page.body()].into_iter().flatten() {
        node.add_class(JS_ENABLED_CLASS);
    }
}
