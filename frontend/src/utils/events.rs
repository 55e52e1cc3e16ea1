//! Owned handles for everything the enhancements attach to the page.
//! Dropping a handle detaches it.

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::dom::IntersectionEntry;
use crate::error::EnhanceError;

pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn attach<F>(
        target: &EventTarget,
        event: &'static str,
        handler: F,
    ) -> Result<Self, EnhanceError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub struct Observer {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Observer {
    pub fn new<F>(root_margin: &str, threshold: f64, mut handler: F) -> Result<Self, EnhanceError>
    where
        F: FnMut(Vec<IntersectionEntry<Element>>, &IntersectionObserver) + 'static,
    {
        let callback = ObserverCallback::new(move |entries: Array, observer: IntersectionObserver| {
            let entries = entries
                .iter()
                .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| IntersectionEntry {
                    target: entry.target(),
                    is_intersecting: entry.is_intersecting(),
                })
                .collect();
            handler(entries, &observer);
        });

        let init = IntersectionObserverInit::new();
        init.set_root_margin(root_margin);
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, target: &Element) {
        self.observer.observe(target);
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Everything one or more initializers attached, kept alive together.
#[derive(Default)]
pub struct Bindings {
    listeners: Vec<Listener>,
    observers: Vec<Observer>,
}

impl Bindings {
    pub fn listen<F>(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        handler: F,
    ) -> Result<(), EnhanceError>
    where
        F: FnMut(Event) + 'static,
    {
        self.listeners.push(Listener::attach(target, event, handler)?);
        Ok(())
    }

    pub fn keep_observer(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    pub fn extend(&mut self, other: Bindings) {
        self.listeners.extend(other.listeners);
        self.observers.extend(other.observers);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty() && self.observers.is_empty()
    }
}
