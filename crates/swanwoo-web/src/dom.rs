//! Small helpers over `web_sys`

use anyhow::{anyhow, Result};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

/// Search part of the page URL (`?a=b`), if any
pub fn location_search() -> Option<String> {
    web::window()?.location().search().ok()
}

/// Milliseconds from a monotonic clock, falling back to wall time
pub fn now_ms() -> f64 {
    web::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

pub fn js_error(value: JsValue) -> anyhow::Error {
    anyhow!("{:?}", value)
}

/// Create an element with a class name and optional text
pub fn create(document: &web::Document, tag: &str, class: &str, text: Option<&str>) -> Result<web::HtmlElement> {
    let element = document
        .create_element(tag)
        .map_err(js_error)?
        .dyn_into::<web::HtmlElement>()
        .map_err(|_| anyhow!("<{}> is not an HtmlElement", tag))?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    if let Some(text) = text {
        element.set_text_content(Some(text));
    }
    Ok(element)
}

pub fn append(parent: &web::Node, child: &web::Node) -> Result<()> {
    parent.append_child(child).map_err(js_error)?;
    Ok(())
}

pub fn set_style(element: &web::HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        tracing::debug!("Failed to set {}: {:?}", property, e);
    }
}

/// Add or remove a class
pub fn toggle_class(element: &web::HtmlElement, class: &str, on: bool) {
    let list = element.class_list();
    let result = if on { list.add_1(class) } else { list.remove_1(class) };
    if let Err(e) = result {
        tracing::debug!("Failed to toggle class {}: {:?}", class, e);
    }
}

/// DOM event listener that is removed again when dropped
pub struct EventListener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventListener {
    pub fn new(target: &web::EventTarget, kind: &'static str, handler: impl FnMut(web::Event) + 'static) -> Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(js_error)?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}
