//! Transient notification banners, auto-dismissed after a fixed delay.

use std::cell::{Cell, RefCell};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::dom;
use crate::format;

const TOAST_AUTO_HIDE_MS: u32 = 5_000;

thread_local! {
    // Lazily created container handle, one per document lifetime.
    static TOAST_CONTAINER: RefCell<Option<Element>> = RefCell::new(None);
    static TOAST_SEQ: Cell<u64> = Cell::new(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "error" => ToastKind::Error,
            _ => ToastKind::Success,
        }
    }

    pub fn header_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "bg-success text-white",
            ToastKind::Error => "bg-danger text-white",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ToastKind::Success => "Thành công",
            ToastKind::Error => "Lỗi",
        }
    }
}

/// Ids pair the creation time with a sequence number so toasts created in
/// the same millisecond stay distinct.
fn toast_id(now_ms: f64, seq: u64) -> String {
    format!("toast-{}-{}", now_ms as u64, seq)
}

fn next_toast_id() -> String {
    TOAST_SEQ.with(|seq| {
        let n = seq.get();
        seq.set(n + 1);
        toast_id(js_sys::Date::now(), n)
    })
}

/// Returns the shared toast container, creating it and appending it to the
/// document body on first use.
fn toast_container(document: &Document) -> Result<Element, JsValue> {
    let cached = TOAST_CONTAINER.with(|c| c.borrow().clone());
    if let Some(container) = cached {
        // The handle goes stale if the body was replaced wholesale.
        if container.is_connected() {
            return Ok(container);
        }
    }

    let container = match document.query_selector(".toast-container")? {
        Some(existing) => existing,
        None => {
            let created = document.create_element("div")?;
            created.set_class_name("toast-container position-fixed top-0 end-0 p-3");
            document
                .body()
                .ok_or_else(|| JsValue::from_str("No document body"))?
                .append_child(&created)?;
            created
        }
    };
    TOAST_CONTAINER.with(|c| *c.borrow_mut() = Some(container.clone()));
    Ok(container)
}

/// Displays a toast. Purely a display action: failures are logged and the
/// page stays interactive.
pub fn show_toast(message: &str, kind: ToastKind) {
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(d) => d,
        None => return,
    };

    if let Err(e) = render_toast(&document, message, kind) {
        log::error!("Toast render failed: {:?}", e);
    }
}

fn render_toast(document: &Document, message: &str, kind: ToastKind) -> Result<(), JsValue> {
    let container = toast_container(document)?;
    let id = next_toast_id();
    let stamp = format::format_date(&js_sys::Date::new_0());
    let html = format!(
        r#"<div id="{id}" class="toast" role="alert" aria-live="assertive" aria-atomic="true">
  <div class="toast-header {header}">
    <strong class="me-auto">{title}</strong>
    <small>{stamp}</small>
    <button type="button" class="btn-close btn-close-white" aria-label="Close"></button>
  </div>
  <div class="toast-body">{message}</div>
</div>"#,
        id = id,
        header = kind.header_class(),
        title = kind.title(),
        stamp = stamp,
        message = message,
    );
    container.insert_adjacent_html("beforeend", &html)?;

    let toast = document
        .get_element_by_id(&id)
        .ok_or_else(|| JsValue::from_str("Toast vanished after insert"))?;

    // Removal is tied to the end of the hide transition. The show transition
    // fires transitionend too, hence the class check.
    {
        let element = toast.clone();
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            if !dom::has_class(&element, "show") {
                element.remove();
            }
        }) as Box<dyn FnMut(_)>);
        let _ = toast
            .add_event_listener_with_callback("transitionend", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    if let Some(close) = toast.query_selector(".btn-close")? {
        let element = toast.clone();
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            dom::remove_class(&element, "show");
        }) as Box<dyn FnMut(_)>);
        let _ = close.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Reflow before adding the class so the show transition actually runs.
    if let Some(html_el) = toast.dyn_ref::<web_sys::HtmlElement>() {
        let _ = html_el.offset_height();
    }
    dom::add_class(&toast, "show");

    let element = toast.clone();
    gloo_timers::callback::Timeout::new(TOAST_AUTO_HIDE_MS, move || {
        dom::remove_class(&element, "show");
    })
    .forget();

    Ok(())
}

#[wasm_bindgen(js_name = showToast)]
pub fn show_toast_js(message: String, kind: Option<String>) {
    let kind = kind
        .as_deref()
        .map(ToastKind::from_name)
        .unwrap_or(ToastKind::Success);
    show_toast(&message, kind);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_millisecond_ids_stay_distinct() {
        assert_ne!(toast_id(1_700_000_000_000.0, 0), toast_id(1_700_000_000_000.0, 1));
    }

    #[test]
    fn test_id_carries_creation_time() {
        assert_eq!(toast_id(42.0, 7), "toast-42-7");
    }

    #[test]
    fn test_kind_from_name() {
        assert_eq!(ToastKind::from_name("error"), ToastKind::Error);
        assert_eq!(ToastKind::from_name("success"), ToastKind::Success);
        assert_eq!(ToastKind::from_name("anything"), ToastKind::Success);
    }

    #[test]
    fn test_kind_presentation() {
        assert_eq!(ToastKind::Success.header_class(), "bg-success text-white");
        assert_eq!(ToastKind::Error.header_class(), "bg-danger text-white");
        assert_eq!(ToastKind::Success.title(), "Thành công");
        assert_eq!(ToastKind::Error.title(), "Lỗi");
    }
}
