//! Page chrome: confirm guards, flash auto-dismissal, the footer clock, and
//! task-table sizing.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::dom;
use crate::format;

const FLASH_DISMISS_MS: u32 = 5_000;
const CLOCK_TICK_MS: u32 = 1_000;

const TABLE_EXTRA_OFFSET: f64 = 60.0;
const TABLE_MIN_HEIGHT: f64 = 400.0;
const TABLE_MAX_HEIGHT: f64 = 800.0;
const DEFAULT_HEADER_HEIGHT: f64 = 60.0;

/// Viewport-derived table height, clamped to the usable range.
fn table_height(viewport_height: f64, header: f64, footer: f64, card_header: f64) -> f64 {
    let calculated = viewport_height - header - footer - card_header - TABLE_EXTRA_OFFSET;
    calculated.min(TABLE_MAX_HEIGHT).max(TABLE_MIN_HEIGHT)
}

/// Asks for confirmation before letting a `[data-confirm]` control act.
pub fn setup_confirm_guards(document: &Document) {
    for element in dom::query_all(document, "[data-confirm]") {
        let prompt = match element.get_attribute("data-confirm") {
            Some(p) => p,
            None => continue,
        };
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message(&prompt).ok())
                .unwrap_or(false);
            if !confirmed {
                event.prevent_default();
                event.stop_propagation();
            }
        }) as Box<dyn FnMut(_)>);
        let _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Dismisses the flash banners present at load after a fixed delay.
pub fn setup_flash_autodismiss(document: &Document) {
    for alert in dom::query_all(document, ".alert") {
        gloo_timers::callback::Timeout::new(FLASH_DISMISS_MS, move || {
            match alert.query_selector(".btn-close").ok().flatten() {
                Some(close) => {
                    if let Some(button) = close.dyn_ref::<HtmlElement>() {
                        button.click();
                    }
                }
                // No dismiss control to delegate to.
                None => alert.remove(),
            }
        })
        .forget();
    }
}

/// Footer clock, updated every second.
pub fn start_clock(document: &Document) {
    let clock = match document.get_element_by_id("current-time") {
        Some(c) => c,
        None => return,
    };
    let tick = {
        let clock = clock.clone();
        move || clock.set_text_content(Some(&format::format_date(&js_sys::Date::new_0())))
    };
    tick();
    gloo_timers::callback::Interval::new(CLOCK_TICK_MS, tick).forget();
}

fn offset_height_of(element: Option<Element>) -> Option<f64> {
    element
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        .map(|e| e.offset_height() as f64)
}

fn adjust_table_height(document: &Document, container: &HtmlElement) {
    let viewport_height = web_sys::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let header = offset_height_of(document.query_selector("header").ok().flatten())
        .unwrap_or(DEFAULT_HEADER_HEIGHT);
    let footer = offset_height_of(document.query_selector("footer").ok().flatten()).unwrap_or(0.0);
    let card_header = container
        .closest(".card")
        .ok()
        .flatten()
        .and_then(|card| card.query_selector(".card-header").ok().flatten())
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        .map(|e| e.offset_height() as f64)
        .unwrap_or(0.0);

    let height = table_height(viewport_height, header, footer, card_header);
    let _ = container
        .style()
        .set_property("height", &format!("{}px", height));
}

/// Sizes the scrollable task table to the viewport, at load and on resize.
pub fn setup_table_sizing(document: &Document) {
    let container = match document
        .query_selector(".task-table-container")
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    {
        Some(c) => c,
        None => return,
    };

    adjust_table_height(document, &container);

    let document = document.clone();
    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        adjust_table_height(&document, &container);
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_height_clamps_to_max() {
        assert_eq!(table_height(1_200.0, 60.0, 0.0, 0.0), 800.0);
    }

    #[test]
    fn test_table_height_clamps_to_min() {
        assert_eq!(table_height(500.0, 60.0, 40.0, 30.0), 400.0);
    }

    #[test]
    fn test_table_height_in_range() {
        assert_eq!(table_height(700.0, 60.0, 0.0, 40.0), 540.0);
    }
}
