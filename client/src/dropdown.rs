//! Keeps the per-row action menus inside the viewport of the scrollable
//! task table.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::dom;

/// Width the stylesheet gives the action menus; needed before the menu has
/// finished rendering.
const MENU_WIDTH: f64 = 220.0;
const VIEWPORT_MARGIN: f64 = 10.0;
const MIN_CAPPED_HEIGHT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAlign {
    Left,
    Right,
}

fn horizontal_align(toggle_left: f64, viewport_width: f64) -> MenuAlign {
    if toggle_left + MENU_WIDTH > viewport_width {
        MenuAlign::Right
    } else {
        MenuAlign::Left
    }
}

/// Flip above the toggle only when below is too tight and above is not.
fn flips_up(space_below: f64, space_above: f64, menu_height: f64) -> bool {
    space_below < menu_height && space_above > menu_height
}

/// Height cap for menus taller than the leftover viewport space, as long as
/// enough room remains to scroll in.
fn capped_height(menu_height: f64, space_below: f64) -> Option<f64> {
    let available = space_below - VIEWPORT_MARGIN;
    if menu_height > available && available > MIN_CAPPED_HEIGHT {
        Some(available)
    } else {
        None
    }
}

fn window_size() -> (f64, f64) {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return (0.0, 0.0),
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

fn position_menu(toggle: &Element, menu: &HtmlElement) {
    let rect = toggle.get_bounding_client_rect();
    let (viewport_width, viewport_height) = window_size();
    let style = menu.style();

    match horizontal_align(rect.left(), viewport_width) {
        MenuAlign::Right => {
            let _ = style.set_property("left", "auto");
            let _ = style.set_property("right", "0");
        }
        MenuAlign::Left => {
            let _ = style.set_property("left", "0");
            let _ = style.set_property("right", "auto");
        }
    }

    let menu_height = menu.offset_height() as f64;
    let space_below = viewport_height - rect.bottom();
    if flips_up(space_below, rect.top(), menu_height) {
        let _ = style.set_property("top", "auto");
        let _ = style.set_property("bottom", "100%");
        dom::add_class(menu, "dropdown-menu-up");
    } else {
        let _ = style.set_property("top", "100%");
        let _ = style.set_property("bottom", "auto");
        dom::remove_class(menu, "dropdown-menu-up");
    }

    if let Some(height) = capped_height(menu_height, space_below) {
        let _ = style.set_property("max-height", &format!("{}px", height));
        let _ = style.set_property("overflow-y", "auto");
    }
}

fn close_open_menus(document: &Document) {
    for menu in dom::query_all(document, ".dropdown-menu.show") {
        dom::remove_class(&menu, "show");
    }
}

/// Wires every action-cell dropdown: open on toggle click, reposition after
/// the open has rendered, close on table scroll and on outside clicks.
pub fn setup_action_dropdowns(document: &Document) {
    for dropdown in dom::query_all(document, ".actions-cell .dropdown") {
        let toggle = match dropdown.query_selector(".dropdown-toggle").ok().flatten() {
            Some(t) => t,
            None => continue,
        };
        let menu = match dropdown
            .query_selector(".dropdown-menu")
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        {
            Some(m) => m,
            None => continue,
        };

        let toggle_handle = toggle.clone();
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            event.stop_propagation();

            if dom::has_class(&menu, "show") {
                dom::remove_class(&menu, "show");
                return;
            }
            // One open menu at a time.
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                close_open_menus(&document);
            }
            dom::add_class(&menu, "show");

            // Let the open render before measuring the menu.
            let toggle = toggle_handle.clone();
            let menu = menu.clone();
            gloo_timers::callback::Timeout::new(0, move || {
                position_menu(&toggle, &menu);
            })
            .forget();
        }) as Box<dyn FnMut(_)>);
        let _ = toggle.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // One scroll handler per container closes whatever is open inside it.
    if let Ok(Some(container)) = document.query_selector(".task-table-container") {
        let container_handle = container.clone();
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            for menu in dom::query_all_within(&container_handle, ".dropdown-menu.show") {
                dom::remove_class(&menu, "show");
            }
        }) as Box<dyn FnMut(_)>);
        let _ =
            container.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Clicks outside any open menu close them all.
    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => return,
        };
        let target = event.target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
        for menu in dom::query_all(&document, ".dropdown-menu.show") {
            if !menu.contains(target.as_ref()) {
                dom::remove_class(&menu, "show");
            }
        }
    }) as Box<dyn FnMut(_)>);
    let _ = document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_anchor_on_viewport_overflow() {
        assert_eq!(horizontal_align(900.0, 1000.0), MenuAlign::Right);
        assert_eq!(horizontal_align(781.0, 1000.0), MenuAlign::Right);
    }

    #[test]
    fn test_left_anchor_otherwise() {
        assert_eq!(horizontal_align(100.0, 1000.0), MenuAlign::Left);
        assert_eq!(horizontal_align(780.0, 1000.0), MenuAlign::Left);
    }

    #[test]
    fn test_flips_up_only_when_above_fits() {
        assert!(flips_up(100.0, 400.0, 200.0));
        assert!(!flips_up(300.0, 400.0, 200.0));
        assert!(!flips_up(100.0, 150.0, 200.0));
    }

    #[test]
    fn test_height_cap() {
        assert_eq!(capped_height(500.0, 200.0), Some(190.0));
        assert_eq!(capped_height(100.0, 200.0), None);
        assert_eq!(capped_height(500.0, 90.0), None);
    }
}
