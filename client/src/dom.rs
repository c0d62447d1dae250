//! Small DOM helpers shared by the page handlers.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

/// Rebuilds a class string with `name` present exactly once.
pub fn class_with(classes: &str, name: &str) -> String {
    if classes.split_whitespace().any(|c| c == name) {
        return classes.trim().to_string();
    }
    let trimmed = classes.trim();
    if trimmed.is_empty() {
        name.to_string()
    } else {
        format!("{} {}", trimmed, name)
    }
}

/// Rebuilds a class string with every occurrence of `name` removed.
pub fn class_without(classes: &str, name: &str) -> String {
    classes
        .split_whitespace()
        .filter(|c| *c != name)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn has_class(element: &Element, name: &str) -> bool {
    element.class_name().split_whitespace().any(|c| c == name)
}

pub fn add_class(element: &Element, name: &str) {
    element.set_class_name(&class_with(&element.class_name(), name));
}

pub fn remove_class(element: &Element, name: &str) {
    element.set_class_name(&class_without(&element.class_name(), name));
}

/// Materializes a selector query into element handles. An invalid selector
/// yields an empty list.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let list = match document.query_selector_all(selector) {
        Ok(list) => list,
        Err(_) => return Vec::new(),
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Same as [`query_all`] but scoped to a subtree.
pub fn query_all_within(root: &Element, selector: &str) -> Vec<Element> {
    let list = match root.query_selector_all(selector) {
        Ok(list) => list,
        Err(_) => return Vec::new(),
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_with_appends_once() {
        assert_eq!(class_with("toast", "show"), "toast show");
        assert_eq!(class_with("toast show", "show"), "toast show");
        assert_eq!(class_with("", "show"), "show");
    }

    #[test]
    fn test_class_without_removes_all() {
        assert_eq!(class_without("toast show", "show"), "toast");
        assert_eq!(class_without("a show b show", "show"), "a b");
        assert_eq!(class_without("show", "show"), "");
    }

    #[test]
    fn test_class_without_leaves_similar_names() {
        assert_eq!(class_without("show showing", "show"), "showing");
    }
}
