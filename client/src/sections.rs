//! Mutually exclusive form sections driven by a radio group. One generic
//! toggler, instantiated for the schedule-type, exec-mode, and script-mode
//! groups.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

use crate::dom;

/// Section revealed for a selected radio value, if any.
fn section_for<'a>(mapping: &'a [(String, String)], value: &str) -> Option<&'a str> {
    mapping
        .iter()
        .find(|(v, _)| v == value)
        .map(|(_, id)| id.as_str())
}

fn apply_selection(document: &Document, mapping: &[(String, String)], value: &str) {
    for (_, section_id) in mapping {
        if let Some(section) = document.get_element_by_id(section_id) {
            dom::add_class(&section, "d-none");
        }
    }
    if let Some(section_id) = section_for(mapping, value) {
        if let Some(section) = document.get_element_by_id(section_id) {
            dom::remove_class(&section, "d-none");
        }
    }
}

/// Binds one radio group to its value → section mapping. Does nothing when
/// the group or any managed section is missing from the page. Initial
/// visibility stays whatever the markup declares.
fn setup_section_toggle(document: &Document, group: &str, mapping: &[(&str, &str)]) {
    let radios = dom::query_all(document, &format!("input[name=\"{}\"]", group));
    if radios.is_empty() {
        return;
    }
    if mapping
        .iter()
        .any(|(_, id)| document.get_element_by_id(id).is_none())
    {
        return;
    }

    let mapping: Vec<(String, String)> = mapping
        .iter()
        .map(|(value, id)| (value.to_string(), id.to_string()))
        .collect();

    for radio in radios {
        let mapping = mapping.clone();
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let value = match event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            {
                Some(input) => input.value(),
                None => return,
            };
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                apply_selection(&document, &mapping, &value);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = radio.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn setup_schedule_type_sections(document: &Document) {
    setup_section_toggle(
        document,
        "schedule_type",
        &[("1", "interval_section"), ("2", "cron_section")],
    );
}

pub fn setup_exec_mode_sections(document: &Document) {
    setup_section_toggle(
        document,
        "exec_mode",
        &[("0", "command_section"), ("1", "script_section")],
    );
}

pub fn setup_script_mode_sections(document: &Document) {
    setup_section_toggle(
        document,
        "script_mode",
        &[
            ("content", "script_content_section"),
            ("file", "script_file_section"),
        ],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule_mapping() -> Vec<(String, String)> {
        vec![
            ("1".to_string(), "interval_section".to_string()),
            ("2".to_string(), "cron_section".to_string()),
        ]
    }

    #[test]
    fn test_mapped_values_reveal_their_section() {
        let mapping = schedule_mapping();
        assert_eq!(section_for(&mapping, "1"), Some("interval_section"));
        assert_eq!(section_for(&mapping, "2"), Some("cron_section"));
    }

    #[test]
    fn test_unmapped_values_reveal_nothing() {
        let mapping = schedule_mapping();
        assert_eq!(section_for(&mapping, "3"), None);
        assert_eq!(section_for(&mapping, ""), None);
    }
}
