//! Date and duration rendering shared by the clock, the toasts, and the
//! task table templates.

use wasm_bindgen::prelude::*;

/// Renders an instant the way the UI displays timestamps: vi-VN locale,
/// 2-digit day/month and time fields, numeric year, host-local timezone.
#[wasm_bindgen(js_name = formatDate)]
pub fn format_date(date: &js_sys::Date) -> String {
    let options = js_sys::Object::new();
    for (key, value) in [
        ("day", "2-digit"),
        ("month", "2-digit"),
        ("year", "numeric"),
        ("hour", "2-digit"),
        ("minute", "2-digit"),
        ("second", "2-digit"),
    ] {
        let _ = js_sys::Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value));
    }
    date.to_locale_string("vi-VN", &options).into()
}

/// Decomposes a second count into the nonzero day/hour/minute/second parts,
/// joined with ", ". Zero and negative counts collapse to the zero phrase.
pub fn format_duration(total_seconds: i64) -> String {
    if total_seconds <= 0 {
        return "0 giây".to_string();
    }

    let days = total_seconds / 86_400;
    let mut rest = total_seconds % 86_400;
    let hours = rest / 3_600;
    rest %= 3_600;
    let minutes = rest / 60;
    let seconds = rest % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{} ngày", days));
    }
    if hours > 0 {
        parts.push(format!("{} giờ", hours));
    }
    if minutes > 0 {
        parts.push(format!("{} phút", minutes));
    }
    if seconds > 0 {
        parts.push(format!("{} giây", seconds));
    }
    parts.join(", ")
}

// Templates call this through `window`; numbers arrive as JS floats.
#[wasm_bindgen(js_name = formatDuration)]
pub fn format_duration_js(total_seconds: f64) -> String {
    format_duration(total_seconds as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_negative_durations() {
        assert_eq!(format_duration(0), "0 giây");
        assert_eq!(format_duration(-5), "0 giây");
    }

    #[test]
    fn test_all_components_in_order() {
        assert_eq!(format_duration(86_400 + 3_661), "1 ngày, 1 giờ, 1 phút, 1 giây");
    }

    #[test]
    fn test_seconds_only() {
        assert_eq!(format_duration(45), "45 giây");
    }

    #[test]
    fn test_zero_components_are_omitted() {
        assert_eq!(format_duration(3_600), "1 giờ");
        assert_eq!(format_duration(86_400), "1 ngày");
        assert_eq!(format_duration(3_725), "1 giờ, 2 phút, 5 giây");
    }

    #[test]
    fn test_truncates_instead_of_rounding() {
        assert_eq!(format_duration_js(59.9), "59 giây");
    }
}
