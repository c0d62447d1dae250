//! Generic AJAX form submission with toast fallbacks.

use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, HtmlFormElement, Request, RequestInit, RequestMode, Response};

use crate::toast::{self, ToastKind};

/// Envelope every AJAX-capable route answers with. Routes may attach extra
/// fields; those stay available on the raw value handed to callbacks.
#[derive(Debug, Deserialize)]
pub struct AjaxResponse {
    pub success: bool,
    pub message: Option<String>,
}

pub struct SubmitOutcome {
    pub response: AjaxResponse,
    pub raw: JsValue,
}

/// One-shot submission of a form to its declared action and method, marked
/// as AJAX-originated. No retries.
pub async fn submit_form(form: &HtmlFormElement) -> Result<SubmitOutcome, JsValue> {
    let window = web_sys::window().ok_or("No window")?;

    let form_data = FormData::new_with_form(form)?;

    let opts = RequestInit::new();
    opts.set_method(&form.method());
    opts.set_mode(RequestMode::Cors);
    opts.set_body(form_data.as_ref());

    let request = Request::new_with_str_and_init(&form.action(), &opts)?;
    request.headers().set("X-Requested-With", "XMLHttpRequest")?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let json = JsFuture::from(resp.json()?).await?;
    let response: AjaxResponse = serde_wasm_bindgen::from_value(json.clone())?;

    Ok(SubmitOutcome {
        response,
        raw: json,
    })
}

fn connection_error_value() -> JsValue {
    let obj = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &obj,
        &JsValue::from_str("message"),
        &JsValue::from_str("Lỗi kết nối máy chủ"),
    );
    obj.into()
}

/// Drop-in replacement for inline `onsubmit` handlers: always returns false
/// so the native submission is suppressed while the request runs.
#[wasm_bindgen(js_name = submitFormAjax)]
pub fn submit_form_ajax(
    form: HtmlFormElement,
    on_success: Option<js_sys::Function>,
    on_error: Option<js_sys::Function>,
) -> bool {
    wasm_bindgen_futures::spawn_local(async move {
        match submit_form(&form).await {
            Ok(outcome) if outcome.response.success => match on_success {
                Some(callback) => {
                    let _ = callback.call1(&JsValue::NULL, &outcome.raw);
                }
                None => {
                    let message = outcome
                        .response
                        .message
                        .unwrap_or_else(|| "Thao tác thành công!".to_string());
                    toast::show_toast(&message, ToastKind::Success);
                }
            },
            Ok(outcome) => match on_error {
                Some(callback) => {
                    let _ = callback.call1(&JsValue::NULL, &outcome.raw);
                }
                None => {
                    let message = outcome
                        .response
                        .message
                        .unwrap_or_else(|| "Đã xảy ra lỗi!".to_string());
                    toast::show_toast(&message, ToastKind::Error);
                }
            },
            Err(e) => {
                log::error!("AJAX submit failed: {:?}", e);
                match on_error {
                    Some(callback) => {
                        let _ = callback.call1(&JsValue::NULL, &connection_error_value());
                    }
                    None => toast::show_toast("Lỗi kết nối máy chủ", ToastKind::Error),
                }
            }
        }
    });
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_extra_fields() {
        let response: AjaxResponse = serde_json::from_str(
            r#"{"success": true, "message": "ok", "task_id": 7, "next": "/tasks"}"#,
        )
        .unwrap();
        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_envelope_without_message() {
        let response: AjaxResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!response.success);
        assert!(response.message.is_none());
    }
}
