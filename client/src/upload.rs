//! Script-file upload bound to the task form's file input.

use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, FormData, HtmlInputElement, Request, RequestInit, RequestMode, Response};

/// Response shape of `POST /api/upload_script`.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub file_path: Option<String>,
    pub original_filename: Option<String>,
    pub message: Option<String>,
}

fn set_upload_status(document: &Document, html: &str) {
    if let Some(status) = document.get_element_by_id("upload_status") {
        status.set_inner_html(html);
    }
}

fn render_result(document: &Document, response: &UploadResponse) {
    if response.success {
        let file_path = response.file_path.as_deref().unwrap_or_default();
        if let Some(field) = document
            .get_element_by_id("script_file")
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
        {
            field.set_value(file_path);
        }
        let filename = response.original_filename.as_deref().unwrap_or_default();
        set_upload_status(
            document,
            &format!(
                r#"<div class="alert alert-success">
  <i class="fas fa-check-circle me-2"></i>
  File <strong>{}</strong> đã được tải lên thành công.
  <div class="mt-1 small">Đường dẫn: {}</div>
</div>"#,
                filename, file_path
            ),
        );
    } else {
        let message = response.message.as_deref().unwrap_or_default();
        set_upload_status(
            document,
            &format!(
                r#"<div class="alert alert-danger"><i class="fas fa-times-circle me-2"></i>Lỗi: {}</div>"#,
                message
            ),
        );
    }
}

fn render_transport_failure(document: &Document) {
    set_upload_status(
        document,
        r#"<div class="alert alert-danger"><i class="fas fa-times-circle me-2"></i>Lỗi khi tải lên file. Vui lòng thử lại sau.</div>"#,
    );
}

async fn upload_script_file(file: &web_sys::File) -> Result<UploadResponse, JsValue> {
    let window = web_sys::window().ok_or("No window")?;

    let form_data = FormData::new()?;
    form_data.append_with_blob("script_file", file)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    // No explicit Content-Type: the browser sets the multipart boundary.
    opts.set_body(form_data.as_ref());

    let url = format!(
        "{}/api/upload_script",
        window
            .location()
            .origin()
            .map_err(|_| JsValue::from_str("No origin"))?
    );

    let request = Request::new_with_str_and_init(&url, &opts)?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let json = JsFuture::from(resp.json()?).await?;
    let response: UploadResponse = serde_wasm_bindgen::from_value(json)?;
    Ok(response)
}

/// Uploads the chosen script on every change of `#script_file_upload`. The
/// input stays disabled while a request is in flight so a second selection
/// cannot race the first.
pub fn setup_script_upload(document: &Document) {
    let input = match document
        .get_element_by_id("script_file_upload")
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
    {
        Some(input) => input,
        None => return,
    };

    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let input = match event
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        {
            Some(input) => input,
            None => return,
        };
        let file = match input.files().and_then(|files| files.get(0)) {
            Some(file) => file,
            None => return,
        };
        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => return,
        };

        set_upload_status(
            &document,
            r#"<div class="alert alert-info">Đang tải lên file...</div>"#,
        );
        input.set_disabled(true);

        wasm_bindgen_futures::spawn_local(async move {
            let result = upload_script_file(&file).await;
            input.set_disabled(false);
            match result {
                Ok(response) => render_result(&document, &response),
                Err(e) => {
                    log::error!("Script upload failed: {:?}", e);
                    render_transport_failure(&document);
                }
            }
        });
    }) as Box<dyn FnMut(_)>);

    let _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
    closure.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_response_shape() {
        let response: UploadResponse = serde_json::from_str(
            r#"{"success": true, "file_path": "/x", "original_filename": "a.sh"}"#,
        )
        .unwrap();
        assert!(response.success);
        assert_eq!(response.file_path.as_deref(), Some("/x"));
        assert_eq!(response.original_filename.as_deref(), Some("a.sh"));
        assert!(response.message.is_none());
    }

    #[test]
    fn test_failure_response_shape() {
        let response: UploadResponse =
            serde_json::from_str(r#"{"success": false, "message": "bad file"}"#).unwrap();
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("bad file"));
        assert!(response.file_path.is_none());
    }
}
