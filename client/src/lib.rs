use wasm_bindgen::prelude::*;

pub mod dom;
pub mod dropdown;
pub mod format;
pub mod page;
pub mod sections;
pub mod submit;
pub mod toast;
pub mod upload;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    log::info!("WASM client initialized");
    init_page();
}

/// Binds every page handler. Also exported so the page can re-run the
/// wiring after replacing document fragments dynamically. Each handler is a
/// no-op when its DOM anchors are absent.
#[wasm_bindgen]
pub fn init_page() {
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(d) => d,
        None => return,
    };

    page::setup_confirm_guards(&document);
    page::setup_flash_autodismiss(&document);
    page::start_clock(&document);
    page::setup_table_sizing(&document);

    sections::setup_schedule_type_sections(&document);
    sections::setup_exec_mode_sections(&document);
    sections::setup_script_mode_sections(&document);

    upload::setup_script_upload(&document);
    dropdown::setup_action_dropdowns(&document);

    log::info!("Page handlers initialized");
}
