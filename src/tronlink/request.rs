use wasm_bindgen::prelude::wasm_bindgen;

/// Payload handed to `tronLink.request`. The agent only inspects the method
/// name; account selection happens inside the extension UI.
#[wasm_bindgen]
#[derive(Debug)]
pub struct TronRequest {
    method: String,
}

#[wasm_bindgen]
impl TronRequest {
    pub(crate) fn new(method: String) -> TronRequest {
        TronRequest { method }
    }

    #[wasm_bindgen(getter)]
    pub fn method(&self) -> String {
        self.method.clone()
    }
}
