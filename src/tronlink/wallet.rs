use crate::tronlink::{error::WalletError, request::TronRequest};
use js_sys::Reflect;
use wasm_bindgen::{prelude::wasm_bindgen, JsValue};

#[wasm_bindgen]
extern "C" {
    /// A TronWeb client handle. Injected by the extension at `window.tronWeb`,
    /// or constructed by the page itself for read-only mode.
    #[derive(Clone, Debug)]
    pub(crate) type TronWeb;

    #[wasm_bindgen(method, getter)]
    pub(crate) fn ready(_: &TronWeb) -> bool;

    #[wasm_bindgen(method, getter, js_name = "defaultAddress")]
    pub(crate) fn default_address(_: &TronWeb) -> JsValue;

    #[wasm_bindgen(method, getter, js_name = "fullNode")]
    pub(crate) fn full_node(_: &TronWeb) -> JsValue;

    #[wasm_bindgen(catch, method)]
    pub(crate) fn contract(_: &TronWeb, abi: &JsValue, address: &str) -> Result<JsValue, JsValue>;

    /// The connection agent the extension injects at `window.tronLink`
    #[derive(Clone, Debug)]
    pub(crate) type TronLinkAgent;

    #[wasm_bindgen(catch, method)]
    pub(crate) async fn request(_: &TronLinkAgent, args: TronRequest) -> Result<JsValue, JsValue>;
}

#[wasm_bindgen(
    inline_js = "export function get_tronweb_js() { return window.tronWeb }
export function get_tronlink_js() { return window.tronLink }
export function new_tronweb_js(node) { return typeof TronWeb === 'undefined' ? null : new TronWeb(node, node, node) }
export function flatten_result_js(value) {
    if (value === null || value === undefined) return '';
    if (typeof value === 'object' && typeof value.toString === 'function' && value.toString !== Object.prototype.toString) return value.toString();
    if (typeof value === 'object') return JSON.stringify(value);
    return String(value);
}"
)]
extern "C" {
    #[wasm_bindgen(catch)]
    fn get_tronweb_js() -> Result<Option<TronWeb>, JsValue>;

    #[wasm_bindgen(catch)]
    fn get_tronlink_js() -> Result<Option<TronLinkAgent>, JsValue>;

    #[wasm_bindgen(catch)]
    fn new_tronweb_js(node: &str) -> Result<Option<TronWeb>, JsValue>;

    /// Turns an arbitrary call result (string, number, BigNumber-ish object)
    /// into a display string.
    pub(crate) fn flatten_result_js(value: &JsValue) -> String;
}

impl TronWeb {
    pub(crate) fn injected_opt() -> Result<Self, WalletError> {
        if let Ok(Some(web)) = get_tronweb_js() {
            Ok(web)
        } else {
            Err(WalletError::NoClient)
        }
    }

    /// Builds a client against a public endpoint. Needs the TronWeb bundle on
    /// the page; without it there is nothing to construct.
    pub(crate) fn read_only(endpoint: &str) -> Result<Self, WalletError> {
        match new_tronweb_js(endpoint) {
            Ok(Some(web)) => Ok(web),
            Ok(None) => Err(WalletError::NoLibrary),
            Err(err) => Err(err.into()),
        }
    }

    /// Base58 form of the extension's default account. The extension reports
    /// `false` here while the wallet is locked, which reads back as `None`.
    pub(crate) fn account_base58(&self) -> Option<String> {
        Reflect::get(&self.default_address(), &JsValue::from_str("base58")).ok()?.as_string()
    }

    pub(crate) fn host(&self) -> Option<String> {
        Reflect::get(&self.full_node(), &JsValue::from_str("host")).ok()?.as_string()
    }
}

impl TronLinkAgent {
    pub(crate) fn injected_opt() -> Result<Self, WalletError> {
        if let Ok(Some(agent)) = get_tronlink_js() {
            Ok(agent)
        } else {
            Err(WalletError::NoExtension)
        }
    }
}
