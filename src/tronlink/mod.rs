pub mod error;
pub mod request;
pub mod wallet;

use crate::{
    abi::TRC20_ABI,
    bridge::{ClientHandle, TokenContract, WalletPort},
    tronlink::{
        error::{ExtensionResponse, WalletError},
        request::TronRequest,
        wallet::{flatten_result_js, TronLinkAgent, TronWeb},
    },
};
use async_trait::async_trait;
use futures::channel::oneshot;
use gloo_utils::format::JsValueSerdeExt;
use js_sys::{Function, Promise, Reflect};
use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};

pub(crate) const ACCOUNTS_CHANGED: &str = "accountsChanged";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
// Everything this adapter needs lives on the window and is thread unsafe.
// To stay clear of Send and Sync trouble the injected handles are re-fetched
// whenever they are needed instead of being stored here.
pub struct TronLink;

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl WalletPort for TronLink {
    type Contract = TronContract;

    fn client_available(&self) -> bool {
        TronWeb::injected_opt().is_ok()
    }

    fn connector_available(&self) -> bool {
        TronLinkAgent::injected_opt().is_ok()
    }

    fn is_ready(&self) -> bool {
        TronWeb::injected_opt().map(|web| web.ready()).unwrap_or(false)
    }

    fn default_account(&self) -> Option<String> {
        TronWeb::injected_opt().ok()?.account_base58()
    }

    fn host(&self) -> Option<String> {
        TronWeb::injected_opt().ok()?.host()
    }

    async fn request_access(&self) -> Result<(), WalletError> {
        let (sender, receiver) = oneshot::channel();
        spawn_local(async move {
            _ = sender.send(request_access_js().await);
        });
        receiver.await.map_err(|_| WalletError::CommunicationError)?
    }

    fn build_read_only(&self, endpoint: &str) -> Result<ClientHandle, WalletError> {
        TronWeb::read_only(endpoint)?;
        Ok(ClientHandle::ReadOnly { endpoint: endpoint.to_string() })
    }

    fn bind_contract(
        &self,
        client: &ClientHandle,
        address: &str,
    ) -> Result<TronContract, WalletError> {
        // Building the JS object once up front catches a bad address or ABI
        // early; later calls rebuild it from the window on demand.
        contract_object(client, address)?;
        Ok(TronContract { client: client.clone(), address: address.to_string() })
    }
}

/// Handle bound to the token contract through some client. Holds plain data
/// only; the JS contract object is resolved per call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TronContract {
    client: ClientHandle,
    address: String,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl TokenContract for TronContract {
    async fn constant_call(&self, method: &str, args: &[String]) -> Result<String, WalletError> {
        self.invoke_detached(method, args, Invocation::Call).await
    }

    async fn send(&self, method: &str, args: &[String]) -> Result<String, WalletError> {
        self.invoke_detached(method, args, Invocation::Send).await
    }
}

impl TronContract {
    /// Runs the JS invocation on the local task queue and hands the
    /// stringified outcome back over a oneshot channel, keeping the calling
    /// future free of JS values.
    async fn invoke_detached(
        &self,
        method: &str,
        args: &[String],
        kind: Invocation,
    ) -> Result<String, WalletError> {
        let (sender, receiver) = oneshot::channel();
        let client = self.client.clone();
        let address = self.address.clone();
        let method = method.to_string();
        let args = args.to_vec();
        spawn_local(async move {
            _ = sender.send(invoke_js(&client, &address, &method, &args, kind).await);
        });
        receiver.await.map_err(|_| WalletError::CommunicationError)?
    }
}

#[derive(Clone, Copy, Debug)]
enum Invocation {
    Call,
    Send,
}

impl Invocation {
    fn as_str(&self) -> &'static str {
        match self {
            Invocation::Call => "call",
            Invocation::Send => "send",
        }
    }
}

fn resolve_client(client: &ClientHandle) -> Result<TronWeb, WalletError> {
    match client {
        ClientHandle::Injected => TronWeb::injected_opt(),
        ClientHandle::ReadOnly { endpoint } => TronWeb::read_only(endpoint),
    }
}

fn contract_object(client: &ClientHandle, address: &str) -> Result<JsValue, WalletError> {
    let web = resolve_client(client)?;
    let abi = js_sys::JSON::parse(TRC20_ABI).map_err(WalletError::from)?;
    web.contract(&abi, address).map_err(WalletError::from)
}

fn method_of(target: &JsValue, name: &str) -> Result<Function, WalletError> {
    Reflect::get(target, &JsValue::from_str(name))
        .map_err(WalletError::from)?
        .dyn_into::<Function>()
        .map_err(|_| WalletError::JsParseError)
}

async fn invoke_js(
    client: &ClientHandle,
    address: &str,
    method: &str,
    args: &[String],
    kind: Invocation,
) -> Result<String, WalletError> {
    let contract = contract_object(client, address)?;
    let entry = method_of(&contract, method)?;
    let call_args = js_sys::Array::new();
    for arg in args {
        call_args.push(&JsValue::from_str(arg));
    }
    let builder = entry.apply(&contract, &call_args).map_err(WalletError::from)?;
    let trigger = method_of(&builder, kind.as_str())?;
    let promise = trigger
        .call0(&builder)
        .map_err(WalletError::from)?
        .dyn_into::<Promise>()
        .map_err(|_| WalletError::JsParseError)?;
    let value = JsFuture::from(promise).await.map_err(WalletError::from)?;
    Ok(flatten_result_js(&value))
}

async fn request_access_js() -> Result<(), WalletError> {
    let agent = TronLinkAgent::injected_opt()?;
    let response = agent
        .request(TronRequest::new("tron_requestAccounts".to_string()))
        .await
        .map_err(WalletError::from)?;
    // TronLink resolves rejections as { code, message } instead of rejecting
    // the promise, so the payload has to be inspected.
    if let Ok(outcome) = response.into_serde::<ExtensionResponse>() {
        if let Some(code) = outcome.code {
            if code != 200 {
                return Err(WalletError::AccessDenied(
                    outcome
                        .message
                        .unwrap_or_else(|| format!("request refused with code {code}")),
                ));
            }
        }
    }
    Ok(())
}

/// Shape of the broadcast messages the extension posts on the window channel.
/// Anything that does not carry the account-change action discriminator is
/// ignored.
#[derive(Debug, Deserialize)]
pub struct ExtensionMessage {
    #[serde(default)]
    pub message: Option<MessageBody>,
}

#[derive(Debug, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub action: String,
}

impl ExtensionMessage {
    pub fn announces_account_change(&self) -> bool {
        self.message.as_ref().is_some_and(|body| body.action == ACCOUNTS_CHANGED)
    }
}
