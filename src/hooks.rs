use crate::{
    bridge::WalletBridge,
    config::DashboardConfig,
    network::Network,
    tronlink::{ExtensionMessage, TronContract, TronLink},
};
use gloo::events::EventListener;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::MessageEvent;
use yew::{platform::spawn_local, prelude::*};
use yew_hooks::use_effect_once;

/// Shared handle to the wallet bridge. Clone-cheap; every mutation goes
/// through clone-update-set on the underlying state handle.
#[derive(Clone)]
pub struct UseWalletBridge {
    bridge: UseStateHandle<WalletBridge<TronLink>>,
}

impl PartialEq for UseWalletBridge {
    fn eq(&self, other: &Self) -> bool {
        self.bridge == other.bridge
    }
}

impl UseWalletBridge {
    /// Requests account access from the extension. Never throws; the outcome
    /// lands in the bridge state.
    pub fn connect(&self) {
        let handle = self.bridge.clone();
        spawn_local(async move {
            let mut bridge = (*handle).clone();
            bridge.connect().await;
            handle.set(bridge);
        });
    }

    fn refresh_account(&self) {
        let mut bridge = (*self.bridge).clone();
        bridge.refresh_account();
        self.bridge.set(bridge);
    }

    pub fn contract(&self) -> Option<TronContract> {
        self.bridge.contract().cloned()
    }

    pub fn account(&self) -> Option<String> {
        self.bridge.account().map(str::to_string)
    }

    pub fn is_connected(&self) -> bool {
        self.bridge.is_connected()
    }

    pub fn network(&self) -> Option<Network> {
        self.bridge.network()
    }

    pub fn error(&self) -> Option<String> {
        self.bridge.error().map(str::to_string)
    }

    pub fn loading(&self) -> bool {
        self.bridge.loading()
    }

    pub fn contract_address(&self) -> String {
        self.bridge.config().contract_address.clone()
    }
}

#[hook]
pub fn use_wallet_bridge() -> UseWalletBridge {
    let bridge = use_state(|| WalletBridge::new(TronLink, DashboardConfig::from_env()));
    let handle = UseWalletBridge { bridge };

    {
        let handle = handle.clone();
        use_effect_once(move || {
            let init = handle.clone();
            spawn_local(async move {
                let mut bridge = (*init.bridge).clone();
                bridge.initialize().await;
                init.bridge.set(bridge);
            });

            // The extension announces account switches on the window message
            // channel; the subscription lives until the provider unmounts.
            let listener = {
                let handle = handle.clone();
                EventListener::new(&gloo_utils::window(), "message", move |event| {
                    let Some(event) = event.dyn_ref::<MessageEvent>() else { return };
                    let Ok(message) =
                        serde_wasm_bindgen::from_value::<ExtensionMessage>(event.data())
                    else {
                        return;
                    };
                    if message.announces_account_change() {
                        debug!("account change announced by the extension");
                        handle.refresh_account();
                    }
                })
            };
            move || drop(listener)
        });
    }

    handle
}
