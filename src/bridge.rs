use crate::{config::DashboardConfig, network::Network, tronlink::error::WalletError};
use async_trait::async_trait;
use log::{debug, error};
use std::fmt::Debug;

/// Descriptor of the client handle the bridge currently owns. Replaced
/// wholesale on reconnect. The JS object itself is never stored on the Rust
/// side; it is re-fetched from the window whenever a call needs it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientHandle {
    /// The extension's injected client.
    Injected,
    /// A client the page built itself against a public endpoint.
    ReadOnly { endpoint: String },
}

/// A handle bound to the token contract through some client.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait TokenContract {
    /// Invokes a read-only entry point and returns the raw result as a
    /// display string.
    async fn constant_call(&self, method: &str, args: &[String]) -> Result<String, WalletError>;

    /// Submits a state-mutating entry point as a signed transaction and
    /// returns the transaction id.
    async fn send(&self, method: &str, args: &[String]) -> Result<String, WalletError>;
}

/// What the bridge needs from the wallet extension and the client library.
/// The production implementation wraps the injected globals; tests drive the
/// bridge with a fake.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait WalletPort {
    type Contract: TokenContract + Clone + Debug + PartialEq + 'static;

    /// True when the extension has injected a client handle into the page.
    fn client_available(&self) -> bool;

    /// True when the extension's connection agent is reachable.
    fn connector_available(&self) -> bool;

    /// True when the injected client already has a default account selected.
    fn is_ready(&self) -> bool;

    fn default_account(&self) -> Option<String>;

    /// RPC host the injected client points at.
    fn host(&self) -> Option<String>;

    /// Asks the extension for account access. May be user-rejected.
    async fn request_access(&self) -> Result<(), WalletError>;

    /// Verifies a read-only client can be built against the endpoint.
    fn build_read_only(&self, endpoint: &str) -> Result<ClientHandle, WalletError>;

    /// Binds the token contract through the given client.
    fn bind_contract(
        &self,
        client: &ClientHandle,
        address: &str,
    ) -> Result<Self::Contract, WalletError>;
}

const INSTALL_PROMPT: &str =
    "Install the TronLink extension and connect it to unlock every feature of the dashboard.";
const NOT_INSTALLED: &str =
    "TronLink is not installed. Install the extension to connect a wallet.";

/// Owns the client handle, the detected network, the connected account and
/// the token contract handle. Every external call site isolates its own
/// failure; errors land in `error` as display strings and never escape.
#[derive(Clone, Debug, PartialEq)]
pub struct WalletBridge<P: WalletPort> {
    port: P,
    config: DashboardConfig,
    client: Option<ClientHandle>,
    contract: Option<P::Contract>,
    account: Option<String>,
    network: Option<Network>,
    error: Option<String>,
    loading: bool,
}

impl<P: WalletPort> WalletBridge<P> {
    pub fn new(port: P, config: DashboardConfig) -> Self {
        Self {
            port,
            config,
            client: None,
            contract: None,
            account: None,
            network: None,
            error: None,
            loading: true,
        }
    }

    /// Runs once per page load. Adopts the injected client when the extension
    /// is present, otherwise falls back to a read-only client on the
    /// configured network and surfaces the install prompt.
    pub async fn initialize(&mut self) {
        if self.port.client_available() {
            self.client = Some(ClientHandle::Injected);
            if let Some(host) = self.port.host() {
                let network = Network::from_host(&host);
                debug!("detected network {network} from host {host}");
                self.network = Some(network);
            }
            if self.port.is_ready() {
                self.account = self.port.default_account();
                debug!("extension ready, account: {:?}", self.account);
            }
        } else {
            self.network = Some(self.config.network);
            self.error = Some(INSTALL_PROMPT.to_string());
            match self.port.build_read_only(self.config.network.endpoint()) {
                Ok(client) => self.client = Some(client),
                Err(err) => {
                    error!("failed to build the read-only client: {err}");
                    self.error = Some(format!("Client error: {err}"));
                }
            }
        }
        self.bind_contract();
        // Loading ends exactly once, whatever happened above.
        self.loading = false;
    }

    /// User-triggered connection. Never throws to the caller; failures are
    /// reported through the error field only.
    pub async fn connect(&mut self) {
        if !self.port.connector_available() {
            self.error = Some(NOT_INSTALLED.to_string());
            return;
        }
        match self.port.request_access().await {
            Ok(()) => {
                if self.port.client_available() {
                    self.client = Some(ClientHandle::Injected);
                    if let Some(host) = self.port.host() {
                        self.network = Some(Network::from_host(&host));
                    }
                    self.account = self.port.default_account();
                    debug!("account after connection: {:?}", self.account);
                    self.contract = None;
                    self.error = None;
                    self.bind_contract();
                }
            }
            Err(err) => {
                error!("wallet connection failed: {err}");
                self.error = Some(format!("Connection error: {err}"));
            }
        }
    }

    /// Reaction to the extension's account-change broadcast. Re-reads the
    /// current default address and nothing else.
    pub fn refresh_account(&mut self) {
        if self.port.client_available() {
            self.account = self.port.default_account();
            debug!("account changed: {:?}", self.account);
        }
    }

    fn bind_contract(&mut self) {
        let Some(client) = &self.client else { return };
        match self.port.bind_contract(client, &self.config.contract_address) {
            Ok(contract) => self.contract = Some(contract),
            Err(err) => {
                error!("failed to bind the token contract: {err}");
                self.error = Some(format!("Contract error: {err}"));
            }
        }
    }

    pub fn contract(&self) -> Option<&P::Contract> {
        self.contract.as_ref()
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn network(&self) -> Option<Network> {
        self.network
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct FakeContract {
        client: ClientHandle,
        address: String,
    }

    #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
    #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
    impl TokenContract for FakeContract {
        async fn constant_call(&self, _: &str, _: &[String]) -> Result<String, WalletError> {
            Ok(String::new())
        }

        async fn send(&self, _: &str, _: &[String]) -> Result<String, WalletError> {
            Ok(String::new())
        }
    }

    #[derive(Clone, Default)]
    struct FakePort {
        client_injected: bool,
        connector: bool,
        ready: bool,
        account: Arc<Mutex<Option<String>>>,
        host: Option<String>,
        deny_access: bool,
        library_loaded: bool,
        break_contract: bool,
    }

    #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
    #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
    impl WalletPort for FakePort {
        type Contract = FakeContract;

        fn client_available(&self) -> bool {
            self.client_injected
        }

        fn connector_available(&self) -> bool {
            self.connector
        }

        fn is_ready(&self) -> bool {
            self.ready
        }

        fn default_account(&self) -> Option<String> {
            self.account.lock().unwrap().clone()
        }

        fn host(&self) -> Option<String> {
            self.host.clone()
        }

        async fn request_access(&self) -> Result<(), WalletError> {
            if self.deny_access {
                Err(WalletError::AccessDenied("user rejected".into()))
            } else {
                Ok(())
            }
        }

        fn build_read_only(&self, endpoint: &str) -> Result<ClientHandle, WalletError> {
            if self.library_loaded {
                Ok(ClientHandle::ReadOnly { endpoint: endpoint.to_string() })
            } else {
                Err(WalletError::NoLibrary)
            }
        }

        fn bind_contract(
            &self,
            client: &ClientHandle,
            address: &str,
        ) -> Result<FakeContract, WalletError> {
            if self.break_contract {
                Err(WalletError::JsValueError("contract bind failed".into()))
            } else {
                Ok(FakeContract { client: client.clone(), address: address.to_string() })
            }
        }
    }

    fn config() -> DashboardConfig {
        DashboardConfig {
            contract_address: "TXYZa1b2c3d4e5f6a7b8c9d0e1f2a3b4c5d6e7f8".into(),
            network: Network::Shasta,
        }
    }

    fn ready_port(account: &str) -> FakePort {
        FakePort {
            client_injected: true,
            connector: true,
            ready: true,
            account: Arc::new(Mutex::new(Some(account.to_string()))),
            host: Some("https://api.shasta.trongrid.io".into()),
            library_loaded: true,
            ..FakePort::default()
        }
    }

    #[test]
    fn initialize_without_extension_enters_read_only_mode() {
        let port = FakePort { library_loaded: true, ..FakePort::default() };
        let mut bridge = WalletBridge::new(port, config());

        block_on(bridge.initialize());

        assert!(!bridge.loading());
        assert_eq!(bridge.account(), None);
        assert_eq!(bridge.network(), Some(Network::Shasta));
        assert!(bridge.error().unwrap().contains("TronLink"));
        assert_eq!(
            bridge.client,
            Some(ClientHandle::ReadOnly { endpoint: Network::Shasta.endpoint().to_string() })
        );
        // Contract binds through the fallback client; the static address is
        // still inspectable.
        let contract = bridge.contract().unwrap();
        assert_eq!(contract.address, config().contract_address);
    }

    #[test]
    fn initialize_with_ready_extension_adopts_account_without_a_click() {
        let mut bridge = WalletBridge::new(ready_port("TAbcDEF1234"), config());

        block_on(bridge.initialize());

        assert_eq!(bridge.account(), Some("TAbcDEF1234"));
        assert_eq!(bridge.network(), Some(Network::Shasta));
        assert_eq!(bridge.client, Some(ClientHandle::Injected));
        assert_eq!(bridge.error(), None);
        assert!(!bridge.loading());
    }

    #[test]
    fn initialize_with_locked_extension_keeps_account_absent() {
        let port = FakePort { ready: false, ..ready_port("TAbcDEF1234") };
        let mut bridge = WalletBridge::new(port, config());

        block_on(bridge.initialize());

        assert_eq!(bridge.account(), None);
        assert_eq!(bridge.client, Some(ClientHandle::Injected));
    }

    #[test]
    fn initialize_survives_missing_client_library() {
        let mut bridge = WalletBridge::new(FakePort::default(), config());

        block_on(bridge.initialize());

        assert!(!bridge.loading());
        assert_eq!(bridge.client, None);
        assert!(bridge.contract().is_none());
        assert!(bridge.error().unwrap().contains("Client error"));
    }

    #[test]
    fn connect_without_extension_sets_error_and_keeps_account() {
        let port = FakePort { connector: false, ..ready_port("TAbcDEF1234") };
        let mut bridge = WalletBridge::new(port, config());
        block_on(bridge.initialize());
        assert_eq!(bridge.account(), Some("TAbcDEF1234"));

        block_on(bridge.connect());

        assert_eq!(bridge.account(), Some("TAbcDEF1234"));
        assert_eq!(bridge.error(), Some(NOT_INSTALLED));
    }

    #[test]
    fn connect_adopts_default_account_and_rebuilds_contract() {
        let port = FakePort { ready: false, ..ready_port("TAbcDEF1234") };
        let mut bridge = WalletBridge::new(port, config());
        block_on(bridge.initialize());
        assert_eq!(bridge.account(), None);

        block_on(bridge.connect());

        assert_eq!(bridge.account(), Some("TAbcDEF1234"));
        assert_eq!(bridge.error(), None);
        let contract = bridge.contract().unwrap();
        assert_eq!(contract.client, ClientHandle::Injected);
    }

    #[test]
    fn rejected_connection_is_reported_not_thrown() {
        let port = FakePort { deny_access: true, ready: false, ..ready_port("TAbcDEF1234") };
        let mut bridge = WalletBridge::new(port, config());
        block_on(bridge.initialize());

        block_on(bridge.connect());

        assert_eq!(bridge.account(), None);
        assert!(bridge.error().unwrap().contains("user rejected"));
    }

    #[test]
    fn contract_bind_failure_is_recorded_not_fatal() {
        let port = FakePort { break_contract: true, ..ready_port("TAbcDEF1234") };
        let mut bridge = WalletBridge::new(port, config());

        block_on(bridge.initialize());

        assert!(bridge.contract().is_none());
        assert!(bridge.error().unwrap().contains("Contract error"));
        assert_eq!(bridge.account(), Some("TAbcDEF1234"));
        assert!(!bridge.loading());
    }

    #[test]
    fn refresh_account_rereads_the_default_address() {
        let port = ready_port("TAbcDEF1234");
        let account = port.account.clone();
        let mut bridge = WalletBridge::new(port, config());
        block_on(bridge.initialize());

        *account.lock().unwrap() = Some("TNewOwner9876".to_string());
        bridge.refresh_account();

        assert_eq!(bridge.account(), Some("TNewOwner9876"));
    }
}
