use crate::network::Network;

/// USDT on Tron mainnet. Overridden at build time with `CONTRACT_ADDRESS`.
const DEFAULT_CONTRACT_ADDRESS: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";

/// Build-time configuration of the dashboard. Read once at startup; there is
/// no runtime reconfiguration surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Address of the token contract the dashboard is bound to.
    pub contract_address: String,
    /// Network the read-only fallback client points at when the extension is
    /// not installed.
    pub network: Network,
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self {
            contract_address: option_env!("CONTRACT_ADDRESS")
                .unwrap_or(DEFAULT_CONTRACT_ADDRESS)
                .to_string(),
            network: Network::from_label(option_env!("TRON_NETWORK").unwrap_or("mainnet")),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
