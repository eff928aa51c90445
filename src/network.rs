use std::fmt::Display;

/// Network identity of the node a client handle talks to.
///
/// Purely informational. Derived from the RPC host string of the injected
/// client, or taken from configuration when running against the read-only
/// fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Shasta,
    Nile,
}

impl Network {
    /// Derives the network from a full-node host string.
    pub fn from_host(host: &str) -> Self {
        if host.contains("shasta") {
            Network::Shasta
        } else if host.contains("nile") {
            Network::Nile
        } else {
            Network::Mainnet
        }
    }

    /// Parses the build-time network selector. Anything that is not a known
    /// test network label selects mainnet.
    pub fn from_label(label: &str) -> Self {
        match label {
            "shasta" => Network::Shasta,
            "nile" => Network::Nile,
            _ => Network::Mainnet,
        }
    }

    /// Public full-node endpoint used for the read-only fallback client.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://api.trongrid.io",
            Network::Shasta => "https://api.shasta.trongrid.io",
            Network::Nile => "https://nile.trongrid.io",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Shasta => "shasta",
            Network::Nile => "nile",
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_network_from_host_substring() {
        assert_eq!(Network::from_host("https://api.shasta.trongrid.io"), Network::Shasta);
        assert_eq!(Network::from_host("https://nile.trongrid.io"), Network::Nile);
        assert_eq!(Network::from_host("https://api.trongrid.io"), Network::Mainnet);
        assert_eq!(Network::from_host("https://my-private-node:8090"), Network::Mainnet);
    }

    #[test]
    fn label_round_trips_through_config_parsing() {
        for network in [Network::Mainnet, Network::Shasta, Network::Nile] {
            assert_eq!(Network::from_label(network.label()), network);
        }
        assert_eq!(Network::from_label("something-else"), Network::Mainnet);
    }

    #[test]
    fn endpoints_match_their_network() {
        assert_eq!(Network::from_host(Network::Shasta.endpoint()), Network::Shasta);
        assert_eq!(Network::from_host(Network::Nile.endpoint()), Network::Nile);
        assert_eq!(Network::from_host(Network::Mainnet.endpoint()), Network::Mainnet);
    }
}
