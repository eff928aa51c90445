pub mod abi;
pub mod app;
pub mod bridge;
pub mod config;
pub mod hooks;
pub mod network;
pub mod token;
pub mod tronlink;
pub mod views;

pub use abi::{AbiEntry, TokenAbi};
pub use bridge::{ClientHandle, TokenContract, WalletBridge, WalletPort};
pub use config::DashboardConfig;
pub use network::Network;
pub use token::{TokenMetadata, TxStatus};
pub use tronlink::{error::WalletError, TronContract, TronLink};
