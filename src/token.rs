use crate::{abi::TokenAbi, bridge::TokenContract, tronlink::error::WalletError};
use log::error;
use std::{cell::Cell, rc::Rc};

/// Token facts the dashboard derives from the contract handle. Every field is
/// optional; a contract that does not expose an entry point simply leaves the
/// matching field unavailable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenMetadata {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u32>,
    /// Account balance already scaled to a human-readable quantity.
    pub balance: Option<f64>,
}

/// Fetches the metadata fields independently. A single failing call is logged
/// and skipped without blocking the others. The balance is only read when an
/// account is connected, and the decimals value is read together with it so
/// the scaled quantity cannot pair a fresh balance with stale decimals.
pub async fn fetch_metadata<C: TokenContract>(
    contract: &C,
    abi: &TokenAbi,
    account: Option<&str>,
) -> TokenMetadata {
    let mut meta = TokenMetadata::default();

    if abi.has_function("name") {
        match contract.constant_call("name", &[]).await {
            Ok(value) => meta.name = Some(value),
            Err(err) => error!("failed to read the token name: {err}"),
        }
    }

    if abi.has_function("symbol") {
        match contract.constant_call("symbol", &[]).await {
            Ok(value) => meta.symbol = Some(value),
            Err(err) => error!("failed to read the token symbol: {err}"),
        }
    }

    if abi.has_function("decimals") {
        match contract.constant_call("decimals", &[]).await {
            Ok(value) => match value.trim().parse::<u32>() {
                Ok(decimals) => meta.decimals = Some(decimals),
                Err(_) => error!("decimals call returned a non-numeric value: {value}"),
            },
            Err(err) => error!("failed to read the token decimals: {err}"),
        }
    }

    if let Some(account) = account {
        if abi.has_function("balanceOf") {
            match contract.constant_call("balanceOf", &[account.to_string()]).await {
                Ok(raw) => {
                    let decimals = if abi.has_function("decimals") {
                        match contract.constant_call("decimals", &[]).await {
                            Ok(value) => value.trim().parse::<u32>().ok(),
                            Err(err) => {
                                error!("failed to read decimals for balance scaling: {err}");
                                None
                            }
                        }
                    } else {
                        Some(0)
                    };
                    if let Some(decimals) = decimals {
                        match scale_down(&raw, decimals) {
                            Some(balance) => meta.balance = Some(balance),
                            None => error!("balance call returned a non-numeric value: {raw}"),
                        }
                    }
                }
                Err(err) => error!("failed to read the account balance: {err}"),
            }
        }
    }

    meta
}

/// Scales a raw integer quantity down by 10^decimals. Float division; raw
/// amounts beyond 2^53 lose precision.
pub fn scale_down(raw: &str, decimals: u32) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    let scaled = value / 10f64.powi(decimals as i32);
    scaled.is_finite().then_some(scaled)
}

/// Scales a decimal amount up by 10^decimals and truncates to an integer
/// string. Float multiplication; inputs beyond 2^53 raw units lose precision.
/// Rejects negative and non-numeric input.
pub fn scale_up(amount: &str, decimals: u32) -> Option<String> {
    let value: f64 = amount.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let scaled = (value * 10f64.powi(decimals as i32)).trunc();
    if scaled >= u128::MAX as f64 {
        return None;
    }
    Some((scaled as u128).to_string())
}

/// Status of the latest transfer submission. Transient display state,
/// overwritten by each new submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxStatus {
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

impl TxStatus {
    pub fn text(&self) -> Option<String> {
        match self {
            TxStatus::Idle => None,
            TxStatus::Submitting => Some("Transaction in progress...".to_string()),
            TxStatus::Succeeded(txid) => Some(format!("Transaction confirmed. Hash: {txid}")),
            TxStatus::Failed(message) => Some(format!("Error: {message}")),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            TxStatus::Idle | TxStatus::Submitting => "status-info",
            TxStatus::Succeeded(_) => "status-success",
            TxStatus::Failed(_) => "status-error",
        }
    }
}

/// Submits a token transfer. Status phases are reported in order through
/// `on_status`: a guard failure reports `Failed` without touching the
/// network; otherwise `Submitting` is reported before the call and exactly
/// one of `Succeeded`/`Failed` after it. Returns whether the transfer went
/// through, so the caller can clear the form and refresh the balance.
pub async fn run_transfer<C, F>(
    contract: Option<&C>,
    account: Option<&str>,
    to: &str,
    amount: &str,
    decimals: u32,
    mut on_status: F,
) -> bool
where
    C: TokenContract,
    F: FnMut(TxStatus),
{
    let (Some(contract), Some(_account)) = (contract, account) else {
        on_status(TxStatus::Failed("Connect your TronLink wallet first".to_string()));
        return false;
    };
    on_status(TxStatus::Submitting);
    let Some(units) = scale_up(amount, decimals) else {
        on_status(TxStatus::Failed(format!("'{amount}' is not a valid amount")));
        return false;
    };
    match contract.send("transfer", &[to.to_string(), units]).await {
        Ok(txid) => {
            on_status(TxStatus::Succeeded(txid));
            true
        }
        Err(err) => {
            error!("transfer failed: {err}");
            on_status(TxStatus::Failed(err.to_string()));
            false
        }
    }
}

/// Runs a zero-argument read entry point and renders the outcome the way the
/// function grid presents it.
pub async fn execute_read<C: TokenContract>(contract: &C, name: &str) -> String {
    match contract.constant_call(name, &[]).await {
        Ok(result) => format!("{name}: {result}"),
        Err(err) => format!("Error: {err}"),
    }
}

/// Monotonically increasing generation counter. Each metadata fetch tags
/// itself with `begin()`; a fetch whose tag has been superseded must discard
/// its result instead of overwriting fresher state.
#[derive(Clone, Debug, Default)]
pub struct FetchGeneration(Rc<Cell<u64>>);

impl FetchGeneration {
    pub fn begin(&self) -> u64 {
        self.0.set(self.0.get() + 1);
        self.0.get()
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.0.get() == generation
    }
}

/// Shortens an account address for the navbar chip.
pub fn format_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

/// Renders a scaled balance with up to six fractional digits.
pub fn format_balance(balance: f64) -> String {
    let text = format!("{balance:.6}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::{
        collections::{HashMap, HashSet},
        sync::{Arc, Mutex},
    };

    #[derive(Clone, Default)]
    struct FakeToken {
        responses: Arc<Mutex<HashMap<String, String>>>,
        failing: Arc<Mutex<HashSet<String>>>,
        calls: Arc<Mutex<Vec<String>>>,
        sends: Arc<Mutex<Vec<(String, Vec<String>)>>>,
        send_fails: bool,
    }

    impl FakeToken {
        fn with(pairs: &[(&str, &str)]) -> Self {
            let token = Self::default();
            for (method, value) in pairs {
                token
                    .responses
                    .lock()
                    .unwrap()
                    .insert(method.to_string(), value.to_string());
            }
            token
        }

        fn fail(self, method: &str) -> Self {
            self.failing.lock().unwrap().insert(method.to_string());
            self
        }

        fn called(&self, method: &str) -> bool {
            self.calls.lock().unwrap().iter().any(|m| m == method)
        }
    }

    #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
    #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
    impl TokenContract for FakeToken {
        async fn constant_call(&self, method: &str, _args: &[String]) -> Result<String, WalletError> {
            self.calls.lock().unwrap().push(method.to_string());
            if self.failing.lock().unwrap().contains(method) {
                return Err(WalletError::JsValueError(format!("{method} reverted")));
            }
            self.responses
                .lock()
                .unwrap()
                .get(method)
                .cloned()
                .ok_or_else(|| WalletError::JsValueError(format!("{method} is not exposed")))
        }

        async fn send(&self, method: &str, args: &[String]) -> Result<String, WalletError> {
            self.sends.lock().unwrap().push((method.to_string(), args.to_vec()));
            if self.send_fails {
                Err(WalletError::JsValueError("insufficient balance".into()))
            } else {
                Ok("cafe1234".to_string())
            }
        }
    }

    fn full_token() -> FakeToken {
        FakeToken::with(&[
            ("name", "Tether USD"),
            ("symbol", "USDT"),
            ("decimals", "6"),
            ("balanceOf", "1000000"),
        ])
    }

    #[test]
    fn metadata_fields_populate_together() {
        let token = full_token();
        let meta = block_on(fetch_metadata(&token, &TokenAbi::trc20(), Some("TAbcDEF1234")));

        assert_eq!(meta.name.as_deref(), Some("Tether USD"));
        assert_eq!(meta.symbol.as_deref(), Some("USDT"));
        assert_eq!(meta.decimals, Some(6));
        assert_eq!(meta.balance, Some(1.0));
    }

    #[test]
    fn each_metadata_field_fails_in_isolation() {
        for broken in ["name", "symbol", "decimals"] {
            let token = full_token().fail(broken);
            let meta = block_on(fetch_metadata(&token, &TokenAbi::trc20(), Some("TAbcDEF1234")));

            assert_eq!(meta.name.is_some(), broken != "name");
            assert_eq!(meta.symbol.is_some(), broken != "symbol");
            assert_eq!(meta.decimals.is_some(), broken != "decimals");
        }

        let token = full_token().fail("balanceOf");
        let meta = block_on(fetch_metadata(&token, &TokenAbi::trc20(), Some("TAbcDEF1234")));
        assert_eq!(meta.balance, None);
        assert_eq!(meta.name.as_deref(), Some("Tether USD"));
    }

    #[test]
    fn balance_is_not_fetched_without_an_account() {
        let token = full_token();
        let meta = block_on(fetch_metadata(&token, &TokenAbi::trc20(), None));

        assert_eq!(meta.balance, None);
        assert!(!token.called("balanceOf"));
    }

    #[test]
    fn balance_without_a_decimals_entry_point_stays_unscaled() {
        let abi = TokenAbi::parse(
            r#"[{ "name": "balanceOf", "type": "function", "stateMutability": "view",
                  "inputs": [{ "name": "owner", "type": "address" }] }]"#,
        )
        .unwrap();
        let token = FakeToken::with(&[("balanceOf", "1500")]);
        let meta = block_on(fetch_metadata(&token, &abi, Some("TAbcDEF1234")));

        assert_eq!(meta.balance, Some(1500.0));
    }

    #[test]
    fn scaling_down_divides_by_ten_to_the_decimals() {
        assert_eq!(scale_down("1000000", 6), Some(1.0));
        assert_eq!(scale_down("2500000", 6), Some(2.5));
        assert_eq!(scale_down("1500", 0), Some(1500.0));
        assert_eq!(scale_down("not-a-number", 6), None);
    }

    #[test]
    fn scaling_up_truncates_to_an_integer_string() {
        assert_eq!(scale_up("2.5", 6).as_deref(), Some("2500000"));
        assert_eq!(scale_up("1", 0).as_deref(), Some("1"));
        assert_eq!(scale_up("0.0000001", 6).as_deref(), Some("0"));
        assert_eq!(scale_up("-1", 6), None);
        assert_eq!(scale_up("abc", 6), None);
    }

    #[test]
    fn transfer_guard_skips_the_network_entirely() {
        let token = full_token();
        let mut statuses = Vec::new();
        let ok = block_on(run_transfer(
            Some(&token),
            None,
            "TDest",
            "2.5",
            6,
            |status| statuses.push(status),
        ));

        assert!(!ok);
        assert!(matches!(statuses.as_slice(), [TxStatus::Failed(_)]));
        assert!(token.sends.lock().unwrap().is_empty());
    }

    #[test]
    fn transfer_submits_scaled_units_and_reports_success() {
        let token = full_token();
        let mut statuses = Vec::new();
        let ok = block_on(run_transfer(
            Some(&token),
            Some("TAbcDEF1234"),
            "TDestAddr5678",
            "2.5",
            6,
            |status| statuses.push(status),
        ));

        assert!(ok);
        assert_eq!(
            statuses,
            vec![TxStatus::Submitting, TxStatus::Succeeded("cafe1234".to_string())]
        );
        assert_eq!(
            token.sends.lock().unwrap().as_slice(),
            &[("transfer".to_string(), vec!["TDestAddr5678".to_string(), "2500000".to_string()])]
        );
    }

    #[test]
    fn transfer_failure_reports_submitting_then_failed() {
        let token = FakeToken { send_fails: true, ..full_token() };
        let mut statuses = Vec::new();
        let ok = block_on(run_transfer(
            Some(&token),
            Some("TAbcDEF1234"),
            "TDestAddr5678",
            "2.5",
            6,
            |status| statuses.push(status),
        ));

        assert!(!ok);
        assert!(matches!(
            statuses.as_slice(),
            [TxStatus::Submitting, TxStatus::Failed(_)]
        ));
    }

    #[test]
    fn resubmission_resets_the_status_sequence() {
        let token = full_token();
        let mut statuses = Vec::new();
        block_on(run_transfer(Some(&token), Some("TAbc"), "TDest", "bad", 6, |s| {
            statuses.push(s)
        }));
        assert!(matches!(statuses.last(), Some(TxStatus::Failed(_))));

        block_on(run_transfer(Some(&token), Some("TAbc"), "TDest", "1", 6, |s| {
            statuses.push(s)
        }));
        assert_eq!(statuses[2], TxStatus::Submitting);
        assert!(matches!(statuses[3], TxStatus::Succeeded(_)));
    }

    #[test]
    fn read_execution_formats_results_and_errors() {
        let token = full_token();
        assert_eq!(block_on(execute_read(&token, "symbol")), "symbol: USDT");
        let broken = full_token().fail("symbol");
        assert_eq!(block_on(execute_read(&broken, "symbol")), "Error: symbol reverted");
    }

    #[test]
    fn superseded_generations_are_discarded() {
        let generation = FetchGeneration::default();
        let first = generation.begin();
        assert!(generation.is_current(first));

        let second = generation.begin();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn addresses_shorten_for_the_navbar() {
        assert_eq!(
            format_address("TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t"),
            "TR7NHq...Lj6t"
        );
        assert_eq!(format_address("TShort"), "TShort");
    }

    #[test]
    fn balances_render_without_trailing_zeros() {
        assert_eq!(format_balance(1.0), "1");
        assert_eq!(format_balance(2.5), "2.5");
        assert_eq!(format_balance(0.000001), "0.000001");
        assert_eq!(format_balance(0.0), "0");
    }
}
