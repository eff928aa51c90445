use crate::token::format_balance;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub account: String,
    pub balance: Option<f64>,
    pub symbol: Option<String>,
}

#[function_component(AccountPanel)]
pub fn account_panel(props: &Props) -> Html {
    let balance = props
        .balance
        .map(format_balance)
        .unwrap_or_else(|| "N/A".to_string());
    let symbol = props.symbol.clone().unwrap_or_default();

    html! {
        <div class="card">
            <div class="card-header header-green">
                <h2>{ "Your Account" }</h2>
            </div>
            <div class="card-body">
                <div class="info-row">
                    <span class="info-label">{ "Address" }</span>
                    <span class="info-value mono">{ props.account.clone() }</span>
                </div>
                <div class="info-row balance-row">
                    <span class="info-label">{ "Balance" }</span>
                    <span class="balance-value">
                        { balance }
                        <span class="balance-symbol">{ symbol }</span>
                    </span>
                </div>
            </div>
        </div>
    }
}
