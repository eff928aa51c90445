use crate::network::Network;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u32>,
    pub address: String,
    pub network: Option<Network>,
}

/// Contract facts panel. Fields the contract does not expose render as
/// placeholders; the configured address always renders.
#[function_component(ContractInfo)]
pub fn contract_info(props: &Props) -> Html {
    let name = props.name.clone().unwrap_or_else(|| "Not available".to_string());
    let symbol = props.symbol.clone().unwrap_or_else(|| "N/A".to_string());
    let decimals = props
        .decimals
        .map(|d| d.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    html! {
        <div class="card">
            <div class="card-header header-blue">
                <h2>{ "Contract Information" }</h2>
            </div>
            <div class="card-body">
                <div class="info-row">
                    <span class="info-label">{ "Token Name" }</span>
                    <span class="info-value">{ name }</span>
                </div>
                <div class="info-pair">
                    <div class="info-row">
                        <span class="info-label">{ "Symbol" }</span>
                        <span class="info-value">{ symbol }</span>
                    </div>
                    <div class="info-row">
                        <span class="info-label">{ "Decimals" }</span>
                        <span class="info-value">{ decimals }</span>
                    </div>
                </div>
                <div class="info-row">
                    <span class="info-label">{ "Contract Address" }</span>
                    <span class="info-value mono">{ props.address.clone() }</span>
                </div>
                {
                    if let Some(network) = props.network {
                        html! {
                            <div class="info-row">
                                <span class="info-label">{ "Network" }</span>
                                <span class="info-value">{ network.label() }</span>
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        </div>
    }
}
