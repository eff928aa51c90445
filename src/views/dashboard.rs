use crate::{
    abi::TokenAbi,
    hooks::UseWalletBridge,
    token::{fetch_metadata, FetchGeneration, TokenMetadata},
    views::{
        account_panel::AccountPanel, contract_info::ContractInfo, function_grid::FunctionGrid,
        navbar::Navbar, transfer_form::TransferForm,
    },
};
use yew::{platform::spawn_local, prelude::*};

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let bridge = use_context::<UseWalletBridge>().expect(
        "No wallet bridge found. You must wrap your components in a <BridgeProvider />",
    );

    let abi = use_memo((), |_| TokenAbi::trc20());
    let metadata = use_state(TokenMetadata::default);
    let refresh = use_state(|| 0u32);
    let generation = use_memo((), |_| FetchGeneration::default());

    {
        let metadata = metadata.clone();
        let abi = abi.clone();
        let generation = generation.clone();
        use_effect_with(
            (bridge.contract(), bridge.account(), *refresh),
            move |(contract, account, _)| {
                if let Some(contract) = contract.clone() {
                    let account = account.clone();
                    let tag = generation.begin();
                    spawn_local(async move {
                        let meta = fetch_metadata(&contract, &abi, account.as_deref()).await;
                        // A newer fetch may have started while this one was in
                        // flight; only the current generation may publish.
                        if generation.is_current(tag) {
                            metadata.set(meta);
                        }
                    });
                }
            },
        );
    }

    if bridge.loading() {
        return html! {
            <div class="loading-screen">
                <div class="spinner"></div>
                <p>{ "Loading data..." }</p>
            </div>
        };
    }

    let on_connect = {
        let bridge = bridge.clone();
        Callback::from(move |_: MouseEvent| bridge.connect())
    };
    let on_transferred = {
        let refresh = refresh.clone();
        Callback::from(move |_: ()| refresh.set(*refresh + 1))
    };

    let account = bridge.account();
    let read_functions = abi.read_functions();

    html! {
        <div class="dashboard">
            <Navbar
                account={account.clone()}
                symbol={metadata.symbol.clone()}
                on_connect={on_connect.clone()}
            />
            <main class="dashboard-content">
                <div class="dashboard-grid">
                    <aside class="dashboard-sidebar">
                        <ContractInfo
                            name={metadata.name.clone()}
                            symbol={metadata.symbol.clone()}
                            decimals={metadata.decimals}
                            address={bridge.contract_address()}
                            network={bridge.network()}
                        />
                        {
                            if let Some(account) = account.clone() {
                                html! {
                                    <AccountPanel
                                        account={account}
                                        balance={metadata.balance}
                                        symbol={metadata.symbol.clone()}
                                    />
                                }
                            } else {
                                html! {
                                    <div class="card">
                                        <div class="card-header header-amber">
                                            <h2>{ "Connection Required" }</h2>
                                        </div>
                                        <div class="card-body center">
                                            <p>{ "Connect your TronLink wallet to unlock every feature" }</p>
                                            <button class="connect-button" onclick={on_connect.clone()}>
                                                { "Connect TronLink" }
                                            </button>
                                        </div>
                                    </div>
                                }
                            }
                        }
                    </aside>
                    <section class="dashboard-main">
                        {
                            if let Some(error) = bridge.error() {
                                html! {
                                    <div class="error-banner">
                                        <h3>{ "Connection Issue" }</h3>
                                        <p>{ error }</p>
                                        <button onclick={on_connect.clone()}>{ "Connect TronLink" }</button>
                                    </div>
                                }
                            } else {
                                html! {}
                            }
                        }
                        {
                            if account.is_some() {
                                html! {
                                    <>
                                        <TransferForm
                                            contract={bridge.contract()}
                                            account={account.clone()}
                                            decimals={metadata.decimals}
                                            symbol={metadata.symbol.clone()}
                                            on_transferred={on_transferred}
                                        />
                                        {
                                            if let Some(contract) = bridge.contract() {
                                                html! {
                                                    <FunctionGrid
                                                        contract={contract}
                                                        functions={read_functions.clone()}
                                                    />
                                                }
                                            } else {
                                                html! {}
                                            }
                                        }
                                    </>
                                }
                            } else {
                                html! {}
                            }
                        }
                    </section>
                </div>
                <footer class="dashboard-footer">
                    <p>{ "TRC20 Dashboard | an interface for TRON token contracts" }</p>
                </footer>
            </main>
        </div>
    }
}
