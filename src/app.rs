use crate::{
    hooks::{use_wallet_bridge, UseWalletBridge},
    views::Dashboard,
};
use yew::{function_component, html, Children, ContextProvider, Html, Properties};

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(BridgeProvider)]
pub fn bridge_provider(props: &Props) -> Html {
    let bridge = use_wallet_bridge();

    html! {
        <ContextProvider<UseWalletBridge> context={bridge}>
            {for props.children.iter()}
        </ContextProvider<UseWalletBridge>>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BridgeProvider>
            <Dashboard />
        </BridgeProvider>
    }
}
