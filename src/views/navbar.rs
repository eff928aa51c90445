use crate::token::format_address;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub account: Option<String>,
    pub symbol: Option<String>,
    pub on_connect: Callback<MouseEvent>,
}

#[function_component(Navbar)]
pub fn navbar(props: &Props) -> Html {
    let menu_open = use_state(|| false);
    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };
    let brand = props.symbol.clone().unwrap_or_else(|| "TRC20".to_string());

    html! {
        <nav class="navbar">
            <div class="navbar-inner">
                <div class="navbar-brand">
                    <span class="navbar-logo">{ brand.chars().next().unwrap_or('T').to_string() }</span>
                    <span class="navbar-title">{ format!("{brand} Dashboard") }</span>
                </div>
                <div class="navbar-links">
                    <a href="#" class="active">{ "Dashboard" }</a>
                    <a href="#">{ "Explorer" }</a>
                    <a href="#">{ "Stats" }</a>
                    <a href="#">{ "Documentation" }</a>
                </div>
                <div class="navbar-wallet">
                    {
                        if let Some(account) = &props.account {
                            html! {
                                <div class="wallet-chip">
                                    <span class="wallet-chip-label">{ "Connected" }</span>
                                    <span class="wallet-chip-address">{ format_address(account) }</span>
                                </div>
                            }
                        } else {
                            html! {
                                <button class="connect-button" onclick={props.on_connect.clone()}>
                                    { "Connect TronLink" }
                                </button>
                            }
                        }
                    }
                    <button class="menu-toggle" onclick={toggle_menu}>
                        { if *menu_open { "✕" } else { "☰" } }
                    </button>
                </div>
            </div>
            {
                if *menu_open {
                    html! {
                        <div class="navbar-menu">
                            <a href="#" class="active">{ "Dashboard" }</a>
                            <a href="#">{ "Explorer" }</a>
                            <a href="#">{ "Stats" }</a>
                            <a href="#">{ "Documentation" }</a>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </nav>
    }
}
