use crate::{
    token::{run_transfer, TxStatus},
    tronlink::TronContract,
};
use web_sys::HtmlInputElement;
use yew::{platform::spawn_local, prelude::*};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub contract: Option<TronContract>,
    pub account: Option<String>,
    pub decimals: Option<u32>,
    pub symbol: Option<String>,
    /// Fired after a confirmed transfer so the balance can be re-fetched.
    pub on_transferred: Callback<()>,
}

#[function_component(TransferForm)]
pub fn transfer_form(props: &Props) -> Html {
    let to = use_state(String::new);
    let amount = use_state(String::new);
    let status = use_state(|| TxStatus::Idle);

    let on_to_input = {
        let to = to.clone();
        Callback::from(move |e: InputEvent| {
            to.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };
    let on_amount_input = {
        let amount = amount.clone();
        Callback::from(move |e: InputEvent| {
            amount.set(e.target_unchecked_into::<HtmlInputElement>().value());
        })
    };

    let onsubmit = {
        let to = to.clone();
        let amount = amount.clone();
        let status = status.clone();
        let contract = props.contract.clone();
        let account = props.account.clone();
        let decimals = props.decimals.unwrap_or(0);
        let on_transferred = props.on_transferred.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let to = to.clone();
            let amount = amount.clone();
            let status = status.clone();
            let contract = contract.clone();
            let account = account.clone();
            let on_transferred = on_transferred.clone();
            spawn_local(async move {
                let recipient = (*to).clone();
                let value = (*amount).clone();
                let ok = run_transfer(
                    contract.as_ref(),
                    account.as_deref(),
                    &recipient,
                    &value,
                    decimals,
                    |phase| status.set(phase),
                )
                .await;
                // The form only clears once the transfer went through.
                if ok {
                    to.set(String::new());
                    amount.set(String::new());
                    on_transferred.emit(());
                }
            });
        })
    };

    let symbol = props.symbol.clone().unwrap_or_default();

    html! {
        <div class="card">
            <div class="card-header header-indigo">
                <h2>{ "Transfer Tokens" }</h2>
            </div>
            <div class="card-body">
                <form {onsubmit} class="transfer-form">
                    <div class="form-fields">
                        <label>
                            { "Recipient Address" }
                            <input
                                type="text"
                                value={(*to).clone()}
                                oninput={on_to_input}
                                placeholder="Recipient TRX address"
                                required={true}
                            />
                        </label>
                        <label>
                            { "Amount" }
                            <div class="amount-field">
                                <input
                                    type="number"
                                    value={(*amount).clone()}
                                    oninput={on_amount_input}
                                    placeholder="0.00"
                                    step="any"
                                    min="0"
                                    required={true}
                                />
                                <span class="amount-symbol">{ symbol }</span>
                            </div>
                        </label>
                    </div>
                    <button type="submit" class="submit-button">{ "Transfer Tokens" }</button>
                    {
                        if let Some(text) = status.text() {
                            html! {
                                <div class={classes!("status-banner", status.css_class())}>
                                    { text }
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                </form>
            </div>
        </div>
    }
}
