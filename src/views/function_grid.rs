use crate::{abi::AbiEntry, token::execute_read, tronlink::TronContract};
use gloo::dialogs::alert;
use yew::{platform::spawn_local, prelude::*};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub contract: TronContract,
    /// The declared read-only entry points of the contract.
    pub functions: Vec<AbiEntry>,
}

/// One button per discovered read-only entry point. Only zero-argument
/// entries are executable; the result (or failure) of a call is presented in
/// a blocking alert scoped to that call.
#[function_component(FunctionGrid)]
pub fn function_grid(props: &Props) -> Html {
    html! {
        <div class="card">
            <div class="card-header header-purple">
                <h2>{ "Contract Functions" }</h2>
            </div>
            <div class="card-body">
                <div class="function-grid">
                    { for props.functions.iter().map(|entry| {
                        let name = entry.name.clone();
                        let needs_arguments = !entry.takes_no_arguments();
                        let contract = props.contract.clone();
                        let onclick = Callback::from(move |_: MouseEvent| {
                            let contract = contract.clone();
                            let name = name.clone();
                            spawn_local(async move {
                                alert(&execute_read(&contract, &name).await);
                            });
                        });
                        html! {
                            <div class="function-card" key={entry.name.clone()}>
                                <h3 title={entry.name.clone()}>{ entry.name.clone() }</h3>
                                <button
                                    {onclick}
                                    disabled={needs_arguments}
                                    title={needs_arguments.then(|| "Takes arguments".to_string())}
                                >
                                    { "Execute (read)" }
                                </button>
                            </div>
                        }
                    }) }
                </div>
            </div>
        </div>
    }
}
