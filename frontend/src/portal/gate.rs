use yew::prelude::*;

use crate::pricing::packages::PACKAGE_OPTIONS;

#[derive(Properties, PartialEq)]
pub struct GateProps {
    pub on_continue: Callback<u32>,
}

/// First step of a new order: pick one of the portal packages.
#[function_component(PackageGate)]
pub fn package_gate(props: &GateProps) -> Html {
    let selected = use_state(|| None::<u32>);

    let on_next = {
        let selected = selected.clone();
        let on_continue = props.on_continue.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(id) = *selected {
                on_continue.emit(id);
            }
        })
    };

    html! {
        <div class="gate-wrap">
            <div class="gate-inner">
                <h1 class="gate-title">{"Choose a Package"}</h1>
                <p class="gate-subtitle">{"Pick the plan that fits your shoot."}</p>
                <div class="gate-cards">
                    { for PACKAGE_OPTIONS.iter().map(|p| {
                        let id = p.id;
                        let active = *selected == Some(id);
                        let onclick = {
                            let selected = selected.clone();
                            Callback::from(move |_: MouseEvent| selected.set(Some(id)))
                        };
                        html! {
                            <button type="button" key={id}
                                class={classes!("plan", active.then(|| "active"))}
                                aria-pressed={active.to_string()} {onclick}>
                                <div class="plan-header">{p.name}</div>
                                <div class="plan-photos">{format!("{} photos", p.photos)}</div>
                                <div class="plan-price">{format!("${}", p.price)}</div>
                            </button>
                        }
                    }) }
                </div>
                <button type="button"
                    class={classes!("next-button", if selected.is_some() { "next-enabled" } else { "next-disabled" })}
                    disabled={selected.is_none()}
                    onclick={on_next}>
                    {"Next"}
                </button>
            </div>
        </div>
    }
}
