use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::browser;
use crate::pricing::packages::{PricingAction, PricingContext};

/// A usable price: a finite, non-negative number.
pub fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}

#[function_component(PricingEditor)]
pub fn pricing_editor() -> Html {
    let catalog = use_context::<PricingContext>();
    let editing = use_state(|| None::<u32>);
    let temp_price = use_state(String::new);
    let Some(catalog) = catalog else {
        return html! { <p>{"Pricing is unavailable."}</p> };
    };

    let start_edit = |id: u32, price: f64| {
        let editing = editing.clone();
        let temp_price = temp_price.clone();
        Callback::from(move |_: MouseEvent| {
            editing.set(Some(id));
            temp_price.set(price.to_string());
        })
    };

    let save = |id: u32| {
        let editing = editing.clone();
        let temp_price = temp_price.clone();
        let catalog = catalog.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(price) = parse_price(&temp_price) else {
                browser::alert("Please enter a valid price");
                return;
            };
            catalog.dispatch(PricingAction::UpdatePrice { id, price });
            editing.set(None);
            temp_price.set(String::new());
        })
    };

    let cancel = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(None))
    };

    let on_price_input = {
        let temp_price = temp_price.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            temp_price.set(input.value());
        })
    };

    html! {
        <div class="pricing-form-wrapper">
            <div class="admin-card">
                <h4 class="admin-card-header">{"Package Pricing Editor"}</h4>
                <div class="table-wrapper">
                    <table class="pricing-table">
                        <thead>
                            <tr>
                                <th>{"Package"}</th>
                                <th>{"Photos"}</th>
                                <th>{"Turnaround"}</th>
                                <th>{"Price ($)"}</th>
                                <th>{"Actions"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            { for catalog.plans.iter().map(|plan| {
                                let is_editing = *editing == Some(plan.id);
                                html! {
                                    <tr key={plan.id}>
                                        <td data-label="Package">{&plan.name}</td>
                                        <td data-label="Photos">{&plan.photos}</td>
                                        <td data-label="Turnaround">{&plan.turnaround}</td>
                                        <td data-label="Price ($)">
                                            if is_editing {
                                                <input type="number" class="price-input"
                                                    value={(*temp_price).clone()} oninput={on_price_input.clone()} />
                                            } else {
                                                <span class="price-text">{plan.price_label()}</span>
                                            }
                                        </td>
                                        <td data-label="Actions">
                                            if is_editing {
                                                <div class="action-buttons">
                                                    <button class="save-button" onclick={save(plan.id)}>{"Save"}</button>
                                                    <button class="cancel-button" onclick={cancel.clone()}>{"Cancel"}</button>
                                                </div>
                                            } else {
                                                <button class="edit-button" onclick={start_edit(plan.id, plan.price)}>{"Edit"}</button>
                                            }
                                        </td>
                                    </tr>
                                }
                            }) }
                        </tbody>
                    </table>
                </div>
            </div>

            <div class="admin-card">
                <h4 class="admin-card-header">{"Pricing Preview"}</h4>
                <div class="pricing-preview">
                    { for catalog.plans.iter().map(|plan| html! {
                        <div class="pricing-card" key={plan.id}>
                            <h6 class="package-name">{&plan.name}</h6>
                            <div class="package-price">{plan.price_label()}</div>
                            <div class="package-details">
                                <span>{plan.photo_count_label()}</span>
                                <span>{&plan.turnaround}</span>
                            </div>
                        </div>
                    }) }
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_prices() {
        assert_eq!(parse_price("120"), Some(120.0));
        assert_eq!(parse_price(" 99.5 "), Some(99.5));
        assert_eq!(parse_price("0"), Some(0.0));
    }

    #[test]
    fn rejects_blank_and_non_numeric() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price("-5"), None);
        assert_eq!(parse_price("NaN"), None);
    }
}
