use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::home::{Carousel, CarouselAction};
use crate::pricing::addons::{
    Bundle, PREMIUM_EDIT_PRICE, REEL_SPLIT_PRICE, REVISION_ROUND_PRICE, RUSH_12H_PRICE,
    TALK_THROUGH_PRICE, VOICEOVER_AI_PRICE,
};
use crate::pricing::packages::{tier_features, use_pricing_plans, PricingPlan};
use crate::Route;

struct CatalogItem {
    name: &'static str,
    price: u32,
    description: Option<&'static str>,
}

fn addon_groups() -> [(&'static str, Vec<CatalogItem>); 3] {
    [
        ("Narration", vec![
            CatalogItem {
                name: "Voiceover (AI-generated)",
                price: VOICEOVER_AI_PRICE,
                description: Some("Professional AI voice reading your script or property highlights."),
            },
            CatalogItem {
                name: "Talk-through narration",
                price: TALK_THROUGH_PRICE,
                description: Some("AI avatar walking into the scene or a digital avatar of the agent delivering a walkthrough."),
            },
        ]),
        ("Social", vec![CatalogItem {
            name: "Reel Split",
            price: REEL_SPLIT_PRICE,
            description: Some("Cuts your property video into 3 vertical reels (10–25 sec each)."),
        }]),
        ("Delivery & Editing", vec![
            CatalogItem { name: "Rush Delivery 12 hr turnaround", price: RUSH_12H_PRICE, description: None },
            CatalogItem { name: "Revisions (per extra round)", price: REVISION_ROUND_PRICE, description: None },
            CatalogItem {
                name: "Premium Edit",
                price: PREMIUM_EDIT_PRICE,
                description: Some("Adds advanced transitions, smoother pacing, and cinematic polish."),
            },
        ]),
    ]
}

pub fn bundle_description(bundle: Bundle) -> String {
    format!("{} → ${} value", bundle.blurb(), bundle.value())
}

fn plan_card(plan: &PricingPlan) -> Html {
    let video_length = tier_features(&plan.name).map_or("—", |f| f.video_length);
    html! {
        <div class={classes!("pricing-card", plan.popular.then_some("popular-card"))}>
            if plan.popular {
                <div class="popular-badge">{"Popular"}</div>
            }
            <div class="card-header"><h3 class="plan-name">{&plan.name}</h3></div>
            <div class="price-section"><div class="price">{plan.price_label()}</div></div>
            <div class="features-list">
                <div class="feature-item"><span class="check-icon">{"✓"}</span>{format!("Video Length: {}", video_length)}</div>
                <div class="feature-item"><span class="check-icon">{"✓"}</span>{format!("Photos: {}", plan.photo_count_label())}</div>
                <div class="feature-item"><span class="check-icon">{"✓"}</span>{format!("Turnaround: {}", plan.turnaround)}</div>
            </div>
        </div>
    }
}

fn catalog_item(item: &CatalogItem) -> Html {
    html! {
        <div class="addon-item" key={item.name}>
            <div class="addon-header">
                <span class="addon-name">{item.name}</span>
                <span class="addon-price">{format!("${}", item.price)}</span>
            </div>
            if let Some(description) = item.description {
                <p class="addon-description">{description}</p>
            }
        </div>
    }
}

#[function_component(PricingPage)]
pub fn pricing_page() -> Html {
    let plans = use_pricing_plans();
    let slider = use_reducer(|| Carousel::new(plans.len()));

    let go = |action: fn() -> CarouselAction| {
        let slider = slider.clone();
        Callback::from(move |_: MouseEvent| slider.dispatch(action()))
    };

    html! {
        <div class="pricing-page">
            <section class="pricing-section">
                <div class="section-heading">
                    <h2 class="section-title">{"Start here and scale up"}</h2>
                    <div class="title-underline"></div>
                    <p class="section-subtitle">{"Choose the plan that works best for your business needs"}</p>
                </div>
                <div class="pricing-cards">
                    { for plans.iter().map(|plan| html! {
                        <div class="pricing-col" key={plan.id}>{ plan_card(plan) }</div>
                    }) }
                </div>
                <div class="pricing-slider">
                    <button class="slider-arrow" onclick={go(|| CarouselAction::Prev)}>{"‹"}</button>
                    <button class="slider-arrow slider-arrow-right" onclick={go(|| CarouselAction::Next)}>{"›"}</button>
                    <div class="slider-track" style={format!("transform: translateX(-{}%)", slider.index * 100)}>
                        { for plans.iter().map(|plan| html! {
                            <div class="slide" key={plan.id}>{ plan_card(plan) }</div>
                        }) }
                    </div>
                    <p class="slide-hint">{"Slide for more packages"}</p>
                    <div class="slider-nav">
                        { for (0..plans.len()).map(|i| {
                            let slider = slider.clone();
                            let active = slider.index == i;
                            let onclick = Callback::from(move |_: MouseEvent| slider.dispatch(CarouselAction::Goto(i)));
                            html! { <div key={i} class={classes!("slider-dot", active.then_some("active"))} {onclick} /> }
                        }) }
                    </div>
                </div>

                <div class="addons-section">
                    <div class="section-heading">
                        <h2 class="section-title">{"Add More, Do More"}</h2>
                        <div class="title-underline"></div>
                        <p class="section-subtitle">{"Enhance your experience with these premium additions"}</p>
                    </div>
                    <div class="addons-grid">
                        { for addon_groups().iter().map(|(group, items)| html! {
                            <div class="addon-category" key={*group}>
                                <h3 class="category-title">{*group}</h3>
                                { for items.iter().map(catalog_item) }
                            </div>
                        }) }
                        <div class="addon-category bundles" key="bundles">
                            <h3 class="category-title">{"Bundles"}</h3>
                            { for Bundle::ALL.iter().map(|bundle| html! {
                                <div class="addon-item bundle-item" key={bundle.key()}>
                                    <div class="addon-header">
                                        <span class="addon-name">{bundle.name()}</span>
                                        <span class="addon-price">{format!("${}", bundle.price())}</span>
                                    </div>
                                    <p class="addon-description">{bundle_description(*bundle)}</p>
                                </div>
                            }) }
                        </div>
                    </div>
                    <div class="pricing-cta">
                        <Link<Route> to={Route::Portal} classes="cta-button">{"Start an order"}</Link<Route>>
                    </div>
                </div>
            </section>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundles_advertise_their_individual_value() {
        assert_eq!(
            bundle_description(Bundle::SocialBoost),
            "Reel Split + Voiceover + Rush Delivery → $130 value"
        );
        assert!(bundle_description(Bundle::FullMarketing).ends_with("$250 value"));
    }

    #[test]
    fn catalogue_lists_every_paid_addon() {
        let count: usize = addon_groups().iter().map(|(_, items)| items.len()).sum();
        assert_eq!(count, 6);
    }
}
