use std::rc::Rc;

use yew::prelude::*;

/// Packages a client can order from the portal.
#[derive(Clone, Debug, PartialEq)]
pub struct PackageOption {
    pub id: u32,
    pub name: &'static str,
    pub photos: &'static str,
    pub price: u32,
    pub min_photos: usize,
    pub max_photos: usize,
}

pub const PACKAGE_OPTIONS: [PackageOption; 3] = [
    PackageOption { id: 1, name: "Starter", photos: "5-10", price: 49, min_photos: 5, max_photos: 10 },
    PackageOption { id: 2, name: "Professional", photos: "11-20", price: 99, min_photos: 11, max_photos: 20 },
    PackageOption { id: 3, name: "Premium", photos: "21-30", price: 149, min_photos: 21, max_photos: 30 },
];

pub fn package_by_id(id: u32) -> Option<&'static PackageOption> {
    PACKAGE_OPTIONS.iter().find(|p| p.id == id)
}

/// Checks the number of picked photos against the package. Only the upper
/// bound is enforced; the lower bound is advisory.
pub fn validate_photo_count(package: &PackageOption, count: usize) -> Result<(), String> {
    if count == 0 {
        return Err("Please upload at least one photo.".to_string());
    }
    if count > package.max_photos {
        return Err(format!(
            "{} allows {}-{} photos. You selected {}.",
            package.name, package.min_photos, package.max_photos, count
        ));
    }
    Ok(())
}

/// Marketing catalogue, editable from the admin pricing screen.
#[derive(Clone, Debug, PartialEq)]
pub struct PricingPlan {
    pub id: u32,
    pub name: String,
    pub photos: String,
    pub price: f64,
    pub turnaround: String,
    pub popular: bool,
}

impl PricingPlan {
    fn new(id: u32, name: &str, photos: &str, price: f64, turnaround: &str, popular: bool) -> Self {
        Self {
            id,
            name: name.to_string(),
            photos: photos.to_string(),
            price,
            turnaround: turnaround.to_string(),
            popular,
        }
    }

    pub fn photo_count_label(&self) -> String {
        format!("{} photos", self.photos)
    }

    pub fn price_label(&self) -> String {
        format_price(self.price)
    }
}

pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("${}", price as i64)
    } else {
        format!("${:.2}", price)
    }
}

pub fn default_plans() -> Vec<PricingPlan> {
    vec![
        PricingPlan::new(1, "Express", "1-10", 60.0, "48 hours", false),
        PricingPlan::new(2, "Quick", "11-25", 100.0, "36 hours", true),
        PricingPlan::new(3, "Standard", "26-50", 130.0, "24 hours", false),
        PricingPlan::new(4, "Pro", "50+", 200.0, "Custom", false),
        PricingPlan::new(5, "Ultra", "50+", 280.0, "Custom", false),
    ]
}

pub struct TierFeatures {
    pub video_length: &'static str,
    pub photos_included: &'static str,
}

pub fn tier_features(plan_name: &str) -> Option<TierFeatures> {
    let (video_length, photos_included) = match plan_name {
        "Express" => ("30–45 seconds", "6–9 photos"),
        "Quick" => ("~60 seconds", "12 photos"),
        "Standard" => ("60–90 seconds", "12–18 photos"),
        "Pro" => ("90–120 seconds", "18–24 photos"),
        "Ultra" => ("120–150 seconds", "24–30 photos"),
        _ => return None,
    };
    Some(TierFeatures { video_length, photos_included })
}

/// Index of the neighbouring slide, wrapping at both ends.
pub fn wrap_slide(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

/// Session-wide pricing catalogue shared by the landing page, the pricing
/// page and the admin editor.
#[derive(Clone, Debug, PartialEq)]
pub struct PricingCatalog {
    pub plans: Vec<PricingPlan>,
}

impl Default for PricingCatalog {
    fn default() -> Self {
        Self { plans: default_plans() }
    }
}

pub enum PricingAction {
    UpdatePrice { id: u32, price: f64 },
}

impl Reducible for PricingCatalog {
    type Action = PricingAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            PricingAction::UpdatePrice { id, price } => {
                let plans = self
                    .plans
                    .iter()
                    .cloned()
                    .map(|plan| if plan.id == id { PricingPlan { price, ..plan } } else { plan })
                    .collect();
                Rc::new(PricingCatalog { plans })
            }
        }
    }
}

pub type PricingContext = UseReducerHandle<PricingCatalog>;

#[derive(Properties, PartialEq)]
pub struct PricingProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(PricingProvider)]
pub fn pricing_provider(props: &PricingProviderProps) -> Html {
    let catalog = use_reducer(PricingCatalog::default);
    html! {
        <ContextProvider<PricingContext> context={catalog}>
            { for props.children.iter() }
        </ContextProvider<PricingContext>>
    }
}

/// Current plans, falling back to the defaults outside a provider.
#[hook]
pub fn use_pricing_plans() -> Vec<PricingPlan> {
    use_context::<PricingContext>()
        .map(|catalog| catalog.plans.clone())
        .unwrap_or_else(default_plans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_limit_enforces_max_only() {
        let starter = package_by_id(1).unwrap();
        assert!(validate_photo_count(starter, 3).is_ok());
        assert!(validate_photo_count(starter, 10).is_ok());
        assert_eq!(
            validate_photo_count(starter, 11).unwrap_err(),
            "Starter allows 5-10 photos. You selected 11."
        );
        assert!(validate_photo_count(starter, 0).is_err());
    }

    #[test]
    fn unknown_package_id() {
        assert!(package_by_id(4).is_none());
        assert_eq!(package_by_id(3).unwrap().price, 149);
    }

    #[test]
    fn public_labels() {
        let plans = default_plans();
        assert_eq!(plans[1].photo_count_label(), "11-25 photos");
        assert_eq!(plans[1].price_label(), "$100");
        assert!(plans[1].popular);
        assert_eq!(format_price(99.5), "$99.50");
    }

    #[test]
    fn tier_features_by_name() {
        assert_eq!(tier_features("Quick").unwrap().video_length, "~60 seconds");
        assert!(tier_features("Mystery").is_none());
    }

    #[test]
    fn slider_wraps() {
        assert_eq!(wrap_slide(4, 5, true), 0);
        assert_eq!(wrap_slide(0, 5, false), 4);
        assert_eq!(wrap_slide(2, 5, false), 1);
        assert_eq!(wrap_slide(0, 0, true), 0);
    }

    #[test]
    fn price_update_touches_one_plan() {
        let catalog = Rc::new(PricingCatalog::default());
        let updated = catalog.reduce(PricingAction::UpdatePrice { id: 3, price: 145.0 });
        assert_eq!(updated.plans[2].price, 145.0);
        assert_eq!(updated.plans[0].price, 60.0);
        assert_eq!(updated.plans.len(), 5);
    }
}
