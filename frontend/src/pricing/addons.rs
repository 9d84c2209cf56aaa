use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const VOICEOVER_AI_PRICE: u32 = 30;
pub const TALK_THROUGH_PRICE: u32 = 80;
pub const REEL_SPLIT_PRICE: u32 = 50;
pub const EXTRA_REEL_PRICE: u32 = 10;
pub const RUSH_12H_PRICE: u32 = 50;
pub const REVISION_ROUND_PRICE: u32 = 10;
pub const PREMIUM_EDIT_PRICE: u32 = 40;

/// Individually priced add-ons that a bundle can cover.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddOn {
    VoiceoverAi,
    TalkThrough,
    ReelSplit,
    Rush12h,
    PremiumEdit,
}

impl AddOn {
    pub const ALL: [AddOn; 5] = [
        AddOn::VoiceoverAi,
        AddOn::TalkThrough,
        AddOn::ReelSplit,
        AddOn::Rush12h,
        AddOn::PremiumEdit,
    ];

    pub fn price(self) -> u32 {
        match self {
            AddOn::VoiceoverAi => VOICEOVER_AI_PRICE,
            AddOn::TalkThrough => TALK_THROUGH_PRICE,
            AddOn::ReelSplit => REEL_SPLIT_PRICE,
            AddOn::Rush12h => RUSH_12H_PRICE,
            AddOn::PremiumEdit => PREMIUM_EDIT_PRICE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AddOn::VoiceoverAi => "Voiceover AI",
            AddOn::TalkThrough => "Talk-through",
            AddOn::ReelSplit => "Reel Split",
            AddOn::Rush12h => "Rush 12h",
            AddOn::PremiumEdit => "Premium Edit",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Bundle {
    SocialBoost,
    AgentPresenter,
    FullMarketing,
}

impl Bundle {
    pub const ALL: [Bundle; 3] = [Bundle::SocialBoost, Bundle::AgentPresenter, Bundle::FullMarketing];

    pub fn key(self) -> &'static str {
        match self {
            Bundle::SocialBoost => "socialBoost",
            Bundle::AgentPresenter => "agentPresenter",
            Bundle::FullMarketing => "fullMarketing",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Bundle::SocialBoost => "Social Boost Pack",
            Bundle::AgentPresenter => "Agent Presenter Pack",
            Bundle::FullMarketing => "Full Marketing Pack",
        }
    }

    pub fn price(self) -> u32 {
        match self {
            Bundle::SocialBoost => 90,
            Bundle::AgentPresenter => 150,
            Bundle::FullMarketing => 200,
        }
    }

    pub fn includes(self) -> &'static [AddOn] {
        match self {
            Bundle::SocialBoost => &[AddOn::ReelSplit, AddOn::VoiceoverAi, AddOn::Rush12h],
            Bundle::AgentPresenter => &[AddOn::TalkThrough, AddOn::PremiumEdit],
            Bundle::FullMarketing => &AddOn::ALL,
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            Bundle::SocialBoost => "Reel Split + Voiceover + Rush Delivery",
            Bundle::AgentPresenter => "Talk-through narration + Premium Edit",
            Bundle::FullMarketing => "Everything in one pack",
        }
    }

    /// Sum of the individual prices this bundle replaces.
    pub fn value(self) -> u32 {
        self.includes().iter().map(|a| a.price()).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Horizontal,
    Vertical,
    Square,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Horizontal, OutputFormat::Vertical, OutputFormat::Square];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Horizontal => "horizontal",
            OutputFormat::Vertical => "vertical",
            OutputFormat::Square => "square",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Horizontal => "Horizontal",
            OutputFormat::Vertical => "Vertical",
            OutputFormat::Square => "Square",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        OutputFormat::ALL.into_iter().find(|f| f.as_str() == s)
    }
}

// An unset format travels as an empty string.
fn serialize_format<S: Serializer>(format: &Option<OutputFormat>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(format.map(OutputFormat::as_str).unwrap_or(""))
}

fn deserialize_format<'de, D: Deserializer<'de>>(d: D) -> Result<Option<OutputFormat>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.as_deref().and_then(OutputFormat::parse))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantity {
    ExtraReels,
    RevisionRounds,
}

/// Add-on choices for one order. The JSON shape is shared with the backend
/// and with the copy kept in localStorage across the Stripe redirect.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddOnSelection {
    #[serde(rename = "voiceoverAI")]
    pub voiceover_ai: bool,
    #[serde(rename = "talkThrough")]
    pub talk_through: bool,
    #[serde(rename = "reelSplit")]
    pub reel_split: bool,
    #[serde(rename = "rush12h")]
    pub rush_12h: bool,
    #[serde(rename = "premiumEdit")]
    pub premium_edit: bool,
    #[serde(rename = "extraReels")]
    pub extra_reels: u32,
    #[serde(rename = "revisionRounds")]
    pub revision_rounds: u32,
    pub bundle: Option<Bundle>,

    #[serde(rename = "freeSoundtrack")]
    pub free_soundtrack: bool,
    #[serde(rename = "freeBrandingOverlay")]
    pub free_branding_overlay: bool,
    #[serde(rename = "freeTitleCards")]
    pub free_title_cards: bool,
    #[serde(
        rename = "freeFormat",
        serialize_with = "serialize_format",
        deserialize_with = "deserialize_format"
    )]
    pub free_format: Option<OutputFormat>,
}

impl AddOnSelection {
    pub fn is_selected(&self, addon: AddOn) -> bool {
        match addon {
            AddOn::VoiceoverAi => self.voiceover_ai,
            AddOn::TalkThrough => self.talk_through,
            AddOn::ReelSplit => self.reel_split,
            AddOn::Rush12h => self.rush_12h,
            AddOn::PremiumEdit => self.premium_edit,
        }
    }

    fn flag_mut(&mut self, addon: AddOn) -> &mut bool {
        match addon {
            AddOn::VoiceoverAi => &mut self.voiceover_ai,
            AddOn::TalkThrough => &mut self.talk_through,
            AddOn::ReelSplit => &mut self.reel_split,
            AddOn::Rush12h => &mut self.rush_12h,
            AddOn::PremiumEdit => &mut self.premium_edit,
        }
    }

    pub fn covered(&self) -> BTreeSet<AddOn> {
        self.bundle
            .map(|b| b.includes().iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_covered(&self, addon: AddOn) -> bool {
        self.bundle.map_or(false, |b| b.includes().contains(&addon))
    }

    /// Checkbox state: a covered add-on always shows as checked.
    pub fn is_checked(&self, addon: AddOn) -> bool {
        self.is_selected(addon) || self.is_covered(addon)
    }

    /// Flips an add-on. Covered add-ons are locked while their bundle is on.
    pub fn toggle(&mut self, addon: AddOn) {
        if self.is_covered(addon) {
            return;
        }
        let flag = self.flag_mut(addon);
        *flag = !*flag;
    }

    pub fn adjust(&mut self, quantity: Quantity, delta: i32) {
        let value = match quantity {
            Quantity::ExtraReels => &mut self.extra_reels,
            Quantity::RevisionRounds => &mut self.revision_rounds,
        };
        *value = (*value as i64 + delta as i64).max(0) as u32;
    }

    /// Choosing the active bundle again clears it.
    pub fn set_bundle(&mut self, bundle: Option<Bundle>) {
        self.bundle = if self.bundle == bundle { None } else { bundle };
    }

    pub fn total(&self) -> u32 {
        let bundle_price = self.bundle.map_or(0, Bundle::price);
        let individual: u32 = AddOn::ALL
            .into_iter()
            .filter(|a| self.is_selected(*a) && !self.is_covered(*a))
            .map(AddOn::price)
            .sum();
        bundle_price
            + individual
            + self.extra_reels * EXTRA_REEL_PRICE
            + self.revision_rounds * REVISION_ROUND_PRICE
    }

    /// Bundle key sent to Stripe as `addon_type`.
    pub fn addon_type(&self) -> &'static str {
        self.bundle.map_or("custom", Bundle::key)
    }

    pub fn chips(&self) -> Vec<String> {
        let mut chips = Vec::new();
        if let Some(bundle) = self.bundle {
            chips.push(bundle.name().to_string());
        }
        for addon in AddOn::ALL {
            if self.is_selected(addon) {
                chips.push(addon.label().to_string());
            }
        }
        if self.extra_reels > 0 {
            let plural = if self.extra_reels > 1 { "s" } else { "" };
            chips.push(format!("+{} extra reel{}", self.extra_reels, plural));
        }
        if self.revision_rounds > 0 {
            let plural = if self.revision_rounds > 1 { "s" } else { "" };
            chips.push(format!("{} revision{}", self.revision_rounds, plural));
        }
        chips
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_is_free() {
        assert_eq!(AddOnSelection::default().total(), 0);
        assert_eq!(AddOnSelection::default().addon_type(), "custom");
    }

    #[test]
    fn individual_flags_and_quantities_add_up() {
        let mut a = AddOnSelection::default();
        a.toggle(AddOn::VoiceoverAi);
        a.toggle(AddOn::PremiumEdit);
        a.adjust(Quantity::ExtraReels, 2);
        a.adjust(Quantity::RevisionRounds, 1);
        assert_eq!(a.total(), 30 + 40 + 2 * 10 + 10);
    }

    #[test]
    fn bundle_price_replaces_covered_items() {
        let mut a = AddOnSelection::default();
        a.toggle(AddOn::VoiceoverAi);
        a.toggle(AddOn::TalkThrough);
        a.set_bundle(Some(Bundle::SocialBoost));
        // voiceover is covered, talk-through is not
        assert_eq!(a.total(), 90 + 80);
        assert_eq!(a.addon_type(), "socialBoost");
    }

    #[test]
    fn covered_addons_are_checked_and_locked() {
        let mut a = AddOnSelection::default();
        a.set_bundle(Some(Bundle::AgentPresenter));
        assert!(a.is_checked(AddOn::TalkThrough));
        assert!(a.is_checked(AddOn::PremiumEdit));
        assert!(!a.is_checked(AddOn::ReelSplit));

        a.toggle(AddOn::TalkThrough);
        assert!(!a.talk_through);
        assert_eq!(a.total(), 150);
    }

    #[test]
    fn full_marketing_covers_everything() {
        let mut a = AddOnSelection::default();
        for addon in AddOn::ALL {
            a.toggle(addon);
        }
        a.set_bundle(Some(Bundle::FullMarketing));
        a.adjust(Quantity::ExtraReels, 3);
        assert_eq!(a.covered().len(), 5);
        assert_eq!(a.total(), 200 + 30);
        assert_eq!(Bundle::FullMarketing.value(), 250);
    }

    #[test]
    fn reselecting_bundle_clears_it() {
        let mut a = AddOnSelection::default();
        a.set_bundle(Some(Bundle::SocialBoost));
        a.set_bundle(Some(Bundle::SocialBoost));
        assert_eq!(a.bundle, None);
        a.set_bundle(Some(Bundle::SocialBoost));
        a.set_bundle(Some(Bundle::FullMarketing));
        assert_eq!(a.bundle, Some(Bundle::FullMarketing));
    }

    #[test]
    fn quantities_saturate_at_zero() {
        let mut a = AddOnSelection::default();
        a.adjust(Quantity::RevisionRounds, -1);
        assert_eq!(a.revision_rounds, 0);
        a.adjust(Quantity::RevisionRounds, 2);
        a.adjust(Quantity::RevisionRounds, -1);
        assert_eq!(a.revision_rounds, 1);
    }

    #[test]
    fn free_options_do_not_change_total() {
        let mut a = AddOnSelection::default();
        a.free_soundtrack = true;
        a.free_title_cards = true;
        a.free_format = Some(OutputFormat::Vertical);
        assert_eq!(a.total(), 0);
    }

    #[test]
    fn json_keys_match_backend_contract() {
        let mut a = AddOnSelection::default();
        a.voiceover_ai = true;
        a.rush_12h = true;
        a.bundle = Some(Bundle::AgentPresenter);
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["voiceoverAI"], true);
        assert_eq!(json["rush12h"], true);
        assert_eq!(json["bundle"], "agentPresenter");
        assert_eq!(json["freeFormat"], "");
        assert_eq!(json["extraReels"], 0);
    }

    #[test]
    fn stored_selection_reads_back() {
        let raw = r#"{"voiceoverAI":false,"talkThrough":true,"reelSplit":false,"rush12h":false,
            "premiumEdit":false,"extraReels":1,"revisionRounds":0,"bundle":null,
            "freeSoundtrack":true,"freeBrandingOverlay":false,"freeTitleCards":false,"freeFormat":"square"}"#;
        let a: AddOnSelection = serde_json::from_str(raw).unwrap();
        assert!(a.talk_through);
        assert_eq!(a.extra_reels, 1);
        assert_eq!(a.free_format, Some(OutputFormat::Square));
        assert_eq!(a.total(), 90);
    }

    #[test]
    fn chips_describe_selection() {
        let mut a = AddOnSelection::default();
        assert!(a.chips().is_empty());
        a.set_bundle(Some(Bundle::SocialBoost));
        a.toggle(AddOn::PremiumEdit);
        a.adjust(Quantity::ExtraReels, 1);
        a.adjust(Quantity::RevisionRounds, 2);
        assert_eq!(
            a.chips(),
            vec!["Social Boost Pack", "Premium Edit", "+1 extra reel", "2 revisions"]
        );
    }
}
