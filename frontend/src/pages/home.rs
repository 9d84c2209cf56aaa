use std::rc::Rc;

use gloo_timers::callback::Interval;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::pricing::packages::{tier_features, use_pricing_plans, wrap_slide, PricingPlan};
use crate::Route;

pub const COMPARISON_INTERVAL_MS: u32 = 6_000;
pub const STEP_INTERVAL_MS: u32 = 5_000;

/// Index into a fixed number of slides.
#[derive(Clone, Debug, PartialEq)]
pub struct Carousel {
    pub index: usize,
    pub len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }
}

pub enum CarouselAction {
    Next,
    Prev,
    Goto(usize),
}

impl Reducible for Carousel {
    type Action = CarouselAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let index = match action {
            CarouselAction::Next => wrap_slide(self.index, self.len, true),
            CarouselAction::Prev => wrap_slide(self.index, self.len, false),
            CarouselAction::Goto(i) if i < self.len => i,
            CarouselAction::Goto(_) => self.index,
        };
        Rc::new(Carousel { index, len: self.len })
    }
}

#[function_component(Hero)]
fn hero() -> Html {
    html! {
        <section class="hero">
            <img src="/assets/images/clouds.png" alt="Clouds" class="hero-clouds" />
            <div class="hero-content">
                <h1>{"Turn Listing Photos Into Cinematic Walkthrough Videos for a fraction of the Price"}</h1>
                <p>{"AI-edited property videos delivered in 24-48 hours."}</p>
                <div class="hero-buttons">
                    <Link<Route> to={Route::Portal} classes="hero-button primary">{"Get Started"}</Link<Route>>
                </div>
            </div>
            <img src="/assets/images/house.png" alt="House" class="hero-house" />
        </section>
    }
}

const CLIENT_LOGOS: [(&str, &str, &str); 10] = [
    ("BHHS", "bhhs", "#004B93"),
    ("Century", "century", "#FF6B6B"),
    ("Coldwell", "coldwell", "#00A86B"),
    ("Compass", "compass", "#7C4DFF"),
    ("EXP", "exp", "#FF8A00"),
    ("Pacific", "pacific", "#00AEEF"),
    ("Re/Max", "remax", "#E11D48"),
    ("Towne", "towne", "#0EA5A4"),
    ("Whissel", "whissel", "#F59E0B"),
    ("Willis", "willis", "#3B82F6"),
];

#[function_component(ClientLogos)]
fn client_logos() -> Html {
    // Rendered twice so the marquee loops without a gap.
    let logo = |pass: usize, (name, file, accent): (&'static str, &'static str, &'static str)| html! {
        <div class="logo-item" key={format!("{}-{}", name, pass)} aria-label={name}
            style={format!("--accent: {}", accent)}>
            <img src={format!("/assets/logos/{}.png", file)} alt={name} loading="lazy" />
        </div>
    };
    html! {
        <section class="client-logos">
            <h2 class="section-title">{"Trusted by agents at"}</h2>
            <div class="logo-marquee">
                <div class="logo-track">
                    { for CLIENT_LOGOS.iter().map(|l| logo(0, *l)) }
                    { for CLIENT_LOGOS.iter().map(|l| logo(1, *l)) }
                </div>
            </div>
        </section>
    }
}

struct Comparison {
    photo: &'static str,
    video: &'static str,
}

const COMPARISONS: [Comparison; 2] = [
    Comparison { photo: "/assets/images/before1.png", video: "/assets/videos/before1.mp4" },
    Comparison { photo: "/assets/images/before2.png", video: "/assets/videos/before2.mp4" },
];

/// Whether autoplay may advance at `now_ms`, given the last manual move.
pub fn autoplay_allowed(last_manual_ms: Option<f64>, now_ms: f64, interval_ms: u32) -> bool {
    match last_manual_ms {
        Some(at) => now_ms - at >= f64::from(interval_ms) * 2.0,
        None => true,
    }
}

#[function_component(VideoComparison)]
fn video_comparison() -> Html {
    let carousel = use_reducer(|| Carousel::new(COMPARISONS.len()));
    let last_manual = use_mut_ref(|| None::<f64>);

    {
        let carousel = carousel.clone();
        let last_manual = last_manual.clone();
        use_effect_with_deps(
            move |_| {
                let interval = Interval::new(COMPARISON_INTERVAL_MS, move || {
                    let now = js_sys::Date::now();
                    if autoplay_allowed(*last_manual.borrow(), now, COMPARISON_INTERVAL_MS) {
                        carousel.dispatch(CarouselAction::Next);
                    }
                });
                move || drop(interval)
            },
            (),
        );
    }

    let step = |forward: bool| {
        let carousel = carousel.clone();
        let last_manual = last_manual.clone();
        Callback::from(move |_: MouseEvent| {
            *last_manual.borrow_mut() = Some(js_sys::Date::now());
            carousel.dispatch(if forward { CarouselAction::Next } else { CarouselAction::Prev });
        })
    };

    let current = &COMPARISONS[carousel.index];

    html! {
        <section class="video-comparison">
            <div class="comparison-heading">
                <h2 class="section-title">{"From Photo to Cinematic Video"}</h2>
                <p class="section-subtitle">{"See how we transform static property photos into engaging videos"}</p>
            </div>
            <div class="comparison-frame">
                <div class="comparison-side">
                    <span class="comparison-label">{"Before"}</span>
                    <img src={current.photo} alt="Listing photo" />
                </div>
                <div class="comparison-side">
                    <span class="comparison-label">{"After"}</span>
                    // Keyed by slide so the element reloads its source.
                    <video key={carousel.index} src={current.video} autoplay=true muted=true loop=true playsinline=true />
                </div>
            </div>
            <div class="comparison-controls">
                <button class="slider-arrow" onclick={step(false)} aria-label="Previous">{"‹"}</button>
                <div class="slider-dots">
                    { for (0..COMPARISONS.len()).map(|i| html! {
                        <span key={i} class={classes!("slider-dot", (i == carousel.index).then_some("active"))}></span>
                    }) }
                </div>
                <button class="slider-arrow" onclick={step(true)} aria-label="Next">{"›"}</button>
            </div>
        </section>
    }
}

const STEPS: [(&str, &str, &str); 3] = [
    ("fa-cloud-arrow-up", "Upload your listing photos", "Select and upload the photos for your property."),
    ("fa-film", "AI editing creates your videos", "Our AI tools stitch together cinematic walkthroughs."),
    ("fa-download", "Download & post in 24–48 hours", "Receive your video and share it anywhere."),
];

#[function_component(HowItWorks)]
fn how_it_works() -> Html {
    let active = use_reducer(|| Carousel::new(STEPS.len()));

    {
        let active = active.clone();
        use_effect_with_deps(
            move |_| {
                let interval = Interval::new(STEP_INTERVAL_MS, move || active.dispatch(CarouselAction::Next));
                move || drop(interval)
            },
            (),
        );
    }

    html! {
        <section class="how-it-works" id="how-it-works">
            <h2 class="section-title">{"How It Works"}</h2>
            <p class="section-subtitle">{"Watch the process unfold"}</p>
            <div class="steps">
                { for STEPS.iter().enumerate().map(|(i, (icon, title, description))| {
                    let select = {
                        let active = active.clone();
                        Callback::from(move |_: MouseEvent| active.dispatch(CarouselAction::Goto(i)))
                    };
                    html! {
                        <div key={i} class={classes!("step", (i == active.index).then_some("active"))} onclick={select}>
                            <div class="step-number">{(i + 1).to_string()}</div>
                            <div class="step-icon"><i class={classes!("fa-solid", *icon)}></i></div>
                            <h3 class="step-title">{*title}</h3>
                            <p class="step-description">{*description}</p>
                        </div>
                    }
                }) }
            </div>
        </section>
    }
}

fn plan_card(plan: &PricingPlan, popular_badge: &'static str) -> Html {
    let features = tier_features(&plan.name);
    html! {
        <div class={classes!("pricing-card", plan.popular.then_some("popular-card"))}>
            if plan.popular {
                <div class="popular-badge">{popular_badge}</div>
            }
            <div class="card-header"><h3 class="plan-name">{&plan.name}</h3></div>
            <div class="price-section"><div class="price">{plan.price_label()}</div></div>
            <div class="features-list">
                <div class="feature-item">
                    <span class="check-icon">{"✓"}</span>
                    {format!("Video Length: {}", features.as_ref().map_or("N/A", |f| f.video_length))}
                </div>
                <div class="feature-item">
                    <span class="check-icon">{"✓"}</span>
                    { match features.as_ref() {
                        Some(f) => format!("Includes {}", f.photos_included),
                        None => "Custom photo package".to_string(),
                    } }
                </div>
            </div>
            <Link<Route> to={Route::Portal} classes="cta-button">{"Get started"}</Link<Route>>
        </div>
    }
}

#[function_component(PricingSection)]
fn pricing_section() -> Html {
    let plans = use_pricing_plans();
    let slider = use_reducer(|| Carousel::new(plans.len()));

    let nav = |action: fn() -> CarouselAction| {
        let slider = slider.clone();
        Callback::from(move |_: MouseEvent| slider.dispatch(action()))
    };

    html! {
        <section class="pricing-section" id="pricing">
            <div class="section-heading">
                <h2 class="section-title">{"Start here and scale up"}</h2>
                <div class="title-underline"></div>
                <p class="section-subtitle">{"Choose the plan that works best for your business needs"}</p>
            </div>
            <div class="pricing-cards">
                { for plans.iter().map(|plan| html! {
                    <div class="pricing-col" key={plan.id}>{ plan_card(plan, "Most Popular") }</div>
                }) }
            </div>
            <div class="pricing-slider">
                <button class="slider-arrow" onclick={nav(|| CarouselAction::Prev)}>{"‹"}</button>
                <div class="slider-track" style={format!("transform: translateX(-{}%)", slider.index * 100)}>
                    { for plans.iter().map(|plan| html! {
                        <div class="slide" key={plan.id}>{ plan_card(plan, "Most Popular") }</div>
                    }) }
                </div>
                <button class="slider-arrow slider-arrow-right" onclick={nav(|| CarouselAction::Next)}>{"›"}</button>
            </div>
        </section>
    }
}

struct CostRow {
    feature: &'static str,
    ai: &'static str,
    traditional: &'static str,
    advantage: &'static str,
}

const COST_COMPARISON: [(&str, &str, [CostRow; 2]); 3] = [
    ("Time", "fa-clock", [
        CostRow { feature: "Turnaround", ai: "24-48 hours", traditional: "2-3 weeks", advantage: "83% faster" },
        CostRow { feature: "Scheduling", ai: "Instant upload", traditional: "1-2 week wait", advantage: "No delays" },
    ]),
    ("Cost", "fa-dollar-sign", [
        CostRow { feature: "Production", ai: "$49-$149", traditional: "$1,500-$5,000", advantage: "90% cheaper" },
        CostRow { feature: "Recurring", ai: "None", traditional: "$200+/month", advantage: "No equipment costs" },
    ]),
    ("Quality", "fa-film", [
        CostRow { feature: "Resolution", ai: "4K HDR", traditional: "4K", advantage: "Equal quality" },
        CostRow { feature: "Revisions", ai: "Unlimited", traditional: "$150/revision", advantage: "More flexibility" },
    ]),
];

#[function_component(CostComparison)]
fn cost_comparison() -> Html {
    html! {
        <section class="cost-comparison">
            <div class="section-heading">
                <h2 class="section-title">{"Comparison with Traditional Video Shooting"}</h2>
                <p class="section-subtitle">
                    {"See how AI video generation saves time and money while delivering professional results"}
                </p>
            </div>
            <table class="comparison-table">
                <thead>
                    <tr>
                        <th>{"Category"}</th>
                        <th>{"Feature"}</th>
                        <th><i class="fa-solid fa-circle-check"></i>{" AI Service"}</th>
                        <th><i class="fa-solid fa-circle-xmark"></i>{" Traditional"}</th>
                        <th>{"Advantage"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for COST_COMPARISON.iter().flat_map(|(category, icon, rows)| {
                        rows.iter().enumerate().map(move |(i, row)| html! {
                            <tr key={format!("{}-{}", category, row.feature)}>
                                if i == 0 {
                                    <td rowspan={rows.len().to_string()} class="category-cell">
                                        <i class={classes!("fa-solid", *icon)}></i>{" "}{*category}
                                    </td>
                                }
                                <td class="feature-cell">{row.feature}</td>
                                <td class="ai-cell">{row.ai}</td>
                                <td class="traditional-cell">{row.traditional}</td>
                                <td class="advantage-cell">{row.advantage}</td>
                            </tr>
                        })
                    }) }
                </tbody>
            </table>
        </section>
    }
}

struct Testimonial {
    name: &'static str,
    role: &'static str,
    message: &'static str,
    image: &'static str,
    rating: usize,
}

const TESTIMONIALS: [Testimonial; 10] = [
    Testimonial { name: "Sarah Johnson", role: "TOP PRODUCER | RE/MAX", message: "QuantumTours transformed my business. My listings get 3x more views and my open house attendance doubled.", image: "https://randomuser.me/api/portraits/women/44.jpg", rating: 5 },
    Testimonial { name: "Michael Chen", role: "DEVELOPER | LUXE PROPERTIES", message: "The cinematic quality helps us command premium prices. Our last project sold out 3 weeks faster.", image: "https://randomuser.me/api/portraits/men/32.jpg", rating: 5 },
    Testimonial { name: "Emma Rodriguez", role: "BROKER OWNER | ELITE REALTY", message: "My agents save 10+ hours per listing while delivering superior marketing.", image: "https://randomuser.me/api/portraits/women/68.jpg", rating: 5 },
    Testimonial { name: "David Miller", role: "REAL ESTATE CONSULTANT", message: "Impressed with the simplicity and speed. Clients love the modern look of our listings.", image: "https://randomuser.me/api/portraits/men/41.jpg", rating: 4 },
    Testimonial { name: "Sophia Patel", role: "AGENT | DREAM HOMES", message: "A must-have tool for any serious realtor. It gives me a competitive advantage.", image: "https://randomuser.me/api/portraits/women/12.jpg", rating: 5 },
    Testimonial { name: "James Anderson", role: "PROPERTY INVESTOR", message: "Presentation is everything. This tool takes marketing to the next level.", image: "https://randomuser.me/api/portraits/men/25.jpg", rating: 4 },
    Testimonial { name: "Olivia Brown", role: "AGENT | PRIME ESTATES", message: "I love how professional my listings look now. It's like having a personal videographer.", image: "https://randomuser.me/api/portraits/women/33.jpg", rating: 5 },
    Testimonial { name: "Daniel Wilson", role: "AGENCY OWNER", message: "Helped my agency grow faster by creating strong impressions on new clients.", image: "https://randomuser.me/api/portraits/men/45.jpg", rating: 5 },
    Testimonial { name: "Amelia Scott", role: "BROKER | SUNRISE REALTY", message: "It saves me hours every week. My clients always compliment the videos.", image: "https://randomuser.me/api/portraits/women/25.jpg", rating: 5 },
    Testimonial { name: "Robert White", role: "LUXURY PROPERTY AGENT", message: "The attention to detail is outstanding. Worth every penny!", image: "https://randomuser.me/api/portraits/men/60.jpg", rating: 5 },
];

/// Mobile testimonial slider position; stops at both ends.
pub fn clamp_step(current: usize, len: usize, forward: bool) -> usize {
    if forward {
        (current + 1).min(len.saturating_sub(1))
    } else {
        current.saturating_sub(1)
    }
}

pub fn rating_stars(rating: usize) -> String {
    "★".repeat(rating)
}

fn testimonial_card(t: &Testimonial) -> Html {
    html! {
        <div class="testimonial-card">
            <div class="testimonial-head">
                <img src={t.image} alt={t.name} class="client-image" />
                <div>
                    <h4 class="client-name">{t.name}</h4>
                    <p class="client-role">{t.role}</p>
                </div>
            </div>
            <p class="testimonial-text">{t.message}</p>
            <div class="rating">{ rating_stars(t.rating) }</div>
        </div>
    }
}

#[function_component(Testimonials)]
fn testimonials() -> Html {
    let slide = use_state(|| 0usize);

    let move_by = |forward: bool| {
        let slide = slide.clone();
        Callback::from(move |_: MouseEvent| slide.set(clamp_step(*slide, TESTIMONIALS.len(), forward)))
    };

    html! {
        <section id="testimonials" class="testimonials-section">
            <div class="section-heading">
                <span class="tagline">{"Recommendation by Clients"}</span>
                <h2 class="section-title">{"Real Clients, Real Stories"}</h2>
                <div class="title-underline"></div>
            </div>
            <div class="testimonials-grid">
                { for TESTIMONIALS.iter().map(|t| html! {
                    <div class="grid-item" key={t.name}>{ testimonial_card(t) }</div>
                }) }
            </div>
            <div class="mobile-slider">
                <div class="slider-container" style={format!("transform: translateX(-{}%)", *slide * 100)}>
                    { for TESTIMONIALS.iter().map(|t| html! {
                        <div class="slide" key={t.name}>{ testimonial_card(t) }</div>
                    }) }
                </div>
                <button class="slider-arrow-left" onclick={move_by(false)}>{"‹"}</button>
                <button class="slider-arrow-right" onclick={move_by(true)}>{"›"}</button>
                <div class="slider-indicators">
                    { for (0..TESTIMONIALS.len()).map(|i| {
                        let pick = {
                            let slide = slide.clone();
                            Callback::from(move |_: MouseEvent| slide.set(i))
                        };
                        html! {
                            <button key={i} class={classes!("indicator", (*slide == i).then_some("active"))} onclick={pick} />
                        }
                    }) }
                </div>
            </div>
        </section>
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    html! {
        <>
            <Hero />
            <ClientLogos />
            <VideoComparison />
            <HowItWorks />
            <PricingSection />
            <CostComparison />
            <Testimonials />
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carousel_wraps_and_ignores_out_of_range() {
        let c = Rc::new(Carousel::new(3));
        let c = c.reduce(CarouselAction::Prev);
        assert_eq!(c.index, 2);
        let c = c.reduce(CarouselAction::Next);
        assert_eq!(c.index, 0);
        let c = c.reduce(CarouselAction::Goto(1));
        assert_eq!(c.index, 1);
        let c = c.reduce(CarouselAction::Goto(7));
        assert_eq!(c.index, 1);
    }

    #[test]
    fn manual_navigation_pauses_autoplay_for_two_intervals() {
        assert!(autoplay_allowed(None, 0.0, 6_000));
        assert!(!autoplay_allowed(Some(1_000.0), 12_999.0, 6_000));
        assert!(autoplay_allowed(Some(1_000.0), 13_000.0, 6_000));
    }

    #[test]
    fn rating_renders_one_star_per_point() {
        assert_eq!(rating_stars(4), "★★★★");
        assert_eq!(rating_stars(0), "");
    }

    #[test]
    fn testimonial_slider_stops_at_ends() {
        assert_eq!(clamp_step(0, 10, false), 0);
        assert_eq!(clamp_step(9, 10, true), 9);
        assert_eq!(clamp_step(3, 10, true), 4);
    }
}
