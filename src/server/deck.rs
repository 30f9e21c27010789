//! Template deck engine.
//!
//! Decks are assembled from keyword-matched industry themes; no language model is involved.

use cofoundr_schema::GenerationRequest;
use std::fmt::Write as _;

use crate::client::DeckKind;

/// Industry-specific copy blocks a deck is assembled from.
#[derive(Debug)]
pub struct Theme {
    pub label: &'static str,
    keywords: &'static [&'static str],
    company: &'static str,
    tagline: &'static str,
    market_size: &'static str,
    audience_size: &'static str,
    solution: &'static str,
    problem: [&'static str; 4],
    revenue: [&'static str; 4],
    competitors: &'static str,
    traction: &'static str,
}

static THEMES: [Theme; 4] = [
    Theme {
        label: "food & delivery",
        keywords: &["food", "delivery", "restaurant", "meal", "kitchen", "grocery"],
        company: "PlateRoute",
        tagline: "Dinner, on time",
        market_size: "$150B food service market",
        audience_size: "45M people ordering food online every month",
        solution: "Routing and recommendation engine tuned for local kitchens",
        problem: [
            "Deliveries arrive late or wrong in nearly half of peak-hour orders",
            "Dietary filters are shallow and rarely trusted",
            "Platform fees squeeze both diners and restaurants",
            "Independent kitchens have no tools to forecast demand",
        ],
        revenue: [
            "Restaurant commission of 12-20% per order",
            "Delivery fee of $2-5 with peak pricing",
            "Membership at $8.99/month for free delivery",
            "Promoted listings for partner restaurants",
        ],
        competitors: "DoorDash, Uber Eats, Deliveroo",
        traction: "2,400 partner kitchens and 14K orders per month",
    },
    Theme {
        label: "health & wellness",
        keywords: &["health", "fitness", "wellness", "medical", "exercise", "clinic"],
        company: "Vitalis",
        tagline: "Health habits that stick",
        market_size: "$280B digital health market",
        audience_size: "180M health-conscious adults",
        solution: "Personal health coach driven by wearable and check-in data",
        problem: [
            "Seven in ten people abandon a fitness routine within three months",
            "Generic advice ignores medical history and goals",
            "Trainers and dietitians are priced out of reach for most",
            "Progress data is scattered across apps and devices",
        ],
        revenue: [
            "Tiered subscriptions from $4.99 to $24.99 per month",
            "Employer wellness plans billed per seat",
            "Device partnerships and anonymised insight licensing",
            "Paid specialist programs inside the app",
        ],
        competitors: "MyFitnessPal, Fitbit, Noom",
        traction: "11K beta users with a 4.7 store rating",
    },
    Theme {
        label: "education technology",
        keywords: &["education", "learning", "student", "school", "course", "teach", "tutor"],
        company: "Brightpath",
        tagline: "Learning that adapts to you",
        market_size: "$75B education technology market",
        audience_size: "65M students and career switchers",
        solution: "Adaptive learning platform that matches learners with content and mentors",
        problem: [
            "Classroom pacing leaves both fast and slow learners behind",
            "Two thirds of students cannot find material at their level",
            "Quality tutoring costs more than most families can spend",
            "Credentials rarely map to skills employers ask for",
        ],
        revenue: [
            "Course fees between $49 and $399",
            "All-access plan at $24.99/month",
            "Corporate upskilling contracts",
            "Certification and placement fees",
        ],
        competitors: "Coursera, Udemy, Khan Academy",
        traction: "8,000 enrolled learners and an 87% completion rate",
    },
    Theme {
        label: "fintech & trading",
        keywords: &["crypto", "trading", "bitcoin", "blockchain", "finance", "payment", "bank"],
        company: "LedgerLeaf",
        tagline: "Smarter money decisions",
        market_size: "$180B digital finance market",
        audience_size: "50M retail investors and traders",
        solution: "Automated portfolio and risk tooling with plain-language guidance",
        problem: [
            "Most retail traders lose money through poorly timed trades",
            "Trading interfaces overwhelm first-time users",
            "Risk controls are manual and easy to skip",
            "Fees are opaque and hard to compare",
        ],
        revenue: [
            "Transaction fee of 0.1-0.4%",
            "Pro tier at $39.99/month",
            "Revenue share on copy-trading strategies",
            "API access for institutions",
        ],
        competitors: "Coinbase, Robinhood, Revolut",
        traction: "5,000 active traders and $2M in assets on platform",
    },
];

static GENERAL: Theme = Theme {
    label: "emerging technology",
    keywords: &[],
    company: "Northstar Labs",
    tagline: "Simple tools for stubborn problems",
    market_size: "$50B+ addressable market",
    audience_size: "25M+ potential users in the first segment",
    solution: "Focused software platform replacing fragmented workarounds",
    problem: [
        "Existing options are fragmented and slow to adopt",
        "Two in three users are unhappy with current alternatives",
        "High switching costs lock customers into poor experiences",
        "Nobody serves the segment with a modern, mobile-first product",
    ],
    revenue: [
        "Premium subscription at $19.99/month",
        "Transaction fee of 3-5%",
        "Annual enterprise agreements",
        "Freemium entry tier with paid upgrades",
    ],
    competitors: "Legacy incumbents and in-house spreadsheets",
    traction: "3,000 beta users with strong week-four retention",
};

/// Picks the first theme with a keyword in the idea or the declared industry.
pub fn theme_for(req: &GenerationRequest) -> &'static Theme {
    let haystack = format!(
        "{} {}",
        req.idea_text,
        req.industry.as_deref().unwrap_or_default()
    )
    .to_lowercase();

    THEMES
        .iter()
        .find(|theme| theme.keywords.iter().any(|kw| haystack.contains(kw)))
        .unwrap_or(&GENERAL)
}

/// Renders the deck for `kind`. The idea is expected to be validated already.
pub fn render(kind: DeckKind, req: &GenerationRequest) -> String {
    let theme = theme_for(req);
    let mut deck = match kind {
        DeckKind::Standard => standard(theme, req),
        DeckKind::Detailed => detailed(theme),
    };

    let industry = req.industry.as_deref().unwrap_or(theme.label);
    let _ = write!(
        deck,
        "\n*Prepared for \"{}\" | audience: {} | industry: {} | stage: {}*",
        req.idea_text.trim(),
        req.target_audience,
        industry,
        req.funding_stage
    );
    deck
}

fn slide(deck: &mut String, n: usize, title: &str, bullets: &[&str]) {
    let _ = writeln!(deck, "**SLIDE {n}: {title}**");
    for bullet in bullets {
        let _ = writeln!(deck, "• {bullet}");
    }
    deck.push('\n');
}

fn standard(theme: &Theme, req: &GenerationRequest) -> String {
    let mut deck = String::new();
    slide(&mut deck, 1, "PROBLEM", &theme.problem);
    slide(
        &mut deck,
        2,
        "SOLUTION",
        &[
            format!("{} built for this exact use case", theme.solution).as_str(),
            "Removes the top user pain points in the first session",
            "Modern stack that keeps the experience fast on any device",
            "Scales without a linear rise in operating cost",
        ],
    );
    slide(
        &mut deck,
        3,
        "MARKET OPPORTUNITY",
        &[
            format!("{} growing about 12% a year", theme.market_size).as_str(),
            format!("Initial focus: {}", theme.audience_size).as_str(),
            "Early adopters already pay for partial solutions",
            "Timing is right as habits shift online",
        ],
    );
    slide(&mut deck, 4, "BUSINESS MODEL", &theme.revenue);
    slide(
        &mut deck,
        5,
        "CALL TO ACTION",
        &[
            format!("Raising a {} round for an 18-month runway", req.funding_stage).as_str(),
            "Use of funds: product 45%, growth 35%, team 20%",
            "Milestones: 5K users by month 12, $500K ARR by month 18",
            format!("Looking for investors with {} experience", theme.label).as_str(),
        ],
    );
    deck
}

fn detailed(theme: &Theme) -> String {
    let mut deck = String::new();
    slide(
        &mut deck,
        1,
        "TITLE & VISION",
        &[
            format!("Company: {} - \"{}\"", theme.company, theme.tagline).as_str(),
            format!("Vision: become the default choice in {}", theme.label).as_str(),
            "Founding team with operating experience in the space",
        ],
    );
    slide(&mut deck, 2, "PROBLEM", &theme.problem);
    slide(
        &mut deck,
        3,
        "SOLUTION",
        &[
            theme.solution,
            "Three-step onboarding with value in the first minute",
            "Proprietary matching that outperforms manual workflows",
            "Architecture ready for multi-region growth",
        ],
    );
    slide(
        &mut deck,
        4,
        "PRODUCT DEMO",
        &[
            "Guided flow from sign-up to first outcome",
            "Real-time status and smart notifications",
            "iOS, Android and web from one codebase",
            "Analytics dashboard with personal recommendations",
        ],
    );
    slide(
        &mut deck,
        5,
        "MARKET SIZE",
        &[
            format!("TAM: {}", theme.market_size).as_str(),
            "SAM: $8B reachable with the current product",
            "SOM: $800M within five years",
            theme.audience_size,
        ],
    );
    slide(&mut deck, 6, "BUSINESS MODEL", &theme.revenue);
    slide(
        &mut deck,
        7,
        "COMPETITION",
        &[
            format!("Main alternatives: {}", theme.competitors).as_str(),
            "Edge: faster experience and better personalisation",
            "Moat: proprietary data and network effects",
            "Roadmap keeps a two-year lead on core features",
        ],
    );
    slide(
        &mut deck,
        8,
        "TRACTION",
        &[
            theme.traction,
            "Month-over-month growth averaging 18%",
            "Pilot partnerships with three industry players",
            "$80K in signed pre-revenue commitments",
        ],
    );
    slide(
        &mut deck,
        9,
        "FINANCIAL PROJECTIONS",
        &[
            "Year 1: $120K revenue, 8K users",
            "Year 2: $900K revenue, 35K users",
            "Year 3: $4M revenue, 120K users",
            "Break-even around month 26",
        ],
    );
    slide(
        &mut deck,
        10,
        "FUNDING & USE OF FUNDS",
        &[
            "Seeking $1.5M for a 30-month runway",
            "Product and engineering: 45%",
            "Marketing and acquisition: 30%",
            "Key hires: 20%",
            "Operations and compliance: 5%",
        ],
    );
    deck
}
