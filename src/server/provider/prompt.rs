//! Prompts sent to the language model providers.

use crate::client::DeckKind;
use cofoundr_schema::GenerationRequest;
use std::fmt::Write as _;

const STANDARD_SYSTEM: &str = "You are a startup advisor and pitch deck expert with deep knowledge \
of what investors look for in successful pitches.";

const DETAILED_SYSTEM: &str = "You are a startup advisor who has successfully helped companies \
raise over $100M in funding. You understand what makes investors excited.";

const STANDARD_OUTLINE: &str = "\
You are an experienced startup advisor and pitch deck expert who has helped hundreds of startups raise funding.

Create a comprehensive, investor-ready pitch deck for the following startup idea. Structure it as 5 detailed slides:

**SLIDE 1: PROBLEM**
- Clearly define the pain point or market gap
- Include statistics or market evidence
- Make it relatable and urgent

**SLIDE 2: SOLUTION**
- Present your unique solution approach
- Highlight key differentiators
- Explain why this solution is better than alternatives

**SLIDE 3: MARKET OPPORTUNITY**
- Define Total Addressable Market (TAM)
- Identify target customer segments
- Show market trends and growth potential

**SLIDE 4: BUSINESS MODEL**
- Explain how you'll make money
- Outline key revenue streams
- Include basic unit economics if applicable

**SLIDE 5: CALL TO ACTION**
- Specify funding requirements
- Outline key milestones and use of funds
- Present compelling next steps for investors
";

const DETAILED_OUTLINE: &str = "\
You are an experienced startup advisor creating a comprehensive 10-slide investor pitch deck.

Create a detailed, professional pitch deck with the following structure:

**SLIDE 1: TITLE & VISION**
- Company name suggestion and tagline
- Clear vision statement
- Founder introduction placeholder

**SLIDE 2: PROBLEM**
- Market pain points with statistics
- Current inadequate solutions
- Cost of the problem

**SLIDE 3: SOLUTION**
- Your unique approach
- Key features and benefits
- Technology differentiators

**SLIDE 4: PRODUCT DEMO**
- Core product walkthrough
- User experience highlights
- Technical architecture overview

**SLIDE 5: MARKET SIZE**
- TAM, SAM, SOM analysis
- Market trends and drivers
- Growth projections

**SLIDE 6: BUSINESS MODEL**
- Revenue streams
- Pricing strategy
- Unit economics

**SLIDE 7: COMPETITION**
- Competitive landscape
- Positioning matrix
- Competitive advantages

**SLIDE 8: TRACTION**
- Key metrics and milestones
- Customer testimonials
- Growth trajectory

**SLIDE 9: FINANCIAL PROJECTIONS**
- 3-year revenue forecast
- Key assumptions
- Path to profitability

**SLIDE 10: FUNDING & USE OF FUNDS**
- Funding requirements
- Detailed use of funds
- Key milestones to achieve
";

const STANDARD_CLOSING: &str = "Make the content professional, data-driven, and compelling. \
Use bullet points and clear formatting.";

const DETAILED_CLOSING: &str =
    "Make it investor-ready with specific numbers, market insights, and compelling narrative.";

pub fn system_prompt(kind: DeckKind) -> &'static str {
    match kind {
        DeckKind::Standard => STANDARD_SYSTEM,
        DeckKind::Detailed => DETAILED_SYSTEM,
    }
}

/// Completion budget of one deck.
pub fn max_tokens(kind: DeckKind) -> u32 {
    match kind {
        DeckKind::Standard => 1500,
        DeckKind::Detailed => 3000,
    }
}

/// Slide outline followed by the founder's inputs.
pub fn user_prompt(kind: DeckKind, req: &GenerationRequest) -> String {
    let (outline, closing) = match kind {
        DeckKind::Standard => (STANDARD_OUTLINE, STANDARD_CLOSING),
        DeckKind::Detailed => (DETAILED_OUTLINE, DETAILED_CLOSING),
    };
    let industry = req
        .industry
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("Not specified");

    let mut prompt = String::with_capacity(outline.len() + 512);
    prompt.push_str(outline);
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Startup Idea: {}", req.idea_text.trim());
    let _ = writeln!(prompt, "Target Audience: {}", req.target_audience);
    let _ = writeln!(prompt, "Industry: {industry}");
    let _ = writeln!(prompt, "Funding Stage: {}", req.funding_stage);
    let _ = writeln!(prompt, "Presentation Style: {}", req.presentation_style);
    if let Some(model) = non_blank(req.business_model.as_deref()) {
        let _ = writeln!(prompt, "Business Model: {model}");
    }
    if let Some(competitors) = non_blank(req.competitor_context.as_deref()) {
        let _ = writeln!(prompt, "Competitors: {competitors}");
    }
    let _ = writeln!(prompt);
    prompt.push_str(closing);
    prompt
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
