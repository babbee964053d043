use chrono::{Duration, NaiveDateTime};
use rand::Rng;

use crate::models::NewsDraft;

pub const NEWS_CATEGORIES: &[&str] = &[
    "Market Analysis",
    "Company News",
    "Industry Trends",
    "Economic Updates",
    "Technology",
];

pub const NEWS_SOURCES: &[&str] = &[
    "Bloomberg",
    "Reuters",
    "CNBC",
    "Financial Times",
    "Wall Street Journal",
];

const EXECUTIVES: &[&str] = &[
    "John Smith",
    "Sarah Johnson",
    "Michael Chen",
    "Emily Brown",
    "David Wilson",
];

const FIRMS: &[&str] = &[
    "Goldman Sachs",
    "Morgan Stanley",
    "JP Morgan",
    "Citi Research",
    "Bank of America",
];

const ANALYSTS: &[&str] = &[
    "Robert Williams",
    "Jennifer Lee",
    "Mark Thompson",
    "Lisa Chen",
    "James Anderson",
];

const METRICS: &[&str] = &[
    "revenue",
    "net income",
    "operating margin",
    "market share",
    "user growth",
];

const STRATEGIES: &[&str] = &[
    "digital transformation",
    "market expansion",
    "innovation",
    "cost optimization",
    "sustainable growth",
];

const SECTORS: &[&str] = &["technology", "finance", "healthcare", "retail", "energy"];

const QUARTERS: &[&str] = &["Q1", "Q2", "Q3", "Q4"];

const FOCUS_AREAS: &[&str] = &[
    "innovation",
    "market expansion",
    "customer experience",
    "operational efficiency",
];

fn pick<'a, R: Rng>(rng: &mut R, items: &'a [&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

fn pick_pct<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    (rng.random_range(lo..hi) * 10.0).round() / 10.0
}

fn pick_amount<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    (rng.random_range(lo..hi) * 100.0).round() / 100.0
}

/// Renders one synthetic news article for the given company. Pure function of
/// the rng and inputs; the caller supplies `now` so publication dates land in
/// the last 30 days relative to the run.
pub fn generate_article<R: Rng>(
    rng: &mut R,
    ticker: &str,
    company: &str,
    now: NaiveDateTime,
) -> NewsDraft {
    let title = render_title(rng, company);
    let content = render_content(rng, ticker, company);
    let published_at = now - Duration::days(rng.random_range(0..=30));

    NewsDraft {
        category: pick(rng, NEWS_CATEGORIES).to_string(),
        title,
        content,
        source: pick(rng, NEWS_SOURCES).to_string(),
        author: format!("{}, {}", pick(rng, ANALYSTS), pick(rng, FIRMS)),
        published_at,
    }
}

fn render_title<R: Rng>(rng: &mut R, company: &str) -> String {
    match rng.random_range(0..5) {
        0 => format!(
            "{} Reports {} {} Earnings, {}",
            company,
            pick(rng, &["Strong", "Mixed", "Disappointing"]),
            pick(rng, QUARTERS),
            pick(rng, &["Beating", "Missing", "Meeting"]),
        ),
        1 => format!(
            "Breaking: {} Announces {}",
            company,
            pick(rng, &["Major Acquisition", "Product Launch", "Strategic Partnership"]),
        ),
        2 => format!(
            "{} Stock {} After {}",
            company,
            pick(rng, &["Surges", "Plummets", "Rises", "Falls"]),
            pick(rng, &["Earnings Report", "Product Launch", "Partnership Announcement"]),
        ),
        3 => format!(
            "Market Analysis: {}'s {} Position Strengthens",
            company,
            pick(rng, SECTORS),
        ),
        _ => format!(
            "Investors React to {}'s Latest {}",
            company,
            pick(rng, &["Earnings Report", "Product Launch", "Partnership Announcement", "Market Analysis"]),
        ),
    }
}

fn render_content<R: Rng>(rng: &mut R, ticker: &str, company: &str) -> String {
    match rng.random_range(0..3) {
        0 => {
            let timeframe = pick(rng, &["Q1", "Q2", "Q3", "Q4", "annual"]);
            let focus_area = pick(rng, FOCUS_AREAS);
            format!(
                "{company} ({ticker}) today announced its {timeframe} financial results, \
                 reporting {metric} of ${amount} billion, {comparison} analysts' expectations. \
                 The company's {segment} segment showed particularly {performance} results, \
                 with revenue {direction} by {percentage}% year-over-year.\n\n\
                 CEO {executive} commented, \"Our {timeframe} results demonstrate the strength \
                 of our {strategy} strategy and our continued focus on {focus_area}.\" \
                 The company also {additional_action}, which analysts view as {analyst_view}.\n\n\
                 Looking ahead, {company} expects to {future_plan} in the coming quarters, \
                 with a focus on {focus_area}. The company's guidance for the next quarter \
                 suggests {outlook} growth, with projected revenue between ${revenue_low} billion \
                 and ${revenue_high} billion.",
                company = company,
                ticker = ticker,
                timeframe = timeframe,
                metric = pick(rng, METRICS),
                amount = pick_amount(rng, 1.0, 100.0),
                comparison = pick(rng, &["exceeding", "meeting", "falling short of"]),
                segment = pick(rng, &["cloud", "consumer", "enterprise", "mobile", "services"]),
                performance = pick(rng, &["strong", "mixed", "challenging"]),
                direction = pick(rng, &["increasing", "decreasing"]),
                percentage = pick_pct(rng, 5.0, 30.0),
                executive = pick(rng, EXECUTIVES),
                strategy = pick(rng, STRATEGIES),
                focus_area = focus_area,
                additional_action = pick(rng, &[
                    "announced a stock buyback program",
                    "revealed plans for international expansion",
                    "introduced new product lines",
                    "restructured its leadership team",
                ]),
                analyst_view = pick(rng, &["positive", "cautiously optimistic", "neutral", "concerning"]),
                future_plan = pick(rng, &[
                    "expand its market presence",
                    "launch new products",
                    "optimize operations",
                    "invest in R&D",
                ]),
                outlook = pick(rng, &["moderate", "strong", "weak"]),
                revenue_low = pick_amount(rng, 10.0, 50.0),
                revenue_high = pick_amount(rng, 51.0, 100.0),
            )
        }
        1 => {
            let sector = pick(rng, SECTORS);
            let firm = pick(rng, FIRMS);
            format!(
                "In a significant development for the {sector} sector, {company} ({ticker}) \
                 has {announcement}. This move comes as the company seeks to {strategic_goal} \
                 in an increasingly competitive market.\n\n\
                 Industry analysts at {firm} note that this {action_type} could {impact} the \
                 company's market position. \"{analysis_quote}\", said {analyst_name}, senior \
                 analyst at {firm}.\n\n\
                 The announcement has led to {market_reaction} among investors, with the stock \
                 {stock_movement} in {trading_session} trading. The company's {metric} currently \
                 stands at ${amount} billion, reflecting a {percentage}% {direction} from the \
                 previous {timeframe}.",
                sector = sector,
                company = company,
                ticker = ticker,
                announcement = pick(rng, &[
                    "announced a major acquisition",
                    "launched a groundbreaking product",
                    "entered a strategic partnership",
                    "initiated a corporate restructuring",
                ]),
                strategic_goal = pick(rng, &[
                    "expand market share",
                    "drive innovation",
                    "improve profitability",
                ]),
                firm = firm,
                action_type = pick(rng, &["strategic move", "market entry", "product launch"]),
                impact = pick(rng, &["strengthen", "reshape", "challenge"]),
                analysis_quote = pick(rng, &[
                    "This move is a game-changer",
                    "The impact remains to be seen",
                    "A bold strategic decision",
                ]),
                analyst_name = pick(rng, ANALYSTS),
                market_reaction = pick(rng, &["mixed reactions", "enthusiasm", "concerns"]),
                stock_movement = pick(rng, &[
                    "rising sharply",
                    "trading higher",
                    "declining",
                    "remaining stable",
                ]),
                trading_session = pick(rng, &["morning", "afternoon", "after-hours"]),
                metric = pick(rng, METRICS),
                amount = pick_amount(rng, 1.0, 100.0),
                percentage = pick_pct(rng, 5.0, 30.0),
                direction = pick(rng, &["increase", "decrease"]),
                timeframe = pick(rng, &["quarter", "year"]),
            )
        }
        _ => {
            let sector = pick(rng, SECTORS);
            format!(
                "Market watchers are closely monitoring {company} ({ticker}) as it {recent_action}. \
                 The {sector} giant has been {trend} in recent months, leading to {consequence} in \
                 its core markets.\n\n\
                 The company's recent {initiative} initiative has garnered attention from \
                 {stakeholder}, who {stakeholder_action}. This development comes amid \
                 {market_condition} in the broader {sector} sector.\n\n\
                 {company}'s {department} team has {action}, which is expected to affect the \
                 company's {metric} by approximately {percentage}% over the next {timeframe}. \
                 The move has been {reception} by industry experts.",
                company = company,
                ticker = ticker,
                recent_action = pick(rng, &[
                    "announced earnings",
                    "launched a new product",
                    "acquired a competitor",
                ]),
                sector = sector,
                trend = pick(rng, &["struggling", "thriving", "growing", "contracting"]),
                consequence = pick(rng, &[
                    "significant changes",
                    "limited impact",
                    "market disruption",
                ]),
                initiative = pick(rng, &["cost-cutting", "expansion", "restructuring"]),
                stakeholder = pick(rng, &["investors", "analysts", "industry experts"]),
                stakeholder_action = pick(rng, &[
                    "expressed optimism",
                    "raised concerns",
                    "remained neutral",
                ]),
                market_condition = pick(rng, &["rapid changes", "stagnation", "intense competition"]),
                department = pick(rng, &["R&D", "marketing", "sales", "operations"]),
                action = pick(rng, &[
                    "launched a new initiative",
                    "restructured its operations",
                    "expanded into new markets",
                ]),
                metric = pick(rng, METRICS),
                percentage = pick_pct(rng, 5.0, 30.0),
                timeframe = pick(rng, &["quarter", "year"]),
                reception = pick(rng, &[
                    "well-received",
                    "met with skepticism",
                    "greeted positively",
                ]),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn draft_fields_come_from_the_fixed_banks() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let draft = generate_article(&mut rng, "AAPL", "Apple Inc.", noon());
            assert!(NEWS_CATEGORIES.contains(&draft.category.as_str()));
            assert!(NEWS_SOURCES.contains(&draft.source.as_str()));
            assert!(draft.author.contains(", "));
        }
    }

    #[test]
    fn draft_mentions_the_company() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let draft = generate_article(&mut rng, "TSLA", "Tesla Inc.", noon());
            assert!(draft.title.contains("Tesla Inc."));
            assert!(draft.content.contains("Tesla Inc.") && draft.content.contains("TSLA"));
        }
    }

    #[test]
    fn publication_date_within_last_30_days() {
        let mut rng = StdRng::seed_from_u64(5);
        let now = noon();
        for _ in 0..100 {
            let draft = generate_article(&mut rng, "MSFT", "Microsoft Corporation", now);
            let age = now - draft.published_at;
            assert!(age >= Duration::zero() && age <= Duration::days(30));
        }
    }

    #[test]
    fn same_seed_renders_the_same_article() {
        let a = generate_article(&mut StdRng::seed_from_u64(8), "V", "Visa Inc.", noon());
        let b = generate_article(&mut StdRng::seed_from_u64(8), "V", "Visa Inc.", noon());
        assert_eq!(a.title, b.title);
        assert_eq!(a.content, b.content);
        assert_eq!(a.published_at, b.published_at);
    }
}
