use super::super::domain::{LeadRecord, ScoreBreakdown};
use super::config::RubricConfig;
use super::{ScoreComponent, ScoreDimension, ScoringError};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const GENERIC_EMAIL_PROVIDERS: &[&str] = &["gmail", "yahoo", "hotmail", "outlook", "aol", "icloud"];
const INVALID_COMPANY_NAMES: &[&str] = &["unknown", "none", "n/a", "na"];

const BUDGET_POINTS: f32 = 2.0;
const DECISION_MAKER_POINTS: f32 = 1.5;
const URGENCY_POINTS: f32 = 0.5;
const BUSINESS_EMAIL_POINTS: f32 = 1.0;
const PHONE_POINTS: f32 = 1.0;
const FULL_NAME_POINTS: f32 = 0.5;
const COMPANY_POINTS: f32 = 0.5;
const INDUSTRY_POINTS: f32 = 1.0;
const USE_CASE_POINTS: f32 = 1.5;
const BUSINESS_SCALE_POINTS: f32 = 0.5;

pub(crate) struct RulePatterns {
    pub budget: Regex,
    pub decision_maker: Regex,
    pub urgency: Regex,
    pub industry: Regex,
    pub use_case: Regex,
    pub business_scale: Regex,
    pub leading_plus_digit: Regex,
}

impl RulePatterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            budget: Regex::new(
                r"(?i)\b(?:budget|cost|spend|pric(?:e|ing)|invest)|\$\s?\d|\b\d+\s?dollars\b",
            )?,
            decision_maker: Regex::new(
                r"(?i)\b(?:cto|ceo|cio|cfo|vp)\b|\b(?:chief|director|decision[\s-]?maker|authority)",
            )?,
            urgency: Regex::new(
                r"(?i)\b(?:urgent|immediate|asap|soon)|\bnext month\b|\bthis quarter\b|\bwithin \d+ (?:days?|weeks?)\b",
            )?,
            industry: Regex::new(
                r"(?i)\b(?:tech|software|saas|retail|manufacturing|healthcare|financ(?:e|ial)|insurance|banking|logistics|real estate|e-?commerce|consulting|agency|startup)",
            )?,
            use_case: Regex::new(
                r"(?i)\b(?:need to|looking to|want to|trying to|problem with|solution for)\b",
            )?,
            business_scale: Regex::new(
                r"(?i)\b\d[\d,]*\+?\s*(?:employees|customers|users|clients|leads|sales|revenue|people)\b",
            )?,
            leading_plus_digit: Regex::new(r"^\+\d")?,
        })
    }
}

static RULE_PATTERNS: Lazy<Result<RulePatterns, regex::Error>> = Lazy::new(RulePatterns::compile);

pub(crate) fn rule_patterns() -> Result<&'static RulePatterns, ScoringError> {
    RULE_PATTERNS
        .as_ref()
        .map_err(|err| ScoringError::Patterns(err.to_string()))
}

/// Message-level facts the policy needs after points are tallied.
pub(crate) struct ScoreSignals {
    pub budget: bool,
    pub decision_maker: bool,
    pub message_chars: usize,
}

#[derive(Default)]
struct Ledger {
    components: Vec<ScoreComponent>,
    breakdown: ScoreBreakdown,
}

impl Ledger {
    fn award(&mut self, dimension: ScoreDimension, points: f32, notes: &str) {
        debug!(dimension = dimension.label(), points, notes, "rule awarded");
        match dimension {
            ScoreDimension::Intent => self.breakdown.intent_points += points,
            ScoreDimension::Contact => self.breakdown.contact_points += points,
            ScoreDimension::Quality => self.breakdown.quality_points += points,
        }
        self.components.push(ScoreComponent {
            dimension,
            points,
            notes: notes.to_string(),
        });
    }
}

pub(crate) fn score_lead(
    lead: &LeadRecord,
    config: &RubricConfig,
    patterns: &RulePatterns,
) -> (Vec<ScoreComponent>, ScoreBreakdown, ScoreSignals) {
    let mut ledger = Ledger::default();
    let message = lead.message.as_str();
    let message_chars = message.chars().count();

    let budget = patterns.budget.is_match(message);
    if budget {
        ledger.award(ScoreDimension::Intent, BUDGET_POINTS, "budget or spend mentioned");
    }

    let decision_maker = patterns.decision_maker.is_match(message);
    if decision_maker {
        ledger.award(
            ScoreDimension::Intent,
            DECISION_MAKER_POINTS,
            "decision-maker role mentioned",
        );
    }

    if patterns.urgency.is_match(message) {
        ledger.award(ScoreDimension::Intent, URGENCY_POINTS, "urgent timeline");
    }

    if is_business_email(&lead.email) {
        ledger.award(
            ScoreDimension::Contact,
            BUSINESS_EMAIL_POINTS,
            "business email domain",
        );
    }

    if is_valid_phone(&lead.phone, patterns) {
        ledger.award(ScoreDimension::Contact, PHONE_POINTS, "valid phone number");
    }

    if has_full_name(&lead.name) {
        ledger.award(ScoreDimension::Contact, FULL_NAME_POINTS, "first and last name");
    }

    if is_named_company(&lead.company) {
        ledger.award(ScoreDimension::Contact, COMPANY_POINTS, "named company");
    }

    if patterns.industry.is_match(message) {
        ledger.award(ScoreDimension::Quality, INDUSTRY_POINTS, "industry or company type");
    }

    if message_chars > config.use_case_min_message_chars && patterns.use_case.is_match(message) {
        ledger.award(ScoreDimension::Quality, USE_CASE_POINTS, "explicit use case");
    }

    if patterns.business_scale.is_match(message) {
        ledger.award(
            ScoreDimension::Quality,
            BUSINESS_SCALE_POINTS,
            "business scale quantified",
        );
    }

    let signals = ScoreSignals {
        budget,
        decision_maker,
        message_chars,
    };

    (ledger.components, ledger.breakdown, signals)
}

pub(crate) fn is_business_email(email: &str) -> bool {
    let Some((local, domain)) = email.trim().rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }

    let provider = domain
        .split('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    !GENERIC_EMAIL_PROVIDERS.contains(&provider.as_str())
}

fn is_valid_phone(phone: &str, patterns: &RulePatterns) -> bool {
    let phone = phone.trim();
    phone.chars().count() > 5 || patterns.leading_plus_digit.is_match(phone)
}

fn has_full_name(name: &str) -> bool {
    name.trim().contains(' ')
}

pub(crate) fn is_named_company(company: &str) -> bool {
    let company = company.trim();
    !company.is_empty() && !INVALID_COMPANY_NAMES.contains(&company.to_lowercase().as_str())
}
