//! Best-effort score recovery from free text, typically a generative model's raw response.
//!
//! Strategies run in a fixed order and each either yields a score or declines; the first
//! score wins. Nothing in here fails: unreadable input ends at the default score.

use super::domain::{clamp_score, DEFAULT_SCORE};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Which strategy produced an extracted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    JsonScore,
    HighIntentLiteral,
    ScorePattern,
    CategoryKeyword,
    KeywordIntent,
    Default,
}

impl ExtractionMethod {
    pub fn label(&self) -> &'static str {
        match self {
            ExtractionMethod::JsonScore => "json score",
            ExtractionMethod::HighIntentLiteral => "high-intent literal",
            ExtractionMethod::ScorePattern => "score pattern",
            ExtractionMethod::CategoryKeyword => "category keyword",
            ExtractionMethod::KeywordIntent => "keyword intent",
            ExtractionMethod::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extraction {
    pub score: u8,
    pub method: ExtractionMethod,
}

impl Extraction {
    fn fallback() -> Self {
        Self {
            score: DEFAULT_SCORE,
            method: ExtractionMethod::Default,
        }
    }
}

struct ExtractionPatterns {
    json_object: Regex,
    cto: Regex,
    fifty_thousand: Regex,
    score_sweep: Vec<Regex>,
    hot: Regex,
    warm: Regex,
    cold: Regex,
    budget: Regex,
    urgency: Regex,
    interest: Regex,
}

impl ExtractionPatterns {
    fn compile() -> Result<Self, regex::Error> {
        let score_sweep = [
            r"(?i)score:?\s*(\d+)",
            r"(?i)score of (\d+)",
            r"(\d+)/10",
            r"(?i)(\d+) out of 10",
            r"(?i)scored (\d+) points",
        ]
        .into_iter()
        .map(Regex::new)
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            json_object: Regex::new(r"\{(?:[^{}]|\{[^{}]*\})*\}")?,
            cto: Regex::new(r"(?i)\bcto\b|chief technology officer")?,
            fifty_thousand: Regex::new(r"(?i)\$50,000|\$50k\b|\b50k budget|\b50000\b")?,
            score_sweep,
            hot: Regex::new(r"(?i)\bhot\b")?,
            warm: Regex::new(r"(?i)\bwarm\b")?,
            cold: Regex::new(r"(?i)\bcold\b")?,
            budget: Regex::new(r"(?i)budget|cost|price|spend")?,
            urgency: Regex::new(r"(?i)urgent|immediately|asap|soon")?,
            interest: Regex::new(r"(?i)interested|need|want|looking for")?,
        })
    }
}

static EXTRACTION_PATTERNS: Lazy<Result<ExtractionPatterns, regex::Error>> =
    Lazy::new(ExtractionPatterns::compile);

type Strategy = fn(&str, &ExtractionPatterns) -> Option<u8>;

const STRATEGIES: [(ExtractionMethod, Strategy); 5] = [
    (ExtractionMethod::JsonScore, json_score),
    (ExtractionMethod::HighIntentLiteral, high_intent_literal),
    (ExtractionMethod::ScorePattern, score_pattern),
    (ExtractionMethod::CategoryKeyword, category_keyword),
    (ExtractionMethod::KeywordIntent, keyword_intent),
];

/// Stateless extractor; cheap to construct and share.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFallbackExtractor;

impl TextFallbackExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Score in `[1, 10]`; absent or blank text yields the default.
    pub fn extract_score(&self, text: Option<&str>) -> u8 {
        self.extract(text).score
    }

    pub fn extract(&self, text: Option<&str>) -> Extraction {
        let Some(text) = text.map(str::trim).filter(|text| !text.is_empty()) else {
            return Extraction::fallback();
        };

        let patterns = match EXTRACTION_PATTERNS.as_ref() {
            Ok(patterns) => patterns,
            Err(err) => {
                warn!(error = %err, "extraction patterns unavailable");
                return Extraction::fallback();
            }
        };

        for (method, strategy) in STRATEGIES {
            if let Some(score) = strategy(text, patterns) {
                debug!(method = method.label(), score, "score extracted from text");
                return Extraction { score, method };
            }
        }

        Extraction::fallback()
    }
}

pub fn extract_score(text: Option<&str>) -> u8 {
    TextFallbackExtractor::new().extract_score(text)
}

/// JSON objects embedded in `text`, outermost first, allowing one level of nesting.
pub(crate) fn embedded_json_objects(text: &str) -> Vec<Map<String, Value>> {
    let Ok(patterns) = EXTRACTION_PATTERNS.as_ref() else {
        return Vec::new();
    };

    patterns
        .json_object
        .find_iter(text)
        .filter_map(|found| match serde_json::from_str::<Value>(found.as_str()) {
            Ok(Value::Object(object)) => Some(object),
            Ok(_) => None,
            Err(err) => {
                debug!(error = %err, "skipping unparseable JSON block");
                None
            }
        })
        .collect()
}

/// Numeric `score` field, accepting numbers and numeric strings.
pub(crate) fn score_field(object: &Map<String, Value>) -> Option<f64> {
    let score = match object.get("score")? {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    score.is_finite().then_some(score)
}

fn json_score(text: &str, _: &ExtractionPatterns) -> Option<u8> {
    embedded_json_objects(text)
        .iter()
        .find_map(score_field)
        .map(|score| clamp_score(score.round() as i64))
}

fn high_intent_literal(text: &str, patterns: &ExtractionPatterns) -> Option<u8> {
    (patterns.cto.is_match(text) && patterns.fifty_thousand.is_match(text)).then_some(9)
}

fn score_pattern(text: &str, patterns: &ExtractionPatterns) -> Option<u8> {
    patterns.score_sweep.iter().find_map(|pattern| {
        let captures = pattern.captures(text)?;
        // Captures are all digits, so a parse failure can only be overflow.
        let value = captures.get(1)?.as_str().parse::<i64>().unwrap_or(i64::MAX);
        Some(clamp_score(value))
    })
}

fn category_keyword(text: &str, patterns: &ExtractionPatterns) -> Option<u8> {
    if patterns.hot.is_match(text) {
        Some(8)
    } else if patterns.warm.is_match(text) {
        Some(6)
    } else if patterns.cold.is_match(text) {
        Some(4)
    } else {
        None
    }
}

fn keyword_intent(text: &str, patterns: &ExtractionPatterns) -> Option<u8> {
    let mut points = 0;
    if patterns.budget.is_match(text) {
        points += 2;
    }
    if patterns.urgency.is_match(text) {
        points += 1;
    }
    if patterns.interest.is_match(text) {
        points += 1;
    }

    match points {
        p if p >= 3 => Some(8),
        p if p > 0 => Some(6),
        _ => None,
    }
}
