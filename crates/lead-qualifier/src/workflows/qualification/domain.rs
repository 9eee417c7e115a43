use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 10;
pub const DEFAULT_SCORE: u8 = 5;

pub const DEFAULT_SOURCE: &str = "Web Form";

/// Inbound contact submission as seen by the scoring core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

impl Default for LeadRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            company: String::new(),
            message: String::new(),
            source: default_source(),
        }
    }
}

/// Priority tier driving follow-up urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeadCategory {
    Hot,
    Warm,
    Cold,
}

impl LeadCategory {
    pub fn from_score(score: u8) -> Self {
        if score >= 8 {
            Self::Hot
        } else if score >= 5 {
            Self::Warm
        } else {
            Self::Cold
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Hot => "HOT",
            Self::Warm => "WARM",
            Self::Cold => "COLD",
        }
    }

    /// Fixed follow-up instruction handed to the sales team.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Hot => "URGENT: Follow up within 2 hours - High priority lead",
            Self::Warm => "PRIORITY: Follow up within 24 hours - Nurture to reach decision makers",
            Self::Cold => "STANDARD: Add to nurture campaign",
        }
    }

    /// Lenient parse used for model output such as `"hot"` or `" WARM "`.
    pub fn parse_label(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "HOT" => Some(Self::Hot),
            "WARM" => Some(Self::Warm),
            "COLD" => Some(Self::Cold),
            _ => None,
        }
    }
}

impl fmt::Display for LeadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-dimension points accumulated by the rule scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub intent_points: f32,
    pub contact_points: f32,
    pub quality_points: f32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f32 {
        self.intent_points + self.contact_points + self.quality_points
    }

    /// Rounds half away from zero and clamps into the reportable range.
    pub fn score(&self) -> u8 {
        clamp_score(self.total().round() as i64)
    }

    pub fn summary(&self, score: u8) -> String {
        format!(
            "Intent({:.1}/4) + Contact({:.1}/3) + Quality({:.1}/3) = {}",
            self.intent_points, self.contact_points, self.quality_points, score
        )
    }
}

/// Clamp any candidate score into `[MIN_SCORE, MAX_SCORE]`.
pub fn clamp_score(raw: i64) -> u8 {
    raw.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as u8
}

/// Scored lead returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationResult {
    pub score: u8,
    pub category: LeadCategory,
    pub reason: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_insights: Option<String>,
}

impl QualificationResult {
    /// Build a result whose category and action follow from the score.
    pub fn from_score(score: u8, reason: impl Into<String>) -> Self {
        let category = LeadCategory::from_score(score);
        Self {
            score,
            category,
            reason: reason.into(),
            action: category.action().to_string(),
            market_insights: None,
        }
    }

    pub fn with_market_insights(mut self, insights: impl Into<String>) -> Self {
        let insights = insights.into();
        self.market_insights = if insights.trim().is_empty() {
            None
        } else {
            Some(insights)
        };
        self
    }

    /// Result used whenever scoring could not complete.
    pub fn safe_default(detail: &str) -> Self {
        let reason = if detail.is_empty() {
            "fallback due to error: manual review required".to_string()
        } else {
            format!("fallback due to error: manual review required ({detail})")
        };
        Self::from_score(DEFAULT_SCORE, reason)
    }
}
