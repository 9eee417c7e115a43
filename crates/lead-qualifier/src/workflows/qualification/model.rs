use super::domain::{clamp_score, LeadCategory, QualificationResult};
use super::extraction::{embedded_json_objects, score_field, TextFallbackExtractor};
use serde_json::{Map, Value};
use tracing::{debug, warn};

const REASON_PREVIEW_CHARS: usize = 200;

/// Turns raw generative-model output into a candidate result for the combination policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelOutputInterpreter {
    extractor: TextFallbackExtractor,
}

impl ModelOutputInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when there is no output or the model reported an unusable score.
    pub fn interpret(&self, output: Option<&str>) -> Option<QualificationResult> {
        let output = output.map(str::trim).filter(|output| !output.is_empty())?;

        if let Some(object) = structured_object(output) {
            if let Some(score) = score_field(&object) {
                let rounded = score.round();
                if rounded < 1.0 {
                    warn!(score, "model reported a non-positive score");
                    return None;
                }
                return Some(structured_result(&object, clamp_score(rounded as i64)));
            }
            debug!("model JSON carried no numeric score; scanning text instead");
        }

        let extraction = self.extractor.extract(Some(output));
        let preview: String = output.chars().take(REASON_PREVIEW_CHARS).collect();
        Some(QualificationResult::from_score(
            extraction.score,
            format!(
                "Manual scoring ({}): {}...",
                extraction.method.label(),
                preview
            ),
        ))
    }
}

/// The whole output as a JSON object, else the first embedded object with a `score` key.
fn structured_object(output: &str) -> Option<Map<String, Value>> {
    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(output) {
        return Some(object);
    }

    embedded_json_objects(output)
        .into_iter()
        .find(|object| object.contains_key("score"))
}

fn structured_result(object: &Map<String, Value>, score: u8) -> QualificationResult {
    let reason = text_field(object, &["reason"])
        .unwrap_or_else(|| format!("Model score {score} reported without explanation"));

    if let Some(reported) = text_field(object, &["category"]) {
        let derived = LeadCategory::from_score(score);
        if LeadCategory::parse_label(&reported) != Some(derived) {
            debug!(%reported, %derived, "model category disagrees with its score");
        }
    }

    let result = QualificationResult::from_score(score, reason);
    match text_field(object, &["market_insights", "marketInsights"]) {
        Some(insights) => result.with_market_insights(insights),
        None => result,
    }
}

fn text_field(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}
