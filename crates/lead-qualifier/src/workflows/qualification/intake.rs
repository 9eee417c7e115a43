//! Boundary normalization: integrations send keys with stray whitespace (`"email "`), numbers
//! where strings belong, or nulls. Everything is coerced here so the scorer only ever sees a
//! clean [`LeadRecord`].

use super::domain::{LeadRecord, DEFAULT_SOURCE};
use serde_json::Value;
use std::io::Read;
use tracing::debug;

pub const MODEL_OUTPUT_FIELD: &str = "model_output";

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("lead payload must be a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("failed to read lead CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Normalized inbound request: the lead plus any raw model output supplied upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadSubmission {
    pub lead: LeadRecord,
    pub model_output: Option<String>,
}

impl LeadSubmission {
    pub fn from_json(payload: Value) -> Result<Self, IntakeError> {
        let Value::Object(fields) = payload else {
            return Err(IntakeError::NotAnObject(json_kind(&payload)));
        };

        let mut lead = LeadRecord {
            source: String::new(),
            ..LeadRecord::default()
        };
        let mut model_output = None;

        for (key, value) in &fields {
            let normalized = key.trim().to_ascii_lowercase();
            let text = coerce_text(value);
            match normalized.as_str() {
                "name" => fill(&mut lead.name, text),
                "email" => fill(&mut lead.email, text),
                "phone" => fill(&mut lead.phone, text),
                "company" => fill(&mut lead.company, text),
                "message" => fill(&mut lead.message, text),
                "source" => fill(&mut lead.source, text),
                MODEL_OUTPUT_FIELD => {
                    if !text.is_empty() {
                        model_output = Some(text);
                    }
                }
                _ => debug!(field = %key, "ignoring unknown lead field"),
            }
        }

        if lead.source.is_empty() {
            lead.source = DEFAULT_SOURCE.to_string();
        }

        Ok(Self { lead, model_output })
    }
}

/// Keep the first non-empty value when normalized keys collide.
fn fill(slot: &mut String, value: String) {
    if slot.is_empty() {
        *slot = value;
    }
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read leads from a CSV export. Headers are matched case-insensitively after trimming.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<LeadRecord>, IntakeError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_ascii_lowercase())
        .collect();
    let column = |name: &str| headers.iter().position(|header| header == name);
    let columns = CsvColumns {
        name: column("name"),
        email: column("email"),
        phone: column("phone"),
        company: column("company"),
        message: column("message"),
        source: column("source"),
    };

    let mut leads = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let cell = |index: Option<usize>| {
            index
                .and_then(|index| record.get(index))
                .unwrap_or_default()
                .to_string()
        };
        let source = cell(columns.source);

        leads.push(LeadRecord {
            name: cell(columns.name),
            email: cell(columns.email),
            phone: cell(columns.phone),
            company: cell(columns.company),
            message: cell(columns.message),
            source: if source.is_empty() {
                DEFAULT_SOURCE.to_string()
            } else {
                source
            },
        });
    }

    Ok(leads)
}

struct CsvColumns {
    name: Option<usize>,
    email: Option<usize>,
    phone: Option<usize>,
    company: Option<usize>,
    message: Option<usize>,
    source: Option<usize>,
}
