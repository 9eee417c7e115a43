use crate::infra::qualification_service;
use clap::Args;
use lead_qualifier::config::FollowUpRouting;
use lead_qualifier::error::AppError;
use lead_qualifier::workflows::qualification::{
    read_csv, LeadCategory, LeadRecord, QualificationResult, DEFAULT_SOURCE,
};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    #[arg(long, default_value = "")]
    pub(crate) name: String,
    #[arg(long, default_value = "")]
    pub(crate) email: String,
    #[arg(long, default_value = "")]
    pub(crate) phone: String,
    #[arg(long, default_value = "")]
    pub(crate) company: String,
    #[arg(long, default_value = "")]
    pub(crate) message: String,
    #[arg(long, default_value = DEFAULT_SOURCE)]
    pub(crate) source: String,
    /// Raw model output to weigh against the rule score
    #[arg(long)]
    pub(crate) model_output: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with name, email, phone, company, message (and optional source) columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        name,
        email,
        phone,
        company,
        message,
        source,
        model_output,
    } = args;

    let lead = LeadRecord {
        name,
        email,
        phone,
        company,
        message,
        source,
    };
    let (service, _) = qualification_service(FollowUpRouting::default());
    let (result, _) = service.score(&lead, model_output.as_deref());

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("Result unavailable as JSON ({err}): {result:?}"),
    }
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let file = File::open(&args.csv)?;
    let leads = read_csv(BufReader::new(file))?;
    let (service, _) = qualification_service(FollowUpRouting::default());

    println!("Scoring {} leads from {}", leads.len(), args.csv.display());
    let mut tally = BatchTally::default();
    for lead in &leads {
        let (result, _) = service.score(lead, None);
        tally.record(&result);
        println!("{}", render_row(lead, &result));
    }

    println!(
        "\nHOT {} | WARM {} | COLD {}",
        tally.hot, tally.warm, tally.cold
    );
    Ok(())
}

pub(crate) fn render_row(lead: &LeadRecord, result: &QualificationResult) -> String {
    let who = if lead.name.is_empty() {
        "(unnamed)"
    } else {
        lead.name.as_str()
    };
    format!(
        "- {} <{}>: {}/10 {} | {}",
        who, lead.email, result.score, result.category, result.reason
    )
}

#[derive(Debug, Default, PartialEq, Eq)]
struct BatchTally {
    hot: usize,
    warm: usize,
    cold: usize,
}

impl BatchTally {
    fn record(&mut self, result: &QualificationResult) {
        match result.category {
            LeadCategory::Hot => self.hot += 1,
            LeadCategory::Warm => self.warm += 1,
            LeadCategory::Cold => self.cold += 1,
        }
    }
}
