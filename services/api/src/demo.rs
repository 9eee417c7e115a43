use crate::infra::qualification_service;
use crate::scoring::render_row;
use clap::Args;
use lead_qualifier::config::FollowUpRouting;
use lead_qualifier::error::AppError;
use lead_qualifier::workflows::qualification::{
    LeadRecord, LeadSubmission, RuleScorer, TextFallbackExtractor,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print each follow-up notice as JSON
    #[arg(long)]
    pub(crate) show_notices: bool,
    /// Skip the model-output recovery walkthrough
    #[arg(long)]
    pub(crate) skip_extraction: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        show_notices,
        skip_extraction,
    } = args;

    println!("Lead qualification demo");
    let scorer = RuleScorer::default();
    let (service, publisher) = qualification_service(FollowUpRouting::default());

    for (label, lead) in sample_leads() {
        println!("\n{label}");
        match scorer.evaluate(&lead) {
            Ok(evaluation) => {
                for component in &evaluation.components {
                    println!(
                        "  + {:.1} {} ({})",
                        component.points,
                        component.dimension.label(),
                        component.notes
                    );
                }
                if evaluation.override_applied {
                    println!("  override applied");
                }
            }
            Err(err) => println!("  Rule breakdown unavailable: {err}"),
        }

        let qualified = service.qualify(LeadSubmission {
            lead,
            model_output: None,
        });
        println!("{}", render_row(&qualified.lead, &qualified.result));
        println!("  Action: {}", qualified.result.action);
        println!(
            "  Follow-up: {} by {}",
            qualified.follow_up.followup.assigned_to,
            qualified.follow_up.followup.next_action_date.format("%Y-%m-%d %H:%M UTC")
        );
    }

    if show_notices {
        println!("\nFollow-up notices");
        for notice in publisher.notices() {
            match serde_json::to_string_pretty(&notice) {
                Ok(json) => println!("{json}"),
                Err(err) => println!("  Notice unavailable: {err}"),
            }
        }
    }

    if skip_extraction {
        return Ok(());
    }

    println!("\nModel output recovery");
    let extractor = TextFallbackExtractor::new();
    for output in sample_model_outputs() {
        let extraction = extractor.extract(Some(output));
        println!(
            "- {:?} -> {} via {}",
            output,
            extraction.score,
            extraction.method.label()
        );
    }

    Ok(())
}

fn sample_leads() -> Vec<(&'static str, LeadRecord)> {
    vec![
        (
            "Executive with budget (expected HOT)",
            LeadRecord {
                name: "Sarah Johnson".to_string(),
                email: "sarah.johnson@techcorp.com".to_string(),
                phone: "+1-458-789-3456".to_string(),
                company: "TechCorp Solutions".to_string(),
                message: "I'm the CTO at TechCorp and we urgently need to implement your lead \
                          qualification system by next month. We have a budget of $50,000 for \
                          this project and we're evaluating 2-3 vendors this week. Our sales \
                          team of 35 people needs better qualification tools as we're getting \
                          300+ leads weekly."
                    .to_string(),
                source: "Web Form".to_string(),
            },
        ),
        (
            "Pricing inquiry (expected WARM)",
            LeadRecord {
                name: "Michael Rodriguez".to_string(),
                email: "m.rodriguez@midmarket.co".to_string(),
                phone: "+1-332-555-7890".to_string(),
                company: "Midmarket Enterprises".to_string(),
                message: "We're looking to improve our lead qualification process. Your \
                          solution looks interesting. Could you provide some pricing information \
                          and case studies? We may implement something in the next quarter."
                    .to_string(),
                source: "Web Form".to_string(),
            },
        ),
        (
            "Generic request (expected COLD)",
            LeadRecord {
                name: "John Smith".to_string(),
                email: "johnsmith@gmail.com".to_string(),
                phone: "+1-123-456-7890".to_string(),
                company: "Unknown".to_string(),
                message: "Please send me more information about your services.".to_string(),
                source: "Web Form".to_string(),
            },
        ),
    ]
}

fn sample_model_outputs() -> [&'static str; 5] {
    [
        r#"Here is my assessment: {"score": 8, "category": "HOT", "reason": "CTO with budget"}"#,
        "The lead scored 7 points overall.",
        "I'd call this a warm lead.",
        "They need pricing ASAP.",
        "No clear signal.",
    ]
}
