use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use serde_json::{json, Value};
use tracing::{info, warn};

use mergebay_coordinator::{CommitOutcome, DialogConfig, InMemoryMergeApi, MergeDialog, MergeRequest};
use mergebay_engine::{Gesture, Session};
use mergebay_types::{parse_items, EntityKind, Item};

use crate::cli::*;
use crate::script::parse_step;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Show(args) => cmd_show(args, cli.format),
        Command::Simulate(args) => cmd_simulate(args, cli.format).await,
    }
}

fn load_items(path: &str) -> anyhow::Result<Vec<Item>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    parse_items(&text).with_context(|| format!("parsing candidates in {path}"))
}

fn cmd_show(args: ShowArgs, format: OutputFormat) -> anyhow::Result<()> {
    let session = Session::init(load_items(&args.items)?);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&session)?),
        OutputFormat::Text => print_session(&session),
    }
    Ok(())
}

async fn cmd_simulate(args: SimulateArgs, format: OutputFormat) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => DialogConfig::load(Path::new(path))
            .with_context(|| format!("loading config {path}"))?,
        None => DialogConfig::default(),
    };
    let items = load_items(&args.items)?;
    let simulation = simulate(&args, items, config).await?;
    match format {
        OutputFormat::Text => print_simulation(&simulation),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&simulation.report())?)
        }
    }
    Ok(())
}

// ---- Simulation ----

/// One replayed step and the session it produced.
struct Step {
    text: String,
    changed: bool,
    session: Session,
}

/// Everything a `simulate` run produced, ready for rendering.
struct Simulation {
    entity: EntityKind,
    opened: Session,
    steps: Vec<Step>,
    confirmed: Option<MergeRequest>,
    outcome: Option<CommitOutcome>,
    session: Option<Session>,
    requests: Vec<MergeRequest>,
}

impl Simulation {
    fn report(&self) -> Value {
        let steps: Vec<Value> = self
            .steps
            .iter()
            .map(|step| {
                json!({
                    "step": step.text,
                    "changed": step.changed,
                    "session": step.session,
                })
            })
            .collect();
        json!({
            "entity": self.entity,
            "steps": steps,
            "session": self.session,
            "outcome": self.outcome.as_ref().map(outcome_json),
            "requests": self.requests,
        })
    }
}

async fn simulate(
    args: &SimulateArgs,
    items: Vec<Item>,
    config: DialogConfig,
) -> anyhow::Result<Simulation> {
    let entity = EntityKind::from(args.entity);
    let gestures = args
        .steps
        .iter()
        .map(|step| parse_step(step))
        .collect::<anyhow::Result<Vec<Gesture>>>()?;

    let api = Arc::new(InMemoryMergeApi::new());
    if let Some(message) = &args.reject {
        api.fail_next(message.clone())?;
    }
    let dialog = MergeDialog::new(entity, config, api.clone());
    let opened = dialog.open(items)?;

    let mut steps = Vec::with_capacity(gestures.len());
    let mut session = opened.clone();
    for (text, gesture) in args.steps.iter().zip(&gestures) {
        let Some(next) = dialog.apply(gesture) else {
            break;
        };
        steps.push(Step {
            text: text.clone(),
            changed: next.changed(&session),
            session: next.clone(),
        });
        session = next;
    }

    let mut confirmed = None;
    let outcome = if args.commit {
        let outcome = dialog
            .commit_with(|request| {
                confirmed = Some(request.clone());
                true
            })
            .await;
        match &outcome {
            CommitOutcome::Committed => info!(%entity, "simulated merge committed"),
            CommitOutcome::Failed { message } => warn!(%entity, %message, "simulated merge failed"),
            other => info!(%entity, outcome = ?other, "simulated merge not submitted"),
        }
        Some(outcome)
    } else {
        None
    };

    Ok(Simulation {
        entity,
        opened,
        steps,
        confirmed,
        outcome,
        session: dialog.snapshot(),
        requests: api.requests(),
    })
}

// ---- Rendering ----

fn print_simulation(simulation: &Simulation) {
    println!("{} {} merge session", "●".cyan(), simulation.entity.to_string().bold());
    print_session(&simulation.opened);
    for step in &simulation.steps {
        let note = if step.changed { "".normal() } else { " (no change)".dimmed() };
        println!("\n{} {}{}", "▸".yellow(), step.text.bold(), note);
        print_session(&step.session);
    }
    if let Some(request) = &simulation.confirmed {
        print_request(request);
    }
    if let Some(outcome) = &simulation.outcome {
        print_outcome(outcome);
    }
}

fn print_session(session: &Session) {
    let primary = format!("{:<10}", "primary").green().bold();
    match session.primary_item() {
        Some(item) => println!("  {primary} {} {}", item.id.to_string().yellow(), item.label()),
        None => println!("  {primary} {}", "(empty)".dimmed()),
    }
    let secondary = format!("{:<10}", "secondary").blue().bold();
    if session.secondary().is_empty() {
        println!("  {secondary} {}", "(empty)".dimmed());
    }
    for (i, item) in session.secondary().iter().enumerate() {
        let heading = if i == 0 { secondary.clone() } else { format!("{:<10}", "").normal() };
        println!("  {heading} {}. {} {}", i + 1, item.id.to_string().yellow(), item.label());
    }
}

fn print_request(request: &MergeRequest) {
    let secondaries: Vec<String> = request.secondary_ids.iter().map(ToString::to_string).collect();
    println!("\nMerge {} into {}", secondaries.join(", ").yellow(), request.primary_id.to_string().yellow().bold());
}

fn print_outcome(outcome: &CommitOutcome) {
    match outcome {
        CommitOutcome::Committed => println!("{} Merge committed.", "✓".green().bold()),
        CommitOutcome::Failed { message } => println!("{} Merge failed: {}", "✗".red().bold(), message),
        CommitOutcome::Disabled => println!("{} Merge needs one primary and at least one secondary.", "!".yellow().bold()),
        other => println!("{} {:?}", "!".yellow().bold(), other),
    }
}

fn outcome_json(outcome: &CommitOutcome) -> Value {
    match outcome {
        CommitOutcome::Committed => json!({ "status": "committed" }),
        CommitOutcome::Disabled => json!({ "status": "disabled" }),
        CommitOutcome::Declined => json!({ "status": "declined" }),
        CommitOutcome::InFlight => json!({ "status": "in_flight" }),
        CommitOutcome::Stale => json!({ "status": "stale" }),
        CommitOutcome::Failed { message } => json!({ "status": "failed", "message": message }),
    }
}
