//! Command-line interface — a thin wrapper over the decision engine.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;

use crate::error::CandidateError;
use crate::evaluate::{self, EvaluationContext, GithubRepo};
use crate::policy::{ScoutPolicyConfig, gating};
use crate::report::ScoutReport;
use crate::trigger;

/// `starscout` - Search-vs-build decision engine for coding agents.
#[derive(Parser, Debug)]
#[command(name = "starscout")]
#[command(author = "theonlyhennygod")]
#[command(version = "0.1.0")]
#[command(
    about = "Decides when to search for an existing library and ranks the candidates.",
    long_about = None
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a task description for search-worthiness
    Analyze {
        /// Natural-language task description
        task: String,

        /// Language/framework hint woven into suggested queries
        #[arg(short, long)]
        technology: Option<String>,

        /// Emit the decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank candidate repositories for a task
    Rank {
        /// Natural-language task description
        task: String,

        /// JSON file holding an array of candidate repositories
        #[arg(short, long)]
        candidates: PathBuf,

        /// Language/framework hint
        #[arg(short, long)]
        technology: Option<String>,

        /// Policy file (.json or .toml); documented defaults apply when omitted
        #[arg(short, long)]
        policy: Option<PathBuf>,

        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a policy file and print the effective configuration
    CheckPolicy {
        /// Policy file (.json or .toml)
        file: PathBuf,

        /// Emit the effective configuration as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze {
            task,
            technology,
            json,
        } => analyze(&task, technology.as_deref(), json),
        Commands::Rank {
            task,
            candidates,
            technology,
            policy,
            json,
        } => rank(&task, &candidates, technology.as_deref(), policy.as_deref(), json),
        Commands::CheckPolicy { file, json } => check_policy(&file, json),
    }
}

fn analyze(task: &str, technology: Option<&str>, json: bool) -> Result<()> {
    let decision = trigger::analyze(task, technology);

    if json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
        return Ok(());
    }

    println!(
        "search={} confidence={:.2} category={}",
        if decision.should_search { "yes" } else { "no" },
        decision.confidence,
        decision.category
    );
    if !decision.matched_keywords.is_empty() {
        println!("matched: {}", decision.matched_keywords.join(", "));
    }
    for query in &decision.suggested_queries {
        println!("query: {query}");
    }
    Ok(())
}

fn rank(
    task: &str,
    candidates: &Path,
    technology: Option<&str>,
    policy_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let policy = match policy_path {
        Some(path) => ScoutPolicyConfig::load(path)?,
        None => ScoutPolicyConfig::default(),
    };

    let decision = trigger::analyze(task, technology);
    if !gating::passes_trigger(&policy, &decision) {
        // The operator already fetched candidates, so rank them anyway.
        warn!(
            confidence = decision.confidence,
            threshold = policy.trigger_threshold,
            "Task does not clear the trigger threshold"
        );
    }

    let mut repos = load_candidates(candidates)?;
    if repos.len() > policy.max_repos_to_evaluate {
        warn!(
            supplied = repos.len(),
            limit = policy.max_repos_to_evaluate,
            "Truncating candidate list to the policy limit"
        );
        repos.truncate(policy.max_repos_to_evaluate);
    }

    let mut context =
        EvaluationContext::new(task).with_keywords(decision.matched_keywords.clone());
    if let Some(tech) = technology {
        context = context.with_technology(tech);
    }

    let evaluations = evaluate::evaluate_all(&repos, &context);
    let report = ScoutReport::new(task, decision, evaluations, policy);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.render_text());
        if let Some(disposition) = report.top_disposition(&[]) {
            println!("disposition: {disposition}");
        }
    }
    Ok(())
}

fn check_policy(file: &Path, json: bool) -> Result<()> {
    let policy = ScoutPolicyConfig::load(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&policy)?);
        return Ok(());
    }

    println!("policy ok");
    println!("  integration_mode = {}", policy.integration_mode);
    println!("  trigger_threshold = {}", policy.trigger_threshold);
    println!("  max_repos_to_evaluate = {}", policy.max_repos_to_evaluate);
    println!(
        "  allow_security_warnings = {}",
        policy.allow_security_warnings
    );
    println!(
        "  max_auto_install_deps = {}",
        policy.max_auto_install_deps
    );
    println!(
        "  ask_for_permissions = [{}]",
        policy.ask_for_permissions.join(", ")
    );
    Ok(())
}

fn load_candidates(path: &Path) -> Result<Vec<GithubRepo>, CandidateError> {
    let raw = fs::read_to_string(path).map_err(|source| CandidateError::Read {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CandidateError::Parse {
        path: path.display().to_string(),
        source,
    })
}
