#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod cli;
pub mod error;
pub mod evaluate;
pub mod policy;
pub mod report;
pub mod trigger;

pub use error::{Result, ScoutError};
pub use evaluate::{
    EvaluationContext, GithubRepo, Recommendation, StarEvaluation, evaluate, evaluate_all,
};
pub use policy::gating::Disposition;
pub use policy::{IntegrationMode, ScoutPolicyConfig};
pub use report::ScoutReport;
pub use trigger::{TriggerCategory, TriggerDecision, analyze};
