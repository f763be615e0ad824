//! `url_checkr` — assess whether a URL is likely phishing, spoofing or typosquatting.
//!
//! # Flow
//! 1. Normalize raw input into an absolute URL ([`normalizer::normalize`]).
//! 2. Classify it behind the async [`backend::Classifier`] boundary; the
//!    built-in [`backend::LocalBackend`] runs the [`engine::RiskEngine`].
//! 3. Validate and wrap the result ([`action::analyze`], [`action::check_url_safety`]).
//!
//! Rule lists come from [`config::Config`] and are fixed for the life of an engine.

pub mod action;
pub mod backend;
pub mod config;
pub mod engine;
pub mod models;
pub mod normalizer;

pub use backend::{Classifier, LocalBackend};
pub use engine::RiskEngine;
pub use models::{AnalysisOutput, CheckOutcome, ScanResult};
pub use normalizer::{normalize, NormalizationError, NormalizedUrl};
