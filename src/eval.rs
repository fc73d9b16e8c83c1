//! Heuristic evaluation harness (`ragchat eval`).
//!
//! Runs each sample question through the ranker and scores the retrieved
//! context with three ad hoc metrics. These are rough sanity numbers for
//! the keyword ranker, not real RAG metrics.
//!
//! | Metric | Non-fallback sample | Fallback sample |
//! |--------|---------------------|-----------------|
//! | context recall | `min(mean score + 0.2, 1.0)`, `0.0` if nothing found | `1.0` if nothing found, else `0.0` |
//! | answer relevancy | `0.9` hooks + "usememo", `0.85` components + "button", else `0.5` | `0.9` if context empty, else `0.3` |
//! | faithfulness | `0.6`, `+0.2` context > 100 chars, `+0.2` code in context | `1.0` |
//!
//! The overall score is the mean of the three.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use ragchat_core::context::generate_context_from_results;
use ragchat_core::models::SearchResult;
use ragchat_core::search::{search_documents, SearchParams};
use ragchat_core::store::knowledge::react_knowledge_base;
use ragchat_core::store::Store;

use crate::config::Config;

const DEFAULT_SAMPLES: &str = include_str!("../data/samples.json");

const RICH_CONTEXT_CHARS: usize = 100;

/// Topic a sample belongs to. Unknown categories map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleCategory {
    Hooks,
    Components,
    /// Questions the knowledge base should not answer.
    Fallback,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvalSample {
    pub question: String,
    pub expected_answer: String,
    pub category: SampleCategory,
}

#[derive(Debug, Deserialize)]
struct SampleFile {
    evaluation_samples: Vec<EvalSample>,
}

/// Scores for one sample.
#[derive(Debug, Clone, Serialize)]
pub struct EvalResult {
    pub question: String,
    pub context_recall: f64,
    pub answer_relevancy: f64,
    pub faithfulness: f64,
    pub overall_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Excellent,
    Good,
    NeedsWork,
}

impl Verdict {
    pub fn from_score(overall: f64) -> Self {
        if overall >= 0.8 {
            Verdict::Excellent
        } else if overall >= 0.6 {
            Verdict::Good
        } else {
            Verdict::NeedsWork
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent retrieval performance.",
            Verdict::Good => "Good performance, with room for improvement.",
            Verdict::NeedsWork => "Retrieval needs significant tuning.",
        }
    }
}

/// Per-sample scores plus their means.
#[derive(Debug, Clone, Serialize)]
pub struct EvalReport {
    pub results: Vec<EvalResult>,
    pub avg_context_recall: f64,
    pub avg_answer_relevancy: f64,
    pub avg_faithfulness: f64,
    pub avg_overall: f64,
    pub verdict: Verdict,
}

pub fn parse_samples(json: &str) -> Result<Vec<EvalSample>> {
    let file: SampleFile = serde_json::from_str(json).context("Invalid samples JSON")?;
    Ok(file.evaluation_samples)
}

pub fn load_samples(path: &Path) -> Result<Vec<EvalSample>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read samples file: {}", path.display()))?;
    parse_samples(&content)
}

/// The sample set compiled into the binary.
pub fn default_samples() -> Result<Vec<EvalSample>> {
    parse_samples(DEFAULT_SAMPLES)
}

pub fn context_recall(sample: &EvalSample, results: &[SearchResult]) -> f64 {
    if sample.category == SampleCategory::Fallback {
        return if results.is_empty() { 1.0 } else { 0.0 };
    }
    if results.is_empty() {
        return 0.0;
    }
    let mean = results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64;
    (mean + 0.2).min(1.0)
}

pub fn answer_relevancy(sample: &EvalSample, context: &str) -> f64 {
    let question = sample.question.to_lowercase();
    match sample.category {
        SampleCategory::Hooks if question.contains("usememo") => 0.9,
        SampleCategory::Components if question.contains("button") => 0.85,
        SampleCategory::Fallback => {
            if context.is_empty() {
                0.9
            } else {
                0.3
            }
        }
        _ => 0.5,
    }
}

pub fn faithfulness(sample: &EvalSample, context: &str) -> f64 {
    if sample.category == SampleCategory::Fallback {
        return 1.0;
    }

    let mut score = 0.6;
    if context.chars().count() > RICH_CONTEXT_CHARS {
        score += 0.2;
    }
    if context.contains("```") || context.contains("const ") || context.contains("function ") {
        score += 0.2;
    }
    f64::min(score, 1.0)
}

pub fn evaluate_sample<S: Store + ?Sized>(
    store: &S,
    params: &SearchParams,
    sample: &EvalSample,
) -> EvalResult {
    let results = search_documents(store, &sample.question, params);
    let context = generate_context_from_results(&results);

    let recall = context_recall(sample, &results);
    let relevancy = answer_relevancy(sample, &context);
    let faithful = faithfulness(sample, &context);
    debug!(question = %sample.question, results = results.len(), "evaluated sample");

    EvalResult {
        question: sample.question.clone(),
        context_recall: recall,
        answer_relevancy: relevancy,
        faithfulness: faithful,
        overall_score: (recall + relevancy + faithful) / 3.0,
    }
}

/// Score every sample. Fails on an empty sample set.
pub fn evaluate<S: Store + ?Sized>(
    store: &S,
    params: &SearchParams,
    samples: &[EvalSample],
) -> Result<EvalReport> {
    if samples.is_empty() {
        bail!("no evaluation samples");
    }

    let results: Vec<EvalResult> = samples
        .iter()
        .map(|s| evaluate_sample(store, params, s))
        .collect();

    let n = results.len() as f64;
    let mean = |f: fn(&EvalResult) -> f64| results.iter().map(f).sum::<f64>() / n;
    let avg_context_recall = mean(|r| r.context_recall);
    let avg_answer_relevancy = mean(|r| r.answer_relevancy);
    let avg_faithfulness = mean(|r| r.faithfulness);
    let avg_overall = mean(|r| r.overall_score);

    Ok(EvalReport {
        verdict: Verdict::from_score(avg_overall),
        results,
        avg_context_recall,
        avg_answer_relevancy,
        avg_faithfulness,
        avg_overall,
    })
}

pub fn run_eval(config: &Config, samples_path: Option<&Path>, json: bool) -> Result<()> {
    let samples = match samples_path {
        Some(path) => load_samples(path)?,
        None => default_samples()?,
    };
    let store = react_knowledge_base();
    let report = evaluate(&store, &config.retrieval.search_params(), &samples)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("ragchat evaluation ({} samples)", report.results.len());
    println!();
    for r in &report.results {
        println!("  {}", r.question);
        println!("    context recall:    {:.3}", r.context_recall);
        println!("    answer relevancy:  {:.3}", r.answer_relevancy);
        println!("    faithfulness:      {:.3}", r.faithfulness);
        println!("    overall:           {:.3}", r.overall_score);
        println!();
    }
    println!("Averages");
    println!("================================");
    println!("  Context recall:    {:.3}", report.avg_context_recall);
    println!("  Answer relevancy:  {:.3}", report.avg_answer_relevancy);
    println!("  Faithfulness:      {:.3}", report.avg_faithfulness);
    println!("  Overall:           {:.3}", report.avg_overall);
    println!("================================");
    println!();
    println!("{}", report.verdict.describe());

    Ok(())
}
