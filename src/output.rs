//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use serde::Serialize;

use crate::core::models::VerificationRecord;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// A single verification record
#[derive(Debug, Serialize)]
pub struct RecordResult {
    /// The record
    #[serde(flatten)]
    pub record: VerificationRecord,
    /// Write time as RFC 3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written_at: Option<String>,
}

impl From<VerificationRecord> for RecordResult {
    fn from(record: VerificationRecord) -> Self {
        Self {
            written_at: record.timestamp_rfc3339(),
            record,
        }
    }
}

/// A list of verification records
#[derive(Debug, Serialize)]
pub struct RecordListResult {
    /// Records, ascending by id
    pub verifications: Vec<VerificationRecord>,
    /// Number of records listed
    pub count: usize,
}

impl From<Vec<VerificationRecord>> for RecordListResult {
    fn from(verifications: Vec<VerificationRecord>) -> Self {
        Self {
            count: verifications.len(),
            verifications,
        }
    }
}

/// Number of stored records
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CountResult {
    /// Record count
    pub count: usize,
}

/// Overview of the local installation
#[derive(Debug, Serialize)]
pub struct StatusResult {
    /// Crate version
    pub version: String,
    /// Model used for analysis
    pub model: String,
    /// Executions compared per analysis
    pub validators: usize,
    /// Whether a model API key is available
    pub api_key_configured: bool,
    /// Ledger snapshot location
    pub ledger: String,
    /// Records in the ledger
    pub verifications: usize,
    /// Id the next write will receive
    pub next_id: u64,
    /// URLs processed per batch
    pub batch_limit: usize,
    /// Characters of page content sent to the model
    pub content_limit: usize,
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn print_record(record: &VerificationRecord) {
    println!("Verification #{}", record.id);
    println!("  URL:         {}", record.url);
    println!("  Originality: {}", record.originality);
    println!("  Plagiarism:  {}", record.plagiarism);
    println!("  Deepfake:    {}", record.deepfake);
    println!("  Sentiment:   {}", record.sentiment);
    println!("  Status:      {}", record.status);
    println!("  Validator:   {}", record.validator);
    if !record.summary.is_empty() {
        println!("\n  Summary:   {}", record.summary);
    }
    if !record.reasoning.is_empty() {
        println!("  Reasoning: {}", record.reasoning);
    }
}

impl RecordResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                print_record(&self.record);
                if let Some(at) = &self.written_at {
                    println!("  Written:   {at}");
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

impl RecordListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.verifications.is_empty() {
            println!("No verifications recorded.");
            return;
        }

        println!("  ID  ORIG PLAG FAKE  SENTIMENT URL");
        for r in &self.verifications {
            println!(
                "{:>4}  {:>4} {:>4} {:>4}  {:<9} {}",
                r.id, r.originality, r.plagiarism, r.deepfake, r.sentiment, r.url
            );
        }
        println!("\n{} verification(s)", self.count);
    }
}

impl CountResult {
    /// Render the result based on output mode
    pub fn render(self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.count),
            OutputMode::Json => print_json(&self),
        }
    }
}

impl StatusResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        println!("authgate v{}", self.version);
        println!();
        println!("Model:      {} ({} validator(s))", self.model, self.validators);
        println!(
            "API key:    {}",
            if self.api_key_configured { "configured" } else { "missing" }
        );
        println!("Ledger:     {}", self.ledger);
        println!("Records:    {} (next id {})", self.verifications, self.next_id);
        println!(
            "Limits:     {} urls per batch, {} chars per page",
            self.batch_limit, self.content_limit
        );
    }
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => print_json(self),
        }
    }
}
