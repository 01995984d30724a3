//! Scenario runner: times each scenario, reports it and aggregates results

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{OutputFormat, ProgressReporter};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};
use vitrina::VitrinaResult;

/// Outcome of one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Scenario name
    pub name: String,
    /// Whether the scenario passed
    pub passed: bool,
    /// Violations, or the error that aborted the scenario
    pub errors: Vec<String>,
    /// Scenario duration
    pub duration: Duration,
}

impl ScenarioResult {
    /// Passed exactly when `errors` is empty
    #[must_use]
    pub fn from_errors(name: impl Into<String>, errors: Vec<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            passed: errors.is_empty(),
            errors,
            duration,
        }
    }
}

/// Aggregated scenario results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioResults {
    /// Individual results in run order
    pub results: Vec<ScenarioResult>,
    /// Total duration
    pub duration: Duration,
}

impl ScenarioResults {
    /// Create new empty results
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a scenario result
    pub fn add(&mut self, result: ScenarioResult) {
        self.results.push(result);
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// `Err(ScenarioFailed)` when anything failed
    pub fn into_outcome(self) -> CliResult<()> {
        if self.all_passed() {
            Ok(())
        } else {
            Err(CliError::ScenarioFailed {
                failed: self.failed(),
                total: self.total(),
            })
        }
    }
}

/// Runs scenarios one after another
#[derive(Debug)]
pub struct ScenarioRunner {
    format: OutputFormat,
    reporter: ProgressReporter,
    results: ScenarioResults,
    started: Instant,
}

impl ScenarioRunner {
    #[must_use]
    pub fn new(config: &CliConfig) -> Self {
        // JSON output keeps stderr free of progress noise
        let quiet = config.verbosity.is_quiet() || config.output == OutputFormat::Json;
        Self {
            format: config.output,
            reporter: ProgressReporter::new(config.color.should_color(), quiet),
            results: ScenarioResults::new(),
            started: Instant::now(),
        }
    }

    #[must_use]
    pub const fn reporter(&self) -> &ProgressReporter {
        &self.reporter
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        self.reporter.header(title);
    }

    /// Await `scenario` and record its outcome; an `Err` becomes a single
    /// violation rather than aborting the run
    pub async fn run<F>(&mut self, name: &str, scenario: F) -> bool
    where
        F: Future<Output = VitrinaResult<Vec<String>>>,
    {
        self.reporter.start(name);
        let start = Instant::now();
        let outcome = scenario.await;
        let duration = start.elapsed();
        self.reporter.stop();

        let errors = match outcome {
            Ok(errors) => errors,
            Err(e) => vec![e.to_string()],
        };
        let result = ScenarioResult::from_errors(name, errors, duration);

        if result.passed {
            self.reporter
                .success(&format!("{name} ({}ms)", duration.as_millis()));
        } else {
            self.reporter.failure(name);
            for error in &result.errors {
                self.reporter.detail(error);
            }
        }
        tracing::debug!(scenario = name, passed = result.passed, ?duration, "scenario finished");

        let passed = result.passed;
        self.results.add(result);
        passed
    }

    /// Print the summary (or the JSON document) and hand back the results
    pub fn finish(mut self) -> CliResult<ScenarioResults> {
        self.results.duration = self.started.elapsed();
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&self.results)?);
            }
            OutputFormat::Text => {
                self.reporter.summary(
                    self.results.passed(),
                    self.results.failed(),
                    self.results.duration,
                );
            }
        }
        Ok(self.results)
    }
}
