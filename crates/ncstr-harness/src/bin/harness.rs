//! CLI entrypoint for the ncstr conformance harness.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};

use ncstr_harness::execute::execute_fixture_case;
use ncstr_harness::fixtures::{fixture_files, load_fixture_sets};
use ncstr_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogEntry, LogLevel, Outcome, now_utc,
};
use ncstr_harness::verify::VerificationSummary;
use ncstr_harness::{ConformanceReport, HarnessError, TestRunner};
use ncstr_membrane::{HealingAction, global_healing_policy};

/// Conformance tooling for ncstr.
#[derive(Debug, Parser)]
#[command(name = "ncstr-harness")]
#[command(about = "Conformance testing harness for ncstr")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the C boundary and the safe core against fixture files.
    Verify {
        /// Fixture JSON file, or directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Runtime mode to test (`strict` or `hardened`); both when omitted.
        #[arg(long)]
        mode: Option<String>,
        /// Output report path (markdown); a `.json` sibling is written too.
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Optional fixed timestamp string for deterministic report generation.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Run a single function call and print its rendered output.
    Eval {
        /// Function name (`strlen`, `strncmp`, `strnstr`, `substr`, `count`, `numlen`, `clamp`).
        function: String,
        /// Inputs as a JSON object, e.g. `{"s":"hello world","start":6,"len":5}`.
        #[arg(long)]
        input: String,
    },
    /// Write a SHA-256 artifact index of the fixture files.
    Digest {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Output JSON path (if omitted, prints to stdout).
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode, HarnessError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Verify {
            fixture,
            mode,
            report,
            log,
            timestamp,
        } => verify(fixture, mode, report, log, timestamp),
        Command::Eval { function, input } => {
            let inputs: serde_json::Value = serde_json::from_str(&input)?;
            let run = execute_fixture_case(&function, &inputs)?;
            println!("{}", run.impl_output);
            if !run.parity() {
                eprintln!(
                    "core parity mismatch: core={}",
                    run.core_output.as_deref().unwrap_or("-")
                );
                return Ok(ExitCode::FAILURE);
            }
            if let Some(note) = run.note {
                eprintln!("note: {note}");
            }
            if let Some(action) = run.healing_action {
                eprintln!("heal: {action}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Digest { fixture, output } => {
            let mut index = ArtifactIndex::new(format!("digest-{}", std::process::id()));
            for path in fixture_files(&fixture)? {
                index.add_file(&path, "fixture")?;
            }
            let json = index.to_json()?;
            match output {
                Some(path) => std::fs::write(path, json)?,
                None => println!("{json}"),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn verify(
    fixture: PathBuf,
    mode: Option<String>,
    report: Option<PathBuf>,
    log: Option<PathBuf>,
    timestamp: Option<String>,
) -> Result<ExitCode, HarnessError> {
    eprintln!("Verifying against fixtures in {}", fixture.display());
    let fixture_sets = load_fixture_sets(&fixture)?;
    let modes: Vec<String> = match mode {
        Some(m) => vec![m],
        None => vec!["strict".to_string(), "hardened".to_string()],
    };

    let run_id = format!("verify-{}", std::process::id());
    let mut emitter = match &log {
        Some(path) => Some(LogEmitter::to_file(path, &run_id)?),
        None => None,
    };
    if let Some(emitter) = emitter.as_mut() {
        emitter.emit(LogLevel::Info, "verify_start")?;
    }

    let mut results = Vec::new();
    for mode in &modes {
        let runner = TestRunner::new("fixture-verify", mode.as_str());
        for set in &fixture_sets {
            let started = Instant::now();
            let set_results = runner.run(set)?;
            let elapsed = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);

            if let Some(emitter) = emitter.as_mut() {
                for r in &set_results {
                    let (level, outcome) = if r.passed {
                        (LogLevel::Info, Outcome::Pass)
                    } else {
                        (LogLevel::Error, Outcome::Fail)
                    };
                    let mut entry = LogEntry::new("", level, "case_result")
                        .with_mode(mode.as_str())
                        .with_case(r.function.as_str(), r.case_name.as_str())
                        .with_outcome(outcome);
                    if let Some(action) = &r.healing_action {
                        entry = entry.with_healing_action(action.as_str());
                    }
                    if !r.passed {
                        entry = entry.with_details(serde_json::json!({
                            "expected": r.expected,
                            "actual": r.actual,
                        }));
                    }
                    emitter.emit_entry(entry)?;
                }
                emitter.emit_entry(
                    LogEntry::new("", LogLevel::Debug, "fixture_set_done")
                        .with_mode(mode.as_str())
                        .with_latency_ns(elapsed)
                        .with_details(serde_json::json!({
                            "family": set.family,
                            "cases": set_results.len(),
                        })),
                )?;
            }
            results.extend(set_results);
        }
    }

    // Stable ordering for reproducible reports.
    results.sort_by(|a, b| {
        a.function
            .cmp(&b.function)
            .then_with(|| a.case_name.cmp(&b.case_name))
    });

    let summary = VerificationSummary::from_results(results);
    let report_doc = ConformanceReport {
        title: String::from("ncstr Conformance Report"),
        mode: modes.join("+"),
        timestamp: timestamp.unwrap_or_else(now_utc),
        summary,
    };

    eprintln!(
        "Verification complete: total={}, passed={}, failed={}",
        report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
    );

    let mut artifacts = Vec::new();
    match report {
        Some(report_path) => {
            eprintln!("Writing report to {}", report_path.display());
            std::fs::write(&report_path, report_doc.to_markdown())?;
            let json_path = report_path.with_extension("json");
            std::fs::write(&json_path, report_doc.to_json())?;
            artifacts.push(report_path.display().to_string());
            artifacts.push(json_path.display().to_string());
        }
        None => println!("{}", report_doc.to_markdown()),
    }

    if let Some(emitter) = emitter.as_mut() {
        let heals = global_healing_policy().snapshot();
        let mut heal_counts: serde_json::Map<String, serde_json::Value> = [
            (HealingAction::ReturnSafeDefault, heals.safe_defaults),
            (HealingAction::IgnoreDoubleFree, heals.double_frees),
            (HealingAction::IgnoreForeignFree, heals.foreign_frees),
        ]
        .into_iter()
        .map(|(action, n)| (action.name().to_string(), serde_json::Value::from(n)))
        .collect();
        heal_counts.insert("total".to_string(), heals.total_heals.into());
        let level = if report_doc.summary.all_passed() {
            LogLevel::Info
        } else {
            LogLevel::Error
        };
        emitter.emit_entry(
            LogEntry::new("", level, "verify_done")
                .with_artifacts(artifacts)
                .with_details(serde_json::json!({
                    "total": report_doc.summary.total,
                    "passed": report_doc.summary.passed,
                    "failed": report_doc.summary.failed,
                    "healed_cases": report_doc.summary.healed,
                    "heals": heal_counts,
                })),
        )?;
        emitter.flush()?;
    }

    if report_doc.summary.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
