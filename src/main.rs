mod cli;
mod config;
mod engine;
mod error;
mod logging;
mod report;
mod selection;
mod types;

use crate::error::RankError;
use crate::types::report::{Finding, RankingReport};
use clap::Parser;
use std::path::Path;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

struct Loaded {
    config: types::config::AidrankConfig,
    schema: types::schema::CriteriaSchema,
    candidates: Vec<types::candidate::Candidate>,
    findings: Vec<Finding>,
}

fn load(path: &Path) -> Result<Loaded, RankError> {
    if !path.exists() {
        return Err(RankError::PathNotFound(path.display().to_string()));
    }
    let config = config::load_config(path)?;
    let schema = config.schema()?;
    let candidates = config::load_candidates(path, &config)?;
    let findings =
        engine::validate::validate_assignments(&schema, &candidates, config.scoring.missing);
    Ok(Loaded {
        config,
        schema,
        candidates,
        findings,
    })
}

fn print_findings(findings: &[Finding]) {
    for finding in findings {
        let level = if finding.blocking { "BLOCKING" } else { "WARN" };
        println!("[{}] {}: {}", level, finding.id, finding.title);
        println!("  {}", finding.body);
    }
}

fn has_blocking(findings: &[Finding]) -> bool {
    findings.iter().any(|finding| finding.blocking)
}

fn run(cli: cli::Cli) -> Result<i32, RankError> {
    match cli.command {
        cli::Commands::Rank(cmd) => {
            let loaded = load(&cmd.path)?;
            if has_blocking(&loaded.findings) {
                print_findings(&loaded.findings);
                return Ok(exit_code::BLOCKING);
            }

            let ranking = engine::compute_ranking(
                &loaded.schema,
                &loaded.candidates,
                loaded.config.scoring.tie_break,
            )?;
            let program = loaded.config.active_program();
            let recipients = program
                .map(|program| {
                    engine::rank::select_top_k(&ranking.results, program.quota, program.amount)
                })
                .unwrap_or_default();
            let ranking_report = RankingReport {
                program_id: program.map(|program| program.id.clone()),
                ranking,
                recipients,
                findings: loaded.findings,
            };

            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            let rendered = report::render(&ranking_report, output_format)?;
            println!("{rendered}");

            if ranking_report.findings.is_empty() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::WARNINGS)
            }
        }
        cli::Commands::Validate(cmd) => {
            let loaded = load(&cmd.path)?;
            if loaded.findings.is_empty() {
                println!(
                    "validate: no findings ({} candidate(s), {} aspect(s))",
                    loaded.candidates.len(),
                    loaded.schema.aspects().len()
                );
                return Ok(exit_code::SUCCESS);
            }

            print_findings(&loaded.findings);
            if has_blocking(&loaded.findings) {
                Ok(exit_code::BLOCKING)
            } else {
                Ok(exit_code::WARNINGS)
            }
        }
        cli::Commands::Select(cmd) => {
            let loaded = load(&cmd.path)?;
            if has_blocking(&loaded.findings) {
                print_findings(&loaded.findings);
                return Ok(exit_code::BLOCKING);
            }

            let outcome =
                selection::select(&cmd.path, &loaded.config, &loaded.candidates, cmd.dry_run)?;
            let recipients = match &outcome {
                selection::SelectionOutcome::Recorded { path, record } => {
                    println!("selection recorded: {}", path.display());
                    record.recipients.clone()
                }
                selection::SelectionOutcome::Unchanged { path, record } => {
                    println!("selection unchanged: {}", path.display());
                    record.recipients.clone()
                }
                selection::SelectionOutcome::Preview { recipients } => {
                    println!("dry run: no selection was recorded");
                    recipients.clone()
                }
                selection::SelectionOutcome::Skipped => {
                    println!("select: no candidates; nothing recorded");
                    Vec::new()
                }
            };
            for recipient in &recipients {
                println!(
                    "- #{} {} score={:.6} amount={}",
                    recipient.rank, recipient.candidate_id, recipient.score, recipient.amount
                );
            }

            if loaded.findings.is_empty() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::WARNINGS)
            }
        }
        cli::Commands::Status(cmd) => {
            if !cmd.path.exists() {
                return Err(RankError::PathNotFound(cmd.path.display().to_string()));
            }
            let loaded = config::load_config(&cmd.path)?;
            match selection::status(&cmd.path, &loaded)? {
                selection::ProgramStatus::NoActiveProgram => {
                    println!("status: no active program");
                }
                selection::ProgramStatus::Pending { program_id } => {
                    println!("status: program {program_id} active, selection pending");
                }
                selection::ProgramStatus::Recorded { record } => {
                    println!(
                        "status: program {} active, {} recipient(s) recorded at {}",
                        record.program_id,
                        record.recipients.len(),
                        record.recorded_at
                    );
                }
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    let cli = cli::Cli::parse();
    if let Err(e) = logging::init(cli.verbose, cli.quiet) {
        eprintln!("warning: {e}");
    }

    match run(cli) {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
