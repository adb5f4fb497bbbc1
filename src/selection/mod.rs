pub mod store;

use crate::engine::{self, rank, validate};
use crate::error::{RankError, Result};
use crate::types::candidate::Candidate;
use crate::types::config::{AidrankConfig, MissingPolicy, ProgramConfig, TieBreak};
use crate::types::ranking::Recipient;
use crate::types::schema::{CriterionConfig, SubCriterionOption};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use store::{ProgramRecord, RecordState};
use tracing::info;

/// Where the configured program sits in its selection lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramStatus {
    NoActiveProgram,
    Pending { program_id: String },
    Recorded { record: ProgramRecord },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOutcome {
    /// A new top-K replaced whatever was recorded before.
    Recorded { path: PathBuf, record: ProgramRecord },
    /// The recorded top-K already matches these inputs.
    Unchanged { path: PathBuf, record: ProgramRecord },
    /// Dry run: the top-K that would be recorded.
    Preview { recipients: Vec<Recipient> },
    /// No candidates, nothing selected.
    Skipped,
}

pub fn status(root: &Path, config: &AidrankConfig) -> Result<ProgramStatus> {
    let Some(program) = config.active_program() else {
        return Ok(ProgramStatus::NoActiveProgram);
    };
    Ok(match store::read_record(root, &program.id)? {
        Some(record) => ProgramStatus::Recorded { record },
        None => ProgramStatus::Pending {
            program_id: program.id.clone(),
        },
    })
}

#[derive(Serialize)]
struct DigestInput<'a> {
    program: &'a ProgramConfig,
    criteria: &'a [CriterionConfig],
    options: &'a [SubCriterionOption],
    missing: MissingPolicy,
    tie_break: TieBreak,
    candidates: &'a [Candidate],
}

/// SHA-256 over everything that can change the recorded top-K.
pub fn inputs_digest(
    config: &AidrankConfig,
    program: &ProgramConfig,
    candidates: &[Candidate],
) -> Result<String> {
    let input = DigestInput {
        program,
        criteria: &config.criteria,
        options: &config.options,
        missing: config.scoring.missing,
        tie_break: config.scoring.tie_break,
        candidates,
    };
    let bytes = serde_json::to_vec(&input)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

/// Ranks the candidates and records the active program's top-K as a total
/// replacement of any earlier selection.
pub fn select(
    root: &Path,
    config: &AidrankConfig,
    candidates: &[Candidate],
    dry_run: bool,
) -> Result<SelectionOutcome> {
    let program = config.active_program().ok_or_else(|| {
        RankError::NoActiveProgram(
            config
                .program
                .as_ref()
                .map(|program| format!("program {} is inactive", program.id))
                .unwrap_or_else(|| "no [program] configured".to_string()),
        )
    })?;

    let schema = config.schema()?;
    let blocking = validate::validate_assignments(&schema, candidates, config.scoring.missing)
        .into_iter()
        .filter(|finding| finding.blocking)
        .map(|finding| match finding.candidate {
            Some(candidate) => format!("{} ({candidate})", finding.id),
            None => finding.id,
        })
        .collect::<Vec<_>>();
    if !blocking.is_empty() {
        return Err(RankError::Validation(blocking.join(", ")));
    }

    let ranking = engine::compute_ranking(&schema, candidates, config.scoring.tie_break)?;
    if ranking.is_empty() {
        info!(program = %program.id, "no candidates; selection skipped");
        return Ok(SelectionOutcome::Skipped);
    }

    let recipients = rank::select_top_k(&ranking.results, program.quota, program.amount);
    if dry_run {
        return Ok(SelectionOutcome::Preview { recipients });
    }

    let digest = inputs_digest(config, program, candidates)?;
    if let Some(existing) = store::read_record(root, &program.id)? {
        if existing.inputs_digest == digest && existing.recipients == recipients {
            info!(program = %program.id, "selection unchanged");
            return Ok(SelectionOutcome::Unchanged {
                path: store::record_path(root, &program.id),
                record: existing,
            });
        }
    }

    let record = ProgramRecord {
        program_id: program.id.clone(),
        state: RecordState::Recorded,
        recorded_at: Utc::now().to_rfc3339(),
        aidrank_version: env!("CARGO_PKG_VERSION").to_string(),
        inputs_digest: digest,
        recipients,
    };
    let path = store::write_record(root, &record)?;
    info!(
        program = %program.id,
        recipients = record.recipients.len(),
        path = %path.display(),
        "selection recorded"
    );
    Ok(SelectionOutcome::Recorded { path, record })
}
