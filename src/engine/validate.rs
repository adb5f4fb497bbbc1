use crate::types::candidate::{Assignment, Candidate};
use crate::types::config::MissingPolicy;
use crate::types::report::Finding;
use crate::types::schema::CriteriaSchema;
use std::collections::HashSet;

/// Checks candidate assignments against the schema before scoring.
///
/// Unknown aspects, unknown labels, invalid numbers, values that are not a
/// declared option and duplicate ids are always blocking. Missing
/// assignments are warnings under `MissingPolicy::Zero` and blocking under
/// `MissingPolicy::Reject`.
pub fn validate_assignments(
    schema: &CriteriaSchema,
    candidates: &[Candidate],
    missing: MissingPolicy,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut seen = HashSet::new();

    for candidate in candidates {
        let id = candidate.id.as_str();
        if !seen.insert(id) {
            findings.push(Finding::blocking(
                "candidate.duplicate_id",
                "Duplicate candidate id",
                format!("Candidate id {id} appears more than once."),
                Some(id),
            ));
        }

        for (aspect, assignment) in &candidate.scores {
            if schema.column_of(aspect).is_none() {
                findings.push(Finding::blocking(
                    "assignment.unknown_aspect",
                    "Unknown aspect",
                    format!("Candidate {id} is scored on aspect {aspect}, which no criterion declares."),
                    Some(id),
                ));
                continue;
            }
            match assignment {
                Assignment::Label(label) => {
                    if schema.value_for_label(aspect, label).is_none() {
                        findings.push(Finding::blocking(
                            "assignment.unknown_label",
                            "Unknown option label",
                            format!("Candidate {id} uses label '{label}' on aspect {aspect}, which is not a declared option."),
                            Some(id),
                        ));
                    }
                }
                Assignment::Value(value) => {
                    if !value.is_finite() || *value < 0.0 {
                        findings.push(Finding::blocking(
                            "assignment.invalid_value",
                            "Invalid score value",
                            format!("Candidate {id} has value {value} on aspect {aspect}; values must be finite and non-negative."),
                            Some(id),
                        ));
                    } else if schema.has_options(aspect) && !schema.is_declared_value(aspect, *value) {
                        findings.push(Finding::blocking(
                            "assignment.out_of_range",
                            "Value outside option scale",
                            format!("Candidate {id} has value {value} on aspect {aspect}, which matches no declared option."),
                            Some(id),
                        ));
                    }
                }
            }
        }

        let absent = schema
            .aspects()
            .iter()
            .filter(|aspect| !candidate.scores.contains_key(aspect.as_str()))
            .map(String::as_str)
            .collect::<Vec<_>>();
        if !absent.is_empty() {
            let body = format!(
                "Candidate {id} has no assignment for: {}.",
                absent.join(", ")
            );
            findings.push(match missing {
                MissingPolicy::Zero => Finding::warning(
                    "assignment.missing",
                    "Missing assignment scored as 0",
                    body,
                    Some(id),
                ),
                MissingPolicy::Reject => Finding::blocking(
                    "assignment.missing",
                    "Missing assignment rejected",
                    body,
                    Some(id),
                ),
            });
        }
    }

    findings
}
