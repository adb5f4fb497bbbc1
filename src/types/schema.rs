use crate::error::{RankError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::ops::Range;

/// Allowed drift of the criteria weight sum away from 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionKind {
    Benefit,
    Cost,
}

impl CriterionKind {
    pub fn sign(self) -> f64 {
        match self {
            Self::Benefit => 1.0,
            Self::Cost => -1.0,
        }
    }
}

/// A main criterion as declared in `aidrank.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionConfig {
    pub code: String,
    pub weight: f64,
    #[serde(rename = "type", default = "default_kind")]
    pub kind: CriterionKind,
    /// Explicit aspect list. When empty, aspects are derived from the option
    /// table by code prefix.
    #[serde(default)]
    pub aspects: Vec<String>,
}

fn default_kind() -> CriterionKind {
    CriterionKind::Benefit
}

/// One ordinal scale option for an aspect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCriterionOption {
    pub aspect: String,
    pub value: f64,
    pub label: String,
}

/// A validated criterion with its resolved aspect columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    pub code: String,
    pub weight: f64,
    pub kind: CriterionKind,
    pub aspects: Vec<String>,
    columns: Range<usize>,
}

impl Criterion {
    /// Column range of this criterion's aspects in the decision matrix.
    pub fn columns(&self) -> Range<usize> {
        self.columns.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CriteriaSchema {
    criteria: Vec<Criterion>,
    options: Vec<SubCriterionOption>,
    columns: Vec<String>,
    column_index: HashMap<String, usize>,
}

impl CriteriaSchema {
    pub fn new(
        criteria: Vec<CriterionConfig>,
        options: Vec<SubCriterionOption>,
    ) -> Result<Self> {
        if criteria.is_empty() {
            return Err(RankError::InvalidSchema(
                "at least one criterion is required".to_string(),
            ));
        }

        let mut seen_codes = HashSet::<&str>::new();
        for criterion in &criteria {
            let code = criterion.code.trim();
            if code.is_empty() {
                return Err(RankError::InvalidSchema(
                    "criteria.code entries must be non-empty".to_string(),
                ));
            }
            if !seen_codes.insert(code) {
                return Err(RankError::InvalidSchema(format!(
                    "duplicate criterion code: {code}"
                )));
            }
            if !criterion.weight.is_finite() || criterion.weight <= 0.0 || criterion.weight > 1.0
            {
                return Err(RankError::InvalidSchema(format!(
                    "criterion {code} weight must be in (0, 1] (found {})",
                    criterion.weight
                )));
            }
        }

        let weight_sum: f64 = criteria.iter().map(|criterion| criterion.weight).sum();
        if (weight_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(RankError::InvalidSchema(format!(
                "criteria weights must sum to 1.0 (found {weight_sum:.6})"
            )));
        }

        validate_options(&options)?;
        let aspect_lists = resolve_aspects(&criteria, &options)?;

        let mut resolved = Vec::with_capacity(criteria.len());
        let mut columns = Vec::new();
        let mut column_index = HashMap::new();
        for (criterion, aspects) in criteria.into_iter().zip(aspect_lists) {
            if aspects.is_empty() {
                return Err(RankError::InvalidSchema(format!(
                    "criterion {} has no aspects",
                    criterion.code
                )));
            }
            let start = columns.len();
            for aspect in &aspects {
                if column_index.insert(aspect.clone(), columns.len()).is_some() {
                    return Err(RankError::InvalidSchema(format!(
                        "aspect {aspect} is claimed by more than one criterion"
                    )));
                }
                columns.push(aspect.clone());
            }
            resolved.push(Criterion {
                code: criterion.code.trim().to_string(),
                weight: criterion.weight,
                kind: criterion.kind,
                aspects,
                columns: start..columns.len(),
            });
        }

        Ok(Self {
            criteria: resolved,
            options,
            columns,
            column_index,
        })
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Aspect codes in decision matrix column order.
    pub fn aspects(&self) -> &[String] {
        &self.columns
    }

    pub fn column_of(&self, aspect: &str) -> Option<usize> {
        self.column_index.get(aspect).copied()
    }

    pub fn options_for<'a>(
        &'a self,
        aspect: &'a str,
    ) -> impl Iterator<Item = &'a SubCriterionOption> + 'a {
        self.options
            .iter()
            .filter(move |option| option.aspect == aspect)
    }

    pub fn has_options(&self, aspect: &str) -> bool {
        self.options_for(aspect).next().is_some()
    }

    /// Looks up the value of the option with `label` on `aspect`.
    pub fn value_for_label(&self, aspect: &str, label: &str) -> Option<f64> {
        self.options_for(aspect)
            .find(|option| option.label == label)
            .map(|option| option.value)
    }

    pub fn is_declared_value(&self, aspect: &str, value: f64) -> bool {
        self.options_for(aspect)
            .any(|option| (option.value - value).abs() < 1e-9)
    }
}

fn validate_options(options: &[SubCriterionOption]) -> Result<()> {
    let mut values = HashSet::<(&str, u64)>::new();
    let mut labels = HashSet::<(&str, &str)>::new();
    for option in options {
        if option.aspect.trim().is_empty() {
            return Err(RankError::InvalidSchema(
                "options.aspect entries must be non-empty".to_string(),
            ));
        }
        if !option.value.is_finite() || option.value < 0.0 {
            return Err(RankError::InvalidSchema(format!(
                "option {} on aspect {} must have a finite, non-negative value",
                option.label, option.aspect
            )));
        }
        if !values.insert((option.aspect.as_str(), option.value.to_bits())) {
            return Err(RankError::InvalidSchema(format!(
                "aspect {} declares value {} more than once",
                option.aspect, option.value
            )));
        }
        if !labels.insert((option.aspect.as_str(), option.label.as_str())) {
            return Err(RankError::InvalidSchema(format!(
                "aspect {} declares label '{}' more than once",
                option.aspect, option.label
            )));
        }
    }
    Ok(())
}

/// Resolves each criterion's aspect list. Explicit lists win; criteria
/// without one claim every option aspect whose code starts with the
/// criterion code. An unclaimed option aspect must prefix-match exactly one
/// such criterion.
fn resolve_aspects(
    criteria: &[CriterionConfig],
    options: &[SubCriterionOption],
) -> Result<Vec<Vec<String>>> {
    let mut lists: Vec<Vec<String>> = criteria
        .iter()
        .map(|criterion| {
            criterion
                .aspects
                .iter()
                .map(|aspect| aspect.trim().to_string())
                .collect()
        })
        .collect();

    for (criterion, list) in criteria.iter().zip(&lists) {
        let mut seen = HashSet::new();
        for aspect in list {
            if aspect.is_empty() {
                return Err(RankError::InvalidSchema(format!(
                    "criterion {} lists an empty aspect code",
                    criterion.code
                )));
            }
            if !seen.insert(aspect) {
                return Err(RankError::InvalidSchema(format!(
                    "criterion {} lists aspect {aspect} twice",
                    criterion.code
                )));
            }
        }
    }

    let explicit: HashSet<String> = lists.iter().flatten().cloned().collect();
    for option in options {
        let aspect = option.aspect.trim();
        if explicit.contains(aspect) {
            continue;
        }
        let matches = criteria
            .iter()
            .enumerate()
            .filter(|(_, criterion)| criterion.aspects.is_empty())
            .filter(|(_, criterion)| aspect.starts_with(criterion.code.trim()))
            .map(|(index, _)| index)
            .collect::<Vec<_>>();
        match matches.as_slice() {
            [index] => {
                if !lists[*index].iter().any(|existing| existing == aspect) {
                    lists[*index].push(aspect.to_string());
                }
            }
            [] => {
                return Err(RankError::InvalidSchema(format!(
                    "option aspect {aspect} does not match any criterion"
                )));
            }
            _ => {
                let codes = matches
                    .iter()
                    .map(|index| criteria[*index].code.as_str())
                    .collect::<Vec<_>>();
                return Err(RankError::InvalidSchema(format!(
                    "option aspect {aspect} is ambiguous between criteria: {}",
                    codes.join(", ")
                )));
            }
        }
    }

    Ok(lists)
}
