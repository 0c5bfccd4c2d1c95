// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Skill normalization and match scoring.
//!
//! Skill lists arrive in inconsistent shapes: proper lists, lists holding a
//! single stringified list (`"['Java', 'SQL']"`), or comma-joined text.
//! Normalization flattens all of them into a lower-cased set.

use crate::error::DomainError;
use std::collections::BTreeSet;

const WRAPPING_CHARS: [char; 4] = ['[', ']', '\'', '"'];
const QUOTE_CHARS: [char; 2] = ['\'', '"'];

/// Normalizes a list of raw skill tokens into a set.
///
/// Each token has brackets and quotes stripped from its ends, is split on
/// embedded commas, then trimmed and lower-cased. Empty parts are dropped.
#[must_use]
pub fn normalize_skills<I, S>(raw: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut skills: BTreeSet<String> = BTreeSet::new();
    for token in raw {
        let stripped: &str = token.as_ref().trim().trim_matches(WRAPPING_CHARS.as_slice());
        if stripped.contains(',') {
            for part in stripped.split(',') {
                insert_skill(&mut skills, part.trim().trim_matches(QUOTE_CHARS.as_slice()));
            }
        } else {
            insert_skill(&mut skills, stripped);
        }
    }
    skills
}

fn insert_skill(skills: &mut BTreeSet<String>, part: &str) {
    let cleaned: String = part.trim().to_lowercase();
    if !cleaned.is_empty() {
        skills.insert(cleaned);
    }
}

/// Splits comma-separated skill text into a list, preserving order.
#[must_use]
pub fn split_skill_text(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| part.trim().trim_matches(QUOTE_CHARS.as_slice()).trim())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Result of scoring one candidate against a job's required skills.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillScore {
    /// Required skills the candidate has, sorted.
    pub matched: Vec<String>,
    /// Required skills the candidate lacks, sorted.
    pub missing: Vec<String>,
    /// `matched / required * 100`, rounded to two decimals.
    pub match_percentage: f64,
    pub total_required: usize,
}

impl SkillScore {
    #[must_use]
    pub const fn matched_count(&self) -> usize {
        self.matched.len()
    }
}

/// Scores normalized candidate skills against normalized required skills.
///
/// An empty requirement set scores 0.
#[must_use]
pub fn score_skills(required: &BTreeSet<String>, candidate: &BTreeSet<String>) -> SkillScore {
    let matched: Vec<String> = required.intersection(candidate).cloned().collect();
    let missing: Vec<String> = required.difference(candidate).cloned().collect();
    let match_percentage: f64 = if required.is_empty() {
        0.0
    } else {
        round_two_decimals(count_as_f64(matched.len()) / count_as_f64(required.len()) * 100.0)
    };

    SkillScore {
        matched,
        missing,
        match_percentage,
        total_required: required.len(),
    }
}

/// Validates an optional minimum match threshold.
///
/// # Errors
///
/// Returns `DomainError::InvalidMatchThreshold` unless the value is within 0..=100.
pub fn validate_min_match(min_match: Option<f64>) -> Result<Option<f64>, DomainError> {
    match min_match {
        Some(value) if !(0.0..=100.0).contains(&value) => {
            Err(DomainError::InvalidMatchThreshold {
                value: value.to_string(),
            })
        }
        other => Ok(other),
    }
}

#[allow(clippy::cast_precision_loss)]
const fn count_as_f64(count: usize) -> f64 {
    count as f64
}

fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
