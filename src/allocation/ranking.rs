//! Candidate ranking for manual placement.

use serde::{Deserialize, Serialize};

use crate::config::ScoringWeights;
use crate::models::{Role, Worker};

use super::scoring::adequacy_score;

/// A pool member scored against one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    /// The worker id.
    pub worker_id: String,
    /// The worker's display name.
    pub name: String,
    /// Adequacy score for the role.
    pub score: f64,
}

/// Ranks pool members for a role, best first.
///
/// When `search` is given, only workers whose name contains it
/// (case-insensitively) are kept. Equal scores keep their pool order.
pub fn rank_candidates(
    pool: &[&Worker],
    role: &Role,
    weights: &ScoringWeights,
    search: Option<&str>,
) -> Vec<RankedCandidate> {
    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut ranked: Vec<RankedCandidate> = pool
        .iter()
        .filter(|w| match &needle {
            Some(needle) => w.name.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .map(|w| RankedCandidate {
            worker_id: w.id.clone(),
            name: w.name.clone(),
            score: adequacy_score(w, role, weights),
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
