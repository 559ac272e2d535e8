// Similarity - vector normalization and top-K cosine selection
//
// The selector assumes unit-normalized inputs, so cosine similarity
// reduces to a dot product. Callers normalize via `normalize` first.

use thiserror::Error;

use crate::config::NORM_EPSILON;

/// Errors surfaced by the matching pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
	/// A candidate's length differs from the query's. Carries the offending
	/// candidate index so callers can point at the bad catalog row.
	#[error("dimension mismatch: query has {expected} dims, candidate {index} has {got}")]
	DimensionMismatch { index: usize, expected: usize, got: usize },

	/// No catalog record yielded a usable embedding. Raised by the matcher
	/// layer; the selector itself returns an empty result for empty input.
	#[error("catalog has no usable embeddings")]
	EmptyCatalog,
}

/// Rescales a vector to unit Euclidean length.
///
/// Zero (and near-zero) vectors are returned unchanged rather than divided
/// by their norm, so no NaN or Inf can propagate downstream.
pub fn normalize(v: &[f32]) -> Vec<f32> {
	let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
	if norm > NORM_EPSILON {
		v.iter().map(|x| x / norm).collect()
	} else {
		v.to_vec()
	}
}

/// Computes cosine similarity between two normalized vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
	a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Selects the K candidates most similar to `query`, highest first.
///
/// Both `query` and every candidate must already be unit-normalized; this
/// function does not re-normalize. Returns (candidate index, score) pairs
/// sorted by descending score, ties broken by original candidate order.
///
/// `k` is clamped to `[0, candidates.len()]`: a non-positive K yields an
/// empty result and an oversized K truncates to the candidate count,
/// neither is an error. A candidate whose length differs from the query's
/// fails fast with `DimensionMismatch`.
pub fn top_k_similar(
	query: &[f32],
	candidates: &[Vec<f32>],
	k: i64,
) -> Result<Vec<(usize, f32)>, MatchError> {
	for (index, candidate) in candidates.iter().enumerate() {
		if candidate.len() != query.len() {
			return Err(MatchError::DimensionMismatch {
				index,
				expected: query.len(),
				got: candidate.len(),
			});
		}
	}

	let k = (k.max(0) as usize).min(candidates.len());
	if k == 0 {
		return Ok(Vec::new());
	}

	let mut scored: Vec<(usize, f32)> = candidates
		.iter()
		.map(|c| cosine_similarity(query, c))
		.enumerate()
		.collect();

	// Stable sort keeps lower indices first among equal scores.
	scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
	scored.truncate(k);

	Ok(scored)
}
