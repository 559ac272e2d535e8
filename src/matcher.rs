// Matcher - constructed-once search object over a parsed catalog
//
// Built once at startup and shared by reference; construction parses and
// normalizes every usable embedding so queries only pay for the selection.

use serde::Serialize;

use crate::catalog::{parse_embedding_field, Catalog};
use crate::similarity::{normalize, top_k_similar, MatchError};

/// One ranked search result mapped back to catalog metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ProductMatch {
	pub id: u64,
	pub name: Option<String>,
	pub category: Option<String>,
	pub image_url: Option<String>,
	pub similarity: f32,
}

/// Similarity search over a catalog's embeddings.
pub struct Matcher {
	catalog: Catalog,
	/// Normalized candidate vectors, in catalog order minus skipped rows.
	vectors: Vec<Vec<f32>>,
	/// Maps candidate index back to the row index in `catalog.records`.
	record_indices: Vec<usize>,
	skipped: usize,
}

impl Matcher {
	/// Parses every record's embedding field, keeping the rows that yield
	/// a vector. Malformed rows are counted in `skipped_records`.
	pub fn new(catalog: Catalog) -> Self {
		let mut vectors = Vec::with_capacity(catalog.len());
		let mut record_indices = Vec::with_capacity(catalog.len());
		let mut skipped = 0;

		for (row, record) in catalog.records.iter().enumerate() {
			match parse_embedding_field(record.embedding.as_ref()) {
				Some(vec) => {
					vectors.push(normalize(&vec));
					record_indices.push(row);
				}
				None => skipped += 1,
			}
		}

		Self { catalog, vectors, record_indices, skipped }
	}

	/// Number of rows with a usable embedding.
	pub fn candidate_count(&self) -> usize {
		self.vectors.len()
	}

	/// Number of rows whose embedding field failed to parse.
	pub fn skipped_records(&self) -> usize {
		self.skipped
	}

	/// Finds the `top_k` catalog items most similar to the query embedding.
	///
	/// The query is normalized here; raw model output is fine. Returns
	/// `EmptyCatalog` when no record had a usable embedding, so callers
	/// cannot mistake a broken catalog for an empty-but-valid result.
	pub fn find_similar(&self, query: &[f32], top_k: i64) -> Result<Vec<ProductMatch>, MatchError> {
		if self.vectors.is_empty() {
			return Err(MatchError::EmptyCatalog);
		}

		let query = normalize(query);
		let ranked = top_k_similar(&query, &self.vectors, top_k)?;

		Ok(ranked
			.into_iter()
			.map(|(index, similarity)| {
				let record = &self.catalog.records[self.record_indices[index]];
				ProductMatch {
					id: record.id,
					name: record.name.clone(),
					category: record.category.clone(),
					image_url: record.image_url.clone(),
					similarity,
				}
			})
			.collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::catalog::ProductRecord;
	use serde_json::json;

	fn record(id: u64, name: &str, embedding: Option<serde_json::Value>) -> ProductRecord {
		ProductRecord {
			id,
			name: Some(name.to_string()),
			category: Some("test".to_string()),
			image_url: None,
			embedding,
		}
	}

	#[test]
	fn maps_results_back_to_metadata() {
		let catalog = Catalog::new(vec![
			record(10, "far", Some(json!([0.0, 1.0]))),
			record(20, "near", Some(json!([1.0, 0.1]))),
			record(30, "exact", Some(json!([2.0, 0.0]))),
		]);
		let matcher = Matcher::new(catalog);

		let matches = matcher.find_similar(&[1.0, 0.0], 2).unwrap();
		assert_eq!(matches.len(), 2);
		assert_eq!(matches[0].id, 30);
		assert_eq!(matches[0].name.as_deref(), Some("exact"));
		assert!((matches[0].similarity - 1.0).abs() < 1e-5);
		assert_eq!(matches[1].id, 20);
		assert!(matches[0].similarity > matches[1].similarity);
	}

	#[test]
	fn skips_malformed_rows_but_keeps_the_rest() {
		let catalog = Catalog::new(vec![
			record(1, "ok", Some(json!([1.0, 0.0]))),
			record(2, "null", None),
			record(3, "garbage", Some(json!("oops"))),
			record(4, "stringified", Some(json!("[0.0, 1.0]"))),
		]);
		let matcher = Matcher::new(catalog);

		assert_eq!(matcher.candidate_count(), 2);
		assert_eq!(matcher.skipped_records(), 2);

		// Indices in results map past the skipped rows.
		let matches = matcher.find_similar(&[0.0, 1.0], 1).unwrap();
		assert_eq!(matches[0].id, 4);
	}

	#[test]
	fn empty_catalog_is_an_error() {
		let matcher = Matcher::new(Catalog::new(Vec::new()));
		let err = matcher.find_similar(&[1.0, 0.0], 5).unwrap_err();
		assert_eq!(err, MatchError::EmptyCatalog);
	}

	#[test]
	fn all_rows_malformed_is_an_error() {
		let catalog = Catalog::new(vec![record(1, "bad", Some(json!("nope")))]);
		let matcher = Matcher::new(catalog);
		assert_eq!(matcher.find_similar(&[1.0], 1).unwrap_err(), MatchError::EmptyCatalog);
	}

	#[test]
	fn raw_query_is_normalized_before_matching() {
		let catalog = Catalog::new(vec![record(1, "item", Some(json!([0.6, 0.8])))]);
		let matcher = Matcher::new(catalog);

		// Same direction, wildly different magnitude.
		let matches = matcher.find_similar(&[60.0, 80.0], 1).unwrap();
		assert!((matches[0].similarity - 1.0).abs() < 1e-5);
	}
}
