// Catalog - product records and embedding field parsing
//
// Catalog rows come from an external store whose `embedding` column is a
// raw serialized field: sometimes a JSON array, sometimes a string that
// itself contains a JSON array, sometimes null or garbage. Parsing is
// fallible per record; malformed rows are skipped, never coerced to zeros.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::config::{CATALOG_EXT_JSON, CATALOG_EXT_MSGPACK};

/// One product row as stored in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
	pub id: u64,
	pub name: Option<String>,
	pub category: Option<String>,
	pub image_url: Option<String>,
	/// Raw serialized embedding field; parse with `parse_embedding_field`.
	#[serde(default)]
	pub embedding: Option<Value>,
}

/// An ordered list of product rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
	pub records: Vec<ProductRecord>,
}

impl Catalog {
	pub fn new(records: Vec<ProductRecord>) -> Self {
		Self { records }
	}

	/// Loads a catalog file, dispatching on extension:
	/// `.json` holds an array of rows, `.msgpack` a pre-exported snapshot.
	pub fn load(path: &Path) -> Result<Self> {
		let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
		match ext {
			_ if ext.eq_ignore_ascii_case(CATALOG_EXT_JSON) => {
				let content = fs::read_to_string(path)
					.with_context(|| format!("Failed to read catalog {}", path.display()))?;
				let records: Vec<ProductRecord> =
					serde_json::from_str(&content).context("Failed to parse catalog JSON")?;
				Ok(Self::new(records))
			}
			_ if ext.eq_ignore_ascii_case(CATALOG_EXT_MSGPACK) => {
				let bytes = fs::read(path)
					.with_context(|| format!("Failed to read catalog {}", path.display()))?;
				rmp_serde::from_slice(&bytes).context("Failed to parse catalog MessagePack")
			}
			other => bail!("Unsupported catalog format: .{}", other),
		}
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

/// Parses a raw embedding field into a vector.
///
/// Accepts a JSON array of numbers or a string containing one (how text
/// columns come back from the store). Anything else, including arrays with
/// non-numeric elements, is `None`.
pub fn parse_embedding_field(field: Option<&Value>) -> Option<Vec<f32>> {
	match field? {
		Value::Array(items) => {
			let mut vec = Vec::with_capacity(items.len());
			for item in items {
				vec.push(item.as_f64()? as f32);
			}
			Some(vec)
		}
		Value::String(s) => serde_json::from_str::<Vec<f32>>(s).ok(),
		_ => None,
	}
}
