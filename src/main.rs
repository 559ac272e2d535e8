//! Vismatch - visual product matching by embedding similarity
//!
//! A command-line tool that ranks catalog products against a query
//! embedding using cosine similarity over unit-normalized vectors.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use vismatch::catalog::{parse_embedding_field, Catalog};
use vismatch::cli::{Cli, Command};
use vismatch::config::EMBEDDING_DIM;
use vismatch::logger::{self, log, Level};
use vismatch::matcher::Matcher;
use vismatch::similarity::MatchError;

fn main() -> Result<()> {
	let cli = Cli::parse();

	logger::set_verbose(cli.verbose);

	match cli.command {
		Command::Search { query, catalog, top, json } => run_search(&query, &catalog, top, json),
		Command::Check { catalog } => run_check(&catalog),
	}
}

fn run_search(query_path: &Path, catalog_path: &Path, top: i64, json: bool) -> Result<()> {
	if !json {
		print_header();
	}

	let query = load_query(query_path)?;
	log(Level::Debug, &format!("Query vector: {} dims", query.len()));

	let catalog = Catalog::load(catalog_path)?;
	log(Level::Debug, &format!("Catalog: {} records", catalog.len()));

	let matcher = Matcher::new(catalog);
	if matcher.skipped_records() > 0 {
		log(
			Level::Warning,
			&format!("Skipped {} records with missing or malformed embeddings", matcher.skipped_records()),
		);
	}

	let matches = match matcher.find_similar(&query, top) {
		Ok(matches) => matches,
		Err(MatchError::EmptyCatalog) => {
			log(Level::Error, "No embeddings available in catalog");
			std::process::exit(1);
		}
		Err(e @ MatchError::DimensionMismatch { .. }) => {
			log(Level::Error, &e.to_string());
			std::process::exit(1);
		}
	};

	if json {
		println!("{}", serde_json::to_string_pretty(&matches)?);
		return Ok(());
	}

	if matches.is_empty() {
		log(Level::Warning, "No matches requested (top is 0)");
		return Ok(());
	}

	log(Level::Success, &format!("Found {} matches", matches.len()));
	println!();

	for (i, result) in matches.iter().enumerate() {
		let rank = format!("#{}", i + 1).bright_blue().bold();
		let name = result.name.as_deref().unwrap_or("unnamed");
		let score = format!("{:.3}", result.similarity).dimmed();

		match &result.category {
			Some(category) => println!("  {} {} {} {}", rank, name, category.yellow(), score),
			None => println!("  {} {} {}", rank, name, score),
		}

		if let Some(url) = &result.image_url {
			log(Level::Debug, &format!("  {}", url));
		}
	}

	println!();
	Ok(())
}

fn run_check(catalog_path: &Path) -> Result<()> {
	print_header();

	let catalog = Catalog::load(catalog_path)?;
	log(Level::Info, &format!("Checking {} records", catalog.len()));

	let mut parsed = 0;
	let mut skipped = 0;
	let mut dims: BTreeMap<usize, usize> = BTreeMap::new();

	for record in &catalog.records {
		match parse_embedding_field(record.embedding.as_ref()) {
			Some(vec) => {
				parsed += 1;
				*dims.entry(vec.len()).or_insert(0) += 1;
			}
			None => {
				skipped += 1;
				log(Level::Debug, &format!("Record {} has no usable embedding", record.id));
			}
		}
	}

	logger::header("Summary");
	println!("  {} {}", "Parsed:".bright_blue(), parsed);
	if skipped > 0 {
		println!("  {} {}", "Skipped:".yellow(), skipped);
	}
	for (dim, count) in &dims {
		println!("  {} {} × {} dims", "Vectors:".bright_blue(), count, dim);
	}
	println!();

	for dim in dims.keys() {
		if *dim != EMBEDDING_DIM {
			log(
				Level::Warning,
				&format!("Found {}-dim embeddings; the expected model dimension is {}", dim, EMBEDDING_DIM),
			);
		}
	}

	if dims.len() > 1 {
		log(Level::Error, "Mixed embedding dimensions; searches against this catalog will fail");
		std::process::exit(1);
	}

	if parsed == 0 {
		log(Level::Error, "No usable embeddings in catalog");
		std::process::exit(1);
	}

	log(Level::Success, "Catalog is searchable");
	Ok(())
}

/// Reads a query embedding from a JSON file holding an array of floats.
fn load_query(path: &Path) -> Result<Vec<f32>> {
	let content = fs::read_to_string(path)
		.with_context(|| format!("Failed to read query {}", path.display()))?;
	let vector: Vec<f32> =
		serde_json::from_str(&content).context("Query file must be a JSON array of numbers")?;
	Ok(vector)
}

fn print_header() {
	println!();
	println!(
		"{}",
		format!("─── Vismatch v{} ───", env!("CARGO_PKG_VERSION"))
			.bright_blue()
			.bold()
	);
}
