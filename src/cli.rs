use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::DEFAULT_TOP_K;

fn styles() -> Styles {
	Styles::styled()
		.header(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Blue))))
		.usage(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Blue))))
		.literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))))
		.placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
		.valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))))
		.invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))))
}

#[derive(Parser, Debug)]
#[command(
	name = "vismatch",
	author,
	version,
	about = "Visual product matching by embedding similarity",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {bin} {search} {search_args}   {search_desc}
  {bin} {search} {json_args}   {json_desc}
  {bin} {check}  {check_args}                       {check_desc}",
		title = "Examples:".bright_blue().bold(),
		bin = "vismatch".bright_blue(),
		search = "search".yellow(),
		search_args = "-q query.json -c catalog.json -n 5",
		search_desc = "Top 5 similar products".dimmed(),
		json_args = "-q query.json -c catalog.json --json",
		json_desc = "Machine-readable output".dimmed(),
		check = "check".yellow(),
		check_args = "-c catalog.json",
		check_desc = "Validate catalog embeddings".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Find catalog products most similar to a query embedding
	Search {
		/// JSON file holding the query embedding (an array of floats)
		#[arg(short = 'q', long = "query", value_name = "PATH")]
		query: PathBuf,

		/// Catalog file (.json or .msgpack)
		#[arg(short = 'c', long = "catalog", value_name = "PATH")]
		catalog: PathBuf,

		/// Number of results; values beyond the catalog size are clamped
		#[arg(short = 'n', long = "top", default_value_t = DEFAULT_TOP_K, allow_negative_numbers = true)]
		top: i64,

		/// Print results as JSON instead of the ranked list
		#[arg(long = "json")]
		json: bool,
	},

	/// Validate a catalog's embedding fields
	Check {
		/// Catalog file (.json or .msgpack)
		#[arg(short = 'c', long = "catalog", value_name = "PATH")]
		catalog: PathBuf,
	},
}
