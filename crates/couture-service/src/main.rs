//! Main entry point for the couture order desk.
//!
//! This binary accepts custom garment orders from the command line, stores them
//! in the configured backend, and lets customers look an order up by its id to
//! see how far along it is.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use couture_config::Config;
use couture_core::{IntakeForm, OrderDesk};
use couture_types::{CostumeType, MeasurementKey, SampleImageRef};
use std::path::PathBuf;

mod render;

/// Command-line arguments for the order desk.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "config.toml", env = "COUTURE_CONFIG")]
	config: PathBuf,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Submit a new order
	Submit(SubmitArgs),
	/// Show an order and its progress
	Track {
		/// Order id, e.g. EC482193
		order_id: String,
	},
	/// List the most recent orders, newest first
	Recent {
		/// How many orders to show (defaults to tracking.recent_limit)
		#[arg(short = 'n', long)]
		limit: Option<usize>,
	},
	/// Print the measurement fields asked for a garment type
	Fields {
		costume: CostumeType,
	},
}

#[derive(clap::Args, Debug)]
struct SubmitArgs {
	#[arg(long)]
	name: String,
	#[arg(long)]
	email: String,
	#[arg(long)]
	phone: String,
	#[arg(long)]
	address: String,
	/// Garment type (wedding-dress, evening-gown, suit, casual-dress, traditional-wear, other)
	#[arg(long)]
	costume: CostumeType,
	/// Measurement as key=value, e.g. chest=36. Repeatable.
	#[arg(short, long = "measurement", value_parser = parse_measurement)]
	measurements: Vec<(MeasurementKey, String)>,
	/// Free-form notes for the tailor
	#[arg(long, default_value = "")]
	requests: String,
	/// Preferred delivery date (YYYY-MM-DD)
	#[arg(long)]
	delivery_date: Option<NaiveDate>,
	/// Reference image to attach for this session
	#[arg(long)]
	sample_image: Option<PathBuf>,
}

impl From<SubmitArgs> for IntakeForm {
	fn from(args: SubmitArgs) -> Self {
		IntakeForm {
			full_name: args.name,
			email: args.email,
			phone: args.phone,
			address: args.address,
			costume_type: Some(args.costume),
			measurements: args.measurements,
			special_requests: args.requests,
			delivery_date: args.delivery_date,
			sample_image: args.sample_image.map(SampleImageRef::new),
		}
	}
}

/// Parses a `key=value` measurement argument.
fn parse_measurement(raw: &str) -> Result<(MeasurementKey, String), String> {
	let (key, value) = raw
		.split_once('=')
		.ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
	let key: MeasurementKey = key.trim().parse()?;
	Ok((key, value.trim().to_string()))
}

/// Main entry point for the order desk.
///
/// Initializes logging, then runs the requested subcommand. `fields` needs no
/// configuration; every other command loads it and opens the order store.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();

	if let Command::Fields { costume } = &args.command {
		print!("{}", render::field_table(*costume));
		return Ok(());
	}

	let config = Config::from_file(&args.config).await?;
	tracing::info!(path = %args.config.display(), "Loaded configuration");

	let desk = OrderDesk::from_config(&config)?;
	print!("{}", run(&desk, args.command).await?);
	Ok(())
}

/// Runs a store-backed command and returns what it prints.
async fn run(desk: &OrderDesk, command: Command) -> Result<String, Box<dyn std::error::Error>> {
	let output = match command {
		Command::Submit(submit) => {
			let submission = desk.submit(submit.into()).await?;
			render::receipt(&submission.receipt)
		},
		Command::Track { order_id } => match desk.track(&order_id).await {
			Some(tracked) => render::order_details(&tracked),
			None => render::not_found(order_id.trim()),
		},
		Command::Recent { limit } => render::recent_list(&desk.recent(limit).await),
		Command::Fields { costume } => render::field_table(costume),
	};
	Ok(output)
}
