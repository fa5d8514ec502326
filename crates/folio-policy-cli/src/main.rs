// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Folio policy operator tool.
//!
//! Exit status for `check`: 0 allowed, 1 denied, 2 precondition fault,
//! 3 when the scenario or configuration could not be loaded.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use folio_policy::{Engine, Rule};
use folio_policy_config::{ConfigError, FolioPolicyConfig, LogFormat, LoggingConfig};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod scenario;

use scenario::{Outcome, Scenario};

const EXIT_OPERATIONAL_ERROR: u8 = 3;
const BOOTSTRAP_LEVEL: &str = "info";

/// Evaluate Folio authorization decisions offline.
#[derive(Parser, Debug)]
#[command(name = "folio-policy", about = "Folio authorization policy tool", version)]
struct Cli {
	/// Config file path (defaults to /etc/folio/policy.toml)
	#[arg(long, global = true, env = "FOLIO_POLICY_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Decide a single scenario
	Check(CheckArgs),
	/// List registered rules in evaluation order
	Rules,
}

#[derive(Args, Debug)]
struct CheckArgs {
	/// Scenario JSON file
	#[arg(long)]
	scenario: PathBuf,
}

fn main() -> ExitCode {
	let cli = Cli::parse();

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:#}");
			ExitCode::from(EXIT_OPERATIONAL_ERROR)
		}
	}
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
	// The configured subscriber depends on the config, so loading logs
	// through a scoped one.
	let bootstrap = bootstrap_subscriber(bootstrap_filter(), std::io::stderr);
	let config = tracing::subscriber::with_default(bootstrap, || {
		load_config(cli.config.as_deref())
	})?;
	init_tracing(&config.logging);

	let engine = build_engine(&config)?;

	match cli.command {
		Command::Check(args) => {
			let scenario = Scenario::from_path(&args.scenario)?;
			let outcome = scenario.evaluate(&engine);
			match &outcome {
				Outcome::Allowed => println!("allowed"),
				Outcome::Denied => println!("denied"),
				Outcome::Fault(err) => println!("fault: {err}"),
			}
			Ok(ExitCode::from(outcome.exit_code()))
		}
		Command::Rules => {
			for rule in engine.registry().rules() {
				println!("{}", describe(rule));
			}
			Ok(ExitCode::SUCCESS)
		}
	}
}

fn load_config(path: Option<&Path>) -> Result<FolioPolicyConfig, ConfigError> {
	match path {
		Some(path) => folio_policy_config::load_config_with_file(path),
		None => folio_policy_config::load_config(),
	}
}

fn bootstrap_filter() -> EnvFilter {
	EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(BOOTSTRAP_LEVEL))
}

fn bootstrap_subscriber<W>(
	filter: EnvFilter,
	writer: W,
) -> impl tracing::Subscriber + Send + Sync + 'static
where
	W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(writer)
		.finish()
}

fn build_engine(config: &FolioPolicyConfig) -> anyhow::Result<Engine> {
	let engine = Engine::standard_with(config.policy.engine_settings())?;
	tracing::debug!(rules = engine.registry().len(), "engine ready");
	Ok(engine)
}

fn describe(rule: &Rule) -> String {
	let actions: Vec<&str> = rule.actions().iter().map(|a| a.as_str()).collect();
	format!("{} {} {}", rule.actor(), rule.resource(), actions.join(","))
}

fn init_tracing(logging: &LoggingConfig) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| logging.level.clone().into());
	let registry = tracing_subscriber::registry().with(filter);

	match logging.format {
		LogFormat::Json => registry
			.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
			.init(),
		LogFormat::Pretty => registry
			.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
			.init(),
	}
}
