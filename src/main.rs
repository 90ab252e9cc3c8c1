//! Chain key indexer entry point.
//!
//! Walks the blocks of one network from a start block onwards, recovering and storing the public
//! key of every transaction sender and keeping transactions that carry a mailchain payload.
//!
//! ```text
//! chain-key-indexer ethereum --network mainnet --rpc-address http://localhost:8545 --start-block 100
//! chain-key-indexer substrate --network edgeware-mainnet --rpc-address http://localhost:9933
//! ```
//!
//! The process stops on Ctrl+C after the block in progress, and exits with an error once a
//! block keeps failing after the whole retry budget.

use anyhow::Context;
use chain_key_indexer::{
	bootstrap::run_indexer,
	models::{IndexerConfig, Protocol, RetrySettings},
	utils::logging::setup_logging,
};
use clap::{value_parser, Arg, ArgMatches, Command};
use dotenvy::dotenv;
use std::{
	env::{set_var, var},
	path::PathBuf,
};
use tokio::sync::watch;
use tracing::{error, info};

fn indexer_command(protocol: Protocol, default_network: &'static str) -> Command {
	Command::new(protocol.as_str())
		.about(format!("Index {} blocks", protocol))
		.arg(
			Arg::new("start-block")
				.long("start-block")
				.help("Cursor to start from; the first block indexed is the next one")
				.value_name("BLOCK_NUMBER")
				.value_parser(value_parser!(u64))
				.default_value("0"),
		)
		.arg(
			Arg::new("network")
				.long("network")
				.help("Network to index")
				.value_name("NETWORK")
				.default_value(default_network),
		)
		.arg(
			Arg::new("protocol")
				.long("protocol")
				.help("Protocol name, must match the subcommand")
				.value_name("PROTOCOL"),
		)
		.arg(
			Arg::new("rpc-address")
				.long("rpc-address")
				.help("JSON-RPC endpoint of the node")
				.value_name("URL")
				.required(true),
		)
		.arg(
			Arg::new("data-dir")
				.long("data-dir")
				.help("Directory of the file store")
				.value_name("PATH")
				.value_parser(value_parser!(PathBuf))
				.default_value("data"),
		)
		.arg(
			Arg::new("max-retries")
				.long("max-retries")
				.help("Attempts per block before giving up")
				.value_parser(value_parser!(u32))
				.default_value("5"),
		)
		.arg(
			Arg::new("initial-delay-ms")
				.long("initial-delay-ms")
				.help("Delay before the first retry, in milliseconds")
				.value_parser(value_parser!(u64))
				.default_value("1000"),
		)
		.arg(
			Arg::new("max-delay-ms")
				.long("max-delay-ms")
				.help("Upper bound of the retry delay, in milliseconds")
				.value_parser(value_parser!(u64))
				.default_value("30000"),
		)
}

fn config_from_matches(
	subcommand: Protocol,
	matches: &ArgMatches,
) -> anyhow::Result<IndexerConfig> {
	let protocol = IndexerConfig::resolve_protocol(
		subcommand,
		matches.get_one::<String>("protocol").map(String::as_str),
	)?;

	let config = IndexerConfig {
		protocol,
		network: matches
			.get_one::<String>("network")
			.cloned()
			.unwrap_or_default(),
		rpc_address: matches
			.get_one::<String>("rpc-address")
			.cloned()
			.unwrap_or_default(),
		start_block: matches.get_one::<u64>("start-block").copied().unwrap_or(0),
		data_dir: matches
			.get_one::<PathBuf>("data-dir")
			.cloned()
			.unwrap_or_else(|| PathBuf::from("data")),
		retry: RetrySettings {
			max_retries: matches.get_one::<u32>("max-retries").copied().unwrap_or_default(),
			initial_delay_ms: matches
				.get_one::<u64>("initial-delay-ms")
				.copied()
				.unwrap_or_default(),
			max_delay_ms: matches
				.get_one::<u64>("max-delay-ms")
				.copied()
				.unwrap_or_default(),
		},
	}
	.apply_env_overrides();

	config.validate()?;
	Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let matches = Command::new("chain-key-indexer")
		.version(env!("CARGO_PKG_VERSION"))
		.about("Indexes sender public keys and mailchain transactions from blockchain nodes")
		.arg(
			Arg::new("log-level")
				.long("log-level")
				.help("Set log level (trace, debug, info, warn, error)")
				.value_name("LEVEL")
				.global(true),
		)
		.subcommand_required(true)
		.subcommand(indexer_command(Protocol::Ethereum, "mainnet"))
		.subcommand(indexer_command(Protocol::Substrate, "edgeware-mainnet"))
		.get_matches();

	dotenv().ok();

	// CLI flag takes precedence over LOG_LEVEL
	if let Some(level) = matches
		.get_one::<String>("log-level")
		.cloned()
		.or_else(|| var("LOG_LEVEL").ok())
	{
		set_var("RUST_LOG", level);
	}
	setup_logging().map_err(|e| anyhow::anyhow!(e))?;

	let config = match matches.subcommand() {
		Some(("ethereum", sub)) => config_from_matches(Protocol::Ethereum, sub),
		Some(("substrate", sub)) => config_from_matches(Protocol::Substrate, sub),
		_ => Err(anyhow::anyhow!("unknown subcommand")),
	}
	.context("invalid configuration")?;

	info!(
		protocol = %config.protocol,
		network = %config.network,
		start_block = config.start_block,
		data_dir = %config.data_dir.display(),
		"Starting indexer"
	);

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	tokio::spawn(async move {
		if tokio::signal::ctrl_c().await.is_ok() {
			info!("Shutdown signal received, finishing the current block");
			let _ = shutdown_tx.send(true);
		}
	});

	if let Err(e) = run_indexer(config, shutdown_rx).await {
		error!(error = %e, "Indexer stopped with an error");
		return Err(anyhow::anyhow!(e));
	}
	Ok(())
}
