//! Deploys the compiled NFTMarket module to a Concordium node, waits for it to
//! be finalized and creates a contract instance from it.

use crate::{chain::NodeChain, cli::Cli};
use anyhow::Context;
use clap::Parser;
use concordium_rust_sdk::types::{Energy, WalletAccount};
use log::info;

mod chain;
mod cli;
mod error;
mod pipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();
    let cli = Cli::parse();

    let wallet = WalletAccount::from_json_file(&cli.account)
        .with_context(|| format!("could not read wallet {}", cli.account.display()))?;
    let module = pipeline::load_module(&cli.module)?;

    info!("Connecting to {} ({:?})", cli.node, cli.network);
    let mut chain = NodeChain::connect(&cli.node, wallet).await?;

    let deployment =
        pipeline::deploy(&mut chain, &module, cli.network, Energy::from(cli.energy)).await?;
    println!("NFTMarket deployed to: {}", deployment.address);

    Ok(())
}

fn setup_logging() {
    let mut log_builder = pretty_env_logger::formatted_timed_builder();
    if let Ok(s) = ::std::env::var("RUST_LOG") {
        log_builder.parse_filters(&s);
    } else {
        // default to 'Info'
        log_builder.filter(None, log::LevelFilter::Info);
    }

    log_builder
        .filter_module("hyper", log::LevelFilter::Warn)
        .filter_module("h2", log::LevelFilter::Warn)
        .filter_module("tonic", log::LevelFilter::Warn)
        .filter_module("tower", log::LevelFilter::Warn)
        .filter_module("mio", log::LevelFilter::Warn)
        .filter_module("want", log::LevelFilter::Warn)
        .init();
}
