use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Energy given to the `init_NFTMarket` transaction unless overridden.
const DEFAULT_INIT_ENERGY: u64 = 30_000;

#[derive(Parser, Debug)]
#[command(
    name = "nft-market-deploy",
    about = "Deploys the NFTMarket contract module and creates an instance of it"
)]
pub struct Cli {
    /// gRPC endpoint of the Concordium node.
    #[arg(long, env = "NFT_MARKET_NODE", default_value = "http://localhost:20000")]
    pub node: String,

    /// Wallet export of the account that pays for and owns the deployment.
    #[arg(long, env = "NFT_MARKET_ACCOUNT", value_name = "PATH")]
    pub account: PathBuf,

    /// Compiled contract module, as produced by `cargo concordium build`.
    #[arg(long, env = "NFT_MARKET_MODULE", value_name = "PATH")]
    pub module: PathBuf,

    #[arg(long, env = "NFT_MARKET_NETWORK", value_enum, default_value_t = Network::Local)]
    pub network: Network,

    /// Maximum energy for the instance creation.
    #[arg(long, env = "NFT_MARKET_ENERGY", default_value_t = DEFAULT_INIT_ENERGY)]
    pub energy: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Network {
    Local,
    Testnet,
    Mainnet,
}

impl Network {
    /// Instances are only checked against the deployed module on testnet.
    pub fn verifies(self) -> bool {
        matches!(self, Network::Testnet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serializes tests that depend on the `NFT_MARKET_*` environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn parses_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let cli = Cli::try_parse_from([
            "nft-market-deploy",
            "--account",
            "wallet.export",
            "--module",
            "nft_market.wasm.v1",
        ])
        .unwrap();

        assert_eq!(cli.network, Network::Local);
        assert_eq!(cli.energy, DEFAULT_INIT_ENERGY);
        assert_eq!(cli.module, PathBuf::from("nft_market.wasm.v1"));
    }

    #[test]
    fn parses_network() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let cli = Cli::try_parse_from([
            "nft-market-deploy",
            "--account",
            "wallet.export",
            "--module",
            "nft_market.wasm.v1",
            "--network",
            "testnet",
            "--energy",
            "50000",
        ])
        .unwrap();

        assert_eq!(cli.network, Network::Testnet);
        assert_eq!(cli.energy, 50_000);
    }

    #[test]
    fn reads_network_from_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        std::env::set_var("NFT_MARKET_NETWORK", "testnet");
        std::env::set_var("NFT_MARKET_MODULE", "from_env.wasm.v1");

        let result = Cli::try_parse_from(["nft-market-deploy", "--account", "wallet.export"]);

        std::env::remove_var("NFT_MARKET_NETWORK");
        std::env::remove_var("NFT_MARKET_MODULE");

        let cli = result.unwrap();
        assert_eq!(cli.network, Network::Testnet);
        assert_eq!(cli.module, PathBuf::from("from_env.wasm.v1"));
    }

    #[test]
    fn only_testnet_verifies() {
        assert!(Network::Testnet.verifies());
        assert!(!Network::Local.verifies());
        assert!(!Network::Mainnet.verifies());
    }
}
