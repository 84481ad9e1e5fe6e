use crate::error::{node_error, ChainError};
use async_trait::async_trait;
use concordium_rust_sdk::{
    common::types::{Amount, TransactionTime},
    types::{
        hashes::TransactionHash,
        smart_contracts::{
            InstanceInfo, ModuleReference, OwnedContractName, OwnedParameter, WasmModule,
        },
        transactions::{send, BlockItem, EncodedPayload, InitContractPayload},
        BlockItemSummary, ContractAddress, Energy, Nonce, RejectReason, WalletAccount,
    },
    v2::{self, BlockIdentifier},
};
use std::time::{SystemTime, UNIX_EPOCH};

/// Name of the init function of the marketplace contract.
pub const INIT_NAME: &str = "init_NFTMarket";

/// Seconds a submitted transaction stays valid.
const EXPIRY_SECONDS: u64 = 300;

/// How a transaction ended up once finalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Finalized,
    Initialized(ContractAddress),
    ModuleAlreadyExists,
    Rejected(String),
}

/// The node operations the deployment needs.
#[async_trait]
pub trait Chain {
    /// Handle of a submitted transaction.
    type Submission: Send + Sync;

    async fn deploy_module(&mut self, module: &WasmModule) -> Result<Self::Submission, ChainError>;

    async fn init_contract(
        &mut self,
        module_ref: ModuleReference,
        energy: Energy,
    ) -> Result<Self::Submission, ChainError>;

    async fn wait_until_finalized(
        &mut self,
        submission: &Self::Submission,
    ) -> Result<Outcome, ChainError>;

    /// Module and init name of the instance at `address`, as the node reports
    /// them in the last finalized block.
    async fn instance(&mut self, address: ContractAddress) -> Result<Instance, ChainError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    pub source_module: ModuleReference,
    pub name: String,
}

/// `Chain` backed by the gRPC v2 API of a Concordium node.
pub struct NodeChain {
    client: v2::Client,
    wallet: WalletAccount,
}

impl NodeChain {
    pub async fn connect(endpoint: &str, wallet: WalletAccount) -> Result<Self, ChainError> {
        let endpoint = v2::Endpoint::from_shared(endpoint.to_string()).map_err(node_error)?;
        let client = v2::Client::new(endpoint).await.map_err(node_error)?;
        Ok(Self { client, wallet })
    }

    async fn next_nonce(&mut self) -> Result<Nonce, ChainError> {
        let info = self
            .client
            .get_next_account_sequence_number(&self.wallet.address)
            .await
            .map_err(node_error)?;
        Ok(info.nonce)
    }

    async fn submit(&mut self, item: BlockItem<EncodedPayload>) -> Result<TransactionHash, ChainError> {
        self.client.send_block_item(&item).await.map_err(node_error)
    }
}

fn expiry() -> TransactionTime {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    TransactionTime::from_seconds(now + EXPIRY_SECONDS)
}

fn outcome(summary: &BlockItemSummary) -> Outcome {
    if let Some(reason) = summary.is_rejected_account_transaction() {
        return match reason {
            RejectReason::ModuleHashAlreadyExists { .. } => Outcome::ModuleAlreadyExists,
            other => Outcome::Rejected(format!("{:?}", other)),
        };
    }
    match summary.contract_init() {
        Some(init) => Outcome::Initialized(init.address),
        None => Outcome::Finalized,
    }
}

#[async_trait]
impl Chain for NodeChain {
    type Submission = TransactionHash;

    async fn deploy_module(&mut self, module: &WasmModule) -> Result<TransactionHash, ChainError> {
        let nonce = self.next_nonce().await?;
        let tx = send::deploy_module(
            &self.wallet.keys,
            self.wallet.address,
            nonce,
            expiry(),
            module.clone(),
        );
        self.submit(BlockItem::AccountTransaction(tx)).await
    }

    async fn init_contract(
        &mut self,
        module_ref: ModuleReference,
        energy: Energy,
    ) -> Result<TransactionHash, ChainError> {
        let nonce = self.next_nonce().await?;
        let payload = InitContractPayload {
            amount: Amount::zero(),
            mod_ref: module_ref,
            init_name: OwnedContractName::new_unchecked(INIT_NAME.to_string()),
            param: OwnedParameter::empty(),
        };
        let tx = send::init_contract(
            &self.wallet.keys,
            self.wallet.address,
            nonce,
            expiry(),
            payload,
            energy,
        );
        self.submit(BlockItem::AccountTransaction(tx)).await
    }

    async fn wait_until_finalized(&mut self, hash: &TransactionHash) -> Result<Outcome, ChainError> {
        let (_, summary) = self
            .client
            .wait_until_finalized(hash)
            .await
            .map_err(node_error)?;
        Ok(outcome(&summary))
    }

    async fn instance(&mut self, address: ContractAddress) -> Result<Instance, ChainError> {
        let info = self
            .client
            .get_instance_info(address, &BlockIdentifier::LastFinal)
            .await
            .map_err(node_error)?;
        let (source_module, name) = match info.response {
            InstanceInfo::V0 {
                source_module,
                name,
                ..
            } => (source_module, name),
            InstanceInfo::V1 {
                source_module,
                name,
                ..
            } => (source_module, name),
        };
        Ok(Instance {
            source_module,
            name: name.as_contract_name().get_chain_name().to_string(),
        })
    }
}
