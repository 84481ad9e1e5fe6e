use crate::{
    chain::{Chain, Instance, Outcome, INIT_NAME},
    cli::Network,
    error::ChainError,
};
use concordium_rust_sdk::{
    common,
    types::{
        smart_contracts::{ModuleReference, WasmModule},
        ContractAddress, Energy,
    },
};
use log::{error, info};
use std::path::Path;

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub module_ref: ModuleReference,
    pub address: ContractAddress,
    /// `None` when the network is not one that gets verified.
    pub verified: Option<bool>,
}

pub fn load_module(path: &Path) -> Result<WasmModule, ChainError> {
    let bytes = std::fs::read(path)
        .map_err(|err| ChainError::InvalidModule(format!("{}: {}", path.display(), err)))?;
    common::from_bytes(&mut std::io::Cursor::new(bytes))
        .map_err(|err| ChainError::InvalidModule(err.to_string()))
}

/// Deploy the module, create an instance of `NFTMarket` and, on networks
/// that support it, check the instance against the deployed module.
pub async fn deploy<C: Chain + Send>(
    chain: &mut C,
    module: &WasmModule,
    network: Network,
    energy: Energy,
) -> Result<Deployment, ChainError> {
    let module_ref = module.get_module_ref();
    info!("Deploying module {}", module_ref);

    let submission = chain.deploy_module(module).await?;
    match chain.wait_until_finalized(&submission).await? {
        Outcome::Finalized => info!("Module {} deployed", module_ref),
        Outcome::ModuleAlreadyExists => info!("Module {} already deployed", module_ref),
        Outcome::Rejected(reason) => {
            return Err(ChainError::Rejected {
                stage: "module deployment",
                reason,
            })
        }
        Outcome::Initialized(_) => return Err(ChainError::UnexpectedOutcome("module deployment")),
    }

    info!("Creating NFTMarket instance");
    let submission = chain.init_contract(module_ref, energy).await?;
    let address = match chain.wait_until_finalized(&submission).await? {
        Outcome::Initialized(address) => address,
        Outcome::Rejected(reason) => {
            return Err(ChainError::Rejected {
                stage: "contract initialization",
                reason,
            })
        }
        _ => return Err(ChainError::UnexpectedOutcome("contract initialization")),
    };
    info!("NFTMarket deployed to: {}", address);

    let verified = if network.verifies() {
        info!("Verifying instance {}", address);
        match verify(chain, address, module_ref).await {
            Ok(()) => {
                info!("Instance {} verified", address);
                Some(true)
            }
            Err(err) => {
                error!("Verification failed: {}", err);
                Some(false)
            }
        }
    } else {
        None
    };

    Ok(Deployment {
        module_ref,
        address,
        verified,
    })
}

/// Checks the instance against what this run deployed: it must run the
/// deployed module and have been created by `init_NFTMarket`.
async fn verify<C: Chain + Send>(
    chain: &mut C,
    address: ContractAddress,
    expected: ModuleReference,
) -> Result<(), ChainError> {
    let Instance {
        source_module,
        name,
    } = chain.instance(address).await?;
    if source_module != expected {
        return Err(ChainError::ModuleMismatch {
            expected,
            found: source_module,
        });
    }
    if name != INIT_NAME {
        return Err(ChainError::NameMismatch {
            expected: INIT_NAME.to_string(),
            found: name,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use concordium_rust_sdk::types::smart_contracts::{ModuleSource, WasmVersion};

    /// In-memory chain replaying scripted outcomes.
    struct MockChain {
        deploy_outcome: Outcome,
        init_outcome: Outcome,
        instance: Result<Instance, String>,
        deployed: Vec<ModuleReference>,
        initialized: Vec<(ModuleReference, Energy)>,
        verified: u32,
    }

    impl MockChain {
        fn new(deploy_outcome: Outcome, init_outcome: Outcome) -> Self {
            Self {
                deploy_outcome,
                init_outcome,
                instance: Ok(Instance {
                    source_module: module().get_module_ref(),
                    name: INIT_NAME.to_string(),
                }),
                deployed: Vec::new(),
                initialized: Vec::new(),
                verified: 0,
            }
        }
    }

    #[derive(PartialEq)]
    enum Submission {
        Deploy,
        Init,
    }

    #[async_trait]
    impl Chain for MockChain {
        type Submission = Submission;

        async fn deploy_module(&mut self, module: &WasmModule) -> Result<Submission, ChainError> {
            self.deployed.push(module.get_module_ref());
            Ok(Submission::Deploy)
        }

        async fn init_contract(
            &mut self,
            module_ref: ModuleReference,
            energy: Energy,
        ) -> Result<Submission, ChainError> {
            self.initialized.push((module_ref, energy));
            Ok(Submission::Init)
        }

        async fn wait_until_finalized(
            &mut self,
            submission: &Submission,
        ) -> Result<Outcome, ChainError> {
            Ok(match submission {
                Submission::Deploy => self.deploy_outcome.clone(),
                Submission::Init => self.init_outcome.clone(),
            })
        }

        async fn instance(&mut self, _address: ContractAddress) -> Result<Instance, ChainError> {
            self.verified += 1;
            self.instance.clone().map_err(ChainError::Node)
        }
    }

    fn module() -> WasmModule {
        WasmModule {
            version: WasmVersion::V1,
            source: ModuleSource::from(vec![0, 97, 115, 109, 1, 0, 0, 0]),
        }
    }

    fn instance_address() -> ContractAddress {
        ContractAddress::new(4321, 0)
    }

    #[tokio::test]
    async fn deploys_and_initializes() {
        let mut chain = MockChain::new(Outcome::Finalized, Outcome::Initialized(instance_address()));

        let deployment = deploy(&mut chain, &module(), Network::Local, Energy::from(30_000))
            .await
            .unwrap();

        assert_eq!(deployment.address, instance_address());
        assert_eq!(deployment.module_ref, module().get_module_ref());
        assert_eq!(deployment.verified, None);
        assert_eq!(chain.deployed, vec![module().get_module_ref()]);
        assert_eq!(
            chain.initialized,
            vec![(module().get_module_ref(), Energy::from(30_000))]
        );
        assert_eq!(chain.verified, 0);
    }

    #[tokio::test]
    async fn continues_when_module_already_deployed() {
        let mut chain = MockChain::new(
            Outcome::ModuleAlreadyExists,
            Outcome::Initialized(instance_address()),
        );

        let deployment = deploy(&mut chain, &module(), Network::Mainnet, Energy::from(30_000))
            .await
            .unwrap();

        assert_eq!(deployment.address, instance_address());
        assert_eq!(chain.initialized.len(), 1);
    }

    #[tokio::test]
    async fn stops_when_deployment_rejected() {
        let mut chain = MockChain::new(
            Outcome::Rejected("OutOfEnergy".to_string()),
            Outcome::Initialized(instance_address()),
        );

        let err = deploy(&mut chain, &module(), Network::Local, Energy::from(30_000))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ChainError::Rejected {
                stage: "module deployment",
                ..
            }
        ));
        assert!(chain.initialized.is_empty());
    }

    #[tokio::test]
    async fn fails_when_init_rejected() {
        let mut chain = MockChain::new(
            Outcome::Finalized,
            Outcome::Rejected("RejectedInit".to_string()),
        );

        let err = deploy(&mut chain, &module(), Network::Testnet, Energy::from(30_000))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ChainError::Rejected {
                stage: "contract initialization",
                ..
            }
        ));
        assert_eq!(chain.verified, 0);
    }

    #[tokio::test]
    async fn verifies_on_testnet() {
        let mut chain = MockChain::new(Outcome::Finalized, Outcome::Initialized(instance_address()));

        let deployment = deploy(&mut chain, &module(), Network::Testnet, Energy::from(30_000))
            .await
            .unwrap();

        assert_eq!(deployment.verified, Some(true));
        assert_eq!(chain.verified, 1);
    }

    #[tokio::test]
    async fn verification_failure_does_not_fail_deployment() {
        let mut chain = MockChain::new(Outcome::Finalized, Outcome::Initialized(instance_address()));
        chain.instance = Err("unavailable".to_string());

        let deployment = deploy(&mut chain, &module(), Network::Testnet, Energy::from(30_000))
            .await
            .unwrap();

        assert_eq!(deployment.address, instance_address());
        assert_eq!(deployment.verified, Some(false));
    }

    #[tokio::test]
    async fn verification_detects_module_mismatch() {
        let mut chain = MockChain::new(Outcome::Finalized, Outcome::Initialized(instance_address()));
        let other = WasmModule {
            version: WasmVersion::V1,
            source: ModuleSource::from(vec![1, 2, 3]),
        };
        chain.instance = Ok(Instance {
            source_module: other.get_module_ref(),
            name: INIT_NAME.to_string(),
        });

        let err = verify(&mut chain, instance_address(), module().get_module_ref())
            .await
            .unwrap_err();

        assert!(matches!(err, ChainError::ModuleMismatch { .. }));
    }

    #[tokio::test]
    async fn verification_detects_foreign_contract() {
        let mut chain = MockChain::new(Outcome::Finalized, Outcome::Initialized(instance_address()));
        chain.instance = Ok(Instance {
            source_module: module().get_module_ref(),
            name: "init_Other".to_string(),
        });

        let deployment = deploy(&mut chain, &module(), Network::Testnet, Energy::from(30_000))
            .await
            .unwrap();
        assert_eq!(deployment.verified, Some(false));

        let err = verify(&mut chain, instance_address(), module().get_module_ref())
            .await
            .unwrap_err();
        assert!(matches!(err, ChainError::NameMismatch { .. }));
    }
}
