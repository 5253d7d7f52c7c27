use alloy::{
    network::TransactionBuilder,
    primitives::{Address, Bytes, TxHash},
    providers::Provider,
    rpc::types::TransactionRequest,
    sol,
    sol_types::SolConstructor,
};
use eyre::Context;

use crate::{account::Account, artifact::Artifact, receipt::Ext as _};

/// Name of the artifact [`deploy_credential_manager`] deploys.
pub const CONTRACT_NAME: &str = "CredentialManager";

sol! {
    /// Constructor of the credential registry; `admin` administers it.
    contract CredentialManager {
        constructor(address admin);
    }
}

/// Outcome of a confirmed contract creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deployment {
    /// Address of the created contract.
    pub contract_address: Address,
    /// Account that sent the creation transaction.
    pub deployer_address: Address,
    /// Hash of the creation transaction.
    pub transaction_hash: TxHash,
}

/// A basic smart contract deployer.
pub struct Deployer<'a> {
    account: &'a Account,
    artifact: Artifact,
    ctr_args: Option<Vec<u8>>,
}

impl<'a> Deployer<'a> {
    /// Deploy `artifact` on behalf of `account`.
    #[must_use]
    pub fn new(account: &'a Account, artifact: Artifact) -> Self {
        Self { account, artifact, ctr_args: None }
    }

    /// Add solidity constructor to the deployer.
    #[must_use]
    pub fn with_constructor(
        mut self,
        constructor: &impl SolConstructor,
    ) -> Self {
        self.ctr_args = Some(constructor.abi_encode());
        self
    }

    /// Creation bytecode followed by the encoded constructor arguments.
    #[must_use]
    pub fn init_code(&self) -> Bytes {
        let ctr_args = self.ctr_args.as_deref().unwrap_or_default();
        [&self.artifact.bytecode[..], ctr_args].concat().into()
    }

    /// Send the creation transaction and wait for its receipt.
    ///
    /// Consumes currently configured deployer. The transaction hash is logged
    /// as soon as the node accepts the transaction, so a deployment whose
    /// confirmation fails can still be traced on chain.
    ///
    /// # Errors
    ///
    /// May error if:
    ///
    /// - The artifact has no creation code.
    /// - The node rejects the transaction, or gas estimation fails.
    /// - Waiting for the receipt fails.
    /// - The transaction reverts.
    pub async fn deploy(self) -> eyre::Result<Deployment> {
        self.artifact.ensure_deployable()?;

        let name = &self.artifact.contract_name;
        let deployer_address = self.account.address();
        let tx = TransactionRequest::default()
            .with_from(deployer_address)
            .with_deploy_code(self.init_code());

        let pending = self
            .account
            .wallet
            .send_transaction(tx)
            .await
            .wrap_err_with(|| {
                format!("failed to submit deployment of `{name}`")
            })?;

        let transaction_hash = *pending.tx_hash();
        tracing::info!(
            contract = %name,
            deployer = %deployer_address,
            tx_hash = %transaction_hash,
            "deployment transaction submitted"
        );

        let receipt = pending.get_receipt().await.wrap_err_with(|| {
            format!(
                "failed to confirm deployment of `{name}` \
                 (transaction {transaction_hash})"
            )
        })?;
        receipt.ensure_status()?;
        let contract_address = receipt.address()?;

        tracing::info!(
            contract = %name,
            address = %contract_address,
            block = ?receipt.block_number,
            "contract deployed"
        );

        Ok(Deployment { contract_address, deployer_address, transaction_hash })
    }
}

/// Deploy `artifact` as a `CredentialManager` administered by `account`.
///
/// The admin is always the deployer itself.
///
/// # Errors
///
/// Fails if the artifact's constructor does not take a single `address`, or
/// with any error of [`Deployer::deploy`].
pub async fn deploy_credential_manager(
    account: &Account,
    artifact: Artifact,
) -> eyre::Result<Deployment> {
    artifact.ensure_constructor(&["address"])?;

    let admin = account.address();
    account
        .as_deployer(artifact)
        .with_constructor(&CredentialManager::constructorCall { admin })
        .deploy()
        .await
}
