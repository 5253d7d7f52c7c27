use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use eyre::Context;

use crate::{
    artifact::Artifact, deploy::Deployer, network::NetworkConfig, Error,
};

/// A deployer identity bound to a network endpoint.
#[derive(Clone)]
pub struct Account {
    /// The account's local private key wrapper.
    pub signer: PrivateKeySigner,
    /// The account's wallet -- an `alloy` provider with a `WalletFiller`.
    pub wallet: DynProvider,
}

impl Account {
    /// Bind `signer` to the JSON-RPC endpoint at `url`.
    ///
    /// No request is sent until the account is used.
    ///
    /// # Errors
    ///
    /// May fail if `url` is not a valid URL.
    pub fn connect(signer: PrivateKeySigner, url: &str) -> eyre::Result<Self> {
        let rpc_url: Url = url
            .parse()
            .wrap_err_with(|| format!("failed to parse rpc url `{url}`"))?;

        let wallet = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer.clone()))
            .connect_http(rpc_url)
            .erased();

        Ok(Self { signer, wallet })
    }

    /// Retrieve this account's address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Checks that the endpoint serves the chain `network` declares.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ChainIdMismatch`] on a mismatch, or if the
    /// `eth_chainId` request fails.
    pub async fn ensure_chain_id(
        &self,
        network: &NetworkConfig,
    ) -> eyre::Result<()> {
        let actual = self.wallet.get_chain_id().await.wrap_err_with(|| {
            format!("failed to query chain id of network `{}`", network.name)
        })?;

        if actual != network.chain_id {
            return Err(Error::ChainIdMismatch {
                network: network.name.clone(),
                expected: network.chain_id,
                actual,
            }
            .into());
        }

        tracing::debug!(
            network = %network.name,
            chain_id = actual,
            "chain id verified"
        );
        Ok(())
    }

    /// Create a configurable smart contract deployer on behalf of this account.
    #[must_use]
    pub fn as_deployer(&self, artifact: Artifact) -> Deployer<'_> {
        Deployer::new(self, artifact)
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account").field("address", &self.address()).finish()
    }
}

#[cfg(test)]
mod tests {
    use alloy::{primitives::U64, providers::mock::Asserter};

    use super::*;

    fn mocked(asserter: Asserter) -> Account {
        let signer = PrivateKeySigner::random();
        let wallet = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer.clone()))
            .connect_mocked_client(asserter)
            .erased();
        Account { signer, wallet }
    }

    fn base_sepolia() -> NetworkConfig {
        NetworkConfig::base_sepolia(|_| None)
    }

    #[test]
    fn connect_rejects_malformed_url() {
        let err = Account::connect(PrivateKeySigner::random(), "not a url")
            .unwrap_err();
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn address_is_the_signer_address() {
        let signer = PrivateKeySigner::random();
        let account =
            Account::connect(signer.clone(), "http://localhost:8545").unwrap();
        assert_eq!(account.address(), signer.address());
    }

    #[tokio::test]
    async fn matching_chain_id_passes() {
        let asserter = Asserter::new();
        asserter.push_success(&U64::from(84532));

        mocked(asserter).ensure_chain_id(&base_sepolia()).await.unwrap();
    }

    #[tokio::test]
    async fn mismatched_chain_id_is_rejected() {
        let asserter = Asserter::new();
        asserter.push_success(&U64::from(1));

        let err = mocked(asserter)
            .ensure_chain_id(&base_sepolia())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::ChainIdMismatch { expected: 84532, actual: 1, .. })
        ));
    }

    #[tokio::test]
    async fn chain_id_request_failure_propagates() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("connection refused");

        let err = mocked(asserter)
            .ensure_chain_id(&base_sepolia())
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<Error>().is_none());
        assert_eq!(
            err.to_string(),
            "failed to query chain id of network `baseSepolia`"
        );
    }
}
