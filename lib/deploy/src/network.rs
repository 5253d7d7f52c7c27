//! Network declarations.
use std::fmt;

use alloy::signers::local::PrivateKeySigner;
use eyre::Context;
use zeroize::Zeroizing;

use crate::Error;

/// Name under which Base Sepolia is declared.
pub const BASE_SEPOLIA: &str = "baseSepolia";
/// Chain id of Base Sepolia.
pub const BASE_SEPOLIA_CHAIN_ID: u64 = 84532;
/// Public endpoint used when `RPC_URL` is not set.
pub const DEFAULT_RPC_URL: &str = "https://sepolia.base.org";

/// Environment variable holding the JSON-RPC endpoint.
pub const RPC_URL_ENV_VAR_NAME: &str = "RPC_URL";
/// Environment variable holding the hex-encoded deployer key.
pub const PRIVATE_KEY_ENV_VAR_NAME: &str = "PRIVATE_KEY";

/// A network the harness can deploy to.
///
/// Values are taken as given: neither the url nor the keys are validated here.
/// A malformed key fails in [`NetworkConfig::signers`], a malformed url when a
/// provider is built for it.
#[derive(Clone)]
pub struct NetworkConfig {
    /// Name the network is declared under.
    pub name: String,
    /// JSON-RPC endpoint.
    pub url: String,
    /// Chain id the endpoint is expected to serve.
    pub chain_id: u64,
    accounts: Vec<Zeroizing<String>>,
}

impl NetworkConfig {
    /// Declare a network with the given private keys.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        chain_id: u64,
        accounts: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            chain_id,
            accounts: accounts.into_iter().map(Zeroizing::new).collect(),
        }
    }

    /// Declare Base Sepolia from the variables `lookup` returns.
    ///
    /// `RPC_URL` falls back to [`DEFAULT_RPC_URL`]. Without `PRIVATE_KEY` the
    /// network has no accounts. Empty values count as unset.
    pub fn base_sepolia(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let url = var(RPC_URL_ENV_VAR_NAME)
            .unwrap_or_else(|| DEFAULT_RPC_URL.to_owned());
        let accounts = var(PRIVATE_KEY_ENV_VAR_NAME).into_iter().collect();

        Self::new(BASE_SEPOLIA, url, BASE_SEPOLIA_CHAIN_ID, accounts)
    }

    #[cfg(test)]
    fn accounts_len(&self) -> usize {
        self.accounts.len()
    }

    /// All signers available on this network, in declaration order.
    ///
    /// # Errors
    ///
    /// May fail if a declared key is not a valid hex-encoded secp256k1 key.
    pub fn signers(&self) -> eyre::Result<Vec<PrivateKeySigner>> {
        self.accounts
            .iter()
            .enumerate()
            .map(|(index, key)| {
                key.parse::<PrivateKeySigner>().wrap_err_with(|| {
                    format!(
                        "failed to parse private key #{index} of network `{}`",
                        self.name
                    )
                })
            })
            .collect()
    }

    /// The first signer of [`NetworkConfig::signers`].
    ///
    /// # Errors
    ///
    /// Fails with [`Error::NoSigners`] if no key is declared, or if the key
    /// cannot be parsed.
    pub fn first_signer(&self) -> eyre::Result<PrivateKeySigner> {
        self.signers()?.into_iter().next().ok_or_else(|| {
            Error::NoSigners { network: self.name.clone() }.into()
        })
    }
}

impl fmt::Debug for NetworkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkConfig")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("chain_id", &self.chain_id)
            .field(
                "accounts",
                &format_args!("[{} redacted]", self.accounts.len()),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use alloy::primitives::Address;

    use super::*;

    // Well-known development key, never funded on a public network.
    const KEY: &str =
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const KEY_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn from_vars(vars: &[(&str, &str)]) -> NetworkConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        NetworkConfig::base_sepolia(|name| vars.get(name).cloned())
    }

    #[test]
    fn declares_base_sepolia() {
        let network = from_vars(&[]);
        assert_eq!(network.name, "baseSepolia");
        assert_eq!(network.chain_id, 84532);
    }

    #[test]
    fn missing_rpc_url_falls_back_to_public_endpoint() {
        let network = from_vars(&[]);
        assert_eq!(network.url, "https://sepolia.base.org");
    }

    #[test]
    fn empty_rpc_url_falls_back_to_public_endpoint() {
        let network = from_vars(&[(RPC_URL_ENV_VAR_NAME, "")]);
        assert_eq!(network.url, DEFAULT_RPC_URL);
    }

    #[test]
    fn rpc_url_is_passed_through_unvalidated() {
        let network = from_vars(&[(RPC_URL_ENV_VAR_NAME, "not a url")]);
        assert_eq!(network.url, "not a url");
    }

    #[test]
    fn missing_private_key_means_no_accounts() {
        let network = from_vars(&[]);
        assert_eq!(network.accounts_len(), 0);
        assert!(network.signers().unwrap().is_empty());
    }

    #[test]
    fn empty_private_key_means_no_accounts() {
        let network = from_vars(&[(PRIVATE_KEY_ENV_VAR_NAME, "")]);
        assert_eq!(network.accounts_len(), 0);
    }

    #[test]
    fn first_signer_fails_without_private_key() {
        let network = from_vars(&[]);
        let err = network.first_signer().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::NoSigners { network }) if network == BASE_SEPOLIA
        ));
    }

    #[test]
    fn first_signer_uses_private_key() {
        let network = from_vars(&[(PRIVATE_KEY_ENV_VAR_NAME, KEY)]);
        assert_eq!(network.accounts_len(), 1);
        let signer = network.first_signer().unwrap();
        assert_eq!(signer.address(), KEY_ADDRESS.parse::<Address>().unwrap());
    }

    #[test]
    fn private_key_without_prefix_is_accepted() {
        let network = from_vars(&[(PRIVATE_KEY_ENV_VAR_NAME, &KEY[2..])]);
        let signer = network.first_signer().unwrap();
        assert_eq!(signer.address(), KEY_ADDRESS.parse::<Address>().unwrap());
    }

    #[test]
    fn malformed_private_key_fails_at_signer_resolution() {
        let network = from_vars(&[(PRIVATE_KEY_ENV_VAR_NAME, "0xnope")]);
        assert_eq!(network.accounts_len(), 1);
        let err = network.first_signer().unwrap_err();
        assert!(err.downcast_ref::<Error>().is_none());
        assert!(err.to_string().contains("private key #0"));
    }

    #[test]
    fn debug_output_redacts_keys() {
        let network = from_vars(&[(PRIVATE_KEY_ENV_VAR_NAME, KEY)]);
        let debug = format!("{network:?}");
        assert!(!debug.contains(&KEY[2..]));
        assert!(debug.contains("1 redacted"));
    }
}
