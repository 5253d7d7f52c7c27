use std::path::PathBuf;

use alloy::primitives::TxHash;

/// Failures a caller may want to tell apart.
///
/// Every fallible function in this crate returns an [`eyre::Report`]; these
/// variants can be recovered from it with [`eyre::Report::downcast_ref`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The network declares no private key, so there is nobody to sign with.
    #[error("no signers configured for network `{network}`; set PRIVATE_KEY")]
    NoSigners {
        /// Name of the network that was asked for a signer.
        network: String,
    },
    /// The requested network is not declared in the configuration.
    #[error("network `{name}` is not configured; available: {available:?}")]
    UnknownNetwork {
        /// Requested network name.
        name: String,
        /// Names of the declared networks.
        available: Vec<String>,
    },
    /// No compiled artifact matches the contract name.
    #[error("artifact for contract `{name}` not found in {}", root.display())]
    ArtifactNotFound {
        /// Requested contract name.
        name: String,
        /// Directory that was searched.
        root: PathBuf,
    },
    /// Several compiled artifacts share the contract name.
    #[error(
        "multiple artifacts for contract `{name}`: {candidates:?}; \
         use a fully qualified name"
    )]
    AmbiguousArtifact {
        /// Requested contract name.
        name: String,
        /// Paths of every matching artifact.
        candidates: Vec<PathBuf>,
    },
    /// The artifact has no creation code (an interface or abstract contract).
    #[error(
        "contract `{name}` has no creation bytecode and cannot be deployed"
    )]
    EmptyBytecode {
        /// Contract name.
        name: String,
    },
    /// The artifact's constructor does not take the expected parameters.
    #[error(
        "constructor of `{name}` takes ({}), expected ({})",
        actual.join(","),
        expected.join(",")
    )]
    ConstructorMismatch {
        /// Contract name.
        name: String,
        /// Parameter types the caller is going to encode.
        expected: Vec<String>,
        /// Parameter types found in the ABI.
        actual: Vec<String>,
    },
    /// The RPC endpoint serves a different chain than the one declared.
    #[error(
        "network `{network}` is configured with chain id {expected}, \
         but the endpoint reports {actual}"
    )]
    ChainIdMismatch {
        /// Network name.
        network: String,
        /// Declared chain id.
        expected: u64,
        /// Chain id reported by `eth_chainId`.
        actual: u64,
    },
    /// The deployment transaction was mined but reverted.
    #[error("transaction {tx_hash} reverted")]
    Reverted {
        /// Hash of the reverted transaction.
        tx_hash: TxHash,
    },
    /// The receipt does not carry the address of a created contract.
    #[error("receipt for transaction {tx_hash} contains no contract address")]
    MissingContractAddress {
        /// Hash of the transaction.
        tx_hash: TxHash,
    },
}
