//! Deployment harness for the `CredentialManager` contract.
//!
//! The crate is split the way a deployment actually runs:
//!
//! - [`config`] and [`network`] declare where to deploy and with which key,
//!   read from the process environment (and a `.env` file, see
//!   [`environment`]).
//! - [`artifact`] resolves a compiled contract template by name.
//! - [`Account`] binds a signer to a wallet provider, and [`Deployer`] submits
//!   the creation transaction and waits for its receipt.
mod account;
pub mod artifact;
pub mod config;
mod deploy;
pub mod environment;
mod error;
pub mod network;
pub mod receipt;

pub use account::Account;
pub use artifact::{Artifact, Artifacts};
pub use config::Config;
pub use deploy::{
    deploy_credential_manager, CredentialManager, Deployer, Deployment,
    CONTRACT_NAME,
};
pub use error::Error;
pub use network::NetworkConfig;
