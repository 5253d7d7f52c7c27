//! Deploys `CredentialManager` with the deployer as its admin.
//!
//! Reads `RPC_URL` and `PRIVATE_KEY` from the environment (or `.env`),
//! resolves the compiled artifact, and prints the deployer and contract
//! addresses. Any failure exits with status 1 and the error on stderr.
use std::path::PathBuf;

use clap::{error::ErrorKind, Parser};
use credential_deploy::{
    deploy_credential_manager, environment, network::BASE_SEPOLIA, Account,
    Artifacts, Config, CONTRACT_NAME,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about, version)]
struct Args {
    /// Network to deploy to.
    #[arg(
        long,
        env = "CREDENTIAL_MANAGER_NETWORK",
        default_value = BASE_SEPOLIA
    )]
    network: String,

    /// Directory holding the compiled contract artifacts.
    #[arg(long, env = "ARTIFACTS_PATH", default_value = "artifacts")]
    artifacts: PathBuf,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before parsing, so `.env` can feed `RUST_LOG` and the env-backed flags.
    let dotenv = environment::load_dotenv();
    init_tracing();
    if let Some(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded .env file");
    }

    // Help and version exit 0; any other usage error exits 1 like the rest.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            err.exit()
        }
        Err(err) => return Err(err.into()),
    };
    let config = Config::from_env();
    let network = config.network(&args.network)?;
    tracing::debug!(
        network = %network.name,
        chain_id = network.chain_id,
        "network selected"
    );

    let signer = network.first_signer()?;
    println!("Deploying with: {}", signer.address());

    let artifact = Artifacts::new(&args.artifacts).find(CONTRACT_NAME)?;

    let account = Account::connect(signer, &network.url)?;
    account.ensure_chain_id(network).await?;

    let deployment = deploy_credential_manager(&account, artifact).await?;
    println!("{CONTRACT_NAME} deployed to: {}", deployment.contract_address);

    Ok(())
}

/// Logs go to stderr; stdout only carries the deployment result.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
