//! Compiled contract artifacts.
//!
//! Artifacts are the JSON files a Solidity toolchain writes next to each
//! compiled contract. Both layouts in common use are understood:
//!
//! - Hardhat: `artifacts/contracts/Foo.sol/Foo.json`, with `"bytecode":
//!   "0x…"`.
//! - Foundry: `out/Foo.sol/Foo.json`, with `"bytecode": {"object": "0x…"}`.
use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use eyre::Context;
use serde::Deserialize;

use crate::Error;

/// Hardhat keeps compiler input and output here; never an artifact.
const BUILD_INFO_DIR: &str = "build-info";

/// A compiled contract template: creation bytecode plus ABI.
#[derive(Clone, Debug)]
pub struct Artifact {
    /// Name of the contract.
    pub contract_name: String,
    /// Source file the contract was compiled from, when recorded.
    pub source_name: Option<String>,
    /// Contract ABI.
    pub abi: JsonAbi,
    /// Creation (init) bytecode, without constructor arguments.
    pub bytecode: Bytes,
    /// File the artifact was read from.
    pub path: PathBuf,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    #[serde(default)]
    contract_name: Option<String>,
    #[serde(default)]
    source_name: Option<String>,
    abi: JsonAbi,
    bytecode: RawBytecode,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(Bytes),
    Object { object: Bytes },
}

impl From<RawBytecode> for Bytes {
    fn from(value: RawBytecode) -> Self {
        match value {
            RawBytecode::Hex(bytes) | RawBytecode::Object { object: bytes } => {
                bytes
            }
        }
    }
}

impl Artifact {
    /// Read an artifact from `path`.
    ///
    /// The contract name falls back to the file stem when the artifact does
    /// not record one.
    ///
    /// # Errors
    ///
    /// May fail if the file cannot be read or is not an artifact. Bytecode with
    /// unlinked library placeholders is not valid hex and fails here too.
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).wrap_err_with(|| {
            format!("failed to read artifact {}", path.display())
        })?;
        let raw: RawArtifact = serde_json::from_str(&json).wrap_err_with(|| {
            format!("failed to parse artifact {}", path.display())
        })?;

        let contract_name = raw
            .contract_name
            .or_else(|| {
                path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_default();

        Ok(Self {
            contract_name,
            source_name: raw.source_name,
            abi: raw.abi,
            bytecode: raw.bytecode.into(),
            path: path.to_path_buf(),
        })
    }

    /// Parameter types of the constructor, in order.
    ///
    /// A contract without an explicit constructor takes no parameters.
    #[must_use]
    pub fn constructor_inputs(&self) -> Vec<String> {
        self.abi
            .constructor()
            .map(|constructor| {
                constructor
                    .inputs
                    .iter()
                    .map(|param| param.selector_type().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Checks that the constructor takes exactly `expected` parameter types.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::ConstructorMismatch`] otherwise.
    pub fn ensure_constructor(&self, expected: &[&str]) -> eyre::Result<()> {
        let actual = self.constructor_inputs();
        if actual.iter().map(String::as_str).eq(expected.iter().copied()) {
            return Ok(());
        }

        Err(Error::ConstructorMismatch {
            name: self.contract_name.clone(),
            expected: expected.iter().map(|ty| (*ty).to_owned()).collect(),
            actual,
        }
        .into())
    }

    /// Checks that the artifact carries creation code.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::EmptyBytecode`] for interfaces and abstract
    /// contracts.
    pub fn ensure_deployable(&self) -> eyre::Result<()> {
        if self.bytecode.is_empty() {
            return Err(
                Error::EmptyBytecode { name: self.contract_name.clone() }.into()
            );
        }
        Ok(())
    }
}

/// A directory of compiled artifacts.
#[derive(Clone, Debug)]
pub struct Artifacts {
    root: PathBuf,
}

impl Artifacts {
    /// Artifacts rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the artifact of contract `name`.
    ///
    /// `name` is either a bare contract name (`CredentialManager`) or a fully
    /// qualified one (`contracts/CredentialManager.sol:CredentialManager`),
    /// the latter picking among contracts that share a name.
    ///
    /// # Errors
    ///
    /// - [`Error::ArtifactNotFound`] if nothing matches.
    /// - [`Error::AmbiguousArtifact`] if several files match.
    /// - Any error of [`Artifact::from_file`] for the matching file.
    pub fn find(&self, name: &str) -> eyre::Result<Artifact> {
        let (source, contract) = match name.rsplit_once(':') {
            Some((source, contract)) => (Some(source), contract),
            None => (None, name),
        };

        let not_found = || Error::ArtifactNotFound {
            name: name.to_owned(),
            root: self.root.clone(),
        };

        if !self.root.is_dir() {
            return Err(not_found().into());
        }

        let file_name = format!("{contract}.json");
        let mut candidates = Vec::new();
        collect(&self.root, &file_name, &mut candidates)?;

        if let Some(source) = source {
            let source = Path::new(source);
            candidates.retain(|path| {
                path.parent().is_some_and(|dir| {
                    dir.ends_with(source)
                        || source
                            .file_name()
                            .is_some_and(|file| dir.ends_with(file))
                })
            });
        }

        match candidates.len() {
            0 => Err(not_found().into()),
            1 => {
                let artifact = Artifact::from_file(&candidates[0])?;
                tracing::debug!(
                    contract = %artifact.contract_name,
                    path = %artifact.path.display(),
                    "resolved artifact"
                );
                Ok(artifact)
            }
            _ => {
                candidates.sort();
                Err(Error::AmbiguousArtifact {
                    name: name.to_owned(),
                    candidates,
                }
                .into())
            }
        }
    }
}

/// Recursively collects every file named `file_name` under `dir`.
fn collect(
    dir: &Path,
    file_name: &str,
    out: &mut Vec<PathBuf>,
) -> eyre::Result<()> {
    let entries = fs::read_dir(dir).wrap_err_with(|| {
        format!("failed to read artifacts directory {}", dir.display())
    })?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            if entry.file_name() != BUILD_INFO_DIR {
                collect(&path, file_name, out)?;
            }
        } else if entry.file_name() == file_name {
            out.push(path);
        }
    }

    Ok(())
}
