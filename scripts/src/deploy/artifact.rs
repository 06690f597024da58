//! Loading of compiled contract artifacts and encoding of their constructor calls

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    hex,
    json_abi::JsonAbi,
    primitives::Bytes,
};
use json::JsonValue;
use tracing::debug;

use crate::{
    constants::BUILD_INFO_DIR,
    deploy::ConstructorArg,
    errors::ScriptError,
};

/// A directory of Hardhat or Foundry style artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Store rooted at the artifacts directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the artifact file of `contract`.
    ///
    /// A bare name must match exactly one `<Name>.json` below the root. A fully
    /// qualified `path/File.sol:Name` identifier points straight at
    /// `<root>/path/File.sol/Name.json`.
    pub fn locate(&self, contract: &str) -> Result<PathBuf, ScriptError> {
        if let Some((source, name)) = contract.split_once(':') {
            let path = self.root.join(source).join(format!("{name}.json"));
            return if path.is_file() {
                Ok(path)
            } else {
                Err(ScriptError::ArtifactLoading(format!(
                    "no artifact for {} at {}",
                    contract,
                    path.display()
                )))
            };
        }

        let file_name = format!("{contract}.json");
        let mut found = Vec::new();
        find_artifacts(&self.root, &file_name, &mut found)?;

        match found.len() {
            0 => Err(ScriptError::ArtifactLoading(format!(
                "no artifact named {} under {}",
                file_name,
                self.root.display()
            ))),
            1 => Ok(found.remove(0)),
            _ => {
                let candidates = found
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(ScriptError::ArtifactLoading(format!(
                    "{} is ambiguous, use a fully qualified name ({})",
                    contract, candidates
                )))
            }
        }
    }

    /// Locate and parse the artifact of `contract`
    pub fn load(&self, contract: &str) -> Result<ContractArtifact, ScriptError> {
        let path = self.locate(contract)?;
        debug!("Loading artifact from {}", path.display());

        let contents = fs::read_to_string(&path)
            .map_err(|e| ScriptError::ArtifactLoading(format!("{}: {}", path.display(), e)))?;

        let name = contract.rsplit(':').next().unwrap_or(contract);
        ContractArtifact::from_json(name, &contents)
    }
}

/// Recursively collect the files called `file_name`, skipping compiler build info
fn find_artifacts(dir: &Path, file_name: &str, found: &mut Vec<PathBuf>) -> Result<(), ScriptError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| ScriptError::ArtifactLoading(format!("{}: {}", dir.display(), e)))?;

    for entry in entries {
        let path = entry
            .map_err(|e| ScriptError::ArtifactLoading(e.to_string()))?
            .path();

        if path.is_dir() {
            if path.file_name().is_some_and(|name| name == BUILD_INFO_DIR) {
                continue;
            }
            find_artifacts(&path, file_name, found)?;
        } else if path.file_name().is_some_and(|name| name == file_name) {
            found.push(path);
        }
    }

    Ok(())
}

/// The ABI and creation bytecode of a compiled contract
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    /// Contract name
    pub name: String,
    /// Contract ABI, used to encode the constructor arguments
    pub abi: JsonAbi,
    /// Creation bytecode
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Parse an artifact file's content
    pub fn from_json(name: &str, contents: &str) -> Result<Self, ScriptError> {
        let parsed = json::parse(contents)
            .map_err(|e| ScriptError::ArtifactLoading(format!("{}: {}", name, e)))?;

        let name = parsed["contractName"].as_str().unwrap_or(name).to_string();

        if !parsed["abi"].is_array() {
            return Err(ScriptError::ArtifactLoading(format!(
                "{} artifact has no abi",
                name
            )));
        }
        let abi: JsonAbi = serde_json::from_str(&parsed["abi"].dump())
            .map_err(|e| ScriptError::ArtifactLoading(format!("{} abi: {}", name, e)))?;

        let bytecode = parse_bytecode(&name, &parsed["bytecode"])?;

        Ok(Self {
            name,
            abi,
            bytecode,
        })
    }

    /// ABI encode the constructor arguments, checking them against the constructor signature
    pub fn encode_constructor_args(&self, args: &[ConstructorArg]) -> Result<Vec<u8>, ScriptError> {
        let Some(constructor) = self.abi.constructor.as_ref() else {
            return if args.is_empty() {
                Ok(Vec::new())
            } else {
                Err(ScriptError::ConstructorMismatch(format!(
                    "{} has no constructor but {} arguments were given",
                    self.name,
                    args.len()
                )))
            };
        };

        if constructor.inputs.len() != args.len() {
            let signature = constructor
                .inputs
                .iter()
                .map(|param| param.ty.as_str())
                .collect::<Vec<_>>()
                .join(",");
            return Err(ScriptError::ConstructorMismatch(format!(
                "{} expects {} arguments ({}), got {}",
                self.name,
                constructor.inputs.len(),
                signature,
                args.len()
            )));
        }

        let mut values = Vec::<DynSolValue>::with_capacity(args.len());
        for (arg, param) in args.iter().zip(constructor.inputs.iter()) {
            let ty = param.resolve().map_err(|e| {
                ScriptError::ConstructorMismatch(format!("could not resolve {}: {}", param, e))
            })?;
            let value = ty.coerce_str(&arg.to_string()).map_err(|e| {
                ScriptError::ConstructorMismatch(format!(
                    "could not parse `{}` as {}: {}",
                    arg, param.ty, e
                ))
            })?;
            values.push(value);
        }

        constructor
            .abi_encode_input(&values)
            .map_err(|e| ScriptError::ConstructorMismatch(e.to_string()))
    }

    /// Creation bytecode followed by the encoded constructor arguments
    pub fn deploy_code(&self, args: &[ConstructorArg]) -> Result<Bytes, ScriptError> {
        let encoded_args = self.encode_constructor_args(args)?;

        let mut code = Vec::with_capacity(self.bytecode.len() + encoded_args.len());
        code.extend_from_slice(&self.bytecode);
        code.extend(encoded_args);
        Ok(code.into())
    }
}

/// Hardhat stores the bytecode as a hex string, Foundry as `{ "object": hex }`
fn parse_bytecode(name: &str, value: &JsonValue) -> Result<Bytes, ScriptError> {
    let hex_code = value["object"]
        .as_str()
        .or_else(|| value.as_str())
        .ok_or_else(|| ScriptError::ArtifactLoading(format!("{} artifact has no bytecode", name)))?;

    if hex_code.contains("__$") {
        return Err(ScriptError::ArtifactLoading(format!(
            "{} bytecode has unlinked library placeholders",
            name
        )));
    }

    let bytecode = hex::decode(hex_code)
        .map_err(|e| ScriptError::ArtifactLoading(format!("{} bytecode: {}", name, e)))?;
    if bytecode.is_empty() {
        return Err(ScriptError::ArtifactLoading(format!(
            "{} has empty bytecode, is it an interface or abstract contract?",
            name
        )));
    }

    Ok(bytecode.into())
}
