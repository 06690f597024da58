use std::{fmt::LowerHex, fs, fs::File, io::Read, path::Path};

use json::JsonValue;

use crate::{deploy::DeploymentResult, errors::ScriptError};

/// A field recorded for a contract in the deployments file
pub enum OutputKeys<'a> {
    // Address of a deployed contract
    Deployment { key: &'a str },
    // Account that signed the deployment
    Owner { key: &'a str },
    // Hash of the deployment transaction
    Tx { key: &'a str },
}

impl OutputKeys<'_> {
    fn contract(&self) -> &str {
        match self {
            OutputKeys::Deployment { key } | OutputKeys::Owner { key } | OutputKeys::Tx { key } => {
                key
            }
        }
    }

    fn field(&self) -> &'static str {
        match self {
            OutputKeys::Deployment { .. } => "deploy",
            OutputKeys::Owner { .. } => "owner",
            OutputKeys::Tx { .. } => "tx",
        }
    }
}

/// Read a recorded value
pub fn read_output_file(file_path: &Path, key: OutputKeys) -> Result<String, ScriptError> {
    if !file_path.exists() {
        return Err(ScriptError::JsonOutputError(format!(
            "deployed addresses file {} not found",
            file_path.display()
        )));
    }

    // Parse it's json content into objects
    let parsed_json = get_json_from_file(file_path)?;

    parsed_json[key.contract()][key.field()]
        .as_str()
        .map(String::from)
        .ok_or_else(|| {
            ScriptError::JsonOutputError(format!(
                "no {} recorded for {}",
                key.field(),
                key.contract()
            ))
        })
}

/// Writes the given value for the deployed contract
pub fn write_output_file<T: LowerHex>(
    file_path: &Path,
    key: OutputKeys,
    value: T,
) -> Result<(), ScriptError> {
    // If the file doesn't exist, create it
    if !file_path.exists() {
        fs::write(file_path, "{}").map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;
    }

    let mut parsed_json = get_json_from_file(file_path)?;

    parsed_json[key.contract()][key.field()] = JsonValue::String(format!("{value:#x}"));

    // Write the updated json back to the file
    fs::write(file_path, json::stringify_pretty(parsed_json, 4))
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    Ok(())
}

/// Record everything worth keeping about a deployment
pub fn record_deployment(file_path: &Path, result: &DeploymentResult) -> Result<(), ScriptError> {
    let key = result.contract.as_str();
    write_output_file(file_path, OutputKeys::Deployment { key }, result.deployed_address)?;
    write_output_file(file_path, OutputKeys::Owner { key }, result.signer_address)?;
    write_output_file(file_path, OutputKeys::Tx { key }, result.transaction_hash)
}

/// Parses the JSON file at the given path
fn get_json_from_file(file_path: &Path) -> Result<JsonValue, ScriptError> {
    let mut file_contents = String::new();
    File::open(file_path)
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?
        .read_to_string(&mut file_contents)
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    json::parse(&file_contents).map_err(|e| ScriptError::JsonOutputError(e.to_string()))
}
