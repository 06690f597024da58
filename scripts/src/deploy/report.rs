//! Operator facing report of a deployment

use std::io::Write;

use alloy::primitives::U256;

use super::DeploymentResult;
use crate::errors::ScriptError;

const BANNER_RULE: &str = "===========================================";

/// Metadata shown in the token deployment banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    /// Token name
    pub name: String,
    /// Token symbol
    pub symbol: String,
    /// Initial supply, in base units
    pub initial_supply: U256,
}

/// How a deployment result is presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Address lines, followed by extra labelled values
    Plain { details: Vec<(String, String)> },
    /// Decorated token banner
    TokenBanner(TokenMetadata),
}

impl Report {
    /// A plain report without extra lines
    pub fn plain() -> Self {
        Report::Plain {
            details: Vec::new(),
        }
    }

    /// Add a labelled line to a plain report, ignored by the banner
    pub fn detail(mut self, label: impl Into<String>, value: impl ToString) -> Self {
        if let Report::Plain { details } = &mut self {
            details.push((label.into(), value.to_string()));
        }
        self
    }

    /// Write the report for `result` to `out`
    pub fn write<W: Write>(&self, out: &mut W, result: &DeploymentResult) -> Result<(), ScriptError> {
        self.write_lines(out, result)
            .map_err(|e| ScriptError::Output(e.to_string()))
    }

    fn write_lines<W: Write>(&self, out: &mut W, result: &DeploymentResult) -> std::io::Result<()> {
        match self {
            Report::Plain { details } => {
                writeln!(out, "{} deployed to: {}", result.contract, result.deployed_address)?;
                writeln!(out, "Owner address: {}", result.signer_address)?;
                for (label, value) in details {
                    writeln!(out, "{}: {}", label, value)?;
                }
            }
            Report::TokenBanner(token) => {
                writeln!(out, "\n{}", BANNER_RULE)?;
                writeln!(out, "Confidential Token Deployment Successful ✅")?;
                writeln!(out, "{}", BANNER_RULE)?;
                writeln!(out, "📝 Contract Name: {}", token.name)?;
                writeln!(out, "🏠 Contract Address: {}", result.deployed_address)?;
                writeln!(out, "💰 Initial Supply: {}", token.initial_supply)?;
                writeln!(out, "🔤 Token Symbol: {}", token.symbol)?;
                writeln!(out, "{}\n", BANNER_RULE)?;
                writeln!(out, "Owner address: {}", result.signer_address)?;
            }
        }
        out.flush()
    }
}
