//! Scripts for deploying the Confidex and confidential token contracts.

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;

/// Our deploy utils
pub mod deploy;

// Our output utils
pub mod output_writer;

pub mod tx;
