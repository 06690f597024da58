//! Chain access: the RPC client and the deployment provider built on it

pub mod client;
pub mod provider;
