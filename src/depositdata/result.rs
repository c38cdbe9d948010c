use alloy::primitives::B256;
use serde_derive::Serialize;

use super::{
    params::OutputFormat,
    types::{BlsPublicKey, BlsSignature, ForkVersion},
};

/// Signed deposit for a single validator account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepositResult {
    #[serde(skip)]
    pub format: OutputFormat,
    pub account: String,
    pub pubkey: BlsPublicKey,
    pub withdrawal_credentials: B256,
    #[serde(with = "serde_utils::quoted_u64")]
    pub amount: u64,
    pub signature: BlsSignature,
    pub fork_version: ForkVersion,
    pub deposit_message_root: B256,
    pub deposit_data_root: B256,
}
