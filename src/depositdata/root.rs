use alloy::primitives::B256;
use tree_hash::TreeHash;

use super::types::{DepositData, DepositMessage};
use crate::error::RootError;

/// Canonical (SSZ hash tree) roots of the deposit records.
///
/// Implementations must be deterministic and match the consensus layer
/// merkleization bit-for-bit, the deposit contract checks `deposit_data_root`.
pub trait RootService {
    fn deposit_message_root(&self, message: &DepositMessage) -> Result<B256, RootError>;
    fn deposit_data_root(&self, data: &DepositData) -> Result<B256, RootError>;
}

/// `RootService` backed by the `tree_hash` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeHashRoots;

impl RootService for TreeHashRoots {
    fn deposit_message_root(&self, message: &DepositMessage) -> Result<B256, RootError> {
        Ok(message.tree_hash_root())
    }

    fn deposit_data_root(&self, data: &DepositData) -> Result<B256, RootError> {
        Ok(data.tree_hash_root())
    }
}
