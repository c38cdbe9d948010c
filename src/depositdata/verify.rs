use alloy::primitives::B256;
use thiserror::Error;

use super::{
    domain::{DST, compute_signing_root},
    result::DepositResult,
    root::RootService,
    types::{DepositData, DepositMessage, Domain},
};
use crate::error::RootError;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error(transparent)]
    Root(#[from] RootError),
    #[error("deposit message root mismatch: expected {expected}, got {actual}")]
    MessageRoot { expected: B256, actual: B256 },
    #[error("deposit data root mismatch: expected {expected}, got {actual}")]
    DataRoot { expected: B256, actual: B256 },
    #[error("invalid public key: {0}")]
    PublicKey(String),
    #[error("invalid signature: {0}")]
    Signature(String),
}

/// Recomputes both roots of `result` and checks its signature under `domain`
pub fn verify_result<R: RootService + ?Sized>(
    result: &DepositResult,
    domain: Domain,
    roots: &R,
) -> Result<(), VerifyError> {
    let message = DepositMessage {
        pubkey: result.pubkey,
        withdrawal_credentials: result.withdrawal_credentials,
        amount: result.amount,
    };
    let message_root = roots.deposit_message_root(&message)?;
    if message_root != result.deposit_message_root {
        return Err(VerifyError::MessageRoot {
            expected: result.deposit_message_root,
            actual: message_root,
        });
    }

    let data_root = roots.deposit_data_root(&DepositData::from_message(&message, result.signature))?;
    if data_root != result.deposit_data_root {
        return Err(VerifyError::DataRoot {
            expected: result.deposit_data_root,
            actual: data_root,
        });
    }

    let pubkey = blst::min_pk::PublicKey::from_bytes(result.pubkey.as_slice())
        .map_err(|e| VerifyError::PublicKey(format!("{:?}", e)))?;
    let signature = blst::min_pk::Signature::from_bytes(result.signature.as_slice())
        .map_err(|e| VerifyError::Signature(format!("{:?}", e)))?;
    let signing_root = compute_signing_root(message_root, domain);
    match signature.verify(true, signing_root.as_slice(), DST, &[], &pubkey, true) {
        blst::BLST_ERROR::BLST_SUCCESS => Ok(()),
        e => Err(VerifyError::Signature(format!("{:?}", e))),
    }
}
