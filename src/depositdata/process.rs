use colored::*;
use log::*;
use std::sync::Arc;

use alloy::primitives::{B256, hex};

use super::{
    domain::compute_signing_root,
    params::DepositParameters,
    result::DepositResult,
    root::{RootService, TreeHashRoots},
    types::{BlsSignature, DepositData, DepositMessage, Domain},
};
use crate::{
    account::{ValidatorAccount, best_public_key},
    error::{DepositError, Record},
};

/// Accounts to generate deposits for and the parameters they share
pub struct DepositInput {
    pub accounts: Vec<Arc<dyn ValidatorAccount>>,
    pub params: DepositParameters,
}

/// Builds the deposit message for `account` together with the root to sign
pub fn build_deposit_message<R: RootService + ?Sized>(
    account: &dyn ValidatorAccount,
    params: &DepositParameters,
    roots: &R,
) -> Result<(DepositMessage, B256), DepositError> {
    let pubkey = best_public_key(account).ok_or_else(|| DepositError::NoPublicKey {
        account: account.name(),
    })?;
    let message = DepositMessage {
        pubkey,
        withdrawal_credentials: params.withdrawal_credentials,
        amount: params.amount,
    };
    let root = roots
        .deposit_message_root(&message)
        .map_err(|source| DepositError::RootComputation {
            account: account.name(),
            record: Record::DepositMessage,
            source,
        })?;
    Ok((message, root))
}

/// Signs `root` under `domain` with the account's key
pub fn sign_root(
    account: &dyn ValidatorAccount,
    root: B256,
    domain: Domain,
) -> Result<BlsSignature, DepositError> {
    let signing_root = compute_signing_root(root, domain);
    account
        .sign(&signing_root)
        .map_err(|source| DepositError::Signing {
            account: account.name(),
            source,
        })
}

/// Combines the signed message fields into deposit data and computes its root
pub fn build_deposit_data<R: RootService + ?Sized>(
    account: &dyn ValidatorAccount,
    message: &DepositMessage,
    signature: BlsSignature,
    roots: &R,
) -> Result<(DepositData, B256), DepositError> {
    let data = DepositData::from_message(message, signature);
    let root = roots
        .deposit_data_root(&data)
        .map_err(|source| DepositError::RootComputation {
            account: account.name(),
            record: Record::DepositData,
            source,
        })?;
    Ok((data, root))
}

/// `<wallet>/<account>`, accounts which cannot name their wallet are rejected
pub fn account_identity(account: &dyn ValidatorAccount) -> Result<String, DepositError> {
    match account.wallet() {
        Some(wallet) => Ok(format!("{}/{}", wallet.wallet_name(), account.name())),
        None => Err(DepositError::NoWallet {
            account: account.name(),
        }),
    }
}

/// Packages one account's deposit data and both roots into its result
pub fn assemble_result(
    account: String,
    params: &DepositParameters,
    data: DepositData,
    deposit_message_root: B256,
    deposit_data_root: B256,
) -> DepositResult {
    DepositResult {
        format: params.format,
        account,
        pubkey: data.pubkey,
        withdrawal_credentials: data.withdrawal_credentials,
        amount: data.amount,
        signature: data.signature,
        fork_version: params.fork_version,
        deposit_message_root,
        deposit_data_root,
    }
}

fn process_account<R: RootService + ?Sized>(
    account: &dyn ValidatorAccount,
    params: &DepositParameters,
    roots: &R,
) -> Result<DepositResult, DepositError> {
    let (message, message_root) = build_deposit_message(account, params, roots)?;
    trace!("{:#?}", message);
    let signature = sign_root(account, message_root, params.domain)?;
    let (data, data_root) = build_deposit_data(account, &message, signature, roots)?;
    let identity = account_identity(account)?;
    debug!(
        "{}: {} [message_root:{}, data_root:{}]",
        identity.white().bold(),
        hex::encode(data.pubkey).blue(),
        hex::encode(message_root).green(),
        hex::encode(data_root).magenta(),
    );
    Ok(assemble_result(
        identity,
        params,
        data,
        message_root,
        data_root,
    ))
}

/// Generate signed deposit data for every account of `data`, in order.
///
/// The first failing account aborts the batch and no results are returned.
pub fn process_with<R: RootService + ?Sized>(
    data: Option<&DepositInput>,
    roots: &R,
) -> Result<Vec<DepositResult>, DepositError> {
    let data = data.ok_or(DepositError::NoInput)?;
    let mut results = Vec::with_capacity(data.accounts.len());
    for account in data.accounts.iter() {
        results.push(process_account(account.as_ref(), &data.params, roots)?);
    }
    debug!("generated {} deposits", results.len());
    Ok(results)
}

pub fn process(data: Option<&DepositInput>) -> Result<Vec<DepositResult>, DepositError> {
    process_with(data, &TreeHashRoots)
}
