use alloy::primitives::{B256, FixedBytes};
use serde_derive::Serialize;

/// Compressed BLS12-381 public key
pub type BlsPublicKey = FixedBytes<48>;
/// Compressed BLS12-381 signature
pub type BlsSignature = FixedBytes<96>;
pub type ForkVersion = FixedBytes<4>;
pub type Domain = B256;

#[derive(Debug, Clone, PartialEq, tree_hash_derive::TreeHash, Serialize)]
pub struct DepositMessage {
    /// Validator public key
    pub pubkey: BlsPublicKey,
    /// Withdrawal credentials
    pub withdrawal_credentials: B256,
    /// Amount of ether deposited in gwei
    #[serde(with = "serde_utils::quoted_u64")]
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, tree_hash_derive::TreeHash, Serialize)]
pub struct DepositData {
    /// Validator public key
    pub pubkey: BlsPublicKey,
    /// Withdrawal credentials
    pub withdrawal_credentials: B256,
    /// Amount of ether deposited in gwei
    #[serde(with = "serde_utils::quoted_u64")]
    pub amount: u64,
    /// Deposit signature
    pub signature: BlsSignature,
}

impl DepositData {
    pub fn from_message(message: &DepositMessage, signature: BlsSignature) -> Self {
        DepositData {
            pubkey: message.pubkey,
            withdrawal_credentials: message.withdrawal_credentials,
            amount: message.amount,
            signature,
        }
    }
}

/// Object root paired with the domain it is signed under
#[derive(Debug, tree_hash_derive::TreeHash)]
pub struct SigningData {
    pub object_root: B256,
    pub domain: Domain,
}

#[derive(Debug, tree_hash_derive::TreeHash)]
pub struct ForkData {
    pub current_version: ForkVersion,
    pub genesis_validators_root: B256,
}
