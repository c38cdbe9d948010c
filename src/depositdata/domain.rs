use alloy::primitives::{B256, FixedBytes};
use tree_hash::TreeHash;

use super::types::{Domain, ForkData, ForkVersion, SigningData};

/// Ciphersuite used for consensus layer signatures (proof of possession)
pub const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

pub const DOMAIN_DEPOSIT: FixedBytes<4> = FixedBytes([0x03, 0x00, 0x00, 0x00]);

/// Deposits are valid across forks, the domain only binds the genesis fork
/// version and always uses an empty genesis validators root.
pub fn compute_deposit_domain(fork_version: ForkVersion) -> Domain {
    compute_domain(DOMAIN_DEPOSIT, fork_version, B256::ZERO)
}

pub fn compute_domain(
    domain_type: FixedBytes<4>,
    fork_version: ForkVersion,
    genesis_validators_root: B256,
) -> Domain {
    let fork_data_root = ForkData {
        current_version: fork_version,
        genesis_validators_root,
    }
    .tree_hash_root();
    let mut domain = [0u8; 32];
    domain[..4].copy_from_slice(domain_type.as_slice());
    domain[4..].copy_from_slice(&fork_data_root[..28]);
    B256::from(domain)
}

/// The 32 bytes actually handed to the signer for `object_root` under `domain`
pub fn compute_signing_root(object_root: B256, domain: Domain) -> B256 {
    SigningData {
        object_root,
        domain,
    }
    .tree_hash_root()
}
