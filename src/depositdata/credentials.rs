use alloy::primitives::{Address, B256};
use sha2::{Digest, Sha256};

use super::types::BlsPublicKey;
use crate::error::DepositError;

pub const BLS_WITHDRAWAL_PREFIX: u8 = 0x00;
pub const ETH1_ADDRESS_WITHDRAWAL_PREFIX: u8 = 0x01;
pub const COMPOUNDING_WITHDRAWAL_PREFIX: u8 = 0x02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsKind {
    Bls,
    Execution,
    Compounding,
}

impl CredentialsKind {
    pub fn is_compounding(&self) -> bool {
        *self == CredentialsKind::Compounding
    }
}

/// `0x00 || sha256(pubkey)[1..]`
pub fn from_bls_pubkey(pubkey: &BlsPublicKey) -> B256 {
    let mut credentials: [u8; 32] = Sha256::digest(pubkey.as_slice()).into();
    credentials[0] = BLS_WITHDRAWAL_PREFIX;
    B256::from(credentials)
}

/// `prefix || 0x00 * 11 || address`
pub fn from_address(address: &Address, compounding: bool) -> B256 {
    let mut credentials = [0u8; 32];
    credentials[0] = match compounding {
        true => COMPOUNDING_WITHDRAWAL_PREFIX,
        false => ETH1_ADDRESS_WITHDRAWAL_PREFIX,
    };
    credentials[12..].copy_from_slice(address.as_slice());
    B256::from(credentials)
}

/// Checks the credentials prefix (and padding for address credentials)
pub fn validate(credentials: &B256) -> Result<CredentialsKind, DepositError> {
    let kind = match credentials[0] {
        BLS_WITHDRAWAL_PREFIX => return Ok(CredentialsKind::Bls),
        ETH1_ADDRESS_WITHDRAWAL_PREFIX => CredentialsKind::Execution,
        COMPOUNDING_WITHDRAWAL_PREFIX => CredentialsKind::Compounding,
        prefix => {
            return Err(DepositError::InvalidWithdrawalCredentials(format!(
                "unknown prefix {prefix:#04x}"
            )));
        }
    };
    if credentials[1..12].iter().any(|b| *b != 0) {
        return Err(DepositError::InvalidWithdrawalCredentials(
            "address credentials must be zero padded".to_string(),
        ));
    }
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{FixedBytes, address};

    #[test]
    fn address_credentials() {
        let addr = address!("0x00000000219ab540356cBB839Cbe05303d7705Fa");
        let creds = from_address(&addr, false);
        assert_eq!(creds[0], 0x01);
        assert_eq!(&creds[1..12], &[0u8; 11]);
        assert_eq!(&creds[12..], addr.as_slice());
        assert_eq!(validate(&creds).unwrap(), CredentialsKind::Execution);

        let creds = from_address(&addr, true);
        assert_eq!(creds[0], 0x02);
        assert!(validate(&creds).unwrap().is_compounding());
    }

    #[test]
    fn bls_credentials() {
        let pubkey = FixedBytes::<48>::repeat_byte(0xaa);
        let creds = from_bls_pubkey(&pubkey);
        let digest = Sha256::digest(pubkey.as_slice());
        assert_eq!(creds[0], 0x00);
        assert_eq!(&creds[1..], &digest[1..]);
        assert_eq!(validate(&creds).unwrap(), CredentialsKind::Bls);
    }

    #[test]
    fn rejects_bad_credentials() {
        let mut creds = [0u8; 32];
        creds[0] = 0x05;
        assert!(matches!(
            validate(&B256::from(creds)),
            Err(DepositError::InvalidWithdrawalCredentials(_))
        ));

        creds[0] = 0x01;
        creds[4] = 0xff;
        assert!(validate(&B256::from(creds)).is_err());
    }
}
