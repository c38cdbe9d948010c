use alloy::primitives::B256;
use serde_derive::{Deserialize, Serialize};

use super::{
    credentials,
    domain::compute_deposit_domain,
    types::{Domain, ForkVersion},
};
use crate::error::DepositError;

pub const GWEI_PER_ETH: u64 = 1_000_000_000;
pub const MIN_DEPOSIT_AMOUNT: u64 = GWEI_PER_ETH;
pub const MAX_EFFECTIVE_BALANCE: u64 = 32 * GWEI_PER_ETH;
pub const MAX_EFFECTIVE_BALANCE_ELECTRA: u64 = 2048 * GWEI_PER_ETH;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Raw,
    Launchpad,
}

/// Parameters shared by every account of a batch
#[derive(Debug, Clone, PartialEq)]
pub struct DepositParameters {
    pub withdrawal_credentials: B256,
    /// Gwei
    pub amount: u64,
    pub domain: Domain,
    pub fork_version: ForkVersion,
    pub format: OutputFormat,
}

impl DepositParameters {
    /// Validates credentials and amount, derives the deposit domain from
    /// `fork_version`.
    pub fn new(
        withdrawal_credentials: B256,
        amount: u64,
        fork_version: ForkVersion,
        format: OutputFormat,
    ) -> Result<Self, DepositError> {
        let kind = credentials::validate(&withdrawal_credentials)?;
        let max = match kind.is_compounding() {
            true => MAX_EFFECTIVE_BALANCE_ELECTRA,
            false => MAX_EFFECTIVE_BALANCE,
        };
        if amount < MIN_DEPOSIT_AMOUNT {
            return Err(DepositError::InvalidAmount(format!(
                "{amount} gwei is below the minimum of {MIN_DEPOSIT_AMOUNT} gwei"
            )));
        }
        if amount > max {
            return Err(DepositError::InvalidAmount(format!(
                "{amount} gwei exceeds the maximum of {max} gwei for {kind:?} credentials"
            )));
        }
        Ok(DepositParameters {
            withdrawal_credentials,
            amount,
            domain: compute_deposit_domain(fork_version),
            fork_version,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{FixedBytes, address};

    fn creds(compounding: bool) -> B256 {
        credentials::from_address(
            &address!("0x000000000000000000000000000000000000dEaD"),
            compounding,
        )
    }

    #[test]
    fn derives_deposit_domain() {
        let params = DepositParameters::new(
            creds(false),
            32 * GWEI_PER_ETH,
            FixedBytes([0, 0, 0, 0]),
            OutputFormat::Json,
        )
        .unwrap();
        assert_eq!(params.domain, compute_deposit_domain(FixedBytes([0, 0, 0, 0])));
    }

    #[test]
    fn amount_bounds() {
        let fork = FixedBytes([0, 0, 0, 0]);
        assert!(matches!(
            DepositParameters::new(creds(false), GWEI_PER_ETH - 1, fork, OutputFormat::Json),
            Err(DepositError::InvalidAmount(_))
        ));
        assert!(
            DepositParameters::new(creds(false), 33 * GWEI_PER_ETH, fork, OutputFormat::Json)
                .is_err()
        );
        assert!(
            DepositParameters::new(creds(true), 33 * GWEI_PER_ETH, fork, OutputFormat::Json)
                .is_ok()
        );
        assert!(
            DepositParameters::new(creds(true), 2049 * GWEI_PER_ETH, fork, OutputFormat::Raw)
                .is_err()
        );
    }
}
