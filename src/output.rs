use eyre::Result;
use serde_derive::Serialize;

use alloy::{
    primitives::{Bytes, hex},
    sol_types::SolCall,
};

use crate::{
    depositdata::{DepositResult, OutputFormat},
    network,
};

// https://github.com/ethereum/consensus-specs/blob/dev/solidity_deposit_contract/deposit_contract.sol
alloy::sol! {
    interface IDepositContract {
        /// @notice Submit a Phase 0 DepositData object.
        function deposit(
            bytes calldata pubkey,
            bytes calldata withdrawal_credentials,
            bytes calldata signature,
            bytes32 deposit_data_root
        ) external payable;
    }
}

/// Version reported to the staking launchpad, which rejects unknown versions
const LAUNCHPAD_DEPOSIT_CLI_VERSION: &str = "2.7.0";

#[derive(Debug, Serialize)]
struct LaunchpadDeposit {
    pubkey: String,
    withdrawal_credentials: String,
    amount: u64,
    signature: String,
    deposit_message_root: String,
    deposit_data_root: String,
    fork_version: String,
    network_name: String,
    deposit_cli_version: &'static str,
}

impl From<&DepositResult> for LaunchpadDeposit {
    fn from(result: &DepositResult) -> Self {
        LaunchpadDeposit {
            pubkey: hex::encode(result.pubkey),
            withdrawal_credentials: hex::encode(result.withdrawal_credentials),
            amount: result.amount,
            signature: hex::encode(result.signature),
            deposit_message_root: hex::encode(result.deposit_message_root),
            deposit_data_root: hex::encode(result.deposit_data_root),
            fork_version: hex::encode(result.fork_version),
            network_name: network::by_fork_version(&result.fork_version)
                .map(|network| network.name)
                .unwrap_or("unknown")
                .to_string(),
            deposit_cli_version: LAUNCHPAD_DEPOSIT_CLI_VERSION,
        }
    }
}

/// Deposit contract calldata for `result`
pub fn deposit_calldata(result: &DepositResult) -> Bytes {
    IDepositContract::depositCall {
        pubkey: Bytes::copy_from_slice(result.pubkey.as_slice()),
        withdrawal_credentials: Bytes::copy_from_slice(result.withdrawal_credentials.as_slice()),
        signature: Bytes::copy_from_slice(result.signature.as_slice()),
        deposit_data_root: result.deposit_data_root,
    }
    .abi_encode()
    .into()
}

/// Render a batch in the format the batch was generated for
pub fn render(results: &[DepositResult]) -> Result<String> {
    let format = results.first().map(|r| r.format).unwrap_or_default();
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(results)?,
        OutputFormat::Launchpad => serde_json::to_string(
            &results
                .iter()
                .map(LaunchpadDeposit::from)
                .collect::<Vec<_>>(),
        )?,
        OutputFormat::Raw => results
            .iter()
            .map(|result| deposit_calldata(result).to_string())
            .collect::<Vec<_>>()
            .join("\n"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{B256, FixedBytes};

    fn result(format: OutputFormat) -> DepositResult {
        DepositResult {
            format,
            account: "Validators/1".to_string(),
            pubkey: FixedBytes::<48>::repeat_byte(0xaa),
            withdrawal_credentials: B256::repeat_byte(0x01),
            amount: 32_000_000_000,
            signature: FixedBytes::<96>::repeat_byte(0xbb),
            fork_version: FixedBytes([0x01, 0x01, 0x70, 0x00]),
            deposit_message_root: B256::repeat_byte(0x03),
            deposit_data_root: B256::repeat_byte(0x04),
        }
    }

    #[test]
    fn launchpad_format() {
        let out = render(&[result(OutputFormat::Launchpad)]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        let deposit = &json[0];
        assert_eq!(deposit["pubkey"], "aa".repeat(48));
        assert_eq!(deposit["amount"], 32_000_000_000u64);
        assert_eq!(deposit["fork_version"], "01017000");
        assert_eq!(deposit["network_name"], "holesky");
        assert_eq!(deposit["deposit_cli_version"], "2.7.0");
    }

    #[test]
    fn raw_format_is_deposit_calldata() {
        let out = render(&[result(OutputFormat::Raw), result(OutputFormat::Raw)]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        // deposit(bytes,bytes,bytes,bytes32)
        assert!(lines[0].starts_with("0x22895118"));
        let calldata = deposit_calldata(&result(OutputFormat::Raw));
        let decoded = IDepositContract::depositCall::abi_decode(&calldata).unwrap();
        assert_eq!(decoded.deposit_data_root, B256::repeat_byte(0x04));
        assert_eq!(decoded.pubkey.as_ref(), &[0xaa; 48]);
    }

    #[test]
    fn json_format() {
        let out = render(&[result(OutputFormat::Json)]).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json[0]["account"], "Validators/1");
        assert_eq!(render(&[]).unwrap(), "[]");
    }
}
