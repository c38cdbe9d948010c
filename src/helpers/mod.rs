pub mod datetime;

use alloy::primitives::{
    FixedBytes, hex,
    utils::{Unit, parse_units},
};
use eyre::{Result, WrapErr, bail, eyre};

/// Parse a `0x` prefixed (or bare) hex string into fixed size bytes
pub fn parse_fixed_bytes<const N: usize>(s: &str) -> Result<FixedBytes<N>> {
    let bytes = hex::decode(s.trim()).wrap_err_with(|| format!("invalid hex: {s}"))?;
    let bytes: [u8; N] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| eyre!("expected {} bytes, got {}: {}", N, bytes.len(), s))?;
    Ok(FixedBytes(bytes))
}

/// Fractional eth amount to gwei, must be a whole number of gwei
pub fn eth_to_gwei(amount: f64) -> Result<u64> {
    if !amount.is_finite() || amount.is_sign_negative() {
        bail!("amount must be a positive number of ether: {amount}");
    }
    let wei = parse_units(&amount.to_string(), "ether")?.get_absolute();
    if !(wei % Unit::GWEI.wei()).is_zero() {
        bail!("amount has sub-gwei precision: {amount}");
    }
    let gwei = wei / Unit::GWEI.wei();
    u64::try_from(gwei).map_err(|_| eyre!("amount too large: {amount}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_bytes_parsing() {
        let fv: FixedBytes<4> = parse_fixed_bytes("0x01017000").unwrap();
        assert_eq!(fv, FixedBytes([0x01, 0x01, 0x70, 0x00]));
        let fv: FixedBytes<4> = parse_fixed_bytes("90000069").unwrap();
        assert_eq!(fv, FixedBytes([0x90, 0x00, 0x00, 0x69]));
        assert!(parse_fixed_bytes::<4>("0x010170").is_err());
        assert!(parse_fixed_bytes::<4>("0xzz").is_err());
    }

    #[test]
    fn eth_conversion() {
        assert_eq!(eth_to_gwei(32.0).unwrap(), 32_000_000_000);
        assert_eq!(eth_to_gwei(1.5).unwrap(), 1_500_000_000);
        assert_eq!(eth_to_gwei(1.000000001).unwrap(), 1_000_000_001);
    }

    #[test]
    fn eth_conversion_rejects_sub_gwei() {
        let err = eth_to_gwei(1.0000000009).unwrap_err().to_string();
        assert!(err.contains("sub-gwei"), "{err}");
    }

    #[test]
    fn eth_conversion_rejects_negative() {
        let err = eth_to_gwei(-32.0).unwrap_err().to_string();
        assert!(err.contains("positive"), "{err}");
        assert!(!err.contains("too large"), "{err}");
        assert!(eth_to_gwei(f64::NAN).is_err());
        assert!(eth_to_gwei(f64::INFINITY).is_err());
    }
}
