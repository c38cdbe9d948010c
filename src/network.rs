use alloy::primitives::{Address, FixedBytes, address};
use eyre::{Result, eyre};
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::depositdata::types::ForkVersion;

#[derive(Debug, Clone)]
pub struct NetworkData {
    pub name: &'static str,
    pub genesis_fork_version: ForkVersion,
    pub deposit_contract: Address,
}

pub static NETWORKS: Lazy<HashMap<&'static str, NetworkData>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for network in [
        NETWORK_MAINNET.clone(),
        NETWORK_HOLESKY.clone(),
        NETWORK_SEPOLIA.clone(),
        NETWORK_HOODI.clone(),
    ] {
        m.insert(network.name, network);
    }
    m
});

static NETWORK_MAINNET: Lazy<NetworkData> = Lazy::new(|| NetworkData {
    name: "mainnet",
    genesis_fork_version: FixedBytes([0x00, 0x00, 0x00, 0x00]),
    deposit_contract: address!("0x00000000219ab540356cBB839Cbe05303d7705Fa"),
});

static NETWORK_HOLESKY: Lazy<NetworkData> = Lazy::new(|| NetworkData {
    name: "holesky",
    genesis_fork_version: FixedBytes([0x01, 0x01, 0x70, 0x00]),
    deposit_contract: address!("0x4242424242424242424242424242424242424242"),
});

static NETWORK_SEPOLIA: Lazy<NetworkData> = Lazy::new(|| NetworkData {
    name: "sepolia",
    genesis_fork_version: FixedBytes([0x90, 0x00, 0x00, 0x69]),
    deposit_contract: address!("0x7f02C3E3c98b133055B8B348B2Ac625669Ed295D"),
});

static NETWORK_HOODI: Lazy<NetworkData> = Lazy::new(|| NetworkData {
    name: "hoodi",
    genesis_fork_version: FixedBytes([0x10, 0x00, 0x09, 0x10]),
    deposit_contract: address!("0x00000000219ab540356cBB839Cbe05303d7705Fa"),
});

pub fn by_name(name: &str) -> Result<&'static NetworkData> {
    NETWORKS
        .get(name.to_lowercase().as_str())
        .ok_or_else(|| eyre!("Unknown network: {}", name))
}

/// Reverse lookup, used to label output with a network name
pub fn by_fork_version(fork_version: &ForkVersion) -> Option<&'static NetworkData> {
    NETWORKS
        .values()
        .find(|network| network.genesis_fork_version == *fork_version)
}

/// Contract the raw calldata has to be sent to, if the fork version is known
pub fn deposit_contract(fork_version: &ForkVersion) -> Option<Address> {
    by_fork_version(fork_version).map(|network| network.deposit_contract)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        assert_eq!(by_name("Mainnet").unwrap().genesis_fork_version, FixedBytes([0; 4]));
        assert!(by_name("goerli").is_err());
        assert_eq!(
            by_fork_version(&FixedBytes([0x10, 0x00, 0x09, 0x10])).unwrap().name,
            "hoodi"
        );
        assert!(by_fork_version(&FixedBytes([0xff; 4])).is_none());
    }

    #[test]
    fn deposit_contracts() {
        assert_eq!(
            deposit_contract(&FixedBytes([0; 4])),
            Some(address!("0x00000000219ab540356cBB839Cbe05303d7705Fa"))
        );
        assert_eq!(
            deposit_contract(&FixedBytes([0x01, 0x01, 0x70, 0x00])),
            Some(address!("0x4242424242424242424242424242424242424242"))
        );
        assert_eq!(deposit_contract(&FixedBytes([0xff; 4])), None);
    }
}
