use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::{fs::File, io::BufReader};

use alloy::primitives::Address;
use eyre::{Result, WrapErr, bail};
use serde_derive::Deserialize;

use clap_serde_derive::{
    ClapSerde,
    clap::{self, Parser},
};

use crate::{
    depositdata::{DepositParameters, OutputFormat, credentials, params::GWEI_PER_ETH},
    helpers, network,
};

pub const DEFAULT_LOG_LEVEL: u8 = 3;
pub const DEFAULT_NETWORK: &str = "mainnet";

fn config_file() -> PathBuf {
    let config_home = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .unwrap_or_else(|| PathBuf::from(OsString::from(".")));
    config_home.join("eth-depositdata").join("config.toml")
}

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Config file
    #[arg(short, long = "config", default_value = config_file().into_os_string())]
    pub config_path: Option<PathBuf>,

    /// Deposit arguments
    #[command(flatten)]
    pub config: <CliArgs as ClapSerde>::Opt,
}

// All values are optional so a partial config file still parses, defaults
// are applied once the file and command line are merged
#[derive(Debug, Clone, ClapSerde, Deserialize)]
pub struct CliArgs {
    /// Logging level (0-5)
    #[arg(short, long = "log-level", required = false)]
    pub log_level: Option<u8>,

    /// Network name, selects the genesis fork version
    #[arg(short, long, required = false)]
    pub network: Option<String>,

    /// Genesis fork version, overrides --network
    #[arg(long = "fork-version", required = false)]
    pub fork_version: Option<String>,

    /// Execution address to withdraw to
    #[arg(long = "withdrawal-address", required = false)]
    pub withdrawal_address: Option<String>,

    /// Raw 32 byte withdrawal credentials
    #[arg(long = "withdrawal-credentials", required = false)]
    pub withdrawal_credentials: Option<String>,

    /// Use 0x02 (compounding) credentials for --withdrawal-address
    #[arg(long, required = false)]
    pub compounding: Option<bool>,

    /// Deposit amount in eth
    #[arg(short, long, required = false)]
    pub amount: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, required = false)]
    pub format: Option<OutputFormat>,

    /// Validator keystore files or directories
    #[arg(short, long = "keystore", required = false)]
    pub keystores: Vec<PathBuf>,

    /// Keystore password
    #[arg(short, long, required = false, visible_aliases = &["pass"])]
    pub password: Option<String>,

    /// File containing the keystore password
    #[arg(long = "password-file", required = false)]
    pub password_file: Option<PathBuf>,
}

impl CliArgs {
    pub fn log_level(&self) -> u8 {
        self.log_level.unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn withdrawal_credentials(&self) -> Result<alloy::primitives::B256> {
        match (&self.withdrawal_credentials, &self.withdrawal_address) {
            (Some(_), Some(_)) => {
                bail!("Only one of withdrawal credentials or withdrawal address may be set")
            }
            (Some(creds), None) => helpers::parse_fixed_bytes::<32>(creds)
                .wrap_err_with(|| "withdrawal credentials parsing failed"),
            (None, Some(address)) => {
                let address = address
                    .trim()
                    .parse::<Address>()
                    .wrap_err_with(|| format!("invalid withdrawal address: {address}"))?;
                Ok(credentials::from_address(
                    &address,
                    self.compounding.unwrap_or(false),
                ))
            }
            (None, None) => bail!("Withdrawal credentials or withdrawal address required"),
        }
    }

    pub fn fork_version(&self) -> Result<crate::depositdata::types::ForkVersion> {
        match &self.fork_version {
            Some(fork_version) => helpers::parse_fixed_bytes::<4>(fork_version)
                .wrap_err_with(|| "fork version parsing failed"),
            None => Ok(network::by_name(self.network.as_deref().unwrap_or(DEFAULT_NETWORK))?
                .genesis_fork_version),
        }
    }

    pub fn deposit_parameters(&self) -> Result<DepositParameters> {
        let amount = match self.amount {
            Some(eth) => helpers::eth_to_gwei(eth)?,
            None => 32 * GWEI_PER_ETH,
        };
        Ok(DepositParameters::new(
            self.withdrawal_credentials()?,
            amount,
            self.fork_version()?,
            self.format.unwrap_or_default(),
        )?)
    }

    pub fn password(&self) -> Result<String> {
        match (&self.password, &self.password_file) {
            (Some(password), _) => Ok(password.clone()),
            (None, Some(path)) => {
                let path = shellexpand::full(&path.to_string_lossy())?.to_string();
                Ok(std::fs::read_to_string(&path)
                    .wrap_err_with(|| format!("{:?}", path))?
                    .trim_end_matches(['\r', '\n'])
                    .to_string())
            }
            (None, None) => bail!("Keystore password or password file required"),
        }
    }
}

/// Command line arguments win over values from the config file
pub fn merge_args_from_file<T>(
    args: <T as ClapSerde>::Opt,
    maybe_path: Option<PathBuf>,
) -> Result<T>
where
    T: ClapSerde + serde::de::DeserializeOwned,
{
    match maybe_path {
        Some(path) => {
            let config_path = std::path::Path::new(&path);
            match config_path.exists() {
                true => {
                    let config = match config_path.extension().and_then(OsStr::to_str) {
                        Some("toml") => read_toml_config::<T, _>(config_path),
                        Some("json") => read_json_config::<T, _>(config_path),
                        Some("jsonc") => read_jsonc_config::<T, _>(config_path),
                        _ => {
                            bail!("Unsupported config file type: {:?}", path);
                        }
                    }?;
                    Ok(T::from(config).merge(args))
                }
                false => Ok(T::from(args)),
            }
        }
        None => Ok(T::from(args)),
    }
}

fn read_toml_config<T, P>(path: P) -> Result<<T as ClapSerde>::Opt>
where
    P: AsRef<std::path::Path> + std::fmt::Debug + Copy,
    T: ClapSerde + serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path).wrap_err_with(|| format!("{:?}", path))?;
    Ok(toml::from_str(&content)?)
}

fn read_json_config<T, P>(path: P) -> Result<<T as ClapSerde>::Opt>
where
    P: AsRef<std::path::Path> + std::fmt::Debug + Copy,
    T: ClapSerde,
{
    let f = File::open(path).wrap_err_with(|| format!("{:?}", path))?;
    Ok(serde_json::from_reader::<_, <T as ClapSerde>::Opt>(
        BufReader::new(f),
    )?)
}

fn read_jsonc_config<T, P>(path: P) -> Result<<T as ClapSerde>::Opt>
where
    P: AsRef<std::path::Path> + std::fmt::Debug + Copy,
    T: ClapSerde,
{
    let f = File::open(path).wrap_err_with(|| format!("{:?}", path))?;
    Ok(serde_jsonc::from_reader::<_, <T as ClapSerde>::Opt>(
        BufReader::new(f),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::FixedBytes;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("eth-depositdata").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_from_network() {
        let cli = parse(&[
            "--withdrawal-address",
            "0x000000000000000000000000000000000000dEaD",
        ]);
        let args = CliArgs::from(cli.config);
        let params = args.deposit_parameters().unwrap();
        assert_eq!(params.fork_version, FixedBytes([0, 0, 0, 0]));
        assert_eq!(params.amount, 32_000_000_000);
        assert_eq!(params.format, OutputFormat::Json);
        assert_eq!(params.withdrawal_credentials[0], 0x01);
        assert_eq!(args.log_level(), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn explicit_fork_version_wins() {
        let cli = parse(&[
            "--network",
            "hoodi",
            "--fork-version",
            "0x01017000",
            "--withdrawal-address",
            "0x000000000000000000000000000000000000dEaD",
            "--compounding",
            "true",
            "--amount",
            "64",
            "--format",
            "launchpad",
        ]);
        let params = CliArgs::from(cli.config).deposit_parameters().unwrap();
        assert_eq!(params.fork_version, FixedBytes([0x01, 0x01, 0x70, 0x00]));
        assert_eq!(params.withdrawal_credentials[0], 0x02);
        assert_eq!(params.amount, 64_000_000_000);
        assert_eq!(params.format, OutputFormat::Launchpad);
    }

    #[test]
    fn credentials_are_exclusive() {
        let cli = parse(&[
            "--withdrawal-address",
            "0x000000000000000000000000000000000000dEaD",
            "--withdrawal-credentials",
            "0x0100000000000000000000000000000000000000000000000000000000000000",
        ]);
        assert!(CliArgs::from(cli.config).deposit_parameters().is_err());
        let cli = parse(&[]);
        assert!(CliArgs::from(cli.config).deposit_parameters().is_err());
    }

    #[test]
    fn command_line_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            network = "holesky"
            log_level = 5
            withdrawal_address = "0x000000000000000000000000000000000000dEaD"
            "#,
        )
        .unwrap();
        let cli = parse(&["--network", "sepolia"]);
        let args = merge_args_from_file::<CliArgs>(cli.config, Some(path)).unwrap();
        assert_eq!(args.network.as_deref(), Some("sepolia"));
        assert_eq!(args.log_level(), 5);
        assert_eq!(
            args.deposit_parameters().unwrap().fork_version,
            FixedBytes([0x90, 0x00, 0x00, 0x69])
        );
    }

    #[test]
    fn unsupported_config_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "").unwrap();
        let cli = parse(&[]);
        assert!(merge_args_from_file::<CliArgs>(cli.config, Some(path)).is_err());
    }

    #[test]
    fn password_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pw");
        std::fs::write(&path, "hunter2\n").unwrap();
        let cli = parse(&["--password-file", path.to_str().unwrap()]);
        assert_eq!(CliArgs::from(cli.config).password().unwrap(), "hunter2");
    }
}
