#[macro_use]
extern crate log;

use clap::Parser;
use colored::*;
use eyre::{Result, WrapErr, bail};
use std::sync::Arc;

use alloy::primitives::hex;

use eth_depositdata::{
    account::{self, ValidatorAccount},
    config::{self, Cli, CliArgs},
    depositdata::{DepositInput, TreeHashRoots, process, verify::verify_result},
    logger::Logger,
    network, output,
};

fn main() -> Result<()> {
    // Parse args with clap
    let args = Cli::parse();

    // Command line args are merged over the config file
    let config = config::merge_args_from_file::<CliArgs>(args.config, args.config_path)?;

    // Setup our global logger
    let logger = Logger::new(config.log_level());
    logger.set_global()?;

    let params = config.deposit_parameters()?;
    debug!(
        "fork_version: {}, domain: {}, amount: {} gwei",
        hex::encode(params.fork_version).yellow(),
        hex::encode(params.domain).blue(),
        params.amount.to_string().magenta()
    );
    debug!(
        "withdrawal_credentials: {}",
        hex::encode(params.withdrawal_credentials).green()
    );

    match network::deposit_contract(&params.fork_version) {
        Some(contract) => info!("Deposit contract: {}", contract.to_string().cyan()),
        None => warn!(
            "No known deposit contract for fork version {}",
            hex::encode(params.fork_version)
        ),
    }

    if config.keystores.is_empty() {
        bail!("No validator keystores given");
    }
    let password = config.password()?;
    let accounts = account::load_keystores(&config.keystores, &password)?
        .into_iter()
        .map(|account| Arc::new(account) as Arc<dyn ValidatorAccount>)
        .collect::<Vec<_>>();
    info!("Loaded {} validator accounts", accounts.len());

    let input = DepositInput { accounts, params };
    let results =
        process(Some(&input)).wrap_err_with(|| "failed to generate deposit data")?;

    // Self check before anything leaves the process
    for result in results.iter() {
        verify_result(result, input.params.domain, &TreeHashRoots)
            .wrap_err_with(|| format!("deposit for {} failed verification", result.account))?;
    }

    println!("{}", output::render(&results)?);
    Ok(())
}
