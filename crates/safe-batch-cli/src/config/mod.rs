use std::str::FromStr;

use alloy_primitives::Address;
use anyhow::{anyhow, Result};
use clap::Parser;
pub use cli::{
    parsing, ApproveCmd, CallCmd, CliConfig, Command, DecodeCmd, SupplyBatchCmd, SupplyCmd,
    TransactionArgs, WrapCmd,
};
use defaults::{
    DEFAULT_LENDING_POOL_ADDRESS, DEFAULT_LOGGING_FORMAT, DEFAULT_MULTISEND_ADDRESS,
    DEFAULT_WETH_ADDRESS,
};
pub use enums::LoggingFormat;
use environment_variables::{
    LENDING_POOL_ADDRESS_ENV, LOGGING_FORMAT_ENV, MULTISEND_ADDRESS_ENV, SAFE_ADDRESS_ENV,
    WETH_ADDRESS_ENV,
};

mod cli;
mod defaults;
mod enums;
mod environment_variables;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ContractsConfig {
    pub lending_pool: Address,
    pub weth: Address,
    pub multisend: Address,
}

/// Resolved configuration of the tool. Order of precedence is:
/// 1. Command line arguments (`CliConfig`).
/// 2. Environment variables.
/// 3. Default values (not available for the Safe address).
///
/// For field documentation, see their counterparts in `CliConfig`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct BatchConfig {
    pub logging_format: LoggingFormat,
    pub safe_address: Option<Address>,
    pub contracts: ContractsConfig,
    pub compact: bool,
    pub command: Command,
}

/// Resolves the configuration using the command line arguments, the process environment and
/// default values.
pub fn resolve_config() -> Result<BatchConfig> {
    resolve_config_from_cli_config(CliConfig::parse(), |key| std::env::var(key).ok())
}

fn resolve_config_from_cli_config(
    CliConfig {
        logging_format,
        safe_address,
        lending_pool_address,
        weth_address,
        multisend_address,
        compact,
        command,
    }: CliConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<BatchConfig> {
    let contracts = ContractsConfig {
        lending_pool: resolve_value(lending_pool_address, LENDING_POOL_ADDRESS_ENV, &env)?
            .unwrap_or(DEFAULT_LENDING_POOL_ADDRESS),
        weth: resolve_value(weth_address, WETH_ADDRESS_ENV, &env)?.unwrap_or(DEFAULT_WETH_ADDRESS),
        multisend: resolve_value(multisend_address, MULTISEND_ADDRESS_ENV, &env)?
            .unwrap_or(DEFAULT_MULTISEND_ADDRESS),
    };

    Ok(BatchConfig {
        logging_format: resolve_value(logging_format, LOGGING_FORMAT_ENV, &env)?
            .unwrap_or(DEFAULT_LOGGING_FORMAT),
        safe_address: resolve_value(safe_address, SAFE_ADDRESS_ENV, &env)?,
        contracts,
        compact,
        command,
    })
}

/// Takes `value` if present, otherwise reads `env_var`. An environment variable that is set but
/// cannot be parsed is an error rather than a silent fallback to the default.
fn resolve_value<T: FromStr>(
    value: Option<T>,
    env_var: &str,
    env: &impl Fn(&str) -> Option<String>,
) -> Result<Option<T>> {
    if value.is_some() {
        return Ok(value);
    }
    env(env_var)
        .map(|raw| {
            T::from_str(&raw).map_err(|_| anyhow!("Invalid value of `{env_var}`: `{raw}`"))
        })
        .transpose()
}
