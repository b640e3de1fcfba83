use std::path::PathBuf;

use alloy_primitives::{Address, I256, U256};
use clap::{Args, Parser, Subcommand};

use crate::config::{defaults::*, enums::LoggingFormat, environment_variables::*};

/// Prints a Safe transaction batch entry `[safe?, to, value, data, operation]` as JSON.
///
/// Global options are optional: each of them falls back to an environment variable and, where
/// sensible, to a default value.
#[derive(Clone, Eq, PartialEq, Debug, Parser)]
#[clap(name = "safe-batch", version)]
pub struct CliConfig {
    #[clap(
        long,
        global = true,
        value_enum,
        help = "Logging format configuration.",
        long_help = format!("Logging format configuration. If not provided, the value from the \
            environment variable `{LOGGING_FORMAT_ENV}` will be used. If that is not set, the \
            default value is `{DEFAULT_LOGGING_FORMAT:?}`.")
    )]
    pub logging_format: Option<LoggingFormat>,

    #[clap(
        long,
        global = true,
        help = "Address of the Safe executing the transaction.",
        long_help = format!("Address of the Safe executing the transaction. It is prepended to \
            the printed entry and used as the default beneficiary of supplied assets. If not \
            provided, the value from the environment variable `{SAFE_ADDRESS_ENV}` will be used. \
            If that is not set, the entry has no Safe column.")
    )]
    pub safe_address: Option<Address>,

    #[clap(
        long = "pool",
        global = true,
        help = "Address of the lending pool.",
        long_help = format!("Address of the lending pool. If not provided, the value from the \
            environment variable `{LENDING_POOL_ADDRESS_ENV}` will be used. If that is not set, \
            the default value is `{DEFAULT_LENDING_POOL_ADDRESS}`.")
    )]
    pub lending_pool_address: Option<Address>,

    #[clap(
        long = "weth",
        global = true,
        help = "Address of the WETH contract.",
        long_help = format!("Address of the WETH contract. If not provided, the value from the \
            environment variable `{WETH_ADDRESS_ENV}` will be used. If that is not set, the \
            default value is `{DEFAULT_WETH_ADDRESS}`.")
    )]
    pub weth_address: Option<Address>,

    #[clap(
        long = "multisend",
        global = true,
        help = "Address of the MultiSend contract used for batches.",
        long_help = format!("Address of the MultiSend contract used for batches. If not provided, \
            the value from the environment variable `{MULTISEND_ADDRESS_ENV}` will be used. If \
            that is not set, the default value is `{DEFAULT_MULTISEND_ADDRESS}`.")
    )]
    pub multisend_address: Option<Address>,

    /// Print the entry on a single line.
    #[clap(long, global = true, default_value = "false")]
    pub compact: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Clone, Eq, PartialEq, Debug, Subcommand)]
pub enum Command {
    /// Supply an asset to the lending pool.
    Supply(SupplyCmd),
    /// Approve a spender to transfer ERC20 tokens held by the Safe.
    Approve(ApproveCmd),
    /// Wrap native currency into WETH.
    Wrap(WrapCmd),
    /// Call an arbitrary function.
    Call(CallCmd),
    /// Approve the pool and supply the asset in one MultiSend transaction.
    SupplyBatch(SupplyBatchCmd),
    /// Decode call data against a function signature.
    Decode(DecodeCmd),
}

/// Transaction fields that are independent from the encoded call.
#[derive(Clone, Eq, PartialEq, Debug, Args)]
pub struct TransactionArgs {
    /// Native value in wei attached to the transaction. It is not derived from any token amount.
    #[clap(
        long,
        default_value = "0",
        allow_hyphen_values = true,
        value_parser = parsing::parse_native_value
    )]
    pub value: I256,

    /// Safe operation, by name (`call`, `delegate-call`) or by numeric code.
    #[clap(long, default_value = "call", value_parser = parsing::parse_operation)]
    pub operation: u8,
}

#[derive(Clone, Eq, PartialEq, Debug, Args)]
pub struct SupplyCmd {
    /// Address of the supplied asset.
    #[clap(long)]
    pub asset: Address,
    /// Amount of the asset in its smallest unit (decimal or `0x` hex).
    #[clap(long, value_parser = parsing::parse_u256)]
    pub amount: U256,
    /// Account credited with the position. Defaults to the Safe address.
    #[clap(long)]
    pub on_behalf_of: Option<Address>,
    #[clap(long, default_value_t = DEFAULT_REFERRAL_CODE)]
    pub referral_code: u16,
    #[clap(flatten)]
    pub transaction: TransactionArgs,
}

#[derive(Clone, Eq, PartialEq, Debug, Args)]
pub struct ApproveCmd {
    /// Address of the ERC20 token.
    #[clap(long)]
    pub token: Address,
    /// Account allowed to spend the tokens.
    #[clap(long)]
    pub spender: Address,
    /// Allowance in the token's smallest unit. Unlimited if not provided.
    #[clap(long, value_parser = parsing::parse_u256)]
    pub amount: Option<U256>,
    #[clap(flatten)]
    pub transaction: TransactionArgs,
}

#[derive(Clone, Eq, PartialEq, Debug, Args)]
pub struct WrapCmd {
    /// Amount of native currency in wei. Sent as the transaction value.
    #[clap(long, value_parser = parsing::parse_u256)]
    pub amount: U256,
}

#[derive(Clone, Eq, PartialEq, Debug, Args)]
pub struct CallCmd {
    /// Address of the called contract.
    #[clap(long)]
    pub target: Address,
    /// Function declaration, e.g. `transfer(address,uint256)`. With `--abi`, just the name.
    #[clap(long)]
    pub signature: String,
    /// JSON ABI file to look the function up in.
    #[clap(long)]
    pub abi: Option<PathBuf>,
    /// Function arguments, in declaration order.
    #[clap(long = "arg", allow_hyphen_values = true)]
    pub args: Vec<String>,
    #[clap(flatten)]
    pub transaction: TransactionArgs,
}

#[derive(Clone, Eq, PartialEq, Debug, Args)]
pub struct SupplyBatchCmd {
    /// Address of the supplied asset.
    #[clap(long)]
    pub asset: Address,
    /// Amount of the asset in its smallest unit. Also used as the allowance.
    #[clap(long, value_parser = parsing::parse_u256)]
    pub amount: U256,
    /// Account credited with the position. Defaults to the Safe address.
    #[clap(long)]
    pub on_behalf_of: Option<Address>,
    #[clap(long, default_value_t = DEFAULT_REFERRAL_CODE)]
    pub referral_code: u16,
}

#[derive(Clone, Eq, PartialEq, Debug, Args)]
pub struct DecodeCmd {
    /// Function declaration, e.g. `transfer(address,uint256)`. With `--abi`, just the name.
    #[clap(long)]
    pub signature: String,
    /// JSON ABI file to look the function up in.
    #[clap(long)]
    pub abi: Option<PathBuf>,
    /// Call data as `0x`-prefixed hex.
    #[clap(long)]
    pub data: String,
}

pub mod parsing {
    use std::str::FromStr;

    use alloy_primitives::{hex, Address, I256, U256};
    use anyhow::{anyhow, bail, Result};
    use call_encoder::{AbiType, Operation, TypedValue};

    fn strip_separators(string: &str) -> String {
        string.trim().replace('_', "")
    }

    /// Decimal or `0x`-prefixed hexadecimal.
    pub fn parse_u256(string: &str) -> Result<U256> {
        U256::from_str(&strip_separators(string))
            .map_err(|e| anyhow!("Invalid unsigned integer `{string}`: {e}"))
    }

    /// Signed decimal. Negative values are let through, the transaction builder rejects them.
    pub fn parse_native_value(string: &str) -> Result<I256> {
        I256::from_dec_str(&strip_separators(string))
            .map_err(|e| anyhow!("Invalid native value `{string}`: {e}"))
    }

    pub fn parse_operation(string: &str) -> Result<u8> {
        match string.to_lowercase().as_str() {
            "call" => Ok(Operation::Call.into()),
            "delegate-call" | "delegatecall" => Ok(Operation::DelegateCall.into()),
            code => code
                .parse::<u8>()
                .map_err(|_| anyhow!("Unknown operation `{string}`")),
        }
    }

    pub fn parse_hex_bytes(string: &str) -> Result<Vec<u8>> {
        let Some(digits) = string.trim().strip_prefix("0x") else {
            bail!("Expected `0x`-prefixed hex, got `{string}`");
        };
        hex::decode(digits).map_err(|e| anyhow!("Invalid hex `{string}`: {e}"))
    }

    /// Interprets a raw command line argument as a value of the declared parameter type.
    ///
    /// Integers are tagged with the declared width without a range check, so that out of range
    /// values are reported by the encoder together with the argument position.
    pub fn parse_argument(kind: &AbiType, raw: &str) -> Result<TypedValue> {
        Ok(match kind {
            AbiType::Address => TypedValue::Address(
                Address::from_str(raw.trim()).map_err(|e| anyhow!("Invalid address `{raw}`: {e}"))?,
            ),
            AbiType::Uint(bits) => TypedValue::uint(*bits, parse_u256(raw)?),
            AbiType::Bool => match raw.trim() {
                "true" => TypedValue::Bool(true),
                "false" => TypedValue::Bool(false),
                _ => bail!("Invalid boolean `{raw}`, expected `true` or `false`"),
            },
            AbiType::Bytes => TypedValue::Bytes(parse_hex_bytes(raw)?),
            AbiType::String => TypedValue::String(raw.to_string()),
        })
    }
}
