use std::{fs, path::Path};

use alloy_primitives::{Address, I256, U256};
use anyhow::{anyhow, bail, Context, Result};
use call_encoder::{
    build_transaction, decode, encode, multisend, presets, Error, FunctionSignature, Operation,
    TransactionDescription, TypedValue,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::{
    parsing, ApproveCmd, BatchConfig, CallCmd, Command, DecodeCmd, SupplyBatchCmd, SupplyCmd,
    WrapCmd,
};

/// Executes the configured command and returns the JSON to print.
pub fn run(config: &BatchConfig) -> Result<Value> {
    let transaction = match &config.command {
        Command::Supply(cmd) => supply(cmd, config)?,
        Command::Approve(cmd) => approve(cmd)?,
        Command::Wrap(cmd) => wrap(cmd, config)?,
        Command::Call(cmd) => call(cmd)?,
        Command::SupplyBatch(cmd) => supply_batch(cmd, config)?,
        Command::Decode(cmd) => return decode_call(cmd),
    };

    info!(
        target = %transaction.target,
        value = %transaction.value,
        operation = ?transaction.operation,
        data_length = transaction.data.len(),
        "Transaction ready"
    );
    Ok(transaction.to_batch_entry(config.safe_address))
}

fn supply(cmd: &SupplyCmd, config: &BatchConfig) -> Result<TransactionDescription> {
    let on_behalf_of = beneficiary(cmd.on_behalf_of, config.safe_address)?;
    let call =
        presets::lending_pool::supply(cmd.asset, cmd.amount, on_behalf_of, cmd.referral_code)?;
    warn_on_unexpected_value(
        &presets::lending_pool::supply_signature(),
        cmd.transaction.value,
    );
    Ok(build_transaction(
        config.contracts.lending_pool,
        cmd.transaction.value,
        call,
        cmd.transaction.operation,
    )?)
}

fn approve(cmd: &ApproveCmd) -> Result<TransactionDescription> {
    let call = presets::erc20::approve(cmd.spender, cmd.amount.unwrap_or(U256::MAX))?;
    warn_on_unexpected_value(&presets::erc20::approve_signature(), cmd.transaction.value);
    Ok(build_transaction(
        cmd.token,
        cmd.transaction.value,
        call,
        cmd.transaction.operation,
    )?)
}

fn wrap(cmd: &WrapCmd, config: &BatchConfig) -> Result<TransactionDescription> {
    if cmd.amount.bit_len() >= 256 {
        bail!("Amount {} cannot be sent as a native value", cmd.amount);
    }
    Ok(build_transaction(
        config.contracts.weth,
        I256::from_raw(cmd.amount),
        presets::weth::deposit()?,
        Operation::Call.into(),
    )?)
}

fn call(cmd: &CallCmd) -> Result<TransactionDescription> {
    let signature = load_signature(&cmd.signature, cmd.abi.as_deref())?;
    let params = signature.params();
    if params.len() != cmd.args.len() {
        return Err(Error::Arity {
            expected: params.len(),
            actual: cmd.args.len(),
        }
        .into());
    }

    let args = params
        .iter()
        .zip(&cmd.args)
        .enumerate()
        .map(|(index, (param, raw))| {
            parsing::parse_argument(&param.kind, raw)
                .with_context(|| format!("Argument {index} (`{} {}`)", param.kind, param.name))
        })
        .collect::<Result<Vec<TypedValue>>>()?;

    let call = encode(&signature, &args)?;
    warn_on_unexpected_value(&signature, cmd.transaction.value);
    Ok(build_transaction(
        cmd.target,
        cmd.transaction.value,
        call,
        cmd.transaction.operation,
    )?)
}

fn supply_batch(cmd: &SupplyBatchCmd, config: &BatchConfig) -> Result<TransactionDescription> {
    let on_behalf_of = beneficiary(cmd.on_behalf_of, config.safe_address)?;
    let pool = config.contracts.lending_pool;

    let approve = build_transaction(
        cmd.asset,
        I256::ZERO,
        presets::erc20::approve(pool, cmd.amount)?,
        Operation::Call.into(),
    )?;
    let supply = build_transaction(
        pool,
        I256::ZERO,
        presets::lending_pool::supply(cmd.asset, cmd.amount, on_behalf_of, cmd.referral_code)?,
        Operation::Call.into(),
    )?;

    Ok(multisend::batch(
        config.contracts.multisend,
        &[approve, supply],
    )?)
}

fn decode_call(cmd: &DecodeCmd) -> Result<Value> {
    let signature = load_signature(&cmd.signature, cmd.abi.as_deref())?;
    let data = parsing::parse_hex_bytes(&cmd.data)?;
    let values = decode(&signature, &data)?;

    let arguments = signature
        .params()
        .iter()
        .zip(values)
        .map(|(param, value)| {
            json!({
                "name": param.name,
                "type": param.kind.to_string(),
                "value": value.to_json(),
            })
        })
        .collect::<Vec<_>>();

    Ok(json!({
        "function": signature.canonical(),
        "arguments": arguments,
    }))
}

fn load_signature(signature: &str, abi: Option<&Path>) -> Result<FunctionSignature> {
    match abi {
        Some(path) => {
            let abi = fs::read_to_string(path)
                .with_context(|| format!("Failed to read ABI file {}", path.display()))?;
            Ok(FunctionSignature::from_json_abi(&abi, signature)?)
        }
        None => Ok(FunctionSignature::parse(signature)?),
    }
}

fn beneficiary(on_behalf_of: Option<Address>, safe: Option<Address>) -> Result<Address> {
    on_behalf_of.or(safe).ok_or_else(|| {
        anyhow!("No beneficiary: pass `--on-behalf-of` or configure the Safe address")
    })
}

fn warn_on_unexpected_value(signature: &FunctionSignature, value: I256) {
    if value.is_positive() && !signature.accepts_value() {
        warn!(
            function = %signature.canonical(),
            %value,
            "Native value attached to a non-payable function, the call will revert"
        );
    }
}
