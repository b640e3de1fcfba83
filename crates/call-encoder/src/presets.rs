//! Signatures and typed call constructors of the contracts a Safe usually talks to when managing
//! a lending position: the lending pool itself, the ERC20 token being supplied and WETH.

pub mod lending_pool {
    use alloy_primitives::{Address, U256};

    use crate::{
        encode, AbiType, EncodedCall, FunctionSignature, Param, Result, StateMutability,
        TypedValue,
    };

    /// `supply(address asset, uint256 amount, address onBehalfOf, uint16 referralCode)`
    pub fn supply_signature() -> FunctionSignature {
        FunctionSignature::new(
            "supply",
            vec![
                Param::new("asset", AbiType::Address),
                Param::new("amount", AbiType::Uint(256)),
                Param::new("onBehalfOf", AbiType::Address),
                Param::new("referralCode", AbiType::Uint(16)),
            ],
            StateMutability::NonPayable,
        )
    }

    /// `withdraw(address asset, uint256 amount, address to) returns (uint256)`
    pub fn withdraw_signature() -> FunctionSignature {
        FunctionSignature::new(
            "withdraw",
            vec![
                Param::new("asset", AbiType::Address),
                Param::new("amount", AbiType::Uint(256)),
                Param::new("to", AbiType::Address),
            ],
            StateMutability::NonPayable,
        )
    }

    /// `borrow(address asset, uint256 amount, uint256 interestRateMode, uint16 referralCode,
    /// address onBehalfOf)`
    pub fn borrow_signature() -> FunctionSignature {
        FunctionSignature::new(
            "borrow",
            vec![
                Param::new("asset", AbiType::Address),
                Param::new("amount", AbiType::Uint(256)),
                Param::new("interestRateMode", AbiType::Uint(256)),
                Param::new("referralCode", AbiType::Uint(16)),
                Param::new("onBehalfOf", AbiType::Address),
            ],
            StateMutability::NonPayable,
        )
    }

    /// `repay(address asset, uint256 amount, uint256 interestRateMode, address onBehalfOf)
    /// returns (uint256)`
    pub fn repay_signature() -> FunctionSignature {
        FunctionSignature::new(
            "repay",
            vec![
                Param::new("asset", AbiType::Address),
                Param::new("amount", AbiType::Uint(256)),
                Param::new("interestRateMode", AbiType::Uint(256)),
                Param::new("onBehalfOf", AbiType::Address),
            ],
            StateMutability::NonPayable,
        )
    }

    pub fn supply(
        asset: Address,
        amount: U256,
        on_behalf_of: Address,
        referral_code: u16,
    ) -> Result<EncodedCall> {
        encode(
            &supply_signature(),
            &[
                TypedValue::Address(asset),
                TypedValue::uint256(amount),
                TypedValue::Address(on_behalf_of),
                TypedValue::uint(16, U256::from(referral_code)),
            ],
        )
    }

    pub fn withdraw(asset: Address, amount: U256, to: Address) -> Result<EncodedCall> {
        encode(
            &withdraw_signature(),
            &[
                TypedValue::Address(asset),
                TypedValue::uint256(amount),
                TypedValue::Address(to),
            ],
        )
    }

    pub fn borrow(
        asset: Address,
        amount: U256,
        interest_rate_mode: U256,
        referral_code: u16,
        on_behalf_of: Address,
    ) -> Result<EncodedCall> {
        encode(
            &borrow_signature(),
            &[
                TypedValue::Address(asset),
                TypedValue::uint256(amount),
                TypedValue::uint256(interest_rate_mode),
                TypedValue::uint(16, U256::from(referral_code)),
                TypedValue::Address(on_behalf_of),
            ],
        )
    }

    pub fn repay(
        asset: Address,
        amount: U256,
        interest_rate_mode: U256,
        on_behalf_of: Address,
    ) -> Result<EncodedCall> {
        encode(
            &repay_signature(),
            &[
                TypedValue::Address(asset),
                TypedValue::uint256(amount),
                TypedValue::uint256(interest_rate_mode),
                TypedValue::Address(on_behalf_of),
            ],
        )
    }
}

pub mod erc20 {
    use alloy_primitives::{Address, U256};

    use crate::{
        encode, AbiType, EncodedCall, FunctionSignature, Param, Result, StateMutability,
        TypedValue,
    };

    /// `approve(address spender, uint256 amount) returns (bool)`
    pub fn approve_signature() -> FunctionSignature {
        FunctionSignature::new(
            "approve",
            vec![
                Param::new("spender", AbiType::Address),
                Param::new("amount", AbiType::Uint(256)),
            ],
            StateMutability::NonPayable,
        )
    }

    /// `transfer(address recipient, uint256 amount) returns (bool)`
    pub fn transfer_signature() -> FunctionSignature {
        FunctionSignature::new(
            "transfer",
            vec![
                Param::new("recipient", AbiType::Address),
                Param::new("amount", AbiType::Uint(256)),
            ],
            StateMutability::NonPayable,
        )
    }

    /// Pass `U256::MAX` for an unlimited allowance.
    pub fn approve(spender: Address, amount: U256) -> Result<EncodedCall> {
        encode(
            &approve_signature(),
            &[TypedValue::Address(spender), TypedValue::uint256(amount)],
        )
    }

    pub fn transfer(recipient: Address, amount: U256) -> Result<EncodedCall> {
        encode(
            &transfer_signature(),
            &[TypedValue::Address(recipient), TypedValue::uint256(amount)],
        )
    }
}

pub mod weth {
    use crate::{encode, EncodedCall, FunctionSignature, Result, StateMutability};

    /// `deposit() payable` - wraps the attached native value.
    pub fn deposit_signature() -> FunctionSignature {
        FunctionSignature::new("deposit", vec![], StateMutability::Payable)
    }

    pub fn deposit() -> Result<EncodedCall> {
        encode(&deposit_signature(), &[])
    }
}
