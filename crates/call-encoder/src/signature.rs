use core::fmt;
use std::str::FromStr;

use alloy_json_abi::{Function, JsonAbi};
pub use alloy_json_abi::StateMutability;

use crate::{encoding::SELECTOR_LENGTH, AbiType, Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Param {
    /// Parameter name. Empty for unnamed parameters; it never takes part in encoding.
    pub name: String,
    pub kind: AbiType,
}

impl Param {
    pub fn new(name: impl Into<String>, kind: AbiType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Name and ordered parameter list of a contract function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSignature {
    name: String,
    params: Vec<Param>,
    mutability: StateMutability,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>, params: Vec<Param>, mutability: StateMutability) -> Self {
        Self {
            name: name.into(),
            params,
            mutability,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn mutability(&self) -> StateMutability {
        self.mutability
    }

    /// Only payable functions may receive native value together with the call.
    pub fn accepts_value(&self) -> bool {
        self.mutability == StateMutability::Payable
    }

    /// ABI item describing this function. Outputs are never tracked and stay empty.
    pub fn to_function(&self) -> Function {
        Function {
            name: self.name.clone(),
            inputs: self
                .params
                .iter()
                .map(|param| alloy_json_abi::Param {
                    ty: param.kind.to_string(),
                    name: param.name.clone(),
                    components: vec![],
                    internal_type: None,
                })
                .collect(),
            outputs: vec![],
            state_mutability: self.mutability,
        }
    }

    /// Canonical form used for selector derivation, e.g. `supply(address,uint256,address,uint16)`.
    pub fn canonical(&self) -> String {
        self.to_function().signature()
    }

    pub fn selector(&self) -> [u8; SELECTOR_LENGTH] {
        self.to_function().selector().0
    }

    /// Parses either the canonical form (`approve(address,uint256)`) or a human-readable
    /// declaration (`function deposit() external payable`). A `returns (...)` clause is
    /// accepted and ignored.
    pub fn parse(declaration: &str) -> Result<Self> {
        let function = Function::parse(declaration.trim())
            .map_err(|_| Error::MalformedSignature(declaration.to_string()))?;
        Self::from_function(function)
    }

    /// Picks the function called `name` from a JSON ABI (an array of ABI entries). When the
    /// function is overloaded, the first declaration wins.
    pub fn from_json_abi(abi: &str, name: &str) -> Result<Self> {
        let abi: JsonAbi =
            serde_json::from_str(abi).map_err(|err| Error::JsonAbi(err.to_string()))?;

        let function = abi
            .function(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| Error::FunctionNotFound(name.to_string()))?;

        Self::from_function(function.clone())
    }

    fn from_function(function: Function) -> Result<Self> {
        let params = function
            .inputs
            .into_iter()
            .map(|input| Ok(Param::new(input.name, input.ty.parse()?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(function.name, params, function.state_mutability))
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl FromStr for FunctionSignature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
