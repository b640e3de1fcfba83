use alloy_primitives::{address, Address};

use crate::config::LoggingFormat;

pub const DEFAULT_LOGGING_FORMAT: LoggingFormat = LoggingFormat::Text;

// Optimism Sepolia deployments.
pub const DEFAULT_LENDING_POOL_ADDRESS: Address =
    address!("b50201558b00496a145fe76f7424749556e326d8");
pub const DEFAULT_WETH_ADDRESS: Address = address!("4200000000000000000000000000000000000006");
// MultiSendCallOnly v1.4.1
pub const DEFAULT_MULTISEND_ADDRESS: Address =
    address!("9641d764fc13c8b624c04430c7356c1c7c8102e2");

pub const DEFAULT_REFERRAL_CODE: u16 = 0;
