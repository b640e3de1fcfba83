pub const SAFE_ADDRESS_ENV: &str = "SAFE_ADDRESS";
pub const LENDING_POOL_ADDRESS_ENV: &str = "LENDING_POOL_ADDRESS";
pub const WETH_ADDRESS_ENV: &str = "WETH_ADDRESS";
pub const MULTISEND_ADDRESS_ENV: &str = "MULTISEND_ADDRESS";
pub const LOGGING_FORMAT_ENV: &str = "SAFE_BATCH_LOGGING_FORMAT";
