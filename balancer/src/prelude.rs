pub use alloy::hex;
pub use alloy::primitives::Bytes;
pub use alloy::primitives::{Address, B256, I256, U256};
pub use anyhow::Result;
pub use std::str::FromStr;

pub use crate::core_sdk::chain::ChainId;
pub use crate::swap_sdk::error::{MissingField, SwapBuilderError};
pub use serde::{Deserialize, Serialize};
