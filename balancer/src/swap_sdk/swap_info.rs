// Route shapes produced by the Smart Order Router (SOR) and the limit
// helpers derived from them.
use alloy::primitives::{Address, Bytes, B256, U256};
use derive_builder::Builder;
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;

use super::error::SwapBuilderError;

const BPS_DENOMINATOR: u64 = 10_000;

/// Which side of the trade is fixed. Encoded as the vault's `SwapKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwapType {
    #[default]
    SwapExactIn = 0,
    SwapExactOut = 1,
}

impl SwapType {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// One hop of a route, indices point into `SwapInfo::token_addresses`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapV2 {
    pub pool_id: B256,
    pub asset_in_index: u64,
    pub asset_out_index: u64,
    #[serde(deserialize_with = "de_amount")]
    pub amount: U256,
    #[serde(default)]
    pub user_data: Bytes,
}

#[derive(Debug, Clone, Builder, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapInfo {
    pub token_addresses: Vec<Address>,
    pub swaps: Vec<SwapV2>,
    #[serde(deserialize_with = "de_amount")]
    pub swap_amount: U256,
    #[builder(setter(strip_option), default)]
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub swap_amount_for_swaps: Option<U256>,
    #[serde(deserialize_with = "de_amount")]
    pub return_amount: U256,
    #[builder(setter(strip_option), default)]
    #[serde(default, deserialize_with = "de_opt_amount")]
    pub return_amount_from_swaps: Option<U256>,
    pub token_in: Address,
    #[builder(setter(strip_option), default)]
    #[serde(default)]
    pub token_in_for_swaps: Option<Address>,
    pub token_out: Address,
    #[builder(setter(strip_option), default)]
    #[serde(default)]
    pub token_out_from_swaps: Option<Address>,
}

impl SwapInfo {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// An amount together with its worst-case bounds under slippage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountForLimits {
    pub amount: U256,
}

impl AmountForLimits {
    pub fn new(amount: U256) -> Self {
        Self { amount }
    }

    /// `amount * (1 + slippage)`, rounded down. `max_slippage` is in bps.
    /// Fails when the bound does not fit in 256 bits.
    pub fn max(&self, max_slippage: u32) -> Result<U256, SwapBuilderError> {
        self.scale(BPS_DENOMINATOR + u64::from(max_slippage))
            .ok_or_else(|| SwapBuilderError::InvalidAmount(self.amount.to_string()))
    }

    /// `amount * (1 - slippage)`, rounded down. Saturates at zero.
    pub fn min(&self, max_slippage: u32) -> U256 {
        // factor <= denominator, so the product never exceeds `amount`
        self.scale(BPS_DENOMINATOR.saturating_sub(u64::from(max_slippage)))
            .unwrap_or_default()
    }

    /// `floor(amount * factor / 10000)` without forming the full product.
    fn scale(&self, factor: u64) -> Option<U256> {
        let denominator = U256::from(BPS_DENOMINATOR);
        let factor = U256::from(factor);
        let whole = (self.amount / denominator).checked_mul(factor)?;
        let rest = (self.amount % denominator) * factor / denominator;
        whole.checked_add(rest)
    }
}

/// SOR output with the per-direction amounts and the tokens the vault
/// actually sees (which differ from `token_in`/`token_out` when the route
/// wraps or unwraps at the edges).
#[derive(Debug, Clone)]
pub struct SdkSwapInfo {
    pub swap_info: SwapInfo,
    pub amount_in_for_limits: AmountForLimits,
    pub amount_out_for_limits: AmountForLimits,
    pub token_in_for_swaps: Address,
    pub token_out_from_swaps: Address,
}

impl SdkSwapInfo {
    pub fn decorate(swap_info: SwapInfo, kind: SwapType) -> Self {
        let for_swaps = swap_info.swap_amount_for_swaps.unwrap_or(swap_info.swap_amount);
        let from_swaps = swap_info
            .return_amount_from_swaps
            .unwrap_or(swap_info.return_amount);

        let (in_for_limits, out_for_limits) = match kind {
            SwapType::SwapExactIn => (for_swaps, from_swaps),
            SwapType::SwapExactOut => (from_swaps, for_swaps),
        };

        let token_in_for_swaps = swap_info.token_in_for_swaps.unwrap_or(swap_info.token_in);
        let token_out_from_swaps = swap_info
            .token_out_from_swaps
            .unwrap_or(swap_info.token_out);

        Self {
            amount_in_for_limits: AmountForLimits::new(in_for_limits),
            amount_out_for_limits: AmountForLimits::new(out_for_limits),
            token_in_for_swaps,
            token_out_from_swaps,
            swap_info,
        }
    }

    pub fn token_in(&self) -> Address {
        self.swap_info.token_in
    }

    pub fn token_out(&self) -> Address {
        self.swap_info.token_out
    }

    pub fn token_addresses(&self) -> &[Address] {
        &self.swap_info.token_addresses
    }

    pub fn swaps(&self) -> &[SwapV2] {
        &self.swap_info.swaps
    }
}

/// Parses an SOR amount. Accepts `0x` hex or decimal; a fractional part is
/// dropped, never rounded.
pub fn parse_amount(raw: &str) -> Result<U256, SwapBuilderError> {
    let raw = raw.trim();
    let invalid = || SwapBuilderError::InvalidAmount(raw.to_string());

    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        return U256::from_str_radix(hex, 16).map_err(|_| invalid());
    }

    let integer = match raw.split_once('.') {
        Some((integer, fraction)) => {
            if !fraction.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            integer
        }
        None => raw,
    };
    if integer.is_empty() {
        if raw.len() > 1 {
            return Ok(U256::ZERO);
        }
        return Err(invalid());
    }
    if !integer.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    U256::from_str_radix(integer, 10).map_err(|_| invalid())
}

// Amounts are read from the raw JSON text: a number literal wider than
// u64 would otherwise go through f64 and lose digits.
fn raw_amount(raw: &RawValue) -> Result<U256, SwapBuilderError> {
    let text = raw.get();
    if text.starts_with('"') {
        let quoted: String = serde_json::from_str(text)
            .map_err(|_| SwapBuilderError::InvalidAmount(text.to_string()))?;
        return parse_amount(&quoted);
    }
    parse_amount(text)
}

fn de_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    raw_amount(&raw).map_err(serde::de::Error::custom)
}

fn de_opt_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<U256>, D::Error> {
    Option::<Box<RawValue>>::deserialize(deserializer)?
        .map(|raw| raw_amount(&raw))
        .transpose()
        .map_err(serde::de::Error::custom)
}
