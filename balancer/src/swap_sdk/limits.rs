// Limits follow https://dev.balancer.fi/resources/swaps/batch-swaps
use alloy::primitives::{I256, U256};
use tracing::debug;

use super::error::SwapBuilderError;
use super::swap_core::SwapCore;
use super::swap_info::SwapType;

/// `limit` of a single swap: the worst output we accept for an exact-in
/// trade, the worst input we pay for an exact-out trade.
pub fn single_swap_limit(core: &SwapCore, max_slippage: u32) -> Result<U256, SwapBuilderError> {
    match core.kind {
        SwapType::SwapExactIn => Ok(core.min_amount_out(max_slippage)),
        SwapType::SwapExactOut => core.max_amount_in(max_slippage),
    }
}

/// `limits` of a batch swap, one per entry of the route's token list.
///
/// The maximum number of tokens to send is positive, the minimum amount to
/// receive is negative, every intermediate asset is zero.
///
/// Only a single input position is handled; routes that pull from several
/// distinct input tokens are not supported.
pub fn batch_swap_limits(
    core: &SwapCore,
    max_slippage: u32,
) -> Result<Vec<I256>, SwapBuilderError> {
    let info = &core.swap_info;
    let limits = info
        .token_addresses()
        .iter()
        .map(|token| {
            let mut amount = I256::ZERO;
            if *token == info.token_in_for_swaps {
                amount = to_signed(core.max_amount_in(max_slippage)?)?;
            }
            if *token == info.token_out_from_swaps {
                amount = -to_signed(core.min_amount_out(max_slippage))?;
            }
            Ok::<_, SwapBuilderError>(amount)
        })
        .collect::<Result<Vec<_>, SwapBuilderError>>()?;
    debug!(max_slippage, ?limits, "computed batch swap limits");
    Ok(limits)
}

fn to_signed(amount: U256) -> Result<I256, SwapBuilderError> {
    I256::try_from(amount).map_err(|_| SwapBuilderError::InvalidAmount(amount.to_string()))
}
