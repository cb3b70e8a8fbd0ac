use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, Bytes, U256};
use tracing::debug;

use super::calldata::{decode_call, encode_call};
use super::error::{MissingField, SwapBuilderError};
use super::limits::single_swap_limit;
use super::structs::{SingleRelayerExtras, SingleSwap, SwapAttributes};
use super::swap_core::{BuilderState, SwapCore};
use super::swap_info::{SwapInfo, SwapType};
use crate::core_sdk::address_book::AddressBook;

/// Vault `swap(singleSwap, funds, limit, deadline)`.
const SWAP_BASE_INPUTS: usize = 4;

/// Builds call data for a one-pool `swap` on the vault or a relayer.
#[derive(Debug, Clone)]
pub struct SingleSwapBuilder {
    pub(crate) core: SwapCore,
    pub(crate) limit: Option<U256>,
}

impl SingleSwapBuilder {
    pub const FUNCTION_NAME: &'static str = "swap";

    pub fn new(
        swap_info: SwapInfo,
        kind: SwapType,
        chain_id: u64,
    ) -> Result<Self, SwapBuilderError> {
        Self::with_address_book(swap_info, kind, chain_id, &AddressBook::default())
    }

    pub fn with_address_book(
        swap_info: SwapInfo,
        kind: SwapType,
        chain_id: u64,
        address_book: &AddressBook,
    ) -> Result<Self, SwapBuilderError> {
        if swap_info.swaps.is_empty() {
            return Err(SwapBuilderError::EmptyRoute);
        }
        Ok(Self {
            core: SwapCore::new(swap_info, kind, chain_id, address_book)?,
            limit: None,
        })
    }

    pub fn set_funds(&mut self, sender: Address, recipient: Option<Address>) {
        self.core.set_funds(sender, recipient);
    }

    pub fn set_deadline(&mut self, deadline: U256) {
        self.core.set_deadline(deadline);
    }

    /// `max_slippage` in bps, eg: 1 === 0.01%, 100 === 1%
    pub fn set_limits(&mut self, max_slippage: u32) -> Result<(), SwapBuilderError> {
        let limit = single_swap_limit(&self.core, max_slippage)?;
        debug!(max_slippage, %limit, "computed single swap limit");
        self.limit = Some(limit);
        Ok(())
    }

    pub fn min_amount_out(&self, max_slippage: u32) -> U256 {
        self.core.min_amount_out(max_slippage)
    }

    pub fn max_amount_in(&self, max_slippage: u32) -> Result<U256, SwapBuilderError> {
        self.core.max_amount_in(max_slippage)
    }

    /// The fixed side of the trade.
    pub fn amount(&self) -> U256 {
        let info = &self.core.swap_info;
        match self.core.kind {
            SwapType::SwapExactOut => info.amount_out_for_limits.amount,
            SwapType::SwapExactIn => info.amount_in_for_limits.amount,
        }
    }

    pub fn single_swap(&self) -> Result<SingleSwap, SwapBuilderError> {
        let info = &self.core.swap_info;
        let first = info.swaps().first().ok_or(SwapBuilderError::EmptyRoute)?;
        Ok(SingleSwap {
            pool_id: first.pool_id,
            kind: self.core.kind,
            asset_in: info.token_in_for_swaps,
            asset_out: info.token_out_from_swaps,
            amount: self.amount(),
            user_data: Bytes::new(),
        })
    }

    pub fn state(&self) -> BuilderState {
        BuilderState::from_steps(&self.steps()).0
    }

    pub(crate) fn steps(&self) -> [(MissingField, bool); 3] {
        [
            (MissingField::Funds, self.core.funds.is_some()),
            (MissingField::Limits, self.limit.is_some()),
            (MissingField::Deadline, self.core.deadline.is_some()),
        ]
    }

    pub(crate) fn limit_or_missing(&self) -> Result<U256, SwapBuilderError> {
        self.limit
            .ok_or(SwapBuilderError::Uninitialized(MissingField::Limits))
    }

    pub fn attributes(&self) -> Result<SwapAttributes, SwapBuilderError> {
        let funds = self.core.funds_or_missing()?;
        let limit = self.limit_or_missing()?;
        let deadline = self.core.deadline_or_missing()?;

        // additional parameters on a relayer contract:
        // https://github.com/balancer-labs/balancer-v2-monorepo/blob/master/pkg/standalone-utils/contracts/relayer/VaultActions.sol#L44
        let fragment = self.core.fragment(Self::FUNCTION_NAME)?;
        let extras =
            (fragment.inputs.len() > SWAP_BASE_INPUTS).then(SingleRelayerExtras::default);

        Ok(SwapAttributes {
            request: self.single_swap()?,
            funds,
            limit,
            deadline,
            extras,
        })
    }

    pub fn data(&self) -> Result<Bytes, SwapBuilderError> {
        let fragment = self.core.fragment(Self::FUNCTION_NAME)?;
        encode_call(&fragment, &self.attributes()?.to_values())
    }

    pub fn decode_data(&self, data: &[u8]) -> Result<Vec<DynSolValue>, SwapBuilderError> {
        let fragment = self.core.fragment(Self::FUNCTION_NAME)?;
        decode_call(&fragment, Self::FUNCTION_NAME, data)
    }

    pub fn value(&self, max_slippage: u32) -> Result<U256, SwapBuilderError> {
        self.core.value(max_slippage)
    }

    pub fn to(&self) -> Address {
        self.core.to()
    }
}
