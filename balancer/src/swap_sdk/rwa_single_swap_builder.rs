use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, Bytes, U256};

use super::calldata::{decode_call, encode_call};
use super::error::{MissingField, SwapBuilderError};
use super::single_swap_builder::SingleSwapBuilder;
use super::structs::{RwaAuthorization, RwaSwapAttributes, SingleSwap};
use super::swap_core::BuilderState;
use super::swap_info::{SwapInfo, SwapType};
use crate::core_sdk::address_book::AddressBook;

/// Single swap of a restricted asset: the plain single-swap arguments plus
/// the transfer authorization, sent to `rwaSwap`.
#[derive(Debug, Clone)]
pub struct RwaSingleSwapBuilder {
    single: SingleSwapBuilder,
    authorization: Option<RwaAuthorization>,
}

impl RwaSingleSwapBuilder {
    pub const FUNCTION_NAME: &'static str = "rwaSwap";

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
        Ok(Self {
            single: SingleSwapBuilder::with_address_book(swap_info, kind, chain_id, address_book)?,
            authorization: None,
        })
    }

    pub fn set_authorization(&mut self, authorization: RwaAuthorization) {
        self.authorization = Some(authorization);
    }

    pub fn set_funds(&mut self, sender: Address, recipient: Option<Address>) {
        self.single.set_funds(sender, recipient);
    }

    pub fn set_deadline(&mut self, deadline: U256) {
        self.single.set_deadline(deadline);
    }

    pub fn set_limits(&mut self, max_slippage: u32) -> Result<(), SwapBuilderError> {
        self.single.set_limits(max_slippage)
    }

    pub fn min_amount_out(&self, max_slippage: u32) -> U256 {
        self.single.min_amount_out(max_slippage)
    }

    pub fn max_amount_in(&self, max_slippage: u32) -> Result<U256, SwapBuilderError> {
        self.single.max_amount_in(max_slippage)
    }

    pub fn single_swap(&self) -> Result<SingleSwap, SwapBuilderError> {
        self.single.single_swap()
    }

    pub fn state(&self) -> BuilderState {
        let [funds, limits, deadline] = self.single.steps();
        BuilderState::from_steps(&[
            funds,
            limits,
            deadline,
            (MissingField::Authorization, self.authorization.is_some()),
        ])
        .0
    }

    /// `rwaSwap(singleSwap, funds, limit, deadline, authorization)`. No relayer
    /// arguments are appended, unlike `swap`.
    pub fn attributes(&self) -> Result<RwaSwapAttributes, SwapBuilderError> {
        let core = &self.single.core;
        let funds = core.funds_or_missing()?;
        let limit = self.single.limit_or_missing()?;
        let deadline = core.deadline_or_missing()?;
        let authorization = self
            .authorization
            .clone()
            .ok_or(SwapBuilderError::Uninitialized(MissingField::Authorization))?;

        Ok(RwaSwapAttributes {
            request: self.single.single_swap()?,
            funds,
            limit,
            deadline,
            authorization,
        })
    }

    pub fn data(&self) -> Result<Bytes, SwapBuilderError> {
        let fragment = self.single.core.fragment(Self::FUNCTION_NAME)?;
        encode_call(&fragment, &self.attributes()?.to_values())
    }

    pub fn decode_data(&self, data: &[u8]) -> Result<Vec<DynSolValue>, SwapBuilderError> {
        let fragment = self.single.core.fragment(Self::FUNCTION_NAME)?;
        decode_call(&fragment, Self::FUNCTION_NAME, data)
    }

    pub fn value(&self, max_slippage: u32) -> Result<U256, SwapBuilderError> {
        self.single.value(max_slippage)
    }

    pub fn to(&self) -> Address {
        self.single.to()
    }
}
