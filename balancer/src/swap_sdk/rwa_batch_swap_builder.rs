use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::Function;
use alloy::primitives::{Address, Bytes, I256, U256};

use super::batch_swap_builder::batch_attributes;
use super::calldata::{decode_call, encode_call};
use super::error::{MissingField, SwapBuilderError};
use super::limits::batch_swap_limits;
use super::structs::{BatchSwapAttributes, RwaAuthorization};
use super::swap_core::{BuilderState, SwapCore};
use super::swap_info::{SwapInfo, SwapType};
use crate::core_sdk::address_book::AddressBook;

/// Multi-hop swap of a restricted asset through `rwaBatchSwap`.
#[derive(Debug, Clone)]
pub struct RwaBatchSwapBuilder {
    core: SwapCore,
    limits: Option<Vec<I256>>,
    authorization: Option<RwaAuthorization>,
}

impl RwaBatchSwapBuilder {
    pub const FUNCTION_NAME: &'static str = "rwaBatchSwap";

    /// Building swap transaction data from an SOR result.
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
            core: SwapCore::new(swap_info, kind, chain_id, address_book)?,
            limits: None,
            authorization: None,
        })
    }

    pub fn set_authorization(&mut self, authorization: RwaAuthorization) {
        self.authorization = Some(authorization);
    }

    pub fn set_funds(&mut self, sender: Address, recipient: Option<Address>) {
        self.core.set_funds(sender, recipient);
    }

    /// `deadline` is a block timestamp.
    pub fn set_deadline(&mut self, deadline: U256) {
        self.core.set_deadline(deadline);
    }

    pub fn min_amount_out(&self, max_slippage: u32) -> U256 {
        self.core.min_amount_out(max_slippage)
    }

    pub fn max_amount_in(&self, max_slippage: u32) -> Result<U256, SwapBuilderError> {
        self.core.max_amount_in(max_slippage)
    }

    /// `max_slippage` in bps, eg: 1 === 0.01%, 100 === 1%
    pub fn set_limits(&mut self, max_slippage: u32) -> Result<(), SwapBuilderError> {
        self.limits = Some(batch_swap_limits(&self.core, max_slippage)?);
        Ok(())
    }

    pub fn limits(&self) -> Option<&[I256]> {
        self.limits.as_deref()
    }

    fn steps(&self) -> [(MissingField, bool); 4] {
        [
            (MissingField::Funds, self.core.funds.is_some()),
            (MissingField::Limits, self.limits.is_some()),
            (MissingField::Deadline, self.core.deadline.is_some()),
            (MissingField::Authorization, self.authorization.is_some()),
        ]
    }

    pub fn state(&self) -> BuilderState {
        BuilderState::from_steps(&self.steps()).0
    }

    fn fragment(&self) -> Result<Function, SwapBuilderError> {
        self.core.fragment(Self::FUNCTION_NAME)
    }

    fn attributes_for(&self, fragment: &Function) -> Result<BatchSwapAttributes, SwapBuilderError> {
        if let (_, Some(missing)) = BuilderState::from_steps(&self.steps()) {
            return Err(SwapBuilderError::Uninitialized(missing));
        }
        let authorization = self
            .authorization
            .as_ref()
            .ok_or(SwapBuilderError::Uninitialized(MissingField::Authorization))?;
        batch_attributes(&self.core, self.limits.as_ref(), Some(authorization), fragment)
    }

    pub fn attributes(&self) -> Result<BatchSwapAttributes, SwapBuilderError> {
        self.attributes_for(&self.fragment()?)
    }

    pub fn data(&self) -> Result<Bytes, SwapBuilderError> {
        let fragment = self.fragment()?;
        encode_call(&fragment, &self.attributes_for(&fragment)?.to_values())
    }

    pub fn decode_data(&self, data: &[u8]) -> Result<Vec<DynSolValue>, SwapBuilderError> {
        decode_call(&self.fragment()?, Self::FUNCTION_NAME, data)
    }

    pub fn value(&self, max_slippage: u32) -> Result<U256, SwapBuilderError> {
        self.core.value(max_slippage)
    }

    pub fn to(&self) -> Address {
        self.core.to()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_sdk::address_book::{BALANCER_VAULT, MAINNET_LIDO_RELAYER};
    use crate::core_sdk::currency::MAINNET_STETH;
    use crate::test_support::{authorization, native_in_swap_info, token, two_hop_swap_info};

    fn ready_builder(swap_info: SwapInfo, kind: SwapType) -> RwaBatchSwapBuilder {
        let mut builder = RwaBatchSwapBuilder::new(swap_info, kind, 1).unwrap();
        builder.set_funds(token(0x99), None);
        builder.set_limits(0).unwrap();
        builder.set_deadline(U256::from(1_800_000_000u64));
        builder.set_authorization(authorization());
        builder
    }

    fn steth_route() -> SwapInfo {
        let mut swap_info = two_hop_swap_info();
        swap_info.token_addresses[2] = MAINNET_STETH;
        swap_info.token_out = MAINNET_STETH;
        swap_info
    }

    #[test]
    fn test_missing_steps_in_order() {
        let mut builder =
            RwaBatchSwapBuilder::new(two_hop_swap_info(), SwapType::SwapExactIn, 1).unwrap();
        builder.set_authorization(authorization());
        assert!(matches!(
            builder.attributes(),
            Err(SwapBuilderError::Uninitialized(MissingField::Funds))
        ));

        let mut builder =
            RwaBatchSwapBuilder::new(two_hop_swap_info(), SwapType::SwapExactIn, 1).unwrap();
        builder.set_funds(token(0x99), None);
        builder.set_deadline(U256::from(1u64));
        assert_eq!(builder.state(), BuilderState::FundsSet);
        assert!(matches!(
            builder.attributes(),
            Err(SwapBuilderError::Uninitialized(MissingField::Limits))
        ));

        builder.set_limits(10).unwrap();
        assert!(matches!(
            builder.attributes(),
            Err(SwapBuilderError::Uninitialized(MissingField::Authorization))
        ));
        builder.set_authorization(authorization());
        assert!(builder.attributes().is_ok());
    }

    #[test]
    fn test_limits_for_two_hop_route() {
        let builder = ready_builder(two_hop_swap_info(), SwapType::SwapExactIn);
        let limits: Vec<String> = builder
            .limits()
            .unwrap()
            .iter()
            .map(|limit| limit.to_string())
            .collect();
        assert_eq!(limits, vec!["100", "0", "-95"]);
    }

    #[test]
    fn test_vault_attributes_have_no_relayer_extras() {
        let builder = ready_builder(two_hop_swap_info(), SwapType::SwapExactIn);
        assert_eq!(builder.to(), BALANCER_VAULT);
        let attributes = builder.attributes().unwrap();
        assert_eq!(attributes.kind, SwapType::SwapExactIn);
        assert_eq!(attributes.authorization, Some(authorization()));
        assert_eq!(attributes.extras, None);
        assert_eq!(attributes.to_values().len(), 7);
    }

    #[test]
    fn test_lido_relayer_has_no_rwa_batch_swap() {
        let builder = ready_builder(steth_route(), SwapType::SwapExactIn);
        assert_eq!(builder.to(), MAINNET_LIDO_RELAYER);
        for result in [builder.attributes().map(|_| ()), builder.data().map(|_| ())] {
            assert!(matches!(
                result,
                Err(SwapBuilderError::FragmentNotFound {
                    function: "rwaBatchSwap",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_vault_round_trip() {
        for kind in [SwapType::SwapExactIn, SwapType::SwapExactOut] {
            let builder = ready_builder(two_hop_swap_info(), kind);
            let data = builder.data().unwrap();
            let decoded = builder.decode_data(&data).unwrap();
            assert_eq!(decoded, builder.attributes().unwrap().to_values());
        }
    }

    #[test]
    fn test_value_for_native_input() {
        let builder = ready_builder(native_in_swap_info(), SwapType::SwapExactOut);
        // exact out pays up to return amount + 1%
        assert_eq!(
            builder.value(100).unwrap(),
            U256::from(1_010_000_000_000_000_000u64)
        );
        let builder = ready_builder(two_hop_swap_info(), SwapType::SwapExactOut);
        assert_eq!(builder.value(100).unwrap(), U256::ZERO);
    }

    #[test]
    fn test_exact_out_bounds() {
        let builder = ready_builder(two_hop_swap_info(), SwapType::SwapExactOut);
        assert_eq!(builder.min_amount_out(300), U256::from(100u64));
        // 95 * 1.03 = 97.85
        assert_eq!(builder.max_amount_in(300).unwrap(), U256::from(97u64));
    }
}
