use alloy::dyn_abi::DynSolValue;
use alloy::json_abi::Function;
use alloy::primitives::{Address, Bytes, I256, U256};
use tracing::debug;

use super::calldata::{decode_call, encode_call};
use super::error::{MissingField, SwapBuilderError};
use super::limits::batch_swap_limits;
use super::structs::{BatchRelayerExtras, BatchSwapAttributes, RwaAuthorization};
use super::swap_core::{BuilderState, SwapCore};
use super::swap_info::{SwapInfo, SwapType};
use crate::core_sdk::address_book::AddressBook;

/// Vault `batchSwap(kind, swaps, assets, funds, limits, deadline)`.
pub(crate) const BATCH_SWAP_BASE_INPUTS: usize = 6;

/// Assembles `batchSwap` arguments, or `rwaBatchSwap` ones when an
/// authorization is passed.
///
/// Relayer variants of either function declare two more inputs (`value`
/// and `outputReferences`); they are appended when the fragment has more
/// inputs than the vault signature.
pub(crate) fn batch_attributes(
    core: &SwapCore,
    limits: Option<&Vec<I256>>,
    authorization: Option<&RwaAuthorization>,
    fragment: &Function,
) -> Result<BatchSwapAttributes, SwapBuilderError> {
    let funds = core.funds_or_missing()?;
    let limits = limits
        .cloned()
        .ok_or(SwapBuilderError::Uninitialized(MissingField::Limits))?;
    let deadline = core.deadline_or_missing()?;

    // additional parameters on a relayer contract:
    // https://github.com/balancer-labs/balancer-v2-monorepo/blob/master/pkg/standalone-utils/contracts/relayer/VaultActions.sol#L67
    // `rwaBatchSwap` carries the authorization as a seventh base input, so the
    // relayer arguments only start after it.
    let base_inputs = if authorization.is_some() {
        BATCH_SWAP_BASE_INPUTS + 1
    } else {
        BATCH_SWAP_BASE_INPUTS
    };
    if authorization.is_some() && fragment.inputs.len() == base_inputs {
        // TODO: confirm with the relayer deployment whether a seven-input rwaBatchSwap
        // should also receive value/outputReferences like the six-input batchSwap rule
        debug!(
            function = %fragment.name,
            inputs = fragment.inputs.len(),
            "authorization fills the seventh input, no relayer extras appended"
        );
    }
    let extras = (fragment.inputs.len() > base_inputs).then(BatchRelayerExtras::default);

    Ok(BatchSwapAttributes {
        kind: core.kind,
        swaps: core.swap_info.swaps().to_vec(),
        assets: core.swap_info.token_addresses().to_vec(),
        funds,
        limits,
        deadline,
        authorization: authorization.cloned(),
        extras,
    })
}

/// Builds call data for a multi-hop `batchSwap` on the vault or a relayer.
#[derive(Debug, Clone)]
pub struct BatchSwapBuilder {
    core: SwapCore,
    limits: Option<Vec<I256>>,
}

impl BatchSwapBuilder {
    pub const FUNCTION_NAME: &'static str = "batchSwap";

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
        self.limits = Some(batch_swap_limits(&self.core, max_slippage)?);
        Ok(())
    }

    pub fn limits(&self) -> Option<&[I256]> {
        self.limits.as_deref()
    }

    pub fn min_amount_out(&self, max_slippage: u32) -> U256 {
        self.core.min_amount_out(max_slippage)
    }

    pub fn max_amount_in(&self, max_slippage: u32) -> Result<U256, SwapBuilderError> {
        self.core.max_amount_in(max_slippage)
    }

    pub fn state(&self) -> BuilderState {
        BuilderState::from_steps(&[
            (MissingField::Funds, self.core.funds.is_some()),
            (MissingField::Limits, self.limits.is_some()),
            (MissingField::Deadline, self.core.deadline.is_some()),
        ])
        .0
    }

    pub fn attributes(&self) -> Result<BatchSwapAttributes, SwapBuilderError> {
        let fragment = self.core.fragment(Self::FUNCTION_NAME)?;
        batch_attributes(&self.core, self.limits.as_ref(), None, &fragment)
    }

    pub fn data(&self) -> Result<Bytes, SwapBuilderError> {
        let fragment = self.core.fragment(Self::FUNCTION_NAME)?;
        let attributes = batch_attributes(&self.core, self.limits.as_ref(), None, &fragment)?;
        encode_call(&fragment, &attributes.to_values())
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
