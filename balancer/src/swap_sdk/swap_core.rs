use alloy::json_abi::Function;
use alloy::primitives::{Address, U256};
use chrono::Utc;

use super::error::{MissingField, SwapBuilderError};
use super::relayer::{find_fragment, relayer_resolver, SwapRelayer};
use super::structs::FundManagement;
use super::swap_info::{SdkSwapInfo, SwapInfo, SwapType};
use crate::core_sdk::address_book::AddressBook;
use crate::core_sdk::currency::is_native;

/// How far a builder has been configured. Steps may be taken in any
/// order; the tag reports the earliest one still missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Empty,
    FundsSet,
    LimitsSet,
    DeadlineSet,
    Ready,
}

impl BuilderState {
    /// `required` lists each step with whether it has been done, in order.
    pub(crate) fn from_steps(required: &[(MissingField, bool)]) -> (Self, Option<MissingField>) {
        let done = required.iter().take_while(|(_, set)| *set).count();
        let missing = required.get(done).map(|(field, _)| *field);
        let state = match (missing, done) {
            (None, _) => BuilderState::Ready,
            (Some(_), 0) => BuilderState::Empty,
            (Some(_), 1) => BuilderState::FundsSet,
            (Some(_), 2) => BuilderState::LimitsSet,
            (Some(_), _) => BuilderState::DeadlineSet,
        };
        (state, missing)
    }
}

/// State shared by every swap builder: the decorated route, where it is
/// sent, and the funds/deadline settings.
#[derive(Debug, Clone)]
pub struct SwapCore {
    pub swap_info: SdkSwapInfo,
    pub kind: SwapType,
    pub chain_id: u64,
    pub relayer: SwapRelayer,
    pub funds: Option<FundManagement>,
    pub deadline: Option<U256>,
}

impl SwapCore {
    pub fn new(
        swap_info: SwapInfo,
        kind: SwapType,
        chain_id: u64,
        address_book: &AddressBook,
    ) -> Result<Self, SwapBuilderError> {
        let swap_info = SdkSwapInfo::decorate(swap_info, kind);
        let relayer = relayer_resolver(
            swap_info.token_in(),
            swap_info.token_out(),
            chain_id,
            address_book,
        )?;
        Ok(Self {
            swap_info,
            kind,
            chain_id,
            relayer,
            funds: None,
            deadline: None,
        })
    }

    pub fn set_funds(&mut self, sender: Address, recipient: Option<Address>) {
        self.funds = Some(FundManagement {
            sender,
            recipient: recipient.unwrap_or(sender),
            from_internal_balance: false,
            to_internal_balance: false,
        });
    }

    /// `deadline` is a block timestamp.
    pub fn set_deadline(&mut self, deadline: U256) {
        self.deadline = Some(deadline);
    }

    /// Given IN it's the minimum amount we are willing to accept.
    /// Given OUT it's the fixed amount defined as output.
    pub fn min_amount_out(&self, max_slippage: u32) -> U256 {
        match self.kind {
            SwapType::SwapExactIn => self.swap_info.amount_out_for_limits.min(max_slippage),
            SwapType::SwapExactOut => self.swap_info.amount_out_for_limits.amount,
        }
    }

    /// Given IN it's the fixed amount we define as input.
    /// Given OUT it's the maximum amount we are willing to pay for the request.
    pub fn max_amount_in(&self, max_slippage: u32) -> Result<U256, SwapBuilderError> {
        match self.kind {
            SwapType::SwapExactOut => self.swap_info.amount_in_for_limits.max(max_slippage),
            SwapType::SwapExactIn => Ok(self.swap_info.amount_in_for_limits.amount),
        }
    }

    /// Native currency to attach: only when paying with the chain's native asset.
    pub fn value(&self, max_slippage: u32) -> Result<U256, SwapBuilderError> {
        if is_native(&self.swap_info.token_in()) {
            self.max_amount_in(max_slippage)
        } else {
            Ok(U256::ZERO)
        }
    }

    pub fn to(&self) -> Address {
        self.relayer.address
    }

    pub fn fragment(&self, function: &'static str) -> Result<Function, SwapBuilderError> {
        find_fragment(&self.relayer, function)
    }

    pub(crate) fn funds_or_missing(&self) -> Result<FundManagement, SwapBuilderError> {
        self.funds
            .clone()
            .ok_or(SwapBuilderError::Uninitialized(MissingField::Funds))
    }

    pub(crate) fn deadline_or_missing(&self) -> Result<U256, SwapBuilderError> {
        self.deadline
            .ok_or(SwapBuilderError::Uninitialized(MissingField::Deadline))
    }
}

/// Block timestamp `seconds` from now, for [`SwapCore::set_deadline`].
pub fn deadline_after(seconds: u64) -> U256 {
    let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
    U256::from(now.saturating_add(seconds))
}
