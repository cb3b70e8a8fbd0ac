use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, Bytes, B256, I256, U256};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::swap_info::{SwapType, SwapV2};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundManagement {
    pub sender: Address,
    pub recipient: Address,
    pub from_internal_balance: bool,
    pub to_internal_balance: bool,
}

impl FundManagement {
    /// The vault tuple is `(sender, fromInternalBalance, recipient, toInternalBalance)`.
    pub fn to_value(&self) -> DynSolValue {
        DynSolValue::Tuple(vec![
            DynSolValue::Address(self.sender),
            DynSolValue::Bool(self.from_internal_balance),
            DynSolValue::Address(self.recipient),
            DynSolValue::Bool(self.to_internal_balance),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleSwap {
    pub pool_id: B256,
    pub kind: SwapType,
    pub asset_in: Address,
    pub asset_out: Address,
    pub amount: U256,
    pub user_data: Bytes,
}

impl SingleSwap {
    pub fn to_value(&self) -> DynSolValue {
        DynSolValue::Tuple(vec![
            DynSolValue::FixedBytes(self.pool_id, 32),
            DynSolValue::Uint(U256::from(self.kind.as_u8()), 8),
            DynSolValue::Address(self.asset_in),
            DynSolValue::Address(self.asset_out),
            DynSolValue::Uint(self.amount, 256),
            DynSolValue::Bytes(self.user_data.to_vec()),
        ])
    }
}

fn batch_step_value(step: &SwapV2) -> DynSolValue {
    DynSolValue::Tuple(vec![
        DynSolValue::FixedBytes(step.pool_id, 32),
        DynSolValue::Uint(U256::from(step.asset_in_index), 256),
        DynSolValue::Uint(U256::from(step.asset_out_index), 256),
        DynSolValue::Uint(step.amount, 256),
        DynSolValue::Bytes(step.user_data.to_vec()),
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputReference {
    pub index: U256,
    pub key: U256,
}

impl OutputReference {
    pub fn to_value(&self) -> DynSolValue {
        DynSolValue::Tuple(vec![
            DynSolValue::Uint(self.index, 256),
            DynSolValue::Uint(self.key, 256),
        ])
    }
}

/// Pre-signed proof that `user` may move a restricted asset. Passed
/// through to the contract untouched.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct RwaAuthorization {
    pub user: Address,
    pub deadline: U256,
    #[builder(default)]
    pub signature: Bytes,
}

impl RwaAuthorization {
    pub fn to_value(&self) -> DynSolValue {
        DynSolValue::Tuple(vec![
            DynSolValue::Address(self.user),
            DynSolValue::Uint(self.deadline, 256),
            DynSolValue::Bytes(self.signature.to_vec()),
        ])
    }
}

/// Trailing arguments of the relayer flavour of `swap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SingleRelayerExtras {
    pub value: U256,
    pub output_reference: U256,
}

/// Trailing arguments of the relayer flavour of `batchSwap`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BatchRelayerExtras {
    pub value: U256,
    pub output_references: Vec<OutputReference>,
}

// Field order of every attribute struct is the positional argument order
// of the contract function.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapAttributes {
    pub request: SingleSwap,
    pub funds: FundManagement,
    pub limit: U256,
    pub deadline: U256,
    pub extras: Option<SingleRelayerExtras>,
}

impl SwapAttributes {
    pub fn to_values(&self) -> Vec<DynSolValue> {
        let mut values = vec![
            self.request.to_value(),
            self.funds.to_value(),
            DynSolValue::Uint(self.limit, 256),
            DynSolValue::Uint(self.deadline, 256),
        ];
        if let Some(extras) = &self.extras {
            values.push(DynSolValue::Uint(extras.value, 256));
            values.push(DynSolValue::Uint(extras.output_reference, 256));
        }
        values
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RwaSwapAttributes {
    pub request: SingleSwap,
    pub funds: FundManagement,
    pub limit: U256,
    pub deadline: U256,
    pub authorization: RwaAuthorization,
}

impl RwaSwapAttributes {
    pub fn to_values(&self) -> Vec<DynSolValue> {
        vec![
            self.request.to_value(),
            self.funds.to_value(),
            DynSolValue::Uint(self.limit, 256),
            DynSolValue::Uint(self.deadline, 256),
            self.authorization.to_value(),
        ]
    }
}

/// Arguments of `batchSwap`, or of `rwaBatchSwap` when `authorization` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSwapAttributes {
    pub kind: SwapType,
    pub swaps: Vec<SwapV2>,
    pub assets: Vec<Address>,
    pub funds: FundManagement,
    pub limits: Vec<I256>,
    pub deadline: U256,
    pub authorization: Option<RwaAuthorization>,
    pub extras: Option<BatchRelayerExtras>,
}

impl BatchSwapAttributes {
    pub fn to_values(&self) -> Vec<DynSolValue> {
        let mut values = vec![
            DynSolValue::Uint(U256::from(self.kind.as_u8()), 8),
            DynSolValue::Array(self.swaps.iter().map(batch_step_value).collect()),
            DynSolValue::Array(
                self.assets
                    .iter()
                    .map(|asset| DynSolValue::Address(*asset))
                    .collect(),
            ),
            self.funds.to_value(),
            DynSolValue::Array(
                self.limits
                    .iter()
                    .map(|limit| DynSolValue::Int(*limit, 256))
                    .collect(),
            ),
            DynSolValue::Uint(self.deadline, 256),
        ];
        if let Some(authorization) = &self.authorization {
            values.push(authorization.to_value());
        }
        if let Some(extras) = &self.extras {
            values.push(DynSolValue::Uint(extras.value, 256));
            values.push(DynSolValue::Array(
                extras
                    .output_references
                    .iter()
                    .map(OutputReference::to_value)
                    .collect(),
            ));
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::token;

    #[test]
    fn test_funds_tuple_order() {
        let funds = FundManagement {
            sender: token(1),
            recipient: token(2),
            from_internal_balance: true,
            to_internal_balance: false,
        };
        let DynSolValue::Tuple(fields) = funds.to_value() else {
            panic!("funds must encode as a tuple");
        };
        assert_eq!(fields[0], DynSolValue::Address(token(1)));
        assert_eq!(fields[1], DynSolValue::Bool(true));
        assert_eq!(fields[2], DynSolValue::Address(token(2)));
    }

    #[test]
    fn test_authorization_builder_defaults_signature() {
        let authorization = RwaAuthorizationBuilder::default()
            .user(token(7))
            .deadline(U256::from(1_700_000_000u64))
            .build()
            .unwrap();
        assert!(authorization.signature.is_empty());
    }
}
