use alloy::primitives::{Address, Bytes, B256, U256};

use crate::core_sdk::currency::NATIVE_ASSET;
use crate::swap_sdk::structs::RwaAuthorization;
use crate::swap_sdk::swap_info::{SwapInfo, SwapInfoBuilder, SwapV2};

pub(crate) fn token(last_byte: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[19] = last_byte;
    Address::from(bytes)
}

pub(crate) fn pool(last_byte: u8) -> B256 {
    B256::repeat_byte(last_byte)
}

/// A -> B -> C with 100 in and 95 out.
pub(crate) fn two_hop_swap_info() -> SwapInfo {
    SwapInfoBuilder::default()
        .token_addresses(vec![token(0xa), token(0xb), token(0xc)])
        .swaps(vec![
            SwapV2 {
                pool_id: pool(0x01),
                asset_in_index: 0,
                asset_out_index: 1,
                amount: U256::from(100u64),
                user_data: Bytes::new(),
            },
            SwapV2 {
                pool_id: pool(0x02),
                asset_in_index: 1,
                asset_out_index: 2,
                amount: U256::ZERO,
                user_data: Bytes::new(),
            },
        ])
        .swap_amount(U256::from(100u64))
        .return_amount(U256::from(95u64))
        .token_in(token(0xa))
        .token_out(token(0xc))
        .build()
        .unwrap()
}

/// ETH -> C through one pool, 2_000_000 wei in and 1e18 C out.
pub(crate) fn native_in_swap_info() -> SwapInfo {
    SwapInfoBuilder::default()
        .token_addresses(vec![NATIVE_ASSET, token(0xc)])
        .swaps(vec![SwapV2 {
            pool_id: pool(0x03),
            asset_in_index: 0,
            asset_out_index: 1,
            amount: U256::from(2_000_000u64),
            user_data: Bytes::new(),
        }])
        .swap_amount(U256::from(2_000_000u64))
        .return_amount(U256::from(1_000_000_000_000_000_000u64))
        .token_in(NATIVE_ASSET)
        .token_out(token(0xc))
        .build()
        .unwrap()
}

pub(crate) fn authorization() -> RwaAuthorization {
    RwaAuthorization {
        user: token(0x42),
        deadline: U256::from(1_900_000_000u64),
        signature: Bytes::from(vec![0xab; 65]),
    }
}

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
