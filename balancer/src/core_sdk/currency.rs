use alloy::primitives::{address, Address};

/// Sentinel the router uses for the chain's native asset.
pub const NATIVE_ASSET: Address = Address::ZERO;

/// Lido stETH on mainnet.
pub const MAINNET_STETH: Address = address!("ae7ab96520DE3A18E5e111B5EaAb095312D7fE84");

pub fn is_native(token: &Address) -> bool {
    *token == NATIVE_ASSET
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_native_sentinel() {
        let eth = Address::from_str("0x0000000000000000000000000000000000000000").unwrap();
        assert!(is_native(&eth));
        assert!(!is_native(&MAINNET_STETH));
    }
}
