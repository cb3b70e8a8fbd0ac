/// Networks with a deployed Balancer V2 vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChainId {
    Mainnet = 1,
    Goerli = 5,
    Optimism = 10,
    Gnosis = 100,
    Polygon = 137,
    Fantom = 250,
    Zkevm = 1101,
    Base = 8453,
    ArbitrumOne = 42161,
    Avalanche = 43114,
    Sepolia = 11155111,
}

impl From<ChainId> for u64 {
    fn from(chain_id: ChainId) -> Self {
        chain_id as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        assert_eq!(u64::from(ChainId::Polygon), 137);
        assert_eq!(u64::from(ChainId::Sepolia), 11_155_111);
    }
}
