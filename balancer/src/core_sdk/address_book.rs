use std::collections::HashMap;

use alloy::primitives::{address, Address};
use anyhow::{Context, Result};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::chain::ChainId;
use super::currency::MAINNET_STETH;
use crate::swap_sdk::error::SwapBuilderError;

/// Same address on every network the vault is deployed to.
pub const BALANCER_VAULT: Address = address!("BA12222222228d8Ba445958a75a0704d566BF2C8");
pub const MAINNET_LIDO_RELAYER: Address = address!("dcdbf71A870cc60C6F9B621E28a7D3Ffd6Dd4965");

#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkAddresses {
    #[builder(default = "BALANCER_VAULT")]
    #[serde(default = "default_vault")]
    pub vault: Address,
    #[builder(setter(strip_option), default)]
    #[serde(default)]
    pub lido_relayer: Option<Address>,
    #[builder(setter(strip_option), default)]
    #[serde(default, rename = "stETH")]
    pub steth: Option<Address>,
}

fn default_vault() -> Address {
    BALANCER_VAULT
}

impl From<ChainId> for NetworkAddresses {
    fn from(chain_id: ChainId) -> Self {
        match chain_id {
            ChainId::Mainnet => NetworkAddresses {
                vault: BALANCER_VAULT,
                lido_relayer: Some(MAINNET_LIDO_RELAYER),
                steth: Some(MAINNET_STETH),
            },
            _ => NetworkAddresses {
                vault: BALANCER_VAULT,
                lido_relayer: None,
                steth: None,
            },
        }
    }
}

/// Per-chain contract addresses used by the relayer resolver.
///
/// Starts from the built-in deployments; a JSON document keyed by chain id
/// can replace entries or register networks the built-in table lacks.
#[derive(Debug, Clone)]
pub struct AddressBook {
    networks: HashMap<u64, NetworkAddresses>,
}

impl Default for AddressBook {
    fn default() -> Self {
        let networks = [
            ChainId::Mainnet,
            ChainId::Goerli,
            ChainId::Optimism,
            ChainId::Gnosis,
            ChainId::Polygon,
            ChainId::Fantom,
            ChainId::Zkevm,
            ChainId::Base,
            ChainId::ArbitrumOne,
            ChainId::Avalanche,
            ChainId::Sepolia,
        ]
        .into_iter()
        .map(|chain| (u64::from(chain), NetworkAddresses::from(chain)))
        .collect();
        Self { networks }
    }
}

impl AddressBook {
    pub fn from_json(json: &str) -> Result<Self> {
        let overrides: HashMap<u64, NetworkAddresses> =
            serde_json::from_str(json).context("address book is not valid JSON")?;
        let mut book = Self::default();
        book.networks.extend(overrides);
        Ok(book)
    }

    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read address book {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn insert(&mut self, chain_id: u64, addresses: NetworkAddresses) {
        self.networks.insert(chain_id, addresses);
    }

    pub fn network(&self, chain_id: u64) -> Result<&NetworkAddresses, SwapBuilderError> {
        self.networks
            .get(&chain_id)
            .ok_or(SwapBuilderError::UnsupportedChain(chain_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_builtin_networks() {
        let book = AddressBook::default();
        let mainnet = book.network(1).unwrap();
        assert_eq!(mainnet.vault, BALANCER_VAULT);
        assert_eq!(mainnet.lido_relayer, Some(MAINNET_LIDO_RELAYER));

        let polygon = book.network(137).unwrap();
        assert_eq!(polygon.lido_relayer, None);
        assert!(book.network(31337).is_err());
    }

    #[test]
    fn test_json_overrides() -> Result<()> {
        let book = AddressBook::from_json(
            r#"{
                "31337": { "vault": "0x5FbDB2315678afecb367f032d93F642f64180aa3" },
                "137": {
                    "lidoRelayer": "0x0000000000000000000000000000000000000abc",
                    "stETH": "0x0000000000000000000000000000000000000def"
                }
            }"#,
        )?;
        let local = book.network(31337)?;
        assert_eq!(
            local.vault,
            Address::from_str("0x5FbDB2315678afecb367f032d93F642f64180aa3")?
        );
        assert_eq!(local.lido_relayer, None);

        let polygon = book.network(137)?;
        assert_eq!(polygon.vault, BALANCER_VAULT);
        assert!(polygon.steth.is_some());
        Ok(())
    }

    #[test]
    fn test_addresses_builder() -> Result<()> {
        let addresses = NetworkAddressesBuilder::default()
            .lido_relayer(MAINNET_LIDO_RELAYER)
            .build()?;
        assert_eq!(addresses.vault, BALANCER_VAULT);
        assert_eq!(addresses.steth, None);
        Ok(())
    }

    #[test]
    fn test_invalid_json() {
        assert!(AddressBook::from_json("[1, 2").is_err());
    }
}
