use std::sync::OnceLock;

use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::Address;
use tracing::debug;

use super::error::SwapBuilderError;
use crate::core_sdk::address_book::AddressBook;

const VAULT_ABI: &str = include_str!("../abi/balancer_vault.json");
const LIDO_RELAYER_ABI: &str = include_str!("../abi/lido_relayer.json");

/// Entry points the swap builders may target.
pub const SWAP_FUNCTIONS: [&str; 4] = ["swap", "batchSwap", "rwaSwap", "rwaBatchSwap"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relayers {
    Vault = 1,
    Lido = 2,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRelayer {
    pub id: Relayers,
    pub address: Address,
}

/// Picks the contract a swap between `asset_in` and `asset_out` must go
/// through. stETH is only tradable via the Lido relayer; everything else
/// goes straight to the vault.
pub fn relayer_resolver(
    asset_in: Address,
    asset_out: Address,
    chain_id: u64,
    address_book: &AddressBook,
) -> Result<SwapRelayer, SwapBuilderError> {
    let network = address_book.network(chain_id)?;
    let mut relayer = SwapRelayer {
        id: Relayers::Vault,
        address: network.vault,
    };
    if let (Some(steth), Some(lido_relayer)) = (network.steth, network.lido_relayer) {
        if asset_in == steth || asset_out == steth {
            relayer = SwapRelayer {
                id: Relayers::Lido,
                address: lido_relayer,
            };
        }
    }
    debug!(chain_id, relayer = ?relayer.id, address = %relayer.address, "resolved swap relayer");
    Ok(relayer)
}

fn parse_abi(source: &str) -> Result<JsonAbi, String> {
    serde_json::from_str(source).map_err(|e| e.to_string())
}

fn relayer_abi(id: Relayers) -> Result<&'static JsonAbi, SwapBuilderError> {
    static VAULT: OnceLock<Result<JsonAbi, String>> = OnceLock::new();
    static LIDO: OnceLock<Result<JsonAbi, String>> = OnceLock::new();

    let parsed = match id {
        Relayers::Vault => VAULT.get_or_init(|| parse_abi(VAULT_ABI)),
        Relayers::Lido => LIDO.get_or_init(|| parse_abi(LIDO_RELAYER_ABI)),
    };
    parsed
        .as_ref()
        .map_err(|e| SwapBuilderError::InvalidAbi(e.clone()))
}

/// Swap entry points declared by the relayer's ABI.
pub fn swap_fragment(relayer: &SwapRelayer) -> Result<Vec<Function>, SwapBuilderError> {
    let abi = relayer_abi(relayer.id)?;
    Ok(abi
        .functions()
        .filter(|f| SWAP_FUNCTIONS.contains(&f.name.as_str()))
        .cloned()
        .collect())
}

/// The one fragment named `function` in the relayer's swap table.
pub fn find_fragment(
    relayer: &SwapRelayer,
    function: &'static str,
) -> Result<Function, SwapBuilderError> {
    let mut matches = swap_fragment(relayer)?
        .into_iter()
        .filter(|f| f.name == function);
    let fragment = matches
        .next()
        .ok_or_else(|| SwapBuilderError::FragmentNotFound {
            function,
            relayer: relayer.address.to_string(),
        })?;
    if matches.next().is_some() {
        return Err(SwapBuilderError::AmbiguousFragment { function });
    }
    Ok(fragment)
}
