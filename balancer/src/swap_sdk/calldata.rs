use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::hex;
use alloy::json_abi::Function;
use alloy::primitives::Bytes;
use tracing::{debug, warn};

use super::error::SwapBuilderError;

/// Encodes `values` as the positional arguments of `fragment`, selector
/// included. Type or arity mismatches come back from the ABI encoder as is.
pub fn encode_call(fragment: &Function, values: &[DynSolValue]) -> Result<Bytes, SwapBuilderError> {
    if values.len() != fragment.inputs.len() {
        warn!(
            function = %fragment.name,
            declared = fragment.inputs.len(),
            supplied = values.len(),
            "argument count does not match the fragment"
        );
    }
    let data = fragment.abi_encode_input(values)?;
    debug!(function = %fragment.name, bytes = data.len(), "encoded swap call data");
    Ok(Bytes::from(data))
}

/// Decodes call data produced by [`encode_call`] back into its arguments.
pub fn decode_call(
    fragment: &Function,
    function: &'static str,
    data: &[u8],
) -> Result<Vec<DynSolValue>, SwapBuilderError> {
    let selector = fragment.selector();
    if data.len() < 4 || data[..4] != selector[..] {
        let found = hex::encode_prefixed(&data[..data.len().min(4)]);
        return Err(SwapBuilderError::SelectorMismatch { function, found });
    }
    Ok(fragment.abi_decode_input(&data[4..], true)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, U256};

    fn transfer() -> Function {
        Function::parse("function transfer(address to, uint256 amount)").unwrap()
    }

    #[test]
    fn test_encode_then_decode() {
        let fragment = transfer();
        let values = vec![
            DynSolValue::Address(Address::repeat_byte(0x11)),
            DynSolValue::Uint(U256::from(42u64), 256),
        ];
        let data = encode_call(&fragment, &values).unwrap();
        assert_eq!(hex::encode(&data[..4]), "a9059cbb");
        assert_eq!(decode_call(&fragment, "transfer", &data).unwrap(), values);
    }

    #[test]
    fn test_type_mismatch_propagates() {
        let values = vec![
            DynSolValue::Bool(true),
            DynSolValue::Uint(U256::from(42u64), 256),
        ];
        let err = encode_call(&transfer(), &values).unwrap_err();
        assert!(matches!(err, SwapBuilderError::Abi(_)));
    }

    #[test]
    fn test_wrong_selector() {
        let err = decode_call(&transfer(), "transfer", &[0xde, 0xad]).unwrap_err();
        assert!(matches!(err, SwapBuilderError::SelectorMismatch { .. }));
    }
}
