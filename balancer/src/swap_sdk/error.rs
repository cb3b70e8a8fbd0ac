use std::fmt;

/// A builder step that was skipped before assembling attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Funds,
    Limits,
    Deadline,
    Authorization,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MissingField::Funds => "funds",
            MissingField::Limits => "limits",
            MissingField::Deadline => "deadline",
            MissingField::Authorization => "authorization",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SwapBuilderError {
    #[error("Uninitialized arguments: {0} is not set")]
    Uninitialized(MissingField),

    #[error("function fragment `{function}` not found for relayer {relayer}")]
    FragmentNotFound {
        function: &'static str,
        relayer: String,
    },

    #[error("function fragment `{function}` is declared more than once")]
    AmbiguousFragment { function: &'static str },

    #[error("bundled relayer ABI failed to parse: {0}")]
    InvalidAbi(String),

    #[error("route has no swaps")]
    EmptyRoute,

    #[error("no Balancer deployment known for chain id {0}")]
    UnsupportedChain(u64),

    #[error("invalid amount `{0}`")]
    InvalidAmount(String),

    #[error("call data selector {found} does not match `{function}`")]
    SelectorMismatch {
        function: &'static str,
        found: String,
    },

    #[error(transparent)]
    Abi(#[from] alloy::dyn_abi::Error),
}
