pub mod batch_swap_builder;
pub mod calldata;
pub mod error;
pub mod limits;
pub mod relayer;
pub mod rwa_batch_swap_builder;
pub mod rwa_single_swap_builder;
pub mod single_swap_builder;
pub mod structs;
pub mod swap_core;
pub mod swap_info;

pub use batch_swap_builder::BatchSwapBuilder;
pub use rwa_batch_swap_builder::RwaBatchSwapBuilder;
pub use rwa_single_swap_builder::RwaSingleSwapBuilder;
pub use single_swap_builder::SingleSwapBuilder;
pub use structs::{FundManagement, RwaAuthorization};
pub use swap_core::{deadline_after, BuilderState};
pub use swap_info::{SwapInfo, SwapType};
