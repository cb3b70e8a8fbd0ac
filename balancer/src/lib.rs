pub mod core_sdk;
pub mod prelude;
pub mod swap_sdk;

#[cfg(test)]
pub(crate) mod test_support;
