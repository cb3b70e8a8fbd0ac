pub mod address_book;
pub mod chain;
pub mod currency;
