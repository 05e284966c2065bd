pub mod filter;
pub mod load;
pub mod mutation;
pub mod store;
