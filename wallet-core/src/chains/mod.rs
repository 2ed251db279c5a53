// wallet-core/src/chains/mod.rs

//! Address, transaction và signing theo từng chain.

pub mod qos;
