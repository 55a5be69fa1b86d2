//! Database layer - connection pool, repositories, result adapter

pub mod adapter;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::*;
