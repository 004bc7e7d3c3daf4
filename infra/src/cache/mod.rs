//! Redis cache implementations
//!
//! `RedisClient` wraps the multiplexed connection with retry and
//! backoff; `RedisRevocationStore` builds the revocation keyspace on
//! top of it.

pub mod redis_client;
pub mod revocation_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationStore;
