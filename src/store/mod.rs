//! Record store module for persisted users, leads and submissions

mod client;
mod traits;

pub use client::FileStore;
pub use traits::StoreClientTrait;

#[cfg(test)]
pub use traits::MockStoreClientTrait;
