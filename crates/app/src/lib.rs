//! Shared application domain and persistence modules.

pub mod context;
pub mod database;
pub mod domain;
pub mod storage;

#[cfg(test)]
mod test;

pub mod uuids;
