//! PostgreSQL integration test support

mod context;
mod db;
mod helpers;

pub(crate) use context::TestContext;
