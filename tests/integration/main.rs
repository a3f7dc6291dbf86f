//! Integration tests
//!
//! - `protocol_test` - Chat session scenarios across several clients
//! - `store_test` - Room store atomicity (PostgreSQL cases are `#[ignore]`d)
//! - `registry_test` - Identity and room group bookkeeping
//! - `routes_test` - REST surface through the router

#[macro_use]
#[path = "../common/mod.rs"]
mod common;

mod registry_test;
mod routes_test;
mod store_test;
