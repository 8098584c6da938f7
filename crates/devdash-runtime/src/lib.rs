//! Devcontainer discovery through the local container runtime.
//!
//! [`client`] owns the process boundary, [`normalize`] turns runtime output
//! into canonical JSON objects, and [`lister`] applies label shortening and
//! schema validation on top.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod client;
pub mod lister;
pub mod normalize;
