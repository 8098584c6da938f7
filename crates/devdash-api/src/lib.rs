//! # devdash-api
//!
//! Read-only HTTP surface over the devcontainer lister.
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/v1` | `"OK"` |
//! | GET | `/v1/devcontainers` | array of devcontainer records |
//! | GET | `/v1/devcontainers/{id}` | one record, or 404 |

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use routes::{router, serve};
pub use state::AppState;
