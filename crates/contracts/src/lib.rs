//! Wire types shared between the web client and the household finance backend.
//!
//! Field names follow the backend's JSON exactly (several of them are
//! Vietnamese labels), so most structs carry explicit `serde(rename)`s.

pub mod dashboards;
pub mod domain;
pub mod shared;
