//! Backlog ledger: persistent, human-editable task documents.
//!
//! A backlog is a markdown document of numbered tasks, each with a
//! description and either a list of proposed options or an approved
//! resolution, followed by a history of archived tasks. Skills load a
//! backlog, apply one lifecycle operation and save it back. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Document grammar in [`grammar`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod grammar;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
