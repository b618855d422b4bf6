//! Backlog ledger: the task engine behind agent documentation skills.
//!
//! Skills record review findings as tasks in human-editable markdown
//! backlogs, attach proposed options, approve a resolution and archive
//! finished work to a history section. This crate owns the document
//! grammar, the task lifecycle and the load and save cycle around it.
//!
//! # Architecture
//!
//! The backlog follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (filesystem, memory)
//!
//! # Modules
//!
//! - [`backlog`]: Document grammar, task lifecycle and persistence
//! - [`command`]: Text command surface used by agent skills
//! - [`config`]: Runtime configuration

pub mod backlog;
pub mod command;
pub mod config;
