//! Text command surface used by agent skills.
//!
//! Skills invoke the backlog with a single line such as
//! `approveResolution specs taskId: 3 resolution: Patch token refresh`.
//! [`BacklogCommand::parse`] turns that text into a typed command and
//! [`execute`] runs it, returning the operation result as JSON.

mod error;
mod executor;
pub mod params;
mod parser;

pub use error::CommandError;
pub use executor::execute;
pub use parser::BacklogCommand;
