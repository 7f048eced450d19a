//! Interactive shell for building and analyzing a cause table
//!
//! Commands add, remove and import causes, adjust the title and threshold,
//! print the analysis, and write charts and reports. A failing command prints
//! its error and the shell keeps running.

pub mod commands;
pub mod repl;

pub use commands::{execute, parse, Command, ReportFormat};
pub use repl::Repl;

use crate::error::Result;
use crate::session::Session;

/// Start the interactive shell over an existing session.
pub fn start(session: Session) -> Result<()> {
    let mut repl = Repl::new(session)?;
    repl.run()
}
