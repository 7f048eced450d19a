//! REPL (Read-Eval-Print Loop) implementation.

use super::commands::{execute, parse, Command};
use crate::error::{ParetoError, Result};
use crate::session::Session;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Interactive shell over a [`Session`].
pub struct Repl {
    editor: DefaultEditor,
    session: Session,
    history_path: Option<PathBuf>,
}

impl Repl {
    pub fn new(session: Session) -> Result<Self> {
        let editor = DefaultEditor::new()
            .map_err(|e| ParetoError::Io(std::io::Error::other(e.to_string())))?;

        let history_path = dirs::data_dir().map(|p| p.join("pareto").join("shell_history"));

        let mut repl = Self {
            editor,
            session,
            history_path,
        };

        if let Some(ref path) = repl.history_path {
            let _ = repl.editor.load_history(path);
        }

        Ok(repl)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run until `quit` or end of input; command errors never end the loop
    pub fn run(&mut self) -> Result<()> {
        self.print_banner();

        loop {
            let prompt = self.format_prompt();

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(line);

                    match parse(line) {
                        Ok(Command::Quit) => {
                            println!("Goodbye!");
                            break;
                        }
                        Ok(cmd) => match execute(&cmd, &mut self.session) {
                            Ok(output) => {
                                if !output.is_empty() {
                                    println!("{}", output);
                                }
                            }
                            Err(e) => println!("Error: {}", e),
                        },
                        Err(e) => println!("Error: {}", e),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Use 'quit' or Ctrl-D to exit");
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    println!("Error: {}", e);
                    break;
                }
            }
        }

        self.save_history();
        Ok(())
    }

    fn print_banner(&self) {
        println!("Pareto shell v{}", env!("CARGO_PKG_VERSION"));
        println!("Analysis: {}", self.session.title());
        println!("Type 'help' for commands, 'quit' to exit.\n");
    }

    fn format_prompt(&self) -> String {
        let count = self.session.dataset().len();
        if count > 0 {
            format!("pareto ({} causes)> ", count)
        } else {
            "pareto> ".to_string()
        }
    }

    fn save_history(&mut self) {
        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = self.editor.save_history(path);
        }
    }
}
