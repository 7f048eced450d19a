//! Command parsing and execution for the interactive shell

use crate::error::{ParetoError, Result};
use crate::session::Session;
use crate::text_output;
use std::path::PathBuf;

/// Report format for `export`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Spreadsheet,
    Document,
}

/// A parsed command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Add a cause
    Add { name: String, occurrence: f64 },
    /// Remove a cause by exact name
    Remove { name: String },
    /// Import causes from a CSV or spreadsheet file
    Import { path: PathBuf },
    /// Change the analysis title
    Title { title: String },
    /// Change the cumulative-share threshold
    Threshold { value: f64 },
    /// Print the ranked table
    Show,
    /// Print the top causes
    Top,
    /// Print the summary figures
    Summary,
    /// Write a chart PNG
    Chart { path: PathBuf, top_only: bool },
    /// Write a report
    Export {
        format: ReportFormat,
        path: Option<PathBuf>,
    },
    /// Remove every cause
    Clear,
    /// Show help
    Help,
    /// Quit the shell
    Quit,
    /// Unknown command
    Unknown { input: String },
}

fn usage(message: &str, usage: &str) -> ParetoError {
    ParetoError::validation(format!("{} (usage: {})", message, usage))
}

/// Parse a command string into a Command.
pub fn parse(input: &str) -> Result<Command> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Command::Unknown {
            input: String::new(),
        });
    }

    // Names and paths keep their inner spacing, so only the command word is split off
    let (cmd, rest) = input
        .split_once(char::is_whitespace)
        .map(|(cmd, rest)| (cmd, rest.trim()))
        .unwrap_or((input, ""));
    let cmd = cmd.to_lowercase();
    let args: Vec<&str> = rest.split_whitespace().collect();

    match cmd.as_str() {
        "add" => parse_add(rest),
        "remove" | "delete" | "rm" => parse_remove(rest),
        "import" | "load" => parse_path(rest, "import <file.csv|file.xlsx>")
            .map(|path| Command::Import { path }),
        "title" => parse_title(rest),
        "threshold" => parse_threshold(&args),
        "show" | "table" | "ls" => Ok(Command::Show),
        "top" => Ok(Command::Top),
        "summary" => Ok(Command::Summary),
        "chart" => parse_path(rest, "chart <file.png>").map(|path| Command::Chart {
            path,
            top_only: false,
        }),
        "top-chart" => parse_path(rest, "top-chart <file.png>").map(|path| Command::Chart {
            path,
            top_only: true,
        }),
        "export" | "save" => parse_export(rest),
        "clear" => Ok(Command::Clear),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => Ok(Command::Unknown {
            input: input.to_string(),
        }),
    }
}

/// `add <name...> <occurrence>`: the last word is the occurrence
fn parse_add(rest: &str) -> Result<Command> {
    if rest.is_empty() {
        return Err(usage("missing cause and occurrence", "add <name> <occurrence>"));
    }
    let Some((name, occurrence)) = rest.rsplit_once(char::is_whitespace) else {
        return Err(usage("missing cause name", "add <name> <occurrence>"));
    };

    let occurrence: f64 = occurrence.parse().map_err(|_| {
        ParetoError::validation(format!("occurrence '{}' is not a number", occurrence))
    })?;

    Ok(Command::Add {
        name: name.trim().to_string(),
        occurrence,
    })
}

fn parse_remove(rest: &str) -> Result<Command> {
    if rest.is_empty() {
        return Err(usage("missing cause name", "remove <name>"));
    }
    Ok(Command::Remove {
        name: rest.to_string(),
    })
}

fn parse_path(rest: &str, usage_text: &str) -> Result<PathBuf> {
    if rest.is_empty() {
        return Err(usage("missing file path", usage_text));
    }
    Ok(PathBuf::from(rest))
}

fn parse_title(rest: &str) -> Result<Command> {
    if rest.is_empty() {
        return Err(usage("missing title", "title <text>"));
    }
    Ok(Command::Title {
        title: rest.to_string(),
    })
}

fn parse_threshold(args: &[&str]) -> Result<Command> {
    let Some(raw) = args.first() else {
        return Err(usage("missing value", "threshold <0-1 or percent>"));
    };
    let percent = raw.ends_with('%');
    let number = raw.trim_end_matches('%');
    let mut value: f64 = number
        .parse()
        .map_err(|_| ParetoError::validation(format!("threshold '{}' is not a number", raw)))?;
    // "80%" and "80" are percentages; values in (1, 2) stay as given and are rejected later
    if percent || value >= 2.0 {
        value /= 100.0;
    }
    Ok(Command::Threshold { value })
}

fn parse_export(rest: &str) -> Result<Command> {
    let (format, path) = rest
        .split_once(char::is_whitespace)
        .map(|(format, path)| (format, path.trim()))
        .unwrap_or((rest, ""));
    if format.is_empty() {
        return Err(usage("missing format", "export <xlsx|docx> [path]"));
    }
    let format = match format.to_lowercase().as_str() {
        "xlsx" | "excel" | "spreadsheet" => ReportFormat::Spreadsheet,
        "docx" | "word" | "document" | "report" => ReportFormat::Document,
        other => {
            return Err(usage(
                &format!("unknown export format '{}'", other),
                "export <xlsx|docx> [path]",
            ))
        }
    };
    let path = (!path.is_empty()).then(|| PathBuf::from(path));
    Ok(Command::Export { format, path })
}

/// Execute a command and update the session.
pub fn execute(cmd: &Command, session: &mut Session) -> Result<String> {
    tracing::debug!(command = ?cmd, "executing shell command");

    match cmd {
        Command::Add { name, occurrence } => {
            session.add(name, *occurrence)?;
            Ok(format!("Added '{}' ({})", name.trim(), occurrence))
        }
        Command::Remove { name } => {
            let removed = session.remove(name);
            if removed == 0 {
                Ok(format!("No cause named '{}'", name))
            } else {
                Ok(format!("Removed '{}'", name))
            }
        }
        Command::Import { path } => {
            let outcome = session.import_file(path)?;
            Ok(format!(
                "Imported {} cause(s) from {} ({} duplicate(s) skipped)",
                outcome.added,
                path.display(),
                outcome.skipped
            ))
        }
        Command::Title { title } => {
            session.set_title(title)?;
            Ok(format!("Title set to '{}'", session.title()))
        }
        Command::Threshold { value } => {
            session.set_threshold(*value)?;
            Ok(format!("Threshold set to {:.1}%", value * 100.0))
        }
        Command::Show => {
            let analysis = session.analysis()?;
            Ok(text_output::render_table(&analysis, session.title()))
        }
        Command::Top => {
            let analysis = session.analysis()?;
            Ok(text_output::render_top(&analysis))
        }
        Command::Summary => {
            let analysis = session.analysis()?;
            Ok(text_output::render_summary(&analysis))
        }
        Command::Chart { path, top_only } => {
            if *top_only {
                session.export_top_chart(path)?;
            } else {
                session.export_chart(path)?;
            }
            Ok(format!("Chart written to {}", path.display()))
        }
        Command::Export { format, path } => {
            let written = match format {
                ReportFormat::Spreadsheet => session.export_spreadsheet(path.as_deref())?,
                ReportFormat::Document => session.export_document(path.as_deref())?,
            };
            Ok(format!("Report written to {}", written.display()))
        }
        Command::Clear => {
            session.clear();
            Ok("All causes removed".to_string())
        }
        Command::Help => Ok(HELP.to_string()),
        Command::Quit => Ok("Goodbye!".to_string()),
        Command::Unknown { input } => {
            if input.is_empty() {
                Ok(String::new())
            } else {
                Err(ParetoError::validation(format!(
                    "unknown command '{}'; type 'help' for available commands",
                    input
                )))
            }
        }
    }
}

const HELP: &str = "\
Commands:
  add <name> <occurrence>      Add a cause (occurrence >= 0)
  remove <name>                Remove a cause (exact name)
  import <file>                Import Cause/Occurrence columns from .csv or .xlsx
  title <text>                 Set the analysis title
  threshold <value>            Set the top-cause threshold (0.8 or 80%)
  show                         Ranked table with shares
  top                          Top causes only
  summary                      Cause count, top causes and coverage
  chart <file.png>             Write the full Pareto chart
  top-chart <file.png>         Write the top-causes chart
  export xlsx [path]           Write the spreadsheet report
  export docx [path]           Write the document report
  clear                        Remove every cause
  help                         Show this help
  quit                         Leave the shell";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParetoConfig;

    #[test]
    fn test_parse_add_multiword_name() {
        let cmd = parse("add Late delivery 12.5").unwrap();
        assert_eq!(
            cmd,
            Command::Add {
                name: "Late delivery".to_string(),
                occurrence: 12.5
            }
        );
    }

    #[test]
    fn test_parse_add_errors() {
        assert!(parse("add").is_err());
        assert!(parse("add 5").is_err());
        let err = parse("add Jam lots").unwrap_err();
        assert!(err.to_string().contains("not a number"));
    }

    #[test]
    fn test_parse_remove_and_aliases() {
        assert_eq!(
            parse("rm Wrong part").unwrap(),
            Command::Remove {
                name: "Wrong part".to_string()
            }
        );
        assert_eq!(parse("exit").unwrap(), Command::Quit);
        assert_eq!(parse("?").unwrap(), Command::Help);
    }

    #[test]
    fn test_parse_threshold_percent() {
        assert_eq!(parse("threshold 80%").unwrap(), Command::Threshold { value: 0.8 });
        assert_eq!(parse("threshold 0.7").unwrap(), Command::Threshold { value: 0.7 });
    }

    #[test]
    fn test_parse_keeps_inner_spacing() {
        assert_eq!(
            parse("add Late  delivery   3").unwrap(),
            Command::Add {
                name: "Late  delivery".to_string(),
                occurrence: 3.0
            }
        );
        assert_eq!(
            parse("remove Late  delivery").unwrap(),
            Command::Remove {
                name: "Late  delivery".to_string()
            }
        );
    }

    #[test]
    fn test_remove_imported_name_with_double_space() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("causes.csv");
        std::fs::write(&path, "Cause,Occurrence\nLate  delivery,3\nJam,1\n").unwrap();

        let mut session = Session::new(ParetoConfig::default());
        session.import_file(&path).unwrap();

        let out = execute(&parse("remove Late  delivery").unwrap(), &mut session).unwrap();
        assert_eq!(out, "Removed 'Late  delivery'");
        assert_eq!(session.dataset().len(), 1);
        assert_eq!(session.dataset().records()[0].name, "Jam");
    }

    #[test]
    fn test_parse_threshold_between_one_and_two_is_rejected() {
        assert_eq!(parse("threshold 1.5").unwrap(), Command::Threshold { value: 1.5 });
        assert_eq!(parse("threshold 1.5%").unwrap(), Command::Threshold { value: 0.015 });

        let mut session = Session::new(ParetoConfig::default());
        assert!(execute(&parse("threshold 1.5").unwrap(), &mut session).is_err());
        assert_eq!(session.config().threshold, 0.8);
    }

    #[test]
    fn test_parse_export() {
        assert_eq!(
            parse("export xlsx out.xlsx").unwrap(),
            Command::Export {
                format: ReportFormat::Spreadsheet,
                path: Some(PathBuf::from("out.xlsx"))
            }
        );
        assert_eq!(
            parse("export word").unwrap(),
            Command::Export {
                format: ReportFormat::Document,
                path: None
            }
        );
        assert!(parse("export pdf").is_err());
    }

    #[test]
    fn test_parse_unknown_and_empty() {
        assert_eq!(
            parse("frobnicate").unwrap(),
            Command::Unknown {
                input: "frobnicate".to_string()
            }
        );
        assert_eq!(
            parse("   ").unwrap(),
            Command::Unknown {
                input: String::new()
            }
        );
    }

    #[test]
    fn test_execute_add_duplicate_keeps_session_usable() {
        let mut session = Session::new(ParetoConfig::default());
        execute(&parse("add Jam 5").unwrap(), &mut session).unwrap();
        let err = execute(&parse("add JAM 3").unwrap(), &mut session).unwrap_err();
        assert!(err.to_string().contains("already exists"));

        execute(&parse("add Leak 2").unwrap(), &mut session).unwrap();
        assert_eq!(session.dataset().len(), 2);
    }

    #[test]
    fn test_execute_show_on_empty_fails() {
        let mut session = Session::new(ParetoConfig::default());
        let err = execute(&Command::Show, &mut session).unwrap_err();
        assert!(matches!(err, ParetoError::EmptyDataset));
    }

    #[test]
    fn test_execute_remove_absent() {
        let mut session = Session::new(ParetoConfig::default());
        let out = execute(&parse("remove Ghost").unwrap(), &mut session).unwrap();
        assert_eq!(out, "No cause named 'Ghost'");
    }

    #[test]
    fn test_execute_summary() {
        let mut session = Session::new(ParetoConfig::default());
        for line in ["add A 50", "add B 30", "add C 15", "add D 5"] {
            execute(&parse(line).unwrap(), &mut session).unwrap();
        }
        let out = execute(&Command::Summary, &mut session).unwrap();
        assert!(out.contains("Top causes: 2"));
        assert!(out.contains("80.0%"));
    }

    #[test]
    fn test_execute_unknown_is_error() {
        let mut session = Session::new(ParetoConfig::default());
        assert!(execute(&parse("dance").unwrap(), &mut session).is_err());
        assert_eq!(
            execute(&parse("").unwrap(), &mut session).unwrap(),
            String::new()
        );
    }
}
