use anyhow::{Context, Result};
use clap::Parser;
use pareto::cli::{Cli, OutputFormat};
use pareto::config::ParetoConfig;
use pareto::csv_output::CsvOutput;
use pareto::json_output::JsonOutput;
use pareto::{shell, text_output, Session};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Configuration file first, then command-line overrides
fn load_config(args: &Cli) -> Result<ParetoConfig> {
    let mut config = match &args.config {
        Some(path) => ParetoConfig::from_file(path)?,
        None => ParetoConfig::default(),
    };

    if let Some(title) = &args.title {
        config.title = title.clone();
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;
    Ok(config)
}

/// Apply imports, then adds, then removes
fn build_session(args: &Cli, config: ParetoConfig) -> Result<Session> {
    let mut session = Session::new(config);

    for path in &args.imports {
        let outcome = session
            .import_file(path)
            .with_context(|| format!("Failed to import {}", path.display()))?;
        eprintln!(
            "[pareto: imported {} cause(s) from {}, {} duplicate(s) skipped]",
            outcome.added,
            path.display(),
            outcome.skipped
        );
    }

    for (name, occurrence) in &args.adds {
        session
            .add(name, *occurrence)
            .with_context(|| format!("Failed to add cause '{}'", name))?;
    }

    for name in &args.removes {
        if session.remove(name) == 0 {
            eprintln!("[pareto: no cause named '{}' to remove]", name);
        }
    }

    Ok(session)
}

fn print_table(session: &Session, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::None {
        return Ok(());
    }

    let analysis = session.analysis()?;
    match format {
        OutputFormat::Text => print!("{}", text_output::render_table(&analysis, session.title())),
        OutputFormat::Json => println!("{}", JsonOutput::new(&analysis, session.title()).to_json()?),
        OutputFormat::Csv => print!("{}", CsvOutput::new(&analysis, true).to_csv()?),
        OutputFormat::None => {}
    }
    Ok(())
}

fn write_outputs(session: &Session, args: &Cli) -> Result<()> {
    if let Some(path) = &args.chart {
        session.export_chart(path)?;
        eprintln!("[pareto: chart written to {}]", path.display());
    }
    if let Some(path) = &args.top_chart {
        session.export_top_chart(path)?;
        eprintln!("[pareto: top-causes chart written to {}]", path.display());
    }
    if let Some(path) = &args.xlsx {
        session.export_spreadsheet(Some(path))?;
        eprintln!("[pareto: spreadsheet written to {}]", path.display());
    }
    if let Some(path) = &args.docx {
        session.export_document(Some(path))?;
        eprintln!("[pareto: report written to {}]", path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = load_config(&args)?;
    let mut session = build_session(&args, config)?;

    if let Some(line) = &args.shell_command {
        let cmd = shell::parse(line)?;
        let output = shell::execute(&cmd, &mut session)?;
        if !output.is_empty() {
            println!("{}", output);
        }
        return Ok(());
    }

    if args.interactive {
        shell::start(session)?;
        return Ok(());
    }

    if session.dataset().is_empty() {
        eprintln!("[pareto: no causes added; nothing to analyze]");
        return Ok(());
    }

    print_table(&session, args.format)?;
    write_outputs(&session, &args)?;
    Ok(())
}
