use clap::{Parser, ValueEnum};
use entity_renderer::{EntityRenderError, EntityRenderer, Message, RenderOptions};
use miette::{IntoDiagnostic, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

mod config;
mod telemetry;

#[derive(Parser)]
#[command(version, about = "Render chat message entities as nested HTML", long_about = None)]
struct Cli {
    /// Message JSON (`text` + `entities`); reads stdin when omitted or `-`
    input: Option<PathBuf>,

    /// KDL file with render options
    #[arg(long, env = "ENTITY_RENDER_CONFIG")]
    config: Option<PathBuf>,

    /// What to print
    #[arg(long, value_enum, default_value_t = Format::Markup)]
    format: Format,

    /// Only render links that carry an explicit url
    #[arg(long)]
    prefer_explicit_url: bool,

    /// Log render issues at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Rendered HTML only
    Markup,
    /// Annotation listing and markup, escaped inside <pre>
    Preview,
    /// Markup, preview and issues as JSON
    Json,
}

fn main() -> Result<()> {
    init_miette();

    let cli = Cli::parse();
    telemetry::init(telemetry::TelemetryConfig::from_env().verbose(cli.verbose));

    let mut options = match &cli.config {
        Some(path) => config::load_options(path)?,
        None => RenderOptions::default(),
    };
    if cli.prefer_explicit_url {
        options.prefer_explicit_url = true;
    }

    let input = read_input(cli.input.as_deref())?;
    let message = Message::from_json(&input)?;
    let renderer = EntityRenderer::from_message(&message, &options);

    for issue in renderer.issues() {
        tracing::info!(index = issue.index(), "{issue}");
    }

    match cli.format {
        Format::Markup => println!("{}", renderer.markup()),
        Format::Preview => println!("{}", renderer.preview()),
        Format::Json => {
            let json = serde_json::to_string_pretty(&renderer.into_result()).into_diagnostic()?;
            println!("{json}");
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String, EntityRenderError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn init_miette() {
    // Only fails if a hook is already installed, in which case that one wins
    let _ = miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }));
    miette::set_panic_hook();
}
