//! `richmark`: renders a markdown file as styled terminal text.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use richmark::{parse, parse_with_max_depth, Color, OutputMode, RenderConfig, Renderer, StyleRule};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "richmark",
    version,
    about = "Render markdown with cascading font, weight and color attributes"
)]
struct Cli {
    /// Markdown file to render; reads stdin when omitted or `-`
    file: Option<PathBuf>,

    /// YAML file with base attributes and style rules
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Base font family (overrides the config file)
    #[arg(long)]
    family: Option<String>,

    /// Base font size (overrides the config file)
    #[arg(long)]
    size: Option<f32>,

    /// Base color: a name such as `black` or `#rrggbb` (overrides the config file)
    #[arg(long)]
    color: Option<Color>,

    /// Output mode
    #[arg(long, value_enum, default_value_t = Output::Auto)]
    output: Output,

    /// Reject documents nested deeper than this
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Log debug events to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    Auto,
    Term,
    Text,
    TermDebug,
    Json,
}

impl From<Output> for OutputMode {
    fn from(output: Output) -> Self {
        match output {
            Output::Auto => OutputMode::Auto,
            Output::Term => OutputMode::Term,
            Output::Text => OutputMode::Text,
            Output::TermDebug => OutputMode::TermDebug,
            Output::Json => OutputMode::Json,
        }
    }
}

impl Cli {
    /// Base attribute overrides given on the command line.
    fn base_overrides(&self) -> StyleRule {
        StyleRule {
            family: self.family.clone(),
            size: self.size,
            bold: None,
            color: self.color,
        }
    }

    fn load_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::from_path(path)?,
            None => RenderConfig::default(),
        };
        self.base_overrides().apply_to(&mut config.base);
        Ok(config)
    }

    fn read_source(&self) -> Result<String> {
        match &self.file {
            Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
                .with_context(|| format!("failed to read '{}'", path.display())),
            _ => {
                let mut source = String::new();
                io::stdin()
                    .read_to_string(&mut source)
                    .context("failed to read stdin")?;
                Ok(source)
            }
        }
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = cli.load_config()?;
    tracing::debug!(
        family = %config.base.family,
        size = config.base.size,
        color = %config.base.color,
        "resolved base attributes"
    );
    let source = cli.read_source()?;

    let renderer = Renderer::new(&config.stylesheet);
    let (document, renderer) = match cli.max_depth {
        Some(limit) => (
            parse_with_max_depth(&source, limit)?,
            renderer.with_max_depth(limit),
        ),
        None => (parse(&source)?, renderer),
    };
    let text = renderer.render_document(&document, &config.base)?;

    let formatted = OutputMode::from(cli.output)
        .format(&text)
        .context("failed to format output")?;
    writeln!(out, "{}", formatted)?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!(
                "{} {:#}",
                console::style("error:").for_stderr().red().bold(),
                err
            );
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn markdown_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    fn run_to_string(cli: &Cli) -> Result<String> {
        let mut out = Vec::new();
        run(cli, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["richmark"]).unwrap();
        assert_eq!(cli.file, None);
        assert_eq!(cli.output, Output::Auto);
        assert!(cli.base_overrides().is_empty());
    }

    #[test]
    fn test_parse_overrides() {
        let cli = Cli::try_parse_from([
            "richmark",
            "doc.md",
            "--family",
            "Menlo",
            "--size",
            "18",
            "--color",
            "#00ff00",
            "--output",
            "term-debug",
        ])
        .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("doc.md")));
        assert_eq!(cli.output, Output::TermDebug);
        assert_eq!(
            cli.base_overrides(),
            StyleRule::new()
                .family("Menlo")
                .size(18.0)
                .color(Color::Rgb(0, 255, 0))
        );
    }

    #[test]
    fn test_parse_rejects_bad_color() {
        assert!(Cli::try_parse_from(["richmark", "--color", "mauve"]).is_err());
    }

    #[test]
    fn test_run_text_output() {
        let file = markdown_file("# Title\n\nHello **world**\n");
        let cli = Cli::try_parse_from([
            "richmark",
            file.path().to_str().unwrap(),
            "--output",
            "text",
        ])
        .unwrap();

        assert_eq!(run_to_string(&cli).unwrap(), "Title\nHello world\n");
    }

    #[test]
    fn test_run_debug_output_with_overrides() {
        let file = markdown_file("Hello **world**");
        let cli = Cli::try_parse_from([
            "richmark",
            file.path().to_str().unwrap(),
            "--family",
            "F",
            "--output",
            "term-debug",
        ])
        .unwrap();

        assert_eq!(
            run_to_string(&cli).unwrap(),
            "[F/24/black]Hello [/][F/24/bold/red]world[/]\n"
        );
    }

    #[test]
    fn test_run_uses_config_file() {
        let config = markdown_file("base:\n  family: Menlo\nrules:\n  heading:\n    size: 30\n");
        let file = markdown_file("# Big");
        let cli = Cli::try_parse_from([
            "richmark",
            file.path().to_str().unwrap(),
            "--config",
            config.path().to_str().unwrap(),
            "--output",
            "term-debug",
        ])
        .unwrap();

        assert_eq!(run_to_string(&cli).unwrap(), "[Menlo/30/black]Big[/]\n");
    }

    #[test]
    fn test_run_rejects_unsupported_node() {
        let file = markdown_file("> quoted\n");
        let cli = Cli::try_parse_from([
            "richmark",
            file.path().to_str().unwrap(),
            "--output",
            "text",
        ])
        .unwrap();

        let err = run_to_string(&cli).unwrap_err();
        assert!(err.to_string().contains("block quote"));
    }

    #[test]
    fn test_run_depth_limit() {
        let file = markdown_file("**a**");
        let cli = Cli::try_parse_from([
            "richmark",
            file.path().to_str().unwrap(),
            "--max-depth",
            "2",
            "--output",
            "text",
        ])
        .unwrap();

        let err = run_to_string(&cli).unwrap_err();
        assert!(err.to_string().contains("depth limit"));
    }

    #[test]
    fn test_run_depth_limit_stops_deeply_nested_source() {
        let nesting = "**".repeat(20_000);
        let file = markdown_file(&format!("{}a{}", nesting, nesting));
        let cli = Cli::try_parse_from([
            "richmark",
            file.path().to_str().unwrap(),
            "--max-depth",
            "64",
            "--output",
            "text",
        ])
        .unwrap();

        let err = run_to_string(&cli).unwrap_err();
        assert!(err.to_string().contains("depth limit of 64"));
    }

    #[test]
    fn test_run_missing_file() {
        let cli = Cli::try_parse_from(["richmark", "/nonexistent/doc.md"]).unwrap();
        let err = run_to_string(&cli).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/doc.md"));
    }
}
