//! Command-line arguments and the conversion run.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pojo2ts::codegen::config::{DEFAULT_MAX_DEPTH, DEFAULT_REMARK_ANNOTATION};
use pojo2ts::codegen::{
    Converter, FileSink, Generator, GeneratorConfig, Notification, NotificationLevel, Notifier,
    Selection, StdoutSink,
};
use pojo2ts::schema::{SourcePosition, parse_model_file, validate_model};

/// Generate TypeScript interfaces from a Java class model
#[derive(Parser, Debug)]
#[command(name = "pojo2ts")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Class model document (XML)
    #[arg(short, long)]
    pub model: PathBuf,

    /// Root class, by qualified or unambiguous simple name
    #[arg(short, long, conflicts_with_all = ["file", "line"], required_unless_present = "file")]
    pub class: Option<String>,

    /// Source file containing the caret
    #[arg(long, requires = "line")]
    pub file: Option<PathBuf>,

    /// 1-based caret line in --file
    #[arg(long, requires = "file")]
    pub line: Option<usize>,

    /// Write the interfaces to this file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Maximum type resolution depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Annotation whose value becomes the field remark
    #[arg(long, default_value = DEFAULT_REMARK_ANNOTATION)]
    pub remark_annotation: String,

    /// Additional field name to skip (repeatable)
    #[arg(long = "ignore-field", value_name = "NAME")]
    pub ignore_fields: Vec<String>,

    /// Validate the class model before generating
    #[arg(long)]
    pub validate: bool,
}

impl Cli {
    /// Returns what to convert.
    pub fn selection(&self) -> anyhow::Result<Selection> {
        match (&self.class, &self.file, self.line) {
            (Some(class), _, _) => Ok(Selection::Class(class.clone())),
            (None, Some(file), Some(line)) => {
                Ok(Selection::Position(SourcePosition::new(file, line)))
            }
            _ => anyhow::bail!("either --class or --file with --line is required"),
        }
    }

    /// Builds the generator configuration from the flags.
    pub fn config(&self) -> GeneratorConfig {
        self.ignore_fields.iter().fold(
            GeneratorConfig::new()
                .max_depth(self.max_depth)
                .remark_annotation(self.remark_annotation.clone()),
            |config, field| config.ignore_field(field.clone()),
        )
    }
}

/// Prints notifications to stderr.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, notification: Notification) {
        let label = match notification.level {
            NotificationLevel::Info => "info",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        };
        eprintln!("{label}: {}", notification.message);
    }
}

/// Loads the model and runs one conversion, returning whether it succeeded.
///
/// Conversion failures are already reported through the notifier, so they
/// come back as `Ok(false)`; model loading failures are returned as errors.
pub fn run(cli: &Cli) -> anyhow::Result<bool> {
    let selection = cli.selection()?;
    let model = parse_model_file(&cli.model)
        .with_context(|| format!("failed to load class model {}", cli.model.display()))?;
    if cli.validate {
        validate_model(&model).context("class model validation failed")?;
    }
    tracing::debug!("Loaded {} classes from {}", model.classes.len(), cli.model.display());

    let generator = Generator::with_config(&model, cli.config());
    let converter = Converter::new(&generator);
    let mut notifier = StderrNotifier;

    let result = match &cli.out {
        Some(path) => converter.convert(&selection, &mut FileSink::new(path), &mut notifier),
        None => converter.convert(&selection, &mut StdoutSink, &mut notifier),
    };

    Ok(result.is_ok())
}
