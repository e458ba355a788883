//! Conversion orchestration.
//!
//! [`Converter`] ties a selection, a [`Generator`], an [`OutputSink`] and a
//! [`Notifier`] together: it generates the text, hands it to the sink and
//! reports the outcome on the notification channel. Failures are reported,
//! never swallowed: the caller still gets the error back.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use pojo2ts_schema::{ClassDef, SourcePosition, TypeModel};

use crate::error::CodegenError;
use crate::generator::Generator;

/// Message reported for any failure other than the depth ceiling.
pub const FAILURE_MESSAGE: &str = "Convert to TypeScript failed.";

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Success.
    Info,
    /// Recoverable problem worth showing as-is.
    Warning,
    /// Failure.
    Error,
}

/// A user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Message text.
    pub message: String,
}

impl Notification {
    /// Creates an informational notification.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    /// Creates a warning.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    /// Creates an error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Channel for user-facing notifications, independent of the output sink.
pub trait Notifier {
    /// Delivers a notification.
    fn notify(&mut self, notification: Notification);
}

/// Collects notifications in memory.
impl Notifier for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Forwards notifications to `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification.level {
            NotificationLevel::Info => tracing::info!("{}", notification.message),
            NotificationLevel::Warning => tracing::warn!("{}", notification.message),
            NotificationLevel::Error => tracing::error!("{}", notification.message),
        }
    }
}

/// Destination for generated text.
pub trait OutputSink {
    /// Receives the complete generated text.
    ///
    /// # Errors
    /// Returns `CodegenError` if the text cannot be written.
    fn write_output(&mut self, text: &str) -> Result<(), CodegenError>;
}

/// Writes generated text to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write_output(&mut self, text: &str) -> Result<(), CodegenError> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// Writes generated text to a file, creating parent directories.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Creates a sink for the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the target path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    fn write_output(&mut self, text: &str) -> Result<(), CodegenError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, text)?;
        tracing::debug!("Wrote {} bytes to {}", text.len(), self.path.display());
        Ok(())
    }
}

/// Keeps generated text in memory.
#[derive(Debug, Default, Clone)]
pub struct StringSink {
    buffer: String,
}

impl StringSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the text received so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consumes the sink, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl OutputSink for StringSink {
    fn write_output(&mut self, text: &str) -> Result<(), CodegenError> {
        self.buffer.push_str(text);
        Ok(())
    }
}

/// What to convert.
#[derive(Debug, Clone)]
pub enum Selection {
    /// A class by qualified or unambiguous simple name.
    Class(String),
    /// The class enclosing a source position.
    Position(SourcePosition),
}

/// Runs conversions and reports their outcome.
pub struct Converter<'a, M: TypeModel + ?Sized> {
    generator: &'a Generator<'a, M>,
}

impl<'a, M: TypeModel + ?Sized> Converter<'a, M> {
    /// Creates a converter over a generator.
    #[must_use]
    pub fn new(generator: &'a Generator<'a, M>) -> Self {
        Self { generator }
    }

    /// Converts the selection, writes the text to `sink` and notifies.
    ///
    /// On success an informational notification names the class. The depth
    /// ceiling error is shown verbatim as a warning; every other failure is
    /// shown as a generic error with the detail logged.
    ///
    /// # Errors
    /// Returns the underlying `CodegenError` after it has been reported.
    pub fn convert(
        &self,
        selection: &Selection,
        sink: &mut dyn OutputSink,
        notifier: &mut dyn Notifier,
    ) -> Result<(), CodegenError> {
        let result = self.run(selection, sink);

        match &result {
            Ok(class) => notifier.notify(Notification::info(format!(
                "Convert {} to TypeScript success.",
                class.simple_name()
            ))),
            Err(err) if err.is_limit_exceeded() => {
                tracing::warn!("Conversion stopped: {:?}", err);
                notifier.notify(Notification::warning(err.to_string()));
            }
            Err(err) => {
                tracing::error!("Conversion failed: {}", err);
                notifier.notify(Notification::error(FAILURE_MESSAGE));
            }
        }

        result.map(|_| ())
    }

    fn run(
        &self,
        selection: &Selection,
        sink: &mut dyn OutputSink,
    ) -> Result<&'a ClassDef, CodegenError> {
        let class = match selection {
            Selection::Class(name) => self.generator.find_root(name)?,
            Selection::Position(position) => self.generator.select(position)?,
        };
        let text = self.generator.generate_class(class)?;
        sink.write_output(&text)?;
        Ok(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::error::RECURSION_LIMIT_MESSAGE;
    use pojo2ts_schema::{ClassModel, parse_model};

    const CONVERT_MODEL: &str = r#"<model>
        <class name="com.acme.Bar" file="Bar.java" startLine="1" endLine="9">
            <field name="foo" type="com.acme.Foo"/>
        </class>
        <class name="com.acme.Foo">
            <field name="id" type="int"/>
        </class>
        <class name="com.acme.Raw">
            <field name="items" type="java.util.List"/>
        </class>
    </model>"#;

    struct FailingSink;

    impl OutputSink for FailingSink {
        fn write_output(&mut self, _text: &str) -> Result<(), CodegenError> {
            Err(CodegenError::generation("sink closed"))
        }
    }

    fn model() -> ClassModel {
        parse_model(CONVERT_MODEL).expect("Failed to parse")
    }

    #[test]
    fn test_convert_success() {
        let model = model();
        let generator = Generator::new(&model);
        let mut sink = StringSink::new();
        let mut notes: Vec<Notification> = Vec::new();

        Converter::new(&generator)
            .convert(&Selection::Class("com.acme.Bar".into()), &mut sink, &mut notes)
            .expect("Failed to convert");

        assert_eq!(
            sink.as_str(),
            "export interface Bar{\n\tfoo: Foo; \n}\n\nexport interface Foo{\n\tid: number; \n}\n\n"
        );
        assert_eq!(notes, vec![Notification::info("Convert Bar to TypeScript success.")]);
    }

    #[test]
    fn test_convert_by_position() {
        let model = model();
        let generator = Generator::new(&model);
        let mut sink = StringSink::new();
        let mut notes: Vec<Notification> = Vec::new();

        let selection = Selection::Position(SourcePosition::new("Bar.java", 4));
        Converter::new(&generator)
            .convert(&selection, &mut sink, &mut notes)
            .expect("Failed to convert");
        assert!(sink.as_str().starts_with("export interface Bar{"));
    }

    #[test]
    fn test_limit_reported_as_warning() {
        let model = model();
        let generator = Generator::with_config(&model, GeneratorConfig::new().max_depth(0));
        let mut sink = StringSink::new();
        let mut notes: Vec<Notification> = Vec::new();

        let result = Converter::new(&generator).convert(
            &Selection::Class("Bar".into()),
            &mut sink,
            &mut notes,
        );

        assert!(result.is_err());
        assert!(sink.as_str().is_empty());
        assert_eq!(notes, vec![Notification::warning(RECURSION_LIMIT_MESSAGE)]);
    }

    #[test]
    fn test_other_failures_reported_generically() {
        let model = model();
        let generator = Generator::new(&model);
        let converter = Converter::new(&generator);
        let mut notes: Vec<Notification> = Vec::new();

        let missing = converter.convert(
            &Selection::Class("Raw".into()),
            &mut StringSink::new(),
            &mut notes,
        );
        assert!(matches!(missing, Err(CodegenError::MissingTypeParameter { .. })));

        let sink_failure = converter.convert(
            &Selection::Class("Bar".into()),
            &mut FailingSink,
            &mut notes,
        );
        assert!(sink_failure.is_err());

        let no_selection = converter.convert(
            &Selection::Position(SourcePosition::new("Other.java", 1)),
            &mut StringSink::new(),
            &mut notes,
        );
        assert!(matches!(no_selection, Err(CodegenError::NoSelection { .. })));

        assert_eq!(notes.len(), 3);
        assert!(notes.iter().all(|n| *n == Notification::error(FAILURE_MESSAGE)));
    }

    #[test]
    fn test_file_sink_creates_directories() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("generated").join("models.ts");
        let mut sink = FileSink::new(&path);

        sink.write_output("export interface A{\n}\n\n")
            .expect("Failed to write");
        let written = std::fs::read_to_string(&path).expect("Failed to read");
        assert_eq!(written, "export interface A{\n}\n\n");
        assert_eq!(sink.path(), path.as_path());
    }

    #[test]
    fn test_tracing_notifier_accepts_all_levels() {
        let mut notifier = TracingNotifier;
        notifier.notify(Notification::info("ok"));
        notifier.notify(Notification::warning("careful"));
        notifier.notify(Notification::error("failed"));
    }
}
