use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt;

use destek::error::DestekError;

/// Returns whether terminal output should include backtraces.
fn should_render_backtrace() -> bool {
    matches!(
        std::env::var("RUST_BACKTRACE").as_deref(),
        Ok("1") | Ok("full")
    )
}

/// Result type for converter commands.
pub type ConverterResult<T> = Result<T, ConverterError>;

/// Captured backtrace wrapper to avoid thiserror's unstable feature detection.
pub struct CapturedBacktrace(Backtrace);

impl CapturedBacktrace {
    fn capture() -> Self {
        Self(Backtrace::capture())
    }
}

impl fmt::Debug for CapturedBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type of the converter binary.
///
/// Wraps [`DestekError`] for ingestion and lookup failures and provides variants for
/// configuration and file system errors raised by the binary itself.
pub enum ConverterError {
    Destek(DestekError),
    Config(Box<dyn Error + Send + Sync>, CapturedBacktrace),
    Io(std::io::Error, CapturedBacktrace),
}

impl ConverterError {
    /// Returns a short category label for this error.
    pub fn category(&self) -> &'static str {
        match self {
            ConverterError::Destek(_) => "converter error",
            ConverterError::Config(_, _) => "configuration error",
            ConverterError::Io(_, _) => "i/o error",
        }
    }

    pub fn backtrace(&self) -> Option<&Backtrace> {
        match self {
            ConverterError::Destek(err) => err.backtrace(),
            ConverterError::Config(_, cb) => Some(&cb.0),
            ConverterError::Io(_, cb) => Some(&cb.0),
        }
    }

    /// Creates a configuration error from any error.
    pub fn config<E: Error + Send + Sync + 'static>(err: E) -> Self {
        ConverterError::Config(Box::new(err), CapturedBacktrace::capture())
    }

    /// Creates a configuration error from a plain message.
    pub fn usage(message: impl Into<String>) -> Self {
        let message: Box<dyn Error + Send + Sync> = message.into().into();
        ConverterError::Config(message, CapturedBacktrace::capture())
    }

    /// Returns a user-oriented report for terminal output.
    pub fn render_report(&self) -> String {
        let mut out = String::new();
        out.push_str("converter failed\n");
        out.push_str(&format!("category: {}\n", self.category()));
        out.push_str(&format!("error: {}\n", self));

        if !matches!(self, ConverterError::Destek(err) if err.errors().len() > 1) {
            let mut source = Error::source(self);
            let mut idx = 1usize;
            while let Some(err) = source {
                out.push_str(&format!("cause {idx}: {err}\n"));
                source = err.source();
                idx += 1;
            }
        }

        if should_render_backtrace()
            && let Some(backtrace) = self.backtrace()
        {
            out.push_str("backtrace:\n");
            out.push_str(&backtrace.to_string());
            if !out.ends_with('\n') {
                out.push('\n');
            }
        }

        out
    }
}

/// Renders the terminal report, so a failing `main` prints it instead of the raw variant.
impl fmt::Debug for ConverterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render_report().trim_end())
    }
}

impl fmt::Display for ConverterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConverterError::Destek(err) => write!(f, "{err}"),
            ConverterError::Config(source, _) => write!(f, "configuration error: {source}"),
            ConverterError::Io(source, _) => write!(f, "i/o error: {source}"),
        }
    }
}

impl Error for ConverterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConverterError::Destek(err) => err.source(),
            ConverterError::Config(source, _) => Some(source.as_ref()),
            ConverterError::Io(source, _) => Some(source),
        }
    }
}

impl From<std::io::Error> for ConverterError {
    fn from(err: std::io::Error) -> Self {
        ConverterError::Io(err, CapturedBacktrace::capture())
    }
}

impl From<DestekError> for ConverterError {
    fn from(err: DestekError) -> Self {
        ConverterError::Destek(err)
    }
}
