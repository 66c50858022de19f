//! Advisory diagnostics raised while encoding and decoding.
//!
//! Diagnostics never change what the engine returns. They are handed to a
//! [`DiagnosticSink`], which may drop them ([`NoopSink`]), log them through
//! `tracing` ([`TracingSink`]) or keep them for inspection
//! ([`RecordingSink`]).

use std::cell::RefCell;
use std::fmt;

/// Which engine operation raised a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Raised by `encode_query_params`
    Encode,
    /// Raised by `decode_query_params`
    Decode,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode => write!(f, "encode"),
            Self::Decode => write!(f, "decode"),
        }
    }
}

/// What went wrong with a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The parameter has no codec in the config map.
    Unconfigured,
    /// The configured codec expects a different value type.
    TypeMismatch {
        /// The type the codec encodes
        expected: &'static str,
    },
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconfigured => write!(f, "unconfigured"),
            Self::TypeMismatch { .. } => write!(f, "type_mismatch"),
        }
    }
}

/// A single advisory diagnostic.
///
/// # Examples
///
/// ```
/// use query_param_codec::{Diagnostic, DiagnosticKind, Direction};
///
/// let diagnostic = Diagnostic::new("q", Direction::Encode, DiagnosticKind::Unconfigured);
/// assert_eq!(
///     diagnostic.to_string(),
///     "Encoding parameter q as string since it was not configured."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    param: String,
    direction: Direction,
    kind: DiagnosticKind,
}

impl Diagnostic {
    /// Creates a diagnostic.
    pub fn new(param: impl Into<String>, direction: Direction, kind: DiagnosticKind) -> Self {
        Self {
            param: param.into(),
            direction,
            kind,
        }
    }

    /// Returns the parameter name.
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Returns the operation that raised the diagnostic.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the diagnostic kind.
    pub fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, self.direction) {
            (DiagnosticKind::Unconfigured, Direction::Encode) => write!(
                f,
                "Encoding parameter {} as string since it was not configured.",
                self.param
            ),
            (DiagnosticKind::Unconfigured, Direction::Decode) => write!(
                f,
                "Passing through parameter {} during decoding since it was not configured.",
                self.param
            ),
            (DiagnosticKind::TypeMismatch { expected }, _) => write!(
                f,
                "Encoding parameter {} as string since its value is not a {}.",
                self.param, expected
            ),
        }
    }
}

/// Receives diagnostics from the engine.
///
/// Implementations must not panic; a sink only observes.
pub trait DiagnosticSink {
    /// Reports one diagnostic.
    fn report(&self, diagnostic: &Diagnostic);
}

/// Discards every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn report(&self, _diagnostic: &Diagnostic) {}
}

/// Logs diagnostics as `tracing` warnings under the `query_params` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        tracing::warn!(
            target: "query_params",
            param = %diagnostic.param(),
            direction = %diagnostic.direction(),
            kind = %diagnostic.kind(),
            "{}",
            diagnostic
        );
    }
}

/// Keeps diagnostics in memory.
///
/// # Examples
///
/// ```
/// use query_param_codec::{
///     encode_query_params_with_sink, DecodedQuery, ParamConfigMap, RecordingSink,
/// };
///
/// let mut query = DecodedQuery::new();
/// query.insert("x", "hello".to_string());
///
/// let sink = RecordingSink::new();
/// encode_query_params_with_sink(&ParamConfigMap::new(), &query, &sink);
///
/// assert_eq!(sink.len(), 1);
/// assert_eq!(sink.diagnostics()[0].param(), "x");
/// ```
#[derive(Debug, Default)]
pub struct RecordingSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    /// Returns a copy of the recorded diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Gives borrowed access to the recorded diagnostics.
    pub fn with_diagnostics<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[Diagnostic]) -> R,
    {
        f(&self.diagnostics.borrow())
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }

    /// Consumes the recorder and returns the diagnostics.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics.into_inner()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic.clone());
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F> DiagnosticSink for FnSink<F>
where
    F: Fn(&Diagnostic),
{
    fn report(&self, diagnostic: &Diagnostic) {
        (self.0)(diagnostic)
    }
}

impl<F> fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnSink")
    }
}

/// Whether the default sink reports anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticMode {
    /// Diagnostics are dropped.
    Silent,
    /// Diagnostics are logged as warnings.
    Warn,
}

impl DiagnosticMode {
    /// `Warn` in builds with debug assertions, `Silent` otherwise.
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Warn
        } else {
            Self::Silent
        }
    }

    /// Returns the sink for this mode.
    pub fn sink(self) -> &'static dyn DiagnosticSink {
        static NOOP: NoopSink = NoopSink;
        static TRACING: TracingSink = TracingSink;
        match self {
            Self::Silent => &NOOP,
            Self::Warn => &TRACING,
        }
    }
}

/// The sink used by `encode_query_params` and `decode_query_params`.
pub fn default_sink() -> &'static dyn DiagnosticSink {
    DiagnosticMode::from_build().sink()
}
