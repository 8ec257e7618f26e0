//! Process-wide error sink.
//!
//! One `ErrorReporter` is created at program start and handed by reference to
//! the scan loop, the parser, and the resolver.  It prints each diagnostic as
//! it arrives and keeps a per-kind count so the driver can decide, after each
//! phase, whether the next phase may run and which exit code the process
//! should finish with.  The REPL resets it between lines.

use log::debug;

use crate::error::LoxError;

/// Counts, retains, and prints diagnostics per error kind.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    lex_errors: usize,
    parse_errors: usize,
    resolve_errors: usize,
    runtime_errors: usize,
    diagnostics: Vec<String>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print `err` to stderr and bump the counter for its kind.
    pub fn report(&mut self, err: &LoxError) {
        debug!("Reporting: {:?}", err);

        match err {
            LoxError::Lex { .. } => self.lex_errors += 1,

            LoxError::Parse { .. } => self.parse_errors += 1,

            LoxError::Resolve { .. } => self.resolve_errors += 1,

            _ => self.runtime_errors += 1,
        }

        let rendered = err.to_string();
        eprintln!("{}", rendered);
        self.diagnostics.push(rendered);
    }

    /// Everything reported so far, in arrival order, rendered as printed.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// Any error from a pre-evaluation phase suppresses evaluation.
    pub fn had_static_error(&self) -> bool {
        self.static_error_count() > 0
    }

    pub fn had_runtime_error(&self) -> bool {
        self.runtime_errors > 0
    }

    pub fn static_error_count(&self) -> usize {
        self.lex_errors + self.parse_errors + self.resolve_errors
    }

    /// Forget everything recorded so far.  Called between REPL lines.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
