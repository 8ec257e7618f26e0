//! Top-level driver: wires scanner, parser, resolver, and interpreter
//! together and maps recorded errors to process exit codes.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use log::info;

use crate::ast::ExprId;
use crate::error::Result;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::report::ErrorReporter;
use crate::resolver::Resolver;
use crate::scanner::Scanner;
use crate::token::Token;

/// Exit code for scan, parse, and resolution errors.
pub const EXIT_STATIC_ERROR: i32 = 65;

/// Exit code for a runtime error.
pub const EXIT_RUNTIME_ERROR: i32 = 70;

pub struct Lox {
    interpreter: Interpreter,
    reporter: ErrorReporter,
    next_expr_id: ExprId,
}

impl Lox {
    pub fn new() -> Self {
        Lox {
            interpreter: Interpreter::new(),
            reporter: ErrorReporter::new(),
            next_expr_id: 0,
        }
    }

    /// Run a script file, returning the exit code the process should finish
    /// with: 65 for static errors, 70 for a runtime error, 0 on success.
    pub fn run_file(&mut self, path: &Path) -> Result<i32> {
        info!("Running file {:?}", path);

        let source = String::from_utf8(fs::read(path)?)?;

        self.run(&source);

        if self.reporter.had_static_error() {
            return Ok(EXIT_STATIC_ERROR);
        }
        if self.reporter.had_runtime_error() {
            return Ok(EXIT_RUNTIME_ERROR);
        }

        Ok(0)
    }

    /// Interactive prompt.  Errors are printed and forgotten; globals and
    /// functions defined on earlier lines stay alive for later ones.
    pub fn run_prompt(&mut self) -> Result<()> {
        info!("Starting REPL");

        let stdin = io::stdin();
        let mut line = String::new();

        loop {
            print!("> ");
            io::stdout().flush()?;

            line.clear();
            if stdin.lock().read_line(&mut line)? == 0 {
                break; // EOF
            }

            self.run(&line);
            self.reporter.reset();
        }

        Ok(())
    }

    /// One full trip through the pipeline.  Errors from any pre-evaluation
    /// phase suppress the phases after it; a runtime error aborts execution.
    /// Everything lands in the reporter.
    pub fn run(&mut self, source: &str) {
        let mut tokens: Vec<Token> = Vec::new();

        for result in Scanner::new(source) {
            match result {
                Ok(token) => tokens.push(token),

                Err(err) => self.reporter.report(&err),
            }
        }

        let mut parser = Parser::new(tokens, self.next_expr_id, &mut self.reporter);
        let statements = parser.parse();
        self.next_expr_id = parser.next_id();
        drop(parser);

        if self.reporter.had_static_error() {
            return;
        }

        Resolver::new(&mut self.interpreter, &mut self.reporter).resolve(&statements);

        if self.reporter.had_static_error() {
            return;
        }

        if let Err(err) = self.interpreter.interpret(&statements) {
            self.reporter.report(&err);
        }
    }
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}
