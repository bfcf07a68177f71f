//! One interpreter plus the scan → parse → resolve → interpret pipeline.
//!
//! A [`Session`] keeps its interpreter between calls to [`Session::run`], so
//! globals defined by one input remain visible to the next (the REPL relies
//! on this).

use std::fmt;
use std::io::Write;

use log::{debug, info};

use crate::error::LoxError;
use crate::expr::Expr;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;
use crate::stmt::Stmt;
use crate::token::Token;
use crate::value::Value;

/// Why a run stopped.
#[derive(Debug)]
pub enum Failure {
    /// Scan, parse or resolve diagnostics; nothing was executed.
    Static(Vec<LoxError>),

    /// Execution began and stopped at this error.
    Runtime(LoxError),
}

impl Failure {
    /// Conventional process exit status: 65 for static errors, 70 for
    /// runtime errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            Failure::Static(_) => 65,
            Failure::Runtime(_) => 70,
        }
    }

    pub fn errors(&self) -> &[LoxError] {
        match self {
            Failure::Static(errors) => errors,
            Failure::Runtime(error) => std::slice::from_ref(error),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for Failure {}

pub struct Session {
    interpreter: Interpreter,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session printing to stdout.
    pub fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
        }
    }

    /// A session whose `print` statements write to `output`.
    pub fn with_output(output: Box<dyn Write>) -> Self {
        Self {
            interpreter: Interpreter::with_output(output),
        }
    }

    pub fn interpreter_mut(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    /// Run `source` as a program.
    pub fn run(&mut self, source: &str) -> Result<(), Failure> {
        info!("Session run over {} bytes", source.len());

        // Lex and parse diagnostics are reported together.
        let (tokens, mut errors) = scan(source);
        let statements: Vec<Stmt> = match Parser::new(&tokens).parse() {
            Ok(statements) if errors.is_empty() => statements,
            Ok(_) => return Err(Failure::Static(errors)),
            Err(parse_errors) => {
                errors.extend(parse_errors);
                return Err(Failure::Static(errors));
            }
        };

        debug!("Parsed {} statement(s)", statements.len());

        Resolver::new(&mut self.interpreter)
            .resolve(&statements)
            .map_err(Failure::Static)?;

        self.interpreter
            .interpret(&statements)
            .map_err(Failure::Runtime)
    }

    /// Evaluate `source` as a single expression and return its value.
    pub fn evaluate(&mut self, source: &str) -> Result<Value, Failure> {
        let expr: Expr = parse_expression(source).map_err(Failure::Static)?;

        self.interpreter.evaluate(&expr).map_err(Failure::Runtime)
    }
}

/// Scan all of `source`, collecting every lexical error rather than stopping
/// at the first.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Vec<LoxError>> {
    let (tokens, errors) = scan(source);

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}

/// Every token the scanner produced (always ending in `EOF`) alongside every
/// lexical error.
fn scan(source: &str) -> (Vec<Token>, Vec<LoxError>) {
    let mut tokens: Vec<Token> = Vec::new();
    let mut errors: Vec<LoxError> = Vec::new();

    for item in Scanner::new(source) {
        match item {
            Ok(token) => tokens.push(token),
            Err(e) => errors.push(e),
        }
    }

    (tokens, errors)
}

/// Scan and parse `source` as one expression.
pub fn parse_expression(source: &str) -> Result<Expr, Vec<LoxError>> {
    let tokens: Vec<Token> = tokenize(source)?;

    Parser::new(&tokens).parse_expression()
}
