//! Streaming lexer for Lox source text.
//!
//! [`Scanner`] is an iterator of `Result<Token>`.  Whitespace and `//`
//! comments produce nothing; every other lexeme produces one token, and the
//! stream always finishes with a single `EOF` token.  A lexical error is
//! yielded in place of the offending token and scanning resumes right after
//! it, so a caller can collect every error in one pass.
//!
//! Cursors are byte offsets into the source.  Only ASCII bytes start
//! tokens; any other character is reported and skipped whole.
//!
//! ```rust
//! use rox::scanner::Scanner;
//! use rox::token::TokenType;
//!
//! let kinds: Vec<TokenType> = Scanner::new("print 123; // example")
//!     .filter_map(Result::ok)
//!     .map(|token| token.token_type)
//!     .collect();
//!
//! assert_eq!(kinds.len(), 4);
//! assert_eq!(kinds[3], TokenType::EOF);
//! ```

use crate::error::{LoxError, Result};
use crate::token::{Token, TokenType};
use log::{debug, info, trace};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

// Reserved words, keyed by their bytes.

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"and"    => TokenType::AND,
    b"class"  => TokenType::CLASS,
    b"else"   => TokenType::ELSE,
    b"false"  => TokenType::FALSE,
    b"fun"    => TokenType::FUN,
    b"for"    => TokenType::FOR,
    b"if"     => TokenType::IF,
    b"nil"    => TokenType::NIL,
    b"or"     => TokenType::OR,
    b"print"  => TokenType::PRINT,
    b"return" => TokenType::RETURN,
    b"super"  => TokenType::SUPER,
    b"this"   => TokenType::THIS,
    b"true"   => TokenType::TRUE,
    b"var"    => TokenType::VAR,
    b"while"  => TokenType::WHILE,
};

/// Lexer state over one source string.
///
/// `start..curr` is the lexeme being scanned.  Both cursors stay on char
/// boundaries, so `&text[start..curr]` is always valid.
pub struct Scanner<'a> {
    text: &'a str,
    src: &'a [u8],
    start: usize,
    curr: usize,
    line: usize,
    /// Kind recognised by `scan_token`, if the lexeme was not trivia.
    pending: Option<TokenType>,
    /// Set once `EOF` has been yielded.
    done: bool,
}

impl<'a> Scanner<'a> {
    #[inline]
    pub fn new(text: &'a str) -> Self {
        info!("Scanner created over {} bytes", text.len());

        Self {
            text,
            src: text.as_bytes(),
            start: 0,
            curr: 0,
            line: 1,
            pending: None,
            done: false,
        }
    }

    // ───────────────────────────── cursor ──────────────────────────────────

    #[inline(always)]
    const fn len(&self) -> usize {
        self.src.len()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.len()
    }

    /// Consume one byte.  Callers check `is_at_end` first.
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.src[self.curr];
        self.curr += 1;
        b
    }

    /// Next byte, or `0` at end of input.
    #[inline(always)]
    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.src[self.curr]
        }
    }

    /// The byte after `peek`, or `0`.
    #[inline(always)]
    fn peek_next(&self) -> u8 {
        if self.curr + 1 >= self.len() {
            0
        } else {
            self.src[self.curr + 1]
        }
    }

    /// Consume the next byte only if it is `expected`.
    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// `with_eq` if the next byte is `=` (consuming it), otherwise `bare`.
    #[inline(always)]
    fn either(&mut self, with_eq: TokenType, bare: TokenType) -> TokenType {
        if self.match_byte(b'=') {
            with_eq
        } else {
            bare
        }
    }

    // ───────────────────────────── lexemes ─────────────────────────────────

    /// Scan one lexeme from `start`.  Leaves `pending` empty for whitespace
    /// and comments.
    fn scan_token(&mut self) -> Result<()> {
        let b = self.advance();

        match b {
            // ── punctuation ─────────────────────────────────────────────
            b'(' => self.pending = Some(TokenType::LEFT_PAREN),
            b')' => self.pending = Some(TokenType::RIGHT_PAREN),
            b'{' => self.pending = Some(TokenType::LEFT_BRACE),
            b'}' => self.pending = Some(TokenType::RIGHT_BRACE),
            b',' => self.pending = Some(TokenType::COMMA),
            b'.' => self.pending = Some(TokenType::DOT),
            b'-' => self.pending = Some(TokenType::MINUS),
            b'+' => self.pending = Some(TokenType::PLUS),
            b';' => self.pending = Some(TokenType::SEMICOLON),
            b'*' => self.pending = Some(TokenType::STAR),

            // ── one‑or‑two‑character operators ──────────────────────────
            b'!' => self.pending = Some(self.either(TokenType::BANG_EQUAL, TokenType::BANG)),
            b'=' => self.pending = Some(self.either(TokenType::EQUAL_EQUAL, TokenType::EQUAL)),
            b'<' => self.pending = Some(self.either(TokenType::LESS_EQUAL, TokenType::LESS)),
            b'>' => {
                self.pending = Some(self.either(TokenType::GREATER_EQUAL, TokenType::GREATER))
            }

            // ── trivia ──────────────────────────────────────────────────
            b' ' | b'\r' | b'\t' => {
                return Ok(());
            }

            b'\n' => {
                self.line += 1;

                return Ok(());
            }

            b'/' => {
                if self.match_byte(b'/') {
                    // Line comment: jump to the newline, which is left for
                    // the next call so the line count stays right.
                    if let Some(pos) = memchr(b'\n', &self.src[self.curr..]) {
                        self.curr += pos;
                    } else {
                        self.curr = self.len();
                    }

                    return Ok(());
                }

                self.pending = Some(TokenType::SLASH);
            }

            // ── literals and names ──────────────────────────────────────
            b'"' => {
                return self.string();
            }

            b'0'..=b'9' => {
                self.number();
            }

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                self.identifier();
            }

            _ => {
                // Skip the whole character, not just its first byte.
                let width: usize = self.text[self.start..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                self.curr = self.start + width;

                debug!(
                    "Unexpected character {:?} on line {}",
                    &self.text[self.start..self.curr],
                    self.line
                );

                return Err(LoxError::lex(self.line, "Unexpected character."));
            }
        }

        Ok(())
    }

    /// String body up to the closing quote.  Newlines are allowed inside.
    fn string(&mut self) -> Result<()> {
        while !self.is_at_end() && self.peek() != b'"' {
            if self.advance() == b'\n' {
                self.line += 1;
            }
        }

        if self.is_at_end() {
            return Err(LoxError::lex(self.line, "Unterminated string."));
        }

        self.advance();

        let s: &str = &self.text[self.start + 1..self.curr - 1];

        self.pending = Some(TokenType::STRING(s.to_owned()));

        Ok(())
    }

    /// `123` or `3.14`.  A trailing `.` is not part of the number.
    fn number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.advance();

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let s: &str = &self.text[self.start..self.curr];
        // Digits with at most one inner dot: always a valid f64.
        let n: f64 = s.parse::<f64>().unwrap_or(0.0);
        self.pending = Some(TokenType::NUMBER(n));
    }

    /// A name, unless it is a reserved word.
    fn identifier(&mut self) {
        while {
            let c: u8 = self.peek();
            c.is_ascii_alphanumeric() || c == b'_'
        } {
            self.advance();
        }

        let slice: &[u8] = &self.src[self.start..self.curr];

        let tt: TokenType = KEYWORDS
            .get(slice)
            .cloned()
            .unwrap_or(TokenType::IDENTIFIER);

        self.pending = Some(tt);
    }
}


impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while !self.is_at_end() {
            self.start = self.curr;
            self.pending = None;

            if let Err(e) = self.scan_token() {
                return Some(Err(e));
            }

            if let Some(tt) = self.pending.take() {
                trace!("Scanned token ({:?}) on line {}", tt, self.line);

                let lexeme: &str = &self.text[self.start..self.curr];
                return Some(Ok(Token::new(tt, lexeme, self.line)));
            }
        }

        self.done = true;
        Some(Ok(Token::new(TokenType::EOF, "", self.line)))
    }
}

impl<'a> FusedIterator for Scanner<'a> {}
