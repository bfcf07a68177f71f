#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use rox::session::{Failure, Session};

/// In‑memory `print` sink that stays readable after the session takes it.
#[derive(Clone, Default)]
pub struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("output is UTF-8")
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn session() -> (Session, SharedBuf) {
    let buf = SharedBuf::default();
    (Session::with_output(Box::new(buf.clone())), buf)
}

/// Run `source` and return what it printed together with the outcome.
pub fn run(source: &str) -> (String, Result<(), Failure>) {
    let (mut session, buf) = session();
    let result = session.run(source);
    (buf.contents(), result)
}

/// Printed output of a program that must succeed.
pub fn output_of(source: &str) -> String {
    let (out, result) = run(source);
    if let Err(failure) = result {
        panic!("program failed:\n{}\noutput so far:\n{}", failure, out);
    }
    out
}

/// Rendered diagnostics of a program that must fail.
pub fn failure_of(source: &str) -> (String, Failure) {
    let (out, result) = run(source);
    match result {
        Ok(()) => panic!("program unexpectedly succeeded, output:\n{}", out),
        Err(failure) => (out, failure),
    }
}
