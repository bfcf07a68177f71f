use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;
use log::trace;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to a scope frame.  Closures and active calls each hold one,
/// so a frame lives as long as anything still refers to it.
pub type EnvRef = Rc<RefCell<Environment>>;

/// One scope frame: a name → value map plus the enclosing frame.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<EnvRef>,
}

impl Environment {
    /// The global frame.
    pub fn new() -> EnvRef {
        Rc::new(RefCell::new(Environment::default()))
    }

    pub fn with_enclosing(enclosing: EnvRef) -> EnvRef {
        Rc::new(RefCell::new(Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }))
    }

    /// Bind `name` in this frame, replacing any previous binding.
    pub fn define(&mut self, name: &str, value: Value) {
        trace!("define {}", name);

        self.values.insert(name.to_string(), value);
    }

    /// Dynamic lookup through the whole chain.  Used for globals, where the
    /// chain is a single frame.
    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }

    /// Read `name` from the frame exactly `distance` links up from `env`.
    pub fn get_at(env: &EnvRef, distance: usize, name: &Token) -> Result<Value> {
        let frame: EnvRef = Self::ancestor(env, distance).ok_or_else(|| undefined(name))?;
        let value: Option<Value> = frame.borrow().values.get(&name.lexeme).cloned();

        value.ok_or_else(|| undefined(name))
    }

    /// Overwrite `name` in the frame exactly `distance` links up from `env`.
    pub fn assign_at(env: &EnvRef, distance: usize, name: &Token, value: Value) -> Result<()> {
        let frame: EnvRef = Self::ancestor(env, distance).ok_or_else(|| undefined(name))?;
        let mut frame = frame.borrow_mut();

        match frame.values.get_mut(&name.lexeme) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(undefined(name)),
        }
    }

    fn ancestor(env: &EnvRef, distance: usize) -> Option<EnvRef> {
        let mut current: EnvRef = Rc::clone(env);

        for _ in 0..distance {
            let next: Option<EnvRef> = current.borrow().enclosing.clone();
            current = next?;
        }

        Some(current)
    }
}

fn undefined(name: &Token) -> LoxError {
    LoxError::runtime(name, format!("Undefined variable '{}'.", name.lexeme))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(lexeme: &str) -> Token {
        Token::synthetic(lexeme, 1)
    }

    #[test]
    fn define_overwrites_in_same_frame() {
        let env = Environment::new();
        env.borrow_mut().define("a", Value::Number(1.0));
        env.borrow_mut().define("a", Value::Number(2.0));

        assert_eq!(env.borrow().get(&name("a")).unwrap(), Value::Number(2.0));
    }

    #[test]
    fn get_at_walks_exact_distance() {
        let global = Environment::new();
        global.borrow_mut().define("a", Value::Number(1.0));
        let middle = Environment::with_enclosing(Rc::clone(&global));
        middle.borrow_mut().define("a", Value::Number(2.0));
        let inner = Environment::with_enclosing(Rc::clone(&middle));

        assert_eq!(
            Environment::get_at(&inner, 1, &name("a")).unwrap(),
            Value::Number(2.0)
        );
        assert_eq!(
            Environment::get_at(&inner, 2, &name("a")).unwrap(),
            Value::Number(1.0)
        );
        assert!(Environment::get_at(&inner, 0, &name("a")).is_err());
    }

    #[test]
    fn assign_at_is_visible_through_every_handle() {
        let global = Environment::new();
        let frame = Environment::with_enclosing(Rc::clone(&global));
        frame.borrow_mut().define("count", Value::Number(0.0));
        let first = Environment::with_enclosing(Rc::clone(&frame));
        let second = Environment::with_enclosing(Rc::clone(&frame));

        Environment::assign_at(&first, 1, &name("count"), Value::Number(5.0)).unwrap();

        assert_eq!(
            Environment::get_at(&second, 1, &name("count")).unwrap(),
            Value::Number(5.0)
        );
    }

    #[test]
    fn assign_to_undefined_global_fails() {
        let global = Environment::new();
        let err = global
            .borrow_mut()
            .assign(&name("missing"), Value::Nil)
            .unwrap_err();

        assert_eq!(err.to_string(), "Undefined variable 'missing'.\n[line 1]");
    }
}
