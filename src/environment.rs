//! Lexically nested name→value frames.
//!
//! Frames form a singly-linked chain toward the globals and are shared:
//! every closure, instance binding, and active call frame holds an
//! `Rc<RefCell<Environment>>`, and a frame lives as long as its last
//! retainer.  The walking `get`/`assign` pair serves globals and unresolved
//! names; resolved locals go through `get_at`/`assign_at`, which jump to a
//! frame the resolver proved to hold the binding.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;

#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Create or overwrite the binding in this frame.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Walking lookup; used only for globals and unresolved names.
    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(LoxError::runtime(
                name,
                format!("Undefined variable '{}'.", name.lexeme),
            ))
        }
    }

    /// Mutate the nearest enclosing frame that already binds `name`.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if self.values.contains_key(&name.lexeme) {
            self.values.insert(name.lexeme.clone(), value);
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(LoxError::runtime(
                name,
                format!("Undefined variable '{}'.", name.lexeme),
            ))
        }
    }
}

/// The frame exactly `distance` parents up from `env`.
fn ancestor(env: &Rc<RefCell<Environment>>, distance: usize) -> Rc<RefCell<Environment>> {
    let mut frame = Rc::clone(env);

    for _ in 0..distance {
        let parent = frame
            .borrow()
            .enclosing
            .clone()
            .expect("resolved depth exceeds the environment chain");
        frame = parent;
    }

    frame
}

/// Direct read at a resolver-computed depth.  The binding is guaranteed to
/// exist there; a miss is an interpreter bug, not a user error.
pub fn get_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &str) -> Value {
    ancestor(env, distance)
        .borrow()
        .values
        .get(name)
        .cloned()
        .expect("resolved binding missing at its depth")
}

/// Direct write at a resolver-computed depth.
pub fn assign_at(env: &Rc<RefCell<Environment>>, distance: usize, name: &str, value: Value) {
    ancestor(env, distance)
        .borrow_mut()
        .values
        .insert(name.to_string(), value);
}
