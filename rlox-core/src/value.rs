use std::fmt::{self, Display, Formatter};
use std::rc::Rc;

use crate::function::Function;

/// A runtime value.
///
/// The language is numeric-only: every value at runtime is either a
/// double-precision float, the `Nil` sentinel, or a reference to a compiled
/// function. There is no string, boolean, or collection type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Number(f64),
  Nil,
  FunctionRef(Rc<Function>),
}

impl Value {
  /// Returns this value's number, or `None` if it isn't a `Number`.
  pub fn as_number(&self) -> Option<f64> {
    match self {
      Value::Number(n) => Some(*n),
      _ => None,
    }
  }

  pub fn type_name(&self) -> &'static str {
    match self {
      Value::Number(_) => "number",
      Value::Nil => "nil",
      Value::FunctionRef(_) => "function",
    }
  }
}

impl Display for Value {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Value::Number(n) => write!(f, "{}", n),
      Value::Nil => write!(f, "nil"),
      Value::FunctionRef(func) => match &func.name {
        Some(name) => write!(f, "<fn {}>", name),
        None => write!(f, "<script>"),
      },
    }
  }
}
