use std::rc::Rc;

use rlox_core::Function;

/// One activation of a `Function`: where its bytecode is, how far execution
/// has gotten into it, and where its locals begin on the shared value stack.
/// Slot 0 of `slots_base..` always holds the callee itself; arguments occupy
/// `slots_base + 1 ..= slots_base + arity`.
#[derive(Debug, Clone)]
pub(crate) struct CallFrame {
  pub function: Rc<Function>,
  pub ip: usize,
  pub slots_base: usize,
}

impl CallFrame {
  pub fn new(function: Rc<Function>, slots_base: usize) -> Self {
    Self { function, ip: 0, slots_base }
  }
}
