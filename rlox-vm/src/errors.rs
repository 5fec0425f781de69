//! The runtime error taxonomy. Every variant carries the opcode that was
//! executing when the VM gave up, so the host can report `[opcode] message`
//! the same way the compiler reports `[line N] Error at X: Y`.

use rlox_core::OpCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeError {
  TypeMismatch { opcode: OpCode },
  NotCallable { opcode: OpCode },
  ArityMismatch { opcode: OpCode, expected: u8, got: u8 },
  StackOverflow { opcode: OpCode },
  UndefinedSlot { opcode: OpCode },
}

impl RuntimeError {
  pub fn opcode(&self) -> OpCode {
    match self {
      RuntimeError::TypeMismatch { opcode }
      | RuntimeError::NotCallable { opcode }
      | RuntimeError::ArityMismatch { opcode, .. }
      | RuntimeError::StackOverflow { opcode }
      | RuntimeError::UndefinedSlot { opcode } => *opcode,
    }
  }

  pub fn message(&self) -> String {
    match self {
      RuntimeError::TypeMismatch { .. } => "Operand must be a number.".to_string(),
      RuntimeError::NotCallable { .. } => "Can only call functions.".to_string(),
      RuntimeError::ArityMismatch { expected, got, .. } => {
        format!("Expected {} arguments but got {}.", expected, got)
      }
      RuntimeError::StackOverflow { .. } => "Stack overflow.".to_string(),
      RuntimeError::UndefinedSlot { .. } => "Undefined local slot.".to_string(),
    }
  }
}
