use num_derive::FromPrimitive;

/// The set of instructions supported by the virtual machine.
///
/// Every variant is one byte wide. Variants that take operands consume a
/// fixed number of additional bytes immediately following the opcode byte —
/// see each variant's doc comment for its operand count.
///
/// **NOTE:** changing the order of these variants changes the numeric value
/// every opcode is cast to/from, which would make previously-compiled chunks
/// unreadable. There's only one producer and one consumer of chunks in this
/// crate, so that's not a real compatibility concern here, but it's the
/// reason `repr(u8)` enums like this one are usually declared append-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum OpCode {
  /// Operand: constant-pool index. Pushes `constants[index]`.
  Constant,
  /// Pushes `Nil`.
  Nil,
  /// Discards the top of the stack.
  Pop,
  /// Operand: stack slot. Pushes `frame.slots[slot]`.
  GetLocal,
  /// Operand: stack slot. Peeks the top of the stack and writes it into
  /// `frame.slots[slot]`; the value is left on the stack.
  SetLocal,
  Add,
  Subtract,
  Multiply,
  Divide,
  Negate,
  /// Pops and prints the top of the stack.
  Print,
  /// Operand: argument count. Calls the callee found `argc` slots below the
  /// top of the stack.
  Call,
  Return,
}

impl OpCode {
  /// The number of operand bytes this instruction consumes from the chunk's
  /// code stream, immediately following the opcode byte itself.
  pub fn operand_count(&self) -> usize {
    match self {
      OpCode::Constant | OpCode::GetLocal | OpCode::SetLocal | OpCode::Call => 1,
      OpCode::Nil
      | OpCode::Pop
      | OpCode::Add
      | OpCode::Subtract
      | OpCode::Multiply
      | OpCode::Divide
      | OpCode::Negate
      | OpCode::Print
      | OpCode::Return => 0,
    }
  }

  pub fn mnemonic(&self) -> &'static str {
    match self {
      OpCode::Constant => "OP_CONSTANT",
      OpCode::Nil => "OP_NIL",
      OpCode::Pop => "OP_POP",
      OpCode::GetLocal => "OP_GET_LOCAL",
      OpCode::SetLocal => "OP_SET_LOCAL",
      OpCode::Add => "OP_ADD",
      OpCode::Subtract => "OP_SUBTRACT",
      OpCode::Multiply => "OP_MULTIPLY",
      OpCode::Divide => "OP_DIVIDE",
      OpCode::Negate => "OP_NEGATE",
      OpCode::Print => "OP_PRINT",
      OpCode::Call => "OP_CALL",
      OpCode::Return => "OP_RETURN",
    }
  }
}
