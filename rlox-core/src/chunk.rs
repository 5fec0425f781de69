use num_traits::FromPrimitive;

use crate::opcode::OpCode;
use crate::value::Value;

/// The largest index `add_constant` can hand back, since constant operands
/// are encoded as a single byte in the code stream.
pub const MAX_CONSTANTS: usize = u8::MAX as usize + 1;

/// The bytecode of a single function: an append-only instruction stream, a
/// parallel line-number map (one entry per instruction byte, for error
/// reporting), and an indexed pool of compile-time constants.
///
/// `code` and `lines` always have equal length — every `write` call pushes
/// to both in lockstep, so there's no separate `count`/`capacity`
/// bookkeeping to keep in sync; `Vec`'s own amortized-doubling growth stands
/// in for a hand-rolled capacity-doubling scheme over a raw array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chunk {
  code: Vec<u8>,
  lines: Vec<usize>,
  constants: Vec<Value>,
}

impl Chunk {
  pub fn new() -> Self {
    Self::default()
  }

  /// Appends a raw byte (an opcode tag or an operand) to the instruction
  /// stream, along with the source line it was compiled from.
  pub fn write(&mut self, byte: u8, line: usize) {
    self.code.push(byte);
    self.lines.push(line);
  }

  pub fn write_op(&mut self, op: OpCode, line: usize) {
    self.write(op as u8, line);
  }

  /// Appends `value` to the constant pool and returns its index.
  ///
  /// Returns `Err(())` if the pool is already at capacity — a constant
  /// operand is a single byte, so the pool can hold at most
  /// [`MAX_CONSTANTS`] entries. Every call appends unconditionally; there is
  /// no deduplication of equal constants (see DESIGN.md for why).
  pub fn add_constant(&mut self, value: Value) -> Result<u8, ()> {
    if self.constants.len() >= MAX_CONSTANTS {
      return Err(());
    }
    self.constants.push(value);
    Ok((self.constants.len() - 1) as u8)
  }

  pub fn get_constant(&self, index: usize) -> Option<&Value> {
    self.constants.get(index)
  }

  pub fn constants_len(&self) -> usize {
    self.constants.len()
  }

  pub fn get_byte(&self, index: usize) -> u8 {
    self.code[index]
  }

  pub fn get_op_code(&self, index: usize) -> Option<OpCode> {
    FromPrimitive::from_u8(self.code[index])
  }

  pub fn get_line(&self, index: usize) -> usize {
    self.lines[index]
  }

  pub fn len(&self) -> usize {
    self.code.len()
  }

  pub fn is_empty(&self) -> bool {
    self.code.is_empty()
  }

  /// Returns this chunk to its empty state, dropping the instruction stream,
  /// line map, and constant pool.
  pub fn free(&mut self) {
    *self = Self::default();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn starts_empty() {
    let chunk = Chunk::new();
    assert_eq!(chunk.len(), 0);
    assert!(chunk.is_empty());
    assert_eq!(chunk.constants_len(), 0);
  }

  #[test]
  fn write_keeps_code_and_lines_in_lockstep() {
    let mut chunk = Chunk::new();
    chunk.write_op(OpCode::Return, 123);
    assert_eq!(chunk.len(), 1);
    assert_eq!(chunk.get_byte(0), OpCode::Return as u8);
    assert_eq!(chunk.get_line(0), 123);
  }

  #[test]
  fn add_constant_returns_sequential_indices_without_dedup() {
    let mut chunk = Chunk::new();
    let a = chunk.add_constant(Value::Number(1.2)).unwrap();
    let b = chunk.add_constant(Value::Number(1.2)).unwrap();
    assert_eq!(a, 0);
    assert_eq!(b, 1);
    assert_eq!(chunk.constants_len(), 2);
  }

  #[test]
  fn add_constant_overflows_past_256_entries() {
    let mut chunk = Chunk::new();
    for _ in 0..MAX_CONSTANTS {
      chunk.add_constant(Value::Number(0.0)).unwrap();
    }
    assert!(chunk.add_constant(Value::Number(0.0)).is_err());
  }

  #[test]
  fn free_returns_chunk_to_empty_state() {
    let mut chunk = Chunk::new();
    chunk.write_op(OpCode::Return, 1);
    chunk.add_constant(Value::Number(1.0)).unwrap();
    chunk.free();
    assert_eq!(chunk.len(), 0);
    assert_eq!(chunk.constants_len(), 0);
  }
}
