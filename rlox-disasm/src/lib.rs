//! Pretty-prints a `Chunk`'s instruction stream for debugging. An external
//! collaborator of the compiler/VM core: it only reads a chunk that
//! already exists, never mutates one.

use rlox_core::{Chunk, OpCode};

pub fn disassemble_chunk(chunk: &Chunk, name: &str) {
  println!("== {} ==", name);
  let mut offset = 0;
  while offset < chunk.len() {
    offset = disassemble_instruction(chunk, offset);
  }
}

/// Prints one instruction at `offset` and returns the offset of the next
/// one. Unknown opcode bytes print an "Unknown opcode" line and advance by
/// one byte rather than aborting, so disassembly of a corrupt chunk still
/// terminates.
pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> usize {
  print!("{:04} ", offset);

  if offset > 0 && chunk.get_line(offset) == chunk.get_line(offset - 1) {
    print!("   | ");
  } else {
    print!("{:04} ", chunk.get_line(offset));
  }

  match chunk.get_op_code(offset) {
    Some(op @ OpCode::Constant) => constant_instruction(op, chunk, offset),
    Some(op @ (OpCode::GetLocal | OpCode::SetLocal | OpCode::Call)) => {
      byte_instruction(op, chunk, offset)
    }
    Some(op) => simple_instruction(op, offset),
    None => {
      println!("Unknown opcode {}", chunk.get_byte(offset));
      offset + 1
    }
  }
}

fn simple_instruction(op: OpCode, offset: usize) -> usize {
  println!("{}", op.mnemonic());
  offset + 1
}

fn byte_instruction(op: OpCode, chunk: &Chunk, offset: usize) -> usize {
  let slot = chunk.get_byte(offset + 1);
  println!("{:<16} {:4}", op.mnemonic(), slot);
  offset + 2
}

fn constant_instruction(op: OpCode, chunk: &Chunk, offset: usize) -> usize {
  let index = chunk.get_byte(offset + 1) as usize;
  let value = chunk
    .get_constant(index)
    .expect("a constant instruction must index a live constant");
  println!("{:<16} {:4} '{}'", op.mnemonic(), index, value);
  offset + 2
}

#[cfg(test)]
mod tests {
  use super::*;
  use rlox_core::Value;

  #[test]
  fn offsets_are_monotonically_increasing_over_a_full_chunk() {
    let mut chunk = Chunk::new();
    let index = chunk.add_constant(Value::Number(1.0)).unwrap();
    chunk.write_op(OpCode::Constant, 1);
    chunk.write(index, 1);
    chunk.write_op(OpCode::Return, 2);

    let mut offset = 0;
    let mut seen = vec![];
    while offset < chunk.len() {
      seen.push(offset);
      offset = disassemble_instruction(&chunk, offset);
    }
    assert_eq!(seen, vec![0, 2]);
  }

  #[test]
  fn unknown_opcode_byte_does_not_panic() {
    let mut chunk = Chunk::new();
    chunk.write(250, 1);
    let next = disassemble_instruction(&chunk, 0);
    assert_eq!(next, 1);
  }
}
