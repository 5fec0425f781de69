use rlox_compiler::compile;
use rlox_core::{Chunk, OpCode, Value};

/// Walks a chunk's code stream and counts how many instructions carry the
/// given opcode, respecting each instruction's operand width so the walk
/// never misinterprets an operand byte as the next opcode.
fn count_op(chunk: &Chunk, target: OpCode) -> usize {
  let mut offset = 0;
  let mut count = 0;
  while offset < chunk.len() {
    let op = chunk.get_op_code(offset).expect("compiler only ever emits defined opcodes");
    if op == target {
      count += 1;
    }
    offset += 1 + op.operand_count();
  }
  count
}

#[test]
fn compiles_arithmetic_print_statement() {
  let function = compile("print 1 + 2 * 3;").expect("well-formed program should compile");
  assert_eq!(count_op(&function.chunk, OpCode::Print), 1);
  assert_eq!(count_op(&function.chunk, OpCode::Multiply), 1);
  assert_eq!(count_op(&function.chunk, OpCode::Add), 1);
}

#[test]
fn dangling_operator_is_a_compile_error() {
  assert!(compile("print 1 +;").is_none());
}

#[test]
fn self_referencing_initializer_is_a_compile_error() {
  assert!(compile("{ let a = a; }").is_none());
}

#[test]
fn redeclaration_in_same_scope_is_a_compile_error() {
  assert!(compile("{ let a = 1; let a = 2; }").is_none());
}

#[test]
fn shadowing_across_nested_blocks_is_legal() {
  assert!(compile("{ let a = 1; { let a = 2; print a; } print a; }").is_some());
}

#[test]
fn block_end_emits_one_pop_per_local_it_introduced() {
  let function = compile("{ let a = 1; let b = 2; }").expect("should compile");
  assert_eq!(count_op(&function.chunk, OpCode::Pop), 2);
}

#[test]
fn assignment_leaves_value_on_stack_for_expression_statement_to_pop() {
  // `a = 2;` both sets and then discards — one OP_SET_LOCAL, one OP_POP.
  let function = compile("{ let a = 1; a = 2; }").expect("should compile");
  assert_eq!(count_op(&function.chunk, OpCode::SetLocal), 1);
  assert_eq!(count_op(&function.chunk, OpCode::Pop), 2);
}

#[test]
fn function_declaration_embeds_a_function_constant() {
  let function = compile("fun f() { print 1; }").expect("should compile");
  let has_function_ref = (0..function.chunk.constants_len())
    .any(|i| matches!(function.chunk.get_constant(i), Some(Value::FunctionRef(_))));
  assert!(has_function_ref);
}

#[test]
fn invalid_assignment_target_is_a_compile_error() {
  assert!(compile("{ let a = 1; let b = 2; a + b = 3; }").is_none());
}
