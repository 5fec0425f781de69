use rlox_core::Value;
use rlox_vm::{interpret, InterpretResult};

#[test]
fn adds_two_numbers() {
  let (result, _, log) = interpret("print 1 + 1;");
  assert_eq!(result, InterpretResult::Ok);
  assert_eq!(log, vec![Value::Number(2.0)]);
}

#[test]
fn divides_two_numbers() {
  let (result, _, log) = interpret("print 9 / 3;");
  assert_eq!(result, InterpretResult::Ok);
  assert_eq!(log, vec![Value::Number(3.0)]);
}

#[test]
fn negates_a_number() {
  let (result, _, log) = interpret("print -1;");
  assert_eq!(result, InterpretResult::Ok);
  assert_eq!(log, vec![Value::Number(-1.0)]);
}

#[test]
fn respects_operator_precedence() {
  let (result, _, log) = interpret("print 1 + 2 * 3;");
  assert_eq!(result, InterpretResult::Ok);
  assert_eq!(log, vec![Value::Number(7.0)]);
}

#[test]
fn reads_a_block_local() {
  let (result, _, log) = interpret("{ let a = 1; print a; }");
  assert_eq!(result, InterpretResult::Ok);
  assert_eq!(log, vec![Value::Number(1.0)]);
}

#[test]
fn assignment_is_visible_after_the_inner_block_that_made_it() {
  let (result, _, log) =
    interpret("{ let a = 1; print a; { a = 2; print a; } print a; }");
  assert_eq!(result, InterpretResult::Ok);
  assert_eq!(
    log,
    vec![Value::Number(1.0), Value::Number(2.0), Value::Number(2.0)]
  );
}

#[test]
fn shadowing_resolves_to_the_innermost_binding() {
  let (result, _, log) = interpret("{ let a = 1; { let b = 2; print b; } print a; }");
  assert_eq!(result, InterpretResult::Ok);
  assert_eq!(log, vec![Value::Number(2.0), Value::Number(1.0)]);
}

#[test]
fn referencing_a_variable_after_its_block_closed_is_a_runtime_error() {
  let (result, _, _) = interpret("{ let a = 1; { let b = 2; } print b; }");
  assert_eq!(result, InterpretResult::RuntimeError);
}

#[test]
fn dangling_operator_is_a_compile_error() {
  let (result, opcode, log) = interpret("print 1 +;");
  assert_eq!(result, InterpretResult::CompileError);
  assert_eq!(opcode, None);
  assert!(log.is_empty());
}

#[test]
fn calls_a_declared_zero_arity_function() {
  let (result, _, log) = interpret("fun f() { print 1; } f();");
  assert_eq!(result, InterpretResult::Ok);
  assert_eq!(log, vec![Value::Number(1.0)]);
}

#[test]
fn adding_a_number_to_a_function_is_a_type_error() {
  let (result, _, _) = interpret("fun f() { print 1; } print f() + 1;");
  assert_eq!(result, InterpretResult::RuntimeError);
}
