//! Statement and declaration parsing: `declaration`, `fun_decl`,
//! `var_decl`, `statement`, `print_stmt`, `block`, `expr_stmt`.

use std::rc::Rc;

use rlox_core::{FunctionKind, OpCode, TokenKind, Value};

use crate::compiler::Compiler;

impl<'src> Compiler<'src> {
  /// `declaration := fun_decl | var_decl | statement`. On a panic-mode
  /// error anywhere below, resynchronizes at the next statement boundary
  /// before returning, so one bad token doesn't cascade into a wall of
  /// spurious diagnostics.
  pub(crate) fn declaration(&mut self) {
    if self.match_token(TokenKind::FUN) {
      self.fun_declaration();
    } else if self.match_token(TokenKind::LET) {
      self.var_declaration();
    } else {
      self.statement();
    }

    if self.parser.panic_mode {
      self.synchronize();
    }
  }

  /// `fun_decl := "fun" IDENTIFIER "(" ")" block`.
  ///
  /// The function's name is declared and marked initialized in the
  /// *enclosing* scope before its body is compiled, so a function may call
  /// itself by name. The body compiles into a fresh `FunctionScope`; once
  /// that scope ends, the resulting `Function` is embedded as a constant
  /// back in the enclosing chunk — at the exact point in the enclosing
  /// bytecode stream where its declared local slot expects a value to be
  /// pushed.
  fn fun_declaration(&mut self) {
    self.consume(TokenKind::IDENTIFIER, "Expect function name.");
    let name_token = self.parser.previous;
    self.declare_variable(name_token);
    self.mark_initialized();

    self.begin_function(FunctionKind::Function, Some(name_token.lexeme.to_string()));
    self.begin_scope();

    self.consume(TokenKind::LEFT_PAREN, "Expect '(' after function name.");
    self.consume(TokenKind::RIGHT_PAREN, "Expect ')' after parameters.");
    self.consume(TokenKind::LEFT_BRACE, "Expect '{' before function body.");
    self.block();

    let function = self.end_compiler();
    self.emit_constant(Value::FunctionRef(Rc::new(function)));
  }

  /// `var_decl := "let" IDENTIFIER "=" expression ";"`.
  ///
  /// `declare_variable` runs before the initializer expression is parsed,
  /// leaving the local at its `depth == -1` sentinel for the duration —
  /// that's what makes `let a = a;` resolve to `SelfReference` instead of
  /// silently reading whatever slot `a` ends up at.
  fn var_declaration(&mut self) {
    self.consume(TokenKind::IDENTIFIER, "Expect variable name.");
    let name_token = self.parser.previous;
    self.declare_variable(name_token);

    self.consume(TokenKind::EQUAL, "Expect '=' after variable name.");
    self.expression();
    self.consume(TokenKind::SEMICOLON, "Expect ';' after variable declaration.");

    self.mark_initialized();
  }

  /// `statement := print_stmt | block | expr_stmt`.
  fn statement(&mut self) {
    if self.match_token(TokenKind::PRINT) {
      self.print_statement();
    } else if self.match_token(TokenKind::LEFT_BRACE) {
      self.begin_scope();
      self.block();
      self.end_scope();
    } else {
      self.expression_statement();
    }
  }

  /// `print_stmt := "print" expression ";"`.
  fn print_statement(&mut self) {
    self.expression();
    self.consume(TokenKind::SEMICOLON, "Expect ';' after value.");
    self.emit_op(OpCode::Print);
  }

  /// `block := "{" declaration* "}"`. The caller is responsible for the
  /// matching `begin_scope`/`end_scope` pair — `fun_declaration` opens a
  /// scope around a function body the same way a bare `{ ... }` statement
  /// does.
  fn block(&mut self) {
    while !self.check(TokenKind::RIGHT_BRACE) && !self.check(TokenKind::EOF) {
      self.declaration();
    }
    self.consume(TokenKind::RIGHT_BRACE, "Expect '}' after block.");
  }

  /// `expr_stmt := expression ";"`. The expression's value is left on the
  /// stack by construction, so the statement discards it with `OP_POP`.
  fn expression_statement(&mut self) {
    self.expression();
    self.consume(TokenKind::SEMICOLON, "Expect ';' after expression.");
    self.emit_op(OpCode::Pop);
  }
}
