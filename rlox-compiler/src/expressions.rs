//! Expression parsing: the Pratt driver (`parse_precedence`) and the
//! parselets it dispatches to. Uses the standard `can_assign` idiom —
//! `parse_precedence` decides once, from the minimum precedence it was
//! called with, whether an `=` encountered along the way is legal, and
//! threads that answer into every parselet it calls. Only `variable` ever
//! consults it; every other parselet ignores it.

use rlox_core::{OpCode, Token, TokenKind, Value};

use crate::compiler::Compiler;
use crate::errors::CompileError;
use crate::functions::LocalLookup;
use crate::precedence::{get_rule, ParseFnKind, Precedence};

impl<'src> Compiler<'src> {
  pub(crate) fn expression(&mut self) {
    self.parse_precedence(Precedence::Assignment);
  }

  /// The core of the Pratt parsing algorithm: run the prefix parselet for
  /// `previous`, then keep folding in infix parselets as long as the
  /// current token's precedence meets `precedence`.
  pub(crate) fn parse_precedence(&mut self, precedence: Precedence) {
    self.advance();

    let can_assign = precedence <= Precedence::Assignment;

    let prefix = get_rule(self.parser.previous.kind).prefix;
    if prefix == ParseFnKind::None {
      self.error_at_previous(CompileError::ExpectedExpression);
      return;
    }
    self.run_parse_fn(prefix, can_assign);

    while precedence <= get_rule(self.parser.current.kind).precedence {
      self.advance();
      let infix = get_rule(self.parser.previous.kind).infix;
      self.run_parse_fn(infix, can_assign);
    }

    if can_assign && self.match_token(TokenKind::EQUAL) {
      // Every parselet above that can legally consume a trailing `=`
      // (only `variable`) already did so. Reaching here means the
      // left-hand side wasn't an assignable target (e.g. `a + b = c`).
      self.error_at_previous(CompileError::Expected("Invalid assignment target."));
    }
  }

  fn run_parse_fn(&mut self, kind: ParseFnKind, can_assign: bool) {
    match kind {
      ParseFnKind::Grouping => self.grouping(can_assign),
      ParseFnKind::Call => self.call(can_assign),
      ParseFnKind::Unary => self.unary(can_assign),
      ParseFnKind::Binary => self.binary(can_assign),
      ParseFnKind::Number => self.number(can_assign),
      ParseFnKind::Variable => self.variable(can_assign),
      ParseFnKind::None => unreachable!("caller checks for None before dispatching"),
    }
  }

  fn grouping(&mut self, _can_assign: bool) {
    self.expression();
    self.consume(TokenKind::RIGHT_PAREN, "Expect ')' after expression.");
  }

  /// Only zero-arity calls exist in this language, so there's no argument
  /// list to parse — the opening `(` was already consumed as the infix
  /// trigger by the time this runs, so all that's left is the matching
  /// `)` and the `OP_CALL` with an argument count of zero.
  fn call(&mut self, _can_assign: bool) {
    self.consume(TokenKind::RIGHT_PAREN, "Expect ')' after arguments.");
    self.emit_op_byte(OpCode::Call, 0);
  }

  fn number(&mut self, _can_assign: bool) {
    let value: f64 = self
      .parser
      .previous
      .lexeme
      .parse()
      .expect("the scanner only ever emits well-formed digit runs as NUMBER lexemes");
    self.emit_constant(Value::Number(value));
  }

  fn unary(&mut self, _can_assign: bool) {
    let operator = self.parser.previous.kind;
    self.parse_precedence(Precedence::Unary);
    if operator == TokenKind::MINUS {
      self.emit_op(OpCode::Negate);
    }
  }

  /// Parses the right operand at one precedence level above this
  /// operator's own, which is what makes `a - b - c` left-associate: by
  /// the time the second `-` is reached as an infix operator, it only
  /// pulls in operands binding strictly tighter than itself.
  fn binary(&mut self, _can_assign: bool) {
    let operator = self.parser.previous.kind;
    let rule = get_rule(operator);
    self.parse_precedence(rule.precedence.next());
    match operator {
      TokenKind::PLUS => self.emit_op(OpCode::Add),
      TokenKind::MINUS => self.emit_op(OpCode::Subtract),
      TokenKind::STAR => self.emit_op(OpCode::Multiply),
      TokenKind::SLASH => self.emit_op(OpCode::Divide),
      _ => unreachable!("get_rule only maps +, -, *, / to ParseFnKind::Binary"),
    }
  }

  fn variable(&mut self, can_assign: bool) {
    let name = self.parser.previous;
    self.named_variable(name, can_assign);
  }

  /// Resolves `name` to a local slot and emits a get or set.
  ///
  /// A name that doesn't resolve to any currently-live local isn't a
  /// compile error: this language has no global-variable fallback, so the
  /// slot used is one past the current scope's live locals — guaranteed
  /// not to hold the referenced variable — which the VM rejects at runtime
  /// as an undefined local slot. Referencing a name after its block closed
  /// is therefore a *runtime*, not compile-time, error.
  fn named_variable(&mut self, name: Token<'src>, can_assign: bool) {
    let slot = match self.resolve_local(name) {
      LocalLookup::Found(slot) => slot,
      LocalLookup::SelfReference => {
        self.error_at_previous(CompileError::SelfReferencingInitializer);
        return;
      }
      LocalLookup::NotFound => self.current_scope().locals.len() as u8,
    };

    if can_assign && self.match_token(TokenKind::EQUAL) {
      self.expression();
      self.emit_op_byte(OpCode::SetLocal, slot);
    } else {
      self.emit_op_byte(OpCode::GetLocal, slot);
    }
  }
}
