//! The Pratt parsing table: for every token kind, which parselet (if any)
//! handles it as a prefix or infix position, and at what precedence.
//!
//! Parselets are dispatched through this enum rather than raw function
//! pointers, since `Compiler`'s parselets are private methods, not free
//! functions — `ParseFnKind` plus `Compiler::run_parse_fn` stands in for a
//! `fn(&mut Compiler, bool)` pointer table.

use rlox_core::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Precedence {
  None,
  Assignment,
  Equality,
  Comparison,
  Term,
  Factor,
  Unary,
  Call,
  Primary,
}

impl Precedence {
  /// The next precedence level up, used when parsing the right-hand operand
  /// of a left-associative binary operator at `rule.precedence + 1`.
  pub fn next(self) -> Precedence {
    match self {
      Precedence::None => Precedence::Assignment,
      Precedence::Assignment => Precedence::Equality,
      Precedence::Equality => Precedence::Comparison,
      Precedence::Comparison => Precedence::Term,
      Precedence::Term => Precedence::Factor,
      Precedence::Factor => Precedence::Unary,
      Precedence::Unary => Precedence::Call,
      Precedence::Call => Precedence::Primary,
      Precedence::Primary => panic!("Precedence::Primary has no higher precedence"),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFnKind {
  None,
  Grouping,
  Call,
  Unary,
  Binary,
  Number,
  Variable,
}

#[derive(Debug, Clone, Copy)]
pub struct ParseRule {
  pub prefix: ParseFnKind,
  pub infix: ParseFnKind,
  pub precedence: Precedence,
}

/// Looks up the rule for a token kind. Total over every `TokenKind` variant:
/// kinds with no parselet fall through to the catch-all arm, which gives
/// `ParseFnKind::None` at `Precedence::None` — that's what lets
/// `parse_precedence`'s infix loop terminate on them without a special case.
pub fn get_rule(kind: TokenKind) -> ParseRule {
  use ParseFnKind::*;
  use Precedence as P;
  match kind {
    // `(` is both a prefix parselet (a parenthesized expression) and an
    // infix parselet (a zero-arity call applied to whatever came before
    // it), the way `-` is both unary and binary.
    TokenKind::LEFT_PAREN => ParseRule {
      prefix: Grouping,
      infix: Call,
      precedence: P::Call,
    },
    TokenKind::MINUS => ParseRule {
      prefix: Unary,
      infix: Binary,
      precedence: P::Term,
    },
    TokenKind::PLUS => ParseRule {
      prefix: None,
      infix: Binary,
      precedence: P::Term,
    },
    TokenKind::SLASH => ParseRule {
      prefix: None,
      infix: Binary,
      precedence: P::Factor,
    },
    TokenKind::STAR => ParseRule {
      prefix: None,
      infix: Binary,
      precedence: P::Factor,
    },
    TokenKind::NUMBER => ParseRule {
      prefix: Number,
      infix: None,
      precedence: P::None,
    },
    TokenKind::IDENTIFIER => ParseRule {
      prefix: Variable,
      infix: None,
      precedence: P::None,
    },
    _ => ParseRule {
      prefix: None,
      infix: None,
      precedence: P::None,
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_token_kind_has_a_rule() {
    // Not exhaustive over TokenKind by construction (the catch-all arm makes
    // that impossible to check), but confirms the specific kinds the parser
    // actually dispatches on land where the grammar expects them.
    assert_eq!(get_rule(TokenKind::PLUS).precedence, Precedence::Term);
    assert_eq!(get_rule(TokenKind::STAR).precedence, Precedence::Factor);
    assert_eq!(get_rule(TokenKind::SEMICOLON).precedence, Precedence::None);
    assert_eq!(get_rule(TokenKind::EOF).prefix, ParseFnKind::None);
  }

  #[test]
  fn factor_binds_tighter_than_term() {
    assert!(get_rule(TokenKind::STAR).precedence > get_rule(TokenKind::PLUS).precedence);
  }
}
