/// The kinds of tokens the scanner can produce.
///
/// **NOTE:** Changing the order of these variants is safe — unlike `OpCode`,
/// `TokenKind` is never cast to or from a raw byte.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  // Single-character tokens.
  LEFT_PAREN,
  RIGHT_PAREN,
  LEFT_BRACE,
  RIGHT_BRACE,
  SEMICOLON,
  MINUS,
  PLUS,
  SLASH,
  STAR,

  // One or two character tokens.
  EQUAL,
  EQUAL_EQUAL,

  // Literals.
  IDENTIFIER,
  NUMBER,

  // Keywords.
  FUN,
  LET,
  PRINT,
  RETURN,

  ERROR,
  EOF,
}

/// A single lexeme produced by the scanner, along with its source location.
///
/// Tokens are immutable once produced: the scanner never mutates a `Token`
/// after returning it. `lexeme` is a borrowed view into the original source
/// text, except for `ERROR` tokens, whose `lexeme` carries a diagnostic
/// message instead of a source slice.
#[derive(Debug, Clone, Copy)]
pub struct Token<'src> {
  pub kind: TokenKind,
  pub offset: usize,
  pub length: usize,
  pub line: usize,
  pub lexeme: &'src str,
}

impl<'src> Token<'src> {
  pub fn is_kind(&self, kind: TokenKind) -> bool {
    self.kind == kind
  }
}
