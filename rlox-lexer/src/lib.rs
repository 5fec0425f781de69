//! Converts source text into a [`Token`] stream, one token at a time, on
//! demand. The compiler drives this: it calls [`Lexer::scan_token`] each
//! time it wants the next lexeme, rather than the scanner producing the
//! whole stream up front.

use rlox_core::{Token, TokenKind};

/// Scans one token at a time from a borrowed source string.
///
/// The scanner never fails: malformed input produces an `ERROR` token whose
/// `lexeme` carries a diagnostic message, and scanning continues from there.
/// Once the scanner reaches the end of `source`, every subsequent call to
/// `scan_token` returns another `EOF` token.
pub struct Lexer<'src> {
  source: &'src str,
  bytes: &'src [u8],
  /// Byte offset of the first character of the token currently being scanned.
  start: usize,
  /// Byte offset of the next character to consume.
  current: usize,
  line: usize,
}

impl<'src> Lexer<'src> {
  pub fn new(source: &'src str) -> Self {
    Self {
      source,
      bytes: source.as_bytes(),
      start: 0,
      current: 0,
      line: 1,
    }
  }

  /// Scans and returns the next token in the source.
  pub fn scan_token(&mut self) -> Token<'src> {
    self.skip_whitespace_and_comments();
    self.start = self.current;

    if self.is_at_end() {
      return self.make_token(TokenKind::EOF);
    }

    let c = self.advance();

    if is_alpha(c) {
      return self.identifier();
    }
    if c.is_ascii_digit() {
      return self.number();
    }

    match c {
      b'(' => self.make_token(TokenKind::LEFT_PAREN),
      b')' => self.make_token(TokenKind::RIGHT_PAREN),
      b'{' => self.make_token(TokenKind::LEFT_BRACE),
      b'}' => self.make_token(TokenKind::RIGHT_BRACE),
      b';' => self.make_token(TokenKind::SEMICOLON),
      b'-' => self.make_token(TokenKind::MINUS),
      b'+' => self.make_token(TokenKind::PLUS),
      b'/' => self.make_token(TokenKind::SLASH),
      b'*' => self.make_token(TokenKind::STAR),
      b'=' => {
        if self.match_char(b'=') {
          self.make_token(TokenKind::EQUAL_EQUAL)
        } else {
          self.make_token(TokenKind::EQUAL)
        }
      }
      _ => self.error_token("Unexpected character."),
    }
  }

  fn is_at_end(&self) -> bool {
    self.current >= self.bytes.len()
  }

  /// Returns the current character without consuming it, or `\0` at EOF.
  fn peek(&self) -> u8 {
    if self.is_at_end() {
      0
    } else {
      self.bytes[self.current]
    }
  }

  /// Returns the character past the current one without consuming it.
  fn peek_next(&self) -> u8 {
    if self.current + 1 >= self.bytes.len() {
      0
    } else {
      self.bytes[self.current + 1]
    }
  }

  /// Consumes and returns the current character.
  fn advance(&mut self) -> u8 {
    let c = self.bytes[self.current];
    self.current += 1;
    c
  }

  /// Consumes the current character if it matches `expected`.
  fn match_char(&mut self, expected: u8) -> bool {
    if self.is_at_end() || self.bytes[self.current] != expected {
      return false;
    }
    self.current += 1;
    true
  }

  fn skip_whitespace_and_comments(&mut self) {
    loop {
      if self.is_at_end() {
        return;
      }

      match self.peek() {
        b' ' | b'\r' | b'\t' => {
          self.advance();
        }
        b'\n' => {
          self.line += 1;
          self.advance();
        }
        b'/' if self.peek_next() == b'/' => {
          while self.peek() != b'\n' && !self.is_at_end() {
            self.advance();
          }
        }
        _ => return,
      }
    }
  }

  fn identifier(&mut self) -> Token<'src> {
    while is_alpha(self.peek()) || self.peek().is_ascii_digit() {
      self.advance();
    }
    self.make_token(self.identifier_kind())
  }

  /// Classifies the identifier currently spanning `[start, current)` as a
  /// keyword or a plain `IDENTIFIER`, branching on the first character and
  /// then comparing the remaining suffix — this avoids building a string
  /// table just to recognize four keywords.
  fn identifier_kind(&self) -> TokenKind {
    match self.bytes[self.start] {
      b'f' => self.check_keyword(1, "un", TokenKind::FUN),
      b'l' => self.check_keyword(1, "et", TokenKind::LET),
      b'p' => self.check_keyword(1, "rint", TokenKind::PRINT),
      b'r' => self.check_keyword(1, "eturn", TokenKind::RETURN),
      _ => TokenKind::IDENTIFIER,
    }
  }

  /// Checks whether the bytes `[start + offset, current)` match `rest`
  /// exactly; if so, the identifier is the keyword `kind`, otherwise it's a
  /// plain `IDENTIFIER`.
  fn check_keyword(&self, offset: usize, rest: &str, kind: TokenKind) -> TokenKind {
    let suffix_start = self.start + offset;
    let matches_length = self.current - self.start == offset + rest.len();
    if matches_length && &self.source[suffix_start..self.current] == rest {
      kind
    } else {
      TokenKind::IDENTIFIER
    }
  }

  fn number(&mut self) -> Token<'src> {
    while self.peek().is_ascii_digit() {
      self.advance();
    }

    if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
      self.advance();
      while self.peek().is_ascii_digit() {
        self.advance();
      }
    }

    self.make_token(TokenKind::NUMBER)
  }

  fn make_token(&self, kind: TokenKind) -> Token<'src> {
    Token {
      kind,
      offset: self.start,
      length: self.current - self.start,
      line: self.line,
      lexeme: &self.source[self.start..self.current],
    }
  }

  fn error_token(&self, message: &'static str) -> Token<'src> {
    Token {
      kind: TokenKind::ERROR,
      offset: self.start,
      length: message.len(),
      line: self.line,
      lexeme: message,
    }
  }
}

fn is_alpha(c: u8) -> bool {
  c.is_ascii_alphabetic() || c == b'_'
}

#[cfg(test)]
mod tests {
  use super::*;

  fn kinds(source: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(source);
    let mut out = vec![];
    loop {
      let tok = lexer.scan_token();
      let done = tok.kind == TokenKind::EOF;
      out.push(tok.kind);
      if done {
        break;
      }
    }
    out
  }

  #[test]
  fn scans_arithmetic_expression() {
    use TokenKind::*;
    assert_eq!(
      kinds("1 + 2 * 3;"),
      vec![NUMBER, PLUS, NUMBER, STAR, NUMBER, SEMICOLON, EOF]
    );
  }

  #[test]
  fn lexeme_is_exact_source_slice() {
    let mut lexer = Lexer::new("let abc = 42;");
    let let_tok = lexer.scan_token();
    assert_eq!(let_tok.kind, TokenKind::LET);
    assert_eq!(let_tok.lexeme, "let");

    let name_tok = lexer.scan_token();
    assert_eq!(name_tok.kind, TokenKind::IDENTIFIER);
    assert_eq!(name_tok.lexeme, "abc");
    assert_eq!(&"let abc = 42;"[name_tok.offset..name_tok.offset + name_tok.length], "abc");
  }

  #[test]
  fn classifies_keyword_prefixed_identifiers_correctly() {
    assert_eq!(kinds("funky;"), vec![TokenKind::IDENTIFIER, TokenKind::SEMICOLON, TokenKind::EOF]);
    assert_eq!(kinds("letter;"), vec![TokenKind::IDENTIFIER, TokenKind::SEMICOLON, TokenKind::EOF]);
  }

  #[test]
  fn skips_line_comments_and_tracks_line_numbers() {
    let mut lexer = Lexer::new("// a comment\nprint 1;");
    let tok = lexer.scan_token();
    assert_eq!(tok.kind, TokenKind::PRINT);
    assert_eq!(tok.line, 2);
  }

  #[test]
  fn eof_is_idempotent() {
    let mut lexer = Lexer::new("");
    assert_eq!(lexer.scan_token().kind, TokenKind::EOF);
    assert_eq!(lexer.scan_token().kind, TokenKind::EOF);
    assert_eq!(lexer.scan_token().kind, TokenKind::EOF);
  }

  #[test]
  fn unrecognized_character_yields_error_token() {
    let mut lexer = Lexer::new("@");
    let tok = lexer.scan_token();
    assert_eq!(tok.kind, TokenKind::ERROR);
    assert_eq!(tok.lexeme, "Unexpected character.");
  }

  #[test]
  fn decimal_number_is_a_single_token() {
    assert_eq!(kinds("3.14;"), vec![TokenKind::NUMBER, TokenKind::SEMICOLON, TokenKind::EOF]);
  }
}
