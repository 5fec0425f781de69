//! Parser/compiler plumbing: token-stream bookkeeping, error reporting, and
//! the per-function compiler state stack. The grammar itself (parselets and
//! statement rules) lives in `expressions.rs` and `statements.rs`; local
//! resolution lives in `functions.rs`. All three are `impl Compiler` blocks
//! that extend the type defined here.

use rlox_core::{Chunk, Function, FunctionKind, OpCode, Token, TokenKind, Value};
use rlox_lexer::Lexer;

use crate::errors::CompileError;

/// Constant operands and local-slot operands are each a single byte, so a
/// function can declare at most this many locals.
pub const LOCALS_MAX: usize = 256;

/// A compile-time record of one declared name. `depth == -1` means
/// "declared but not yet initialized" — the sentinel that lets
/// `let a = a;` be rejected as a self-reference rather than silently
/// reading garbage.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Local<'src> {
  pub name: Token<'src>,
  pub depth: i32,
}

/// Per-function compiler state: the `Function` under construction, its
/// locals, and the current lexical scope depth. One of these exists per
/// nested `fun` plus one for the implicit script function; together they
/// form `Compiler::scopes`, an explicit stack standing in for the linked
/// chain of enclosing compilers the design notes warn against modeling as
/// self-referential objects.
pub(crate) struct FunctionScope<'src> {
  pub function: Function,
  pub locals: Vec<Local<'src>>,
  pub scope_depth: i32,
}

impl<'src> FunctionScope<'src> {
  fn new(kind: FunctionKind, name: Option<String>) -> Self {
    // Slot 0 of every function's locals is reserved for the callee itself.
    // It is never resolvable by name.
    let reserved_slot = Local {
      name: Token {
        kind: TokenKind::IDENTIFIER,
        offset: 0,
        length: 0,
        line: 0,
        lexeme: "",
      },
      depth: 0,
    };
    Self {
      function: Function::new(kind, name),
      locals: vec![reserved_slot],
      scope_depth: 0,
    }
  }
}

/// Token-stream and error-recovery state, independent of which function is
/// currently being compiled.
pub(crate) struct Parser<'src> {
  lexer: Lexer<'src>,
  pub previous: Token<'src>,
  pub current: Token<'src>,
  pub had_error: bool,
  pub panic_mode: bool,
}

impl<'src> Parser<'src> {
  fn new(source: &'src str) -> Self {
    let placeholder = Token {
      kind: TokenKind::EOF,
      offset: 0,
      length: 0,
      line: 1,
      lexeme: "",
    };
    let mut parser = Self {
      lexer: Lexer::new(source),
      previous: placeholder,
      current: placeholder,
      had_error: false,
      panic_mode: false,
    };
    parser.advance();
    parser
  }

  fn advance(&mut self) {
    self.previous = self.current;
    loop {
      self.current = self.lexer.scan_token();
      if self.current.kind != TokenKind::ERROR {
        break;
      }
      self.report_scan_error();
    }
  }

  fn report_scan_error(&mut self) {
    if self.panic_mode {
      return;
    }
    self.panic_mode = true;
    self.had_error = true;
    eprintln!("[line {}] Error: {}", self.current.line, self.current.lexeme);
  }

  fn check(&self, kind: TokenKind) -> bool {
    self.current.kind == kind
  }

  fn match_token(&mut self, kind: TokenKind) -> bool {
    if !self.check(kind) {
      return false;
    }
    self.advance();
    true
  }

  fn consume(&mut self, kind: TokenKind, message: &'static str) {
    if self.current.kind == kind {
      self.advance();
    } else {
      self.error_at_current(CompileError::Expected(message));
    }
  }

  fn error_at_current(&mut self, err: CompileError) {
    let token = self.current;
    self.error_at(token, err);
  }

  fn error_at_previous(&mut self, err: CompileError) {
    let token = self.previous;
    self.error_at(token, err);
  }

  /// Prints `[line N] Error at X: message` and enters panic mode, unless
  /// already in panic mode — cascading diagnostics from the same
  /// desynchronized point are suppressed until `synchronize` resyncs.
  fn error_at(&mut self, token: Token<'src>, err: CompileError) {
    self.had_error = true;
    if self.panic_mode {
      return;
    }
    self.panic_mode = true;
    let where_ = if token.kind == TokenKind::EOF {
      "end".to_string()
    } else {
      format!("'{}'", token.lexeme)
    };
    eprintln!("[line {}] Error at {}: {}", token.line, where_, err.message());
  }

  /// Consumes tokens until a statement boundary, then clears panic mode:
  /// either a `;` was just consumed, or the current token starts a new
  /// declaration/statement that should be parsed normally.
  fn synchronize(&mut self) {
    self.panic_mode = false;
    while self.current.kind != TokenKind::EOF {
      if self.previous.kind == TokenKind::SEMICOLON {
        return;
      }
      match self.current.kind {
        TokenKind::FUN | TokenKind::LET | TokenKind::RETURN => return,
        _ => self.advance(),
      }
    }
  }
}

/// Drives compilation of one source file into a tree of `Function`s (the
/// root `Script` function plus one per nested `fun`). Holds the token
/// stream (`parser`) and the stack of per-function scopes currently being
/// compiled (`scopes`); the innermost (last) scope is where bytecode is
/// currently being emitted.
pub struct Compiler<'src> {
  pub(crate) parser: Parser<'src>,
  pub(crate) scopes: Vec<FunctionScope<'src>>,
}

impl<'src> Compiler<'src> {
  fn new(source: &'src str) -> Self {
    Self {
      parser: Parser::new(source),
      scopes: vec![FunctionScope::new(FunctionKind::Script, None)],
    }
  }

  pub(crate) fn advance(&mut self) {
    self.parser.advance();
  }

  pub(crate) fn check(&self, kind: TokenKind) -> bool {
    self.parser.check(kind)
  }

  pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
    self.parser.match_token(kind)
  }

  pub(crate) fn consume(&mut self, kind: TokenKind, message: &'static str) {
    self.parser.consume(kind, message);
  }

  pub(crate) fn error_at_current(&mut self, err: CompileError) {
    self.parser.error_at_current(err);
  }

  pub(crate) fn error_at_previous(&mut self, err: CompileError) {
    self.parser.error_at_previous(err);
  }

  pub(crate) fn synchronize(&mut self) {
    self.parser.synchronize();
  }

  pub(crate) fn current_scope(&mut self) -> &mut FunctionScope<'src> {
    self.scopes.last_mut().expect("scopes is never empty while compiling")
  }

  pub(crate) fn current_chunk(&mut self) -> &mut Chunk {
    &mut self.current_scope().function.chunk
  }

  pub(crate) fn emit_byte(&mut self, byte: u8) {
    let line = self.parser.previous.line;
    self.current_chunk().write(byte, line);
  }

  pub(crate) fn emit_op(&mut self, op: OpCode) {
    let line = self.parser.previous.line;
    self.current_chunk().write_op(op, line);
  }

  pub(crate) fn emit_op_byte(&mut self, op: OpCode, byte: u8) {
    self.emit_op(op);
    self.emit_byte(byte);
  }

  pub(crate) fn emit_constant(&mut self, value: Value) {
    match self.current_chunk().add_constant(value) {
      Ok(index) => self.emit_op_byte(OpCode::Constant, index),
      Err(()) => self.error_at_previous(CompileError::TooManyConstants),
    }
  }

  /// Pushes a fresh `FunctionScope` for a nested `fun` body. Paired with
  /// `end_compiler`, which pops it back off once the body is parsed.
  pub(crate) fn begin_function(&mut self, kind: FunctionKind, name: Option<String>) {
    self.scopes.push(FunctionScope::new(kind, name));
  }

  /// Emits the implicit trailing `OP_RETURN` and pops the innermost
  /// `FunctionScope`, handing back the `Function` it built. The root
  /// script scope is deliberately never scope-closed with `end_scope` —
  /// its implicit block (see `begin_scope` in `compile`) stays open for
  /// the whole program, which is what lets top-level `let`/`fun` resolve
  /// as locals.
  pub(crate) fn end_compiler(&mut self) -> Function {
    self.emit_op(OpCode::Return);
    self.scopes.pop().expect("end_compiler always pairs with a pushed scope").function
  }

  pub(crate) fn begin_scope(&mut self) {
    self.current_scope().scope_depth += 1;
  }

  /// Closes the innermost block: decrements `scope_depth`, then emits one
  /// `OP_POP` per local that falls out of scope, removing it from the
  /// compiler's own bookkeeping in lockstep.
  pub(crate) fn end_scope(&mut self) {
    self.current_scope().scope_depth -= 1;
    loop {
      let scope = self.current_scope();
      let depth = scope.scope_depth;
      let should_pop = scope.locals.last().map(|local| local.depth > depth).unwrap_or(false);
      if !should_pop {
        break;
      }
      self.current_scope().locals.pop();
      self.emit_op(OpCode::Pop);
    }
  }
}

/// Compiles `source` into the root `Function`. Returns `None` if any syntax
/// or scope error was reported; individual diagnostics are printed to
/// stderr as they're found rather than collected and returned.
pub fn compile(source: &str) -> Option<Function> {
  let mut compiler = Compiler::new(source);

  // The script body is compiled inside an implicit scope of depth 1 so
  // that top-level `let`/`fun` declarations resolve as locals rather than
  // needing a separate global-variable mechanism this language doesn't have.
  compiler.begin_scope();

  while !compiler.check(TokenKind::EOF) {
    compiler.declaration();
  }

  let function = compiler.end_compiler();
  if compiler.parser.had_error {
    None
  } else {
    Some(function)
  }
}
