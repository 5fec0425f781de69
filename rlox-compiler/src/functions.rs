//! Local-variable declaration and resolution. No global-variable table
//! exists anywhere in this language: every name — including top-level
//! `let`/`fun` — is a local of some enclosing function scope.

use rlox_core::Token;

use crate::compiler::{Compiler, Local, LOCALS_MAX};
use crate::errors::CompileError;

/// Outcome of looking a name up against the current scope's locals.
pub(crate) enum LocalLookup {
  Found(u8),
  /// The name resolves to a local, but that local's initializer is still
  /// being compiled (`depth == -1`) — a `let a = a;`-shaped self-reference.
  SelfReference,
  NotFound,
}

impl<'src> Compiler<'src> {
  fn add_local(&mut self, name: Token<'src>) {
    if self.current_scope().locals.len() >= LOCALS_MAX {
      self.error_at_previous(CompileError::TooManyLocals);
      return;
    }
    self.current_scope().locals.push(Local { name, depth: -1 });
  }

  /// Declares `name` as a new local in the current scope. Scans the
  /// current scope's locals backward (stopping at the first local that
  /// belongs to an enclosing scope) to reject redeclaration of the same
  /// name within the same block — shadowing across nested blocks is legal,
  /// only same-scope collisions are an error.
  pub(crate) fn declare_variable(&mut self, name: Token<'src>) {
    let scope_depth = self.current_scope().scope_depth;
    let already_declared = self.current_scope().locals.iter().rev().any(|local| {
      if local.depth != -1 && local.depth < scope_depth {
        return false;
      }
      local.name.lexeme == name.lexeme
    });

    if already_declared {
      self.error_at_previous(CompileError::AlreadyDeclared);
      return;
    }
    self.add_local(name);
  }

  /// Marks the most recently declared local as initialized at the current
  /// scope depth, making it visible to `resolve_local`. Called once the
  /// local's initializing value has finished compiling (its own
  /// initializer expression, for `let`; immediately, for `fun`, since a
  /// function may recurse into its own name).
  pub(crate) fn mark_initialized(&mut self) {
    let depth = self.current_scope().scope_depth;
    if let Some(local) = self.current_scope().locals.last_mut() {
      local.depth = depth;
    }
  }

  /// Resolves `name` against the current function's locals, innermost
  /// scope first.
  pub(crate) fn resolve_local(&mut self, name: Token<'src>) -> LocalLookup {
    let scope = self.current_scope();
    for (slot, local) in scope.locals.iter().enumerate().rev() {
      if local.name.lexeme == name.lexeme {
        return if local.depth == -1 {
          LocalLookup::SelfReference
        } else {
          LocalLookup::Found(slot as u8)
        };
      }
    }
    LocalLookup::NotFound
  }
}
