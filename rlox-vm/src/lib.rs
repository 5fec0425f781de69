//! The stack-based virtual machine: a `CallFrame` stack, a value stack, and
//! the fetch-decode-execute loop that drives both. Built on top of
//! `rlox-compiler`'s `Function` output — this crate has no parsing logic of
//! its own.

pub mod errors;

mod frame;
mod vm;

pub use errors::RuntimeError;
pub use vm::{interpret, InterpretResult};
