use std::io::Write;
use std::{env, fs, io, process};

use rlox_vm::InterpretResult;

fn main() {
  let args = env::args().collect::<Vec<String>>();

  match args.as_slice() {
    [_] => repl(),
    [_, path] => run_file(path),
    _ => {
      eprintln!("Usage: rlox [path]");
      process::exit(64);
    }
  }
}

fn run_file(path: &str) {
  let source = fs::read_to_string(path).unwrap_or_else(|err| {
    eprintln!("Could not read file '{}': {}", path, err);
    process::exit(74);
  });

  let (result, _, _) = rlox_vm::interpret(&source);
  process::exit(exit_code(result));
}

/// Prompt `"> "`, one line at a time; a blank line ends the session. Each
/// line is compiled and run independently — there's no shared VM state or
/// persisted locals across lines.
fn repl() {
  let stdin = io::stdin();
  loop {
    print!("> ");
    io::stdout().flush().expect("stdout should be writable");

    let mut line = String::new();
    let bytes_read = stdin.read_line(&mut line).expect("stdin should be readable");
    if bytes_read == 0 || line.trim_end_matches(['\n', '\r']).is_empty() {
      break;
    }

    rlox_vm::interpret(&line);
  }
}

fn exit_code(result: InterpretResult) -> i32 {
  match result {
    InterpretResult::Ok => 0,
    InterpretResult::CompileError => 65,
    InterpretResult::RuntimeError => 70,
  }
}
