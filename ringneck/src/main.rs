use std::{env, fs, io, io::Write, process};

use colored::*;
use interpreter::{Builtins, MapSubject};
use ringneck::{run, RunOptions};

fn main() {
  let args: Vec<String> = env::args().collect();

  match args.len() {
    1 => run_interactive_mode(),
    2 => run_file(&args[1]),
    _ => {
      eprintln!("{}", "usage: ringneck [script]".red().bold());
      process::exit(64);
    },
  }
}

fn run_file(path: &str) {
  let source = match fs::read_to_string(path) {
    Ok(source) => source,
    Err(err) => {
      eprintln!("{} {}: {}", "[Error]".red().bold(), path, err);
      process::exit(74);
    },
  };

  let mut subject = MapSubject::new();
  let builtins = Builtins::new();
  let options = RunOptions::new().verbose(true);

  match run(&source, &mut subject, &builtins, &options) {
    Ok(values) => {
      for value in values {
        println!("{}", value);
      }
    },
    Err(err) => {
      eprintln!("{} {}", "[Error]".red().bold(), err);
      process::exit(70);
    },
  }
}

fn run_interactive_mode() {
  println!("{}", "ringneck interactive mode — Ctrl-D to exit".cyan().bold());
  let mut subject = MapSubject::new();
  let builtins = Builtins::new();
  let options = RunOptions::new();

  loop {
    print!("> ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    if io::stdin().read_line(&mut line).unwrap_or(0) == 0 {
      println!();
      break;
    }
    if line.trim().is_empty() {
      continue;
    }

    match run(&line, &mut subject, &builtins, &options) {
      Ok(values) => {
        for value in values {
          println!("{}", value);
        }
      },
      Err(err) => eprintln!("{} {}", "[Error]".red().bold(), err),
    }
  }
}
