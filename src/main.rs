use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser;
use jal::interpreter::{
    checker::core::check, evaluator::core::Context, lexer::tokenize, parser::core::parse,
};
use serde::Serialize;

/// jal is an interpreter for JAL, a small statically-typed imperative
/// scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the .jal source file to run.
    file: PathBuf,

    /// Additionally write JSON dumps of the token stream, the AST, the
    /// checker result and the execution step log to ./outputs/.
    #[arg(short, long)]
    debug: bool,

    /// Print the execution step log to stdout after the program finishes.
    #[arg(short, long)]
    output: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(_) => {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      args.file.display());
            return ExitCode::FAILURE;
        },
    };

    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        },
    };
    if args.debug {
        write_dump("token.json", &tokens);
    }

    let program = match parse(&tokens) {
        Ok(program) => program,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        },
    };
    if args.debug {
        write_dump("AST.json", &program);
    }

    let errors = check(&program);
    if args.debug {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        write_dump("walker.json", &messages);
    }
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("{error}");
        }
        return ExitCode::FAILURE;
    }

    let mut context = if args.debug || args.output {
        Context::new().with_trace()
    } else {
        Context::new()
    };

    let run_result = context.run(&program);

    if let Some(steps) = context.steps() {
        if args.debug {
            write_dump("EXE.json", &steps);
        }
        if args.output {
            for step in steps {
                if step.detail.is_empty() {
                    println!("{} {}", step.index, step.kind);
                } else {
                    println!("{} {} {}", step.index, step.kind, step.detail);
                }
            }
        }
    }

    if let Err(error) = run_result {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Writes one JSON debug dump under ./outputs/.
///
/// Dump failures are reported but never abort the run; the dumps are a
/// debugging aid, not part of program execution.
fn write_dump<T: Serialize>(name: &str, value: &T) {
    let result = fs::create_dir_all("outputs").and_then(|()| {
        let rendered = serde_json::to_string_pretty(value)
            .expect("AST and token types serialize without fallible state");
        fs::write(PathBuf::from("outputs").join(name), rendered)
    });

    if let Err(error) = result {
        eprintln!("Failed to write outputs/{name}: {error}");
    }
}
