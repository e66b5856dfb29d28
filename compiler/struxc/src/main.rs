//! Strux CLI
//!
//! Structural JSON templates driven by an embedded expression language.

use std::path::Path;

use struxc::commands::{
    eval_expression, parse_expression, parse_render_options, render, CliError, INCLUDE_PATH_VAR,
};

fn main() {
    struxc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    let result = match command.as_str() {
        "render" => {
            let env_paths = std::env::var_os(INCLUDE_PATH_VAR);
            parse_render_options(&args[2..], env_paths.as_deref())
                .and_then(|options| render(&options))
        }
        "eval" => {
            if args.len() < 3 {
                eprintln!("Usage: strux eval <expr> [data.json]");
                std::process::exit(1);
            }
            eval_expression(&args[2], args.get(3).map(Path::new))
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: strux parse <expr>");
                std::process::exit(1);
            }
            parse_expression(&args[2])
        }
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("error: {err}");
            if matches!(err, CliError::Usage(_)) {
                eprintln!();
                print_usage();
            }
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Strux - structural JSON templates");
    println!();
    println!("Usage: strux <command> [options]");
    println!();
    println!("Commands:");
    println!("  render <template.json> [data.json]   Process a template");
    println!("  eval <expr> [data.json]              Evaluate one expression");
    println!("  parse <expr>                         Show the parse tree of an expression");
    println!("  help                                 Show this message");
    println!();
    println!("Render options:");
    println!("  -I <dir>       Add an include directory (repeatable)");
    println!("  -p, --pretty   Pretty-print the output");
    println!();
    println!("Environment:");
    println!("  {INCLUDE_PATH_VAR}     Extra include directories, searched after -I");
    println!("  RUST_LOG       Tracing filter, e.g. strux_template=debug");
}
