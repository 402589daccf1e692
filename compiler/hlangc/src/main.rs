//! HLang CLI.

use hlangc::commands::{lex_file, parse_file, run_file};

fn main() {
    // RUST_LOG selects tracing output; off by default.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: hlang run <file.hl>");
                std::process::exit(1);
            }
            run_file(&args[2]);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: hlang lex <file.hl>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: hlang parse <file.hl>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("HLang {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // If it looks like a source file, run it directly.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("hl"))
            {
                run_file(command);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("HLang expression language");
    println!();
    println!("Usage: hlang <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.hl>     Evaluate a source file, printing each value");
    println!("  lex <file.hl>     Tokenize and display tokens");
    println!("  parse <file.hl>   Parse and display AST info");
    println!("  help              Show this help message");
    println!("  version           Show version information");
    println!();
    println!("Examples:");
    println!("  hlang run calc.hl");
    println!("  hlang lex calc.hl");
    println!("  RUST_LOG=trace hlang parse calc.hl");
}
