use std::{env, fs::read_to_string, process::ExitCode, time::Instant};

use teeny::{format_error, lexer::lexer::{LexerConfig, Scanner}};

fn main() -> ExitCode {
    let mut file_path = None;
    let mut config = LexerConfig::default();

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--newlines" => config.emit_newlines = true,
            _ if file_path.is_none() => file_path = Some(arg.clone()),
            _ => return usage(),
        }
    }

    let Some(file_path) = file_path else {
        return usage();
    };

    let file_name = file_path.rsplit('/').next().unwrap_or(&file_path).to_string();

    let source = match read_to_string(&file_path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Failed to read {}: {}", file_path, err);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();

    for token in Scanner::with_config(&source, Some(file_name), config) {
        match token {
            Ok(token) => token.debug(),
            Err(error) => {
                eprint!("{}", format_error(&error, &source));
                return ExitCode::FAILURE;
            }
        }
    }

    println!("Tokenized in {:?}", start.elapsed());

    ExitCode::SUCCESS
}

fn usage() -> ExitCode {
    eprintln!("usage: teeny <file> [--newlines]");
    ExitCode::from(2)
}
