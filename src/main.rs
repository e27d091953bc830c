use std::{io::{self, BufRead, Write}, path::{Path, PathBuf}};

use anyhow::{bail, Context};
use atomscript::{parse, tokenize, AtomError, EvalConfig, EvaluationContext};
use serde_json::json;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: atomscript [--config <path>] [--file <path> | --tokens <path> | --ast <path>]";

enum Mode {
    Repl,
    File(PathBuf),
    Tokens(PathBuf),
    Ast(PathBuf),
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<(Mode, EvalConfig)> {
    let mut mode = Mode::Repl;
    let mut config = EvalConfig::default();

    while let Some(flag) = args.next() {
        let mut path = || args.next().map(PathBuf::from).with_context(|| format!("{} expects a path\n{}", flag, USAGE));
        match flag.as_str() {
            "--config" => {
                let path = path()?;
                config = EvalConfig::from_path(&path).with_context(|| format!("reading config {}", path.display()))?;
            }
            "--file" => mode = Mode::File(path()?),
            "--tokens" => mode = Mode::Tokens(path()?),
            "--ast" => mode = Mode::Ast(path()?),
            other => bail!("unknown argument {}\n{}", other, USAGE),
        }
    }

    Ok((mode, config.with_env()))
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn repl(config: EvalConfig) -> anyhow::Result<()> {
    let mut context = EvaluationContext::with_config(config);
    let mut stdout = io::stdout();

    println!("Welcome to Atom Script! Feel free to type in commands");
    print!(">> ");
    stdout.flush()?;

    for line in io::stdin().lock().lines() {
        match context.evaluate_lines(&line?) {
            Ok(results) => results.iter().for_each(|result| println!("{}", result)),
            Err(AtomError::Syntax(errors)) => errors.iter().for_each(|error| println!("{}", error)),
            Err(error) => println!("{}", error),
        }
        print!(">> ");
        stdout.flush()?;
    }

    println!();
    Ok(())
}

fn run_file(path: &Path, config: EvalConfig) -> anyhow::Result<()> {
    let source = read_source(path)?;
    let mut context = EvaluationContext::with_config(config);

    match context.evaluate_lines(&source) {
        Ok(results) => {
            results.iter().for_each(|result| println!("{}", result));
            Ok(())
        }
        Err(AtomError::Syntax(errors)) => {
            errors.iter().for_each(|error| eprintln!("{}", error));
            bail!("{} could not be parsed ({} errors)", path.display(), errors.len())
        }
        Err(error) => Err(error.into()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("ATOM_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let (mode, config) = parse_args(std::env::args().skip(1))?;
    tracing::debug!(?config, "starting");

    match mode {
        Mode::Repl => repl(config),
        Mode::File(path) => run_file(&path, config),
        Mode::Tokens(path) => {
            let source = read_source(&path)?;
            println!("{}", serde_json::to_string_pretty(&json!({ "tokens": tokenize(&source) }))?);
            Ok(())
        }
        Mode::Ast(path) => {
            let source = read_source(&path)?;
            let (program, errors) = parse(&source);
            let output = if errors.is_empty() { json!({ "ast": program }) } else { json!({ "errors": errors }) };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
    }
}
