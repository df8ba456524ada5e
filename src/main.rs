use std::io::{self, BufRead};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rpn_calc::{calculate, evaluate_postfix, format_infix, to_postfix};

/// Format, convert and evaluate infix arithmetic expressions
#[derive(Parser, Debug)]
#[command(name = "rpn-calc", version)]
struct Args {
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the canonical infix form
    Format(Expr),
    /// Print the postfix (reverse polish) form
    Postfix(Expr),
    /// Evaluate an infix expression
    Calc(Expr),
    /// Evaluate a space-separated postfix expression
    Eval(Expr),
    /// Print formatted, postfix and result one per line
    Pipeline(Expr),
}

#[derive(clap::Args, Debug)]
struct Expr {
    /// Expression words, joined with spaces. Read one expression per stdin line when absent
    #[arg(
        value_name = "EXPR",
        allow_hyphen_values = true,
        allow_negative_numbers = true,
        trailing_var_arg = true
    )]
    words: Vec<String>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: &Command, source: &str) -> Result<String> {
    Ok(match command {
        Command::Format(_) => format_infix(source)?,
        Command::Postfix(_) => to_postfix(source)?.to_string(),
        Command::Calc(_) => calculate(source)?.to_string(),
        Command::Eval(_) => evaluate_postfix(source)?.to_string(),
        Command::Pipeline(_) => {
            // The formatted text goes through the converter, the raw text
            // through the evaluator; both agree.
            let formatted = format_infix(source)?;
            let postfix = to_postfix(&formatted)?;
            let value = calculate(source)?;
            format!("{}\n{}\n{}", formatted, postfix, value)
        }
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let expr = match &args.command {
        Command::Format(expr)
        | Command::Postfix(expr)
        | Command::Calc(expr)
        | Command::Eval(expr)
        | Command::Pipeline(expr) => expr,
    };

    if !expr.words.is_empty() {
        let source = expr.words.join(" ");
        let out = run(&args.command, &source).with_context(|| format!("`{}`", source))?;
        println!("{}", out);
        return Ok(());
    }

    let mut failed = 0usize;
    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        match run(&args.command, &line) {
            Ok(out) => println!("{}", out),
            Err(err) => {
                eprintln!("error: `{}`: {:#}", line.trim(), err);
                failed += 1;
            }
        }
    }
    info!(failed, "stdin done");
    if failed > 0 {
        bail!("{} expression(s) failed", failed);
    }
    Ok(())
}
