//! CLI entry point for inspecting code listings.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use cheat_core as _;
use codelist::{load_codes, DecryptUnavailable, Listing};

const HELP_TEXT: &str = "Usage: codelist <listing> [--local <listing>] [--help]";

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    global: PathBuf,
    local: Option<PathBuf>,
}

#[derive(Debug)]
enum ParseResult {
    Args(CliArgs),
    Help,
}

fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut global: Option<PathBuf> = None;
    let mut local: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        if arg == "--help" {
            return Ok(ParseResult::Help);
        }

        if arg == "--local" {
            let value = args
                .next()
                .ok_or_else(|| String::from("missing value for --local"))?;
            local = Some(PathBuf::from(value));
            continue;
        }

        if arg.to_string_lossy().starts_with('-') {
            return Err(format!("unknown option: {}", arg.to_string_lossy()));
        }

        if global.is_some() {
            return Err(String::from("multiple listing paths provided"));
        }
        global = Some(PathBuf::from(arg));
    }

    let global = global.ok_or_else(|| String::from("missing listing path"))?;
    Ok(ParseResult::Args(CliArgs { global, local }))
}

fn inspect(args: &CliArgs) -> Result<bool, String> {
    let read = |path: &PathBuf| {
        std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
    };

    let global = Listing::parse(&read(&args.global)?);
    let local = match &args.local {
        Some(path) => Listing::parse(&read(path)?),
        None => Listing::new(),
    };

    let outcome = load_codes(&global, &local, &DecryptUnavailable);

    for code in &outcome.codes {
        let state = if code.active { "on " } else { "off" };
        let origin = if code.user_defined { "user" } else { "dist" };
        println!("[{state}] [{origin}] {} ({} ops)", code.name, code.ops.len());
    }
    for error in &outcome.errors {
        eprintln!("error: {error}");
    }

    Ok(outcome.errors.is_empty())
}

fn main() -> ExitCode {
    match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{HELP_TEXT}");
            ExitCode::SUCCESS
        }
        Ok(ParseResult::Args(args)) => match inspect(&args) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(error) => {
                eprintln!("error: {error}");
                ExitCode::FAILURE
            }
        },
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{HELP_TEXT}");
            ExitCode::FAILURE
        }
    }
}
