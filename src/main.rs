//! `mafmt` - print which patterns a protocol stack matches.
//!
//! ```text
//! mafmt [--grammar FILE] <proto>...
//! mafmt ip4 tcp ws
//! mafmt --grammar transports.yaml ip4 udp quic
//! ```
//!
//! With the `multiaddr` feature a single `/`-prefixed argument is decoded as
//! a multiaddr string. Log verbosity comes from `MAFMT_LOG` (default `warn`).

use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use mafmt::Grammar;

const USAGE: &str = "usage: mafmt [--grammar FILE] <proto>...";

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let filter = env::var("MAFMT_LOG").unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let (grammar_path, protos) = match parse_args(env::args().skip(1))? {
        Command::Help => {
            println!("{USAGE}");
            return Ok(ExitCode::SUCCESS);
        }
        Command::Classify { grammar, protos } => (grammar, protos),
    };
    if protos.is_empty() {
        eprintln!("{USAGE}");
        return Ok(ExitCode::from(2));
    }
    let grammar = match grammar_path {
        Some(path) => Grammar::load(path)?,
        None => Grammar::default(),
    };

    let protos = decode(protos)?;
    let matched = grammar.classify(protos.as_slice());
    if matched.is_empty() {
        println!("no pattern matches {}", protos.join("/"));
        return Ok(ExitCode::FAILURE);
    }
    for name in matched {
        println!("{name}");
    }
    Ok(ExitCode::SUCCESS)
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Classify {
        grammar: Option<PathBuf>,
        protos: Vec<String>,
    },
}

/// At most one `--grammar` is accepted.
fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, String> {
    let mut grammar = None;
    let mut protos = Vec::new();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--grammar" | "-g" => {
                let path = args.next().ok_or_else(|| USAGE.to_string())?;
                if grammar.replace(PathBuf::from(path)).is_some() {
                    return Err(format!("--grammar given more than once\n{USAGE}"));
                }
            }
            "--help" | "-h" => return Ok(Command::Help),
            _ => protos.push(arg),
        }
    }
    Ok(Command::Classify { grammar, protos })
}

#[cfg(feature = "multiaddr")]
fn decode(args: Vec<String>) -> Result<Vec<String>, Box<dyn Error>> {
    use mafmt::ProtoNames;

    match args.as_slice() {
        [addr] if addr.starts_with('/') => Ok(addr
            .as_str()
            .proto_names()?
            .into_iter()
            .map(|name| name.into_owned())
            .collect()),
        _ => Ok(args),
    }
}

#[cfg(not(feature = "multiaddr"))]
fn decode(args: Vec<String>) -> Result<Vec<String>, Box<dyn Error>> {
    Ok(args)
}
