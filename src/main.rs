//! ToolForge CLI.
//!
//! Thin command-line front for the library:
//!   - `chat` streams a reply to stdout, cancellable with Ctrl-C
//!   - `history` prints the stored conversation
//!   - `json` formats or validates JSON from a file or stdin
//!   - `hash` prints digests of its input

use std::io::{Read, Write};
use std::path::PathBuf;

use futures::StreamExt;
use tracing_subscriber::EnvFilter;

use toolforge::chat::{ChatClient, StreamState, Transcript};
use toolforge::config::Config;
use toolforge::tools::hash::{self, HashAlgorithm};
use toolforge::tools::json;

// ---------------------------------------------------------------------------
// CLI argument parsing (minimal, no clap dependency)
// ---------------------------------------------------------------------------

enum Command {
    Chat { prompt: String, model: Option<String> },
    History,
    Json { path: Option<PathBuf>, minify: bool },
    Hash { algorithm: HashAlgorithm, text: Option<String> },
}

struct CliArgs {
    config_path: PathBuf,
    command: Command,
}

fn parse_args() -> CliArgs {
    let mut args = std::env::args().skip(1);
    let mut config_path = PathBuf::from("toolforge.toml");
    let mut command = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                if let Some(path) = args.next() {
                    config_path = PathBuf::from(path);
                } else {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("toolforge {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "chat" => {
                let mut prompt = None;
                let mut model = None;
                while let Some(next) = args.next() {
                    match next.as_str() {
                        "--model" | "-m" => model = args.next(),
                        other => prompt = Some(other.to_string()),
                    }
                }
                let Some(prompt) = prompt else {
                    eprintln!("Error: chat requires a prompt argument");
                    std::process::exit(1);
                };
                command = Some(Command::Chat { prompt, model });
            }
            "history" => {
                command = Some(Command::History);
            }
            "json" => {
                let mut path = None;
                let mut minify = false;
                for next in args.by_ref() {
                    match next.as_str() {
                        "--minify" => minify = true,
                        other => path = Some(PathBuf::from(other)),
                    }
                }
                command = Some(Command::Json { path, minify });
            }
            "hash" => {
                let Some(spec) = args.next() else {
                    eprintln!("Error: hash requires an algorithm argument");
                    std::process::exit(1);
                };
                let algorithm = match spec.parse::<HashAlgorithm>() {
                    Ok(a) => a,
                    Err(e) => {
                        eprintln!("Error: {e}");
                        eprintln!(
                            "Supported: {}",
                            HashAlgorithm::ALL
                                .iter()
                                .map(ToString::to_string)
                                .collect::<Vec<_>>()
                                .join(", ")
                        );
                        std::process::exit(1);
                    }
                };
                command = Some(Command::Hash {
                    algorithm,
                    text: args.next(),
                });
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Run with --help for usage information.");
                std::process::exit(1);
            }
        }
    }

    let Some(command) = command else {
        print_usage();
        std::process::exit(1);
    };

    CliArgs {
        config_path,
        command,
    }
}

fn print_usage() {
    println!(
        "\
toolforge {version} -- developer utilities client

USAGE:
    toolforge [OPTIONS] <COMMAND>

COMMANDS:
    chat <PROMPT> [--model <MODEL>]    Stream a chat reply to stdout (Ctrl-C cancels)
    history                            Print the stored conversation
    json [FILE] [--minify]             Format JSON from FILE or stdin
    hash <ALGORITHM> [TEXT]            Digest TEXT or stdin (e.g. sha-256, md5, sha3-512)

OPTIONS:
    -c, --config <PATH>    Path to configuration file [default: toolforge.toml]
    -h, --help             Print this help message
    -V, --version          Print version information

ENVIRONMENT:
    RUST_LOG               Override log level (e.g. RUST_LOG=debug)
    TOOLFORGE_CONFIG       Alternative to --config flag
",
        version = env!("CARGO_PKG_VERSION")
    );
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    // Allow TOOLFORGE_CONFIG env var as alternative to --config flag
    let config_path = std::env::var("TOOLFORGE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or(cli.config_path);

    let config = Config::load(&config_path)?;
    init_tracing(&config);

    match cli.command {
        Command::Chat { prompt, model } => run_chat(&config, &prompt, model.as_deref()).await,
        Command::History => run_history(&config).await,
        Command::Json { path, minify } => run_json(path.as_deref(), minify),
        Command::Hash { algorithm, text } => run_hash(algorithm, text.as_deref()),
    }
}

async fn run_chat(config: &Config, prompt: &str, model: Option<&str>) -> anyhow::Result<()> {
    let client = ChatClient::builder()
        .base_url(config.api.base_url.clone())
        .session_store(config.session_store())
        .build();

    let mut transcript = Transcript::new();
    transcript.submit_prompt(prompt);

    let mut stream = match model {
        Some(model) => client.stream_chat_with_model(prompt, model).await?,
        None => client.stream_chat(prompt).await?,
    };
    let reply = transcript.begin_reply();

    // Ctrl-C cancels the stream; the sequence then ends without an error.
    let handle = stream.handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });

    let mut stdout = std::io::stdout();
    while let Some(item) = stream.next().await {
        match item {
            Ok(fragment) => {
                transcript.append_fragment(reply, &fragment);
                print!("{fragment}");
                stdout.flush()?;
            }
            Err(e) => {
                transcript.fail(reply);
                println!();
                return Err(e.into());
            }
        }
    }
    println!();

    transcript.complete(reply);
    if stream.state() == StreamState::Cancelled {
        tracing::info!("stream cancelled");
    }
    Ok(())
}

async fn run_history(config: &Config) -> anyhow::Result<()> {
    let client = ChatClient::builder()
        .base_url(config.api.base_url.clone())
        .session_store(config.session_store())
        .build();

    for entry in client.history().await? {
        println!("[{:?}] {}", entry.role, entry.content);
    }
    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn run_json(path: Option<&std::path::Path>, minify: bool) -> anyhow::Result<()> {
    let input = read_input(path)?;
    let output = if minify {
        json::minify(&input)?
    } else {
        json::format(&input)?
    };
    println!("{output}");
    Ok(())
}

fn run_hash(algorithm: HashAlgorithm, text: Option<&str>) -> anyhow::Result<()> {
    let input = match text {
        Some(text) => text.to_string(),
        None => read_input(None)?,
    };
    println!("{}", hash::digest_hex(algorithm, &input));
    Ok(())
}
