//! # charmer demo application
//!
//! A sample CLI tool that shows how to bind a clap command line and a
//! confique config onto an argument struct with charmer. It exists purely to
//! demonstrate and manually verify the binder.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example charmer_demo -- serve
//! cargo run --example charmer_demo -- --config demo.toml serve --port 8080
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                  | How to exercise it                                                   |
//! |--------------------------|----------------------------------------------------------------------|
//! | Compiled defaults        | `cargo run --example charmer_demo -- serve`                          |
//! | Config file              | `cargo run --example charmer_demo -- --config demo.toml serve`       |
//! | Env var override         | `CHARMER_DEMO_SERVER_PORT=9999 cargo run --example charmer_demo -- serve` |
//! | Typed flag wins          | `cargo run --example charmer_demo -- serve --port 8080`              |
//! | Global flag              | `cargo run --example charmer_demo -- --verbose serve`                |
//! | Repeated flag            | `cargo run --example charmer_demo -- serve --tag a --tag b`          |
//! | Binder logging           | `RUST_LOG=charmer=debug cargo run --example charmer_demo -- serve`   |

mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgMatches, Command, CommandFactory, FromArgMatches, Parser, Subcommand};
use confique::Config;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use charmer::{Bind, BindError, Binder, Binding, ClapFlags, TomlSource};

use config::DemoConfig;

/// charmer demo: bind flags and config onto a struct.
#[derive(Parser, Debug)]
#[command(name = "charmer-demo")]
struct Cli {
    /// Enable verbose output.
    #[arg(long, global = true)]
    verbose: bool,

    /// Read configuration from this TOML file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// Serve's fields are read back through `ClapFlags`, not through the derive.
#[allow(dead_code)]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the settings the server would start with.
    Serve {
        /// Override the server host.
        #[arg(long)]
        host: Option<String>,

        /// Override the server port.
        #[arg(long)]
        port: Option<u16>,

        /// Attach a label (repeatable).
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
}

/// Everything `serve` needs, filled by the binder.
#[derive(Debug, Default)]
struct ServeArgs {
    name: String,
    verbose: bool,
    host: String,
    port: u16,
    max_connections: u32,
    tags: Vec<String>,
}

impl Bind for ServeArgs {
    fn bindings(&mut self) -> Vec<Binding<'_>> {
        charmer::bindings!(self {
            name: key = "name";
            verbose: flag = "verbose", key = "verbose";
            host: flag = "host", key = "server.host";
            port: flag = "port", key = "server.port";
            max_connections: key = "server.max_connections";
            tags: flag = "tag", key = "server.tags";
        })
    }
}

fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_source(cli: &Cli) -> Result<TomlSource, BindError> {
    let mut builder = DemoConfig::builder();
    if let Some(path) = &cli.config {
        builder = builder.file(path);
    }

    let mut source = TomlSource::load(builder)?.with_env_prefix("CHARMER_DEMO");
    source.bind_env("server.host")?;
    source.bind_env("server.port")?;
    Ok(source)
}

fn serve(source: &mut TomlSource, command: &Command, matches: &ArgMatches) -> Result<(), BindError> {
    let flags = ClapFlags::new(command, matches);
    let mut args = ServeArgs::default();
    Binder::new(source).flags(&flags).bind(&mut args)?;

    info!(name = %args.name, "starting");
    println!("{:<16} {}", "name", args.name);
    println!("{:<16} {}", "verbose", args.verbose);
    println!("{:<16} {}", "host", args.host);
    println!("{:<16} {}", "port", args.port);
    println!("{:<16} {}", "max_connections", args.max_connections);
    println!("{:<16} {}", "tags", args.tags.join(", "));
    Ok(())
}

fn main() -> ExitCode {
    // Parse through the mutable command so the tree is built and global args
    // are visible on subcommands.
    let mut command = Cli::command();
    let matches = command.get_matches_mut();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    setup_tracing(cli.verbose);

    let mut source = match load_source(&cli) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to load config:\n{e}");
            return ExitCode::FAILURE;
        }
    };

    let result = match &cli.command {
        Commands::Serve { .. } => {
            let (Some(sub), Some(sub_matches)) = (
                command.find_subcommand("serve"),
                matches.subcommand_matches("serve"),
            ) else {
                return ExitCode::FAILURE;
            };
            serve(&mut source, sub, sub_matches)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Bind error:\n{e}");
            ExitCode::FAILURE
        }
    }
}
