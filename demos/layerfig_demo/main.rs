//! # layerfig demo application
//!
//! A sample service launcher that resolves its settings with layerfig. It
//! exists to demonstrate and manually verify the layering, not to do work.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example layerfig_demo -- serve
//! cargo run --example layerfig_demo -- list
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature               | How to exercise it                                                        |
//! |-----------------------|---------------------------------------------------------------------------|
//! | Defaults              | `cargo run --example layerfig_demo -- list`                               |
//! | Config file           | `echo '{"port": 8000}' > config.json`, then `-- --config config.json list` |
//! | Environment           | `PORT=5000 cargo run --example layerfig_demo -- list`                     |
//! | Dotenv cascade        | Put `.env` / `.env.dev` in a dir, then `-- --env-dir DIR --profile dev list` |
//! | Command line          | `cargo run --example layerfig_demo -- --port 9000 --debug list`           |
//! | Single key            | `cargo run --example layerfig_demo -- get port`                           |
//! | Validation            | `serve` fails until `DASHSCOPE_API_KEY` or `--api-key` is set             |
//! | Logging               | `RUST_LOG=layerfig=debug cargo run --example layerfig_demo -- list`       |

mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use layerfig::{ConfigResolver, EnvFiles, LayerfigError, ResolvedConfig};

use config::DemoConfig;

/// layerfig demo: a sample launcher showing layered configuration.
#[derive(Parser, Debug)]
#[command(name = "layerfig-demo")]
struct Cli {
    /// JSON config file.
    #[arg(long, global = true, default_value = "config.json")]
    config: PathBuf,

    /// Directory holding `.env` files. Without it the process environment is used as is.
    #[arg(long, global = true)]
    env_dir: Option<PathBuf>,

    /// Dotenv profile (`.env.{profile}`).
    #[arg(long, global = true)]
    profile: Option<String>,

    // The flags below are read by the resolver from the raw argument list.
    // They are declared here so clap accepts them and lists them in --help.
    /// Interface to bind to.
    #[arg(long, global = true)]
    host: Option<String>,

    /// Port to listen on.
    #[arg(long, global = true, allow_negative_numbers = true)]
    port: Option<String>,

    /// Enable debug mode.
    #[arg(long, global = true)]
    debug: bool,

    /// API key for the model provider.
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the configuration and print the server banner.
    Serve,
    /// Print every resolved key with its source.
    List,
    /// Print a single resolved key with its source.
    Get { key: String },
}

fn resolve(cli: &Cli) -> Result<ResolvedConfig, LayerfigError> {
    let environment = match &cli.env_dir {
        Some(dir) => {
            let mut files = EnvFiles::new(dir);
            if let Some(profile) = &cli.profile {
                files = files.profile(profile);
            }
            files.load(std::env::vars())?
        }
        None => std::env::vars().collect(),
    };

    let mut resolver = ConfigResolver::new(config::schema());
    resolver
        .strict(false)
        .with_defaults()
        .with_file(&cli.config)?
        .with_environment(environment)?
        .with_command_line(std::env::args().skip(1))?;
    Ok(resolver.build())
}

fn serve(resolved: &ResolvedConfig) -> Result<(), LayerfigError> {
    resolved.validate_schema(&config::schema())?;
    let config: DemoConfig = resolved.extract()?;
    println!(
        "Serving on {}:{} (debug: {}, model: {})",
        config.host, config.port, config.debug, config.api.model_name
    );
    Ok(())
}

fn run(cli: &Cli) -> Result<(), LayerfigError> {
    let resolved = resolve(cli)?;
    match &cli.command {
        Commands::Serve => serve(&resolved)?,
        Commands::List => println!("{}", resolved.listing()),
        Commands::Get { key } => println!("{}", resolved.lookup(key)?),
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Config error:\n{e}");
        process::exit(1);
    }
}
