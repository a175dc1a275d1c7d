// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! typeforge-demo - Exercise the construction engine on sample types
//!
//! Loads `.cfg` files into config records, wires a game object graph from its
//! root type, and prints registered type descriptions.

mod samples;

use clap::{Parser, Subcommand, ValueEnum};
use samples::{GameConfig, ServerConfiguration, TicTacToeGame, UserInterfaceConfig};
use std::path::{Path, PathBuf};
use typeforge::{
    construct_with_as, inspect, instantiate_as, ConfigPopulator, HashMapTypeRegistry,
    PopulateOptions, UnknownFieldPolicy,
};

/// typeforge demo tool
#[derive(Parser, Debug)]
#[command(name = "typeforge-demo")]
#[command(version = "0.1.0")]
#[command(about = "Build sample objects from registered type metadata")]
struct Args {
    #[command(subcommand)]
    mode: Mode,

    /// Log filter used when RUST_LOG is unset
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Load a config file into a sample record and print it
    Config {
        /// Record to populate
        #[arg(value_enum)]
        kind: ConfigKind,

        /// Path to the .cfg file
        file: PathBuf,

        /// Fail on keys that name no field
        #[arg(long)]
        strict: bool,

        /// Print each readable field after loading
        #[arg(short, long)]
        fields: bool,
    },

    /// Build a server configuration through its constructors
    Server {
        /// Listening port
        #[arg(short, long, default_value = "8080")]
        port: i32,

        /// Greeting sent to clients (uses the one-argument constructor if absent)
        #[arg(short, long)]
        greeting: Option<String>,
    },

    /// Wire the tic-tac-toe graph from its root type and play a match
    Wire,

    /// Print a registered type's constructors and fields
    Describe {
        /// Type name, e.g. GameConfig
        name: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ConfigKind {
    Game,
    Ui,
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let registry = samples::registry()?;
    match &args.mode {
        Mode::Config {
            kind,
            file,
            strict,
            fields,
        } => run_config(registry, *kind, file, *strict, *fields),
        Mode::Server { port, greeting } => run_server(registry, *port, greeting.clone()),
        Mode::Wire => run_wire(registry),
        Mode::Describe { name } => run_describe(registry, name),
    }
}

fn run_config(
    registry: &HashMapTypeRegistry,
    kind: ConfigKind,
    file: &Path,
    strict: bool,
    fields: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = PopulateOptions {
        unknown_fields: if strict {
            UnknownFieldPolicy::Reject
        } else {
            UnknownFieldPolicy::Warn
        },
    };
    let populator = ConfigPopulator::new(registry).with_options(options);
    log::info!("loading {:?} config from {}", kind, file.display());

    match kind {
        ConfigKind::Game => {
            let config: GameConfig = populator.load_path_as(file)?;
            println!("{}", config);
            if fields {
                for snapshot in inspect(registry, &config)? {
                    println!("  {}", snapshot);
                }
            }
        }
        ConfigKind::Ui => {
            let config: UserInterfaceConfig = populator.load_path_as(file)?;
            println!("{}", config);
            if fields {
                for snapshot in inspect(registry, &config)? {
                    println!("  {}", snapshot);
                }
            }
        }
    }
    Ok(())
}

fn run_server(
    registry: &HashMapTypeRegistry,
    port: i32,
    greeting: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut args: Vec<typeforge::Instance> = vec![Box::new(port)];
    if let Some(greeting) = greeting {
        args.push(Box::new(greeting));
    }

    let config: ServerConfiguration = construct_with_as(registry, args)?;
    println!("{}", config);
    Ok(())
}

fn run_wire(registry: &HashMapTypeRegistry) -> Result<(), Box<dyn std::error::Error>> {
    let mut game: TicTacToeGame = instantiate_as(registry)?;
    log::info!("object graph wired");
    game.start();
    Ok(())
}

fn run_describe(
    registry: &HashMapTypeRegistry,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let desc = registry
        .descriptors()
        .find(|d| d.name() == name)
        .ok_or_else(|| format!("type {} is not registered", name))?;
    print!("{}", desc);
    Ok(())
}
