//! Command-line driver for the circuit simulator.
//!
//! This binary builds one of two demonstration circuits and runs it. It provides:
//! 1. **Counter:** A register fed back through a ripple-carry adder, stepped for a number of
//!    cycles; the trace is printed as text or JSON.
//! 2. **Add:** A single combinational ripple-carry addition of two operands, evaluated in one
//!    cycle.
//!
//! Log output is controlled with `RUST_LOG` (for example `RUST_LOG=ripplesim_core=debug`).

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ripplesim_core::common::Result;
use ripplesim_core::config::Config;
use ripplesim_core::{Circuit, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "ripplesim",
    author,
    version,
    about = "Cycle-accurate ripple-carry adder and counter simulator",
    long_about = "Build a counter or an adder out of one-bit full adders and simulate it.\n\nExamples:\n  ripplesim counter --width 3 --cycles 15\n  ripplesim counter --config counter.json --json\n  ripplesim add --width 8 200 100 --carry-in 1"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a counter register driven by `counter + 1`.
    Counter {
        /// JSON configuration file; command-line flags override it.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Counter width in bits.
        #[arg(short, long)]
        width: Option<u32>,

        /// Number of cycles to simulate.
        #[arg(short = 'n', long)]
        cycles: Option<u64>,

        /// Print the trace as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Print simulation statistics after the trace.
        #[arg(long)]
        stats: bool,
    },

    /// Add two values with a ripple-carry adder.
    Add {
        /// Operand width in bits.
        #[arg(short, long, default_value_t = 8)]
        width: u32,

        /// First operand.
        a: u128,

        /// Second operand.
        b: u128,

        /// Carry into the least significant bit (0 or 1).
        #[arg(long, default_value_t = 0)]
        carry_in: u128,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Counter {
            config,
            width,
            cycles,
            json,
            stats,
        } => cmd_counter(config, width, cycles, json, stats),
        Commands::Add {
            width,
            a,
            b,
            carry_in,
        } => cmd_add(width, a, b, carry_in),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Builds the counter from configuration, runs it, and prints the trace.
fn cmd_counter(
    config_path: Option<PathBuf>,
    width: Option<u32>,
    cycles: Option<u64>,
    json: bool,
    stats: bool,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(width) = width {
        config.circuit.width = width;
    }
    if let Some(cycles) = cycles {
        config.simulation.cycles = cycles;
    }

    let mut circuit = Circuit::new();
    let counter = circuit.register_with_reset(
        &config.circuit.name,
        config.circuit.width,
        u128::from(config.circuit.reset_value),
    )?;
    let (next, _carry) = circuit.ripple_add(counter, 1u8)?;
    counter.drive_next(&mut circuit, next)?;

    let mut sim = Simulator::from_config(&circuit, &config.simulation)?;
    sim.step(config.simulation.cycles)?;
    info!(cycles = sim.cycle(), "counter simulation finished");

    let mut out = io::stdout().lock();
    if json {
        writeln!(out, "{}", sim.trace().to_json()?).map_err(export_error)?;
    } else {
        sim.trace().write_text(&mut out).map_err(export_error)?;
    }
    out.flush().map_err(export_error)?;
    if stats {
        sim.stats.print();
    }
    Ok(())
}

/// Adds `a + b + carry_in` in a `width`-bit adder and prints sum and carry.
fn cmd_add(width: u32, a: u128, b: u128, carry_in: u128) -> Result<()> {
    let mut circuit = Circuit::new();
    let lhs = circuit.input("a", width)?;
    let rhs = circuit.input("b", width)?;
    let cin = circuit.input("carry_in", 1)?;
    let (sum, carry) = circuit.ripple_add_with_carry(lhs, rhs, cin)?;
    let sum = circuit.name(sum, "sum")?;
    let carry = circuit.name(carry, "carry_out")?;

    let mut sim = Simulator::new(&circuit, &[sum.into(), carry.into()])?;
    sim.step_with([("a", a), ("b", b), ("carry_in", carry_in)])?;
    println!("sum       {}", sim.read(sum)?);
    println!("carry_out {}", sim.read(carry)?);
    Ok(())
}

fn export_error(e: io::Error) -> ripplesim_core::CircuitError {
    ripplesim_core::CircuitError::Export(e.to_string())
}
