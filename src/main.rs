//! cpuid-name - Processor signature lookup
//!
//! Reads the signature from CPUID leaf 1 (EAX), normalizes it to lowercase
//! hex and reports the marketing name of the processor family it belongs to.
//! Unknown signatures end the process with a non-zero exit status.

mod config;
mod hardware;
mod signatures;

use crate::config::Config;
use crate::hardware::{CpuInfo, CpuidReader, HardwareCpuid, SIGNATURE_LEAF};
use crate::signatures::{Signature, SignatureResolver};
use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter (e.g. "debug")
const LOG_ENV: &str = "CPUID_NAME_LOG";

/// cpuid-name - Identify the processor family from its CPUID signature
#[derive(Parser)]
#[command(name = "cpuid-name")]
#[command(version)]
#[command(about = "Report which processor family this machine's CPUID signature belongs to")]
struct Cli {}

/// Route diagnostics to stderr so stdout only carries the result line.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn log_environment() {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    match CpuInfo::detect() {
        Ok(info) => debug!("Operating system reports {}", info.summary()),
        Err(err) => debug!("Could not query CPU details: {err:#}"),
    }
}

/// Read the signature, resolve it and print the result line.
fn run(reader: &dyn CpuidReader, resolver: &SignatureResolver, out: &mut dyn Write) -> Result<()> {
    let registers = reader
        .cpuid(SIGNATURE_LEAF)
        .context("Failed to read CPUID leaf 1")?;
    debug!(?registers, "CPUID leaf {SIGNATURE_LEAF:#x}");

    let signature = Signature::from_eax(registers.eax);
    let name = resolver.resolve(signature.as_str())?;
    debug!("Resolved {signature} to '{name}'");

    writeln!(out, "CPUID: {signature} which appears to be a {name} processor")?;
    Ok(())
}

fn main() -> ExitCode {
    let _cli = Cli::parse();

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    init_logging(&config);
    if let Some(err) = config_error {
        warn!("Using default configuration: {err:#}");
    }

    let resolver = SignatureResolver::with_extra_signatures(&config.signatures);
    log_environment();

    let stdout = io::stdout();
    match run(&HardwareCpuid, &resolver, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".bright_red(), format!("{err:#}").bright_red());
            ExitCode::FAILURE
        }
    }
}
