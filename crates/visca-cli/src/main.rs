//! `visca` - one-shot control of VISCA cameras from the shell.

mod cli;
mod output;
mod run;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use visca_camera::{Camera, CameraConfig, SessionConfig};
use visca_hardware::{SerialConfig, SerialTransport, available_ports};

use crate::cli::{Cli, Command, LineArgs};
use crate::output::Outcome;

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn open_camera(line: &LineArgs, diagnostics: bool) -> Result<Camera<SerialTransport>> {
    let serial = SerialConfig::new(&line.port).with_baud_rate(line.baud);
    let transport = SerialTransport::open(serial)
        .with_context(|| format!("failed to open serial port {}", line.port))?;

    let session = SessionConfig::default()
        .with_timeout(Duration::from_millis(line.timeout_ms))
        .with_diagnostics(diagnostics);

    debug!(port = %line.port, baud = line.baud, address = %line.address, "Opened line");
    Ok(Camera::with_session(
        transport,
        CameraConfig::new(line.address),
        session,
    ))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Command::Ports => Outcome::Ports(available_ports().context("failed to list serial ports")?),
        command => {
            let mut camera = open_camera(&cli.line, cli.verbose >= 2)?;
            run::run_on(&mut camera, command)?
        }
    };

    output::print(&outcome, cli.json);
    Ok(())
}
