//! viewfinder - replay a recorded input trace through the interaction controller
//!
//! Every outbound controller event is printed to stdout as it is emitted.

use anyhow::{Context, Result};
use clap::{Arg, Command};
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use viewfinder::host::{EventCapture, ForwardedSensor};
use viewfinder::input::{parse_trace, TraceStep};
use viewfinder::thumbnail::PlaceholderDecoder;
use viewfinder::{run_controller, Controller, ControllerConfig, ControllerInput, ModeHandle};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let matches = Command::new("viewfinder")
        .version(viewfinder::VERSION)
        .about("Replay a camera-preview input trace through the interaction controller")
        .long_about(
            "Reads a line-oriented trace (`<ms> <verb> [args...]`), feeds it to the \
             controller at the recorded pace, and prints every event the controller emits.",
        )
        .arg(
            Arg::new("trace")
                .help("Path to the input trace")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("TOML file overriding controller defaults"),
        )
        .arg(
            Arg::new("speed")
                .long("speed")
                .value_name("FACTOR")
                .value_parser(clap::value_parser!(f64))
                .default_value("1.0")
                .help("Replay speed multiplier"),
        )
        .get_matches();

    let trace_path = PathBuf::from(
        matches
            .get_one::<String>("trace")
            .context("trace argument is required")?,
    );
    let speed = matches.get_one::<f64>("speed").copied().unwrap_or(1.0);
    if !(speed.is_finite() && speed > 0.0) {
        anyhow::bail!("--speed must be a positive number, got {speed}");
    }

    let config = load_config(matches.get_one::<String>("config").map(PathBuf::from))?;
    let source = std::fs::read_to_string(&trace_path)
        .with_context(|| format!("Failed to read trace {}", trace_path.display()))?;
    let steps = parse_trace(&source)?;

    let modes = ModeHandle::default();
    let controller = Controller::new(
        config,
        modes.clone(),
        Box::new(ForwardedSensor::default()),
        Box::new(EventCapture::default()),
    )?;

    let (input_tx, input_rx) = mpsc::channel(64);
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let runtime = tokio::spawn(run_controller(
        controller,
        input_rx,
        event_tx,
        Arc::new(PlaceholderDecoder::default()),
    ));
    let printer = tokio::spawn(async move {
        let mut events = UnboundedReceiverStream::new(event_rx);
        while let Some(event) = events.next().await {
            println!("{event:?}");
        }
    });

    let started = tokio::time::Instant::now();
    for timed in steps {
        let offset = Duration::from_secs_f64(timed.at as f64 / 1000.0 / speed);
        tokio::time::sleep_until(started + offset).await;

        let input = match timed.step {
            TraceStep::Input(input) => input,
            TraceStep::SetFlag { flag, value } => {
                modes.update(|flags| flag.set(flags, value));
                ControllerInput::ModesChanged
            }
        };
        if input_tx.send(input).await.is_err() {
            anyhow::bail!("controller loop stopped before the trace finished");
        }
    }

    drop(input_tx);
    runtime.await.context("controller loop panicked")?;
    printer.await.context("event printer panicked")?;
    Ok(())
}

#[cfg(feature = "config")]
fn load_config(explicit: Option<PathBuf>) -> Result<ControllerConfig> {
    if let Some(path) = explicit {
        return Ok(ControllerConfig::load(path)?);
    }
    match ControllerConfig::default_path() {
        Ok(path) if path.is_file() => Ok(ControllerConfig::load(path)?),
        _ => Ok(ControllerConfig::default()),
    }
}

#[cfg(not(feature = "config"))]
fn load_config(explicit: Option<PathBuf>) -> Result<ControllerConfig> {
    if let Some(path) = explicit {
        anyhow::bail!(
            "{} given but viewfinder was built without the `config` feature",
            path.display()
        );
    }
    Ok(ControllerConfig::default())
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_version_constant() {
        assert!(!viewfinder::VERSION.is_empty());
    }
}
