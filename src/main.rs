use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::process;

use clap::Parser;
use tokio::sync::mpsc;

use onetouchd::cli::Args;
use onetouchd::config::{path::find_config_file, Config};
use onetouchd::drivers::onetouch::{
    clock::{Clock, FixedStepClock},
    decoder::DecodeError,
    driver::Driver,
    event::{Action, Diagnostic},
};
use onetouchd::input::target::pointer::{PointerConfig, PointerDevice};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let args = Args::parse();

    let log_level = match env::var("LOG_LEVEL") {
        Ok(value) => value,
        Err(_) => "info".to_string(),
    };
    env::set_var("RUST_LOG", log_level);
    env_logger::init();
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    log::info!("Starting onetouchd v{}", VERSION);

    // Setup CTRL+C handler
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Unable to listen for shutdown signal: {e}");
            return;
        }
        log::info!("Shutting down");
        process::exit(0);
    });

    let mut config = load_config(&args)?;
    if let Some(device) = args.device.as_ref() {
        config.device = device.clone();
    }
    log::debug!("Using config: {config:?}");

    // Create the virtual pointer that actions are sent to
    let pointer_config = PointerConfig {
        name: config.pointer_name.clone(),
        target: config.target,
        dry_run: args.dry_run,
        ..Default::default()
    };
    let pointer = PointerDevice::new(pointer_config);
    let tx = pointer.transmitter();

    // Decoding blocks on every byte, so it runs on its own thread
    let mut driver_task = match args.replay.as_ref() {
        Some(path) => {
            log::info!("Replaying reports from {path:?}");
            let file = File::open(path)?;
            let driver = Driver::from_reader(file, &config, FixedStepClock::default());
            tokio::task::spawn_blocking(move || match run_driver(driver, tx) {
                Err(DecodeError::TransportEnded(e)) if e.kind() == ErrorKind::UnexpectedEof => {
                    log::info!("Replay finished");
                    Ok(())
                }
                result => result,
            })
        }
        None => {
            let driver = Driver::new(config.device.as_str(), &config)?;
            tokio::task::spawn_blocking(move || run_driver(driver, tx))
        }
    };

    // The pointer stops on its own once the driver drops its transmitter,
    // or early if it fails. A failed pointer leaves the driver blocked on
    // the port, so it is not waited for.
    let pointer_task = pointer.run();
    tokio::pin!(pointer_task);
    let mut pointer_done = false;
    let driver_result = tokio::select! {
        result = &mut pointer_task => {
            if let Err(e) = result {
                log::error!("Error running virtual pointer: {e}");
                return Err(e);
            }
            pointer_done = true;
            (&mut driver_task).await
        }
        result = &mut driver_task => result,
    };

    match driver_result {
        Ok(Ok(())) => log::info!("The driver task has exited"),
        Ok(Err(e)) => {
            log::error!("Touchscreen driver stopped: {e}");
            return Err(e.into());
        }
        Err(e) => {
            log::error!("Error in joining the driver task: {e}");
            return Err(e.into());
        }
    }

    // Deliver anything still queued for the pointer
    if !pointer_done {
        pointer_task.await?;
    }

    log::info!("onetouchd stopped");

    Ok(())
}

/// Load the config given on the command line, the first one found in the
/// default locations, or the built-in defaults.
fn load_config(args: &Args) -> Result<Config, Box<dyn Error + Send + Sync>> {
    let path = args.config.clone().or_else(find_config_file);
    let Some(path) = path else {
        log::info!("No config file found. Using defaults.");
        return Ok(Config::default());
    };
    log::info!("Loading config from {path:?}");
    Ok(Config::from_yaml_file(path)?)
}

/// Poll the driver and forward its actions until the transport ends or
/// the pointer device goes away.
fn run_driver<R: Read, C: Clock>(
    mut driver: Driver<R, C>,
    tx: mpsc::Sender<Action>,
) -> Result<(), DecodeError> {
    loop {
        let actions = driver.poll()?;
        for action in actions {
            let touch_ended = matches!(
                action,
                Action::Diagnostic(Diagnostic::SessionEnded { .. })
            );
            if let Err(e) = tx.blocking_send(action) {
                log::debug!("Pointer device is gone: {e}");
                return Ok(());
            }
            if touch_ended {
                log::debug!("Calibration: {:?}", driver.calibration());
            }
        }
    }
}
