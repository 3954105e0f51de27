use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use fieldgate_policy::{Engine, PolicyConfig, Session};
use tracing::info;

use crate::cmd::RunArgs;
use crate::exit::{session_error, transport_error, CliError, CliResult, SUCCESS};

pub fn run(args: RunArgs) -> CliResult<i32> {
    let stream = fieldgate_transport::connect(&args.host, args.port)
        .map_err(|err| transport_error("connect failed", err))?;
    let reader = stream
        .try_clone()
        .map_err(|err| transport_error("stream split failed", err))?;

    let config = PolicyConfig {
        light_threshold: args.light_threshold,
        light_on_secs: args.light_on_secs,
        irrigation_on_secs: args.irrigation_on_secs,
        tick_interval: args.tick_interval,
    };
    let mut session = Session::new(reader, stream, Engine::new(config));

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    info!(host = %args.host, port = args.port, "connected; entering dispatch loop");

    // The stop flag is only observed between iterations: a blocking
    // read holds until the next frame arrives or the peer closes.
    while running.load(Ordering::SeqCst) {
        session
            .step()
            .map_err(|err| session_error("session failed", err))?;
    }

    info!(iterations = session.engine().ticks(), "dispatch loop stopped");
    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
