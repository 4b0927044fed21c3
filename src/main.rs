/* 3rd party libraries */
use clap::Parser;
use crossbeam_channel as cbc;
use log::{info, warn};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/* Custom libraries */
use elevator_sim::elevator::{runner, simulate, Action, Status};
use elevator_sim::script::RequestScript;
use elevator_sim::{load_config, unwrap_or_exit, CarState, Config, ElevatorController, Phase};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Simulates a single elevator car serving a list of floor requests")]
struct Args {
    /// Path to the TOML configuration file
    #[clap(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Floors to request, in order, e.g. 3,0,5
    #[clap(short, long, value_delimiter = ',')]
    floors: Vec<u8>,

    /// Give up after this many seconds of simulated (or wall-clock) time
    #[clap(long, default_value = "300")]
    max_seconds: u64,

    /// Print every snapshot as a JSON line instead of status lines
    #[clap(long)]
    json: bool,

    /// Tick on a real-time clock instead of as fast as possible
    #[clap(long)]
    real_time: bool,
}

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Load the configuration
    let config = if args.config.exists() {
        unwrap_or_exit!(load_config(&args.config), "Failed to load configuration")
    } else {
        warn!(
            "No configuration file at {}, using defaults",
            args.config.display()
        );
        Config::default()
    };

    let controller = unwrap_or_exit!(
        ElevatorController::new(config.elevator.clone()),
        "Invalid elevator configuration"
    );
    let script = RequestScript::new(args.floors.iter().copied());
    let limit = Duration::from_secs(args.max_seconds);

    let final_state = if args.real_time || config.simulation.real_time {
        run_real_time(controller, script, &config, &args, limit)
    } else {
        run_simulated(controller, script, &config, &args, limit)
    };

    info!("Final state: {}", final_state);
}

fn run_simulated(
    mut controller: ElevatorController,
    mut script: RequestScript,
    config: &Config,
    args: &Args,
    limit: Duration,
) -> CarState {
    let tick = config.simulation.tick();
    let max_ticks = (limit.as_millis() / tick.as_millis().max(1)) as usize;
    let floor_count = config.elevator.floor_count;
    let mut last_phase = controller.snapshot().phase;

    submit_ready(&mut controller, &mut script, floor_count);

    let status = simulate(&mut controller, tick, max_ticks, |controller, state| {
        report(state, controller.elapsed(), &mut last_phase, args.json);
        submit_ready(controller, &mut script, floor_count);

        if script.is_empty() && simulate::is_at_rest(&controller.snapshot()) {
            Action::Stop
        } else {
            Action::Continue
        }
    });

    if status == Status::TickLimitReached {
        warn!("Stopped after {} s of simulated time", limit.as_secs());
    }
    controller.snapshot()
}

fn run_real_time(
    mut controller: ElevatorController,
    mut script: RequestScript,
    config: &Config,
    args: &Args,
    limit: Duration,
) -> CarState {
    let floor_count = config.elevator.floor_count;
    let snapshot_rx = controller.subscribe();
    let mut last_phase = controller.snapshot().phase;
    let started = Instant::now();

    let handle = unwrap_or_exit!(
        runner::spawn(controller, config.simulation.tick()),
        "Failed to start simulation thread"
    );

    let mut latest = CarState::new();
    while started.elapsed() < limit {
        match snapshot_rx.recv_timeout(Duration::from_secs(1)) {
            Ok(state) => report(&state, started.elapsed(), &mut last_phase, args.json),
            Err(cbc::RecvTimeoutError::Timeout) => continue,
            Err(cbc::RecvTimeoutError::Disconnected) => break,
        }

        // Queued snapshots may predate our last request, so decide on the live state.
        latest = match handle.snapshot() {
            Some(state) => state,
            None => break,
        };

        if let Some(floor) = script.next_ready(&latest, floor_count, |f| handle.is_selectable(f)) {
            match handle.select_floor(floor) {
                Some(Ok(_)) => continue,
                Some(Err(reason)) => warn!("Request for floor {} rejected: {}", floor, reason),
                None => break,
            }
        }

        if script.is_empty() && simulate::is_at_rest(&latest) {
            break;
        }
    }

    handle.stop().unwrap_or(latest)
}

fn submit_ready(controller: &mut ElevatorController, script: &mut RequestScript, floor_count: u8) {
    let state = controller.snapshot();
    if let Some(floor) = script.next_ready(&state, floor_count, |f| controller.is_selectable(f)) {
        if let Err(reason) = controller.select_floor(floor) {
            warn!("Request for floor {} rejected: {}", floor, reason);
        }
    }
}

fn report(state: &CarState, elapsed: Duration, last_phase: &mut Phase, json: bool) {
    if json {
        match serde_json::to_string(state) {
            Ok(line) => println!("{}", line),
            Err(e) => warn!("Failed to serialize snapshot: {}", e),
        }
    } else if state.phase != *last_phase {
        println!("{:>8.3}s {}", elapsed.as_secs_f64(), state);
    }
    *last_phase = state.phase;
}
