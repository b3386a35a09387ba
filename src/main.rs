//! Exercise Counter - timed repeat counters for exercises
//!
//! This is the terminal driver: it reads one command per line from stdin and
//! prints the resulting view as JSON on stdout. Logs go to stderr.

use serde::Serialize;
use tracing::{error, info, warn};

use exercise_counter::{
    api::{
        handle_intent,
        intents::COMMAND_HELP,
        parse_command, Answer, Command, Intent, Outcome,
    },
    config::Config,
    state::{App, ExerciseStore, RunSession},
    storage::{BlobStore, FileBlobStore, MemoryBlobStore},
    tasks::TokioScheduler,
    utils::{shutdown_signal, spawn_line_reader},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("exercise_counter={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    config.validate()?;

    info!("Starting exercise-counter v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: seconds={}..={}, max_ticks={}, in_memory={}",
        config.min_seconds, config.max_seconds, config.max_ticks, config.in_memory
    );

    let blob = open_blob_store(&config);
    let store = ExerciseStore::open_with_rules(blob, config.storage_key.clone(), config.rules());

    let (scheduler, mut tick_rx) = TokioScheduler::new();
    let run = RunSession::new(Box::new(scheduler), config.max_ticks);
    let mut app = App::new(store, run, config.rules());
    let mut view_rx = app.subscribe();

    print_json(&app.view());

    // Stdin is read on its own thread so a pending read never delays exit
    let mut input_rx = spawn_line_reader(std::io::BufReader::new(std::io::stdin()));
    let mut pending_delete: Option<u64> = None;

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = input_rx.recv() => {
                let Some(line) = line else {
                    info!("Input closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                if !handle_line(&mut app, &line, &mut pending_delete) {
                    break;
                }
            }

            Some(handle) = tick_rx.recv() => {
                app.on_tick(handle);
            }

            Ok(()) = view_rx.changed() => {
                let view = view_rx.borrow_and_update().clone();
                print_json(&view);
            }

            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    app.run.close();
    info!("Exercise counter stopped");
    Ok(())
}

/// Pick the persistence backend, degrading to memory if the disk is unusable
fn open_blob_store(config: &Config) -> Box<dyn BlobStore> {
    if config.in_memory {
        info!("Running in memory, nothing will be saved");
        return Box::new(MemoryBlobStore::new());
    }
    match FileBlobStore::open(&config.data_dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(
                "Cannot use data directory {}, continuing in memory: {}",
                config.data_dir.display(),
                e
            );
            Box::new(MemoryBlobStore::new())
        }
    }
}

/// Handle one input line; returns `false` when the driver should exit
fn handle_line(app: &mut App, line: &str, pending_delete: &mut Option<u64>) -> bool {
    let command = match parse_command(line) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{} (type 'help' for commands)", e);
            return true;
        }
    };

    match command {
        Command::Quit => return false,
        Command::Help => println!("{}", COMMAND_HELP),
        Command::View => print_json(&app.view()),
        Command::Answer(yes) => match pending_delete.take() {
            Some(id) => {
                let outcome = handle_intent(app, Intent::Delete { id }, &mut Answer(yes));
                print_json(&outcome);
            }
            None => eprintln!("Nothing to confirm"),
        },
        Command::Intent(Intent::Delete { id }) => match app.store.get(id) {
            Some(record) => {
                println!("Delete \"{}\"? (yes/no)", record.name);
                *pending_delete = Some(id);
            }
            None => print_json(&Outcome::not_found(id)),
        },
        Command::Intent(intent) => {
            let outcome = handle_intent(app, intent, &mut Answer(false));
            print_json(&outcome);
        }
    }
    true
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Failed to serialize output: {}", e),
    }
}
