use crate::errors::KeycapError;
use clap::{Arg, ArgAction, Command};
use keycap_core::ipc::{Message, Pipe};
use keycap_core::worker::Status;
use keycap_core::{config::Config, worker::Worker};
use std::fs;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use xdg::BaseDirectories;

use tracing_subscriber::{filter::EnvFilter, filter::LevelFilter, fmt, layer::SubscriberExt};

pub mod config;
pub mod errors;

const QUIT_COMMAND: &str = "quit";
const RELOAD_COMMAND: &str = "reload";

fn main() {
    setup_logging();
    let matches = get_app().get_matches();
    tracing::info!("keycap booted!");

    if matches.get_flag(QUIT_COMMAND) {
        send_message(&Message::Kill);
    } else if matches.get_flag(RELOAD_COMMAND) {
        send_message(&Message::Reload);
    } else {
        let mut old_config = None;
        let path = BaseDirectories::with_prefix(keycap_core::KEYCAP_DIR_NAME);
        loop {
            let config = match config::load() {
                Ok(config) => config,
                Err(err) => match old_config {
                    Some(config) => {
                        tracing::error!("Keeping previous config, new one failed to load: {}", err);
                        config
                    }
                    None => {
                        tracing::error!("Unable to load new config due to error: {}", err);
                        return;
                    }
                },
            };
            let kill_requested = AtomicBool::new(false);
            let completed = std::panic::catch_unwind(|| {
                let rt = errors::return_on_error!(tokio::runtime::Runtime::new());
                let _rt_guard = rt.enter();

                let status = rt.block_on(Worker::new(config.shortcuts(), path.clone()).event_loop());
                kill_requested.store(status == Status::Kill, Ordering::SeqCst);
            });

            match completed {
                Ok(()) => tracing::info!("Completed"),
                Err(err) => tracing::error!("Completed with error: {:?}", err),
            }
            if kill_requested.load(Ordering::SeqCst) {
                return;
            }
            old_config = Some(config);
        }
    }
}

fn send_message(message: &Message) {
    let path = BaseDirectories::with_prefix(keycap_core::KEYCAP_DIR_NAME);
    let pipe_file = errors::exit_on_error!(path.place_runtime_file(Pipe::pipe_name()));
    let mut pipe = errors::exit_on_error!(fs::OpenOptions::new().write(true).open(&pipe_file));
    errors::exit_on_error!(writeln!(pipe, "{message}"));
}

fn get_app() -> Command {
    clap::command!()
        .arg(
            Arg::new(QUIT_COMMAND)
                .short('q')
                .long(QUIT_COMMAND)
                .action(ArgAction::SetTrue)
                .help("Quit a running daemon instance"),
        )
        .arg(
            Arg::new(RELOAD_COMMAND)
                .short('r')
                .long(RELOAD_COMMAND)
                .action(ArgAction::SetTrue)
                .conflicts_with(QUIT_COMMAND)
                .help("Reload daemon to apply changes to the shortcut list"),
        )
}

fn setup_logging() {
    let subscriber = fmt::Layer::new().with_writer(std::io::stdout);
    let log_level = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env_lossy();

    let collector = tracing_subscriber::registry()
        .with(log_level)
        .with(subscriber);

    tracing::subscriber::set_global_default(collector).expect("Couldn't setup logging");
}
