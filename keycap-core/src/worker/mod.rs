pub mod context;

use crate::capture::{self, CaptureHandle};
use crate::config::Shortcut;
use crate::errors::{self, KeycapError};
use crate::fullscreen::{Forwarded, FullscreenApi, FullscreenCoordinator};
use crate::ipc::{Message, Pipe};
use crate::platform::{EventBus, PlatformEvent};
use tokio::sync::mpsc;
use xdg::BaseDirectories;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    Reload,
    Kill,
    Continue,
}

pub struct Worker {
    shortcuts: Vec<Shortcut>,
    base_directory: BaseDirectories,

    bus: EventBus,
    capture: Option<CaptureHandle>,
    combination_tx: mpsc::UnboundedSender<Vec<String>>,
    combination_rx: mpsc::UnboundedReceiver<Vec<String>>,

    pub fullscreen: FullscreenCoordinator,
    display: Box<dyn FullscreenApi>,
    pub status: Status,

    /// "Challenge Context": which shortcut is asked for and how it is going
    pub challenge_ctx: context::Challenge,
}

impl Worker {
    pub fn new(shortcuts: Vec<Shortcut>, base_directory: BaseDirectories) -> Self {
        let (combination_tx, combination_rx) = mpsc::unbounded_channel();
        Self {
            status: Status::Continue,
            shortcuts,
            base_directory,
            bus: EventBus::new(),
            capture: None,
            combination_tx,
            combination_rx,
            fullscreen: FullscreenCoordinator::new(),
            display: Box::new(Forwarded),
            challenge_ctx: context::Challenge::new(),
        }
    }

    #[must_use]
    pub fn with_display(mut self, display: Box<dyn FullscreenApi>) -> Self {
        self.display = display;
        self
    }

    pub async fn event_loop(mut self) -> Status {
        let mut pipe = self.get_pipe().await;

        while self.status == Status::Continue {
            match pipe.get_next_message().await {
                Some(message) => self.handle_message(message),
                None => {
                    tracing::error!("Event pipe closed");
                    self.status = Status::Kill;
                }
            }
        }

        self.status
    }

    async fn get_pipe(&self) -> Pipe {
        let pipe_name = Pipe::pipe_name();
        let pipe_file = errors::exit!(self.base_directory.place_runtime_file(pipe_name));
        errors::exit!(Pipe::new(pipe_file).await)
    }

    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    pub fn handle_message(&mut self, message: Message) {
        tracing::trace!("Handling {:?}", message);
        match message {
            Message::Activate => self.activate(),
            Message::Deactivate => self.deactivate(),
            Message::KeyDown(raw) => self.dispatch(&PlatformEvent::KeyDown(raw)),
            Message::KeyUp(raw) => self.dispatch(&PlatformEvent::KeyUp(raw)),
            Message::ContextMenu => self.dispatch(&PlatformEvent::ContextMenu),
            Message::FullscreenChange(is_fullscreen) => {
                self.fullscreen.on_fullscreen_change(is_fullscreen);
                self.dispatch(&PlatformEvent::FullscreenChange(is_fullscreen));
                if self.fullscreen.needs_restore() {
                    tracing::warn!("Fullscreen was left, click to continue in fullscreen");
                }
            }
            Message::Restore => {
                if !self.fullscreen.restore(self.display.as_mut()) {
                    tracing::warn!("Fullscreen could not be restored");
                }
            }
            Message::Skip => {
                self.challenge_ctx.advance(self.shortcuts.len());
                self.announce();
            }
            Message::Reload => self.status = Status::Reload,
            Message::Kill => self.status = Status::Kill,
        }
    }

    fn activate(&mut self) {
        if self.capture.is_some() {
            errors::log!(Err::<(), _>(KeycapError::CaptureActive));
            return;
        }
        let tx = self.combination_tx.clone();
        self.capture = Some(capture::activate(&self.bus, move |combination| {
            // The receiver lives as long as the worker.
            let _ = tx.send(combination);
        }));
        self.fullscreen.start_game(self.display.as_mut());
        self.announce();
    }

    fn deactivate(&mut self) {
        if let Some(capture) = self.capture.take() {
            capture.deactivate();
        }
        self.fullscreen.stop_game(self.display.as_mut());
        // Anything emitted before the release is stale now.
        while self.combination_rx.try_recv().is_ok() {}
    }

    fn dispatch(&mut self, event: &PlatformEvent) {
        let dispatched = self.bus.dispatch(event);
        tracing::trace!("Dispatched to {} listeners", dispatched.listeners);
        while let Ok(combination) = self.combination_rx.try_recv() {
            self.check_combination(&combination);
        }
    }

    fn check_combination(&mut self, combination: &[String]) {
        let expected = errors::r#return!(self.challenge_ctx.current(&self.shortcuts));
        if expected.matches(combination) {
            tracing::info!("Correct: {} is {}", expected.name, combination.join("+"));
            self.challenge_ctx.correct(self.shortcuts.len());
            self.announce();
        } else {
            tracing::info!(
                "Not quite: {} is {}, got {}",
                expected.name,
                expected.keys.join("+"),
                combination.join("+")
            );
            self.challenge_ctx.wrong();
        }
    }

    fn announce(&self) {
        if let Ok(shortcut) = self.challenge_ctx.current(&self.shortcuts) {
            tracing::info!("Next challenge: {}", shortcut.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::RawKeyEvent;
    use crate::fullscreen::{FullscreenState, Requested};

    fn worker() -> Worker {
        let shortcuts = vec![
            Shortcut::new("Copy", &["Ctrl", "C"]),
            Shortcut::new("Select word", &["Ctrl", "Shift"]),
        ];
        Worker::new(shortcuts, BaseDirectories::with_prefix(crate::KEYCAP_DIR_NAME))
    }

    fn press(worker: &mut Worker, keys: &[(&str, &str)]) {
        for (key, code) in keys {
            worker.handle_message(Message::KeyDown(RawKeyEvent::new(key, code)));
        }
        for (key, code) in keys.iter().rev() {
            worker.handle_message(Message::KeyUp(RawKeyEvent::new(key, code)));
        }
    }

    #[test]
    fn correct_combination_advances() {
        let mut worker = worker();
        worker.handle_message(Message::Activate);
        press(&mut worker, &[("Control", "ControlLeft"), ("c", "KeyC")]);

        assert_eq!(worker.challenge_ctx.solved, 1);
        assert_eq!(worker.challenge_ctx.index, 1);
    }

    #[test]
    fn modifier_only_answer() {
        let mut worker = worker();
        worker.handle_message(Message::Activate);
        worker.handle_message(Message::Skip);
        press(&mut worker, &[("Shift", "ShiftLeft"), ("Control", "ControlRight")]);

        assert_eq!(worker.challenge_ctx.solved, 1);
        assert_eq!(worker.challenge_ctx.index, 0);
    }

    #[test]
    fn wrong_combination_counts_an_attempt() {
        let mut worker = worker();
        worker.handle_message(Message::Activate);
        press(&mut worker, &[("Control", "ControlLeft"), ("v", "KeyV")]);

        assert_eq!(worker.challenge_ctx.attempts, 1);
        assert_eq!(worker.challenge_ctx.index, 0);
    }

    #[test]
    fn inactive_worker_ignores_keys() {
        let mut worker = worker();
        press(&mut worker, &[("Control", "ControlLeft"), ("c", "KeyC")]);
        worker.handle_message(Message::Activate);
        worker.handle_message(Message::Deactivate);
        press(&mut worker, &[("Control", "ControlLeft"), ("c", "KeyC")]);

        assert!(!worker.is_capturing());
        assert_eq!(worker.challenge_ctx, context::Challenge::new());
    }

    #[test]
    fn activate_waits_for_the_front_end() {
        let mut worker = worker();
        worker.handle_message(Message::Activate);
        assert!(worker.is_capturing());
        assert_eq!(worker.fullscreen.state(), FullscreenState::Normal);

        worker.handle_message(Message::FullscreenChange(true));
        assert_eq!(worker.fullscreen.state(), FullscreenState::Active);
    }

    #[test]
    fn escape_from_fullscreen_asks_for_restore() {
        let mut worker = worker();
        worker.handle_message(Message::Activate);
        worker.handle_message(Message::FullscreenChange(true));
        worker.handle_message(Message::FullscreenChange(false));
        assert!(worker.fullscreen.needs_restore());

        worker.handle_message(Message::Restore);
        assert!(worker.fullscreen.needs_restore());
        worker.handle_message(Message::FullscreenChange(true));
        assert!(!worker.fullscreen.needs_restore());
    }

    struct Refusing;

    impl FullscreenApi for Refusing {
        fn request_fullscreen(&mut self) -> errors::Result<Requested> {
            Err(KeycapError::FullscreenDenied("not allowed".to_owned()))
        }

        fn exit_fullscreen(&mut self) -> errors::Error {
            Ok(())
        }
    }

    #[test]
    fn capture_runs_without_fullscreen() {
        let mut worker = worker().with_display(Box::new(Refusing));
        worker.handle_message(Message::Activate);
        assert!(worker.is_capturing());
        assert!(worker.fullscreen.is_game_active());
        assert_eq!(worker.fullscreen.state(), FullscreenState::Normal);

        press(&mut worker, &[("Control", "ControlLeft"), ("c", "KeyC")]);
        assert_eq!(worker.challenge_ctx.solved, 1);
    }

    #[test]
    fn kill_and_reload_stop_the_loop() {
        let mut worker = worker();
        worker.handle_message(Message::Reload);
        assert_eq!(worker.status, Status::Reload);
        worker.handle_message(Message::Kill);
        assert_eq!(worker.status, Status::Kill);
    }
}
