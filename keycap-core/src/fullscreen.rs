use crate::errors::{self, Error, KeycapError, Result};

/// How a platform answered a fullscreen request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requested {
    /// Fullscreen is on once the call returns.
    Engaged,
    /// The request was handed on; a fullscreen-change notification reports
    /// the outcome.
    Pending,
}

/// Platform side of fullscreen handling.
pub trait FullscreenApi {
    /// # Errors
    ///
    /// When the platform refuses or doesn't support fullscreen.
    fn request_fullscreen(&mut self) -> Result<Requested>;

    /// # Errors
    ///
    /// When the platform fails to leave fullscreen.
    fn exit_fullscreen(&mut self) -> Error;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FullscreenState {
    #[default]
    Normal,
    Active,
}

/// Keeps the game and the platform's fullscreen state in step.
///
/// Platforms let the user leave fullscreen with Escape whatever the page
/// does. When that happens mid game the coordinator raises `needs_restore`;
/// getting back requires a fresh user gesture, so the caller prompts and
/// then calls [`FullscreenCoordinator::restore`].
#[derive(Debug, Default)]
pub struct FullscreenCoordinator {
    state: FullscreenState,
    game_active: bool,
    needs_restore: bool,
}

impl FullscreenCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> FullscreenState {
        self.state
    }

    #[must_use]
    pub fn needs_restore(&self) -> bool {
        self.needs_restore
    }

    #[must_use]
    pub fn is_game_active(&self) -> bool {
        self.game_active
    }

    /// Marks the game running and tries to go fullscreen. Returns whether
    /// the platform accepted the request; the state only turns `Active` once
    /// fullscreen is actually engaged.
    pub fn start_game(&mut self, api: &mut dyn FullscreenApi) -> bool {
        self.game_active = true;
        self.needs_restore = false;
        self.enter(api)
    }

    pub fn stop_game(&mut self, api: &mut dyn FullscreenApi) {
        self.game_active = false;
        self.needs_restore = false;
        if self.state == FullscreenState::Active {
            match api.exit_fullscreen() {
                Ok(()) => self.state = FullscreenState::Normal,
                Err(err) => tracing::warn!("Could not leave fullscreen: {}", err),
            }
        }
    }

    /// Re-enters fullscreen after the user asked for it. A pending request
    /// keeps `needs_restore` raised until the platform confirms.
    pub fn restore(&mut self, api: &mut dyn FullscreenApi) -> bool {
        if !self.game_active {
            return false;
        }
        let accepted = self.enter(api);
        if self.state == FullscreenState::Active {
            self.needs_restore = false;
        }
        accepted
    }

    /// Platform notification that fullscreen was entered or left.
    pub fn on_fullscreen_change(&mut self, is_fullscreen: bool) {
        if is_fullscreen {
            self.state = FullscreenState::Active;
            self.needs_restore = false;
            return;
        }
        if self.state == FullscreenState::Active && self.game_active {
            tracing::info!("Fullscreen left while the game is running");
            self.needs_restore = true;
        }
        self.state = FullscreenState::Normal;
    }

    fn enter(&mut self, api: &mut dyn FullscreenApi) -> bool {
        if self.state == FullscreenState::Active {
            return true;
        }
        match api.request_fullscreen() {
            Ok(Requested::Engaged) => {
                self.state = FullscreenState::Active;
                true
            }
            Ok(Requested::Pending) => {
                tracing::debug!("Fullscreen requested, waiting for the platform");
                true
            }
            Err(err) => {
                errors::log!(Err::<(), _>(err));
                false
            }
        }
    }
}

/// Hands requests to the front end, whose fullscreen-change notification
/// carries the real outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct Forwarded;

impl FullscreenApi for Forwarded {
    fn request_fullscreen(&mut self) -> Result<Requested> {
        tracing::debug!("Requesting fullscreen from the front end");
        Ok(Requested::Pending)
    }

    fn exit_fullscreen(&mut self) -> Error {
        tracing::debug!("Asking the front end to leave fullscreen");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::KeycapError;

    #[derive(Default)]
    struct Scripted {
        deny: bool,
        requests: usize,
    }

    impl FullscreenApi for Scripted {
        fn request_fullscreen(&mut self) -> Result<Requested> {
            self.requests += 1;
            if self.deny {
                return Err(KeycapError::FullscreenDenied("no user gesture".to_owned()));
            }
            Ok(Requested::Engaged)
        }

        fn exit_fullscreen(&mut self) -> Error {
            Ok(())
        }
    }

    #[test]
    fn start_game_enters_fullscreen() {
        let mut api = Scripted::default();
        let mut coordinator = FullscreenCoordinator::new();
        assert!(coordinator.start_game(&mut api));
        assert_eq!(coordinator.state(), FullscreenState::Active);
        assert!(coordinator.is_game_active());
    }

    #[test]
    fn failed_request_leaves_state_alone() {
        let mut api = Scripted {
            deny: true,
            ..Scripted::default()
        };
        let mut coordinator = FullscreenCoordinator::new();
        assert!(!coordinator.start_game(&mut api));
        assert_eq!(coordinator.state(), FullscreenState::Normal);
        assert!(coordinator.is_game_active());
        assert!(!coordinator.needs_restore());
    }

    #[test]
    fn escape_mid_game_needs_restore() {
        let mut api = Scripted::default();
        let mut coordinator = FullscreenCoordinator::new();
        coordinator.start_game(&mut api);
        coordinator.on_fullscreen_change(false);

        assert!(coordinator.needs_restore());
        assert_eq!(coordinator.state(), FullscreenState::Normal);

        assert!(coordinator.restore(&mut api));
        assert!(!coordinator.needs_restore());
        assert_eq!(coordinator.state(), FullscreenState::Active);
        assert_eq!(api.requests, 2);
    }

    #[test]
    fn leaving_after_the_game_is_not_a_restore() {
        let mut api = Scripted::default();
        let mut coordinator = FullscreenCoordinator::new();
        coordinator.start_game(&mut api);
        coordinator.stop_game(&mut api);
        coordinator.on_fullscreen_change(false);

        assert!(!coordinator.needs_restore());
        assert!(!coordinator.restore(&mut api));
    }

    #[test]
    fn forwarded_request_waits_for_confirmation() {
        let mut coordinator = FullscreenCoordinator::new();
        assert!(coordinator.start_game(&mut Forwarded));
        assert_eq!(coordinator.state(), FullscreenState::Normal);

        coordinator.on_fullscreen_change(true);
        assert_eq!(coordinator.state(), FullscreenState::Active);
    }

    #[test]
    fn platform_confirmation_clears_restore() {
        let mut coordinator = FullscreenCoordinator::new();
        coordinator.start_game(&mut Forwarded);
        coordinator.on_fullscreen_change(true);
        coordinator.on_fullscreen_change(false);
        assert!(coordinator.needs_restore());

        assert!(coordinator.restore(&mut Forwarded));
        assert!(coordinator.needs_restore());
        assert_eq!(coordinator.state(), FullscreenState::Normal);

        coordinator.on_fullscreen_change(true);
        assert!(!coordinator.needs_restore());
        assert_eq!(coordinator.state(), FullscreenState::Active);
    }

    #[test]
    fn refused_before_confirmation_never_needs_restore() {
        let mut coordinator = FullscreenCoordinator::new();
        coordinator.start_game(&mut Forwarded);
        coordinator.on_fullscreen_change(false);
        assert!(!coordinator.needs_restore());
    }
}
