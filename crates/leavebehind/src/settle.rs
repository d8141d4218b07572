use crate::params::Gravity;
use leavebehind_animation::{FrameCallbackRegistration, SettleDriver};

/// Identifies one settle run. A frame step carrying an older token is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SettleToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SettleFinished {
    pub(crate) clamped: bool,
    pub(crate) swiped_right: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SettleStep {
    /// The token no longer matches the current run; do nothing.
    Stale,
    Moved {
        panel: Gravity,
        left: i32,
        finished: Option<SettleFinished>,
    },
}

struct SettleRun {
    panel: Gravity,
    clamped: bool,
    swiped_right: bool,
    token: SettleToken,
    registration: Option<FrameCallbackRegistration>,
}

/// Owns the settle driver and at most one outstanding settle run.
pub(crate) struct SettleController {
    driver: Box<dyn SettleDriver>,
    run: Option<SettleRun>,
    next_token: u64,
}

impl SettleController {
    pub(crate) fn new(driver: Box<dyn SettleDriver>) -> Self {
        Self {
            driver,
            run: None,
            next_token: 0,
        }
    }

    /// Replaces any current run. Returns `None` when `from == target`, in
    /// which case nothing needs scheduling.
    pub(crate) fn start(
        &mut self,
        panel: Gravity,
        from: i32,
        target: i32,
        duration_millis: u64,
        clamped: bool,
        swiped_right: bool,
    ) -> Option<SettleToken> {
        self.cancel();
        if !self.driver.settle_to(from, target, duration_millis) {
            return None;
        }
        self.next_token += 1;
        let token = SettleToken(self.next_token);
        log::debug!("settle {panel:?} {from} -> {target} over {duration_millis}ms");
        self.run = Some(SettleRun {
            panel,
            clamped,
            swiped_right,
            token,
            registration: None,
        });
        Some(token)
    }

    /// Stores the pending frame callback for `token`'s run.
    pub(crate) fn arm(&mut self, token: SettleToken, registration: FrameCallbackRegistration) {
        match self.run.as_mut() {
            Some(run) if run.token == token => run.registration = Some(registration),
            _ => registration.cancel(),
        }
    }

    pub(crate) fn step(&mut self, token: SettleToken, frame_time_nanos: u64) -> SettleStep {
        let Some(run) = self.run.as_ref() else {
            return SettleStep::Stale;
        };
        if run.token != token {
            return SettleStep::Stale;
        }
        let panel = run.panel;

        let more = self.driver.continue_settling(frame_time_nanos);
        let left = self.driver.current();
        let finished = if more {
            None
        } else {
            self.run.take().map(|run| SettleFinished {
                clamped: run.clamped,
                swiped_right: run.swiped_right,
            })
        };
        SettleStep::Moved {
            panel,
            left,
            finished,
        }
    }

    /// Drops the pending step and stops the driver where it is.
    pub(crate) fn cancel(&mut self) {
        if self.run.take().is_some() {
            log::debug!("settle cancelled at {}", self.driver.current());
        }
        self.driver.abort();
    }

    pub(crate) fn is_settling(&self) -> bool {
        self.run.is_some()
    }
}
