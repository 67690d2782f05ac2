//! The hunt session: one open hunt, at most one open clue.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::location::{LocationError, LocationOptions, PositionSource, request_position};
use crate::models::{Hunt, HuntError, ReportedPosition};
use crate::progress::{ProgressRecord, ProgressStore, ProgressSummary};
use crate::proximity::ProximityJudge;
use crate::session::state::{CheckOutcome, ClueState, Reveals, SessionError};

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ActiveClue {
    pub(crate) index: usize,
    pub(crate) state: ClueState,
    pub(crate) reveals: Reveals,
    /// State to return to if a successful check cannot be saved.
    resume: ClueState,
}

/// Proof that a check was started. Handed back to [`HuntSession::finish_check`]
/// together with the reading.
#[derive(Debug)]
#[must_use = "a started check must be finished"]
pub struct CheckTicket {
    clue_index: usize,
}

impl CheckTicket {
    pub fn clue_index(&self) -> usize {
        self.clue_index
    }
}

pub struct HuntSession {
    hunt: Arc<Hunt>,
    progress: ProgressRecord,
    store: ProgressStore,
    source: Arc<dyn PositionSource>,
    judge: ProximityJudge,
    options: LocationOptions,
    map_reveal_enabled: bool,
    active: Option<ActiveClue>,
    completion_announced: bool,
}

impl HuntSession {
    /// Load the hunt's progress and start a session on it. A corrupt progress
    /// record starts the hunt from scratch.
    pub async fn open(
        hunt: Arc<Hunt>,
        store: ProgressStore,
        source: Arc<dyn PositionSource>,
        config: &EngineConfig,
    ) -> Result<Self> {
        let progress = store.load_or_default(&hunt.id).await?;
        let summary = progress.summary(hunt.clue_count());

        tracing::info!(
            hunt = %hunt.id,
            completed = summary.completed,
            total = summary.total,
            "opened hunt session"
        );

        Ok(Self {
            // A hunt finished in an earlier session does not announce again.
            completion_announced: summary.is_complete(),
            hunt,
            progress,
            store,
            source,
            judge: config.judge(),
            options: config.location_options(),
            map_reveal_enabled: false,
            active: None,
        })
    }

    pub fn set_map_reveal_enabled(&mut self, enabled: bool) {
        self.map_reveal_enabled = enabled;
    }

    pub fn map_reveal_enabled(&self) -> bool {
        self.map_reveal_enabled
    }

    pub fn hunt(&self) -> &Arc<Hunt> {
        &self.hunt
    }

    pub fn progress(&self) -> &ProgressRecord {
        &self.progress
    }

    pub fn summary(&self) -> ProgressSummary {
        self.progress.summary(self.hunt.clue_count())
    }

    pub fn is_complete(&self) -> bool {
        self.summary().is_complete()
    }

    pub fn active_clue(&self) -> Option<(usize, &ClueState)> {
        self.active.as_ref().map(|a| (a.index, &a.state))
    }

    pub(crate) fn active(&self) -> Option<&ActiveClue> {
        self.active.as_ref()
    }

    /// State of any clue. A clue other than the open one is `Solved` if its
    /// progress is recorded and `Unopened` otherwise.
    pub fn clue_state(&self, index: usize) -> ClueState {
        match &self.active {
            Some(active) if active.index == index => active.state.clone(),
            _ if self.progress.is_completed(index) => ClueState::Solved { verdict: None },
            _ => ClueState::Unopened,
        }
    }

    // ---- Navigation ----

    /// Open a clue. A solved clue opens straight into `Solved`.
    pub fn open_clue(&mut self, index: usize) -> Result<&ClueState> {
        self.ensure_not_checking()?;
        self.hunt.clue(index)?;

        let state = if self.progress.is_completed(index) {
            ClueState::Solved { verdict: None }
        } else {
            ClueState::DescriptionHidden
        };

        tracing::debug!(hunt = %self.hunt.id, clue = index, state = state.name(), "opened clue");

        let active = self.active.insert(ActiveClue {
            index,
            resume: state.clone(),
            state,
            reveals: Reveals::default(),
        });
        Ok(&active.state)
    }

    pub fn close_clue(&mut self) -> Result<()> {
        self.ensure_not_checking()?;
        self.active = None;
        Ok(())
    }

    // ---- Reveals ----

    pub fn reveal_description(&mut self) -> Result<&ClueState> {
        let active = self.active.as_mut().ok_or(SessionError::NoActiveClue)?;

        if active.state != ClueState::DescriptionHidden {
            return Err(invalid("reveal the description", &active.state));
        }

        active.reveals.description = true;
        active.state = ClueState::DescriptionRevealed;
        Ok(&active.state)
    }

    pub fn reveal_image(&mut self) -> Result<&ClueState> {
        let active = self.active.as_mut().ok_or(SessionError::NoActiveClue)?;
        let clue = self.hunt.clue(active.index)?;

        if !active.state.accepts_reveal() || !active.reveals.description || active.reveals.image {
            return Err(invalid("reveal the image", &active.state));
        }
        if clue.image.is_none() {
            return Err(SessionError::NoImage);
        }

        active.reveals.image = true;
        active.state = ClueState::ImageRevealed;
        Ok(&active.state)
    }

    /// The map comes after the image, or straight after the description when
    /// the clue has no image.
    pub fn reveal_map(&mut self) -> Result<&ClueState> {
        if !self.map_reveal_enabled {
            return Err(SessionError::MapRevealDisabled);
        }

        let active = self.active.as_mut().ok_or(SessionError::NoActiveClue)?;
        let clue = self.hunt.clue(active.index)?;
        let image_done = active.reveals.image || clue.image.is_none();

        if !active.state.accepts_reveal()
            || !active.reveals.description
            || !image_done
            || active.reveals.map
        {
            return Err(invalid("reveal the map", &active.state));
        }

        active.reveals.map = true;
        active.state = ClueState::MapRevealed;
        Ok(&active.state)
    }

    // ---- Location check ----

    /// Request a position and judge it against the open clue.
    ///
    /// Dropping the returned future puts the clue back where it was before
    /// the check, so a cancelled check can be retried straight away.
    pub async fn check_location(&mut self) -> Result<CheckOutcome> {
        let ticket = self.begin_check()?;
        let mut guard = PendingCheck { session: self };
        let reading = request_position(guard.session.source.as_ref(), &guard.session.options).await;
        guard.session.finish_check(ticket, reading).await
    }

    /// Enter `CheckingLocation`. Fails without side effects if a check is
    /// already outstanding or the clue's target is unusable.
    pub fn begin_check(&mut self) -> Result<CheckTicket> {
        let active = self.active.as_mut().ok_or(SessionError::NoActiveClue)?;

        if active.state.is_checking() {
            return Err(SessionError::CheckInFlight);
        }
        if !active.state.can_check() {
            return Err(invalid("check the location", &active.state));
        }

        self.hunt.clue(active.index)?.checkable_target()?;

        active.resume = std::mem::replace(&mut active.state, ClueState::CheckingLocation);
        tracing::debug!(hunt = %self.hunt.id, clue = active.index, "location check started");

        Ok(CheckTicket {
            clue_index: active.index,
        })
    }

    /// Judge a reading for a started check. The clue is only reported solved
    /// after the progress write has completed.
    pub async fn finish_check(
        &mut self,
        ticket: CheckTicket,
        reading: std::result::Result<ReportedPosition, LocationError>,
    ) -> Result<CheckOutcome> {
        let index = match &self.active {
            Some(active) if active.index == ticket.clue_index && active.state.is_checking() => {
                active.index
            }
            _ => return Err(SessionError::StaleTicket),
        };

        let clue = self.hunt.clue(index)?;
        let target = clue.checkable_target()?;

        let position = match reading {
            Ok(position) => position,
            Err(e) => return Ok(self.settle(ClueState::CheckError(e.clone()), CheckOutcome::Failed(e))),
        };

        let verdict = match self.judge.evaluate(&position, target, self.hunt.minimum_accuracy) {
            Ok(verdict) => verdict,
            Err(HuntError::InvalidPosition(reason)) => {
                tracing::warn!(hunt = %self.hunt.id, clue = index, %reason, "discarding invalid reading");
                let e = LocationError::PositionUnavailable;
                return Ok(self.settle(ClueState::CheckError(e.clone()), CheckOutcome::Failed(e)));
            }
            Err(e) => {
                self.restore_after_check();
                return Err(e.into());
            }
        };

        if !verdict.passed {
            tracing::info!(
                hunt = %self.hunt.id,
                clue = index,
                distance_m = verdict.distance_meters,
                threshold_m = verdict.threshold_meters,
                "too far from target"
            );
            return Ok(self.settle(ClueState::CheckFailed(verdict), CheckOutcome::TooFar(verdict)));
        }

        let progress = match self.store.mark_complete(&self.hunt.id, index).await {
            Ok(progress) => progress,
            Err(e) => {
                tracing::warn!(hunt = %self.hunt.id, clue = index, error = %e, "could not save progress");
                self.restore_after_check();
                return Err(e.into());
            }
        };
        self.progress = progress;

        let hunt_completed = !self.completion_announced && self.is_complete();
        if hunt_completed {
            self.completion_announced = true;
            tracing::info!(hunt = %self.hunt.id, "hunt completed");
        }

        Ok(self.settle(
            ClueState::Solved {
                verdict: Some(verdict),
            },
            CheckOutcome::Solved {
                verdict,
                hunt_completed,
            },
        ))
    }

    /// Abandon a started check without a reading. The clue goes back to the
    /// state it was in before [`HuntSession::begin_check`].
    pub fn cancel_check(&mut self, ticket: CheckTicket) -> Result<()> {
        match &self.active {
            Some(active) if active.index == ticket.clue_index && active.state.is_checking() => {}
            _ => return Err(SessionError::StaleTicket),
        }

        tracing::debug!(hunt = %self.hunt.id, clue = ticket.clue_index, "location check cancelled");
        self.restore_after_check();
        Ok(())
    }

    // ---- Reset ----

    /// Forget all progress for this hunt, durably and in memory.
    pub async fn clear_progress(&mut self) -> Result<()> {
        self.ensure_not_checking()?;
        self.store.clear(&self.hunt.id).await?;
        self.progress = ProgressRecord::new();

        if let Some(active) = self.active.as_mut() {
            active.state = ClueState::DescriptionHidden;
            active.resume = ClueState::DescriptionHidden;
            active.reveals = Reveals::default();
        }
        Ok(())
    }

    fn settle(&mut self, state: ClueState, outcome: CheckOutcome) -> CheckOutcome {
        if let Some(active) = self.active.as_mut() {
            active.resume = state.clone();
            active.state = state;
        }
        outcome
    }

    fn restore_after_check(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.state = active.resume.clone();
        }
    }

    fn ensure_not_checking(&self) -> Result<()> {
        match &self.active {
            Some(active) if active.state.is_checking() => Err(SessionError::CheckInFlight),
            _ => Ok(()),
        }
    }
}

/// Held across a check's awaits; undoes `CheckingLocation` if the check
/// future is dropped before it settles.
struct PendingCheck<'a> {
    session: &'a mut HuntSession,
}

impl Drop for PendingCheck<'_> {
    fn drop(&mut self) {
        if self.session.ensure_not_checking().is_err() {
            tracing::debug!(hunt = %self.session.hunt.id, "location check dropped before it finished");
            self.session.restore_after_check();
        }
    }
}

fn invalid(action: &'static str, state: &ClueState) -> SessionError {
    SessionError::InvalidTransition {
        action,
        state: state.name(),
    }
}
