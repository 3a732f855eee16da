//! Session controller.
//!
//! A `Session` holds at most one live game. It builds decks, feeds player
//! flips into the state machine, turns state-machine outcomes into scheduled
//! tasks, and forwards every visible change to the observer.
//!
//! ## Lifecycle
//!
//! - `start_game` / `restart`: build a new deck and replace the live game
//!   wholesale. Nothing changes if the difficulty is invalid.
//! - `reset_game`: drop the live game from any phase.
//! - `fire`: run a scheduled task delivered by the host.
//!
//! Replacing or dropping a game cancels all of its outstanding handles and
//! bumps the session `Generation`, so a late task from an old game is
//! discarded even if the host failed to cancel it.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use pairs_engine::core::EngineConfig;
//! use pairs_engine::engine::Phase;
//! use pairs_engine::observer::EventLog;
//! use pairs_engine::schedule::VirtualScheduler;
//! use pairs_engine::session::Session;
//!
//! let config = EngineConfig::default().with_seed(42);
//! let mut session = Session::new(config, VirtualScheduler::new(), EventLog::new()).unwrap();
//!
//! session.start_game("easy").unwrap();
//! assert_eq!(session.phase(), Phase::Previewing);
//!
//! session.advance(Duration::from_secs(7));
//! assert_eq!(session.phase(), Phase::AwaitingFirstFlip);
//! ```

use std::time::Duration;

use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::core::card::{Card, CardId};
use crate::core::config::{Difficulty, EngineConfig};
use crate::core::error::Result;
use crate::core::rng::GameRng;
use crate::deck::{build_deck, SymbolCatalog};
use crate::engine::{score, FlipOutcome, GameState, GameSummary, PairOutcome, Phase, RejectReason};
use crate::observer::GameObserver;
use crate::schedule::{Generation, ScheduledTask, Scheduler, TaskKind, TimerHandle, VirtualScheduler};

/// Counters for the HUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub moves: u32,
    pub matched_pairs: usize,
    pub pair_count: usize,
}

/// Outstanding one-shot and countdown handles of a game.
///
/// The clock's handle lives in `GameTimer`.
#[derive(Debug, Default)]
struct PendingTasks {
    /// Lead-in, then the countdown ticker.
    preview: Option<TimerHandle>,
    evaluation: Option<TimerHandle>,
    /// Outstanding flip-backs, keyed by the pair they turn down.
    reverts: SmallVec<[(TimerHandle, CardId, CardId); 2]>,
    finish: Option<TimerHandle>,
}

impl PendingTasks {
    fn cancel_all<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        let handles = self
            .preview
            .take()
            .into_iter()
            .chain(self.evaluation.take())
            .chain(self.finish.take())
            .chain(self.reverts.drain(..).map(|(handle, _, _)| handle));
        for handle in handles {
            scheduler.cancel(handle);
        }
    }

    /// Forget the revert handle for a pair whose task has fired.
    fn take_revert(&mut self, first: CardId, second: CardId) -> Option<TimerHandle> {
        let index = self
            .reverts
            .iter()
            .position(|&(_, a, b)| a == first && b == second)?;
        Some(self.reverts.remove(index).0)
    }
}

struct ActiveGame {
    generation: Generation,
    state: GameState,
    pending: PendingTasks,
    summary: Option<GameSummary>,
}

/// Orchestrates one game at a time.
pub struct Session<S: Scheduler, O: GameObserver> {
    config: EngineConfig,
    catalog: SymbolCatalog,
    rng: GameRng,
    scheduler: S,
    observer: O,
    difficulty: Difficulty,
    generation: Generation,
    game: Option<ActiveGame>,
}

impl<S: Scheduler, O: GameObserver> Session<S, O> {
    /// Create an idle session.
    ///
    /// Shuffles with `config.seed` when set, otherwise with an OS seed.
    /// Fails with `InvalidConfig` if the timing would stall the scheduler.
    pub fn new(config: EngineConfig, scheduler: S, observer: O) -> Result<Self> {
        config.timing.validate()?;
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        Ok(Self {
            config,
            catalog: SymbolCatalog::default(),
            rng,
            scheduler,
            observer,
            difficulty: Difficulty::default(),
            generation: Generation::default(),
            game: None,
        })
    }

    /// Use a custom symbol catalog for future decks.
    #[must_use]
    pub fn with_catalog(mut self, catalog: SymbolCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the shuffle source.
    #[must_use]
    pub fn with_rng(mut self, rng: GameRng) -> Self {
        self.rng = rng;
        self
    }

    // === Lifecycle ===

    /// Start a game on the named difficulty.
    ///
    /// Fails with an invalid-difficulty error, leaving the session untouched,
    /// if the name is unknown or the catalog is too small.
    pub fn start_game(&mut self, difficulty: &str) -> Result<()> {
        let difficulty: Difficulty = difficulty.parse()?;
        self.start_with(difficulty)
    }

    /// Start a game on a known difficulty.
    pub fn start_with(&mut self, difficulty: Difficulty) -> Result<()> {
        let profile = difficulty.profile();
        let deck = build_deck(profile.pair_count, &self.catalog, &mut self.rng)?;

        self.teardown();
        self.generation = self.generation.next();
        self.difficulty = difficulty;

        let timing = &self.config.timing;
        let mut state = GameState::new(difficulty, deck);
        state.begin_preview(timing.preview_countdown);

        let pending = PendingTasks {
            preview: Some(self.scheduler.after(
                timing.preview_lead_in(),
                ScheduledTask::new(self.generation, TaskKind::PreviewStart),
            )),
            ..PendingTasks::default()
        };

        info!(
            difficulty = %difficulty,
            pairs = profile.pair_count,
            generation = %self.generation,
            "game started"
        );

        self.observer.on_deck_ready(state.cards());
        self.observer.on_counters_changed(0, 0);

        self.game = Some(ActiveGame {
            generation: self.generation,
            state,
            pending,
            summary: None,
        });
        Ok(())
    }

    /// Start over on the current difficulty.
    pub fn restart(&mut self) -> Result<()> {
        debug!(difficulty = %self.difficulty, "restart requested");
        self.start_with(self.difficulty)
    }

    /// Discard the live game, cancelling everything it scheduled.
    ///
    /// Safe from any phase, including mid-preview and mid-evaluation.
    pub fn reset_game(&mut self) {
        self.teardown();
        self.generation = self.generation.next();
        info!(generation = %self.generation, "game reset");
        self.observer.on_reset();
    }

    fn teardown(&mut self) {
        if let Some(mut game) = self.game.take() {
            game.pending.cancel_all(&mut self.scheduler);
            game.state.timer.stop(&mut self.scheduler);
            debug!(
                generation = %game.generation,
                phase = ?game.state.phase(),
                "game discarded"
            );
        }
    }

    // === Input ===

    /// Player clicked a card.
    ///
    /// Ignored requests return `FlipOutcome::Rejected` and change nothing.
    pub fn request_flip(&mut self, card: CardId) -> FlipOutcome {
        let Some(game) = self.game.as_mut() else {
            return FlipOutcome::Rejected(RejectReason::NotStarted);
        };

        let outcome = game.state.request_flip(card);
        match outcome {
            FlipOutcome::Rejected(reason) => {
                trace!(%card, ?reason, "flip ignored");
            }
            FlipOutcome::Selected { card, started_clock } => {
                self.observer.on_card_flipped(card);
                if started_clock {
                    game.state.timer.start(
                        &mut self.scheduler,
                        self.config.timing.timer_tick(),
                        game.generation,
                    );
                    debug!(generation = %game.generation, "clock started");
                }
            }
            FlipOutcome::PairSelected { first, second } => {
                self.observer.on_card_flipped(second);
                self.observer
                    .on_counters_changed(game.state.moves(), game.state.matched_pairs());
                game.pending.evaluation = Some(self.scheduler.after(
                    self.config.timing.evaluate_delay(),
                    ScheduledTask::new(game.generation, TaskKind::EvaluatePair),
                ));
                debug!(%first, %second, moves = game.state.moves(), "pair selected");
            }
        }
        outcome
    }

    // === Scheduled callbacks ===

    /// Run a task previously handed to the scheduler.
    ///
    /// Tasks from a replaced or reset game are dropped.
    pub fn fire(&mut self, task: ScheduledTask) {
        let Some(game) = self.game.as_mut() else {
            debug!(kind = ?task.kind, generation = %task.generation, "no live game, task dropped");
            return;
        };
        if task.generation != game.generation {
            debug!(
                kind = ?task.kind,
                stale = %task.generation,
                current = %game.generation,
                "stale task discarded"
            );
            return;
        }

        let timing = &self.config.timing;
        let mut finish_now = false;

        match task.kind {
            TaskKind::PreviewStart => {
                if game.state.phase() == Phase::Previewing {
                    let ticker = self.scheduler.every(
                        timing.preview_tick(),
                        ScheduledTask::new(game.generation, TaskKind::PreviewTick),
                    );
                    if let Some(lead_in) = game.pending.preview.replace(ticker) {
                        self.scheduler.cancel(lead_in);
                    }
                }
            }
            TaskKind::PreviewTick => {
                if let Some(remaining) = game.state.preview_tick() {
                    self.observer.on_preview_tick(remaining);
                    if remaining == 0 {
                        if let Some(ticker) = game.pending.preview.take() {
                            self.scheduler.cancel(ticker);
                        }
                        game.state.complete_preview();
                        debug!(generation = %game.generation, "preview complete");
                        self.observer.on_preview_end();
                    }
                }
            }
            TaskKind::EvaluatePair => {
                game.pending.evaluation = None;
                match game.state.evaluate_pair() {
                    Some(PairOutcome::Matched { first, second, finished }) => {
                        debug!(%first, %second, finished, "pair matched");
                        self.observer.on_pair_matched(first, second);
                        self.observer
                            .on_counters_changed(game.state.moves(), game.state.matched_pairs());
                        if finished {
                            game.pending.finish = Some(self.scheduler.after(
                                timing.finish_delay(),
                                ScheduledTask::new(game.generation, TaskKind::FinishGame),
                            ));
                        }
                    }
                    Some(PairOutcome::Mismatched { first, second }) => {
                        debug!(%first, %second, "pair mismatched");
                        self.observer.on_pair_mismatched(first, second);
                        let handle = self.scheduler.after(
                            timing.mismatch_revert(),
                            ScheduledTask::new(game.generation, TaskKind::RevertMismatch { first, second }),
                        );
                        game.pending.reverts.push((handle, first, second));
                    }
                    None => {}
                }
            }
            TaskKind::RevertMismatch { first, second } => {
                game.pending.take_revert(first, second);
                for card in game.state.revert_mismatch(first, second) {
                    self.observer.on_card_unflipped(card);
                }
            }
            TaskKind::FinishGame => {
                game.pending.finish = None;
                finish_now = true;
            }
            TaskKind::ClockTick => {
                if let Some(elapsed) = game.state.timer.tick() {
                    trace!(elapsed, "clock tick");
                    self.observer.on_timer_tick(elapsed);
                }
            }
        }

        if finish_now {
            self.end_game();
        }
    }

    /// Stop the clock, rate the game and report the result.
    ///
    /// Only a finished game has a result. Calling again returns the same
    /// summary without reporting it twice.
    pub fn end_game(&mut self) -> Option<GameSummary> {
        let game = self.game.as_mut()?;
        if game.state.phase() != Phase::Finished {
            return None;
        }
        if let Some(summary) = &game.summary {
            return Some(summary.clone());
        }

        if let Some(handle) = game.pending.finish.take() {
            self.scheduler.cancel(handle);
        }
        game.state.timer.stop(&mut self.scheduler);

        let summary = GameSummary {
            difficulty: game.state.difficulty(),
            elapsed_seconds: game.state.elapsed_seconds(),
            moves: game.state.moves(),
            rating: score(game.state.moves(), game.state.pair_count()),
        };
        info!(
            difficulty = %summary.difficulty,
            moves = summary.moves,
            elapsed_seconds = summary.elapsed_seconds,
            rating = summary.rating.stars(),
            "game finished"
        );

        self.observer.on_game_finished(&summary);
        game.summary = Some(summary.clone());
        Some(summary)
    }

    // === Queries ===

    /// Phase of the live game, `Idle` when there is none.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.game.as_ref().map_or(Phase::Idle, |g| g.state.phase())
    }

    #[must_use]
    pub fn state(&self) -> Option<&GameState> {
        self.game.as_ref().map(|g| &g.state)
    }

    /// Cards of the live game, empty when there is none.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        self.game.as_ref().map(|g| g.state.cards()).unwrap_or(&[])
    }

    #[must_use]
    pub fn progress(&self) -> Option<Progress> {
        self.game.as_ref().map(|g| Progress {
            moves: g.state.moves(),
            matched_pairs: g.state.matched_pairs(),
            pair_count: g.state.pair_count(),
        })
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u32 {
        self.game.as_ref().map_or(0, |g| g.state.elapsed_seconds())
    }

    /// Final result, once the end-of-game report has fired.
    #[must_use]
    pub fn summary(&self) -> Option<&GameSummary> {
        self.game.as_ref().and_then(|g| g.summary.as_ref())
    }

    /// Difficulty of the live game, or the one `restart` would use.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<O: GameObserver> Session<VirtualScheduler, O> {
    /// Let `by` of virtual time pass, firing every task that falls due.
    pub fn advance(&mut self, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.fire(task);
        }
        self.scheduler.advance_clock(until);
    }

    /// Advance past the whole preview of a just-started game.
    pub fn skip_preview(&mut self) {
        self.advance(self.config.timing.preview_total());
    }
}
