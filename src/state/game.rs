//! Game-screen controller: a single serialized reducer.
//!
//! DESIGN
//! ======
//! Every stimulus — server event, countdown tick, user action, reveal timer —
//! enters through [`GameState::apply`] as a [`GameInput`] and is processed to
//! completion before the next one. Side effects (sending an answer, arming the
//! reveal timer) never happen inside the reducer; they come back as
//! [`GameEffect`] values for the async shell in `game_loop` to execute. This
//! keeps the whole question/result cycle deterministic and testable without a
//! browser.
//!
//! The reveal timer is epoch-guarded: each scheduled reveal captures the
//! current epoch, and any state change that invalidates it (game end,
//! teardown, a new result) bumps the epoch so the stale wakeup is dropped.

#[cfg(test)]
#[path = "game_test.rs"]
mod game_test;

use crate::net::types::{AnswerResult, AnswerSubmission, Question, RankingEntry};

/// How long the per-question result popup stays up before advancing.
pub const REVEAL_DELAY_MS: u32 = 2500;

/// Lifecycle of the game screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GamePhase {
    /// Not in a game.
    #[default]
    Idle,
    /// Game started but the first question has not arrived.
    AwaitingFirstQuestion,
    /// A question is on screen and the countdown is running.
    QuestionActive,
    /// Countdown hit zero; answer is locked in, personal result pending.
    AwaitingResult,
    /// Personal result popup is showing; advance is scheduled.
    AnswerRevealed,
    /// This player is done; waiting for the final standings broadcast.
    Completed,
    /// Final standings on screen.
    Results,
}

/// Per-player answered flag, snapshotted from the room roster at game start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RosterFlag {
    pub user_id: i64,
    pub display_name: String,
    pub has_answered: bool,
}

/// Everything an input can be.
#[derive(Clone, Debug, PartialEq)]
pub enum GameInput {
    /// Game-start broadcast, optionally bundling the first question.
    Started {
        room_id: i64,
        question: Option<Question>,
        roster: Vec<RosterFlag>,
    },
    /// Broadcast question advance.
    Question(Question),
    /// One second of countdown elapsed.
    Tick,
    /// The user picked the option at this index.
    Submit { option_index: usize },
    /// Personal result from the user queue.
    PersonalResult(AnswerResult),
    /// Broadcast that some other player locked in an answer.
    PeerAnswered { user_id: i64 },
    /// The reveal timer armed under this epoch fired.
    RevealElapsed { epoch: u64 },
    /// Final standings broadcast, already ordered by the server.
    Ended { rankings: Vec<RankingEntry> },
    /// Leaving the game screen.
    Teardown,
}

/// Side effects requested by the reducer, executed by the async shell.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEffect {
    /// Send this answer to the room's answer destination.
    Send(AnswerSubmission),
    /// Arm the reveal timer; deliver `RevealElapsed { epoch }` after the delay.
    ScheduleReveal { epoch: u64, delay_ms: u32 },
}

/// The whole game-screen state. Mutated only through [`GameState::apply`].
#[derive(Clone, Debug, Default)]
pub struct GameState {
    pub phase: GamePhase,
    pub room_id: Option<i64>,
    pub question: Option<Question>,
    /// Seconds left on the countdown.
    pub time_remaining: u32,
    /// Whole seconds elapsed since the question appeared.
    ticks: u32,
    /// Index of the option this player picked, if any.
    pub selected_option: Option<usize>,
    /// True once a submission (manual or timeout) went out for this question.
    pub answered: bool,
    pub score: i64,
    pub streak: u32,
    /// Result popup contents while in `AnswerRevealed`.
    pub popup: Option<AnswerResult>,
    /// Monotonic guard for scheduled reveals; never reset.
    pub reveal_epoch: u64,
    pub roster: Vec<RosterFlag>,
    pub rankings: Vec<RankingEntry>,
}

impl GameState {
    /// Process one input to completion, returning the effects to run.
    pub fn apply(&mut self, input: GameInput) -> Vec<GameEffect> {
        match input {
            GameInput::Started { room_id, question, roster } => {
                self.start_game(room_id, question, roster);
                Vec::new()
            }
            GameInput::Question(question) => {
                // Broadcast advance; the personal result stream is
                // authoritative once a result has been revealed.
                if matches!(
                    self.phase,
                    GamePhase::AwaitingFirstQuestion
                        | GamePhase::QuestionActive
                        | GamePhase::AwaitingResult
                ) {
                    self.start_question(question);
                }
                Vec::new()
            }
            GameInput::Tick => self.on_tick(),
            GameInput::Submit { option_index } => self.on_submit(option_index),
            GameInput::PersonalResult(result) => self.on_result(result),
            GameInput::PeerAnswered { user_id } => {
                // Flags only: never touches score, phase, or the countdown.
                if let Some(flag) = self.roster.iter_mut().find(|f| f.user_id == user_id) {
                    flag.has_answered = true;
                }
                Vec::new()
            }
            GameInput::RevealElapsed { epoch } => {
                self.on_reveal_elapsed(epoch);
                Vec::new()
            }
            GameInput::Ended { rankings } => {
                self.reveal_epoch += 1;
                self.phase = GamePhase::Results;
                self.rankings = rankings;
                self.question = None;
                self.popup = None;
                self.answered = true;
                Vec::new()
            }
            GameInput::Teardown => {
                // Bump past any armed reveal so its wakeup lands stale.
                let epoch = self.reveal_epoch + 1;
                *self = Self { reveal_epoch: epoch, ..Self::default() };
                Vec::new()
            }
        }
    }

    fn start_game(&mut self, room_id: i64, question: Option<Question>, roster: Vec<RosterFlag>) {
        let epoch = self.reveal_epoch + 1;
        *self = Self {
            reveal_epoch: epoch,
            room_id: Some(room_id),
            roster,
            ..Self::default()
        };
        match question {
            Some(q) => self.start_question(q),
            None => self.phase = GamePhase::AwaitingFirstQuestion,
        }
    }

    fn start_question(&mut self, question: Question) {
        self.time_remaining = question.time_limit_seconds;
        self.question = Some(question);
        self.ticks = 0;
        self.selected_option = None;
        self.answered = false;
        self.popup = None;
        self.phase = GamePhase::QuestionActive;
        for flag in &mut self.roster {
            flag.has_answered = false;
        }
    }

    fn on_tick(&mut self) -> Vec<GameEffect> {
        if self.phase != GamePhase::QuestionActive {
            return Vec::new();
        }
        self.ticks += 1;
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining > 0 {
            return Vec::new();
        }
        // The question period is over: lock the answer and wait for the
        // personal result to open the reveal.
        self.phase = GamePhase::AwaitingResult;
        if !self.answered {
            // Expiry auto-submits an empty answer exactly once; the guard
            // also stops a late manual click from double-sending.
            self.answered = true;
            if let Some(question) = &self.question {
                let elapsed = u64::from(self.ticks) * 1000;
                return vec![GameEffect::Send(AnswerSubmission::timed_out(
                    question.id,
                    elapsed,
                ))];
            }
        }
        Vec::new()
    }

    fn on_submit(&mut self, option_index: usize) -> Vec<GameEffect> {
        if self.phase != GamePhase::QuestionActive || self.answered {
            return Vec::new();
        }
        let Some(question) = &self.question else {
            return Vec::new();
        };
        let Some(option) = question.options.get(option_index) else {
            return Vec::new();
        };
        self.answered = true;
        self.selected_option = Some(option_index);
        vec![GameEffect::Send(AnswerSubmission {
            question_id: question.id,
            selected_option_id: Some(option.id),
            selected_option_index: u32::try_from(option_index).ok(),
            answer_text: option.text.clone(),
            elapsed_ms: u64::from(self.ticks) * 1000,
        })]
    }

    fn on_result(&mut self, result: AnswerResult) -> Vec<GameEffect> {
        if !matches!(
            self.phase,
            GamePhase::QuestionActive | GamePhase::AwaitingResult
        ) {
            return Vec::new();
        }
        self.answered = true;
        self.score += result.points_awarded;
        self.streak = result.streak_count;
        self.reveal_epoch += 1;
        self.popup = Some(result);
        self.phase = GamePhase::AnswerRevealed;
        vec![GameEffect::ScheduleReveal {
            epoch: self.reveal_epoch,
            delay_ms: REVEAL_DELAY_MS,
        }]
    }

    fn on_reveal_elapsed(&mut self, epoch: u64) {
        if epoch != self.reveal_epoch || self.phase != GamePhase::AnswerRevealed {
            return;
        }
        let popup = self.popup.take();
        match popup.and_then(|r| r.next_question) {
            Some(next) => self.start_question(next),
            None => {
                self.phase = GamePhase::Completed;
                self.question = None;
            }
        }
    }
}
