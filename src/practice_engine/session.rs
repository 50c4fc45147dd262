//! The timed practice session: countdown, question delivery, row reveal,
//! answer window, scoring and summary.
//!
//! ```text
//! Idle ──start──▶ Countdown(3,2,1) ──▶ RowReveal ──▶ AnswerPending ──▶ (score)
//!                                  └──────────────▶ AnswerPending ──▶ (score)
//! (score) ──▶ next question │ Finished
//! exit()/reset() from any phase ──▶ Idle
//! ```
//!
//! The machine is the only owner of its [`SessionClock`]. Every transition
//! cancels the timers of the phase it leaves before arming new ones, and every
//! timer callback compares the question index it was armed for against the
//! current one, so a late reveal or tick is dropped instead of touching the
//! next question.
//!
//! Time is virtual. Tests and drivers call [`SessionMachine::advance`] with
//! elapsed time; a real-time driver can instead sleep until
//! [`SessionMachine::next_deadline`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::practice_engine::{
    clock::{SessionClock, TimerEvent, TimerSlot},
    config::{SessionConfig, COUNTDOWN_SECS, RUNNING_TOTAL_ANSWER_SECS},
    error::{PracticeError, Result},
    generator::generate_questions,
    helpers::{parse_answer, rows_text},
    models::{GenerationRequest, OperationKind, Question, QuestionBatch},
    results::{ResultEntry, Summary},
};

const TICK: Duration = Duration::from_secs(1);

/// Observable phase. Scoring happens inside a single transition and is never
/// observed between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Countdown { remaining: u32 },
    RowReveal,
    AnswerPending,
    Finished,
}

/// Why a submission was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    NoActiveQuestion,
    /// Rows are still being revealed.
    RevealInProgress,
    EmptyAnswer,
    NotANumber,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Accepted { entry: ResultEntry, finished: bool },
    Rejected(Rejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowProgress {
    /// Rows visible so far, starting at 1.
    pub shown: usize,
    pub total: usize,
}

/// Everything a presentation layer needs to render the current instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub kind: Option<OperationKind>,
    pub participant: String,
    /// 1-based number of the current question.
    pub question_number: Option<u32>,
    pub total_questions: u32,
    pub display_text: String,
    pub rows: Option<RowProgress>,
    pub time_remaining: Option<u32>,
    pub answer: String,
    pub input_enabled: bool,
    pub answered: u32,
    pub score: u32,
    pub progress_percent: f64,
    pub results: Vec<ResultEntry>,
}

#[derive(Debug, Default)]
struct RevealState {
    shown: usize,
    display: String,
    answer_phase: bool,
}

#[derive(Debug)]
struct ActiveSession {
    config: SessionConfig,
    participant: String,
    batch: QuestionBatch,
    index: usize,
    answer: String,
    results: Vec<ResultEntry>,
    score: u32,
    reveal: RevealState,
    time_remaining: Option<u32>,
}

impl ActiveSession {
    fn current(&self) -> Option<&Question> {
        self.batch.questions.get(self.index)
    }

    fn total(&self) -> u32 {
        self.batch.questions.len() as u32
    }
}

#[derive(Debug)]
pub struct SessionMachine {
    phase: Phase,
    clock: SessionClock,
    session: Option<ActiveSession>,
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionMachine {
    pub fn new() -> Self {
        SessionMachine { phase: Phase::Idle, clock: SessionClock::new(), session: None }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// The generated questions of the running or finished session.
    pub fn questions(&self) -> &[Question] {
        self.session.as_ref().map_or(&[], |s| &s.batch.questions)
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::RowReveal | Phase::AnswerPending => self.session.as_ref()?.current(),
            _ => None,
        }
    }

    /// Validate, generate the batch, and enter the 3-2-1 countdown.
    ///
    /// # Errors
    ///
    /// - [`PracticeError::Validation`] when `participant` is blank.
    /// - [`PracticeError::SessionActive`] while another session is running.
    /// - Configuration errors from validation or generation; the machine stays `Idle`.
    pub fn start(&mut self, config: SessionConfig, participant: &str) -> Result<()> {
        let participant = participant.trim();
        if participant.is_empty() {
            return Err(PracticeError::Validation("Name is required".to_string()));
        }
        if !matches!(self.phase, Phase::Idle | Phase::Finished) {
            return Err(PracticeError::SessionActive);
        }
        config.validate()?;
        let batch = generate_questions(GenerationRequest {
            params: config.operation,
            count: config.question_count,
            rng_seed: config.rng_seed,
        })?;

        self.clock.cancel_all();
        info!(
            batch_id = %batch.batch_id,
            kind = %batch.kind,
            questions = batch.len(),
            participant,
            "session starting"
        );
        self.session = Some(ActiveSession {
            config,
            participant: participant.to_string(),
            batch,
            index: 0,
            answer: String::new(),
            results: Vec::new(),
            score: 0,
            reveal: RevealState::default(),
            time_remaining: None,
        });
        self.phase = Phase::Countdown { remaining: COUNTDOWN_SECS };
        self.clock.arm_ticker(TICK, None);
        Ok(())
    }

    /// Abandon the session from any phase.
    pub fn exit(&mut self) {
        if self.session.is_some() {
            info!(phase = ?self.phase, "session exited");
        }
        self.clear();
    }

    /// Discard a finished session so a new one can be configured.
    pub fn reset(&mut self) {
        debug!(phase = ?self.phase, "session reset");
        self.clear();
    }

    fn clear(&mut self) {
        self.clock.cancel_all();
        self.session = None;
        self.phase = Phase::Idle;
    }

    // ── time ────────────────────────────────────────────────────────────────

    /// Let `elapsed` pass, firing every timer that falls due on the way.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.clock.now() + elapsed;
        while let Some(event) = self.clock.pop_due(until) {
            self.handle_timer(event);
        }
        self.clock.advance_to(until);
    }

    /// Time until the next timer fires, if any is armed.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.clock.next_deadline().map(|due| due.saturating_sub(self.clock.now()))
    }

    /// Timers that are armed right now, earliest first.
    pub fn pending_timers(&self) -> Vec<TimerEvent> {
        self.clock.pending()
    }

    /// Deliver a timer event captured earlier. Returns `false` when the event
    /// is stale (its timer was cancelled or re-armed, or it belongs to another
    /// question) and nothing changed.
    pub fn fire(&mut self, event: TimerEvent) -> bool {
        if !self.clock.take(&event) {
            debug!(?event, "dropping stale timer event");
            return false;
        }
        self.handle_timer(event)
    }

    fn handle_timer(&mut self, event: TimerEvent) -> bool {
        let current = self.session.as_ref().map(|s| s.index);
        match (event.slot, self.phase) {
            (TimerSlot::Ticker, Phase::Countdown { remaining }) if event.question.is_none() => {
                self.countdown_tick(remaining);
                true
            }
            (TimerSlot::Ticker, Phase::AnswerPending) if event.question == current => {
                self.answer_tick();
                true
            }
            (TimerSlot::Reveal, Phase::RowReveal) if event.question == current => {
                self.reveal_next_row();
                true
            }
            _ => {
                debug!(?event, phase = ?self.phase, ?current, "timer fired for another question or phase");
                false
            }
        }
    }

    fn countdown_tick(&mut self, remaining: u32) {
        let remaining = remaining.saturating_sub(1);
        if remaining == 0 {
            self.clock.cancel_ticker();
            self.begin_question(0);
        } else {
            self.phase = Phase::Countdown { remaining };
        }
    }

    fn answer_tick(&mut self) {
        let Some(session) = self.session.as_mut() else { return };
        let remaining = session.time_remaining.unwrap_or(0).saturating_sub(1);
        session.time_remaining = Some(remaining);
        if remaining == 0 {
            let given = parse_answer(&session.answer);
            debug!(question = session.index + 1, ?given, "time expired");
            self.score_current(given);
        }
    }

    // ── question delivery ───────────────────────────────────────────────────

    fn begin_question(&mut self, index: usize) {
        self.clock.cancel_all();
        let Some(session) = self.session.as_mut() else { return };
        session.index = index;
        session.answer.clear();
        session.reveal = RevealState::default();
        session.time_remaining = None;

        let Some(question) = session.batch.questions.get(index) else {
            self.finish();
            return;
        };
        info!(question = index + 1, total = session.total(), "question delivered");

        match question.body().rows() {
            Some((numbers, operators)) => {
                session.reveal.shown = 1;
                session.reveal.display = rows_text(numbers, operators, 1);
                self.phase = Phase::RowReveal;
                if numbers.len() <= 1 {
                    self.open_answer_window(RUNNING_TOTAL_ANSWER_SECS);
                } else {
                    let interval = session.config.row_interval();
                    self.clock.arm_reveal(interval, Some(index));
                }
            }
            None => {
                let secs = session.config.time_limit_secs;
                self.open_answer_window(secs);
            }
        }
    }

    fn reveal_next_row(&mut self) {
        let Some(session) = self.session.as_mut() else { return };
        let index = session.index;
        let Some((numbers, operators)) = session.batch.questions.get(index).and_then(|q| q.body().rows())
        else {
            return;
        };
        if session.reveal.shown >= numbers.len() {
            self.open_answer_window(RUNNING_TOTAL_ANSWER_SECS);
            return;
        }
        let shown = session.reveal.shown + 1;
        session.reveal.display = rows_text(numbers, operators, shown);
        session.reveal.shown = shown;
        debug!(question = index + 1, row = shown, rows = numbers.len(), "row revealed");
        let interval = session.config.row_interval();
        self.clock.arm_reveal(interval, Some(index));
    }

    fn open_answer_window(&mut self, secs: u32) {
        self.clock.cancel_all();
        let Some(session) = self.session.as_mut() else { return };
        session.reveal.answer_phase = true;
        session.time_remaining = Some(secs);
        let index = session.index;
        self.phase = Phase::AnswerPending;
        self.clock.arm_ticker(TICK, Some(index));
    }

    // ── answering ───────────────────────────────────────────────────────────

    /// Replace the answer buffer. Input is only accepted while an answer window
    /// is open; returns whether the text was taken.
    pub fn set_answer(&mut self, text: &str) -> bool {
        if self.phase != Phase::AnswerPending {
            return false;
        }
        match self.session.as_mut() {
            Some(session) => {
                session.answer = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Submit the answer buffer for the current question.
    pub fn submit(&mut self) -> SubmitOutcome {
        match self.phase {
            Phase::AnswerPending => {}
            Phase::RowReveal => return SubmitOutcome::Rejected(Rejection::RevealInProgress),
            _ => return SubmitOutcome::Rejected(Rejection::NoActiveQuestion),
        }
        let Some(session) = self.session.as_ref() else {
            return SubmitOutcome::Rejected(Rejection::NoActiveQuestion);
        };
        if session.answer.trim().is_empty() {
            return SubmitOutcome::Rejected(Rejection::EmptyAnswer);
        }
        let Some(given) = parse_answer(&session.answer) else {
            return SubmitOutcome::Rejected(Rejection::NotANumber);
        };
        match self.score_current(Some(given)) {
            Some(entry) => SubmitOutcome::Accepted { entry, finished: self.phase == Phase::Finished },
            None => SubmitOutcome::Rejected(Rejection::NoActiveQuestion),
        }
    }

    /// Append the result for the current question, then move on or finish.
    fn score_current(&mut self, given: Option<f64>) -> Option<ResultEntry> {
        self.clock.cancel_all();
        let session = self.session.as_mut()?;
        let question = session.current()?.clone();
        let entry = ResultEntry::score(question, given);
        if entry.is_correct {
            session.score += 1;
        }
        session.results.push(entry.clone());
        debug!(
            question = entry.question.id(),
            correct = entry.is_correct,
            score = session.score,
            "answer scored"
        );

        let next = session.index + 1;
        if next >= session.batch.questions.len() {
            self.finish();
        } else {
            self.begin_question(next);
        }
        Some(entry)
    }

    fn finish(&mut self) {
        self.clock.cancel_all();
        self.phase = Phase::Finished;
        if let Some(session) = self.session.as_mut() {
            session.answer.clear();
            session.reveal = RevealState::default();
            session.time_remaining = None;
            info!(score = session.score, total = session.total(), "session finished");
        }
    }

    // ── views ───────────────────────────────────────────────────────────────

    /// Final summary, available once the session has finished.
    pub fn summary(&self) -> Option<Summary> {
        if self.phase != Phase::Finished {
            return None;
        }
        let session = self.session.as_ref()?;
        Some(Summary::from_results(&session.participant, &session.results, session.total()))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let Some(session) = self.session.as_ref() else {
            return SessionSnapshot {
                phase: self.phase,
                kind: None,
                participant: String::new(),
                question_number: None,
                total_questions: 0,
                display_text: String::new(),
                rows: None,
                time_remaining: None,
                answer: String::new(),
                input_enabled: false,
                answered: 0,
                score: 0,
                progress_percent: 0.0,
                results: Vec::new(),
            };
        };

        let in_question = matches!(self.phase, Phase::RowReveal | Phase::AnswerPending);
        let question = if in_question { session.current() } else { None };
        let rows = question
            .and_then(|q| q.body().rows())
            .map(|(numbers, _)| RowProgress { shown: session.reveal.shown, total: numbers.len() });
        let display_text = match (self.phase, question) {
            (Phase::RowReveal, Some(_)) => session.reveal.display.clone(),
            (_, Some(q)) => q.prompt(),
            _ => String::new(),
        };
        let total = session.total();
        let question_number = question.map(|_| session.index as u32 + 1);
        let progress_percent = match (question_number, self.phase) {
            (_, Phase::Finished) => 100.0,
            (Some(n), _) if total > 0 => 100.0 * f64::from(n) / f64::from(total),
            _ => 0.0,
        };

        SessionSnapshot {
            phase: self.phase,
            kind: Some(session.batch.kind),
            participant: session.participant.clone(),
            question_number,
            total_questions: total,
            display_text,
            rows,
            time_remaining: if self.phase == Phase::AnswerPending { session.time_remaining } else { None },
            answer: session.answer.clone(),
            input_enabled: self.phase == Phase::AnswerPending,
            answered: session.results.len() as u32,
            score: session.score,
            progress_percent,
            results: session.results.clone(),
        }
    }
}
