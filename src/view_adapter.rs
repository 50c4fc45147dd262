use serde_json::{json, Value};

use crate::practice_engine::{
    results::{ResultLine, Summary},
    session::{Phase, SessionSnapshot},
};

/// Screen name the web client switches on.
fn screen_str(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "Setup",
        Phase::Countdown { .. } => "Countdown",
        Phase::RowReveal | Phase::AnswerPending => "Question",
        Phase::Finished => "Results",
    }
}

/// Build one row of the results list.
fn result_row(idx: usize, line: &ResultLine) -> Value {
    json!({
        "id": idx,
        "question": line.question,
        "yourAnswer": line.your_answer,
        "correctAnswer": line.correct_answer,
        "isCorrect": line.is_correct
    })
}

/// Build the countdown block; `null` outside the countdown.
fn countdown(phase: Phase) -> Value {
    match phase {
        Phase::Countdown { remaining } => json!({ "value": remaining }),
        _ => Value::Null,
    }
}

/// Map a [`SessionSnapshot`] to the view-state JSON object rendered by the
/// web client.
pub fn to_view_state(snapshot: &SessionSnapshot) -> Value {
    let reveal = snapshot.rows.map(|rows| {
        json!({
            "shown": rows.shown,
            "total": rows.total,
            "done": snapshot.phase == Phase::AnswerPending
        })
    });
    let results: Vec<Value> = snapshot
        .results
        .iter()
        .enumerate()
        .map(|(idx, entry)| result_row(idx, &entry.render()))
        .collect();

    json!({
        "view_type": "MentalPracticeState",
        "screen": screen_str(snapshot.phase),
        "operation": snapshot.kind.map(|k| k.to_string()),
        "participant": snapshot.participant,
        "countdown": countdown(snapshot.phase),
        "question": {
            "number": snapshot.question_number,
            "total": snapshot.total_questions,
            "text": snapshot.display_text,
            "reveal": reveal
        },
        "timer": {
            "secondsLeft": snapshot.time_remaining,
            "warning": snapshot.time_remaining.is_some_and(|t| t <= 5)
        },
        "input": {
            "value": snapshot.answer,
            "enabled": snapshot.input_enabled
        },
        "progress": {
            "answered": snapshot.answered,
            "score": snapshot.score,
            "percent": snapshot.progress_percent
        },
        "results": results
    })
}

/// Map a finished session's [`Summary`] to the results-screen JSON object.
pub fn to_summary_view(summary: &Summary) -> Value {
    let rows: Vec<Value> = summary
        .lines()
        .iter()
        .enumerate()
        .map(|(idx, line)| result_row(idx, line))
        .collect();

    json!({
        "view_type": "MentalPracticeSummary",
        "heading": summary.heading(),
        "score": format!("{}/{}", summary.score, summary.total),
        "percentLabel": summary.percent_label(),
        "tier": summary.tier.to_string(),
        "rows": rows
    })
}
