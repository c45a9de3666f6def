use anyhow::Context;
use prometheus::register_counter_vec;
use prometheus::CounterVec;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

// sqlx logs every statement at info, which drowns the request traces
const DEFAULT_FILTER: &str = "info,sqlx=warn";

lazy_static! {
    pub static ref QUIZ_DRAWS: CounterVec = register_counter_vec!(
        "trivia_quiz_draws_total",
        "Number of quiz draws, by outcome",
        &["outcome"]
    )
    .unwrap();
    pub static ref QUESTION_WRITES: CounterVec = register_counter_vec!(
        "trivia_question_writes_total",
        "Number of question mutations, by operation and status",
        &["operation", "status"]
    )
    .unwrap();
}

pub fn record_quiz_draw(drawn: bool) {
    let outcome = if drawn { "drawn" } else { "exhausted" };
    QUIZ_DRAWS.with_label_values(&[outcome]).inc();
}

pub fn record_question_write(operation: &str, succeeded: bool) {
    let status = if succeeded { "ok" } else { "failed" };
    QUESTION_WRITES
        .with_label_values(&[operation, status])
        .inc();
}

pub fn init_tracing() -> anyhow::Result<()> {
    let mut fmt_layer = fmt::layer();
    if std::env::var("INCLUDE_SPAN_EVENTS").is_ok_and(|value| value.eq_ignore_ascii_case("true")) {
        fmt_layer = fmt_layer.with_span_events(FmtSpan::ENTER | FmtSpan::EXIT);
    }
    let filter_layer = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("Invalid log filter")?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .context("Tracing subscriber is already installed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_draws_are_counted_by_outcome() {
        let before = QUIZ_DRAWS.with_label_values(&["exhausted"]).get();
        record_quiz_draw(false);
        let after = QUIZ_DRAWS.with_label_values(&["exhausted"]).get();
        assert!(after >= before + 1.0);
    }
}
