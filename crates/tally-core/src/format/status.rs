//! Template rendering for the status line.
//!
//! A template is plain text with `${Name}` tokens. Tokens are replaced in a
//! single left-to-right pass, so text produced by one token is never scanned
//! again. Unknown `${...}` sequences are copied through unchanged.

use chrono::{DateTime, Local, Utc};

use crate::progress::{ProgressState, TimeInterval};

pub const DEFAULT_TEMPLATE: &str = "progress => ${Counter}/${TotalCount} (${PercentageCompleted}%); elapsed: ${ElapsedTime}; ete: ${EstimatedTimeEnroute}; eta: ${EstimatedTimeOfArrival}";

const NOT_AVAILABLE: &str = "N/A";
const ETA_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Counter,
    TotalCount,
    PercentageCompleted,
    ElapsedTime,
    EstimatedTimeEnroute,
    EstimatedTimeOfArrival,
}

impl Token {
    fn parse(name: &str) -> Option<Self> {
        let token = match name {
            "Counter" => Token::Counter,
            "TotalCount" => Token::TotalCount,
            "PercentageCompleted" => Token::PercentageCompleted,
            "ElapsedTime" => Token::ElapsedTime,
            "EstimatedTimeEnroute" => Token::EstimatedTimeEnroute,
            "EstimatedTimeOfArrival" => Token::EstimatedTimeOfArrival,
            _ => return None,
        };
        Some(token)
    }

    fn render(self, state: &ProgressState, now: DateTime<Utc>) -> String {
        match self {
            Token::Counter => state.format_value(state.counter()),
            Token::TotalCount => state
                .total_count()
                .map(|t| state.format_value(t))
                .unwrap_or_else(|| "-".to_string()),
            Token::PercentageCompleted => state
                .percentage_completed()
                .map(|p| format!("{p:.2}"))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            Token::ElapsedTime => TimeInterval::from_duration(state.elapsed_at(now)).to_string(),
            Token::EstimatedTimeEnroute => state
                .ete_at(now)
                .map(|ete| ete.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            Token::EstimatedTimeOfArrival => state
                .eta_at(now)
                .map(format_eta)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}

/// ETA in the local time zone as `YYYY-MM-DD HH:MM:SS`.
pub fn format_eta(eta: DateTime<Utc>) -> String {
    eta.with_timezone(&Local).format(ETA_FORMAT).to_string()
}

/// Substitute every known token in `template`, evaluating time-derived tokens
/// against the single instant `now`.
pub fn render_status(state: &ProgressState, template: &str, now: DateTime<Utc>) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;
    while let Some(open) = rest.find("${") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let token = after
            .find('}')
            .and_then(|close| Token::parse(&after[..close]).map(|t| (t, close)));
        match token {
            Some((token, close)) => {
                out.push_str(&token.render(state, now));
                rest = &after[close + 1..];
            }
            None => {
                out.push_str("${");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
