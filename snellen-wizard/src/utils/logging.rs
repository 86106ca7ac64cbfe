// Logging utilities
// Structured logging with JSON and human-readable formats

use log::Level;
use serde::Serialize;

/// `[PHASE: ...]` / `[STEP: ...]` tags lifted out of a log message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogTags {
    pub phase: Option<String>,
    pub step: Option<String>,
    pub message: String,
}

/// Split `[PHASE: ...]` and `[STEP: ...]` out of a message. The remaining text is trimmed.
pub fn split_log_tags(message: &str) -> LogTags {
    let (phase, rest) = take_tag(message, "PHASE");
    let (step, rest) = take_tag(&rest, "STEP");
    LogTags {
        phase,
        step,
        message: rest,
    }
}

fn take_tag(message: &str, name: &str) -> (Option<String>, String) {
    let open = format!("[{}:", name);
    let Some(start) = message.find(&open) else {
        return (None, message.trim().to_string());
    };
    let Some(len) = message[start..].find(']') else {
        return (None, message.trim().to_string());
    };
    let value = message[start + open.len()..start + len].trim().to_string();
    let rest = format!("{} {}", &message[..start], &message[start + len + 1..]);
    (Some(value), rest.trim().to_string())
}

/// One log record, as written to the JSON sink.
#[derive(Debug, Serialize)]
pub struct LogLine<'a> {
    pub timestamp: &'a str,
    pub level: &'a str,
    pub target: &'a str,
    pub session: &'a str,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<&'a str>,
}

impl<'a> LogLine<'a> {
    pub fn new(
        timestamp: &'a str,
        level: Level,
        target: &'a str,
        session: &'a str,
        tags: &'a LogTags,
    ) -> Self {
        Self {
            timestamp,
            level: level.as_str(),
            target,
            session,
            message: &tags.message,
            phase: tags.phase.as_deref(),
            step: tags.step.as_deref(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn to_text(&self) -> String {
        let mut line = format!("[{}] [{}]", self.timestamp, self.level);
        if let Some(phase) = self.phase {
            line.push_str(&format!(" [PHASE: {}]", phase));
        }
        if let Some(step) = self.step {
            line.push_str(&format!(" [STEP: {}]", step));
        }
        line.push_str(&format!(" [{}] {}", self.target, self.message));
        line
    }
}
