use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

const NO_MATCH_LABEL: &str = "[No match]";
const INTERIM_PREFIX: &str = "[Interim]: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptLineKind {
    Translation,
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptLine {
    pub kind: TranscriptLineKind,
    pub text: String,
    pub recorded_at: DateTime<Utc>,
}

impl TranscriptLine {
    fn render(&self) -> &str {
        match self.kind {
            TranscriptLineKind::Translation => &self.text,
            TranscriptLineKind::NoMatch => NO_MATCH_LABEL,
        }
    }
}

/// Read-only copy of the transcript for the API
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptSnapshot {
    pub lines: Vec<TranscriptLine>,
    pub interim: Option<String>,
    pub text: String,
}

#[derive(Default)]
struct TranscriptInner {
    lines: Vec<TranscriptLine>,
    interim: Option<String>,
}

/// Transcript of the current session: committed lines plus one provisional line
/// that each interim result replaces.
#[derive(Default)]
pub struct Transcript {
    inner: Mutex<TranscriptInner>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.lines.clear();
        inner.interim = None;
    }

    pub fn set_interim(&self, text: &str) {
        let text = normalize_whitespace(text);
        self.inner.lock().interim = if text.is_empty() { None } else { Some(text) };
    }

    /// Commit a final translation. Returns the normalized text, `None` if blank.
    pub fn push_translation(&self, text: &str) -> Option<String> {
        let text = normalize_whitespace(text);
        let mut inner = self.inner.lock();
        inner.interim = None;
        if text.is_empty() {
            return None;
        }
        inner.lines.push(TranscriptLine {
            kind: TranscriptLineKind::Translation,
            text: text.clone(),
            recorded_at: Utc::now(),
        });
        Some(text)
    }

    pub fn push_no_match(&self) {
        let mut inner = self.inner.lock();
        inner.interim = None;
        inner.lines.push(TranscriptLine {
            kind: TranscriptLineKind::NoMatch,
            text: String::new(),
            recorded_at: Utc::now(),
        });
    }

    pub fn snapshot(&self) -> TranscriptSnapshot {
        let inner = self.inner.lock();
        let mut rendered: Vec<String> = inner.lines.iter().map(|l| l.render().to_string()).collect();
        if let Some(interim) = &inner.interim {
            rendered.push(format!("{}{}", INTERIM_PREFIX, interim));
        }
        TranscriptSnapshot {
            lines: inner.lines.clone(),
            interim: inner.interim.clone(),
            text: rendered.join("\n"),
        }
    }
}

/// Collapse runs of whitespace into single spaces and trim
fn normalize_whitespace(text: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let pattern = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
    pattern.replace_all(text, " ").trim().to_string()
}
