//! Bypass audit records and the markdown audit log
//!
//! Every granted bypass is appended to a human-readable markdown log.
//! The rendered form is stable enough to parse back into structured
//! records: a `## <timestamp> — <app name>` header, `App:` and
//! `Duration:` lines, the free-text reason, and a `---` delimiter
//! between entries.

use chrono::NaiveDateTime;
use focus_util::AppId;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

use crate::StoreResult;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One granted bypass, as recorded in the audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BypassAudit {
    /// Grant time, local wall clock, minute precision.
    pub timestamp: NaiveDateTime,
    pub display_name: String,
    pub app: AppId,
    pub duration: Duration,
    pub reason: String,
}

/// Sink for bypass audit records.
pub trait AuditSink: Send + Sync {
    fn append(&self, record: &BypassAudit) -> StoreResult<()>;
}

/// Append-only markdown audit log.
pub struct MarkdownAuditLog {
    path: PathBuf,
}

impl MarkdownAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn render(record: &BypassAudit) -> String {
        format!(
            "## {} — {}\nApp: {}\nDuration: {}s\n{}\n\n---\n\n",
            record.timestamp.format(TIMESTAMP_FORMAT),
            record.display_name,
            record.app,
            record.duration.as_secs(),
            escape_reason(record.reason.trim()),
        )
    }

    /// Recover structured records from rendered log text. Malformed
    /// blocks are skipped.
    pub fn parse(text: &str) -> Vec<BypassAudit> {
        text.split("\n---\n")
            .filter_map(parse_block)
            .collect()
    }
}

impl AuditSink for MarkdownAuditLog {
    fn append(&self, record: &BypassAudit) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(Self::render(record).as_bytes())?;

        debug!(app = %record.app, path = %self.path.display(), "Audit record appended");
        Ok(())
    }
}

/// A reason line that is exactly the entry delimiter would split the
/// record in two on parse, so it is escaped on render.
fn escape_reason(reason: &str) -> String {
    reason
        .lines()
        .map(|line| if line == "---" { r"\---" } else { line })
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_block(block: &str) -> Option<BypassAudit> {
    let mut lines = block.lines().filter(|l| !l.trim().is_empty());

    let header = lines.next()?.trim();
    let header = header.strip_prefix("## ")?;
    let (timestamp_str, display_name) = header.split_once(" — ")?;
    let timestamp = NaiveDateTime::parse_from_str(timestamp_str, TIMESTAMP_FORMAT).ok()?;

    let app = lines.next()?.trim().strip_prefix("App: ")?.to_string();
    let duration_line = lines.next()?.trim().strip_prefix("Duration: ")?;
    let secs: u64 = duration_line.strip_suffix('s')?.parse().ok()?;

    let reason = lines
        .map(|line| if line.trim() == r"\---" { "---" } else { line })
        .collect::<Vec<_>>()
        .join("\n");

    Some(BypassAudit {
        timestamp,
        display_name: display_name.to_string(),
        app: AppId::new(app),
        duration: Duration::from_secs(secs),
        reason,
    })
}

/// In-memory audit sink for tests.
#[derive(Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<BypassAudit>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<BypassAudit> {
        self.records.lock().unwrap().clone()
    }
}

impl AuditSink for MemoryAuditSink {
    fn append(&self, record: &BypassAudit) -> StoreResult<()> {
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(name: &str, reason: &str) -> BypassAudit {
        BypassAudit {
            timestamp: NaiveDate::from_ymd_opt(2026, 1, 7)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            display_name: name.to_string(),
            app: AppId::new("com.example.game"),
            duration: Duration::from_secs(900),
            reason: reason.to_string(),
        }
    }

    #[test]
    fn rendered_record_has_parseable_header() {
        let text = MarkdownAuditLog::render(&record("Some Game", "needed a break"));
        assert!(text.starts_with("## 2026-01-07 10:30 — Some Game\n"));
        assert!(text.contains("App: com.example.game\n"));
        assert!(text.contains("Duration: 900s\n"));
        assert!(text.contains("needed a break"));
        assert!(text.contains("\n---\n"));
    }

    #[test]
    fn render_parse_round_trip() {
        let a = record("Some Game", "checking messages");
        let b = record("Other", "work research");

        let text = format!(
            "{}{}",
            MarkdownAuditLog::render(&a),
            MarkdownAuditLog::render(&b)
        );
        let parsed = MarkdownAuditLog::parse(&text);
        assert_eq!(parsed, vec![a, b]);
    }

    #[test]
    fn reason_containing_the_delimiter_round_trips() {
        let tricky = record("Game", "needed a break\n---\nback at it");

        let text = MarkdownAuditLog::render(&tricky);
        let parsed = MarkdownAuditLog::parse(&text);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].reason, "needed a break\n---\nback at it");
    }

    #[test]
    fn malformed_blocks_are_skipped() {
        let good = MarkdownAuditLog::render(&record("Game", "ok"));
        let text = format!("junk without a header\n\n---\n\n{}", good);

        let parsed = MarkdownAuditLog::parse(&text);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].display_name, "Game");
    }

    #[test]
    fn appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let log = MarkdownAuditLog::new(dir.path().join("focus_log.md"));

        log.append(&record("Game", "first")).unwrap();
        log.append(&record("Game", "second")).unwrap();

        let text = std::fs::read_to_string(log.path()).unwrap();
        let parsed = MarkdownAuditLog::parse(&text);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].reason, "first");
        assert_eq!(parsed[1].reason, "second");
    }

    #[test]
    fn memory_sink_collects_records() {
        let sink = MemoryAuditSink::new();
        sink.append(&record("Game", "r")).unwrap();
        assert_eq!(sink.records().len(), 1);
    }
}
