//! The history sink interface and the row filter in front of it.
//!
//! The tick engine produces one [`HistoryRecord`] per notable event. Rows
//! pass through a [`HistoryFilter`] (category toggles, kind allow/deny
//! lists) and the survivors go to a [`HistoryRecorder`]. The CSV writer
//! lives in the binary; [`MemoryHistory`] keeps rows in memory for tests
//! and embedding.

use creatures_types::HistoryRecord;

use crate::config::LoggingConfig;

/// Kind-list entry that matches every kind.
pub const ALL_KINDS: &str = "All";

/// Errors raised by a history sink.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Writing to the underlying store failed.
    #[error("history write failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

/// Receives history rows that passed the filter.
pub trait HistoryRecorder: core::fmt::Debug {
    /// Store one row.
    fn record(&mut self, row: &HistoryRecord) -> Result<(), HistoryError>;

    /// Push buffered rows to the underlying store.
    fn flush(&mut self) -> Result<(), HistoryError> {
        Ok(())
    }
}

/// Keeps every row in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    rows: Vec<HistoryRecord>,
}

impl MemoryHistory {
    /// An empty history.
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Rows recorded so far.
    pub fn rows(&self) -> &[HistoryRecord] {
        &self.rows
    }

    /// Rows whose result text is `result`.
    pub fn with_result<'a>(&'a self, result: &'a str) -> impl Iterator<Item = &'a HistoryRecord> {
        self.rows.iter().filter(move |r| r.result == result)
    }
}

impl HistoryRecorder for MemoryHistory {
    fn record(&mut self, row: &HistoryRecord) -> Result<(), HistoryError> {
        self.rows.push(row.clone());
        Ok(())
    }
}

/// Decides which rows reach the recorder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    config: LoggingConfig,
}

impl HistoryFilter {
    /// A filter driven by the `logging` config section.
    pub const fn new(config: LoggingConfig) -> Self {
        Self { config }
    }

    /// A filter that keeps every row.
    pub fn keep_all() -> Self {
        Self::new(LoggingConfig {
            log_move: true,
            log_sleep: true,
            exclude: Vec::new(),
            ..LoggingConfig::default()
        })
    }

    /// Whether `row` is kept: its category is enabled, its kind is
    /// included (or `"All"` is), and its kind is not excluded.
    pub fn allows(&self, row: &HistoryRecord) -> bool {
        if !self.config.category_enabled(row.category) {
            return false;
        }
        let included = self
            .config
            .include
            .iter()
            .any(|k| k == ALL_KINDS || *k == row.kind);
        included && !self.config.exclude.iter().any(|k| *k == row.kind)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use creatures_types::{AgentState, CreatureId, EventCategory, Footprint};

    use super::*;

    fn row(category: EventCategory, kind: &str) -> HistoryRecord {
        let state = AgentState::new(CreatureId(3), kind, Footprint::new(10, 10), dec!(0.2), 100);
        HistoryRecord::for_subject(category, 1, &state, "x", "y")
    }

    #[test]
    fn default_filter_drops_moves_and_the_sun() {
        let filter = HistoryFilter::new(LoggingConfig::default());
        assert!(filter.allows(&row(EventCategory::Eat, "Berry")));
        assert!(filter.allows(&row(EventCategory::Died, "Korub")));
        assert!(!filter.allows(&row(EventCategory::Move, "Korub")));
        assert!(!filter.allows(&row(EventCategory::Sleep, "Berry")));
        assert!(!filter.allows(&row(EventCategory::Eat, "Sun")));
    }

    #[test]
    fn include_list_restricts_kinds() {
        let filter = HistoryFilter::new(LoggingConfig {
            include: vec!["Korub".to_owned()],
            ..LoggingConfig::default()
        });
        assert!(filter.allows(&row(EventCategory::Attack, "Korub")));
        assert!(!filter.allows(&row(EventCategory::Attack, "Fleeb")));
    }

    #[test]
    fn exclude_wins_over_include() {
        let filter = HistoryFilter::new(LoggingConfig {
            include: vec!["Korub".to_owned()],
            exclude: vec!["Korub".to_owned()],
            ..LoggingConfig::default()
        });
        assert!(!filter.allows(&row(EventCategory::Attack, "Korub")));
    }

    #[test]
    fn keep_all_keeps_everything() {
        let filter = HistoryFilter::keep_all();
        assert!(filter.allows(&row(EventCategory::Move, "Sun")));
        assert!(filter.allows(&row(EventCategory::Sleep, "Gnub")));
    }

    #[test]
    fn memory_history_records_in_order() {
        let mut history = MemoryHistory::new();
        history.record(&row(EventCategory::Eat, "Berry")).unwrap();
        history.record(&row(EventCategory::Died, "Berry")).unwrap();
        assert_eq!(history.rows().len(), 2);
        assert_eq!(history.rows()[1].category, EventCategory::Died);
        assert_eq!(history.with_result("y").count(), 2);
        assert!(history.flush().is_ok());
    }
}
