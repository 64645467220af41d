//! CSV history writer.
//!
//! One header row, then one row per recorded event. Fields containing a
//! comma, a quote or a line break are quoted with inner quotes doubled.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use creatures_core::{HistoryError, HistoryRecorder};
use creatures_types::HistoryRecord;

/// Column names, in order.
pub const HEADER: [&str; 16] = [
    "tick",
    "Type",
    "id",
    "Action",
    "Action Details",
    "Age",
    "Alertness",
    "Energy",
    "Damage",
    "Alertness Change",
    "Energy Change",
    "Damage Change",
    "Result",
    "Direction",
    "Other Type",
    "Other id",
];

/// Writes history rows as CSV.
#[derive(Debug)]
pub struct CsvHistory<W: Write + core::fmt::Debug> {
    out: W,
    rows: u64,
}

impl CsvHistory<BufWriter<File>> {
    /// Create (or truncate) the file at `path` and write the header.
    pub fn create(path: &Path) -> Result<Self, HistoryError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::new(BufWriter::new(File::create(path)?))
    }
}

impl<W: Write + core::fmt::Debug> CsvHistory<W> {
    /// Wrap `out` and write the header.
    pub fn new(mut out: W) -> Result<Self, HistoryError> {
        write_line(&mut out, HEADER.iter().map(|h| (*h).to_owned()))?;
        Ok(Self { out, rows: 0 })
    }

    /// Rows written so far, header excluded.
    pub const fn rows(&self) -> u64 {
        self.rows
    }

    /// The underlying writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + core::fmt::Debug> HistoryRecorder for CsvHistory<W> {
    fn record(&mut self, row: &HistoryRecord) -> Result<(), HistoryError> {
        let (direction, other_kind, other_id) = match &row.other {
            Some(other) => ("->", other.kind.clone(), other.id.to_string()),
            None => ("", String::new(), String::new()),
        };
        let fields = [
            row.tick.to_string(),
            row.kind.clone(),
            row.id.to_string(),
            row.action.clone(),
            row.action_details.clone(),
            row.age.to_string(),
            row.alertness.to_string(),
            row.energy.normalize().to_string(),
            row.damage.normalize().to_string(),
            row.alertness_delta.to_string(),
            row.energy_delta.normalize().to_string(),
            row.damage_delta.normalize().to_string(),
            row.result.clone(),
            direction.to_owned(),
            other_kind,
            other_id,
        ];
        write_line(&mut self.out, fields.into_iter())?;
        self.rows = self.rows.saturating_add(1);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), HistoryError> {
        self.out.flush()?;
        Ok(())
    }
}

fn write_line(out: &mut impl Write, fields: impl Iterator<Item = String>) -> std::io::Result<()> {
    let line = fields.map(|f| escape(&f)).collect::<Vec<_>>().join(",");
    writeln!(out, "{line}")
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use creatures_types::{AgentState, CreatureId, EventCategory, Footprint};

    use super::*;

    fn korub() -> AgentState {
        let mut state = AgentState::new(CreatureId(7), "Korub", Footprint::new(30, 30), dec!(0.2), 80);
        state.energy = dec!(4900.50);
        state.age = 12;
        state
    }

    fn text(history: CsvHistory<Vec<u8>>) -> String {
        String::from_utf8(history.into_inner()).unwrap()
    }

    #[test]
    fn header_only_when_empty() {
        let history = CsvHistory::new(Vec::new()).unwrap();
        assert_eq!(
            text(history),
            "tick,Type,id,Action,Action Details,Age,Alertness,Energy,Damage,\
             Alertness Change,Energy Change,Damage Change,Result,Direction,Other Type,Other id\n"
        );
    }

    #[test]
    fn row_with_counterpart() {
        let me = korub();
        let mut berry = AgentState::new(CreatureId(3), "Berry", Footprint::new(10, 10), dec!(0.2), 100);
        berry.energy = dec!(10);
        let row = HistoryRecord::for_subject(EventCategory::Attack, 4, &me, "attack", "hit")
            .details("big claw")
            .deltas(0, dec!(-9.0), dec!(0))
            .against(&berry);

        let mut history = CsvHistory::new(Vec::new()).unwrap();
        history.record(&row).unwrap();
        assert_eq!(history.rows(), 1);
        let out = text(history);
        let line = out.lines().nth(1).unwrap();
        assert_eq!(line, "4,Korub,7,attack,big claw,12,80,4900.5,0,0,-9,0,hit,->,Berry,3");
    }

    #[test]
    fn solo_row_leaves_direction_blank() {
        let row = HistoryRecord::for_subject(EventCategory::Died, 9, &korub(), "died", "Out of energy");
        let mut history = CsvHistory::new(Vec::new()).unwrap();
        history.record(&row).unwrap();
        history.flush().unwrap();
        let out = text(history);
        assert!(out.lines().nth(1).unwrap().ends_with(",Out of energy,,,"));
    }

    #[test]
    fn awkward_fields_are_quoted() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
