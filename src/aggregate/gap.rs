//! Gender Gap Module
//! Decade/region roll-up of secondary enrollment feeding the diverging bar chart.

use crate::aggregate::{AggregateSpec, Aggregator};
use crate::data::Record;
use std::ops::RangeInclusive;

pub const REGION_COL: &str = "region";
pub const DECADE_COL: &str = "decade";
pub const FEMALE_SECONDARY_COL: &str = "average_value_School enrollment, secondary, female (% net)";
pub const MALE_SECONDARY_COL: &str = "average_value_School enrollment, secondary, male (% net)";

/// Regions shown in the bar chart.
pub const FOCUS_REGIONS: [&str; 7] = [
    "Latin America & Caribbean",
    "Europe & Central Asia",
    "Sub-Saharan Africa",
    "East Asia & Pacific",
    "South Asia",
    "Middle East & North Africa",
    "North America",
];

/// Label for a decade bucket, e.g. `1990-1999`.
pub fn decade_label(decade: i64) -> String {
    format!("{}-{}", decade, decade + 9)
}

/// Which side of the comparison a gap lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Favors {
    Girls,
    Boys,
    Neither,
}

impl Favors {
    pub fn of(gap: f64) -> Self {
        if gap > 0.0 {
            Favors::Girls
        } else if gap < 0.0 {
            Favors::Boys
        } else {
            Favors::Neither
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Favors::Girls => "Gap favors girls",
            Favors::Boys => "Gap favors boys",
            Favors::Neither => "No gender gap",
        }
    }
}

/// One bar: mean female/male secondary enrollment for a (decade, region).
#[derive(Debug, Clone, PartialEq)]
pub struct GapRow {
    pub decade: i64,
    pub region: String,
    pub female: f64,
    pub male: f64,
    /// `female - male`, in percentage points.
    pub gap: f64,
}

impl GapRow {
    pub fn decade_label(&self) -> String {
        decade_label(self.decade)
    }

    pub fn favors(&self) -> Favors {
        Favors::of(self.gap)
    }
}

/// All gap rows across decades; recomputed whole whenever the records change.
#[derive(Debug, Clone, Default)]
pub struct GapDataset {
    rows: Vec<GapRow>,
}

impl GapDataset {
    pub fn from_records(records: &[Record]) -> Self {
        let focus: Vec<Record> = records
            .iter()
            .filter(|r| r.text(REGION_COL).is_some_and(|region| FOCUS_REGIONS.contains(&region)))
            .filter(|r| r.number(DECADE_COL).is_some())
            .cloned()
            .collect();

        let spec = AggregateSpec::new(
            &[DECADE_COL, REGION_COL],
            &[FEMALE_SECONDARY_COL, MALE_SECONDARY_COL],
        )
        .with_difference(FEMALE_SECONDARY_COL, MALE_SECONDARY_COL);

        let rows: Vec<GapRow> = Aggregator::aggregate(&focus, &spec)
            .into_iter()
            .filter_map(|row| {
                Some(GapRow {
                    decade: row.key.int(0)?,
                    region: row.key.text(1)?.to_string(),
                    female: row.mean(FEMALE_SECONDARY_COL)?,
                    male: row.mean(MALE_SECONDARY_COL)?,
                    gap: row.difference?,
                })
            })
            .collect();

        tracing::info!("Gender gap: {} decade/region rows", rows.len());
        Self { rows }
    }

    pub fn from_rows(rows: Vec<GapRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[GapRow] {
        &self.rows
    }

    /// Distinct decades inside `range`, ascending.
    pub fn decades(&self, range: &RangeInclusive<i64>) -> Vec<i64> {
        let mut decades: Vec<i64> = self
            .rows
            .iter()
            .map(|r| r.decade)
            .filter(|d| range.contains(d))
            .collect();
        decades.sort_unstable();
        decades.dedup();
        decades
    }

    /// Rows of one decade, largest gap first. Ties keep encounter order.
    pub fn rows_for_decade(&self, decade: i64) -> Vec<GapRow> {
        let mut rows: Vec<GapRow> = self
            .rows
            .iter()
            .filter(|r| r.decade == decade)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.gap.partial_cmp(&a.gap).unwrap_or(std::cmp::Ordering::Equal));
        rows
    }

    /// Largest |gap| over every row, used before any decade is selected.
    pub fn global_extent(&self) -> Option<f64> {
        max_abs_gap(&self.rows)
    }
}

/// Preferred decade when present, otherwise the latest.
pub fn default_decade(decades: &[i64], preferred: i64) -> Option<i64> {
    if decades.contains(&preferred) {
        Some(preferred)
    } else {
        decades.last().copied()
    }
}

pub fn max_abs_gap(rows: &[GapRow]) -> Option<f64> {
    rows.iter().map(|r| r.gap.abs()).reduce(f64::max)
}

/// Extent for a single-decade view; falls back to 1 when empty or all zero.
pub fn local_extent(rows: &[GapRow]) -> f64 {
    max_abs_gap(rows)
        .filter(|v| *v != 0.0 && v.is_finite())
        .unwrap_or(1.0)
}
