//! Life-Path State Module
//! Region/year lookup table and the stage stepper driven by intents.

use crate::aggregate::{AggregateRow, AggregateSpec, Aggregator};
use crate::data::Record;
use crate::lifepath::stage::{metric_columns, Gender, Stage, StageId, REGION_COL, STAGES, YEAR_COL};
use std::ops::RangeInclusive;

/// Aggregated (region, year) rows plus the values offered by the dropdowns.
#[derive(Debug, Clone, Default)]
pub struct LifePathData {
    rows: Vec<AggregateRow>,
    regions: Vec<String>,
    years: Vec<i64>,
}

impl LifePathData {
    pub fn from_records(records: &[Record], year_range: &RangeInclusive<i64>) -> Self {
        let usable: Vec<Record> = records
            .iter()
            .filter(|r| r.text(REGION_COL).is_some())
            .filter(|r| r.number(YEAR_COL).is_some_and(|y| y != 0.0))
            .cloned()
            .collect();

        let columns = metric_columns();
        let spec = AggregateSpec::new(&[REGION_COL, YEAR_COL], &columns).require(&[]);
        let rows = Aggregator::aggregate(&usable, &spec);

        let mut regions: Vec<String> = usable
            .iter()
            .filter_map(|r| r.text(REGION_COL))
            .map(str::to_string)
            .collect();
        regions.sort();
        regions.dedup();

        let mut years: Vec<i64> = usable
            .iter()
            .filter_map(|r| r.number(YEAR_COL))
            .filter(|y| y.fract() == 0.0)
            .map(|y| y as i64)
            .filter(|y| year_range.contains(y))
            .collect();
        years.sort_unstable();
        years.dedup();

        tracing::info!(
            "Life path: {} rows, {} regions, {} years",
            rows.len(),
            regions.len(),
            years.len()
        );

        Self { rows, regions, years }
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn years(&self) -> &[i64] {
        &self.years
    }

    /// The row for a region and year, if any record made it through aggregation.
    pub fn find(&self, region: &str, year: i64) -> Option<&AggregateRow> {
        self.rows
            .iter()
            .find(|row| row.key.text(0) == Some(region) && row.key.int(1) == Some(year))
    }
}

/// Typed messages emitted by the life-path controls.
#[derive(Debug, Clone, PartialEq)]
pub enum LifePathIntent {
    SelectRegion(String),
    SelectYear(i64),
    SelectGender(Gender),
    ToggleGender,
    NextStage,
    PrevStage,
    JumpToStage(StageId),
}

/// Display status of a node on the stage track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Completed,
    Active,
    Upcoming,
}

/// Current selection and position in the stage sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct LifePathState {
    pub region: Option<String>,
    pub year: Option<i64>,
    pub gender: Gender,
    stage_index: usize,
}

impl Default for LifePathState {
    fn default() -> Self {
        Self {
            region: None,
            year: None,
            gender: Gender::Female,
            stage_index: 0,
        }
    }
}

impl LifePathState {
    /// First region, latest year, first stage.
    pub fn new(data: &LifePathData) -> Self {
        Self {
            region: data.regions().first().cloned(),
            year: data.years().last().copied(),
            ..Self::default()
        }
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    pub fn stage(&self) -> &'static Stage {
        &STAGES[self.stage_index.min(STAGES.len() - 1)]
    }

    pub fn is_first(&self) -> bool {
        self.stage_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.stage_index == STAGES.len() - 1
    }

    /// Advance-button text; the last stage shows a completion label.
    pub fn next_label(&self) -> &'static str {
        if self.is_last() {
            "Finish ◀◀"
        } else {
            "Next stage ▶"
        }
    }

    pub fn stage_status(&self, index: usize) -> StageStatus {
        match index.cmp(&self.stage_index) {
            std::cmp::Ordering::Less => StageStatus::Completed,
            std::cmp::Ordering::Equal => StageStatus::Active,
            std::cmp::Ordering::Greater => StageStatus::Upcoming,
        }
    }

    /// Apply one intent. Returns whether the state changed.
    pub fn apply(&mut self, intent: LifePathIntent) -> bool {
        let before = self.clone();
        match intent {
            LifePathIntent::SelectRegion(region) => self.region = Some(region),
            LifePathIntent::SelectYear(year) => self.year = Some(year),
            LifePathIntent::SelectGender(gender) => self.gender = gender,
            LifePathIntent::ToggleGender => self.gender = self.gender.other(),
            LifePathIntent::NextStage => {
                if !self.is_last() {
                    self.stage_index += 1;
                }
            }
            LifePathIntent::PrevStage => {
                self.stage_index = self.stage_index.saturating_sub(1);
            }
            LifePathIntent::JumpToStage(id) => self.stage_index = id.index(),
        }
        *self != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifepath::stage::Metric;
    use rstest::rstest;

    fn data() -> LifePathData {
        let column = Metric::Fertility.column(Gender::Female);
        let records = vec![
            Record::new()
                .with_text(REGION_COL, "South Asia")
                .with_number(YEAR_COL, 1990.0)
                .with_number(column, 4.0),
            Record::new()
                .with_text(REGION_COL, "East Asia & Pacific")
                .with_number(YEAR_COL, 2010.0)
                .with_number(column, 1.8),
            Record::new()
                .with_text(REGION_COL, "East Asia & Pacific")
                .with_number(YEAR_COL, 1960.0)
                .with_number(column, 5.5),
            Record::new()
                .with_text(REGION_COL, "Nowhere")
                .with_number(YEAR_COL, 0.0)
                .with_number(column, 1.0),
        ];
        LifePathData::from_records(&records, &(1970..=2010))
    }

    #[test]
    fn test_dropdown_values_and_defaults() {
        let data = data();
        assert_eq!(data.regions(), &["East Asia & Pacific".to_string(), "South Asia".to_string()]);
        assert_eq!(data.years(), &[1990, 2010]);

        let state = LifePathState::new(&data);
        assert_eq!(state.region.as_deref(), Some("East Asia & Pacific"));
        assert_eq!(state.year, Some(2010));
        assert_eq!(state.gender, Gender::Female);
        assert_eq!(state.stage().id, StageId::Primary);
    }

    #[test]
    fn test_find_matches_region_and_year() {
        let data = data();
        assert!(data.find("South Asia", 1990).is_some());
        assert!(data.find("South Asia", 2010).is_none());
        assert!(data.find("RegionX", 1990).is_none());
    }

    #[test]
    fn test_prev_at_start_is_noop() {
        let mut state = LifePathState::default();
        assert!(!state.apply(LifePathIntent::PrevStage));
        assert_eq!(state.stage_index(), 0);
        assert!(state.is_first());
    }

    #[test]
    fn test_next_at_end_is_noop_with_finish_label() {
        let mut state = LifePathState::default();
        for _ in 0..10 {
            state.apply(LifePathIntent::NextStage);
        }
        assert_eq!(state.stage_index(), STAGES.len() - 1);
        assert_eq!(state.next_label(), "Finish ◀◀");
        assert!(!state.apply(LifePathIntent::NextStage));
        assert_eq!(state.stage_index(), STAGES.len() - 1);
    }

    #[rstest]
    #[case(StageId::Primary, 0)]
    #[case(StageId::Tertiary, 2)]
    #[case(StageId::Longevity, 4)]
    fn test_jump_to_stage(#[case] id: StageId, #[case] index: usize) {
        let mut state = LifePathState::default();
        state.apply(LifePathIntent::JumpToStage(id));
        assert_eq!(state.stage_index(), index);
        assert_eq!(state.stage().id, id);
    }

    #[test]
    fn test_selection_changes_keep_stage_index() {
        let mut state = LifePathState::default();
        state.apply(LifePathIntent::JumpToStage(StageId::Secondary));

        assert!(state.apply(LifePathIntent::SelectRegion("South Asia".into())));
        assert!(state.apply(LifePathIntent::SelectYear(1990)));
        assert!(state.apply(LifePathIntent::ToggleGender));
        assert_eq!(state.gender, Gender::Male);
        assert!(!state.apply(LifePathIntent::SelectGender(Gender::Male)));
        assert_eq!(state.stage_index(), StageId::Secondary.index());
    }

    #[test]
    fn test_stage_track_status() {
        let mut state = LifePathState::default();
        state.apply(LifePathIntent::JumpToStage(StageId::Tertiary));
        assert_eq!(state.stage_status(0), StageStatus::Completed);
        assert_eq!(state.stage_status(2), StageStatus::Active);
        assert_eq!(state.stage_status(4), StageStatus::Upcoming);
        assert_eq!(state.next_label(), "Next stage ▶");
    }
}
