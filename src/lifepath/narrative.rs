//! Narrative Module
//! Turns the current selection and stage into title, story text and mini chart data.

use crate::aggregate::AggregateRow;
use crate::lifepath::stage::{Gender, Metric, StageId};
use crate::lifepath::state::{LifePathData, LifePathState};

/// Which flavor of narrative is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// The stage has the data it needs.
    Story,
    /// A row exists but the stage's fields are missing.
    InsufficientData,
    /// No row for the selected region and year.
    NoData,
}

/// Data behind the small chart next to the narrative.
#[derive(Debug, Clone, PartialEq)]
pub enum MiniChart {
    Enrollment {
        title: &'static str,
        female: f64,
        male: f64,
    },
    Fertility {
        value: f64,
    },
    Longevity {
        life_self: f64,
        life_other: Option<f64>,
        survival_self: Option<f64>,
        survival_other: Option<f64>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct StageView {
    pub stage: StageId,
    pub kind: ViewKind,
    pub title: String,
    pub text: String,
    pub chart: Option<MiniChart>,
}

impl StageView {
    fn insufficient(stage: StageId, title: &str, text: String) -> Self {
        Self {
            stage,
            kind: ViewKind::InsufficientData,
            title: title.to_string(),
            text,
            chart: None,
        }
    }
}

/// Wording for a difference between the selected gender and the other one.
fn comparison_word(
    diff: f64,
    threshold: f64,
    same: &'static str,
    higher: &'static str,
    lower: &'static str,
) -> &'static str {
    if diff.abs() < threshold {
        same
    } else if diff > 0.0 {
        higher
    } else {
        lower
    }
}

/// Build the view for the current stage. Never fails: missing data yields a
/// placeholder narrative.
pub fn narrate(state: &LifePathState, data: &LifePathData) -> StageView {
    let stage = state.stage().id;
    let region = state.region.as_deref().unwrap_or("this region");
    let year_text = state
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "this period".to_string());

    let row = match (state.region.as_deref(), state.year) {
        (Some(region), Some(year)) => data.find(region, year),
        _ => None,
    };

    let Some(row) = row else {
        tracing::debug!("No life-path row for {} in {}", region, year_text);
        return StageView {
            stage,
            kind: ViewKind::NoData,
            title: "No data for this path (yet)".to_string(),
            text: format!(
                "We don't have enough data for {} in {}. Try a different year or region.",
                region, year_text
            ),
            chart: None,
        };
    };

    let ctx = StoryContext {
        row,
        gender: state.gender,
        region,
        year: &year_text,
    };

    match stage {
        StageId::Primary => ctx.primary(),
        StageId::Secondary => ctx.secondary(),
        StageId::Tertiary => ctx.tertiary(),
        StageId::Family => ctx.family(),
        StageId::Longevity => ctx.longevity(),
    }
}

struct StoryContext<'a> {
    row: &'a AggregateRow,
    gender: Gender,
    region: &'a str,
    year: &'a str,
}

impl StoryContext<'_> {
    fn pair(&self, metric: Metric) -> Option<(f64, f64)> {
        let own = metric.value(self.row, self.gender)?;
        let other = metric.value(self.row, self.gender.other())?;
        Some((own, other))
    }

    fn enrollment_chart(&self, metric: Metric, title: &'static str) -> Option<MiniChart> {
        Some(MiniChart::Enrollment {
            title,
            female: metric.value(self.row, Gender::Female)?,
            male: metric.value(self.row, Gender::Male)?,
        })
    }

    fn story(&self, stage: StageId, title: &str, text: String, chart: Option<MiniChart>) -> StageView {
        StageView {
            stage,
            kind: ViewKind::Story,
            title: title.to_string(),
            text,
            chart,
        }
    }

    fn primary(&self) -> StageView {
        let title = "Stage 1 · Primary School";
        let Some((own, other)) = self.pair(Metric::PrimaryEnrollment) else {
            return StageView::insufficient(
                StageId::Primary,
                title,
                format!(
                    "We don't have enough data about primary school enrollment in {} in {}. Try a different year or region.",
                    self.region, self.year
                ),
            );
        };
        let word = comparison_word(
            own - other,
            1.0,
            "about the same chance",
            "a higher chance",
            "a lower chance",
        );
        let text = format!(
            "As a {} in {} in {}, you have about {:.1}% chance of being enrolled in primary school. \
             That's {} than {}, who are at {:.1}%.",
            self.gender.noun(),
            self.region,
            self.year,
            own,
            word,
            self.gender.other().plural(),
            other
        );
        let chart = self.enrollment_chart(Metric::PrimaryEnrollment, "Primary school enrollment");
        self.story(StageId::Primary, title, text, chart)
    }

    fn secondary(&self) -> StageView {
        let title = "Stage 2 · Secondary School";
        let Some((own, other)) = self.pair(Metric::SecondaryEnrollment) else {
            return StageView::insufficient(
                StageId::Secondary,
                title,
                "Secondary school data is patchy for this path, so we can't say much about the gap here."
                    .to_string(),
            );
        };
        let word = comparison_word(
            own - other,
            1.0,
            "about the same chance",
            "a better chance",
            "a worse chance",
        );
        let text = format!(
            "Moving into secondary school, {}s in {} in {} are enrolled at about {:.1}%. \
             That gives you {} of staying in school compared to {} ({:.1}%).",
            self.gender.noun(),
            self.region,
            self.year,
            own,
            word,
            self.gender.other().plural(),
            other
        );
        let chart = self.enrollment_chart(Metric::SecondaryEnrollment, "Secondary school enrollment");
        self.story(StageId::Secondary, title, text, chart)
    }

    fn tertiary(&self) -> StageView {
        let title = "Stage 3 · Higher Education";
        let Some((own, other)) = self.pair(Metric::TertiaryEnrollment) else {
            return StageView::insufficient(
                StageId::Tertiary,
                title,
                "We're missing tertiary enrollment data for this path, which already tells a story: \
                 many regions still don't track (or provide) detailed higher-education data by gender."
                    .to_string(),
            );
        };
        let word = comparison_word(
            own - other,
            1.0,
            "about equally",
            "slightly more likely",
            "less likely",
        );
        let text = format!(
            "Only a smaller group reaches college or university. In {} in {}, around {:.1}% of {}s are \
             enrolled in tertiary education, while {} are at {:.1}%. You're {} to continue studying \
             beyond secondary school.",
            self.region,
            self.year,
            own,
            self.gender.noun(),
            self.gender.other().plural(),
            other,
            word
        );
        let chart = self.enrollment_chart(Metric::TertiaryEnrollment, "Tertiary enrollment");
        self.story(StageId::Tertiary, title, text, chart)
    }

    fn family(&self) -> StageView {
        let title = "Stage 4 · Family & Fertility";
        let Some(fertility) = Metric::Fertility.value(self.row, self.gender) else {
            return StageView::insufficient(
                StageId::Family,
                title,
                "We don't have solid fertility data for this path, so we skip this part of the story."
                    .to_string(),
            );
        };
        let text = format!(
            "In {} in {}, families have about {:.1} children on average. This statistic is measured \
             per woman, but it shapes daily life for everyone: how many siblings you might have, how \
             soon people start families, and how easy it is to stay in school or work.",
            self.region, self.year, fertility
        );
        self.story(
            StageId::Family,
            title,
            text,
            Some(MiniChart::Fertility { value: fertility }),
        )
    }

    fn longevity(&self) -> StageView {
        let title = "Stage 5 · Long-term Health";
        let life_self = Metric::LifeExpectancy.value(self.row, self.gender);
        let survival_self = Metric::Survival65.value(self.row, self.gender);
        let (Some(life_self), Some(survival_self)) = (life_self, survival_self) else {
            return StageView::insufficient(
                StageId::Longevity,
                title,
                "Health and survival data aren't available here, so we can't close the story with \
                 life expectancy for this path."
                    .to_string(),
            );
        };
        let life_other = Metric::LifeExpectancy.value(self.row, self.gender.other());
        let survival_other = Metric::Survival65.value(self.row, self.gender.other());

        let mut text = format!(
            "By the end of the path, a typical {} in {} in {} can expect to live to about {:.1} years old. \
             Around {:.1}% make it to age 65.",
            self.gender.noun(),
            self.region,
            self.year,
            life_self,
            survival_self
        );
        if let (Some(life_other), Some(survival_other)) = (life_other, survival_other) {
            let word = comparison_word(
                life_self - life_other,
                0.4,
                "about the same life expectancy",
                "a slightly longer life",
                "a slightly shorter life",
            );
            text.push_str(&format!(
                " Compared to {}, that means {} (they are at {:.1} years and {:.1}% reach 65).",
                self.gender.other().plural(),
                word,
                life_other,
                survival_other
            ));
        }

        self.story(
            StageId::Longevity,
            title,
            text,
            Some(MiniChart::Longevity {
                life_self,
                life_other,
                survival_self: Some(survival_self),
                survival_other,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;
    use crate::lifepath::stage::{REGION_COL, STAGES, YEAR_COL};
    use crate::lifepath::state::LifePathIntent;

    fn record(region: &str, year: f64, values: &[(Metric, Gender, f64)]) -> Record {
        let mut record = Record::new()
            .with_text(REGION_COL, region)
            .with_number(YEAR_COL, year);
        for (metric, gender, value) in values {
            record = record.with_number(metric.column(*gender), *value);
        }
        record
    }

    fn full_data() -> LifePathData {
        let records = vec![record(
            "South Asia",
            2000.0,
            &[
                (Metric::PrimaryEnrollment, Gender::Female, 88.0),
                (Metric::PrimaryEnrollment, Gender::Male, 92.5),
                (Metric::SecondaryEnrollment, Gender::Female, 50.0),
                (Metric::SecondaryEnrollment, Gender::Male, 49.5),
                (Metric::TertiaryEnrollment, Gender::Female, 12.0),
                (Metric::TertiaryEnrollment, Gender::Male, 10.0),
                (Metric::Fertility, Gender::Female, 3.1),
                (Metric::LifeExpectancy, Gender::Female, 66.0),
                (Metric::LifeExpectancy, Gender::Male, 64.0),
                (Metric::Survival65, Gender::Female, 70.0),
                (Metric::Survival65, Gender::Male, 63.0),
            ],
        )];
        LifePathData::from_records(&records, &(1970..=2010))
    }

    fn state_at(data: &LifePathData, stage: StageId) -> LifePathState {
        let mut state = LifePathState::new(data);
        state.apply(LifePathIntent::JumpToStage(stage));
        state
    }

    #[test]
    fn test_missing_selection_yields_no_data_for_every_stage() {
        let data = full_data();
        let mut state = LifePathState::new(&data);
        state.apply(LifePathIntent::SelectRegion("RegionX".into()));
        state.apply(LifePathIntent::SelectYear(1990));

        for stage in STAGES {
            state.apply(LifePathIntent::JumpToStage(stage.id));
            let view = narrate(&state, &data);
            assert_eq!(view.kind, ViewKind::NoData);
            assert_eq!(view.title, "No data for this path (yet)");
            assert!(view.text.contains("RegionX in 1990"));
            assert!(view.chart.is_none());
        }
    }

    #[test]
    fn test_empty_data_yields_no_data() {
        let data = LifePathData::default();
        let view = narrate(&LifePathState::new(&data), &data);
        assert_eq!(view.kind, ViewKind::NoData);
    }

    #[test]
    fn test_primary_story_compares_with_other_gender() {
        let data = full_data();
        let view = narrate(&state_at(&data, StageId::Primary), &data);
        assert_eq!(view.kind, ViewKind::Story);
        assert_eq!(view.title, "Stage 1 · Primary School");
        assert!(view.text.contains("As a girl in South Asia in 2000"));
        assert!(view.text.contains("88.0%"));
        assert!(view.text.contains("a lower chance than boys, who are at 92.5%"));
        assert_eq!(
            view.chart,
            Some(MiniChart::Enrollment {
                title: "Primary school enrollment",
                female: 88.0,
                male: 92.5,
            })
        );
    }

    #[test]
    fn test_toggling_gender_on_secondary_keeps_stage() {
        let data = full_data();
        let mut state = state_at(&data, StageId::Secondary);
        let before = narrate(&state, &data);
        assert!(before.text.contains("about the same chance"));

        state.apply(LifePathIntent::ToggleGender);
        let after = narrate(&state, &data);

        assert_eq!(state.stage_index(), StageId::Secondary.index());
        assert_eq!(after.stage, StageId::Secondary);
        assert!(after.text.contains("boys in South Asia"));
        assert!(after.text.contains("compared to girls (50.0%)"));
    }

    #[test]
    fn test_tertiary_wording() {
        let data = full_data();
        let mut state = state_at(&data, StageId::Tertiary);
        assert!(narrate(&state, &data).text.contains("slightly more likely"));
        state.apply(LifePathIntent::SelectGender(Gender::Male));
        assert!(narrate(&state, &data).text.contains("less likely"));
    }

    #[test]
    fn test_family_and_longevity_stories() {
        let data = full_data();
        let family = narrate(&state_at(&data, StageId::Family), &data);
        assert!(family.text.contains("about 3.1 children"));
        assert_eq!(family.chart, Some(MiniChart::Fertility { value: 3.1 }));

        let longevity = narrate(&state_at(&data, StageId::Longevity), &data);
        assert!(longevity.text.contains("about 66.0 years old"));
        assert!(longevity.text.contains("a slightly longer life"));
        assert!(longevity.text.contains("(they are at 64.0 years and 63.0% reach 65)"));
    }

    #[test]
    fn test_row_without_stage_fields_is_insufficient() {
        let records = vec![record(
            "South Asia",
            2000.0,
            &[
                (Metric::PrimaryEnrollment, Gender::Female, 88.0),
                (Metric::LifeExpectancy, Gender::Female, 66.0),
                (Metric::Survival65, Gender::Female, 70.0),
            ],
        )];
        let data = LifePathData::from_records(&records, &(1970..=2010));

        for id in [StageId::Primary, StageId::Secondary, StageId::Tertiary, StageId::Family] {
            let view = narrate(&state_at(&data, id), &data);
            assert_eq!(view.kind, ViewKind::InsufficientData, "stage {:?}", id);
            assert!(view.chart.is_none());
        }

        // Longevity only needs the selected gender; the comparison is skipped.
        let longevity = narrate(&state_at(&data, StageId::Longevity), &data);
        assert_eq!(longevity.kind, ViewKind::Story);
        assert!(!longevity.text.contains("Compared to"));
    }
}
