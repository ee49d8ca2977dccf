//! Stage Module
//! The fixed, ordered stages of the life-path narrative and the metric columns they read.

use crate::aggregate::AggregateRow;

/// Gender category selected by the two-way toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    #[default]
    Female,
    Male,
}

impl Gender {
    pub fn other(self) -> Self {
        match self {
            Gender::Female => Gender::Male,
            Gender::Male => Gender::Female,
        }
    }

    /// Singular noun used in narratives.
    pub fn noun(self) -> &'static str {
        match self {
            Gender::Female => "girl",
            Gender::Male => "boy",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            Gender::Female => "girls",
            Gender::Male => "boys",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Female => "Girl",
            Gender::Male => "Boy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    Primary,
    Secondary,
    Tertiary,
    Family,
    Longevity,
}

impl StageId {
    pub fn as_str(self) -> &'static str {
        match self {
            StageId::Primary => "primary",
            StageId::Secondary => "secondary",
            StageId::Tertiary => "tertiary",
            StageId::Family => "family",
            StageId::Longevity => "longevity",
        }
    }

    /// Position in [`STAGES`].
    pub fn index(self) -> usize {
        match self {
            StageId::Primary => 0,
            StageId::Secondary => 1,
            StageId::Tertiary => 2,
            StageId::Family => 3,
            StageId::Longevity => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub id: StageId,
    pub label: &'static str,
}

pub const STAGES: [Stage; 5] = [
    Stage { id: StageId::Primary, label: "Primary School" },
    Stage { id: StageId::Secondary, label: "Secondary School" },
    Stage { id: StageId::Tertiary, label: "Higher Education" },
    Stage { id: StageId::Family, label: "Family & Fertility" },
    Stage { id: StageId::Longevity, label: "Long-term Health" },
];

pub const REGION_COL: &str = "region";
pub const YEAR_COL: &str = "Year";

/// Indicators read by the stages. Fertility has a single, gender-neutral column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    PrimaryEnrollment,
    SecondaryEnrollment,
    TertiaryEnrollment,
    Fertility,
    LifeExpectancy,
    Survival65,
}

pub const METRICS: [Metric; 6] = [
    Metric::PrimaryEnrollment,
    Metric::SecondaryEnrollment,
    Metric::TertiaryEnrollment,
    Metric::Fertility,
    Metric::LifeExpectancy,
    Metric::Survival65,
];

impl Metric {
    pub fn column(self, gender: Gender) -> &'static str {
        match (self, gender) {
            (Metric::PrimaryEnrollment, Gender::Female) => "average_value_Adjusted net enrollment rate, primary, female (% of primary school age children)",
            (Metric::PrimaryEnrollment, Gender::Male) => "average_value_Adjusted net enrollment rate, primary, male (% of primary school age children)",
            (Metric::SecondaryEnrollment, Gender::Female) => "average_value_School enrollment, secondary, female (% gross)",
            (Metric::SecondaryEnrollment, Gender::Male) => "average_value_School enrollment, secondary, male (% gross)",
            (Metric::TertiaryEnrollment, Gender::Female) => "average_value_School enrollment, tertiary, female (% gross)",
            (Metric::TertiaryEnrollment, Gender::Male) => "average_value_School enrollment, tertiary, male (% gross)",
            (Metric::Fertility, _) => "average_value_Fertility rate, total (births per woman)",
            (Metric::LifeExpectancy, Gender::Female) => "average_value_Life expectancy at birth, female (years)",
            (Metric::LifeExpectancy, Gender::Male) => "average_value_Life expectancy at birth, male (years)",
            (Metric::Survival65, Gender::Female) => "average_value_Survival to age 65, female (% of cohort)",
            (Metric::Survival65, Gender::Male) => "average_value_Survival to age 65, male (% of cohort)",
        }
    }

    /// Finite value of this metric for a gender, if the row has one.
    pub fn value(self, row: &AggregateRow, gender: Gender) -> Option<f64> {
        row.mean(self.column(gender))
    }
}

/// Every distinct metric column, in a fixed order.
pub fn metric_columns() -> Vec<&'static str> {
    let mut columns: Vec<&'static str> = Vec::new();
    for metric in METRICS {
        for gender in [Gender::Female, Gender::Male] {
            let column = metric.column(gender);
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_index_matches_track_order() {
        for (i, stage) in STAGES.iter().enumerate() {
            assert_eq!(stage.id.index(), i);
        }
    }

    #[test]
    fn test_metric_columns_are_distinct() {
        let columns = metric_columns();
        assert_eq!(columns.len(), 11);
        assert!(columns.contains(&"average_value_Fertility rate, total (births per woman)"));
    }

    #[test]
    fn test_gender_other() {
        assert_eq!(Gender::Female.other(), Gender::Male);
        assert_eq!(Gender::Male.other().plural(), "girls");
    }
}
