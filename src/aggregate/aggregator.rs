//! Aggregator Module
//! Groups records by one or two keys and reduces each group to means.

use crate::data::{GroupKey, KeyPart, Record};
use rayon::prelude::*;
use statrs::statistics::Statistics;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// What to group by, which fields to average, and which of them must be present.
#[derive(Debug, Clone)]
pub struct AggregateSpec {
    pub group_by: Vec<String>,
    pub values: Vec<String>,
    pub required: Vec<String>,
    pub difference: Option<(String, String)>,
}

impl AggregateSpec {
    /// All value fields are required by default.
    pub fn new(group_by: &[&str], values: &[&str]) -> Self {
        let values: Vec<String> = values.iter().map(|s| s.to_string()).collect();
        Self {
            group_by: group_by.iter().map(|s| s.to_string()).collect(),
            required: values.clone(),
            values,
            difference: None,
        }
    }

    /// Replace the set of required fields.
    pub fn require(mut self, fields: &[&str]) -> Self {
        self.required = fields.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Derive `mean(a) - mean(b)` on every row.
    pub fn with_difference(mut self, a: &str, b: &str) -> Self {
        self.difference = Some((a.to_string(), b.to_string()));
        self
    }

    fn key_for(&self, record: &Record) -> Option<GroupKey> {
        self.group_by
            .iter()
            .map(|field| KeyPart::from_field(record, field))
            .collect::<Option<Vec<_>>>()
            .map(GroupKey)
    }
}

/// One summarized group.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub key: GroupKey,
    /// Finite means only; a field with no finite values is absent.
    pub means: HashMap<String, f64>,
    pub difference: Option<f64>,
}

impl AggregateRow {
    pub fn mean(&self, field: &str) -> Option<f64> {
        self.means.get(field).copied()
    }
}

/// Stateless grouping/averaging operations.
pub struct Aggregator;

impl Aggregator {
    /// Group and reduce records.
    ///
    /// Records without any finite value field, or with an incomplete key, are
    /// skipped. Groups whose required means are not finite are dropped. Output
    /// follows encounter order, nested by the first key.
    pub fn aggregate(records: &[Record], spec: &AggregateSpec) -> Vec<AggregateRow> {
        let mut order: Vec<GroupKey> = Vec::new();
        let mut members: HashMap<GroupKey, Vec<&Record>> = HashMap::new();

        for record in records {
            if !spec.values.iter().any(|f| record.number(f).is_some()) {
                continue;
            }
            let Some(key) = spec.key_for(record) else {
                continue;
            };
            match members.entry(key) {
                Entry::Occupied(mut entry) => entry.get_mut().push(record),
                Entry::Vacant(entry) => {
                    order.push(entry.key().clone());
                    entry.insert(vec![record]);
                }
            }
        }

        if spec.group_by.len() > 1 {
            let mut first_rank: HashMap<&KeyPart, usize> = HashMap::new();
            for key in &order {
                if let Some(first) = key.part(0) {
                    let next = first_rank.len();
                    first_rank.entry(first).or_insert(next);
                }
            }
            let ranks: Vec<usize> = order
                .iter()
                .map(|key| {
                    key.part(0)
                        .and_then(|first| first_rank.get(first).copied())
                        .unwrap_or(usize::MAX)
                })
                .collect();
            let mut ranked: Vec<(usize, GroupKey)> = ranks.into_iter().zip(order).collect();
            // Stable: groups sharing a first key keep encounter order.
            ranked.sort_by_key(|(rank, _)| *rank);
            order = ranked.into_iter().map(|(_, key)| key).collect();
        }

        order
            .par_iter()
            .filter_map(|key| {
                let group = members.get(key)?;
                Self::reduce_group(key, group, spec)
            })
            .collect()
    }

    fn reduce_group(key: &GroupKey, group: &[&Record], spec: &AggregateSpec) -> Option<AggregateRow> {
        let mut means = HashMap::new();
        for field in &spec.values {
            let finite: Vec<f64> = group.iter().filter_map(|r| r.number(field)).collect();
            if finite.is_empty() {
                continue;
            }
            let mean = Statistics::mean(finite.iter());
            if mean.is_finite() {
                means.insert(field.clone(), mean);
            }
        }

        if !spec.required.iter().all(|f| means.contains_key(f)) {
            return None;
        }

        let difference = spec.difference.as_ref().and_then(|(a, b)| {
            let a = means.get(a)?;
            let b = means.get(b)?;
            Some(a - b)
        });

        Some(AggregateRow {
            key: key.clone(),
            means,
            difference,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(decade: f64, region: &str, f: Option<f64>, m: Option<f64>) -> Record {
        let mut record = Record::new()
            .with_number("decade", decade)
            .with_text("region", region);
        if let Some(f) = f {
            record = record.with_number("f", f);
        }
        if let Some(m) = m {
            record = record.with_number("m", m);
        }
        record
    }

    fn spec() -> AggregateSpec {
        AggregateSpec::new(&["decade", "region"], &["f", "m"]).with_difference("f", "m")
    }

    #[test]
    fn test_means_ignore_missing_values() {
        let records = vec![
            row(2000.0, "A", Some(40.0), Some(60.0)),
            row(2000.0, "A", Some(50.0), None),
            row(2000.0, "A", None, Some(f64::NAN)),
        ];
        let rows = Aggregator::aggregate(&records, &spec());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mean("f"), Some(45.0));
        assert_eq!(rows[0].mean("m"), Some(60.0));
        assert_eq!(rows[0].difference, Some(-15.0));
    }

    #[rstest]
    #[case(Some(1.0), Some(2.0), true)]
    #[case(Some(1.0), None, false)]
    #[case(None, Some(2.0), false)]
    #[case(None, None, false)]
    fn test_group_present_iff_every_required_field_has_a_value(
        #[case] f: Option<f64>,
        #[case] m: Option<f64>,
        #[case] present: bool,
    ) {
        let records = vec![row(1990.0, "A", f, m)];
        let rows = Aggregator::aggregate(&records, &spec());
        assert_eq!(!rows.is_empty(), present);
    }

    #[test]
    fn test_values_spread_across_members_still_count() {
        let records = vec![
            row(1990.0, "A", Some(10.0), None),
            row(1990.0, "A", None, Some(20.0)),
        ];
        let rows = Aggregator::aggregate(&records, &spec());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].difference, Some(-10.0));
    }

    #[test]
    fn test_optional_fields_keep_group() {
        let records = vec![row(1990.0, "A", Some(10.0), None)];
        let rows = Aggregator::aggregate(&records, &spec().require(&[]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mean("m"), None);
        assert_eq!(rows[0].difference, None);
    }

    #[test]
    fn test_incomplete_keys_are_skipped() {
        let records = vec![
            row(f64::NAN, "A", Some(1.0), Some(1.0)),
            row(2000.0, "", Some(1.0), Some(1.0)),
            Record::new().with_number("f", 1.0).with_number("m", 1.0),
        ];
        assert!(Aggregator::aggregate(&records, &spec()).is_empty());
    }

    #[test]
    fn test_order_is_nested_by_first_key() {
        let records = vec![
            row(2000.0, "A", Some(1.0), Some(1.0)),
            row(2010.0, "B", Some(1.0), Some(1.0)),
            row(2000.0, "C", Some(1.0), Some(1.0)),
            row(1990.0, "A", Some(1.0), Some(1.0)),
        ];
        let keys: Vec<(i64, String)> = Aggregator::aggregate(&records, &spec())
            .iter()
            .map(|r| (r.key.int(0).unwrap(), r.key.text(1).unwrap().to_string()))
            .collect();

        assert_eq!(
            keys,
            vec![
                (2000, "A".to_string()),
                (2000, "C".to_string()),
                (2010, "B".to_string()),
                (1990, "A".to_string()),
            ]
        );
    }

    #[test]
    fn test_recomputation_is_identical() {
        let records: Vec<Record> = (0..40)
            .map(|i| {
                row(
                    1970.0 + 10.0 * (i % 5) as f64,
                    ["A", "B", "C"][i % 3],
                    Some(i as f64),
                    if i % 4 == 0 { None } else { Some(2.0 * i as f64) },
                )
            })
            .collect();

        let first = Aggregator::aggregate(&records, &spec());
        let second = Aggregator::aggregate(&records, &spec());
        assert_eq!(first, second);
    }
}
