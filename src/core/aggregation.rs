use chrono::{Datelike, Days, NaiveDate};
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::dataset::RawRecord;
use crate::core::types::{AggregationMode, Point};

/// Counts of one variation on one day, borrowed from its raw record.
#[derive(Debug, Clone, Copy)]
struct DailyCounts<'a> {
    date: NaiveDate,
    date_iso: &'a str,
    variation: &'a str,
    visits: u64,
    conversions: u64,
}

#[derive(Debug)]
struct PeriodTotals {
    period_date_iso: String,
    visits: u64,
    conversions: u64,
}

/// Aggregates raw records into one point per (period, variation).
#[must_use]
pub fn aggregate(records: &[RawRecord], mode: AggregationMode) -> Vec<Point> {
    let points = match mode {
        AggregationMode::Day => aggregate_daily(records),
        AggregationMode::Week => aggregate_weekly(records),
    };
    debug!(
        %mode,
        records = records.len(),
        points = points.len(),
        "aggregated raw records"
    );
    points
}

/// Daily passthrough: one point per (date, variation), ordered by the input
/// date string. Duplicate days for the same variation are summed.
#[must_use]
pub fn aggregate_daily(records: &[RawRecord]) -> Vec<Point> {
    group_by_period(records, |counts| {
        (format_period(counts.date), counts.date_iso.to_owned())
    })
}

/// Weekly roll-up keyed by the Monday starting each week.
///
/// Visits and conversions are summed before the rate is derived, so busy
/// days weigh more than quiet ones.
#[must_use]
pub fn aggregate_weekly(records: &[RawRecord]) -> Vec<Point> {
    group_by_period(records, |counts| {
        let week_key = format_period(week_start(counts.date));
        (week_key.clone(), week_key)
    })
}

/// Monday of the week containing `date`.
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

#[must_use]
pub fn format_period(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn group_by_period<F>(records: &[RawRecord], period_of: F) -> Vec<Point>
where
    F: Fn(&DailyCounts<'_>) -> (String, String),
{
    let mut groups: IndexMap<(String, String), PeriodTotals> = IndexMap::new();
    for counts in expand_records(records) {
        let (label, period_date_iso) = period_of(&counts);
        let totals = groups
            .entry((label, counts.variation.to_owned()))
            .or_insert_with(|| PeriodTotals {
                period_date_iso,
                visits: 0,
                conversions: 0,
            });
        totals.visits = totals.visits.saturating_add(counts.visits);
        totals.conversions = totals.conversions.saturating_add(counts.conversions);
    }

    let mut points: Vec<Point> = groups
        .into_iter()
        .map(|((label, variation), totals)| {
            Point::new(
                label,
                totals.period_date_iso,
                variation,
                totals.visits,
                totals.conversions,
            )
        })
        .collect();
    // `sort_by` is stable: equal periods keep first-seen order.
    points.sort_by(|a, b| a.period_date_iso().cmp(b.period_date_iso()));
    points
}

#[cfg(not(feature = "parallel-aggregation"))]
fn expand_records(records: &[RawRecord]) -> Vec<DailyCounts<'_>> {
    records.iter().flat_map(|record| expand_record(record)).collect()
}

#[cfg(feature = "parallel-aggregation")]
fn expand_records(records: &[RawRecord]) -> Vec<DailyCounts<'_>> {
    use rayon::prelude::*;

    records
        .par_iter()
        .flat_map_iter(|record| expand_record(record))
        .collect()
}

/// Flattens one record into per-variation counts.
///
/// Only variations present in `visits` produce counts; a missing conversion
/// entry counts as zero. Records with unparseable dates are skipped.
fn expand_record(record: &RawRecord) -> Vec<DailyCounts<'_>> {
    let date = match record.calendar_date() {
        Ok(date) => date,
        Err(err) => {
            warn!(error = %err, "skipping raw record");
            return Vec::new();
        }
    };

    record
        .visits
        .iter()
        .map(|(variation, &visits)| DailyCounts {
            date,
            date_iso: record.date.as_str(),
            variation: variation.as_str(),
            visits,
            conversions: record.conversions.get(variation).copied().unwrap_or(0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn week_start_is_monday() {
        // 2024-01-01 is a Monday.
        assert_eq!(week_start(ymd(2024, 1, 1)), ymd(2024, 1, 1));
        assert_eq!(week_start(ymd(2024, 1, 7)), ymd(2024, 1, 1));
        assert_eq!(week_start(ymd(2024, 1, 8)), ymd(2024, 1, 8));
        assert_eq!(week_start(ymd(2023, 1, 1)), ymd(2022, 12, 26));
    }

    #[test]
    fn record_without_conversion_entry_counts_zero() {
        let mut record = RawRecord::new("2024-01-02");
        record.visits.insert("b".to_owned(), 40);

        let points = aggregate_daily(&[record]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].conversions(), 0);
        assert_eq!(points[0].conversion_rate(), 0.0);
    }

    /// Dates visited in a scrambled order, each record listing its
    /// variations in a rotated order.
    fn shuffled_records(days: u64) -> Vec<RawRecord> {
        let variations = ["a", "b", "c"];
        (0..days)
            .map(|i| {
                let day = (i * 73) % days;
                let date = ymd(2024, 1, 1) + Days::new(day);
                (0..variations.len()).fold(RawRecord::new(format_period(date)), |record, k| {
                    let variation = variations[(k + i as usize) % variations.len()];
                    record.with_counts(variation, 100 + day, day % 7)
                })
            })
            .collect()
    }

    #[cfg(feature = "parallel-aggregation")]
    #[test]
    fn parallel_expansion_keeps_serial_order() {
        fn key(counts: DailyCounts<'_>) -> (&str, &str, u64) {
            (counts.date_iso, counts.variation, counts.visits)
        }

        let records = shuffled_records(200);

        let serial: Vec<_> = records.iter().flat_map(expand_record).map(key).collect();
        let parallel: Vec<_> = expand_records(&records).into_iter().map(key).collect();
        assert_eq!(parallel, serial);
    }

    #[test]
    fn shuffled_input_sorts_by_period_and_keeps_first_seen_variation_order() {
        let records = shuffled_records(200);
        let points = aggregate_daily(&records);
        assert_eq!(points.len(), 600);

        for pair in points.windows(2) {
            assert!(pair[0].period_date_iso() <= pair[1].period_date_iso());
        }
        for record in &records {
            let order: Vec<&str> = points
                .iter()
                .filter(|point| point.period_date_iso() == record.date)
                .map(Point::variation)
                .collect();
            let expected: Vec<&str> = record.visits.keys().map(String::as_str).collect();
            assert_eq!(order, expected);
        }
    }

    #[test]
    fn unparseable_dates_are_skipped() {
        let records = vec![
            RawRecord::new("not-a-date").with_counts("a", 10, 1),
            RawRecord::new("2024-01-02").with_counts("a", 20, 2),
        ];

        let points = aggregate_daily(&records);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].period_label(), "2024-01-02");
    }
}
