use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

use recordforge_generate::Factory;
use recordforge_generate::generators::DatetimeField;

const DRAWS: usize = 56;

fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid date")
}

fn week(sign: i64) -> Duration {
    Duration::try_weeks(sign).expect("valid step")
}

fn draw(field: DatetimeField, count: usize) -> Vec<NaiveDateTime> {
    let mut factory = Factory::builder()
        .seed(1976)
        .field("when", field)
        .build()
        .expect("valid factory");
    factory
        .make_some(count)
        .map(|record| {
            let record = record.expect("record");
            record
                .field("when")
                .expect("when")
                .as_datetime()
                .expect("datetime value")
        })
        .collect()
}

fn expected_walk(start: NaiveDateTime, end: NaiveDateTime, step: Duration) -> Vec<NaiveDateTime> {
    let mut values = Vec::with_capacity(DRAWS);
    let mut cursor: Option<NaiveDateTime> = None;
    for _ in 0..DRAWS {
        let next = match cursor {
            None if step > Duration::zero() => start,
            None => end,
            Some(previous) => {
                let candidate = previous + step;
                if candidate > end {
                    start
                } else if candidate < start {
                    end
                } else {
                    candidate
                }
            }
        };
        values.push(next);
        cursor = Some(next);
    }
    values
}

#[test]
fn weekly_walk_forward_wraps_to_start() {
    let start = date(1976, 7, 15);
    let end = date(1977, 7, 15);
    let field = DatetimeField::stepping(start, end, week(1)).expect("valid field");

    let values = draw(field, DRAWS);
    assert_eq!(values, expected_walk(start, end, week(1)));
    assert_eq!(values[0], start);
    assert_eq!(values[1], date(1976, 7, 22));
    assert_eq!(values[52], date(1977, 7, 14));
    assert_eq!(values[53], start);
    assert_eq!(values[55], date(1976, 7, 29));
}

#[test]
fn weekly_walk_backward_wraps_to_end() {
    let start = date(1976, 7, 15);
    let end = date(1977, 7, 15);
    let field = DatetimeField::stepping(start, end, week(-1)).expect("valid field");

    let values = draw(field, DRAWS);
    assert_eq!(values, expected_walk(start, end, week(-1)));
    assert_eq!(values[0], end);
    assert_eq!(values[1], date(1977, 7, 8));
    assert_eq!(values[52], date(1976, 7, 16));
    assert_eq!(values[53], end);
}

#[test]
fn random_dates_fall_inside_the_range() {
    let start = date(1976, 7, 15);
    let end = date(1977, 7, 15);
    let field = DatetimeField::random(start, end).expect("valid field");

    for value in draw(field, 200) {
        assert!(start <= value && value <= end, "{value} outside range");
    }
}

#[test]
fn date_only_values_are_midnight() {
    let start = date(2024, 1, 1);
    let end = date(2024, 3, 1);
    let field = DatetimeField::random(start, end)
        .expect("valid field")
        .date_only();

    for value in draw(field, 200) {
        assert_eq!((value.hour(), value.minute(), value.second()), (0, 0, 0));
        assert!(start <= value && value <= end);
    }
}

#[test]
fn cursor_persists_across_records_of_one_factory() {
    let start = date(2024, 1, 1);
    let end = date(2024, 1, 31);
    let field = DatetimeField::stepping(start, end, Duration::try_days(1).expect("valid step"))
        .expect("valid field");
    let mut factory = Factory::builder()
        .field("when", field)
        .build()
        .expect("valid factory");

    let first = factory.make_one().expect("first");
    let second = factory.make_one().expect("second");
    assert_eq!(
        first.field("when").expect("when").as_datetime(),
        Some(start)
    );
    assert_eq!(
        second.field("when").expect("when").as_datetime(),
        Some(date(2024, 1, 2))
    );
}
