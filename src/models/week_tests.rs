use super::week::{day_order_from, start_of_week, Weekday};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

#[test]
fn test_all_has_seven_days_monday_first() {
    assert_eq!(Weekday::ALL.len(), 7);
    assert_eq!(Weekday::ALL[0], Weekday::Monday);
    assert_eq!(Weekday::ALL[6], Weekday::Sunday);
}

#[test]
fn test_index_matches_all_order() {
    for (i, day) in Weekday::ALL.iter().enumerate() {
        assert_eq!(day.index(), i);
    }
}

#[test]
fn test_from_date() {
    // 2024-06-03 was a Monday
    assert_eq!(Weekday::from_date(date(2024, 6, 3)), Weekday::Monday);
    assert_eq!(Weekday::from_date(date(2024, 6, 9)), Weekday::Sunday);
    assert_eq!(Weekday::from_date(date(2024, 6, 6)), Weekday::Thursday);
}

#[test]
fn test_display_names() {
    assert_eq!(Weekday::Monday.to_string(), "Monday");
    assert_eq!(Weekday::Wednesday.to_string(), "Wednesday");
}

#[test]
fn test_start_of_week_is_identity_on_monday() {
    let monday = date(2024, 6, 3);
    assert_eq!(start_of_week(monday), monday);
}

#[test]
fn test_start_of_week_mid_week() {
    assert_eq!(start_of_week(date(2024, 6, 6)), date(2024, 6, 3));
    assert_eq!(start_of_week(date(2024, 6, 9)), date(2024, 6, 3));
}

#[test]
fn test_start_of_week_crosses_month_boundary() {
    // 2024-06-01 was a Saturday; its week starts on 2024-05-27
    assert_eq!(start_of_week(date(2024, 6, 1)), date(2024, 5, 27));
}

#[test]
fn test_day_order_from_monday_is_natural_order() {
    assert_eq!(day_order_from(Weekday::Monday), Weekday::ALL);
}

#[test]
fn test_day_order_from_thursday() {
    let order = day_order_from(Weekday::Thursday);
    assert_eq!(order[0], Weekday::Thursday);
    assert_eq!(order[3], Weekday::Sunday);
    assert_eq!(order[4], Weekday::Monday);
    assert_eq!(order[6], Weekday::Wednesday);
}

#[test]
fn test_day_order_contains_each_day_once() {
    let order = day_order_from(Weekday::Saturday);
    for day in Weekday::ALL {
        assert_eq!(order.iter().filter(|d| **d == day).count(), 1);
    }
}

#[test]
fn test_weekday_serializes_as_name() {
    let json = serde_json::to_string(&Weekday::Friday).unwrap();
    assert_eq!(json, "\"Friday\"");
}
