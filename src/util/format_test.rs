use super::*;

#[test]
fn scores_group_thousands() {
    assert_eq!(format_score(0), "0");
    assert_eq!(format_score(950), "950");
    assert_eq!(format_score(12_450), "12,450");
    assert_eq!(format_score(1_000_000), "1,000,000");
    assert_eq!(format_score(-1200), "-1,200");
}

#[test]
fn countdown_renders_minutes_and_padded_seconds() {
    assert_eq!(format_countdown(0), "0:00");
    assert_eq!(format_countdown(5), "0:05");
    assert_eq!(format_countdown(65), "1:05");
}

#[test]
fn ordinals_handle_the_teen_exceptions() {
    assert_eq!(ordinal(1), "1st");
    assert_eq!(ordinal(2), "2nd");
    assert_eq!(ordinal(3), "3rd");
    assert_eq!(ordinal(4), "4th");
    assert_eq!(ordinal(11), "11th");
    assert_eq!(ordinal(12), "12th");
    assert_eq!(ordinal(13), "13th");
    assert_eq!(ordinal(21), "21st");
    assert_eq!(ordinal(112), "112th");
}

#[test]
fn streaks_only_badge_from_two_up() {
    assert_eq!(streak_label(0), "");
    assert_eq!(streak_label(1), "");
    assert_eq!(streak_label(3), "3x streak");
}
