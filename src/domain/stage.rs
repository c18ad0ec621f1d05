//! Pregnancy week / baby age derived from a reference date.
//!
//! Everything here is a pure function of two instants. Week counts always
//! floor to whole weeks; the prenatal branch assumes a 40-week gestation and
//! does not clamp post-term or very early values.

use crate::domain::model::{StageInfo, StageMode};
use chrono::{DateTime, Utc};

pub const GESTATION_WEEKS: i64 = 40;

const WEEK_MILLIS: i64 = 7 * 24 * 60 * 60 * 1000;

fn whole_weeks_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    (later - earlier).num_milliseconds().div_euclid(WEEK_MILLIS)
}

pub fn stage_mode(reference: DateTime<Utc>, now: DateTime<Utc>) -> StageMode {
    if reference > now {
        StageMode::Prenatal
    } else {
        StageMode::Postnatal
    }
}

pub fn compute_stage(reference: DateTime<Utc>, now: DateTime<Utc>) -> StageInfo {
    match stage_mode(reference, now) {
        StageMode::Prenatal => {
            let weeks_remaining = whole_weeks_between(now, reference);
            StageInfo {
                mode: StageMode::Prenatal,
                current_week: GESTATION_WEEKS - weeks_remaining,
                weeks_remaining_or_elapsed: weeks_remaining,
            }
        }
        StageMode::Postnatal => {
            let weeks_elapsed = whole_weeks_between(reference, now);
            StageInfo {
                mode: StageMode::Postnatal,
                current_week: weeks_elapsed,
                weeks_remaining_or_elapsed: weeks_elapsed,
            }
        }
    }
}

/// The week an agenda continues from. Same as [`compute_stage`] except that a
/// prenatal week never drops below 1.
pub fn agenda_anchor_week(reference: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let stage = compute_stage(reference, now);
    match stage.mode {
        StageMode::Prenatal => stage.current_week.max(1),
        StageMode::Postnatal => stage.current_week,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 14, 30, 0).unwrap()
    }

    #[test]
    fn test_ten_weeks_ahead_is_week_thirty() {
        let stage = compute_stage(now() + Duration::weeks(10), now());
        assert_eq!(stage.mode, StageMode::Prenatal);
        assert_eq!(stage.weeks_remaining_or_elapsed, 10);
        assert_eq!(stage.current_week, 30);
    }

    #[test]
    fn test_three_weeks_past_is_week_three() {
        let stage = compute_stage(now() - Duration::weeks(3), now());
        assert_eq!(stage.mode, StageMode::Postnatal);
        assert_eq!(stage.current_week, 3);
        assert_eq!(stage.weeks_remaining_or_elapsed, 3);
    }

    #[test]
    fn test_same_instant_is_postnatal_week_zero() {
        let stage = compute_stage(now(), now());
        assert_eq!(stage.mode, StageMode::Postnatal);
        assert_eq!(stage.current_week, 0);
    }

    #[test]
    fn test_partial_weeks_are_floored() {
        let almost_two = Duration::weeks(2) - Duration::milliseconds(1);

        let stage = compute_stage(now() + almost_two, now());
        assert_eq!(stage.weeks_remaining_or_elapsed, 1);
        assert_eq!(stage.current_week, 39);

        let stage = compute_stage(now() - almost_two, now());
        assert_eq!(stage.current_week, 1);

        let stage = compute_stage(now() + Duration::days(6), now());
        assert_eq!(stage.mode, StageMode::Prenatal);
        assert_eq!(stage.current_week, 40);
    }

    #[test]
    fn test_prenatal_formula_over_a_range() {
        for days in 1..=(45 * 7) {
            let stage = compute_stage(now() + Duration::days(days), now());
            assert_eq!(stage.mode, StageMode::Prenatal);
            assert_eq!(stage.current_week, 40 - days / 7);
        }
    }

    #[test]
    fn test_postnatal_formula_over_a_range() {
        for days in 0..=(60 * 7) {
            let stage = compute_stage(now() - Duration::days(days), now());
            assert_eq!(stage.mode, StageMode::Postnatal);
            assert_eq!(stage.current_week, days / 7);
            assert!(stage.current_week >= 0);
        }
    }

    #[test]
    fn test_no_clamping_far_before_term() {
        let stage = compute_stage(now() + Duration::weeks(42), now());
        assert_eq!(stage.current_week, -2);
    }

    #[test]
    fn test_compute_stage_is_idempotent() {
        let reference = now() + Duration::days(123);
        assert_eq!(compute_stage(reference, now()), compute_stage(reference, now()));
    }

    #[test]
    fn test_agenda_anchor_floors_prenatal_at_one() {
        assert_eq!(agenda_anchor_week(now() + Duration::weeks(42), now()), 1);
        assert_eq!(agenda_anchor_week(now() + Duration::weeks(40), now()), 1);
        assert_eq!(agenda_anchor_week(now() + Duration::weeks(10), now()), 30);
        assert_eq!(agenda_anchor_week(now(), now()), 0);
        assert_eq!(agenda_anchor_week(now() - Duration::weeks(5), now()), 5);
    }
}
