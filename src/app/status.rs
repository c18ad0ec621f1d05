use crate::domain::model::{ChecklistItem, Profile, StageInfo, StageMode};
use crate::domain::stage::compute_stage;
use chrono::{DateTime, Utc};

/// Dashboard texts for the current stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDisplay {
    pub stage: StageInfo,
    pub greeting: String,
    pub label: String,
    pub sub: String,
}

impl StatusDisplay {
    pub fn for_profile(profile: &Profile, now: DateTime<Utc>) -> Self {
        let stage = compute_stage(profile.reference_instant(), now);
        let date = profile.reference_date.format("%-d-%-m-%Y");

        let (greeting, label, sub) = match stage.mode {
            StageMode::Prenatal => (
                format!("Bijna zover, {}! ✨", profile.name),
                format!("{} weken zwanger", stage.current_week),
                format!(
                    "Nog ongeveer {} weken tot de uitgerekende datum",
                    stage.weeks_remaining_or_elapsed
                ),
            ),
            StageMode::Postnatal => (
                format!("Hallo, ouder van {}! 👋", profile.name),
                format!("{} weken oud", stage.current_week),
                format!("Geboren op {}", date),
            ),
        };

        Self {
            stage,
            greeting,
            label,
            sub,
        }
    }
}

/// "done / total" as shown next to the checklist.
pub fn checklist_progress(items: &[ChecklistItem]) -> String {
    let done = items.iter().filter(|item| item.completed).count();
    format!("{} / {}", done, items.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_prenatal_labels() {
        let profile = Profile::new("Noor", NaiveDate::from_ymd_opt(2026, 12, 25).unwrap());
        let status = StatusDisplay::for_profile(&profile, now());

        assert_eq!(status.stage.mode, StageMode::Prenatal);
        assert_eq!(status.greeting, "Bijna zover, Noor! ✨");
        assert_eq!(status.label, "31 weken zwanger");
        assert_eq!(
            status.sub,
            "Nog ongeveer 9 weken tot de uitgerekende datum"
        );
    }

    #[test]
    fn test_postnatal_labels() {
        let profile = Profile::new("Sem", NaiveDate::from_ymd_opt(2026, 9, 3).unwrap());
        let status = StatusDisplay::for_profile(&profile, now());

        assert_eq!(status.stage.mode, StageMode::Postnatal);
        assert_eq!(status.greeting, "Hallo, ouder van Sem! 👋");
        assert_eq!(status.label, "6 weken oud");
        assert_eq!(status.sub, "Geboren op 3-9-2026");
    }

    #[test]
    fn test_checklist_progress() {
        let mut items = crate::app::session::default_checklist();
        items[1].completed = true;
        assert_eq!(checklist_progress(&items), "1 / 4");
        assert_eq!(checklist_progress(&[]), "0 / 0");
    }
}
