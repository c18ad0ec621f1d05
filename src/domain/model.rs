use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    /// Due date while pregnant, birth date afterwards.
    #[serde(rename = "birthDate")]
    pub reference_date: NaiveDate,
}

impl Profile {
    pub fn new(name: impl Into<String>, reference_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            reference_date,
        }
    }

    /// The reference date as an instant, midnight UTC.
    pub fn reference_instant(&self) -> DateTime<Utc> {
        reference_instant(self.reference_date)
    }
}

pub fn reference_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageMode {
    Prenatal,
    Postnatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageInfo {
    pub mode: StageMode,
    pub current_week: i64,
    /// Weeks left until the due date (prenatal) or weeks since birth (postnatal).
    pub weeks_remaining_or_elapsed: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaEntry {
    #[serde(deserialize_with = "deserialize_week")]
    pub week: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "source")]
    pub source_name: String,
    #[serde(rename = "sourceUrl")]
    pub source_url: String,
}

/// The schema types `week` as a JSON number, so `5.0` is accepted but `5.5` is not.
fn deserialize_week<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(week) = number.as_i64() {
        return Ok(week);
    }
    match number.as_f64() {
        Some(value) if value.is_finite() && value.fract() == 0.0 => Ok(value as i64),
        _ => Err(serde::de::Error::custom(format!(
            "week must be a whole number, got {}",
            number
        ))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLink {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceAnswer {
    #[serde(rename = "answer")]
    pub answer_text: String,
    pub sources: Vec<SourceLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Standard,
    Amoled,
    Mondriaan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModelId {
    #[default]
    #[serde(rename = "gemini-3-flash-preview")]
    Gemini3FlashPreview,
    #[serde(rename = "gemini-3-pro-preview")]
    Gemini3ProPreview,
}

impl ModelId {
    pub fn as_str(self) -> &'static str {
        match self {
            ModelId::Gemini3FlashPreview => "gemini-3-flash-preview",
            ModelId::Gemini3ProPreview => "gemini-3-pro-preview",
        }
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: ThemeId,
    #[serde(rename = "apiKey", default)]
    pub api_key: Option<String>,
    #[serde(rename = "preferredModel", default)]
    pub model: ModelId,
}

impl Settings {
    /// The stored key, ignoring an empty string.
    pub fn api_credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl ChecklistItem {
    pub fn open(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_uses_birth_date_key() {
        let profile = Profile::new("Noor", NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Noor", "birthDate": "2026-03-01"})
        );
    }

    #[test]
    fn test_agenda_entry_accepts_integral_float_week() {
        let entry: AgendaEntry = serde_json::from_value(serde_json::json!({
            "week": 5.0,
            "title": "Week 5",
            "description": "Groei",
            "source": "24baby.nl",
            "sourceUrl": "https://www.24baby.nl/"
        }))
        .unwrap();
        assert_eq!(entry.week, 5);
        assert_eq!(entry.source_name, "24baby.nl");
    }

    #[test]
    fn test_agenda_entry_rejects_fractional_week() {
        let result: std::result::Result<AgendaEntry, _> =
            serde_json::from_value(serde_json::json!({
                "week": 5.5,
                "title": "Week 5",
                "description": "Groei",
                "source": "24baby.nl",
                "sourceUrl": "https://www.24baby.nl/"
            }));
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_wire_format_and_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme":"amoled"}"#).unwrap();
        assert_eq!(settings.theme, ThemeId::Amoled);
        assert_eq!(settings.model, ModelId::Gemini3FlashPreview);
        assert_eq!(settings.api_credential(), None);

        let settings: Settings = serde_json::from_str(
            r#"{"theme":"mondriaan","apiKey":"","preferredModel":"gemini-3-pro-preview"}"#,
        )
        .unwrap();
        assert_eq!(settings.model, ModelId::Gemini3ProPreview);
        assert_eq!(settings.api_credential(), None);
    }
}
