use crate::domain::model::{AgendaEntry, ChecklistItem, Profile, Settings};
use crate::domain::ports::{Clock, KeyValueStore, SystemClock};
use crate::utils::error::{BabyGidsError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive_number};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const PROFILE_KEY: &str = "baby_profile";
pub const CHECKLIST_KEY: &str = "baby_checklist";
pub const SETTINGS_KEY: &str = "baby_settings";
pub const AGENDA_KEY: &str = "baby_agenda";
pub const AGENDA_DURATION_KEY: &str = "baby_agenda_duration";

pub const DEFAULT_AGENDA_WEEKS: u32 = 4;

pub fn default_checklist() -> Vec<ChecklistItem> {
    vec![
        ChecklistItem::open("1", "Geboorteaangifte doen"),
        ChecklistItem::open("2", "Kraamzorg regelen"),
        ChecklistItem::open("3", "Hielprik en gehoortest"),
        ChecklistItem::open("4", "Verzekering aanpassen"),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedAgenda {
    pub entries: Vec<AgendaEntry>,
    pub num_weeks: u32,
}

/// Persistent application state on top of a [`KeyValueStore`].
pub struct Session<S: KeyValueStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
}

impl<S: KeyValueStore> Session<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: SystemClock,
        }
    }
}

impl<S: KeyValueStore, C: Clock> Session<S, C> {
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Session<S, C2> {
        Session {
            store: self.store,
            clock,
        }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw).await
    }

    pub async fn profile(&self) -> Result<Option<Profile>> {
        self.read(PROFILE_KEY).await
    }

    pub async fn require_profile(&self) -> Result<Profile> {
        self.profile()
            .await?
            .ok_or_else(|| BabyGidsError::NotFoundError {
                what: "profile".to_string(),
            })
    }

    pub async fn save_profile(&self, profile: &Profile) -> Result<()> {
        validate_non_empty_string("name", &profile.name)?;
        tracing::info!("Saving profile for {}", profile.name);
        self.write(PROFILE_KEY, profile).await
    }

    pub async fn settings(&self) -> Result<Settings> {
        Ok(self.read(SETTINGS_KEY).await?.unwrap_or_default())
    }

    pub async fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.write(SETTINGS_KEY, settings).await
    }

    /// The stored checklist, or the default items when nothing was saved yet.
    pub async fn checklist(&self) -> Result<Vec<ChecklistItem>> {
        Ok(self
            .read(CHECKLIST_KEY)
            .await?
            .unwrap_or_else(default_checklist))
    }

    pub async fn save_checklist(&self, items: &[ChecklistItem]) -> Result<()> {
        self.write(CHECKLIST_KEY, items).await
    }

    pub async fn add_checklist_item(&self, text: &str) -> Result<ChecklistItem> {
        validate_non_empty_string("text", text)?;
        let mut items = self.checklist().await?;
        let item = ChecklistItem::open(
            self.clock.now().timestamp_millis().to_string(),
            text.trim(),
        );
        items.push(item.clone());
        self.save_checklist(&items).await?;
        Ok(item)
    }

    pub async fn toggle_checklist_item(&self, id: &str) -> Result<ChecklistItem> {
        let mut items = self.checklist().await?;
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| BabyGidsError::NotFoundError {
                what: format!("checklist item {}", id),
            })?;
        item.completed = !item.completed;
        let toggled = item.clone();
        self.save_checklist(&items).await?;
        Ok(toggled)
    }

    pub async fn saved_agenda(&self) -> Result<Option<SavedAgenda>> {
        let Some(entries) = self.read::<Vec<AgendaEntry>>(AGENDA_KEY).await? else {
            return Ok(None);
        };
        let num_weeks = match self.store.get(AGENDA_DURATION_KEY).await? {
            Some(raw) => raw.trim().parse().unwrap_or(DEFAULT_AGENDA_WEEKS),
            None => DEFAULT_AGENDA_WEEKS,
        };
        Ok(Some(SavedAgenda { entries, num_weeks }))
    }

    pub async fn save_agenda(&self, entries: &[AgendaEntry], num_weeks: u32) -> Result<()> {
        validate_positive_number("num_weeks", num_weeks, 1)?;
        self.write(AGENDA_KEY, entries).await?;
        self.store
            .set(AGENDA_DURATION_KEY, &num_weeks.to_string())
            .await
    }

    /// Wipes everything, profile included.
    pub async fn reset(&self) -> Result<()> {
        tracing::warn!("Clearing all stored data");
        self.store.clear().await
    }
}
