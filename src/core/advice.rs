use crate::core::request::{
    agenda_prompt, agenda_schema, answer_schema, system_instruction, FALLBACK_ANSWER,
};
use crate::domain::model::{reference_instant, AdviceAnswer, AgendaEntry, Settings};
use crate::domain::ports::{Clock, GenerationRequest, LlmProvider, SystemClock};
use crate::domain::schema::SchemaNode;
use crate::domain::stage::{agenda_anchor_week, stage_mode};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_positive_number};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;

/// Safe value handed out when a model response cannot be used.
pub trait Fallback {
    fn fallback() -> Self;
}

impl Fallback for AdviceAnswer {
    fn fallback() -> Self {
        AdviceAnswer {
            answer_text: FALLBACK_ANSWER.to_string(),
            sources: Vec::new(),
        }
    }
}

impl Fallback for Vec<AgendaEntry> {
    fn fallback() -> Self {
        Vec::new()
    }
}

/// Result of a call that reached the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Succeeded(T),
    /// The response did not match the requested schema.
    Recovered { value: T, reason: String },
}

impl<T> Outcome<T> {
    pub fn into_value(self) -> T {
        match self {
            Outcome::Succeeded(value) | Outcome::Recovered { value, .. } => value,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Succeeded(_))
    }
}

/// Lifecycle of one assistant request as seen by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Requesting,
    Succeeded(T),
    Failed { fallback: T, reason: String },
}

impl<T: Fallback> RequestState<T> {
    /// Leave `Requesting` with the result of the call.
    pub fn settle(result: Result<Outcome<T>>) -> Self {
        match result {
            Ok(Outcome::Succeeded(value)) => RequestState::Succeeded(value),
            Ok(Outcome::Recovered { value, reason }) => RequestState::Failed {
                fallback: value,
                reason,
            },
            Err(e) => RequestState::Failed {
                fallback: T::fallback(),
                reason: e.to_string(),
            },
        }
    }
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Requesting)
    }

    /// The value to display once settled.
    pub fn value(&self) -> Option<&T> {
        match self {
            RequestState::Succeeded(value) => Some(value),
            RequestState::Failed { fallback, .. } => Some(fallback),
            RequestState::Idle | RequestState::Requesting => None,
        }
    }
}

/// Builds assistant requests, sends them through the injected provider and
/// validates what comes back. Holds no per-call state.
pub struct AdviceService<P: LlmProvider, C: Clock = SystemClock> {
    provider: P,
    clock: C,
    web_search: bool,
}

impl<P: LlmProvider> AdviceService<P, SystemClock> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            clock: SystemClock,
            web_search: false,
        }
    }
}

impl<P: LlmProvider, C: Clock> AdviceService<P, C> {
    pub fn with_clock<C2: Clock>(self, clock: C2) -> AdviceService<P, C2> {
        AdviceService {
            provider: self.provider,
            clock,
            web_search: self.web_search,
        }
    }

    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }

    pub async fn ask_question(
        &self,
        question: &str,
        reference_date: NaiveDate,
        settings: &Settings,
    ) -> Result<Outcome<AdviceAnswer>> {
        validate_non_empty_string("question", question)?;

        let mode = stage_mode(reference_instant(reference_date), self.clock.now());
        tracing::debug!("Asking question in {:?} mode", mode);

        let request = self.request(
            settings,
            system_instruction(mode),
            question.to_string(),
            answer_schema(),
        );
        let response = self.provider.generate(&request).await?;

        Ok(decode::<AdviceAnswer>(&response.text, "answer"))
    }

    pub async fn generate_agenda(
        &self,
        reference_date: NaiveDate,
        num_weeks: u32,
        settings: &Settings,
    ) -> Result<Outcome<Vec<AgendaEntry>>> {
        validate_positive_number("num_weeks", num_weeks, 1)?;

        let now = self.clock.now();
        let reference = reference_instant(reference_date);
        let mode = stage_mode(reference, now);
        let anchor_week = agenda_anchor_week(reference, now);
        tracing::debug!(
            "Generating {} week agenda from week {} ({:?})",
            num_weeks,
            anchor_week,
            mode
        );

        let request = self.request(
            settings,
            system_instruction(mode),
            agenda_prompt(mode, anchor_week, reference_date, num_weeks),
            agenda_schema(mode),
        );
        let response = self.provider.generate(&request).await?;

        Ok(match decode::<Vec<AgendaEntry>>(&response.text, "agenda") {
            Outcome::Succeeded(mut entries) => {
                entries.sort_by_key(|entry| entry.week);
                if entries.len() != num_weeks as usize {
                    tracing::debug!(
                        "Agenda has {} entries for {} requested weeks",
                        entries.len(),
                        num_weeks
                    );
                }
                Outcome::Succeeded(entries)
            }
            recovered => recovered,
        })
    }

    fn request(
        &self,
        settings: &Settings,
        system_instruction: String,
        contents: String,
        response_schema: SchemaNode,
    ) -> GenerationRequest {
        GenerationRequest {
            model: settings.model,
            system_instruction,
            contents,
            response_schema,
            web_search: self.web_search,
            api_key: settings.api_credential().map(str::to_string),
        }
    }
}

fn decode<T: DeserializeOwned + Fallback>(text: &str, what: &str) -> Outcome<T> {
    match serde_json::from_str::<T>(text) {
        Ok(value) => Outcome::Succeeded(value),
        Err(e) => {
            tracing::error!("Failed to parse {} response: {}", what, e);
            Outcome::Recovered {
                value: T::fallback(),
                reason: e.to_string(),
            }
        }
    }
}
