use super::store::{Collection, JsonStore};
use super::types::{
    CheckinDraft, CheckinField, CheckinMeta, CheckinSnapshot, CheckinStatus, HistoryEntry,
    now_timestamp,
};
use crate::error::JournalError;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;
use uuid::Uuid;

const MOOD_SCORE_MIN: i64 = 0;
const MOOD_SCORE_MAX: i64 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct CheckinState {
    meta: CheckinMeta,
    draft: CheckinDraft,
}

/// `get_current_checkin` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentCheckin {
    pub meta: CheckinMeta,
    pub checkin: CheckinDraft,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldUpdate {
    pub success: bool,
    #[serde(rename = "updatedState")]
    pub updated_state: CheckinDraft,
    pub filepath: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SaveOutcome {
    Saved {
        success: bool,
        saved_entry: HistoryEntry,
        filepath: PathBuf,
    },
    AlreadySaved {
        info: &'static str,
        entry: HistoryEntry,
    },
}

impl SaveOutcome {
    fn saved(entry: HistoryEntry, filepath: PathBuf) -> Self {
        Self::Saved {
            success: true,
            saved_entry: entry,
            filepath,
        }
    }

    fn already_saved(entry: HistoryEntry) -> Self {
        Self::AlreadySaved {
            info: "already_saved",
            entry,
        }
    }

    pub fn entry(&self) -> &HistoryEntry {
        match self {
            Self::Saved { saved_entry, .. } => saved_entry,
            Self::AlreadySaved { entry, .. } => entry,
        }
    }

    pub fn is_already_saved(&self) -> bool {
        matches!(self, Self::AlreadySaved { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalizeOutcome {
    pub finalize_result: SaveOutcome,
    pub meta: CheckinMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetOutcome {
    pub reset: bool,
    pub state: CheckinDraft,
    pub meta: CheckinMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckinFileInfo {
    pub checkin_id: Uuid,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub status: CheckinStatus,
    pub filepath: PathBuf,
}

/// Owns the one in-progress check-in and drives its lifecycle:
/// Empty -> InProgress -> Complete -> (reset) -> Empty.
///
/// Every mutation is staged on a copy of the state, persisted, and only then
/// committed, so a failed write leaves the draft as it was.
#[derive(Debug)]
pub struct CheckinManager {
    store: JsonStore,
    state: Mutex<CheckinState>,
}

impl CheckinManager {
    pub fn new(store: JsonStore) -> Self {
        Self {
            store,
            state: Mutex::new(CheckinState::default()),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, CheckinState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_field(
        &self,
        field: &str,
        raw_value: Option<&str>,
    ) -> Result<FieldUpdate, JournalError> {
        let field: CheckinField = field
            .parse()
            .map_err(|_| JournalError::InvalidField(field.to_string()))?;

        let mut state = self.lock_state();
        let mut next = state.clone();
        apply_field(&mut next.draft, field, raw_value)?;

        let checkin_id = next.meta.ensure_started();
        next.meta.updated_at = Some(now_timestamp());
        let filepath = self
            .store
            .write_snapshot(&CheckinSnapshot::capture(checkin_id, &next.meta, &next.draft))?;

        if !state.meta.is_started() {
            info!(%checkin_id, "check-in started");
        }
        *state = next;

        Ok(FieldUpdate {
            success: true,
            updated_state: state.draft.clone(),
            filepath,
        })
    }

    pub fn current(&self) -> CurrentCheckin {
        let state = self.lock_state();
        CurrentCheckin {
            meta: state.meta.clone(),
            checkin: state.draft.clone(),
        }
    }

    /// Append the draft to history and mark the check-in complete.
    ///
    /// A `client_entry_id` already present in history short-circuits to the
    /// stored entry, even if the draft differs from it.
    pub fn save(&self, client_entry_id: Option<&str>) -> Result<SaveOutcome, JournalError> {
        let client_entry_id = client_entry_id.filter(|id| !id.is_empty());
        let mut state = self.lock_state();

        if let Some(key) = client_entry_id {
            let history: Vec<HistoryEntry> = self.store.read(Collection::History);
            if let Some(existing) = history
                .into_iter()
                .find(|entry| entry.client_entry_id.as_deref() == Some(key))
            {
                info!(client_entry_id = key, entry_id = %existing.id, "check-in already saved");
                return Ok(SaveOutcome::already_saved(existing));
            }
        }

        let mut next = state.clone();
        let checkin_id = next.meta.ensure_started();
        let timestamp = now_timestamp();
        next.meta.updated_at = Some(timestamp.clone());

        let entry = HistoryEntry::from_draft(
            &next.draft,
            client_entry_id
                .map(str::to_string)
                .or_else(|| next.draft.client_entry_id.clone()),
            timestamp,
        );
        let filepath = self.store.append(Collection::History, entry.clone())?;

        next.meta.status = CheckinStatus::Complete;
        *state = next;
        self.store
            .write_snapshot(&CheckinSnapshot::capture(checkin_id, &state.meta, &state.draft))?;

        info!(%checkin_id, entry_id = %entry.id, "check-in saved to history");
        Ok(SaveOutcome::saved(entry, filepath))
    }

    pub fn finalize(&self) -> Result<FinalizeOutcome, JournalError> {
        let client_entry_id = self.lock_state().draft.client_entry_id.clone();
        let finalize_result = self.save(client_entry_id.as_deref())?;

        let mut state = self.lock_state();
        state.meta.status = CheckinStatus::Complete;
        Ok(FinalizeOutcome {
            finalize_result,
            meta: state.meta.clone(),
        })
    }

    /// Return to Empty. Files already written are left alone.
    pub fn reset(&self, clear_fields: bool) -> ResetOutcome {
        let mut state = self.lock_state();
        if let Some(checkin_id) = state.meta.checkin_id {
            info!(%checkin_id, clear_fields, "check-in reset");
        }
        if clear_fields {
            state.draft = CheckinDraft::default();
        }
        state.meta = CheckinMeta::default();
        ResetOutcome {
            reset: true,
            state: state.draft.clone(),
            meta: state.meta.clone(),
        }
    }

    pub fn file_info(&self) -> Result<CheckinFileInfo, JournalError> {
        let state = self.lock_state();
        let checkin_id = state.meta.checkin_id.ok_or(JournalError::NoCheckinStarted)?;
        Ok(CheckinFileInfo {
            checkin_id,
            created_at: state.meta.created_at.clone(),
            updated_at: state.meta.updated_at.clone(),
            status: state.meta.status,
            filepath: self.store.snapshot_path(checkin_id),
        })
    }
}

fn apply_field(
    draft: &mut CheckinDraft,
    field: CheckinField,
    raw_value: Option<&str>,
) -> Result<(), JournalError> {
    let owned = raw_value.map(str::to_string);
    match field {
        CheckinField::Objectives => draft.objectives = parse_objectives(raw_value.unwrap_or("")),
        CheckinField::MoodScore => draft.mood_score = Some(parse_mood_score(raw_value)?),
        CheckinField::ClientEntryId => draft.client_entry_id = owned,
        CheckinField::MoodText => draft.mood_text = owned,
        CheckinField::Energy => draft.energy = owned,
        CheckinField::Stress => draft.stress = owned,
        CheckinField::AgentSummary => draft.agent_summary = owned,
    }
    Ok(())
}

/// Comma-separated list; blank input clears it.
pub fn parse_objectives(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_mood_score(raw: Option<&str>) -> Result<u8, JournalError> {
    let not_integer = || JournalError::InvalidValue("mood_score must be an integer".to_string());
    let value: i64 = raw
        .map(str::trim)
        .ok_or_else(not_integer)?
        .parse()
        .map_err(|_| not_integer())?;

    if !(MOOD_SCORE_MIN..=MOOD_SCORE_MAX).contains(&value) {
        return Err(JournalError::InvalidValue(
            "mood_score must be an integer between 0 and 10".to_string(),
        ));
    }
    u8::try_from(value).map_err(|_| not_integer())
}
