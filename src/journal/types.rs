use chrono::Utc;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Check-in timestamps: UTC, second precision, trailing `Z`.
pub fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

// CheckinField: closed set of draft attributes the agent may edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum CheckinField {
    ClientEntryId,
    MoodText,
    MoodScore,
    Energy,
    Stress,
    Objectives,
    AgentSummary,
}

impl CheckinField {
    pub const ALL: [Self; 7] = [
        Self::ClientEntryId,
        Self::MoodText,
        Self::MoodScore,
        Self::Energy,
        Self::Stress,
        Self::Objectives,
        Self::AgentSummary,
    ];
}

/// The single mutable check-in the agent fills in over a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinDraft {
    pub client_entry_id: Option<String>,
    pub mood_text: Option<String>,
    pub mood_score: Option<u8>,
    pub energy: Option<String>,
    pub stress: Option<String>,
    #[serde(default)]
    pub objectives: Vec<String>,
    pub agent_summary: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CheckinStatus {
    #[default]
    InProgress,
    Complete,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinMeta {
    pub checkin_id: Option<Uuid>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub status: CheckinStatus,
}

impl CheckinMeta {
    pub fn is_started(&self) -> bool {
        self.checkin_id.is_some()
    }

    /// Empty -> InProgress. Returns the id, newly assigned or not.
    pub fn ensure_started(&mut self) -> Uuid {
        if let Some(id) = self.checkin_id {
            return id;
        }
        let id = Uuid::new_v4();
        self.checkin_id = Some(id);
        self.created_at = Some(now_timestamp());
        id
    }
}

/// Body of `checkin_<id>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckinSnapshot {
    pub checkin_id: Uuid,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub status: CheckinStatus,
    pub checkin: CheckinDraft,
}

impl CheckinSnapshot {
    pub fn capture(checkin_id: Uuid, meta: &CheckinMeta, draft: &CheckinDraft) -> Self {
        Self {
            checkin_id,
            created_at: meta.created_at.clone(),
            updated_at: meta.updated_at.clone(),
            status: meta.status,
            checkin: draft.clone(),
        }
    }
}

/// One finalized check-in in `wellness_log.json`. Never mutated after append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub client_entry_id: Option<String>,
    pub timestamp: String,
    pub mood_text: Option<String>,
    pub mood_score: Option<u8>,
    pub energy: Option<String>,
    pub stress: Option<String>,
    #[serde(default)]
    pub objectives: Vec<String>,
    pub agent_summary: Option<String>,
}

impl HistoryEntry {
    pub fn from_draft(
        draft: &CheckinDraft,
        client_entry_id: Option<String>,
        timestamp: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_entry_id,
            timestamp,
            mood_text: draft.mood_text.clone(),
            mood_score: draft.mood_score,
            energy: draft.energy.clone(),
            stress: draft.stress.clone(),
            objectives: draft.objectives.clone(),
            agent_summary: draft.agent_summary.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub created_at: String,
    pub title: String,
    pub note: String,
    #[serde(default)]
    pub done: bool,
}

impl Task {
    pub fn from_objective(objective: &str, checkin_id: Option<Uuid>, created_at: &str) -> Self {
        let source = checkin_id.map_or_else(|| "None".to_string(), |id| id.to_string());
        Self {
            id: Uuid::new_v4(),
            created_at: created_at.to_string(),
            title: objective.to_string(),
            note: format!("From checkin {source}"),
            done: false,
        }
    }
}
