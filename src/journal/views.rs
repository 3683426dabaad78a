use super::store::{Collection, JsonStore};
use super::types::HistoryEntry;
use crate::error::JournalError;
use serde::Serialize;

pub const DEFAULT_SUMMARY_DAYS: i64 = 7;
const NO_DATA_SUMMARY: &str = "No data available yet.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MoodSummary {
    NoData {
        summary: &'static str,
    },
    Window {
        entries_considered: usize,
        avg_mood_score: Option<f64>,
        days_with_objectives: usize,
        summary: String,
    },
}

impl MoodSummary {
    pub fn sentence(&self) -> &str {
        match self {
            Self::NoData { summary } => summary,
            Self::Window { summary, .. } => summary,
        }
    }
}

pub fn last_entry(store: &JsonStore) -> Result<HistoryEntry, JournalError> {
    store
        .read::<HistoryEntry>(Collection::History)
        .pop()
        .ok_or(JournalError::NoEntries)
}

/// Whole history, or only its tail when `limit` is positive.
pub fn history(store: &JsonStore, limit: Option<i64>) -> Vec<HistoryEntry> {
    let entries: Vec<HistoryEntry> = store.read(Collection::History);
    match limit.and_then(|limit| usize::try_from(limit).ok()) {
        Some(limit) if limit > 0 => tail(entries, limit),
        _ => entries,
    }
}

pub fn summary(store: &JsonStore, days: i64) -> MoodSummary {
    let entries: Vec<HistoryEntry> = store.read(Collection::History);
    summarize(entries, days)
}

pub fn summarize(entries: Vec<HistoryEntry>, days: i64) -> MoodSummary {
    if entries.is_empty() {
        return MoodSummary::NoData {
            summary: NO_DATA_SUMMARY,
        };
    }

    let recent = match usize::try_from(days) {
        Ok(days) if days > 0 => tail(entries, days),
        _ => entries,
    };

    let scores: Vec<f64> = recent
        .iter()
        .filter_map(|entry| entry.mood_score)
        .map(f64::from)
        .collect();
    let avg_mood_score = average(&scores);
    let days_with_objectives = recent
        .iter()
        .filter(|entry| !entry.objectives.is_empty())
        .count();

    let mut sentence = format!(
        "In the last {} entries, {days_with_objectives} had at least one objective.",
        recent.len()
    );
    if let Some(avg) = avg_mood_score {
        sentence.push_str(&format!(" Average mood score was {}.", format_score(avg)));
    }

    MoodSummary::Window {
        entries_considered: recent.len(),
        avg_mood_score,
        days_with_objectives,
        summary: sentence,
    }
}

fn tail<T>(mut items: Vec<T>, count: usize) -> Vec<T> {
    let start = items.len().saturating_sub(count);
    items.split_off(start)
}

#[allow(clippy::cast_precision_loss)]
fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}

/// `7` prints as `7.0`, `6.67` stays `6.67`.
fn format_score(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
