//! Tool for habit insights
//!
//! This module implements the habit_insights MCP tool. It composes the
//! historical summary for the trailing window and templates it into the
//! prompt for an external text-generation service. Sending the prompt is up
//! to the client.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{AnalyticsConfig, AnalyticsEngine, HistoricalSummary};
use crate::domain::{DateWindow, Tone};
use crate::insights::{build_insight_prompt, InsightPrompt};
use crate::storage::CalendarStorage;
use crate::tools::{reference_day, ToolError};

/// The trend comparison always needs the last two weeks
const TREND_DAYS: u32 = 14;

/// Parameters for generating insights
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct InsightsParams {
    /// supportive, direct or analytical; defaults to the configured tone
    pub tone: Option<String>,
    /// Days covered by the summary; defaults to the configured window
    pub window_days: Option<u32>,
    /// Reference day (YYYY-MM-DD), defaults to today
    pub today: Option<String>,
}

/// Response with the summary and the prompt built from it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub tone: Tone,
    pub summary: HistoricalSummary,
    pub prompt: InsightPrompt,
    pub message: String,
}

/// Analyze active habits and build the insight prompt
pub fn get_habit_insights<S: CalendarStorage>(
    storage: &S,
    analytics: &AnalyticsEngine,
    default_tone: Tone,
    params: InsightsParams,
) -> Result<InsightsResponse, ToolError> {
    let today = reference_day(params.today.as_deref())?;
    let tone = match params.tone.as_deref() {
        Some(s) => s.parse::<Tone>()?,
        None => default_tone,
    };

    let config = AnalyticsConfig {
        window_days: params.window_days.unwrap_or(analytics.config().window_days),
        ..*analytics.config()
    };
    if config.window_days == 0 {
        return Err(ToolError::InvalidParams(
            "window_days must be at least 1".to_string(),
        ));
    }

    let span = config
        .window_days
        .max(config.reflection_days)
        .max(TREND_DAYS);
    let book = storage.get_records(DateWindow::trailing(today, span))?;
    let habits = storage.list_habits(true)?;

    let summary = AnalyticsEngine::with_config(config).summarize(&habits, &book, today);
    let prompt = build_insight_prompt(&summary, tone)?;

    let tracked = summary.habits.iter().filter(|h| h.tracked_days > 0).count();
    let message = format!(
        "🧠 Summarized {} of {} habits over {} days ({} tone)",
        tracked,
        summary.habits.len(),
        summary.period_days,
        tone
    );

    Ok(InsightsResponse {
        tone,
        summary,
        prompt,
        message,
    })
}
