//! Prompt templating for AI-generated insights
//!
//! The historical summary is embedded as compact JSON in the user message;
//! the system message carries the tone and the insight limit. Sending the
//! prompt is left to the caller.

use serde::{Deserialize, Serialize};

use crate::analytics::HistoricalSummary;
use crate::domain::Tone;

/// Maximum number of insights requested from the model
const MAX_INSIGHTS: usize = 3;

/// A ready-to-send chat prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightPrompt {
    pub system: String,
    pub user: String,
}

/// Build the insight prompt for a summary in the requested tone
pub fn build_insight_prompt(
    summary: &HistoricalSummary,
    tone: Tone,
) -> Result<InsightPrompt, serde_json::Error> {
    let system = format!(
        "You are a personal habit coach reviewing someone's life calendar. {} \
         Reply with at most {} short insights, one per line, each under 40 words. \
         Do not invent data that is not in the summary.",
        tone.instruction(),
        MAX_INSIGHTS
    );

    let tracked = summary.habits.iter().any(|h| h.tracked_days > 0);
    let user = if !tracked {
        format!(
            "I have not tracked any habits in the last {} days. \
             Give me one practical tip for getting started.",
            summary.period_days
        )
    } else {
        let payload = serde_json::to_string(summary)?;
        format!(
            "Here is my habit data for the last {} days ending {}. \
             Rates are percentages of tracked days.\n{}",
            summary.period_days, summary.generated_for, payload
        )
    };

    Ok(InsightPrompt { system, user })
}
