//! System instructions and prompt synthesis.

use crate::profile::{render_context, Profile};

/// Static preamble for chat generation; the rendered profile is
/// appended per request.
pub const CHAT_PREAMBLE: &str = "\
You are EasyDiet, a friendly nutrition coach. Give practical, \
specific meal and training advice grounded in the user's profile \
below. Keep answers concise and conversational; ask a clarifying \
question when the request is ambiguous. Do not give medical advice.";

/// System instruction for the profile extraction call.
pub const EXTRACTION_INSTRUCTION: &str = "\
You receive the current nutrition profile and the user's latest \
message. If the message updates their fitness goals or dietary \
restrictions, return JSON with keys `fitness_goals` and \
`dietary_restrictions`. Use null when no change is present. Respond \
with JSON only.";

/// System instruction for chat generation: preamble plus the current
/// profile state.
pub fn chat_instruction(profile: &Profile) -> String {
    format!("{CHAT_PREAMBLE}\n\n{}", render_context(profile))
}

/// The single synthesized user prompt for the extraction call.
pub fn extraction_prompt(profile: &Profile, message: &str) -> String {
    format!(
        "Current profile:\n{}\nUser message: {message}",
        render_context(profile)
    )
}
