//! Fixed reply texts for the conversation flow

use crate::errors::BotError;

/// Sent after an image is stored, asking for the follow-up size message
pub const SIZE_PROMPT: &str = "send the size as text (e.g., 15cm)";

/// Sent when text arrives with no pending image for the user
pub const GUIDANCE_NO_IMAGE: &str = "please send a photo first";

/// User-visible reply for a failed appraisal
pub fn appraisal_error_reply(error: &BotError) -> String {
    format!("an error occurred during appraisal: {error}")
}
