//! # Appraisal Orchestrator Module
//!
//! The per-user conversation state machine. Two states exist per user,
//! implicit in the pending-image store: no image pending, or awaiting the
//! follow-up size text. An image event (in either state) downloads and
//! stores the image and prompts for a size; a text event consumes the
//! pending image and runs the appraisal, or answers with guidance when
//! nothing is pending.
//!
//! Every external-client failure is converted into a single user-visible
//! error reply at this boundary, and the pending entry stays consumed so the
//! user is never stuck on a poisoned image. Reply delivery is fire-and-forget.

use std::sync::Arc;
use tracing::{debug, error, info};

use super::replies;
use crate::errors::BotError;
use crate::events::InboundEvent;
use crate::generation::{AppraisalGenerator, AppraisalRequest};
use crate::messaging::{ContentFetcher, ReplySender};
use crate::pending_store::{PendingImage, PendingImageStore};
use crate::size::normalize_size_text;
use crate::vision::VisionLabeler;

/// The conversation state machine, one instance shared across all users
pub struct Orchestrator {
    store: Arc<PendingImageStore>,
    content: Arc<dyn ContentFetcher>,
    vision: Option<Arc<dyn VisionLabeler>>,
    generator: Arc<dyn AppraisalGenerator>,
    replies: Arc<dyn ReplySender>,
}

impl Orchestrator {
    pub fn new(
        store: Arc<PendingImageStore>,
        content: Arc<dyn ContentFetcher>,
        vision: Option<Arc<dyn VisionLabeler>>,
        generator: Arc<dyn AppraisalGenerator>,
        replies: Arc<dyn ReplySender>,
    ) -> Self {
        Self {
            store,
            content,
            vision,
            generator,
            replies,
        }
    }

    /// Process one normalized inbound event
    pub async fn handle_event(&self, event: InboundEvent) {
        match event {
            InboundEvent::ImageReceived {
                user_id,
                message_id,
                reply_token,
            } => self.handle_image(&user_id, &message_id, &reply_token).await,
            InboundEvent::TextReceived {
                user_id,
                text,
                reply_token,
            } => self.handle_text(&user_id, &text, &reply_token).await,
        }
    }

    async fn handle_image(&self, user_id: &str, message_id: &str, reply_token: &str) {
        debug!(user_id = %user_id, message_id = %message_id, "Received image event");

        let bytes = match self.content.get_message_content(message_id).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Failed to download image content");
                self.send_reply(reply_token, &replies::appraisal_error_reply(&e))
                    .await;
                return;
            }
        };

        // Overwrites any earlier pending image for this user
        self.store.put(user_id, bytes);
        info!(user_id = %user_id, "Pending image stored, awaiting size");

        self.send_reply(reply_token, replies::SIZE_PROMPT).await;
    }

    async fn handle_text(&self, user_id: &str, text: &str, reply_token: &str) {
        let Some(pending) = self.store.take(user_id) else {
            debug!(user_id = %user_id, "Text received with no pending image");
            self.send_reply(reply_token, replies::GUIDANCE_NO_IMAGE).await;
            return;
        };

        // The image is consumed at this point regardless of the outcome below
        let reply_text = match self.appraise(user_id, pending, text).await {
            Ok(appraisal) => appraisal,
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Appraisal failed");
                replies::appraisal_error_reply(&e)
            }
        };

        self.send_reply(reply_token, &reply_text).await;
    }

    async fn appraise(
        &self,
        user_id: &str,
        pending: PendingImage,
        text: &str,
    ) -> Result<String, BotError> {
        let size_text = normalize_size_text(text);

        let labels = match &self.vision {
            Some(vision) => vision.label_detection(&pending.bytes).await?,
            None => Vec::new(),
        };
        if !labels.is_empty() {
            debug!(user_id = %user_id, label_count = labels.len(), "Vision labels attached");
        }

        let request = AppraisalRequest {
            image: pending.bytes,
            size_text,
            labels,
        };

        let appraisal = self.generator.generate(&request).await?;
        info!(user_id = %user_id, chars = appraisal.len(), "Appraisal generated");
        Ok(appraisal)
    }

    async fn send_reply(&self, reply_token: &str, text: &str) {
        if let Err(e) = self.replies.reply(reply_token, text).await {
            error!(error = %e, "Failed to deliver reply");
        }
    }
}
