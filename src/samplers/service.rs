//! Customer service assistant sampler and keyword responder

use super::round_to;
use crate::types::{ChatReply, ServiceInteractionRecord, SERVICE_MODEL_VERSION};
use chrono::{Duration as ChronoDuration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Canned queries and their responses, paired by position.
pub const CANNED_INTERACTIONS: [(&str, &str); 10] = [
    (
        "I can't login to my account",
        "I understand you're having trouble logging in. Let me help you reset your password.",
    ),
    (
        "My order hasn't arrived yet",
        "I apologize for the delay with your order. Let me check the status for you.",
    ),
    (
        "I want to return this product",
        "I'd be happy to help you with your return. Our return policy allows returns within 30 days.",
    ),
    (
        "The app keeps crashing on my phone",
        "I'm sorry to hear about the app crashes. Let's troubleshoot this together.",
    ),
    (
        "I was charged twice for the same order",
        "I sincerely apologize for the double charge. I'll investigate this immediately.",
    ),
    (
        "How do I update my payment method?",
        "I can help you update your payment method. Please go to Account Settings.",
    ),
    (
        "Can you help me track my package?",
        "I'll be happy to help you track your package. Could you provide your order number?",
    ),
    (
        "I need to cancel my subscription",
        "I can help you cancel your subscription. Let me process that for you.",
    ),
    (
        "The product I received is damaged",
        "I'm sorry the product arrived damaged. I'll arrange a replacement immediately.",
    ),
    (
        "I forgot my password",
        "I can help you reset your password. Please check your email for instructions.",
    ),
];

/// Keyword rule for free-text questions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseRule {
    /// Lower-case substring to look for
    pub keyword: &'static str,
    pub response: &'static str,
}

/// Evaluated in order; the first keyword found in the question wins.
pub const RESPONSE_RULES: [ResponseRule; 5] = [
    ResponseRule {
        keyword: "login",
        response: "I understand you're having trouble logging in. Let me help you reset your password by sending a reset link to your email.",
    },
    ResponseRule {
        keyword: "order",
        response: "I apologize for the delay with your order. Let me check the status and provide you with an update.",
    },
    ResponseRule {
        keyword: "return",
        response: "I'd be happy to help you with your return. Our return policy allows returns within 30 days of purchase.",
    },
    ResponseRule {
        keyword: "app",
        response: "I'm sorry to hear about the app issues. Let's troubleshoot this together by first trying to restart the app.",
    },
    ResponseRule {
        keyword: "charge",
        response: "I sincerely apologize for any billing issues. I'll investigate this immediately and ensure any errors are corrected.",
    },
];

/// Returned when no keyword matches
pub const FALLBACK_RESPONSE: &str =
    "I understand your concern and I'm here to help. Let me assist you with this issue right away.";

/// Look up the canned response for a free-text question.
pub fn match_response(query: &str) -> &'static str {
    let query = query.to_lowercase();
    RESPONSE_RULES
        .iter()
        .find(|rule| query.contains(rule.keyword))
        .map(|rule| rule.response)
        .unwrap_or(FALLBACK_RESPONSE)
}

/// Samples canned interactions and answers free-text questions.
pub struct ServiceQuerySampler<R = StdRng> {
    rng: R,
}

impl ServiceQuerySampler<StdRng> {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ServiceQuerySampler<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Pick a canned exchange and attach random serving metadata.
    pub fn sample(&mut self) -> ServiceInteractionRecord {
        let index = self.rng.gen_range(0..CANNED_INTERACTIONS.len());
        let (query, response) = CANNED_INTERACTIONS[index];
        let response_time = self.rng.gen_range(0.5..=3.0);
        let confidence = self.rng.gen_range(0.7..=0.98);

        ServiceInteractionRecord {
            query: query.to_string(),
            response: response.to_string(),
            response_time: round_to(response_time, 2),
            confidence_score: round_to(confidence, 3),
            model_version: SERVICE_MODEL_VERSION.to_string(),
            timestamp: Utc::now() - ChronoDuration::seconds(self.rng.gen_range(0..=1800)),
            user_satisfied: self.rng.gen_bool(0.75),
        }
    }

    /// Canned response for a free-text question.
    pub fn respond(&self, query: &str) -> String {
        match_response(query).to_string()
    }

    /// Canned response plus independently drawn reply metadata.
    pub fn reply(&mut self, query: &str) -> ChatReply {
        ChatReply {
            text: self.respond(query),
            response_time: self.rng.gen_range(0.8..=2.5),
            confidence: self.rng.gen_range(0.85..=0.98),
        }
    }

    /// Deliver [`reply`](Self::reply) after a simulated thinking delay.
    ///
    /// The delay runs as a tokio task, so this must be called from within a runtime.
    pub fn reply_after(&mut self, query: &str, delay: Duration) -> PendingReply {
        let reply = self.reply(query);
        debug!(delay_ms = delay.as_millis() as u64, "Assistant is thinking");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            reply
        });

        PendingReply { handle }
    }
}

/// A reply still inside its thinking delay
pub struct PendingReply {
    handle: JoinHandle<ChatReply>,
}

impl PendingReply {
    /// Abandon the reply; [`wait`](Self::wait) then yields `None`.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the delay to elapse.
    ///
    /// Takes `&mut self` so a caller racing the wait against an interrupt can
    /// still [`cancel`](Self::cancel) afterwards. Call at most once after the
    /// reply has been delivered.
    pub async fn wait(&mut self) -> Option<ChatReply> {
        match (&mut self.handle).await {
            Ok(reply) => Some(reply),
            Err(e) if e.is_cancelled() => {
                debug!("Pending reply cancelled");
                None
            }
            Err(e) => {
                warn!(error = %e, "Pending reply task failed");
                None
            }
        }
    }
}
