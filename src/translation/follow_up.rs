/*!
 * Follow-up question answering.
 *
 * The caller renders the context ledger and appends the literal question;
 * this service only frames it for the model and relays the answer.
 */

use log::error;
use tokio_util::sync::CancellationToken;

use super::core::LlmClient;
use super::prompts;

/// Answers free-form questions about recent translations
#[derive(Debug, Clone)]
pub struct FollowUpService {
    client: LlmClient,
}

impl FollowUpService {
    /// Create a new follow-up service
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    /// Answer `prompt_block` in `source_language`, or `None` if the backend fails
    pub async fn answer_follow_up(&self, prompt_block: &str, source_language: &str) -> Option<String> {
        self.answer_follow_up_with_cancel(prompt_block, source_language, &CancellationToken::new()).await
    }

    /// Like `answer_follow_up`, abandoning the call when `cancel` fires
    pub async fn answer_follow_up_with_cancel(
        &self,
        prompt_block: &str,
        source_language: &str,
        cancel: &CancellationToken,
    ) -> Option<String> {
        let messages = prompts::build_follow_up_messages(prompt_block, source_language);

        match self.client.complete("Follow-up", &messages, cancel).await {
            Ok(answer) if answer.trim().is_empty() => {
                error!("Error in follow-up response: backend returned an empty completion");
                None
            }
            Ok(answer) => Some(answer),
            Err(e) => {
                error!("Error in follow-up response: {}", e);
                None
            }
        }
    }
}
