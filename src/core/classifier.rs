use crate::core::parser::parse_response;
use crate::core::prompt::{build_prompt, is_known_industry, is_known_ownership, is_state_code};
use crate::domain::model::{Classification, JobPosting};
use crate::domain::ports::CompletionService;

/// Sampling temperature sent with every request.
pub const CLASSIFICATION_TEMPERATURE: f64 = 0.0;

/// Classifies one posting per call, falling back to the sentinel tuple on any failure.
pub struct JobClassifier<C: CompletionService> {
    service: C,
}

impl<C: CompletionService> JobClassifier<C> {
    pub fn new(service: C) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &C {
        &self.service
    }

    pub async fn classify(&self, posting: &JobPosting<'_>) -> Classification {
        let prompt = build_prompt(posting);

        let reply = match self.service.complete(&prompt, CLASSIFICATION_TEMPERATURE).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("Error processing {}: {}", posting.title, e);
                return Classification::fallback();
            }
        };

        match parse_response(&reply) {
            Ok(result) => {
                if !is_known_industry(result.industry())
                    || !is_known_ownership(result.ownership())
                    || !is_state_code(result.state())
                {
                    tracing::debug!(
                        title = posting.title,
                        industry = result.industry(),
                        ownership = result.ownership(),
                        state = result.state(),
                        "Label outside the taxonomy, keeping it"
                    );
                }
                result
            }
            Err(e) => {
                tracing::warn!("Error processing {}: {}", posting.title, e);
                Classification::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{ScriptedService, StubService};

    fn posting() -> JobPosting<'static> {
        JobPosting {
            title: "Clerk",
            company: "City of Springfield",
            location: "Springfield, IL",
        }
    }

    #[tokio::test]
    async fn test_classify_parses_reply() {
        let classifier = JobClassifier::new(StubService::new());
        let result = classifier.classify(&posting()).await;

        assert_eq!(
            result,
            Classification::new("Public administration", "Local Government", "IL")
        );
        assert_eq!(classifier.service().calls(), 1);
    }

    #[tokio::test]
    async fn test_sends_zero_temperature() {
        let classifier = JobClassifier::new(StubService::new());
        classifier.classify(&posting()).await;
        assert_eq!(classifier.service().temperatures(), vec![0.0]);
    }

    #[tokio::test]
    async fn test_fallback_on_any_failure() {
        let replies = vec![
            Err(crate::utils::error::ClassifyError::ServiceError {
                status: 429,
                message: "rate limited".to_string(),
            }),
            Err(crate::utils::error::ClassifyError::malformed("no choices")),
            Ok(String::new()),
            Ok("Industry: Information".to_string()),
            Ok("Industry: Information\nOwnership: Private Sector".to_string()),
            Ok("Industry: Information\nOwnership:\nState: CA".to_string()),
        ];
        let count = replies.len();
        let classifier = JobClassifier::new(ScriptedService::new(replies));

        for _ in 0..count {
            let result = classifier.classify(&posting()).await;
            assert_eq!(result, Classification::fallback());
        }
    }

    #[tokio::test]
    async fn test_unknown_labels_are_kept() {
        let classifier = JobClassifier::new(ScriptedService::new(vec![Ok(
            "Industry: Retail\nOwnership: Cooperative\nState: Texas".to_string(),
        )]));
        let result = classifier.classify(&posting()).await;
        assert_eq!(result, Classification::new("Retail", "Cooperative", "Texas"));
    }
}
