//! Branch name generation
//!
//! One request in, one branch name out: build the prompt, ask the provider
//! once, normalize whatever comes back.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::ai::normalize;
use crate::ai::prompts;
use crate::ai::provider::CompletionProvider;
use crate::core::branch_type::BranchTag;
use crate::error::{FlownameError, Result};

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Free-text task description (never blank)
    pub description: String,
    /// Prefix of the generated name; not limited to the registry
    pub branch_type: BranchTag,
    /// Ticket or issue id, e.g. `JIRA-123`
    pub work_item_id: Option<String>,
}

impl GenerationRequest {
    /// Build a request, trimming inputs and rejecting a blank description
    ///
    /// A blank work item id is treated as absent.
    pub fn new(
        description: &str,
        branch_type: impl Into<BranchTag>,
        work_item_id: Option<&str>,
    ) -> Result<Self> {
        let description = description.trim();
        if description.is_empty() {
            return Err(FlownameError::InvalidInput(
                "Description is required".to_string(),
            ));
        }

        let work_item_id = work_item_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        Ok(Self {
            description: description.to_string(),
            branch_type: branch_type.into(),
            work_item_id,
        })
    }
}

/// Generated branch name with the model's reasoning
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub branch_name: String,
    pub explanation: String,
}

/// Turns generation requests into branch names using a completion provider
#[derive(Clone)]
pub struct BranchNameGenerator {
    provider: Arc<dyn CompletionProvider>,
}

impl BranchNameGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Generate a branch name for a request
    ///
    /// Model output with nothing usable comes back as a bare `<type>/`; that is
    /// logged but not treated as a failure.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let prompt = prompts::branch_name_prompt(request);
        debug!(
            branch_type = %request.branch_type,
            registered = request.branch_type.known().is_some(),
            work_item = request.work_item_id.as_deref().unwrap_or("-"),
            "Requesting branch name"
        );

        let raw = self.provider.complete(&prompt).await?;
        let result = normalize::parse_response(&raw, &request.branch_type);

        if normalize::is_valid_branch_name(&result.branch_name, &request.branch_type) {
            info!(branch = %result.branch_name, "Generated branch name");
        } else {
            warn!(
                raw_chars = raw.len(),
                branch = %result.branch_name,
                "Model output normalized to an empty branch name"
            );
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::MockCompletionProvider;
    use crate::core::branch_type::BranchType;

    fn generator_returning(text: &'static str) -> BranchNameGenerator {
        let mut mock = MockCompletionProvider::new();
        mock.expect_complete()
            .times(1)
            .returning(move |_| Ok(text.to_string()));
        BranchNameGenerator::new(Arc::new(mock))
    }

    #[test]
    fn test_request_trims_and_validates() {
        let req = GenerationRequest::new("  Add dark mode \n", BranchType::Feature, Some("  ")).unwrap();
        assert_eq!(req.description, "Add dark mode");
        assert_eq!(req.work_item_id, None);

        let req = GenerationRequest::new("x", BranchType::Bugfix, Some(" JIRA-1 ")).unwrap();
        assert_eq!(req.work_item_id.as_deref(), Some("JIRA-1"));

        assert!(matches!(
            GenerationRequest::new(" \t\n", BranchType::Feature, None),
            Err(FlownameError::InvalidInput(msg)) if msg == "Description is required"
        ));
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = GenerationResult {
            branch_name: "feature/dark-mode".into(),
            explanation: "Clear.".into(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["branchName"], "feature/dark-mode");
        assert_eq!(json["explanation"], "Clear.");
    }

    #[tokio::test]
    async fn test_generate_normalizes_model_output() {
        let generator = generator_returning("BRANCH: Feature/Dark_Mode\nEXPLANATION: Clear.");
        let req = GenerationRequest::new("Add dark mode", BranchType::Feature, None).unwrap();

        let result = generator.generate(&req).await.unwrap();
        assert_eq!(result.branch_name, "feature/dark-mode");
        assert_eq!(result.explanation, "Clear.");
    }

    #[tokio::test]
    async fn test_generate_sends_built_prompt() {
        let mut mock = MockCompletionProvider::new();
        mock.expect_complete()
            .withf(|prompt| {
                prompt.contains("Task Description: \"Fix login\"")
                    && prompt.contains("Follow pattern: bugfix/ticket-456-descriptive-name")
            })
            .times(1)
            .returning(|_| Ok("BRANCH: bugfix/ticket-456-login".to_string()));
        let generator = BranchNameGenerator::new(Arc::new(mock));

        let req = GenerationRequest::new("Fix login", BranchType::Bugfix, Some("TICKET-456")).unwrap();
        let result = generator.generate(&req).await.unwrap();
        assert_eq!(result.branch_name, "bugfix/ticket-456-login");
        assert_eq!(result.explanation, normalize::DEFAULT_EXPLANATION);
    }

    #[tokio::test]
    async fn test_generate_returns_empty_slug_as_is() {
        let generator = generator_returning("BRANCH: ???\nEXPLANATION: nothing");
        let req = GenerationRequest::new("Something", BranchType::Hotfix, None).unwrap();

        let result = generator.generate(&req).await.unwrap();
        assert_eq!(result.branch_name, "hotfix/");
        assert_eq!(result.explanation, "nothing");
    }

    #[tokio::test]
    async fn test_generate_with_unregistered_type() {
        let mut mock = MockCompletionProvider::new();
        mock.expect_complete()
            .withf(|prompt| prompt.contains("Branch Type: chore"))
            .times(1)
            .returning(|_| Ok("BRANCH: chore/Bump Serde\nEXPLANATION: Routine.".to_string()));
        let generator = BranchNameGenerator::new(Arc::new(mock));

        let req = GenerationRequest::new("Bump serde", BranchTag::parse("Chore"), None).unwrap();
        let result = generator.generate(&req).await.unwrap();
        assert_eq!(result.branch_name, "chore/bump-serde");
    }

    #[tokio::test]
    async fn test_generate_propagates_provider_errors() {
        let mut mock = MockCompletionProvider::new();
        mock.expect_complete().returning(|_| {
            Err(FlownameError::Upstream {
                status: 401,
                message: "Invalid API key".into(),
            })
        });
        let generator = BranchNameGenerator::new(Arc::new(mock));
        let req = GenerationRequest::new("Something", BranchType::Feature, None).unwrap();

        assert!(matches!(
            generator.generate(&req).await,
            Err(FlownameError::Upstream { status: 401, .. })
        ));
    }
}
