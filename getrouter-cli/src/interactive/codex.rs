//! Model and reasoning choices for `getrouter codex`.

use getrouter_fetch::{services, ApiClient};
use tracing::debug;

use super::fuzzy::FuzzyChoice;

/// Message of the model picker.
pub const MODEL_PROMPT: &str = "Select Model and Effort\nAccess legacy models by running getrouter codex -m <model_name> or in your config.toml";

/// Built-in models: `(id, description)`.
const BUILTIN_MODELS: &[(&str, &str)] = &[
    ("gpt-5.2-codex", "Latest frontier agentic coding model."),
    (
        "gpt-5.1-codex-max",
        "Codex-optimized flagship for deep and fast reasoning.",
    ),
    (
        "gpt-5.1-codex-mini",
        "Optimized for codex. Cheaper, faster, but less capable.",
    ),
    (
        "gpt-5.2",
        "Latest frontier model with improvements across knowledge, reasoning and coding.",
    ),
];

/// One reasoning effort option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReasoningChoice {
    /// Picker id.
    pub id: &'static str,
    /// Label shown to the user.
    pub label: &'static str,
    /// Value written to `model_reasoning_effort`.
    pub value: &'static str,
    /// Help text.
    pub description: &'static str,
}

/// Reasoning options, deepest first.
pub const REASONING_CHOICES: &[ReasoningChoice] = &[
    ReasoningChoice {
        id: "extra_high",
        label: "Extra high",
        value: "xhigh",
        description: "Extra high reasoning depth for complex problems. Warning: Extra high reasoning effort can quickly consume Plus plan rate limits.",
    },
    ReasoningChoice {
        id: "high",
        label: "High",
        value: "high",
        description: "Greater reasoning depth for complex problems",
    },
    ReasoningChoice {
        id: "medium",
        label: "Medium (default)",
        value: "medium",
        description: "Balances speed and reasoning depth for everyday tasks",
    },
    ReasoningChoice {
        id: "low",
        label: "Low",
        value: "low",
        description: "Fast responses with lighter reasoning",
    },
];

/// Value used when a reasoning id is unknown.
pub const DEFAULT_REASONING: &str = "medium";

/// The built-in model list as picker entries.
pub fn builtin_model_choices() -> Vec<FuzzyChoice> {
    BUILTIN_MODELS
        .iter()
        .map(|(id, description)| {
            let mut keywords = vec![(*id).to_string()];
            if id.contains("codex") {
                keywords.push("codex".to_string());
            }
            FuzzyChoice::new(*id)
                .with_keywords(keywords)
                .with_description(*description)
        })
        .collect()
}

/// Models tagged `codex` on the server, newest last in the response so the
/// list is reversed. Falls back to [`builtin_model_choices`] on any error or
/// an empty answer.
pub async fn codex_model_choices(client: &ApiClient) -> Vec<FuzzyChoice> {
    match services::list_provider_models(client, Some("codex")).await {
        Ok(models) if !models.is_empty() => models
            .into_iter()
            .rev()
            .map(|model| {
                FuzzyChoice::new(model.clone()).with_keywords([model, "codex".to_string()])
            })
            .collect(),
        Ok(_) => builtin_model_choices(),
        Err(e) => {
            debug!(error = %e, "Remote model list unavailable, using built-in list");
            builtin_model_choices()
        }
    }
}

/// Reasoning options as picker entries, in [`REASONING_CHOICES`] order.
pub fn reasoning_fuzzy_choices() -> Vec<FuzzyChoice> {
    REASONING_CHOICES
        .iter()
        .map(|choice| {
            FuzzyChoice::new(choice.label)
                .with_keywords([choice.id, choice.value])
                .with_description(choice.description)
        })
        .collect()
}

/// Config value for a picker id; unknown ids give `medium`.
pub fn map_reasoning_value(id: &str) -> &'static str {
    REASONING_CHOICES
        .iter()
        .find(|choice| choice.id == id)
        .map_or(DEFAULT_REASONING, |choice| choice.value)
}

/// Label for a picker id, or the id itself when unknown.
pub fn reasoning_label(id: &str) -> &str {
    REASONING_CHOICES
        .iter()
        .find(|choice| choice.id == id)
        .map_or(id, |choice| choice.label)
}

/// Message of the reasoning picker.
pub fn reasoning_prompt(model: &str) -> String {
    format!("Select Reasoning Level for {model}")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use getrouter_fetch::{MemoryTokenStore, RetryStrategy};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> ApiClient {
        ApiClient::new(server.uri(), Arc::new(MemoryTokenStore::default()))
            .unwrap()
            .with_retry_strategy(RetryStrategy::no_retry())
    }

    #[test]
    fn test_map_reasoning_value() {
        assert_eq!(map_reasoning_value("extra_high"), "xhigh");
        assert_eq!(map_reasoning_value("high"), "high");
        assert_eq!(map_reasoning_value("low"), "low");
        assert_eq!(map_reasoning_value("bogus"), "medium");
    }

    #[test]
    fn test_reasoning_label() {
        assert_eq!(reasoning_label("extra_high"), "Extra high");
        assert_eq!(reasoning_label("medium"), "Medium (default)");
        assert_eq!(reasoning_label("custom"), "custom");
    }

    #[test]
    fn test_reasoning_choices_search_by_value() {
        let choices = reasoning_fuzzy_choices();
        let ranked = super::super::fuzzy::rank_fuzzy_choices(&choices, "xhigh", 50);
        assert_eq!(choices[ranked[0]].title, "Extra high");
    }

    #[test]
    fn test_builtin_keywords() {
        let choices = builtin_model_choices();
        assert_eq!(choices.len(), 4);
        assert_eq!(choices[0].keywords, vec!["gpt-5.2-codex", "codex"]);
        assert_eq!(choices[3].keywords, vec!["gpt-5.2"]);
    }

    #[tokio::test]
    async fn test_remote_models_reversed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/dashboard/providers/models"))
            .and(query_param("tag", "codex"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": ["gpt-a", "gpt-b"]
            })))
            .mount(&server)
            .await;

        let choices = codex_model_choices(&client(&server)).await;
        let titles: Vec<_> = choices.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["gpt-b", "gpt-a"]);
    }

    #[tokio::test]
    async fn test_falls_back_on_error_or_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/dashboard/providers/models"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        assert_eq!(codex_model_choices(&client(&server)).await, builtin_model_choices());

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/dashboard/providers/models"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "models": [] })),
            )
            .mount(&server)
            .await;
        assert_eq!(codex_model_choices(&client(&server)).await, builtin_model_choices());
    }
}
