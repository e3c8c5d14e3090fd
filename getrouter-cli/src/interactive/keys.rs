//! Key pickers and the prompts of `getrouter keys`.

use std::collections::HashMap;

use anyhow::Result;
use getrouter_core::{sort_consumers_by_updated_at_desc, Consumer, UNNAMED_CONSUMER};
use getrouter_fetch::{services, ApiClient};

use super::fuzzy::FuzzyChoice;
use super::prompt::Prompter;

/// Printed when the account has no keys to pick from.
pub const NO_KEYS_MESSAGE: &str =
    "No available API keys. Create one at https://getrouter.dev/dashboard/keys";

/// Message of the fuzzy key picker.
pub const SEARCH_KEYS_PROMPT: &str = "🔎 Search keys";

/// Picker labels for `consumers`, in order.
///
/// A key shows its name; duplicated names and unnamed keys also show their
/// timestamp so entries can be told apart.
pub fn consumer_choice_labels(consumers: &[Consumer]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for consumer in consumers {
        *counts.entry(consumer.display_name()).or_default() += 1;
    }

    consumers
        .iter()
        .map(|consumer| {
            let name = consumer.display_name();
            if counts.get(name).copied().unwrap_or_default() > 1 || name == UNNAMED_CONSUMER {
                format!("{name} ({})", consumer.display_timestamp())
            } else {
                name.to_string()
            }
        })
        .collect()
}

/// Fuzzy entries for `consumers`, searchable by name and timestamps.
pub fn consumer_fuzzy_choices(consumers: &[Consumer]) -> Vec<FuzzyChoice> {
    consumer_choice_labels(consumers)
        .into_iter()
        .zip(consumers)
        .map(|(label, consumer)| {
            let keywords = [
                Some(consumer.display_name()),
                consumer.updated_at.as_deref(),
                consumer.created_at.as_deref(),
            ]
            .into_iter()
            .flatten()
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();
            FuzzyChoice::new(label).with_keywords(keywords)
        })
        .collect()
}

/// All keys, newest first. Prints [`NO_KEYS_MESSAGE`] when there are none.
async fn sorted_consumers(client: &ApiClient) -> Result<Vec<Consumer>> {
    let mut consumers = services::list_all_consumers(client).await?;
    if consumers.is_empty() {
        println!("{NO_KEYS_MESSAGE}");
    }
    sort_consumers_by_updated_at_desc(&mut consumers);
    Ok(consumers)
}

/// Lets the user search for a key. `None` when there are no keys or the
/// user cancels.
pub async fn select_consumer(
    client: &ApiClient,
    prompter: &mut dyn Prompter,
) -> Result<Option<Consumer>> {
    let mut consumers = sorted_consumers(client).await?;
    if consumers.is_empty() {
        return Ok(None);
    }
    let choices = consumer_fuzzy_choices(&consumers);
    Ok(prompter
        .fuzzy_select(SEARCH_KEYS_PROMPT, &choices)
        .map(|index| consumers.swap_remove(index)))
}

/// Lets the user pick a key from a plain list.
pub async fn select_consumer_from_list(
    client: &ApiClient,
    prompter: &mut dyn Prompter,
    message: &str,
) -> Result<Option<Consumer>> {
    let mut consumers = sorted_consumers(client).await?;
    if consumers.is_empty() {
        return Ok(None);
    }
    let labels = consumer_choice_labels(&consumers);
    Ok(prompter
        .select(message, &labels)
        .map(|index| consumers.swap_remove(index)))
}

/// Asks for a key name. The outer `None` is a cancel; the inner one an empty
/// answer.
pub fn prompt_key_name(
    prompter: &mut dyn Prompter,
    initial: Option<&str>,
) -> Option<Option<String>> {
    let answer = prompter.text("Key name", initial.unwrap_or_default())?;
    let trimmed = answer.trim();
    Some((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Asks whether the key should be enabled.
pub fn prompt_key_enabled(prompter: &mut dyn Prompter, initial: bool) -> Option<bool> {
    prompter.confirm("Enable this key?", initial)
}

/// Asks to confirm deleting `consumer`. Cancel counts as no.
pub fn confirm_delete(prompter: &mut dyn Prompter, consumer: &Consumer) -> bool {
    let name = consumer.name.as_deref().unwrap_or("-");
    let id = consumer.id.as_deref().unwrap_or("-");
    prompter
        .confirm(&format!("⚠️ Confirm delete {name} ({id})?"), false)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactive::{Answer, ScriptedPrompter};

    fn consumer(name: Option<&str>, updated_at: &str) -> Consumer {
        Consumer {
            id: Some(format!("id-{updated_at}")),
            name: name.map(str::to_string),
            updated_at: Some(updated_at.to_string()),
            ..Consumer::default()
        }
    }

    #[test]
    fn test_labels_disambiguate_duplicates_and_unnamed() {
        let consumers = vec![
            consumer(Some("dev"), "2026-01-02T00:00:00Z"),
            consumer(Some("dev"), "2026-01-01T00:00:00Z"),
            consumer(Some("ci"), "2026-01-03T00:00:00Z"),
            consumer(Some("  "), "2026-01-04T00:00:00Z"),
        ];
        assert_eq!(
            consumer_choice_labels(&consumers),
            vec![
                "dev (2026-01-02T00:00:00Z)",
                "dev (2026-01-01T00:00:00Z)",
                "ci",
                "(unnamed) (2026-01-04T00:00:00Z)",
            ]
        );
    }

    #[test]
    fn test_fuzzy_keywords() {
        let consumers = vec![consumer(Some("dev"), "2026-01-02T00:00:00Z")];
        let choices = consumer_fuzzy_choices(&consumers);
        assert_eq!(choices[0].keywords, vec!["dev", "2026-01-02T00:00:00Z"]);
    }

    #[test]
    fn test_prompt_key_name() {
        let mut prompter = ScriptedPrompter::new([
            Answer::Text("  prod  ".into()),
            Answer::Text("   ".into()),
            Answer::Cancel,
        ]);
        assert_eq!(prompt_key_name(&mut prompter, None), Some(Some("prod".into())));
        assert_eq!(prompt_key_name(&mut prompter, None), Some(None));
        assert_eq!(prompt_key_name(&mut prompter, None), None);
    }

    #[test]
    fn test_confirm_delete_message() {
        let mut prompter = ScriptedPrompter::new([Answer::Confirm(true)]);
        let target = Consumer {
            id: Some("c1".into()),
            name: Some("dev".into()),
            ..Consumer::default()
        };
        assert!(confirm_delete(&mut prompter, &target));
        assert_eq!(prompter.asked, vec!["⚠️ Confirm delete dev (c1)?"]);

        // Cancel is treated as no.
        assert!(!confirm_delete(&mut prompter, &target));
    }
}
