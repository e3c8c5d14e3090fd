//! Subsequence search used by the pickers.

/// Most entries a search returns.
pub const DEFAULT_LIMIT: usize = 50;

/// One searchable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyChoice {
    /// Text shown for the entry.
    pub title: String,
    /// Extra terms that also match.
    pub keywords: Vec<String>,
    /// Optional one-line help.
    pub description: Option<String>,
}

impl FuzzyChoice {
    /// Entry with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            keywords: Vec::new(),
            description: None,
        }
    }

    /// Adds search keywords.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn search_text(&self) -> Vec<char> {
        let mut text = self.title.clone();
        for keyword in &self.keywords {
            text.push(' ');
            text.push_str(keyword);
        }
        text.trim().to_lowercase().chars().collect()
    }
}

/// Sum of the positions at which `query` occurs in order inside `target`,
/// or `None` when it is not a subsequence. Lower is better.
fn fuzzy_score(query: &[char], target: &[char]) -> Option<usize> {
    let mut score = 0;
    let mut from = 0;
    for ch in query {
        let index = from + target.get(from..)?.iter().position(|c| c == ch)?;
        score += index;
        from = index + 1;
    }
    Some(score)
}

/// Indices of the choices matching `input`, best first, at most `limit`.
///
/// An empty query keeps the original order. Equal scores are ordered by
/// title.
pub fn rank_fuzzy_choices(choices: &[FuzzyChoice], input: &str, limit: usize) -> Vec<usize> {
    let query: Vec<char> = input.trim().to_lowercase().chars().collect();
    if query.is_empty() {
        return (0..choices.len().min(limit)).collect();
    }

    let mut ranked: Vec<(usize, usize)> = choices
        .iter()
        .enumerate()
        .filter_map(|(index, choice)| {
            fuzzy_score(&query, &choice.search_text()).map(|score| (index, score))
        })
        .collect();
    ranked.sort_by(|(a, a_score), (b, b_score)| {
        a_score
            .cmp(b_score)
            .then_with(|| choices[*a].title.cmp(&choices[*b].title))
    });
    ranked.into_iter().take(limit).map(|(index, _)| index).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(choices: &[FuzzyChoice], ranked: &[usize]) -> Vec<String> {
        ranked.iter().map(|&i| choices[i].title.clone()).collect()
    }

    #[test]
    fn test_empty_query_keeps_order() {
        let choices: Vec<_> = ["b", "a", "c"].into_iter().map(FuzzyChoice::new).collect();
        assert_eq!(rank_fuzzy_choices(&choices, "  ", 50), vec![0, 1, 2]);
        assert_eq!(rank_fuzzy_choices(&choices, "", 2), vec![0, 1]);
    }

    #[test]
    fn test_subsequence_match_and_score() {
        let choices = vec![
            FuzzyChoice::new("gpt-5.2"),
            FuzzyChoice::new("gpt-5.2-codex"),
            FuzzyChoice::new("gpt-5.1-codex-mini"),
        ];
        // Same positions in both, so the title breaks the tie.
        let ranked = rank_fuzzy_choices(&choices, "codex", 50);
        assert_eq!(titles(&choices, &ranked), vec!["gpt-5.1-codex-mini", "gpt-5.2-codex"]);

        let ranked = rank_fuzzy_choices(&choices, "52", 50);
        assert_eq!(titles(&choices, &ranked), vec!["gpt-5.2", "gpt-5.2-codex"]);
    }

    #[test]
    fn test_keywords_match() {
        let choices = vec![
            FuzzyChoice::new("Medium (default)").with_keywords(["medium", "medium"]),
            FuzzyChoice::new("Extra high").with_keywords(["extra_high", "xhigh"]),
        ];
        let ranked = rank_fuzzy_choices(&choices, "XHIGH", 50);
        assert_eq!(titles(&choices, &ranked), vec!["Extra high"]);
    }

    #[test]
    fn test_ties_sorted_by_title() {
        let choices = vec![FuzzyChoice::new("ab"), FuzzyChoice::new("aa")];
        assert_eq!(rank_fuzzy_choices(&choices, "a", 50), vec![1, 0]);
    }

    #[test]
    fn test_score_sums_positions() {
        let target: Vec<char> = "abcabc".chars().collect();
        assert_eq!(fuzzy_score(&['a', 'c'], &target), Some(2));
        assert_eq!(fuzzy_score(&['c', 'a'], &target), Some(5));
        assert_eq!(fuzzy_score(&['z'], &target), None);
    }
}
