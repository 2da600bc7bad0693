use serde::{Deserialize, Serialize};

/// Upper bound on the questions shown to a candidate.
pub const MAX_QUESTIONS: usize = 5;

/// An ordered, de-duplicated list of at most `MAX_QUESTIONS` trimmed, non-empty questions.
///
/// The only constructor is `normalize`, so every value upholds those rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSet(Vec<String>);

impl QuestionSet {
    /// Trims every question, drops blanks, keeps the first copy of exact duplicates and
    /// truncates to `MAX_QUESTIONS`.
    pub fn normalize<I, S>(questions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::with_capacity(MAX_QUESTIONS);
        for q in questions {
            if unique.len() == MAX_QUESTIONS {
                break;
            }
            let q = q.as_ref().trim();
            if !q.is_empty() && !unique.iter().any(|u| u == q) {
                unique.push(q.to_string());
            }
        }
        Self(unique)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_drops_blank_entries() {
        let set = QuestionSet::normalize(["  What is a trait? ", "", "   ", "\tWhy async?\n"]);
        assert_eq!(set.as_slice(), ["What is a trait?", "Why async?"]);
    }

    #[test]
    fn test_dedup_after_trim_keeps_first_seen_order() {
        let set = QuestionSet::normalize(["B", "A", " B ", "C", "A"]);
        assert_eq!(set.as_slice(), ["B", "A", "C"]);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let set = QuestionSet::normalize(["Explain lifetimes.", "explain lifetimes."]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_truncates_to_max() {
        let set = QuestionSet::normalize((1..=9).map(|i| format!("Question {i}")));
        assert_eq!(set.len(), MAX_QUESTIONS);
        assert_eq!(set.as_slice()[4], "Question 5");
    }

    #[test]
    fn test_duplicates_do_not_consume_slots() {
        let set = QuestionSet::normalize(["a", "a", "a", "b", "c", "d", "e", "f"]);
        assert_eq!(set.as_slice(), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let set = QuestionSet::normalize(["x", "y"]);
        assert_eq!(serde_json::to_string(&set).unwrap(), r#"["x","y"]"#);
    }
}
