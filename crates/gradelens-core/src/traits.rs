//! Pluggable topic classification for knowledge-gap detection.

/// Maps an assessment name to the topic it exercises.
pub trait TopicClassifier: Send + Sync {
    /// Human-readable classifier name (e.g. "keyword").
    fn name(&self) -> &str;

    /// Topic for an assessment name.
    fn classify(&self, assessment_name: &str) -> String;
}

/// Topics recognised by [`KeywordClassifier::default`].
pub const DEFAULT_TOPICS: [&str; 4] = ["algebra", "geometry", "calculus", "statistics"];

/// Topic used when no keyword matches.
pub const FALLBACK_TOPIC: &str = "general";

/// Case-insensitive substring scan over a keyword list; the first keyword
/// found in the name wins.
///
/// This is a crude rule of thumb, not topic modelling. Swap in another
/// [`TopicClassifier`] for anything smarter.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    keywords: Vec<String>,
    fallback: String,
}

impl KeywordClassifier {
    /// Classifier over a custom keyword list.
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
            fallback: FALLBACK_TOPIC.to_string(),
        }
    }

    /// Override the topic used when nothing matches.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOPICS)
    }
}

impl TopicClassifier for KeywordClassifier {
    fn name(&self) -> &str {
        "keyword"
    }

    fn classify(&self, assessment_name: &str) -> String {
        let lowered = assessment_name.to_lowercase();
        self.keywords
            .iter()
            .find(|keyword| lowered.contains(keyword.as_str()))
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }
}
