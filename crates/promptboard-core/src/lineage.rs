//! Prompt lineage: the ordered history of prompts behind an image.

use serde::{Deserialize, Serialize};

/// One prompt in a lineage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptEntry {
    /// Prompt text as typed by the user.
    pub prompt: String,
    /// Version this prompt produced.
    pub version: u32,
    /// Creation time in milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// Append-only prompt history.
///
/// Every image carries the full lineage it descends from, its own entry last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lineage(Vec<PromptEntry>);

impl Lineage {
    /// Create an empty lineage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in creation order.
    pub fn entries(&self) -> &[PromptEntry] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&PromptEntry> {
        self.0.last()
    }

    /// Return a copy of this lineage with one more entry appended.
    pub fn extended(&self, prompt: impl Into<String>, version: u32, timestamp: u64) -> Self {
        let mut entries = self.0.clone();
        entries.push(PromptEntry {
            prompt: prompt.into(),
            version,
            timestamp,
        });
        Self(entries)
    }

    /// Compact transcript, one `v{n}: {prompt}` line per entry.
    pub fn transcript(&self) -> String {
        self.0
            .iter()
            .map(|entry| format!("v{}: {}", entry.version, entry.prompt))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Prompt sent to the generator: the transcript followed by the new prompt.
    ///
    /// An empty lineage sends the prompt unchanged.
    pub fn contextual_prompt(&self, prompt: &str) -> String {
        if self.is_empty() {
            prompt.to_string()
        } else {
            format!("Previous versions:\n{}\n\nNew version: {}", self.transcript(), prompt)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_is_append_only() {
        let base = Lineage::new().extended("cat", 1, 10);
        let next = base.extended("cat wearing hat", 2, 20);

        assert_eq!(base.len(), 1);
        assert_eq!(next.len(), 2);
        assert_eq!(next.entries()[0], base.entries()[0]);
        assert_eq!(next.latest().map(|e| e.version), Some(2));
    }

    #[test]
    fn test_transcript() {
        let lineage = Lineage::new().extended("cat", 1, 0).extended("cat wearing hat", 2, 0);
        assert_eq!(lineage.transcript(), "v1: cat\nv2: cat wearing hat");
    }

    #[test]
    fn test_contextual_prompt_without_history() {
        assert_eq!(Lineage::new().contextual_prompt("cat"), "cat");
    }

    #[test]
    fn test_contextual_prompt_with_history() {
        let lineage = Lineage::new().extended("cat", 1, 0);
        assert_eq!(
            lineage.contextual_prompt("cat wearing hat"),
            "Previous versions:\nv1: cat\n\nNew version: cat wearing hat"
        );
    }
}
