//! Topic naming

use herald_core::partner_complete_topic;

/// Topics for lifecycle signals
///
/// Logical names give:
/// - Clear signal categorization
/// - Easy migration to an external bus later
/// - Readable debug logs
pub struct Topics;

impl Topics {
    /// Completion signal for a partner: `plugin.prebid.complete`
    pub fn partner_complete(partner: &str) -> String {
        partner_complete_topic(partner)
    }

    /// A topic is usable if it has any non-whitespace content
    pub fn is_valid(topic: &str) -> bool {
        !topic.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topics() {
        assert_eq!(Topics::partner_complete("cmp"), "plugin.cmp.complete");
        assert_eq!(
            Topics::partner_complete("amazonaps"),
            "plugin.amazonaps.complete"
        );
    }

    #[test]
    fn test_topic_validation() {
        assert!(Topics::is_valid("plugin.cmp.complete"));
        assert!(!Topics::is_valid(""));
        assert!(!Topics::is_valid("   "));
    }
}
