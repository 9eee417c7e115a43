use serde::{Deserialize, Serialize};

/// Rubric dials for the rule scorer. Point weights are fixed; the message gates are tunable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricConfig {
    /// Use-case phrasing only earns points once the message is longer than this.
    pub use_case_min_message_chars: usize,
    /// Decision-maker + budget override requires a message longer than this.
    pub override_min_message_chars: usize,
}

impl Default for RubricConfig {
    fn default() -> Self {
        Self {
            use_case_min_message_chars: 50,
            override_min_message_chars: 100,
        }
    }
}
