//! Feedback-to-reward mapping
//!
//! Deterministic map from a user action to the scalar reward driving the
//! posterior update. Cooking a recipe is the strongest signal and dominates
//! whatever vote accompanied it.

use crate::models::FeedbackType;

pub const REWARD_COOKED: f64 = 2.0;
pub const REWARD_UPVOTE: f64 = 1.0;
pub const REWARD_DOWNVOTE: f64 = -1.0;
pub const REWARD_SKIP: f64 = 0.0;

/// Map a feedback action to its reward. `is_cooked` overrides the vote.
pub fn reward_for(feedback: FeedbackType, is_cooked: bool) -> f64 {
    if is_cooked || feedback == FeedbackType::Cooked {
        return REWARD_COOKED;
    }
    match feedback {
        FeedbackType::Upvote => REWARD_UPVOTE,
        FeedbackType::Downvote => REWARD_DOWNVOTE,
        FeedbackType::Skip => REWARD_SKIP,
        FeedbackType::Cooked => REWARD_COOKED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_mapping() {
        assert_eq!(reward_for(FeedbackType::Upvote, false), 1.0);
        assert_eq!(reward_for(FeedbackType::Downvote, false), -1.0);
        assert_eq!(reward_for(FeedbackType::Skip, false), 0.0);
        assert_eq!(reward_for(FeedbackType::Cooked, false), 2.0);
    }

    #[test]
    fn test_cooked_dominates_vote() {
        assert_eq!(reward_for(FeedbackType::Upvote, true), 2.0);
        assert_eq!(reward_for(FeedbackType::Downvote, true), 2.0);
        assert_eq!(reward_for(FeedbackType::Skip, true), 2.0);
    }
}
