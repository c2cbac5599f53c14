//! Combines per-branch rubric results into one score.
//!
//! Tiers are scored in order. A tier adds its weight scaled by the fraction
//! of points earned, and the next tier is only reached when every field of
//! the current one is fully earned across all branches.

use crate::checks::TierMetadata;
use crate::error::{GuardError, Result};

use super::evaluator::{LevelScore, ScoresInfo};

pub const BASIC_WEIGHT: u8 = 3;
pub const REVIEW_WEIGHT: u8 = 3;
pub const CONTEXT_WEIGHT: u8 = 2;
pub const THOROUGH_REVIEW_WEIGHT: u8 = 1;
pub const ADMIN_THOROUGH_REVIEW_WEIGHT: u8 = 1;

/// A single `ScoresInfo` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Basic,
    AdminBasic,
    Review,
    AdminReview,
    Context,
    ThoroughReview,
    AdminThoroughReview,
}

impl Field {
    fn get(self, info: &ScoresInfo) -> u32 {
        match self {
            Self::Basic => info.basic,
            Self::AdminBasic => info.admin_basic,
            Self::Review => info.review,
            Self::AdminReview => info.admin_review,
            Self::Context => info.context,
            Self::ThoroughReview => info.thorough_review,
            Self::AdminThoroughReview => info.admin_thorough_review,
        }
    }

    /// `(score, max)` summed over all branches.
    fn sum(self, scores: &[LevelScore]) -> (u32, u32) {
        scores.iter().fold((0, 0), |(score, max), level| {
            (score + self.get(&level.scores), max + self.get(&level.maxes))
        })
    }
}

/// Scoring state: the tier about to be scored, or `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Basic,
    Review,
    Context,
    ThoroughReview,
    AdminThoroughReview,
    Done,
}

impl Tier {
    /// Every scoring tier in evaluation order.
    pub const ALL: [Tier; 5] = [
        Tier::Basic,
        Tier::Review,
        Tier::Context,
        Tier::ThoroughReview,
        Tier::AdminThoroughReview,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Review => "review",
            Self::Context => "context",
            Self::ThoroughReview => "thorough review",
            Self::AdminThoroughReview => "admin thorough review",
            Self::Done => "done",
        }
    }

    pub fn weight(self) -> u8 {
        match self {
            Self::Basic => BASIC_WEIGHT,
            Self::Review => REVIEW_WEIGHT,
            Self::Context => CONTEXT_WEIGHT,
            Self::ThoroughReview => THOROUGH_REVIEW_WEIGHT,
            Self::AdminThoroughReview => ADMIN_THOROUGH_REVIEW_WEIGHT,
            Self::Done => 0,
        }
    }

    /// Fields pooled into this tier. The tier passes only if each of them is
    /// fully earned on its own.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::Basic => &[Field::Basic, Field::AdminBasic],
            Self::Review => &[Field::Review, Field::AdminReview],
            Self::Context => &[Field::Context],
            Self::ThoroughReview => &[Field::ThoroughReview],
            Self::AdminThoroughReview => &[Field::AdminThoroughReview],
            Self::Done => &[],
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Basic => Self::Review,
            Self::Review => Self::Context,
            Self::Context => Self::ThoroughReview,
            Self::ThoroughReview => Self::AdminThoroughReview,
            Self::AdminThoroughReview | Self::Done => Self::Done,
        }
    }

    pub fn metadata() -> Vec<TierMetadata> {
        Self::ALL
            .iter()
            .map(|tier| TierMetadata {
                name: tier.name().into(),
                weight: tier.weight(),
            })
            .collect()
    }
}

/// Scale `score / max` to `weight`. A tier with nothing to score earns the
/// full weight.
pub fn normalize(score: u32, max: u32, weight: u8) -> f64 {
    if max == 0 {
        return f64::from(weight);
    }
    f64::from(score) * f64::from(weight) / f64::from(max)
}

/// Final score in `[0, 10]`, truncated toward zero.
pub fn compute_score(scores: &[LevelScore]) -> Result<u8> {
    if scores.is_empty() {
        return Err(GuardError::Internal("scores are empty".into()));
    }

    let mut total = 0.0;
    let mut tier = Tier::Basic;

    while tier != Tier::Done {
        let sums: Vec<(u32, u32)> = tier.fields().iter().map(|f| f.sum(scores)).collect();
        let (score, max) = sums
            .iter()
            .fold((0u32, 0u32), |(s, m), (score, max)| (s + score, m + max));
        total += normalize(score, max, tier.weight());

        tracing::debug!(tier = tier.name(), score, max, total, "scored tier");

        if sums.iter().any(|(score, max)| score != max) {
            break;
        }
        tier = tier.next();
    }

    Ok(total as u8)
}
