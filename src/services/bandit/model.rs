//! Beta-Bernoulli Thompson Sampling over recipe categories
//!
//! One model per user. Each category (arm) keeps Beta posterior shape
//! parameters updated from normalized rewards, plus a small linear weight map
//! that lets pantry context nudge the sampled score. Cold-start exploration
//! is epsilon-greedy on a stepped schedule that decays with total pulls.

use super::context::{PantryContext, FEATURE_NAMES};
use super::taxonomy::Category;
use super::{BanditError, Result};
use crate::models::FeedbackType;
use crate::services::bandit::reward::reward_for;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Beta, Distribution};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;
use tracing::debug;

/// Uniform prior for every arm.
pub const PRIOR_ALPHA: f64 = 1.0;
pub const PRIOR_BETA: f64 = 1.0;

/// Starting weight for every context feature.
const INITIAL_CONTEXT_WEIGHT: f64 = 0.05;

/// Context weights stay inside [-LIMIT, LIMIT].
const CONTEXT_WEIGHT_LIMIT: f64 = 1.0;

/// Tunable policy parameters for selection and learning.
#[derive(Debug, Clone)]
pub struct BanditConfig {
    /// Total pulls below which the model reports cold start.
    pub cold_start_pulls: u64,
    /// Total pulls at which exploration settles to its floor.
    pub settled_pulls: u64,
    pub epsilon_cold: f64,
    pub epsilon_warming: f64,
    pub epsilon_settled: f64,
    /// Step size for the heuristic context-weight adjustment.
    pub learning_rate: f64,
}

impl Default for BanditConfig {
    fn default() -> Self {
        BanditConfig {
            cold_start_pulls: 10,
            settled_pulls: 50,
            epsilon_cold: 0.3,
            epsilon_warming: 0.2,
            epsilon_settled: 0.1,
            learning_rate: 0.01,
        }
    }
}

impl BanditConfig {
    pub fn validate(&self) -> Result<()> {
        let epsilons = [
            self.epsilon_cold,
            self.epsilon_warming,
            self.epsilon_settled,
        ];
        if epsilons.iter().any(|e| !(0.0..=1.0).contains(e)) {
            return Err(BanditError::InvalidConfig(
                "exploration rates must lie in [0, 1]".to_string(),
            ));
        }
        // The schedule must never explore more as the user accrues pulls.
        if self.epsilon_cold < self.epsilon_warming || self.epsilon_warming < self.epsilon_settled
        {
            return Err(BanditError::InvalidConfig(
                "exploration schedule must be non-increasing".to_string(),
            ));
        }
        if self.cold_start_pulls > self.settled_pulls {
            return Err(BanditError::InvalidConfig(
                "cold_start_pulls must not exceed settled_pulls".to_string(),
            ));
        }
        if self.learning_rate < 0.0 || self.learning_rate >= 1.0 {
            return Err(BanditError::InvalidConfig(
                "learning_rate must lie in [0, 1)".to_string(),
            ));
        }
        Ok(())
    }
}

fn sanitize_shape<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() {
        Ok(value.max(PRIOR_ALPHA))
    } else {
        Ok(PRIOR_ALPHA)
    }
}

fn initial_context_weights() -> BTreeMap<String, f64> {
    FEATURE_NAMES
        .iter()
        .map(|name| (name.to_string(), INITIAL_CONTEXT_WEIGHT))
        .collect()
}

/// Posterior state for a single arm.
///
/// `alpha` and `beta` are kept private so the `>= 1` invariant survives every
/// code path, including deserialization of old or hand-edited records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmState {
    #[serde(deserialize_with = "sanitize_shape")]
    alpha: f64,
    #[serde(deserialize_with = "sanitize_shape")]
    beta: f64,
    #[serde(default)]
    pub total_pulls: u64,
    #[serde(default)]
    pub total_reward: f64,
    #[serde(default)]
    pub cooked_count: u64,
    #[serde(default)]
    pub upvote_count: u64,
    #[serde(default)]
    pub downvote_count: u64,
    #[serde(default = "initial_context_weights")]
    pub context_weights: BTreeMap<String, f64>,
}

impl Default for ArmState {
    fn default() -> Self {
        ArmState::new()
    }
}

impl ArmState {
    /// Fresh arm at the uniform prior.
    pub fn new() -> Self {
        ArmState {
            alpha: PRIOR_ALPHA,
            beta: PRIOR_BETA,
            total_pulls: 0,
            total_reward: 0.0,
            cooked_count: 0,
            upvote_count: 0,
            downvote_count: 0,
            context_weights: initial_context_weights(),
        }
    }

    /// Arm with explicit shape parameters, clamped to the prior floor.
    pub fn with_shape(alpha: f64, beta: f64) -> Self {
        let mut arm = ArmState::new();
        arm.alpha = if alpha.is_finite() {
            alpha.max(PRIOR_ALPHA)
        } else {
            PRIOR_ALPHA
        };
        arm.beta = if beta.is_finite() {
            beta.max(PRIOR_BETA)
        } else {
            PRIOR_BETA
        };
        arm
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Posterior mean, alpha / (alpha + beta).
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Average raw reward per pull, 0 before the first pull.
    pub fn mean_reward(&self) -> f64 {
        if self.total_pulls == 0 {
            0.0
        } else {
            self.total_reward / self.total_pulls as f64
        }
    }

    /// Draw theta from the Beta posterior.
    pub fn sample_theta<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match Beta::new(self.alpha, self.beta) {
            Ok(dist) => dist.sample(rng),
            // Unreachable while the >= 1 invariant holds.
            Err(_) => self.mean(),
        }
    }

    /// Linear context bonus for this arm.
    pub fn context_bonus(&self, features: &[f64; 6]) -> f64 {
        FEATURE_NAMES
            .iter()
            .zip(features.iter())
            .map(|(name, value)| {
                let weight = self
                    .context_weights
                    .get(*name)
                    .copied()
                    .unwrap_or(INITIAL_CONTEXT_WEIGHT);
                weight * value
            })
            .sum()
    }

    fn record(&mut self, normalized: f64, reward: f64) {
        self.alpha += normalized;
        self.beta += 1.0 - normalized;
        self.total_pulls += 1;
        self.total_reward += reward;
    }

    fn adjust_weights(&mut self, normalized: f64, features: &[f64; 6], learning_rate: f64) {
        // Heuristic online step, not a Bayesian contextual update: nudge each
        // weight toward explaining the residual between the observed reward
        // and the post-update posterior mean.
        let predicted = self.mean();
        let error = normalized - predicted;
        for (name, value) in FEATURE_NAMES.iter().zip(features.iter()) {
            let weight = self
                .context_weights
                .entry(name.to_string())
                .or_insert(INITIAL_CONTEXT_WEIGHT);
            *weight = (*weight + learning_rate * error * value)
                .clamp(-CONTEXT_WEIGHT_LIMIT, CONTEXT_WEIGHT_LIMIT);
        }
    }
}

/// Per-arm numbers exposed to the statistics endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ArmStatistics {
    pub pulls: u64,
    pub total_reward: f64,
    pub mean_reward: f64,
    pub expected_value: f64,
    pub alpha: f64,
    pub beta: f64,
}

/// Serialized form of a model, one document per user.
///
/// Arms are keyed by category name so records survive taxonomy growth:
/// unknown names are dropped on load, missing ones default to the prior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub categories: Vec<String>,
    pub arms: BTreeMap<String, ArmState>,
    pub total_user_pulls: u64,
    pub is_cold_start: bool,
    pub updated_at: DateTime<Utc>,
}

/// Per-user contextual bandit over the category taxonomy.
#[derive(Debug, Clone)]
pub struct BanditModel {
    arms: BTreeMap<Category, ArmState>,
    total_user_pulls: u64,
    updated_at: DateTime<Utc>,
    config: BanditConfig,
}

impl Default for BanditModel {
    fn default() -> Self {
        BanditModel::new()
    }
}

impl BanditModel {
    /// Fresh model with uniform priors over the full taxonomy.
    pub fn new() -> Self {
        BanditModel::with_config(BanditConfig::default())
    }

    pub fn with_config(config: BanditConfig) -> Self {
        BanditModel {
            arms: Category::ALL
                .iter()
                .map(|&category| (category, ArmState::new()))
                .collect(),
            total_user_pulls: 0,
            updated_at: Utc::now(),
            config,
        }
    }

    pub fn total_user_pulls(&self) -> u64 {
        self.total_user_pulls
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_cold_start(&self) -> bool {
        self.total_user_pulls < self.config.cold_start_pulls
    }

    /// Current epsilon under the stepped schedule.
    pub fn exploration_rate(&self) -> f64 {
        if self.total_user_pulls < self.config.cold_start_pulls {
            self.config.epsilon_cold
        } else if self.total_user_pulls < self.config.settled_pulls {
            self.config.epsilon_warming
        } else {
            self.config.epsilon_settled
        }
    }

    pub fn arm(&self, category: Category) -> &ArmState {
        // Arms cover the full taxonomy from construction onward; a missing
        // entry reads as the prior.
        self.arms.get(&category).unwrap_or_else(|| prior_arm())
    }

    pub fn get_mean(&self, category: Category) -> f64 {
        self.arm(category).mean()
    }

    /// Select up to `n` categories for recommendation.
    ///
    /// With probability epsilon this is a pure-exploration draw, uniform
    /// without replacement. Otherwise each arm's Beta posterior is sampled,
    /// the contextual bonus added, and the top scores win; ties break by
    /// category name so equal samples order deterministically.
    pub fn select_categories<R: Rng + ?Sized>(
        &self,
        context: &PantryContext,
        n: usize,
        available: &[Category],
        rng: &mut R,
    ) -> Vec<(Category, f64)> {
        let mut seen = BTreeSet::new();
        let pool: Vec<Category> = available
            .iter()
            .copied()
            .filter(|category| seen.insert(*category))
            .collect();

        let n = n.min(pool.len());
        if n == 0 {
            return Vec::new();
        }

        if rng.gen::<f64>() < self.exploration_rate() {
            // Pure exploration: uniform draw keeps early coverage honest.
            return pool
                .choose_multiple(rng, n)
                .copied()
                .map(|category| (category, self.get_mean(category)))
                .collect();
        }

        let features = context.to_feature_vector();
        let mut sampled: Vec<(Category, f64)> = pool
            .iter()
            .map(|&category| {
                let arm = self.arm(category);
                let theta = arm.sample_theta(rng);
                (category, theta + arm.context_bonus(&features))
            })
            .collect();

        sampled.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        sampled.truncate(n);
        sampled
    }

    /// Apply one observed reward to an arm.
    ///
    /// The reward domain is [-1, 2]; it is normalized to [0, 1] before the
    /// Beta update so alpha and beta only ever grow.
    pub fn update(&mut self, category: Category, reward: f64, context: &PantryContext) {
        let normalized = ((reward + 1.0) / 3.0).clamp(0.0, 1.0);
        let learning_rate = self.config.learning_rate;
        let features = context.to_feature_vector();

        let arm = self.arms.entry(category).or_default();
        arm.record(normalized, reward);
        arm.adjust_weights(normalized, &features, learning_rate);

        self.total_user_pulls += 1;
        self.updated_at = Utc::now();
    }

    /// Update by raw category name, tolerating taxonomy drift between the
    /// classifier and stored feedback: unknown names are dropped silently.
    pub fn update_by_name(&mut self, name: &str, reward: f64, context: &PantryContext) {
        match Category::from_str(name) {
            Some(category) => self.update(category, reward, context),
            None => debug!(category = name, "ignoring reward for unknown category"),
        }
    }

    /// Feedback-typed update: derives the reward and tracks action counters.
    pub fn update_from_feedback(
        &mut self,
        category: Category,
        feedback: FeedbackType,
        is_cooked: bool,
        context: &PantryContext,
    ) {
        let reward = reward_for(feedback, is_cooked);
        {
            let arm = self.arms.entry(category).or_default();
            if is_cooked || feedback == FeedbackType::Cooked {
                arm.cooked_count += 1;
            } else if feedback == FeedbackType::Upvote {
                arm.upvote_count += 1;
            } else if feedback == FeedbackType::Downvote {
                arm.downvote_count += 1;
            }
        }
        self.update(category, reward, context);
    }

    /// All arms ranked by posterior mean, best first. Unpulled arms sit at
    /// the 0.5 prior. Ties order by category name.
    pub fn get_rankings(&self) -> Vec<(Category, f64, u64)> {
        let mut rankings: Vec<(Category, f64, u64)> = self
            .arms
            .iter()
            .map(|(&category, arm)| (category, arm.mean(), arm.total_pulls))
            .collect();
        rankings.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        rankings
    }

    pub fn get_statistics(&self) -> BTreeMap<Category, ArmStatistics> {
        self.arms
            .iter()
            .map(|(&category, arm)| {
                (
                    category,
                    ArmStatistics {
                        pulls: arm.total_pulls,
                        total_reward: arm.total_reward,
                        mean_reward: arm.mean_reward(),
                        expected_value: arm.mean(),
                        alpha: arm.alpha(),
                        beta: arm.beta(),
                    },
                )
            })
            .collect()
    }

    /// Restore one arm to the prior. The user's pull total drops by the
    /// arm's pulls so it stays equal to the sum over arms.
    pub fn reset_arm(&mut self, category: Category) {
        if let Some(arm) = self.arms.get_mut(&category) {
            self.total_user_pulls = self.total_user_pulls.saturating_sub(arm.total_pulls);
            *arm = ArmState::new();
            self.updated_at = Utc::now();
        }
    }

    /// Restore every arm to the prior and re-enter cold start.
    pub fn reset_all(&mut self) {
        for arm in self.arms.values_mut() {
            *arm = ArmState::new();
        }
        self.total_user_pulls = 0;
        self.updated_at = Utc::now();
    }

    pub fn to_snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            categories: Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            arms: self
                .arms
                .iter()
                .map(|(category, arm)| (category.as_str().to_string(), arm.clone()))
                .collect(),
            total_user_pulls: self.total_user_pulls,
            is_cold_start: self.is_cold_start(),
            updated_at: self.updated_at,
        }
    }

    /// Rebuild a model from its stored form. Categories absent from the
    /// record start at the prior; names no longer in the taxonomy are
    /// dropped. The pull total is recomputed from the kept arms.
    pub fn from_snapshot(snapshot: ModelSnapshot) -> Self {
        let mut model = BanditModel::new();
        for (name, arm) in snapshot.arms {
            match Category::from_str(&name) {
                Some(category) => {
                    model.arms.insert(category, arm);
                }
                None => debug!(category = %name, "dropping unknown category from stored model"),
            }
        }
        model.total_user_pulls = model.arms.values().map(|arm| arm.total_pulls).sum();
        model.updated_at = snapshot.updated_at;
        model
    }
}

fn prior_arm() -> &'static ArmState {
    static PRIOR: OnceLock<ArmState> = OnceLock::new();
    PRIOR.get_or_init(ArmState::new)
}
