//! Energetic cost estimation
//!
//! A bioenergetic formula combining dive duration, depth, and activity level
//! with a behavior-specific multiplier, plus the derived dive-efficiency
//! metric.

use crate::types::BehaviorType;

/// Cost contribution per second of dive duration
const DURATION_COST_WEIGHT: f64 = 0.1;

/// Depth is scaled by this reference before the power-law term (meters)
const DEPTH_COST_SCALE_M: f64 = 100.0;

/// Exponent of the depth cost term
const DEPTH_COST_EXPONENT: f64 = 1.5;

/// Cost contribution per g of mean dynamic body acceleration
const DBA_COST_WEIGHT: f64 = 2.0;

/// Estimator for per-dive energetic cost
pub struct EnergyEstimator;

impl EnergyEstimator {
    /// Estimated energetic cost of one dive (model units).
    ///
    /// Formula: `(0.1 * duration + (max_depth/100)^1.5 + 2.0 * mean_dba) * multiplier`
    pub fn estimate(
        duration_s: f64,
        max_depth_m: f64,
        mean_dba_g: f64,
        behavior: BehaviorType,
    ) -> f64 {
        let base = DURATION_COST_WEIGHT * duration_s
            + (max_depth_m / DEPTH_COST_SCALE_M).powf(DEPTH_COST_EXPONENT)
            + DBA_COST_WEIGHT * mean_dba_g;
        base * cost_multiplier(behavior)
    }

    /// Success probability per unit cost; 0 when the cost is 0
    pub fn dive_efficiency(success_probability: f64, energy_cost: f64) -> f64 {
        if energy_cost > 0.0 {
            success_probability / energy_cost
        } else {
            0.0
        }
    }
}

/// Behavior-specific cost multiplier
fn cost_multiplier(behavior: BehaviorType) -> f64 {
    match behavior {
        BehaviorType::DeepForaging => 1.5,
        BehaviorType::DeepExploration => 1.4,
        BehaviorType::DeepTravel => 1.3,
        BehaviorType::ShallowForaging => 1.2,
        BehaviorType::ShallowExploration => 1.1,
        BehaviorType::ShallowTravel => 1.0,
        BehaviorType::SocialSurface => 0.8,
        BehaviorType::Resting => 0.5,
    }
}
