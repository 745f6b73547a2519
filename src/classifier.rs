//! Behavior classification
//!
//! A fixed decision table maps the kinematic metrics of one dive to a
//! behavior-type label, and a second mapping derives the behavioral-context
//! label from the behavior type and foraging indicators. Rows are evaluated
//! in table order and the first match wins.

use crate::foraging::SUCCESS_PROBABILITY_THRESHOLD;
use crate::kinematics::DiveKinematics;
use crate::types::{BehaviorType, BehavioralContext, ForagingIndicators};

/// Upper edge of the near-surface depth band (meters)
pub const SHALLOW_BAND_MAX_M: f64 = 10.0;

/// Upper edge of the mid-water depth band (meters)
pub const MID_BAND_MAX_M: f64 = 30.0;

/// Upper edge of the deep band (meters); deeper dives fall in the abyssal row
pub const DEEP_BAND_MAX_M: f64 = 80.0;

/// Success probability above which a foraging dive counts as active
const ACTIVE_FORAGING_MIN_PROBABILITY: f64 = 0.25;

/// Acoustic proportion above which travel is treated as coordinated
const COORDINATED_TRAVEL_MIN_ACOUSTIC: f64 = 0.2;

/// Decision-table classifier for dive behavior
pub struct BehaviorClassifier;

impl BehaviorClassifier {
    /// Classify one dive from its kinematic metrics.
    ///
    /// Depth bands are inclusive on their lower edge. Within a band the rows
    /// are checked in order, so a dive satisfying several conditions takes
    /// the earliest label.
    pub fn classify(kinematics: &DiveKinematics) -> BehaviorType {
        let depth = kinematics.max_depth_m;

        if depth < SHALLOW_BAND_MAX_M {
            if kinematics.acoustic_proportion > 0.6 {
                BehaviorType::SocialSurface
            } else if kinematics.mean_dba_g < 0.5 {
                BehaviorType::Resting
            } else {
                BehaviorType::ShallowTravel
            }
        } else if depth < MID_BAND_MAX_M {
            if kinematics.bottom_time_s > 30.0 && kinematics.acoustic_proportion > 0.4 {
                BehaviorType::ShallowForaging
            } else if kinematics.mean_dba_g > 1.0 {
                BehaviorType::ShallowTravel
            } else {
                BehaviorType::ShallowExploration
            }
        } else if depth < DEEP_BAND_MAX_M {
            if kinematics.bottom_time_s > 60.0 && kinematics.acoustic_proportion > 0.3 {
                BehaviorType::DeepForaging
            } else if kinematics.mean_dba_g > 0.8 {
                BehaviorType::DeepTravel
            } else {
                BehaviorType::DeepExploration
            }
        } else if kinematics.bottom_time_s > 120.0 {
            BehaviorType::DeepForaging
        } else {
            BehaviorType::DeepExploration
        }
    }

    /// Derive the behavioral-context label for one classified dive
    pub fn classify_context(
        behavior: BehaviorType,
        foraging: &ForagingIndicators,
        acoustic_proportion: f64,
    ) -> BehavioralContext {
        match behavior {
            BehaviorType::ShallowForaging | BehaviorType::DeepForaging => {
                if foraging.success_probability > SUCCESS_PROBABILITY_THRESHOLD {
                    BehavioralContext::SuccessfulForaging
                } else if foraging.success_probability >= ACTIVE_FORAGING_MIN_PROBABILITY {
                    BehavioralContext::ActiveForaging
                } else {
                    BehavioralContext::ForagingSearch
                }
            }
            BehaviorType::ShallowTravel | BehaviorType::DeepTravel => {
                if acoustic_proportion > COORDINATED_TRAVEL_MIN_ACOUSTIC {
                    BehavioralContext::CoordinatedTravel
                } else {
                    BehavioralContext::IndividualTravel
                }
            }
            BehaviorType::SocialSurface => BehavioralContext::SocialInteraction,
            BehaviorType::Resting => BehavioralContext::RestingBehavior,
            BehaviorType::ShallowExploration | BehaviorType::DeepExploration => {
                BehavioralContext::ExploratoryBehavior
            }
        }
    }
}
