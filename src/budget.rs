//! Budget aggregation
//!
//! A pure fold over the dive records and the surface summary producing the
//! deployment-level energetic model: behavioral-time budget, energy totals,
//! foraging success, and optimal foraging depth/duration.

use crate::foraging::SUCCESS_PROBABILITY_THRESHOLD;
use crate::types::{DiveRecord, EnergeticModel, SurfaceSummary};
use std::collections::HashMap;

/// Aggregator folding per-dive records into a deployment model
pub struct BudgetAggregator;

impl BudgetAggregator {
    /// Fold records and the surface summary into an energetic model.
    ///
    /// Zero dives is not an error: the model comes back with an empty budget
    /// and zero defaults. The optimal depth/duration are computed only over
    /// dives with success probability above 0.5 and default to 0 when that
    /// subset is empty.
    pub fn aggregate(dives: &[DiveRecord], surface: &SurfaceSummary) -> EnergeticModel {
        let total_dives = dives.len();

        let total_energy_cost: f64 = dives.iter().map(|d| d.energy_cost).sum();
        let mean_energy_cost = if total_dives > 0 {
            total_energy_cost / total_dives as f64
        } else {
            0.0
        };

        let total_success: f64 = dives.iter().map(|d| d.foraging.success_probability).sum();
        let energy_efficiency = if total_energy_cost > 0.0 {
            total_success / total_energy_cost
        } else {
            0.0
        };

        let mut behavioral_budget = HashMap::new();
        if total_dives > 0 {
            let mut counts: HashMap<_, u32> = HashMap::new();
            for dive in dives {
                *counts.entry(dive.behavior).or_insert(0) += 1;
            }
            for (behavior, count) in counts {
                behavioral_budget.insert(behavior, count as f64 / total_dives as f64);
            }
        }

        let total_dive_time: f64 = dives.iter().map(|d| d.duration_s).sum();
        let tracked_time = total_dive_time + surface.total_surface_time_s;
        let dive_time_fraction = if tracked_time > 0.0 {
            total_dive_time / tracked_time
        } else {
            0.0
        };
        let surface_time_fraction = 1.0 - dive_time_fraction;

        let successful: Vec<&DiveRecord> = dives
            .iter()
            .filter(|d| d.foraging.success_probability > SUCCESS_PROBABILITY_THRESHOLD)
            .collect();
        let (optimal_foraging_depth_m, optimal_foraging_duration_s) = if successful.is_empty() {
            (0.0, 0.0)
        } else {
            let n = successful.len() as f64;
            (
                successful.iter().map(|d| d.max_depth_m).sum::<f64>() / n,
                successful.iter().map(|d| d.duration_s).sum::<f64>() / n,
            )
        };

        let foraging_dives = dives.iter().filter(|d| d.behavior.is_foraging()).count() as u32;
        let successful_foraging_dives = dives
            .iter()
            .filter(|d| {
                d.behavior.is_foraging()
                    && d.foraging.success_probability > SUCCESS_PROBABILITY_THRESHOLD
            })
            .count() as u32;
        let foraging_success_rate = if foraging_dives > 0 {
            successful_foraging_dives as f64 / foraging_dives as f64
        } else {
            0.0
        };

        EnergeticModel {
            total_energy_cost,
            mean_energy_cost,
            foraging_success_rate,
            energy_efficiency,
            behavioral_budget,
            dive_time_fraction,
            surface_time_fraction,
            optimal_foraging_depth_m,
            optimal_foraging_duration_s,
            foraging_dives,
            successful_foraging_dives,
        }
    }
}
