//! Insight generation
//!
//! Formats the deployment aggregate into short human-readable summary
//! strings for reports and logs.

use crate::types::{DiveRecord, EnergeticModel, SurfaceSummary};

/// Produce summary strings for one analyzed deployment
pub fn generate_insights(
    dives: &[DiveRecord],
    surface: &SurfaceSummary,
    energetics: &EnergeticModel,
) -> Vec<String> {
    let mut insights = Vec::new();

    if dives.is_empty() {
        insights.push("No dives detected in this deployment".to_string());
        insights.push(format!(
            "Animal spent {:.1} minutes at the surface across {} periods",
            surface.total_surface_time_s / 60.0,
            surface.surface_periods
        ));
        return insights;
    }

    let total_dive_minutes: f64 = dives.iter().map(|d| d.duration_s).sum::<f64>() / 60.0;
    insights.push(format!(
        "Detected {} dives totalling {:.1} minutes ({:.0}% of tracked time submerged)",
        dives.len(),
        total_dive_minutes,
        energetics.dive_time_fraction * 100.0
    ));

    if let Some((behavior, fraction)) = energetics
        .behavioral_budget
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1))
    {
        insights.push(format!(
            "Dominant behavior: {} ({:.0}% of dives)",
            behavior.as_str(),
            fraction * 100.0
        ));
    }

    if energetics.foraging_dives > 0 {
        insights.push(format!(
            "{} of {} foraging dives were successful ({:.0}% success rate)",
            energetics.successful_foraging_dives,
            energetics.foraging_dives,
            energetics.foraging_success_rate * 100.0
        ));
    } else {
        insights.push("No foraging dives detected".to_string());
    }

    if energetics.successful_foraging_dives > 0 {
        insights.push(format!(
            "Optimal foraging: {:.0} m depth, {:.0} s duration",
            energetics.optimal_foraging_depth_m, energetics.optimal_foraging_duration_s
        ));
    }

    insights.push(format!(
        "Estimated energy expenditure: {:.1} units ({:.1} per dive)",
        energetics.total_energy_cost, energetics.mean_energy_cost
    ));

    insights.push(format!(
        "Surface behavior: {:.1} breathing bouts per hour",
        surface.breathing_rate_per_hour
    ));

    insights
}
