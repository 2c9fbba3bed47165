//! One-call process validation and its plaintext report.

use std::collections::BTreeSet;

use pbal_props::ProcessStream;
use serde::{Deserialize, Serialize};

use crate::config::BalanceConfig;
use crate::energy::{AuxiliaryEnergyData, EnergyBalance, EnergyBalanceCalculator};
use crate::material::{MaterialBalance, MaterialBalanceCalculator, WaterBalance};
use crate::validator::{ValidationSummary, validate_all_balances};

pub const REPORT_TITLE: &str = "Mass & Energy Balance Validation";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessValidation {
    pub carbon_balance: MaterialBalance,
    pub water_balance: WaterBalance,
    pub energy_balance: EnergyBalance,
    pub summary: ValidationSummary,
    /// Composition keys computed with the registry's default properties.
    pub unregistered_components: Vec<String>,
    pub report: String,
}

/// Carbon, water and energy balances over `streams`, graded and rendered.
///
/// Each balance is closed at its own configured tolerance; the summary grades
/// all three at `mass_tolerance`. Streams without an enthalpy are estimated
/// with `config.property_model`.
pub fn validate_process_balances(
    streams: &[ProcessStream],
    aux: &AuxiliaryEnergyData,
    config: &BalanceConfig,
) -> ProcessValidation {
    let material = MaterialBalanceCalculator::with_config(streams, config);
    let carbon_balance = material.calculate_carbon_balance();
    let water_balance = material.calculate_water_balance();
    let energy_balance =
        EnergyBalanceCalculator::with_config(streams, config).calculate_energy_balance(aux);

    let summary = validate_all_balances(
        &[carbon_balance.clone(), water_balance.balance.clone()],
        Some(&energy_balance),
        config.mass_tolerance,
    );
    let report = render_report(&summary);

    let unregistered_components: BTreeSet<String> = streams
        .iter()
        .flat_map(|s| s.composition.unregistered())
        .map(str::to_string)
        .collect();
    if !unregistered_components.is_empty() {
        tracing::warn!(
            components = ?unregistered_components,
            "balances use default molecular weight for uncataloged components"
        );
    }

    ProcessValidation {
        carbon_balance,
        water_balance,
        energy_balance,
        summary,
        unregistered_components: unregistered_components.into_iter().collect(),
        report,
    }
}

/// Fixed-format summary: counts, then one line per balance.
///
/// ```text
/// Mass & Energy Balance Validation
/// ================================
/// Total balances: 3
/// Converged: 2
/// Failed: 1
/// Critical issues: 1
///
/// ✓ Carbon: 0.00% error (none)
/// ✓ Water: 0.00% error (none)
/// ✗ Energy: 7.50% error (critical)
/// ```
pub fn render_report(summary: &ValidationSummary) -> String {
    let mut lines = vec![
        REPORT_TITLE.to_string(),
        "=".repeat(REPORT_TITLE.chars().count()),
        format!("Total balances: {}", summary.results.len()),
        format!("Converged: {}", summary.converged_count()),
        format!("Failed: {}", summary.failed_count()),
        format!("Critical issues: {}", summary.critical_issues.len()),
        String::new(),
    ];
    lines.extend(summary.results.iter().map(|row| {
        let glyph = if row.converged { '✓' } else { '✗' };
        format!(
            "{glyph} {}: {:.2}% error ({})",
            row.component, row.error, row.severity
        )
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
