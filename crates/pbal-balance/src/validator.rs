//! Convergence grading across computed balances.

use pbal_core::error_percent;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_MASS_TOLERANCE;
use crate::energy::EnergyBalance;
use crate::material::{MaterialBalance, WaterBalance};

/// Error percent above which a balance is critical.
pub const CRITICAL_ERROR_PCT: f64 = 5.0;
/// Error percent above which a balance is major.
pub const MAJOR_ERROR_PCT: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Minor,
    Major,
    Critical,
}

impl Severity {
    /// Grade an error percent against the fixed 2%/5% bands and the caller's
    /// tolerance.
    ///
    /// A NaN or infinite error percent grades `Critical`, never `None`: a
    /// balance fed non-finite data is reported as the worst case.
    pub fn classify(error_percent: f64, tolerance: f64) -> Severity {
        if !error_percent.is_finite() || error_percent > CRITICAL_ERROR_PCT {
            Severity::Critical
        } else if error_percent > MAJOR_ERROR_PCT {
            Severity::Major
        } else if error_percent > tolerance * 100.0 {
            Severity::Minor
        } else {
            Severity::None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Minor => "minor",
            Severity::Major => "major",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common view of any balance result for grading.
pub trait Balance {
    /// Name used in messages ("Carbon", "Water", "Energy", ...).
    fn label(&self) -> &str;
    /// Denominator of the percent error.
    fn total_in(&self) -> f64;
    fn convergence(&self) -> f64;
    /// Verdict of the calculator that produced the balance.
    fn is_converged(&self) -> bool;
}

impl Balance for MaterialBalance {
    fn label(&self) -> &str {
        &self.component
    }

    fn total_in(&self) -> f64 {
        MaterialBalance::total_in(self)
    }

    fn convergence(&self) -> f64 {
        self.convergence
    }

    fn is_converged(&self) -> bool {
        self.converged
    }
}

impl Balance for WaterBalance {
    fn label(&self) -> &str {
        self.balance.label()
    }

    fn total_in(&self) -> f64 {
        self.balance.total_in()
    }

    fn convergence(&self) -> f64 {
        self.balance.convergence
    }

    fn is_converged(&self) -> bool {
        self.balance.converged
    }
}

impl Balance for EnergyBalance {
    fn label(&self) -> &str {
        "Energy"
    }

    fn total_in(&self) -> f64 {
        self.total_in
    }

    fn convergence(&self) -> f64 {
        self.convergence
    }

    fn is_converged(&self) -> bool {
        self.converged
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub converged: bool,
    pub error_percent: f64,
    pub severity: Severity,
    pub message: String,
}

/// Grade one balance.
///
/// `converged` is the calculator's own verdict OR this check passing, so a
/// balance already marked converged stays converged even when `tolerance`
/// here is tighter than the one it was computed with. A non-finite error
/// percent is graded [`Severity::Critical`] and is not converged unless the
/// calculator said so.
pub fn validate_convergence<B: Balance + ?Sized>(balance: &B, tolerance: f64) -> ValidationResult {
    let error_percent = error_percent(balance.convergence(), balance.total_in());
    let severity = Severity::classify(error_percent, tolerance);
    let converged = balance.is_converged() || error_percent < tolerance * 100.0;

    let message = if converged {
        format!(
            "{} balance converged ({:.2}% error)",
            balance.label(),
            error_percent
        )
    } else {
        format!(
            "{} balance not converged: {:.2}% error ({})",
            balance.label(),
            error_percent,
            severity
        )
    };

    ValidationResult {
        converged,
        error_percent,
        severity,
        message,
    }
}

/// Same as [`validate_convergence`] at the default mass tolerance (1%).
pub fn validate_convergence_default<B: Balance + ?Sized>(balance: &B) -> ValidationResult {
    validate_convergence(balance, DEFAULT_MASS_TOLERANCE)
}

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceCheck {
    pub component: String,
    pub converged: bool,
    /// Error [%]
    pub error: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub all_converged: bool,
    pub results: Vec<BalanceCheck>,
    pub critical_issues: Vec<String>,
}

impl ValidationSummary {
    pub fn converged_count(&self) -> usize {
        self.results.iter().filter(|r| r.converged).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.len() - self.converged_count()
    }
}

/// Grade every material balance, then the energy balance if given, all at the
/// same `tolerance`.
pub fn validate_all_balances(
    material_balances: &[MaterialBalance],
    energy_balance: Option<&EnergyBalance>,
    tolerance: f64,
) -> ValidationSummary {
    let graded = material_balances
        .iter()
        .map(|b| b as &dyn Balance)
        .chain(energy_balance.map(|b| b as &dyn Balance));

    let mut results = Vec::new();
    let mut critical_issues = Vec::new();
    for balance in graded {
        let result = validate_convergence(balance, tolerance);
        if result.severity == Severity::Critical {
            critical_issues.push(result.message.clone());
        }
        results.push(BalanceCheck {
            component: balance.label().to_string(),
            converged: result.converged,
            error: result.error_percent,
            severity: result.severity,
        });
    }

    ValidationSummary {
        all_converged: results.iter().all(|r| r.converged),
        results,
        critical_issues,
    }
}
