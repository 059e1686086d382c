//! Simulation configuration.
//!
//! Holds the tunables shared by every run: the round-robin quantum, the
//! throughput horizons and the unit cost of a context switch. Missing fields
//! fall back to their defaults when deserialized, so a partial JSON file is a
//! valid configuration.
//!
//! ```
//! use cpu_schedule::config::SimulationConfig;
//!
//! let config: SimulationConfig = serde_json::from_str(r#"{ "quantum": 2 }"#).unwrap();
//! assert_eq!(config.quantum, 2);
//! assert_eq!(config.horizons, vec![50, 100, 150, 200]);
//! ```

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrorKind, ValidationResult};

/// Default round-robin time quantum.
pub const DEFAULT_QUANTUM: i64 = 4;

/// Default throughput horizons.
pub const DEFAULT_HORIZONS: [i64; 4] = [50, 100, 150, 200];

/// Default cost of one context switch, in time units.
pub const DEFAULT_SWITCH_COST: f64 = 0.001;

/// Tunables for a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Round-robin time quantum.
    pub quantum: i64,
    /// Horizons at which throughput is counted.
    pub horizons: Vec<i64>,
    /// Cost of one context switch, in time units.
    pub switch_cost: f64,
}

impl SimulationConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the round-robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = quantum;
        self
    }

    /// Sets the throughput horizons.
    pub fn with_horizons(mut self, horizons: Vec<i64>) -> Self {
        self.horizons = horizons;
        self
    }

    /// Sets the context-switch cost.
    pub fn with_switch_cost(mut self, switch_cost: f64) -> Self {
        self.switch_cost = switch_cost;
        self
    }

    /// Checks that every tunable is usable.
    ///
    /// Checks:
    /// 1. Quantum is positive
    /// 2. Switch cost is finite and non-negative
    /// 3. Horizons are non-negative
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        if self.quantum <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidQuantum,
                format!("Quantum must be positive, got {}", self.quantum),
            ));
        }

        if !self.switch_cost.is_finite() || self.switch_cost < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSwitchCost,
                format!(
                    "Switch cost must be a non-negative number, got {}",
                    self.switch_cost
                ),
            ));
        }

        for &horizon in &self.horizons {
            if horizon < 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidHorizon,
                    format!("Throughput horizon must be non-negative, got {horizon}"),
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            horizons: DEFAULT_HORIZONS.to_vec(),
            switch_cost: DEFAULT_SWITCH_COST,
        }
    }
}
