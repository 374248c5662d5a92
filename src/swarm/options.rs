//! # SwarmOptions
//!
//! Configuration of a [`ParticleSwarm`](super::ParticleSwarm). The defaults are the
//! classic constriction-free settings: 30 particles, inertia 0.4, both acceleration
//! coefficients 2, velocity clamped to ±2 and positions left unbounded.
//!
//! ## Example
//!
//! ```rust
//! use genswarm::swarm::SwarmOptions;
//!
//! let options = SwarmOptions::builder()
//!     .swarm_size(12)
//!     .inertia(0.7)
//!     .max_position(5.0)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! assert_eq!(options.get_max_position(), Some(5.0));
//! assert_eq!(options.get_max_velocity(), Some(2.0));
//! ```

use crate::error::{GeneticError, Result};
use crate::evolution::options::{default_threads, LogLevel};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmOptions {
    swarm_size: usize,
    inertia: f64,
    c1: f64,
    c2: f64,
    /// `None` leaves velocities unclamped.
    max_velocity: Option<f64>,
    /// `None` leaves positions unclamped.
    max_position: Option<f64>,
    threads: usize,
    log_level: LogLevel,
}

impl SwarmOptions {
    pub fn new(swarm_size: usize, inertia: f64, c1: f64, c2: f64) -> Self {
        Self {
            swarm_size,
            inertia,
            c1,
            c2,
            ..Self::default()
        }
    }

    pub fn get_swarm_size(&self) -> usize {
        self.swarm_size
    }

    pub fn get_inertia(&self) -> f64 {
        self.inertia
    }

    /// Cognitive coefficient: pull towards the particle's own best position.
    pub fn get_c1(&self) -> f64 {
        self.c1
    }

    /// Social coefficient: pull towards the swarm's best position.
    pub fn get_c2(&self) -> f64 {
        self.c2
    }

    pub fn get_max_velocity(&self) -> Option<f64> {
        self.max_velocity
    }

    pub fn get_max_position(&self) -> Option<f64> {
        self.max_position
    }

    pub fn get_threads(&self) -> usize {
        self.threads
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn set_swarm_size(&mut self, swarm_size: usize) {
        self.swarm_size = swarm_size;
    }

    pub fn set_inertia(&mut self, inertia: f64) {
        self.inertia = inertia;
    }

    pub fn set_c1(&mut self, c1: f64) {
        self.c1 = c1;
    }

    pub fn set_c2(&mut self, c2: f64) {
        self.c2 = c2;
    }

    pub fn set_max_velocity(&mut self, max_velocity: Option<f64>) {
        self.max_velocity = max_velocity;
    }

    pub fn set_max_position(&mut self, max_position: Option<f64>) {
        self.max_position = max_position;
    }

    pub fn set_threads(&mut self, threads: usize) {
        self.threads = threads;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    /// Checks the options for values no swarm can run with.
    ///
    /// # Errors
    ///
    /// Returns [`GeneticError::Configuration`] describing the first invalid option.
    pub fn validate(&self) -> Result<()> {
        if self.swarm_size == 0 {
            return Err(GeneticError::Configuration(
                "Swarm size cannot be zero".to_string(),
            ));
        }
        for (name, value) in [("Inertia", self.inertia), ("c1", self.c1), ("c2", self.c2)] {
            if !value.is_finite() {
                return Err(GeneticError::Configuration(format!(
                    "{} must be finite, got {}",
                    name, value
                )));
            }
        }
        if self.c1 < 0.0 || self.c2 < 0.0 {
            return Err(GeneticError::Configuration(format!(
                "Acceleration coefficients cannot be negative, got c1 = {}, c2 = {}",
                self.c1, self.c2
            )));
        }
        for (name, bound) in [
            ("Max velocity", self.max_velocity),
            ("Max position", self.max_position),
        ] {
            if let Some(bound) = bound {
                if !bound.is_finite() || bound <= 0.0 {
                    return Err(GeneticError::Configuration(format!(
                        "{} must be positive and finite, got {}",
                        name, bound
                    )));
                }
            }
        }
        if self.threads == 0 {
            return Err(GeneticError::Configuration(
                "Thread count cannot be zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn builder() -> SwarmOptionsBuilder {
        SwarmOptionsBuilder::default()
    }
}

impl Default for SwarmOptions {
    fn default() -> Self {
        Self {
            swarm_size: 30,
            inertia: 0.4,
            c1: 2.0,
            c2: 2.0,
            max_velocity: Some(2.0),
            max_position: None,
            threads: default_threads(),
            log_level: LogLevel::None,
        }
    }
}

/// Builder for `SwarmOptions`.
#[derive(Debug, Clone, Default)]
pub struct SwarmOptionsBuilder {
    swarm_size: Option<usize>,
    inertia: Option<f64>,
    c1: Option<f64>,
    c2: Option<f64>,
    max_velocity: Option<Option<f64>>,
    max_position: Option<Option<f64>>,
    threads: Option<usize>,
    log_level: Option<LogLevel>,
}

impl SwarmOptionsBuilder {
    pub fn swarm_size(mut self, value: usize) -> Self {
        self.swarm_size = Some(value);
        self
    }

    pub fn inertia(mut self, value: f64) -> Self {
        self.inertia = Some(value);
        self
    }

    pub fn c1(mut self, value: f64) -> Self {
        self.c1 = Some(value);
        self
    }

    pub fn c2(mut self, value: f64) -> Self {
        self.c2 = Some(value);
        self
    }

    pub fn max_velocity(mut self, value: f64) -> Self {
        self.max_velocity = Some(Some(value));
        self
    }

    /// Lets velocities grow without bound.
    pub fn unbounded_velocity(mut self) -> Self {
        self.max_velocity = Some(None);
        self
    }

    pub fn max_position(mut self, value: f64) -> Self {
        self.max_position = Some(Some(value));
        self
    }

    pub fn threads(mut self, value: usize) -> Self {
        self.threads = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn build(self) -> SwarmOptions {
        let defaults = SwarmOptions::default();
        SwarmOptions {
            swarm_size: self.swarm_size.unwrap_or(defaults.swarm_size),
            inertia: self.inertia.unwrap_or(defaults.inertia),
            c1: self.c1.unwrap_or(defaults.c1),
            c2: self.c2.unwrap_or(defaults.c2),
            max_velocity: self.max_velocity.unwrap_or(defaults.max_velocity),
            max_position: self.max_position.unwrap_or(defaults.max_position),
            threads: self.threads.unwrap_or(defaults.threads),
            log_level: self.log_level.unwrap_or(defaults.log_level),
        }
    }
}
