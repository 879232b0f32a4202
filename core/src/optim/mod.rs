//! Derivative free minimization with the Nelder-Mead simplex method.
mod nelder_mead;

pub use nelder_mead::Simplex;

use nalgebra::DVector;
use serde::Serialize;

use crate::error::Result;

/// A scalar function of a parameter vector.
pub trait Objective {
    fn value(&self, point: &[f64]) -> Result<f64>;
}

/// Settings of the minimization loop
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct MinimizerConfig {
    /// Hard cap on the number of simplex iterations
    pub max_iterations: usize,
    /// The search has converged once the simplex size drops below this
    pub tolerance: f64,
    /// Displacement of the initial simplex vertices along each parameter axis
    pub initial_step: f64,
}

impl MinimizerConfig {
    /// Settings used for the s-wave basis
    pub const fn s_wave() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-8,
            initial_step: 0.1,
        }
    }

    /// Settings used for the p-wave basis
    pub const fn p_wave() -> Self {
        Self {
            max_iterations: 1000,
            tolerance: 1e-10,
            initial_step: 1e-4,
        }
    }
}

impl Default for MinimizerConfig {
    fn default() -> Self {
        Self::s_wave()
    }
}

/// How a minimization that didn't fail has ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MinimizerStatus {
    /// The simplex shrank below the tolerance
    Converged,
    /// The iteration cap was hit first
    Stopped,
}

/// Progress report published after every iteration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Iteration {
    pub iteration: usize,
    /// best vertex of the simplex
    pub point: DVector<f64>,
    pub value: f64,
    pub size: f64,
    pub converged: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Minimum {
    pub status: MinimizerStatus,
    pub point: DVector<f64>,
    pub value: f64,
    pub size: f64,
    /// number of iterations that were run
    pub iterations: usize,
}

/// Minimize `objective` starting from `initial`. `observer` is called after every iteration.
pub fn minimize(
    objective: &impl Objective,
    initial: &[f64],
    config: &MinimizerConfig,
    mut observer: impl FnMut(&Iteration),
) -> Result<Minimum> {
    let mut simplex = Simplex::with_uniform_step(objective, initial, config.initial_step)?;
    let mut iterations = 0;

    while iterations < config.max_iterations {
        iterations += 1;
        simplex.iterate(objective)?;

        let (point, value) = simplex.best();
        let size = simplex.size();
        let converged = size < config.tolerance;

        log::debug!("iteration {iterations:<4} - value {value:.8} size {size:.3e}");

        observer(&Iteration {
            iteration: iterations,
            point: point.clone(),
            value,
            size,
            converged,
        });

        if converged {
            return Ok(Minimum {
                status: MinimizerStatus::Converged,
                point: point.clone(),
                value,
                size,
                iterations,
            });
        }
    }

    let (point, value) = simplex.best();
    log::warn!(
        "simplex did not converge within {} iterations (size {:.3e})",
        config.max_iterations,
        simplex.size()
    );

    Ok(Minimum {
        status: MinimizerStatus::Stopped,
        point: point.clone(),
        value,
        size: simplex.size(),
        iterations,
    })
}
