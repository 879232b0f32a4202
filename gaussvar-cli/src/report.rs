//! Console formatting of optimizer traces and spectra.
use gaussvar_core::{
    eigen::GeneralizedEigen,
    optim::{Iteration, Minimum, MinimizerConfig, MinimizerStatus},
};
use itertools::Itertools;
use serde::Serialize;

/// Decimals of the s-wave trace.
pub const S_WAVE_PRECISION: usize = 8;
/// Decimals of the p-wave trace.
pub const P_WAVE_PRECISION: usize = 6;

/// One line of the optimizer trace: iteration, best widths, energy and simplex size, each
/// number printed with `precision` decimals.
pub fn trace_line(iteration: &Iteration, precision: usize) -> String {
    format!(
        "{:4} f({}) = {:.*}   size = {:.*}",
        iteration.iteration,
        iteration
            .point
            .iter()
            .map(|width| format!(" {width:.precision$} "))
            .join(""),
        precision,
        iteration.value,
        precision,
        iteration.size
    )
}

pub fn print_iteration(iteration: &Iteration, precision: usize) {
    if iteration.converged {
        println!("converged to minimum at");
    }
    println!("{}", trace_line(iteration, precision));
}

pub fn outcome_line(minimum: &Minimum) -> String {
    match minimum.status {
        MinimizerStatus::Converged => format!(
            "converged after {} iterations: energy {:.8}",
            minimum.iterations, minimum.value
        ),
        MinimizerStatus::Stopped => format!(
            "stopped after {} iterations without converging (size {:.8}): energy {:.8}",
            minimum.iterations, minimum.size, minimum.value
        ),
    }
}

/// Eigenvalues one per line, followed by the eigenvector matrix one row per line.
pub fn spectrum_lines(eigen: &GeneralizedEigen) -> Vec<String> {
    eigen
        .eigenvalues
        .iter()
        .map(|value| format!("{value:.8}"))
        .chain(
            eigen
                .eigenvectors
                .row_iter()
                .map(|row| row.iter().map(|entry| format!("{entry:.8}")).join(" ")),
        )
        .collect()
}

/// Machine readable result of an optimization run.
#[derive(Serialize)]
pub struct OptimizationSummary<'a, B> {
    pub basis: &'a B,
    pub config: &'a MinimizerConfig,
    pub minimum: &'a Minimum,
}

/// Machine readable result of a single energy evaluation.
#[derive(Serialize)]
pub struct SinglePointSummary<'a, B> {
    pub basis: &'a B,
    pub widths: &'a [f64],
    pub energy: f64,
}
