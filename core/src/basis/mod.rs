//! Analytic overlap and hamiltonian matrix elements for Gaussian trial functions.
//!
//! Every basis function is a Gaussian `exp(-alpha r^2)`, optionally multiplied by one
//! cartesian coordinate. Because all functions share the same center, a matrix element
//! only depends on the two widths involved, which is what [`GaussianBasis`] captures.
mod p_wave;
mod s_wave;

pub use p_wave::{CartesianPWaveBasis, DirectionConfig};
pub use s_wave::SWaveBasis;

use nalgebra::DMatrix;

use crate::{
    error::{Error, Result},
    utils,
};

/// A set of co-centered Gaussian basis functions with closed form matrix elements.
pub trait GaussianBasis {
    /// Number of basis functions, i.e. the number of widths this basis expects.
    fn n_basis(&self) -> usize;

    /// Whether basis functions `i` and `j` can have non-zero matrix elements at all.
    /// Pairs that don't couple are left at exactly zero.
    fn couples(&self, _i: usize, _j: usize) -> bool {
        true
    }

    /// The overlap integral of two functions with the given widths
    fn overlap(&self, widths: (f64, f64)) -> f64;

    /// The hamiltonian matrix element of two functions with the given widths
    fn hamiltonian(&self, widths: (f64, f64)) -> f64;
}

/// Overlap and hamiltonian matrix of a basis, evaluated for one set of widths.
#[derive(Clone, Debug, PartialEq)]
pub struct BasisMatrices {
    pub overlap: DMatrix<f64>,
    pub hamiltonian: DMatrix<f64>,
}

/// Make sure `widths` can be used with `basis`: one finite, strictly positive width per
/// basis function.
pub fn check_widths(basis: &impl GaussianBasis, widths: &[f64]) -> Result<()> {
    if widths.len() != basis.n_basis() {
        return Err(Error::DimensionMismatch {
            expected: basis.n_basis(),
            found: widths.len(),
        });
    }

    if let Some((index, width)) = widths
        .iter()
        .enumerate()
        .find(|(_, width)| !(width.is_finite() && **width > 0.0))
    {
        return Err(Error::InvalidInput(format!(
            "width {index} must be a positive number, got {width}"
        )));
    }

    Ok(())
}

pub fn compute_overlap_matrix(basis: &impl GaussianBasis, widths: &[f64]) -> DMatrix<f64> {
    utils::symmetric_matrix(widths.len(), |i, j| {
        if !basis.couples(i, j) {
            return 0.0;
        }
        let overlap_ij = basis.overlap((widths[i], widths[j]));
        log::trace!("overlap ({i}{j}) = {overlap_ij}");
        overlap_ij
    })
}

pub fn compute_hamiltonian_matrix(basis: &impl GaussianBasis, widths: &[f64]) -> DMatrix<f64> {
    utils::symmetric_matrix(widths.len(), |i, j| {
        if !basis.couples(i, j) {
            return 0.0;
        }
        let hamiltonian_ij = basis.hamiltonian((widths[i], widths[j]));
        log::trace!("hamiltonian ({i}{j}) = {hamiltonian_ij}");
        hamiltonian_ij
    })
}

/// Build both matrices from scratch, after validating the widths.
pub fn compute_matrices(basis: &impl GaussianBasis, widths: &[f64]) -> Result<BasisMatrices> {
    check_widths(basis, widths)?;

    let overlap = compute_overlap_matrix(basis, widths);
    log::debug!("overlap matrix: {overlap:0.4}");
    let hamiltonian = compute_hamiltonian_matrix(basis, widths);
    log::debug!("hamiltonian matrix: {hamiltonian:0.4}");

    Ok(BasisMatrices {
        overlap,
        hamiltonian,
    })
}
