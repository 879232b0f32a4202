use nalgebra::DMatrix;

use super::{GeneralizedEigen, GeneralizedEigenSolver};
use crate::{
    error::{Error, Result},
    utils,
};

/// Reduces the problem to standard form through the Cholesky factor of the overlap,
/// `S = L L^T`: the eigenvalues of `L^-1 H L^-T` are those of the generalized problem.
#[derive(Copy, Clone, Debug, Default)]
pub struct CholeskySolver;

impl GeneralizedEigenSolver for CholeskySolver {
    fn solve(
        &self,
        overlap: &DMatrix<f64>,
        hamiltonian: &DMatrix<f64>,
    ) -> Result<GeneralizedEigen> {
        let cholesky = overlap
            .clone()
            .cholesky()
            .ok_or(Error::NotPositiveDefinite)?;
        let l = cholesky.l();

        // L^-1 H, then L^-1 (L^-1 H)^T = L^-1 H L^-T since H is symmetric
        let half = l
            .solve_lower_triangular(hamiltonian)
            .ok_or(Error::NotPositiveDefinite)?;
        let reduced = l
            .solve_lower_triangular(&half.transpose())
            .ok_or(Error::NotPositiveDefinite)?;

        let (reduced_vectors, eigenvalues) = utils::sorted_eigs(utils::symmetrize(&reduced));
        let eigenvectors = l
            .tr_solve_lower_triangular(&reduced_vectors)
            .ok_or(Error::NotPositiveDefinite)?;

        Ok(GeneralizedEigen {
            eigenvalues,
            eigenvectors,
        })
    }
}
