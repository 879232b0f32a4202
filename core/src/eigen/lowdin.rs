use nalgebra::DMatrix;

use super::{GeneralizedEigen, GeneralizedEigenSolver};
use crate::{
    error::{Error, Result},
    utils,
};

/// Orthogonalizes the basis by hand before diagonalizing the hamiltonian.
///
/// With `S = U diag(s) U^T`, the columns of `V = U diag(s)^-1/2` form an orthonormal basis
/// (`V^T S V = 1`). The hamiltonian in that basis, `V^T H V`, is an ordinary symmetric
/// matrix whose eigenvalues are the generalized eigenvalues; its eigenvectors are mapped
/// back to the original basis by `V`.
#[derive(Copy, Clone, Debug, Default)]
pub struct LowdinSolver;

impl LowdinSolver {
    /// The matrix `V = U diag(s)^-1/2` built from the eigen decomposition of the overlap.
    pub fn transformation_matrix(overlap: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        let (u, overlap_eigenvalues) = utils::eigs(overlap.clone());
        log::debug!("overlap eigenvalues: {overlap_eigenvalues:0.4e}");

        if overlap_eigenvalues.iter().any(|&s| !(s > 0.0)) {
            return Err(Error::NotPositiveDefinite);
        }

        let n = overlap.nrows();
        Ok(DMatrix::from_fn(n, n, |i, j| {
            u[(i, j)] / overlap_eigenvalues[j].sqrt()
        }))
    }
}

impl GeneralizedEigenSolver for LowdinSolver {
    fn solve(
        &self,
        overlap: &DMatrix<f64>,
        hamiltonian: &DMatrix<f64>,
    ) -> Result<GeneralizedEigen> {
        let transform = Self::transformation_matrix(overlap)?;

        let transformed_hamiltonian = transform.transpose() * (hamiltonian * &transform);
        let (transformed_vectors, eigenvalues) =
            utils::sorted_eigs(utils::symmetrize(&transformed_hamiltonian));
        let eigenvectors = &transform * transformed_vectors;

        Ok(GeneralizedEigen {
            eigenvalues,
            eigenvectors,
        })
    }
}
