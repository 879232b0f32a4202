//! Solvers for the generalized symmetric-definite eigenproblem `H v = lambda S v`.
mod cholesky;
mod lowdin;

pub use cholesky::CholeskySolver;
pub use lowdin::LowdinSolver;

use nalgebra::{DMatrix, DVector, DVectorView};
use serde::Serialize;

use crate::error::Result;

/// Solution of a generalized eigenproblem.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeneralizedEigen {
    /// eigenvalues in ascending order
    pub eigenvalues: DVector<f64>,
    /// the eigenvector of the `k`-th eigenvalue is column `k`. Vectors are expressed in the
    /// original (non-orthogonal) basis and normalized so that `v^T S v = 1`.
    pub eigenvectors: DMatrix<f64>,
}

impl GeneralizedEigen {
    /// The lowest eigenvalue, i.e. the variational estimate of the ground state energy.
    pub fn ground_state_energy(&self) -> f64 {
        self.eigenvalues.min()
    }

    /// Expansion coefficients of the ground state.
    pub fn ground_state(&self) -> DVectorView<'_, f64> {
        self.eigenvectors.column(0)
    }
}

pub trait GeneralizedEigenSolver {
    /// Solve `H v = lambda S v` for a symmetric `hamiltonian` and a symmetric, positive
    /// definite `overlap`.
    fn solve(&self, overlap: &DMatrix<f64>, hamiltonian: &DMatrix<f64>)
        -> Result<GeneralizedEigen>;
}

/// Solver selection that can be made at runtime.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolverKind {
    #[default]
    Cholesky,
    Lowdin,
}

impl GeneralizedEigenSolver for SolverKind {
    fn solve(
        &self,
        overlap: &DMatrix<f64>,
        hamiltonian: &DMatrix<f64>,
    ) -> Result<GeneralizedEigen> {
        match self {
            SolverKind::Cholesky => CholeskySolver.solve(overlap, hamiltonian),
            SolverKind::Lowdin => LowdinSolver.solve(overlap, hamiltonian),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    use super::{GeneralizedEigen, GeneralizedEigenSolver, SolverKind};
    use crate::{
        basis::{compute_matrices, BasisMatrices, CartesianPWaveBasis, DirectionConfig, SWaveBasis},
        error::Error,
    };

    const SOLVERS: [SolverKind; 2] = [SolverKind::Cholesky, SolverKind::Lowdin];

    fn s_wave_matrices() -> BasisMatrices {
        compute_matrices(&SWaveBasis::new(4), &[0.05, 0.2, 0.9, 4.0]).unwrap()
    }

    fn p_wave_matrices() -> BasisMatrices {
        let config = DirectionConfig::new([2, 3]).unwrap();
        compute_matrices(
            &CartesianPWaveBasis::new(config),
            &[0.1, 0.6, 0.03, 0.2, 1.5],
        )
        .unwrap()
    }

    fn check_eigenpairs(matrices: &BasisMatrices, eigen: &GeneralizedEigen) {
        let BasisMatrices {
            overlap,
            hamiltonian,
        } = matrices;

        assert!(eigen.eigenvalues.as_slice().windows(2).all(|w| w[0] <= w[1]));

        for (k, &value) in eigen.eigenvalues.iter().enumerate() {
            let v = eigen.eigenvectors.column(k);
            let lhs = hamiltonian * v;
            let rhs = overlap * v * value;
            assert_relative_eq!(lhs, rhs, epsilon = 1e-8);
            assert_relative_eq!(v.dot(&(overlap * v)), 1.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn both_solvers_give_valid_eigenpairs() {
        for matrices in [s_wave_matrices(), p_wave_matrices()] {
            for solver in SOLVERS {
                let eigen = solver.solve(&matrices.overlap, &matrices.hamiltonian).unwrap();
                check_eigenpairs(&matrices, &eigen);
            }
        }
    }

    #[test]
    fn solvers_agree_on_eigenvalues() {
        for matrices in [s_wave_matrices(), p_wave_matrices()] {
            let [direct, lowdin] =
                SOLVERS.map(|solver| solver.solve(&matrices.overlap, &matrices.hamiltonian));
            let (direct, lowdin) = (direct.unwrap(), lowdin.unwrap());

            assert_relative_eq!(direct.eigenvalues, lowdin.eigenvalues, epsilon = 1e-6);
        }
    }

    #[test]
    fn single_function_eigenvalue_is_ratio() {
        let matrices = compute_matrices(&SWaveBasis::new(1), &[0.7]).unwrap();
        let expected = matrices.hamiltonian[(0, 0)] / matrices.overlap[(0, 0)];

        for solver in SOLVERS {
            let eigen = solver.solve(&matrices.overlap, &matrices.hamiltonian).unwrap();
            assert_eq!(eigen.eigenvalues.len(), 1);
            assert_relative_eq!(eigen.ground_state_energy(), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn ground_state_belongs_to_lowest_eigenvalue() {
        let matrices = s_wave_matrices();

        for solver in SOLVERS {
            let eigen = solver.solve(&matrices.overlap, &matrices.hamiltonian).unwrap();
            let v = eigen.ground_state();
            let energy = eigen.ground_state_energy();

            assert_relative_eq!(
                &matrices.hamiltonian * v,
                &matrices.overlap * v * energy,
                epsilon = 1e-8
            );
            assert_relative_eq!(v.dot(&(&matrices.overlap * v)), 1.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn indefinite_overlap_is_rejected() {
        let overlap = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
        let hamiltonian = DMatrix::identity(2, 2);

        for solver in SOLVERS {
            assert_eq!(
                solver.solve(&overlap, &hamiltonian),
                Err(Error::NotPositiveDefinite)
            );
        }
    }
}
