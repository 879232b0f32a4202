//! The variational energy as a function of the basis widths.
use crate::{
    basis::{compute_matrices, BasisMatrices, GaussianBasis},
    eigen::{GeneralizedEigen, GeneralizedEigenSolver},
    error::Result,
    optim::Objective,
};

/// Maps a set of widths to the lowest generalized eigenvalue of the basis built from them.
///
/// Matrices are rebuilt from scratch on every call; nothing is cached between evaluations.
#[derive(Clone, Debug)]
pub struct EnergyFunctional<B, S> {
    basis: B,
    solver: S,
}

impl<B: GaussianBasis, S: GeneralizedEigenSolver> EnergyFunctional<B, S> {
    pub fn new(basis: B, solver: S) -> Self {
        Self { basis, solver }
    }

    pub fn basis(&self) -> &B {
        &self.basis
    }

    pub fn matrices(&self, widths: &[f64]) -> Result<BasisMatrices> {
        compute_matrices(&self.basis, widths)
    }

    /// All eigenvalues and eigenvectors for the given widths
    pub fn spectrum(&self, widths: &[f64]) -> Result<GeneralizedEigen> {
        let BasisMatrices {
            overlap,
            hamiltonian,
        } = self.matrices(widths)?;
        self.solver.solve(&overlap, &hamiltonian)
    }

    /// The ground state energy estimate for the given widths
    pub fn evaluate(&self, widths: &[f64]) -> Result<f64> {
        let energy = self.spectrum(widths)?.ground_state_energy();
        log::trace!("energy at {widths:?} = {energy}");
        Ok(energy)
    }
}

impl<B: GaussianBasis, S: GeneralizedEigenSolver> Objective for EnergyFunctional<B, S> {
    fn value(&self, point: &[f64]) -> Result<f64> {
        self.evaluate(point)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::EnergyFunctional;
    use crate::{
        basis::{CartesianPWaveBasis, DirectionConfig, SWaveBasis},
        eigen::{CholeskySolver, LowdinSolver, SolverKind},
        error::Error,
    };

    const WIDTHS: [f64; 3] = [0.109818, 0.405771, 2.22776];

    #[test]
    fn s_wave_reference_energy() {
        let cholesky = EnergyFunctional::new(SWaveBasis::new(3), CholeskySolver);
        let lowdin = EnergyFunctional::new(SWaveBasis::new(3), LowdinSolver);

        assert_relative_eq!(cholesky.evaluate(&WIDTHS).unwrap(), -0.495010586722, epsilon = 1e-9);
        assert_relative_eq!(lowdin.evaluate(&WIDTHS).unwrap(), -0.495010586722, epsilon = 1e-9);

        let spectrum = lowdin.spectrum(&WIDTHS).unwrap();
        assert_relative_eq!(spectrum.eigenvalues[1], 0.072398858569, epsilon = 1e-9);
        assert_relative_eq!(spectrum.eigenvalues[2], 2.668770715608, epsilon = 1e-9);
    }

    #[test]
    fn s_wave_energy_is_above_exact_ground_state() {
        // the potential is -1/r, whose exact ground state energy is -1/2
        let functional = EnergyFunctional::new(SWaveBasis::new(3), CholeskySolver);
        for widths in [[0.1, 0.4, 2.2], [0.05, 1.0, 20.0], [0.3, 0.31, 0.32]] {
            assert!(functional.evaluate(&widths).unwrap() > -0.5);
        }
    }

    #[test]
    fn single_gaussian_energy() {
        // E(a) = 3a/2 - 2 sqrt(2a / pi), minimal at a = 8 / (9 pi)
        let functional = EnergyFunctional::new(SWaveBasis::new(1), CholeskySolver);
        let alpha = 8.0 / (9.0 * PI);
        assert_relative_eq!(
            functional.evaluate(&[alpha]).unwrap(),
            -4.0 / (3.0 * PI),
            epsilon = 1e-12
        );
    }

    #[test]
    fn p_wave_reference_energy() {
        let single = EnergyFunctional::new(
            CartesianPWaveBasis::new(DirectionConfig::new([3]).unwrap()),
            SolverKind::Cholesky,
        );
        assert_relative_eq!(single.evaluate(&WIDTHS).unwrap(), -0.079446527922, epsilon = 1e-9);

        // two identical, independent directions: every level becomes doubly degenerate
        let double = EnergyFunctional::new(
            CartesianPWaveBasis::new(DirectionConfig::uniform(2, 3).unwrap()),
            SolverKind::Lowdin,
        );
        let widths = [WIDTHS, WIDTHS].concat();
        let eigenvalues = double.spectrum(&widths).unwrap().eigenvalues;
        let expected = [-0.079446527922, 0.613427184930, 4.979881079753];
        for (k, value) in expected.into_iter().enumerate() {
            assert_relative_eq!(eigenvalues[2 * k], value, epsilon = 1e-8);
            assert_relative_eq!(eigenvalues[2 * k + 1], value, epsilon = 1e-8);
        }
    }

    #[test]
    fn evaluation_has_no_hidden_state() {
        let functional = EnergyFunctional::new(SWaveBasis::new(3), CholeskySolver);
        let first = functional.evaluate(&WIDTHS).unwrap();
        functional.evaluate(&[0.2, 0.9, 3.0]).unwrap();
        let second = functional.evaluate(&WIDTHS).unwrap();

        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn invalid_widths_are_reported() {
        let functional = EnergyFunctional::new(SWaveBasis::new(3), CholeskySolver);
        assert!(matches!(
            functional.evaluate(&[0.1, -0.4, 2.0]),
            Err(Error::InvalidInput(_))
        ));
    }
}
