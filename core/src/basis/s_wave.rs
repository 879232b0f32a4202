use std::f64::consts::PI;

use serde::Serialize;

use super::GaussianBasis;

/// Plain spherical Gaussians `exp(-alpha r^2)`, all coupled to each other.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SWaveBasis {
    n_basis: usize,
}

impl SWaveBasis {
    pub fn new(n_basis: usize) -> Self {
        Self { n_basis }
    }
}

impl GaussianBasis for SWaveBasis {
    fn n_basis(&self) -> usize {
        self.n_basis
    }

    fn overlap(&self, (a, b): (f64, f64)) -> f64 {
        (PI / (a + b)).powf(1.5)
    }

    fn hamiltonian(&self, (a, b): (f64, f64)) -> f64 {
        let sum = a + b;
        (3.0 * a * b * (PI / sum).powf(1.5) - 2.0 * PI) / sum
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::Rng;

    use crate::basis::{compute_matrices, GaussianBasis, SWaveBasis};

    fn random_widths(n: usize) -> Vec<f64> {
        let mut rng = rand::thread_rng();
        let mut widths: Vec<f64> = Vec::with_capacity(n);
        while widths.len() < n {
            let width = 10f64.powf(rng.gen_range(-1.5..1.0));
            // keep the widths well separated so the overlap stays well conditioned
            if widths.iter().all(|w| (w / width).ln().abs() > 0.2) {
                widths.push(width);
            }
        }
        widths
    }

    #[test]
    fn closed_form_elements() {
        let basis = SWaveBasis::new(1);
        // a + b = 2 makes (pi / (a + b))^1.5 = (pi / 2)^1.5
        let s = (std::f64::consts::PI / 2.0).powf(1.5);
        assert_relative_eq!(basis.overlap((0.5, 1.5)), s, epsilon = 1e-14);
        assert_relative_eq!(
            basis.hamiltonian((0.5, 1.5)),
            (3.0 * 0.75 * s - 2.0 * std::f64::consts::PI) / 2.0,
            epsilon = 1e-14
        );
    }

    #[test]
    fn matrices_are_symmetric_and_overlap_positive_definite() {
        for n in 1..=6 {
            let widths = random_widths(n);
            let matrices = compute_matrices(&SWaveBasis::new(n), &widths).unwrap();

            assert_eq!(matrices.overlap, matrices.overlap.transpose());
            assert_eq!(matrices.hamiltonian, matrices.hamiltonian.transpose());
            assert!(matrices.overlap.diagonal().iter().all(|&s| s > 0.0));
            assert!(matrices.overlap.clone().cholesky().is_some());
        }
    }
}
