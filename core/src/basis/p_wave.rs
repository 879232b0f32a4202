use std::{f64::consts::PI, ops::Range};

use serde::Serialize;
use smallvec::SmallVec;

use super::GaussianBasis;
use crate::error::{Error, Result};

/// How the p-wave basis is split over cartesian directions: for each direction used, the
/// number of basis functions `x_k exp(-alpha r^2)` along that axis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DirectionConfig {
    per_direction_counts: SmallVec<[usize; 3]>,
}

impl DirectionConfig {
    /// There are only three cartesian axes.
    pub const MAX_DIRECTIONS: usize = 3;

    pub fn new(per_direction_counts: impl IntoIterator<Item = usize>) -> Result<Self> {
        let per_direction_counts: SmallVec<[usize; 3]> =
            per_direction_counts.into_iter().collect();

        if !(1..=Self::MAX_DIRECTIONS).contains(&per_direction_counts.len()) {
            return Err(Error::InvalidInput(format!(
                "number of directions must be between 1 and {}, got {}",
                Self::MAX_DIRECTIONS,
                per_direction_counts.len()
            )));
        }

        if per_direction_counts.iter().sum::<usize>() == 0 {
            return Err(Error::InvalidInput(
                "at least one basis function is required".to_owned(),
            ));
        }

        Ok(Self {
            per_direction_counts,
        })
    }

    /// The same number of functions along each of the first `directions` axes.
    pub fn uniform(directions: usize, count: usize) -> Result<Self> {
        Self::new(std::iter::repeat(count).take(directions))
    }

    pub fn direction_count(&self) -> usize {
        self.per_direction_counts.len()
    }

    pub fn per_direction_counts(&self) -> &[usize] {
        &self.per_direction_counts
    }

    pub fn n_basis(&self) -> usize {
        self.per_direction_counts.iter().sum()
    }

    /// Index ranges of the direction blocks, in order of increasing direction.
    pub fn blocks(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.per_direction_counts.iter().scan(0, |end, &count| {
            let start = *end;
            *end += count;
            Some(start..*end)
        })
    }
}

/// Gaussians multiplied by a cartesian coordinate. Functions along different axes are
/// orthogonal and don't interact, so both matrices are block diagonal.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CartesianPWaveBasis {
    directions: DirectionConfig,
    #[serde(skip)]
    direction_of: Vec<usize>,
}

impl CartesianPWaveBasis {
    pub fn new(directions: DirectionConfig) -> Self {
        let direction_of = directions
            .blocks()
            .enumerate()
            .flat_map(|(direction, block)| block.map(move |_| direction))
            .collect();

        Self {
            directions,
            direction_of,
        }
    }
}

impl GaussianBasis for CartesianPWaveBasis {
    fn n_basis(&self) -> usize {
        self.direction_of.len()
    }

    fn couples(&self, i: usize, j: usize) -> bool {
        self.direction_of[i] == self.direction_of[j]
    }

    fn overlap(&self, (a, b): (f64, f64)) -> f64 {
        0.5 * PI.powf(1.5) / (a + b).powf(2.5)
    }

    fn hamiltonian(&self, (a, b): (f64, f64)) -> f64 {
        let sum = a + b;
        2.5 * PI * PI.sqrt() * a * b / sum.powf(3.5) - 2.0 * PI / (3.0 * sum.powi(2))
    }
}
