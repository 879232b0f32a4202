use itertools::Itertools;
use nalgebra::DVector;

use super::Objective;
use crate::error::{Error, Result};

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// The working state of a Nelder-Mead search: `n + 1` vertices in `n` dimensions and the
/// objective value at each of them.
#[derive(Clone, Debug)]
pub struct Simplex {
    vertices: Vec<DVector<f64>>,
    values: Vec<f64>,
    size: f64,
}

impl Simplex {
    /// Build the initial simplex from `initial` and one vertex displaced by `steps[i]` along
    /// each coordinate axis `i`.
    pub fn new(objective: &impl Objective, initial: &[f64], steps: &[f64]) -> Result<Self> {
        if initial.is_empty() {
            return Err(Error::InvalidInput(
                "cannot minimize a function of zero parameters".to_owned(),
            ));
        }
        if steps.len() != initial.len() {
            return Err(Error::DimensionMismatch {
                expected: initial.len(),
                found: steps.len(),
            });
        }
        if let Some(step) = steps.iter().find(|s| !s.is_finite() || **s == 0.0) {
            return Err(Error::InvalidInput(format!(
                "simplex step sizes must be finite and non-zero, got {step}"
            )));
        }

        let origin = DVector::from_column_slice(initial);
        let vertices = std::iter::once(origin.clone())
            .chain(steps.iter().enumerate().map(|(axis, &step)| {
                let mut vertex = origin.clone();
                vertex[axis] += step;
                vertex
            }))
            .collect::<Vec<_>>();

        let values = vertices
            .iter()
            .map(|vertex| kept_value(objective, vertex))
            .collect::<Result<Vec<_>>>()?;

        let size = simplex_size(&vertices);
        Ok(Self {
            vertices,
            values,
            size,
        })
    }

    /// Same as [`Simplex::new`] with an identical step along every axis.
    pub fn with_uniform_step(objective: &impl Objective, initial: &[f64], step: f64) -> Result<Self> {
        Self::new(objective, initial, &vec![step; initial.len()])
    }

    /// The vertex with the lowest objective value, and that value.
    pub fn best(&self) -> (&DVector<f64>, f64) {
        let index = self
            .values
            .iter()
            .position_min_by(|a, b| a.total_cmp(b))
            .unwrap_or(0);
        (&self.vertices[index], self.values[index])
    }

    /// Root mean square distance of the vertices from their centroid.
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn vertices(&self) -> &[DVector<f64>] {
        &self.vertices
    }

    /// Replace the worst vertex by a reflected, expanded or contracted point, or shrink the
    /// whole simplex towards the best vertex if none of those improve on it.
    pub fn iterate(&mut self, objective: &impl Objective) -> Result<()> {
        let order = (0..self.values.len())
            .sorted_by(|&a, &b| self.values[a].total_cmp(&self.values[b]))
            .collect_vec();
        let (lowest, highest) = (order[0], order[order.len() - 1]);
        let second_highest = order[order.len() - 2];

        let dimension = self.vertices.len() - 1;
        let centroid = (self.vertices.iter().sum::<DVector<f64>>() - &self.vertices[highest])
            / dimension as f64;
        let direction = &centroid - &self.vertices[highest];

        let reflected = &centroid + &direction * REFLECTION;
        let reflected_value = trial_value(objective, &reflected);

        if reflected_value < self.values[lowest] {
            let expanded = &centroid + &direction * EXPANSION;
            let expanded_value = trial_value(objective, &expanded);

            if expanded_value < reflected_value {
                log::trace!("expansion");
                self.replace(highest, expanded, expanded_value);
            } else {
                log::trace!("reflection");
                self.replace(highest, reflected, reflected_value);
            }
        } else if reflected_value >= self.values[second_highest] {
            // a tie with the second worst vertex is no improvement, accepting it would let
            // the two tied vertices swap roles and reflect back and forth forever
            if reflected_value <= self.values[highest] {
                self.replace(highest, reflected, reflected_value);
            }

            // contract towards the worst vertex, which may now be the reflected point
            let contracted = &centroid + (&self.vertices[highest] - &centroid) * CONTRACTION;
            let contracted_value = trial_value(objective, &contracted);

            if contracted_value <= self.values[highest] {
                log::trace!("contraction");
                self.replace(highest, contracted, contracted_value);
            } else {
                log::trace!("shrink");
                self.shrink(objective, lowest)?;
            }
        } else {
            log::trace!("reflection");
            self.replace(highest, reflected, reflected_value);
        }

        self.size = simplex_size(&self.vertices);
        if !self.size.is_finite() {
            return Err(Error::DegenerateSimplex);
        }

        Ok(())
    }

    fn replace(&mut self, index: usize, vertex: DVector<f64>, value: f64) {
        self.vertices[index] = vertex;
        self.values[index] = value;
    }

    fn shrink(&mut self, objective: &impl Objective, towards: usize) -> Result<()> {
        let best = self.vertices[towards].clone();

        for index in (0..self.vertices.len()).filter(|&index| index != towards) {
            let vertex = &best + (&self.vertices[index] - &best) * SHRINK;
            self.values[index] = kept_value(objective, &vertex)?;
            self.vertices[index] = vertex;
        }

        Ok(())
    }
}

/// Objective value at a vertex the simplex has to keep, any failure is fatal.
fn kept_value(objective: &impl Objective, point: &DVector<f64>) -> Result<f64> {
    let value = objective.value(point.as_slice())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteObjective { value })
    }
}

/// Objective value at a candidate point. Candidates the objective can't handle are ranked
/// behind every vertex so they are never accepted.
fn trial_value(objective: &impl Objective, point: &DVector<f64>) -> f64 {
    match objective.value(point.as_slice()) {
        Ok(value) if value.is_finite() => value,
        Ok(value) => {
            log::debug!("rejecting trial point {point:?} with value {value}");
            f64::INFINITY
        }
        Err(error) => {
            log::debug!("rejecting trial point {point:?}: {error}");
            f64::INFINITY
        }
    }
}

fn simplex_size(vertices: &[DVector<f64>]) -> f64 {
    let n_vertices = vertices.len() as f64;
    let centroid = vertices.iter().sum::<DVector<f64>>() / n_vertices;

    let mean_square = vertices
        .iter()
        .map(|vertex| (vertex - &centroid).norm_squared())
        .sum::<f64>()
        / n_vertices;

    mean_square.sqrt()
}
