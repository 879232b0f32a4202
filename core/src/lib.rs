//! Variational estimates of a two-body bound state energy in a basis of co-centered
//! Gaussians.
//!
//! The widths of the Gaussians are the variational parameters. For a given set of widths the
//! overlap and hamiltonian matrices are built analytically ([`basis`]), the generalized
//! eigenproblem is solved ([`eigen`]) and its lowest eigenvalue is the energy estimate
//! ([`energy`]). [`optim`] searches the widths that minimize it.
pub mod basis;
pub mod eigen;
pub mod energy;
pub mod error;
pub mod optim;
mod utils;

pub use error::{Error, Result};
