//! Direct solvers for linear systems
//!
//! This module provides direct (non-iterative) solvers:
//! - [`gauss_jordan_solve`]: Gauss-Jordan elimination to reduced row-echelon form
//! - [`matrix_rank`]: numerical rank, used for the solvability check

mod gauss_jordan;
mod rank;

pub use gauss_jordan::{
    Classification, GaussJordanSolution, GaussJordanSolver, PivotStrategy, SolverConfig, SystemKind,
    ZeroRowCheck, gauss_jordan_solve,
};
pub use rank::{matrix_rank, matrix_rank_with_tolerance};
