//! # Exterior Ballistics
//!
//! Point-mass trajectory integration for small-arms projectiles in imperial
//! units: velocity-banded ballistic coefficients, standard G drag models,
//! wind drift, atmospheric correction and a zero-angle solver.
//!
//! ```no_run
//! use exterior_ballistics::{compute_zero_angle, BallisticsContext, DragModel, TrajectoryInputs};
//!
//! let zero = compute_zero_angle(DragModel::G1, 0.495, 2600.0, 1.5, 200.0, 0.0);
//! let mut context = BallisticsContext::new();
//! context.add_coefficient(0.495, 0.0, 0.0);
//! context.compute_trajectory(&TrajectoryInputs {
//!     zero_angle: zero,
//!     max_range: 600,
//!     ..Default::default()
//! });
//! println!("drop at 500 yd: {:.1} in", context.path_y(500));
//! ```

// Re-export the main types and functions
pub use atmosphere::{apply_atmosphere, Atmosphere};
pub use ballistic_coefficient::{BallisticCoefficient, CoefficientSet};
pub use cli_api::{
    BallisticInputs, TrajectoryReport, TrajectoryRow, TrajectorySolver, WindConditions,
};
pub use config::{load_config, LoadConfig};
pub use context::{BallisticsContext, Termination};
pub use drag_model::DragModel;
pub use error::BallisticsError;
pub use trajectory_sampling::{compute_energy, SampleField, TrajectorySample};
pub use trajectory_solver::TrajectoryInputs;
pub use wind::WindComponents;
pub use zero_angle::{compute_zero_angle, solve_zero_angle, ZeroSolution};

// Module declarations
pub mod angle;
pub mod atmosphere;
mod ballistic_coefficient;
pub mod cli_api;
pub mod config;
pub mod constants;
mod context;
pub mod drag;
mod drag_model;
mod error;
pub mod ffi;
mod trajectory_sampling;
mod trajectory_solver;
pub mod wind;
mod zero_angle;
