//! hm-muscle: Hill-type muscle contraction model.
//!
//! The model is a static mapping from instantaneous state to instantaneous
//! force. It covers:
//! - rigid-tendon pennated-fiber geometry (muscle-tendon length to fiber length)
//! - normalized active and passive force-length curves
//! - activation assignment with range validation
//! - architectural adaptation by rescaling sarcomere counts in series
//!   (fiber length) and in parallel (maximum isometric force)
//!
//! There is no tendon elasticity, no pennation dynamics and no time
//! integration. Tendon length is supplied by a [`TendonLength`] provider.
//!
//! # Example
//!
//! ```
//! use hm_core::units::m;
//! use hm_muscle::{MuscleModel, RigidTendon};
//!
//! let mut muscle = MuscleModel::default();
//! muscle.set_activation(vec![0.0, 0.5, 1.0]).unwrap();
//! muscle
//!     .set_fiber_length(m(0.31), &RigidTendon::new(m(0.26)))
//!     .unwrap();
//!
//! let force = muscle.compute_total_force(false).unwrap();
//! assert_eq!(force.len(), 3);
//! ```

pub mod activation;
pub mod curves;
pub mod error;
pub mod geometry;
pub mod model;
pub mod params;
pub mod tendon;

pub use activation::Activation;
pub use curves::{active_force_length, passive_force_length};
pub use error::{MuscleError, MuscleResult};
pub use geometry::fiber_length;
pub use model::{ForceComponents, MuscleModel};
pub use params::MuscleParams;
pub use tendon::{RigidTendon, TendonLength};
