// Field oriented control primitives: frame vectors, the electrical angle
// transform, and the simulated position source used while the sensorless
// estimator has no lock.

pub mod sim_position;
pub mod trig;
pub mod vect;

pub use sim_position::SimulatedPosition;
pub use trig::ElectricalAngle;
pub use vect::{DqVector, PhaseVector};
