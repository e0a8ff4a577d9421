//! Link handshake: collaborator traits, fixed-answer collaborators and the
//! handler that drives the eligibility gate.

pub mod fixed;
pub mod handler;
pub mod traits;

pub use fixed::{StaticAttestationCheck, StaticCoordinator, StaticLinkGate};
pub use handler::LinkHandler;
pub use traits::{AttestationCheck, LinkConfigurationCoordinator, LinkGate};
