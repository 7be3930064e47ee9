//! Validation and submission layer of the cipher configuration form.

pub mod client;
pub mod error;
pub mod form;
pub mod gate;
pub mod plugboard;
pub mod rotor;
pub mod session;
pub mod validation;

pub use client::{ClientBuildError, EncodeClient, EncodeError, EncodeService};
pub use error::{FormError, SubmitError};
pub use form::{Banners, Completion, EncodeForm, FormEvent, Submission};
pub use gate::{PayloadError, SubmissionBlocked, SubmissionGate};
pub use plugboard::{validate_plugboard, PlugboardError, PlugboardReport, PlugboardValidator};
pub use rotor::{validate_rotors, RotorError, RotorValidator};
pub use session::{BannerSnapshot, FormSession};
pub use validation::ValidationState;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
