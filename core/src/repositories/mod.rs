pub mod verification_code;

pub use verification_code::{InMemoryVerificationCodeRepository, VerificationCodeRepository};
