mod verification_code_repository_impl;

pub use verification_code_repository_impl::MySqlVerificationCodeRepository;
