pub mod verification;

pub use verification::{
    CaptchaResponse, SendCodeResponse, SendEmailCodeRequest, SendSmsCodeRequest,
    VerifyCaptchaRequest, VerifyCaptchaResponse, VerifyCodeRequest, VerifyCodeResponse,
};
