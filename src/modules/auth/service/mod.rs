pub mod hash;
pub mod jwt;
pub mod otp;
pub mod policy;
pub mod role;
pub mod token;
