//! Passcode route handlers
//!
//! Guest endpoints for issuing a passcode by email and verifying it.

pub mod issue;
pub mod verify;

use std::sync::Arc;

use om_core::repositories::OtpRepository;
use om_core::services::{NotifierTrait, OtpCacheTrait, OtpManager};

pub use issue::issue_otp;
pub use verify::verify_otp;

/// Application state that holds shared services
pub struct AppState<R, C, N>
where
    R: OtpRepository + ?Sized,
    C: OtpCacheTrait + ?Sized,
    N: NotifierTrait + ?Sized,
{
    pub otp_manager: Arc<OtpManager<R, C, N>>,
}

impl<R, C, N> AppState<R, C, N>
where
    R: OtpRepository + ?Sized,
    C: OtpCacheTrait + ?Sized,
    N: NotifierTrait + ?Sized,
{
    pub fn new(otp_manager: OtpManager<R, C, N>) -> Self {
        Self {
            otp_manager: Arc::new(otp_manager),
        }
    }
}
