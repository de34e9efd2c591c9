//! Shared application state injected into handlers.

use std::sync::Arc;

use ro_core::repositories::AccountRepository;
use ro_core::services::auth::AuthService;
use ro_core::services::gateway::{MailGateway, SmsGateway};
use ro_core::services::recovery::RecoveryService;

/// Application state holding the service graph
pub struct AppState<R, S, M>
where
    R: AccountRepository,
    S: SmsGateway,
    M: MailGateway,
{
    /// Signup and login service
    pub auth_service: Arc<AuthService<R, S, M>>,
    /// Recovery workflow engine
    pub recovery_service: Arc<RecoveryService<R, S, M>>,
}

impl<R, S, M> AppState<R, S, M>
where
    R: AccountRepository,
    S: SmsGateway,
    M: MailGateway,
{
    /// Create the state from an assembled service graph
    pub fn new(
        auth_service: Arc<AuthService<R, S, M>>,
        recovery_service: Arc<RecoveryService<R, S, M>>,
    ) -> Self {
        Self {
            auth_service,
            recovery_service,
        }
    }
}
