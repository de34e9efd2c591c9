//! Authentication and recovery routes

pub mod forgot_password;
pub mod login;
pub mod reset_password;
pub mod signup;
pub mod verify;

use actix_web::web;

use ro_core::repositories::AccountRepository;
use ro_core::services::gateway::{MailGateway, SmsGateway};

/// Register the auth routes under `/api/v1/auth`
pub fn configure<R, S, M>(cfg: &mut web::ServiceConfig)
where
    R: AccountRepository + 'static,
    S: SmsGateway + 'static,
    M: MailGateway + 'static,
{
    cfg.service(
        web::scope("/api/v1/auth")
            .route("/signup", web::post().to(signup::signup::<R, S, M>))
            .route("/login", web::post().to(login::login::<R, S, M>))
            .route(
                "/forgot-password",
                web::post().to(forgot_password::forgot_password::<R, S, M>),
            )
            .route(
                "/reset-password",
                web::post().to(reset_password::reset_password::<R, S, M>),
            )
            .route("/verify", web::post().to(verify::verify::<R, S, M>)),
    );
}
