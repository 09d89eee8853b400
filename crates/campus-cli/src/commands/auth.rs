use campus_auth::{SignUp, token_store};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct LoginResponse {
    user_id: String,
    email: String,
    expires_at: DateTime<Utc>,
    stored: bool,
}

#[derive(Debug, Serialize)]
struct LogoutResponse {
    logged_out: bool,
    session_ended: bool,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    authenticated: bool,
    token_source: Option<&'static str>,
    user_id: Option<String>,
    email: Option<String>,
}

pub async fn handle(action: &AuthCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AuthCommands::Signup {
            email,
            password,
            full_name,
            student_id,
            department,
        } => {
            let form = SignUp {
                email: email.clone(),
                password: password.clone(),
                full_name: full_name.clone(),
                student_id: student_id.clone(),
                department: department.clone(),
            };
            let profile = ctx.auth.sign_up(&form).await?;
            output(&profile, flags.format)
        }
        AuthCommands::Login { email, password } => {
            let session = ctx.auth.sign_in(email, password).await?;
            token_store::store(&session.token)?;
            tracing::info!(user_id = %session.user_id, "session token stored");
            output(
                &LoginResponse {
                    user_id: session.user_id,
                    email: session.email,
                    expires_at: session.expires_at,
                    stored: true,
                },
                flags.format,
            )
        }
        AuthCommands::Logout => {
            let session_ended = match ctx.session_token() {
                Some(token) => ctx.auth.sign_out(&token).await?,
                None => false,
            };
            campus_auth::logout()?;
            output(
                &LogoutResponse {
                    logged_out: true,
                    session_ended,
                },
                flags.format,
            )
        }
        AuthCommands::Status => {
            let Some((token, source)) = token_store::load_with_source() else {
                return output(
                    &StatusResponse {
                        authenticated: false,
                        token_source: None,
                        user_id: None,
                        email: None,
                    },
                    flags.format,
                );
            };
            let identity = ctx.auth.current_user(&token).await?;
            output(
                &StatusResponse {
                    authenticated: identity.is_some(),
                    token_source: Some(source.as_str()),
                    user_id: identity.as_ref().map(|id| id.user_id.clone()),
                    email: identity.map(|id| id.email),
                },
                flags.format,
            )
        }
    }
}
