use std::sync::Arc;

use campus_auth::{AuthError, AuthService, SignUp};
use campus_config::AuthConfig;
use campus_db::{CampusDb, CampusService, ChangeFeed};
use pretty_assertions::assert_eq;
use rstest::rstest;

async fn auth_service(config: AuthConfig) -> AuthService {
    let db = CampusDb::open_local(":memory:").await.unwrap();
    AuthService::new(
        Arc::new(CampusService::from_db(db, ChangeFeed::new(16))),
        config,
    )
}

fn form(email: &str, password: &str) -> SignUp {
    SignUp {
        email: email.into(),
        password: password.into(),
        full_name: "Ada Lovelace".into(),
        student_id: "S-001".into(),
        department: "Mathematics".into(),
    }
}

#[tokio::test]
async fn sign_up_sign_in_and_resolve() {
    let auth = auth_service(AuthConfig::default()).await;

    let profile = auth.sign_up(&form(" Ada@Campus.EDU ", "secret1")).await.unwrap();
    assert_eq!(profile.full_name, "Ada Lovelace");

    let session = auth.sign_in("ada@campus.edu", "secret1").await.unwrap();
    assert_eq!(session.user_id, profile.id);
    assert_eq!(session.email, "ada@campus.edu");

    let me = auth.current_user(&session.token).await.unwrap().unwrap();
    assert_eq!(me.user_id, profile.id);

    assert!(auth.sign_out(&session.token).await.unwrap());
    assert!(auth.current_user(&session.token).await.unwrap().is_none());
    assert!(!auth.sign_out(&session.token).await.unwrap());
}

#[tokio::test]
async fn duplicate_email_is_taken() {
    let auth = auth_service(AuthConfig::default()).await;
    auth.sign_up(&form("ada@campus.edu", "secret1")).await.unwrap();

    let err = auth
        .sign_up(&form("ADA@campus.edu", "another1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::EmailTaken(email) if email == "ada@campus.edu"));
}

#[rstest]
#[case("not-an-email", "secret1")]
#[case("ada@campus.edu", "123")]
#[tokio::test]
async fn bad_sign_up_input_is_rejected(#[case] email: &str, #[case] password: &str) {
    let auth = auth_service(AuthConfig::default()).await;
    let err = auth.sign_up(&form(email, password)).await.unwrap_err();
    assert!(matches!(
        err,
        AuthError::InvalidInput(_) | AuthError::WeakPassword { min: 6 }
    ));
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let auth = auth_service(AuthConfig::default()).await;
    auth.sign_up(&form("ada@campus.edu", "secret1")).await.unwrap();

    assert!(matches!(
        auth.sign_in("ada@campus.edu", "wrong-password").await,
        Err(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        auth.sign_in("nobody@campus.edu", "secret1").await,
        Err(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn unknown_and_expired_tokens_are_absent() {
    let config = AuthConfig {
        session_ttl_hours: -1,
        ..AuthConfig::default()
    };
    let auth = auth_service(config).await;
    auth.sign_up(&form("ada@campus.edu", "secret1")).await.unwrap();

    assert!(auth.current_user("made-up").await.unwrap().is_none());
    assert!(auth.current_user("").await.unwrap().is_none());

    let expired = auth.sign_in("ada@campus.edu", "secret1").await.unwrap();
    assert!(auth.current_user(&expired.token).await.unwrap().is_none());
    assert!(matches!(
        auth.require_user(&expired.token).await,
        Err(AuthError::NotAuthenticated)
    ));
}
