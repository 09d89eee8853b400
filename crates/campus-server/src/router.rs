//! Axum router construction.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};

use crate::handlers;
use crate::handlers::uploads::MAX_FILES_PER_UPLOAD;
use crate::state::SharedState;

/// Headroom for multipart framing on top of the file bytes.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the complete router with every API route, the dashboard gate, and
/// public object serving.
pub fn build_router(state: SharedState) -> Router {
    let upload_limit = state
        .storage
        .max_upload_bytes()
        .saturating_mul(MAX_FILES_PER_UPLOAD)
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/", get(handlers::health::landing_handler))
        .route("/api/health", get(handlers::health::health_handler))
        // Auth
        .route("/api/auth/signup", post(handlers::auth::signup_handler))
        .route("/api/auth/signin", post(handlers::auth::signin_handler))
        .route("/api/auth/signout", post(handlers::auth::signout_handler))
        .route("/api/auth/me", get(handlers::auth::me_handler))
        // Dashboard gate
        .route("/dashboard", get(handlers::dashboard::dashboard_handler))
        .route(
            "/dashboard/:section",
            get(handlers::dashboard::dashboard_section_handler),
        )
        // Profiles
        .route(
            "/api/profile",
            get(handlers::profiles::get_own_profile_handler)
                .put(handlers::profiles::update_own_profile_handler),
        )
        .route(
            "/api/profiles/:user_id",
            get(handlers::profiles::get_profile_handler),
        )
        .route("/api/contacts", get(handlers::profiles::contacts_handler))
        // Feed
        .route(
            "/api/posts",
            get(handlers::posts::list_posts_handler).post(handlers::posts::create_post_handler),
        )
        .route(
            "/api/posts/:post_id/like",
            post(handlers::posts::like_post_handler).delete(handlers::posts::unlike_post_handler),
        )
        .route(
            "/api/posts/:post_id/comments",
            post(handlers::posts::add_comment_handler),
        )
        // Books
        .route(
            "/api/books",
            get(handlers::books::list_books_handler).post(handlers::books::create_book_handler),
        )
        .route(
            "/api/books/:book_id",
            get(handlers::books::get_book_handler).put(handlers::books::update_book_handler),
        )
        // Lost & found
        .route(
            "/api/lost-found",
            get(handlers::lost_found::list_reports_handler)
                .post(handlers::lost_found::create_report_handler),
        )
        .route(
            "/api/lost-found/:report_id/resolve",
            post(handlers::lost_found::resolve_report_handler),
        )
        // Study groups
        .route(
            "/api/study-groups",
            get(handlers::study_groups::list_groups_handler)
                .post(handlers::study_groups::create_group_handler),
        )
        .route(
            "/api/study-groups/:group_id",
            get(handlers::study_groups::get_group_handler),
        )
        .route(
            "/api/study-groups/:group_id/join",
            post(handlers::study_groups::join_group_handler),
        )
        .route(
            "/api/study-groups/:group_id/leave",
            post(handlers::study_groups::leave_group_handler),
        )
        .route(
            "/api/study-groups/:group_id/close",
            post(handlers::study_groups::close_group_handler),
        )
        .route(
            "/api/study-groups/:group_id/messages",
            get(handlers::study_groups::list_messages_handler)
                .post(handlers::study_groups::send_message_handler),
        )
        // Resources
        .route(
            "/api/resources",
            get(handlers::resources::list_resources_handler)
                .post(handlers::resources::create_resource_handler),
        )
        .route(
            "/api/resources/:resource_id/download",
            post(handlers::resources::download_resource_handler),
        )
        // Direct messages
        .route(
            "/api/conversations",
            get(handlers::conversations::list_conversations_handler),
        )
        .route(
            "/api/conversations/:peer_id",
            get(handlers::conversations::get_conversation_handler)
                .post(handlers::conversations::send_direct_handler),
        )
        // Uploads
        .route(
            "/api/uploads/:bucket",
            post(handlers::uploads::upload_handler).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/storage/:bucket/*path",
            get(handlers::uploads::serve_object_handler),
        )
        // WebSocket
        .route("/api/ws", get(handlers::websocket::ws_handler))
        .with_state(state)
}
