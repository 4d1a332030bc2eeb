//! JSON routes over the platform.
//!
//! There are no sessions: commands name their requester in the body, and the
//! platform's role checks decide what they may do.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::errors::PlatformError;
use crate::platform::Platform;

type HandlerResult = Result<HttpResponse, PlatformError>;

#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct NewPost {
    pub post_id: String,
    pub author: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct PostsQuery {
    pub viewer: Option<String>,
}

#[derive(Deserialize)]
pub struct LikeBody {
    pub username: String,
}

#[derive(Deserialize)]
pub struct FollowBody {
    pub follower: String,
    pub following: String,
}

#[derive(Deserialize)]
pub struct BlockBody {
    pub blocker: String,
    pub blocked: String,
}

#[derive(Deserialize)]
pub struct UserAction {
    pub requester: String,
    pub username: String,
}

#[derive(Deserialize)]
pub struct PostAction {
    pub requester: String,
    pub post_id: String,
}

/// Registers every route on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/signup", web::post().to(signup))
        .route("/login", web::post().to(login))
        .route("/posts", web::post().to(create_post))
        .route("/posts", web::get().to(list_posts))
        .route("/posts/{post_id}/like", web::post().to(like_post))
        .route("/follow", web::post().to(follow))
        .route("/block", web::post().to(block))
        .route("/users", web::get().to(list_users))
        .route("/users/{username}/role", web::get().to(get_role))
        .route("/users/{username}/followings", web::get().to(get_followings))
        .route("/users/{username}/followers", web::get().to(get_followers))
        .route("/users/{username}/blocked", web::get().to(get_blocked))
        .route("/activity", web::get().to(recent_activity))
        .route("/admin/delete_user", web::post().to(delete_user))
        .route("/admin/delete_post", web::post().to(delete_post))
        .route("/admin/promote", web::post().to(promote))
        .route("/admin/demote", web::post().to(demote))
        .default_service(web::route().to(not_found));
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({"error": "No route found"}))
}

// === Accounts ===

async fn signup(platform: web::Data<Platform>, body: web::Json<Credentials>) -> HandlerResult {
    let msg = platform.signup(&body.username, &body.password)?;
    Ok(HttpResponse::Created().json(msg))
}

async fn login(platform: web::Data<Platform>, body: web::Json<Credentials>) -> HandlerResult {
    let msg = platform.login(&body.username, &body.password)?;
    Ok(HttpResponse::Ok().json(msg))
}

async fn list_users(platform: web::Data<Platform>) -> HttpResponse {
    HttpResponse::Ok().json(platform.users())
}

async fn get_role(platform: web::Data<Platform>, path: web::Path<String>) -> HttpResponse {
    HttpResponse::Ok().json(platform.role_of(&path))
}

// === Posts ===

async fn create_post(platform: web::Data<Platform>, body: web::Json<NewPost>) -> HandlerResult {
    let post = platform.create_post(&body.post_id, &body.author, &body.content)?;
    Ok(HttpResponse::Created().json(post))
}

async fn list_posts(platform: web::Data<Platform>, query: web::Query<PostsQuery>) -> HttpResponse {
    let posts = match &query.viewer {
        Some(viewer) => platform.visible_posts(viewer),
        None => platform.list_posts(),
    };
    HttpResponse::Ok().json(posts)
}

async fn like_post(
    platform: web::Data<Platform>,
    path: web::Path<String>,
    body: web::Json<LikeBody>,
) -> HandlerResult {
    let msg = platform.like(&body.username, &path)?;
    Ok(HttpResponse::Ok().json(msg))
}

// === Social graph ===

async fn follow(platform: web::Data<Platform>, body: web::Json<FollowBody>) -> HandlerResult {
    let msg = platform.follow(&body.follower, &body.following)?;
    Ok(HttpResponse::Ok().json(msg))
}

async fn block(platform: web::Data<Platform>, body: web::Json<BlockBody>) -> HandlerResult {
    let msg = platform.block(&body.blocker, &body.blocked)?;
    Ok(HttpResponse::Ok().json(msg))
}

async fn get_followings(platform: web::Data<Platform>, path: web::Path<String>) -> HandlerResult {
    Ok(HttpResponse::Ok().json(platform.followings(&path)?))
}

async fn get_followers(platform: web::Data<Platform>, path: web::Path<String>) -> HandlerResult {
    Ok(HttpResponse::Ok().json(platform.followers(&path)?))
}

async fn get_blocked(platform: web::Data<Platform>, path: web::Path<String>) -> HandlerResult {
    Ok(HttpResponse::Ok().json(platform.blocked(&path)?))
}

async fn recent_activity(platform: web::Data<Platform>) -> HttpResponse {
    HttpResponse::Ok().json(platform.recent_activity())
}

// === Admin ===

async fn delete_user(platform: web::Data<Platform>, body: web::Json<UserAction>) -> HandlerResult {
    let msg = platform.delete_user(&body.requester, &body.username)?;
    Ok(HttpResponse::Ok().json(msg))
}

async fn delete_post(platform: web::Data<Platform>, body: web::Json<PostAction>) -> HandlerResult {
    let msg = platform.delete_post(&body.requester, &body.post_id)?;
    Ok(HttpResponse::Ok().json(msg))
}

async fn promote(platform: web::Data<Platform>, body: web::Json<UserAction>) -> HandlerResult {
    let view = platform.promote(&body.requester, &body.username)?;
    Ok(HttpResponse::Ok().json(view))
}

async fn demote(platform: web::Data<Platform>, body: web::Json<UserAction>) -> HandlerResult {
    let view = platform.demote(&body.requester, &body.username)?;
    Ok(HttpResponse::Ok().json(view))
}
