//! Authorization and social-graph core for the Bord board.
//!
//! [`platform::Platform`] is the only type callers need: it owns the identity
//! registry, the role guard, the social graph, the content store and the
//! activity log. [`handlers`] exposes it over JSON with actix-web.

pub mod activity;
pub mod auth;
pub mod config;
pub mod core;
pub mod follow;
pub mod handlers;
pub mod models;
pub mod platform;
pub mod posts;
pub mod users;
pub mod visibility;

pub use crate::core::errors::{PlatformError, PlatformResult};
pub use crate::models::models::{Account, ActivityEvent, Message, Post, Role, RoleView};
pub use crate::platform::Platform;
