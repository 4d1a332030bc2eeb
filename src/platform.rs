use tracing::{debug, info, warn};

use crate::activity::ActivityLog;
use crate::auth::{AuthorizationGuard, ADMIN_ROLES};
use crate::core::errors::{PlatformError, PlatformResult};
use crate::follow::SocialGraph;
use crate::models::models::{ActivityEvent, Message, Post, RoleView};
use crate::posts::ContentStore;
use crate::users::IdentityRegistry;
use crate::visibility;

/// Entry point for every use case.
///
/// Each component guards its own collection. Lock order is always registry
/// first, then the component being mutated, then the activity log; the
/// visibility read takes the graph before the content store. Commands that
/// reference accounts hold a registry read view across their mutation, and
/// deleting an account removes its posts under the registry write lock.
#[derive(Default)]
pub struct Platform {
    registry: IdentityRegistry,
    guard: AuthorizationGuard,
    graph: SocialGraph,
    content: ContentStore,
    activity: ActivityLog,
}

fn audited<T>(action: &'static str, op: impl FnOnce() -> PlatformResult<T>) -> PlatformResult<T> {
    let result = op();
    match &result {
        Ok(_) => debug!(action, "command accepted"),
        Err(err) => warn!(action, kind = err.kind(), error = %err, "command rejected"),
    }
    result
}

impl Platform {
    pub fn new() -> Self {
        Self::default()
    }

    // === Accounts ===

    pub fn signup(&self, username: &str, secret: &str) -> PlatformResult<Message> {
        audited("signup", || {
            let mut roster = self.registry.write();
            let account = roster.register(username, secret)?;
            // Assigned before the registry is released, so the owner is never
            // observable as a plain user.
            self.guard.assign(&account.username, account.role);
            self.activity
                .record(format!("{} signed up as {}", account.username, account.role));
            info!(username, role = %account.role, "account created");
            Ok(Message::new(format!("User {} created", account.username)))
        })
    }

    pub fn login(&self, username: &str, secret: &str) -> PlatformResult<Message> {
        audited("login", || {
            if !self.registry.verify(username, secret) {
                return Err(PlatformError::InvalidCredentials);
            }
            Ok(Message::new(format!("Welcome back, {}", username)))
        })
    }

    pub fn users(&self) -> Vec<String> {
        self.registry.usernames()
    }

    pub fn role_of(&self, username: &str) -> RoleView {
        RoleView {
            username: username.to_string(),
            role: self.guard.resolve_role(username),
        }
    }

    // === Content ===

    pub fn create_post(&self, post_id: &str, author: &str, content: &str) -> PlatformResult<Post> {
        audited("create_post", || {
            let roster = self.registry.read();
            let post = self.content.create_post(&roster, post_id, author, content)?;
            self.activity
                .record(format!("{} created post {}", author, post_id));
            info!(post_id, author, "post created");
            Ok(post)
        })
    }

    pub fn list_posts(&self) -> Vec<Post> {
        self.content.list_posts()
    }

    pub fn visible_posts(&self, viewer: &str) -> Vec<Post> {
        visibility::visible_posts(&self.content, &self.graph, viewer)
    }

    pub fn like(&self, liker: &str, post_id: &str) -> PlatformResult<Message> {
        audited("like", || {
            let roster = self.registry.read();
            self.content.like(&roster, liker, post_id)?;
            let msg = format!("{} liked post {}", liker, post_id);
            self.activity.record(msg.clone());
            info!(liker, post_id, "post liked");
            Ok(Message::new(msg))
        })
    }

    // === Social graph ===

    pub fn follow(&self, follower: &str, following: &str) -> PlatformResult<Message> {
        audited("follow", || {
            let roster = self.registry.read();
            self.graph.follow(&roster, follower, following)?;
            let msg = format!("{} followed {}", follower, following);
            self.activity.record(msg.clone());
            info!(follower, following, "follow edge added");
            Ok(Message::new(msg))
        })
    }

    pub fn block(&self, blocker: &str, blocked: &str) -> PlatformResult<Message> {
        audited("block", || {
            let roster = self.registry.read();
            self.graph.block(&roster, blocker, blocked)?;
            let msg = format!("{} blocked {}", blocker, blocked);
            self.activity.record(msg.clone());
            info!(blocker, blocked, "block edge added");
            Ok(Message::new(msg))
        })
    }

    pub fn followings(&self, username: &str) -> PlatformResult<Vec<String>> {
        self.registry.read().require(username)?;
        Ok(self.graph.followings(username).into_iter().collect())
    }

    pub fn followers(&self, username: &str) -> PlatformResult<Vec<String>> {
        self.registry.read().require(username)?;
        Ok(self.graph.followers(username).into_iter().collect())
    }

    pub fn blocked(&self, username: &str) -> PlatformResult<Vec<String>> {
        self.registry.read().require(username)?;
        Ok(self.graph.blocked_by(username).into_iter().collect())
    }

    // === Activity ===

    pub fn recent_activity(&self) -> Vec<ActivityEvent> {
        self.activity.recent()
    }

    // === Admin and owner actions ===
    // The role check runs before any existence check.

    pub fn delete_user(&self, requester: &str, username: &str) -> PlatformResult<Message> {
        audited("delete_user", || {
            self.guard.require(requester, ADMIN_ROLES)?;
            let mut roster = self.registry.write();
            roster.remove(username)?;
            // Posts go while the registry is still locked, so no post can
            // reference the removed account.
            let removed_posts = self.content.delete_posts_by(username);
            let msg = format!("{} deleted user {}", requester, username);
            self.activity.record(msg.clone());
            info!(requester, username, removed_posts, "account deleted");
            Ok(Message::new(msg))
        })
    }

    pub fn delete_post(&self, requester: &str, post_id: &str) -> PlatformResult<Message> {
        audited("delete_post", || {
            self.guard.require(requester, ADMIN_ROLES)?;
            let removed = self.content.delete_post(post_id)?;
            let msg = format!("{} deleted post {}", requester, post_id);
            self.activity.record(msg.clone());
            info!(requester, post_id, removed, "post deleted");
            Ok(Message::new(msg))
        })
    }

    pub fn promote(&self, requester: &str, username: &str) -> PlatformResult<RoleView> {
        audited("promote", || {
            let roster = self.registry.read();
            let role = self.guard.promote(&roster, requester, username)?;
            self.activity
                .record(format!("{} promoted {} to {}", requester, username, role));
            info!(requester, username, %role, "role changed");
            Ok(RoleView {
                username: username.to_string(),
                role,
            })
        })
    }

    pub fn demote(&self, requester: &str, username: &str) -> PlatformResult<RoleView> {
        audited("demote", || {
            let roster = self.registry.read();
            let role = self.guard.demote(&roster, requester, username)?;
            self.activity
                .record(format!("{} demoted {} to {}", requester, username, role));
            info!(requester, username, %role, "role changed");
            Ok(RoleView {
                username: username.to_string(),
                role,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::models::Role;

    #[test]
    fn admin_scenario() {
        let platform = Platform::new();

        assert_eq!(platform.signup("alice", "p1").unwrap().msg, "User alice created");
        assert_eq!(platform.role_of("alice").role, Role::Owner);
        platform.signup("bob", "p2").unwrap();
        assert_eq!(platform.role_of("bob").role, Role::User);

        assert_eq!(platform.promote("alice", "bob").unwrap().role, Role::Admin);
        assert!(platform.delete_user("bob", "alice").is_ok());
        assert!(!platform.users().contains(&"alice".to_string()));
        // The orphaned role entry stays behind.
        assert_eq!(platform.role_of("alice").role, Role::Owner);

        assert!(matches!(
            platform.delete_user("carol", "bob"),
            Err(PlatformError::PermissionDenied(_))
        ));
    }

    #[test]
    fn deleting_a_user_removes_their_posts() {
        let platform = Platform::new();
        platform.signup("alice", "p1").unwrap();
        platform.signup("bob", "p2").unwrap();
        platform.create_post("a1", "alice", "hello").unwrap();
        platform.create_post("b1", "bob", "hi").unwrap();
        platform.create_post("b2", "bob", "again").unwrap();

        platform.delete_user("alice", "bob").unwrap();

        let users = platform.users();
        let posts = platform.list_posts();
        assert!(posts.iter().all(|p| users.contains(&p.author)));
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "a1");
        assert!(matches!(
            platform.create_post("b3", "bob", "late"),
            Err(PlatformError::NotFound(_))
        ));
    }

    #[test]
    fn duplicate_signup_leaves_state_untouched() {
        let platform = Platform::new();
        platform.signup("alice", "p1").unwrap();
        let events_before = platform.recent_activity().len();

        assert!(matches!(
            platform.signup("alice", "p2"),
            Err(PlatformError::Conflict(_))
        ));
        assert_eq!(platform.users(), vec!["alice"]);
        assert_eq!(platform.role_of("alice").role, Role::Owner);
        assert!(platform.login("alice", "p1").is_ok());
        assert_eq!(platform.recent_activity().len(), events_before);
    }

    #[test]
    fn login_rejects_wrong_secret_and_unknown_user() {
        let platform = Platform::new();
        platform.signup("alice", "p1").unwrap();

        assert_eq!(platform.login("alice", "nope"), Err(PlatformError::InvalidCredentials));
        assert_eq!(platform.login("ghost", "p1"), Err(PlatformError::InvalidCredentials));
    }

    #[test]
    fn permission_failure_short_circuits_existence_checks() {
        let platform = Platform::new();
        platform.signup("alice", "p1").unwrap();
        platform.signup("bob", "p2").unwrap();

        for result in [
            platform.delete_user("bob", "ghost").map(|_| ()),
            platform.delete_post("bob", "missing").map(|_| ()),
            platform.promote("bob", "ghost").map(|_| ()),
            platform.demote("bob", "ghost").map(|_| ()),
        ] {
            assert!(matches!(result, Err(PlatformError::PermissionDenied(_))));
        }

        assert!(matches!(
            platform.delete_user("alice", "ghost"),
            Err(PlatformError::NotFound(_))
        ));
        assert!(matches!(
            platform.delete_post("alice", "missing"),
            Err(PlatformError::NotFound(_))
        ));
    }

    #[test]
    fn each_mutation_records_one_event() {
        let platform = Platform::new();
        platform.signup("alice", "p1").unwrap();
        platform.signup("bob", "p2").unwrap();
        platform.create_post("p1", "alice", "hello").unwrap();
        platform.like("bob", "p1").unwrap();
        platform.follow("bob", "alice").unwrap();
        platform.block("alice", "bob").unwrap();
        platform.delete_post("alice", "p1").unwrap();

        let messages: Vec<_> = platform
            .recent_activity()
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "alice signed up as owner",
                "bob signed up as user",
                "alice created post p1",
                "bob liked post p1",
                "bob followed alice",
                "alice blocked bob",
                "alice deleted post p1",
            ]
        );
    }

    #[test]
    fn rejected_commands_record_nothing() {
        let platform = Platform::new();
        platform.signup("alice", "p1").unwrap();

        assert!(platform.create_post("p1", "ghost", "x").is_err());
        assert!(platform.like("alice", "p1").is_err());
        assert!(platform.follow("alice", "ghost").is_err());
        assert!(platform.list_posts().is_empty());
        assert_eq!(platform.recent_activity().len(), 1);
    }

    #[test]
    fn graph_views_require_a_known_user() {
        let platform = Platform::new();
        platform.signup("alice", "p1").unwrap();
        platform.signup("bob", "p2").unwrap();
        platform.follow("bob", "alice").unwrap();
        platform.follow("bob", "alice").unwrap();

        assert_eq!(platform.followers("alice").unwrap(), vec!["bob"]);
        assert_eq!(platform.followings("bob").unwrap(), vec!["alice"]);
        assert!(platform.blocked("bob").unwrap().is_empty());
        assert!(matches!(platform.followers("ghost"), Err(PlatformError::NotFound(_))));
    }
}
