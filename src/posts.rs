use parking_lot::RwLock;

use crate::core::errors::{PlatformError, PlatformResult};
use crate::models::models::Post;
use crate::users::Roster;

/// Posts in insertion order.
///
/// Post ids are supplied by the caller and are not required to be unique;
/// deletion removes every post carrying the id. Likes are validated here but
/// not stored.
#[derive(Default)]
pub struct ContentStore {
    posts: RwLock<Vec<Post>>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_post(
        &self,
        roster: &Roster<'_>,
        post_id: &str,
        author: &str,
        content: &str,
    ) -> PlatformResult<Post> {
        roster.require(author)?;

        let post = Post {
            id: post_id.to_string(),
            author: author.to_string(),
            content: content.to_string(),
        };
        self.posts.write().push(post.clone());
        Ok(post)
    }

    pub fn list_posts(&self) -> Vec<Post> {
        self.posts.read().clone()
    }

    pub fn contains(&self, post_id: &str) -> bool {
        self.posts.read().iter().any(|p| p.id == post_id)
    }

    /// Removes all posts with `post_id` and returns how many went away.
    pub fn delete_post(&self, post_id: &str) -> PlatformResult<usize> {
        let mut posts = self.posts.write();
        let before = posts.len();
        posts.retain(|p| p.id != post_id);

        match before - posts.len() {
            0 => Err(PlatformError::post_not_found(post_id)),
            removed => Ok(removed),
        }
    }

    /// Removes every post written by `author` and returns how many went away.
    pub fn delete_posts_by(&self, author: &str) -> usize {
        let mut posts = self.posts.write();
        let before = posts.len();
        posts.retain(|p| p.author != author);
        before - posts.len()
    }

    pub fn like(&self, roster: &Roster<'_>, liker: &str, post_id: &str) -> PlatformResult<()> {
        roster.require(liker)?;
        if !self.contains(post_id) {
            return Err(PlatformError::post_not_found(post_id));
        }
        Ok(())
    }
}
