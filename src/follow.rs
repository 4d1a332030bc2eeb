use std::collections::BTreeSet;

use parking_lot::RwLock;

use crate::core::errors::PlatformResult;
use crate::users::Roster;

/// Directed edge, `(from, to)`.
type Edge = (String, String);

#[derive(Default)]
struct Edges {
    follows: Vec<Edge>,
    blocks: Vec<Edge>,
}

/// Follow and block edges between accounts.
///
/// Edges are append-only and directional. Repeating a follow or block stores
/// the edge again; read views collapse the repeats.
#[derive(Default)]
pub struct SocialGraph {
    edges: RwLock<Edges>,
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn follow(
        &self,
        roster: &Roster<'_>,
        follower: &str,
        following: &str,
    ) -> PlatformResult<()> {
        roster.require(follower)?;
        roster.require(following)?;
        self.edges
            .write()
            .follows
            .push((follower.to_string(), following.to_string()));
        Ok(())
    }

    pub fn block(&self, roster: &Roster<'_>, blocker: &str, blocked: &str) -> PlatformResult<()> {
        roster.require(blocker)?;
        roster.require(blocked)?;
        self.edges
            .write()
            .blocks
            .push((blocker.to_string(), blocked.to_string()));
        Ok(())
    }

    /// Usernames `viewer` has blocked.
    pub fn blocked_by(&self, viewer: &str) -> BTreeSet<String> {
        targets_of(&self.edges.read().blocks, viewer)
    }

    /// Runs `f` over the usernames `viewer` has blocked while block edges are
    /// held read-locked, so no block can land until `f` returns.
    pub fn with_blocked_by<R>(&self, viewer: &str, f: impl FnOnce(&BTreeSet<String>) -> R) -> R {
        let edges = self.edges.read();
        let blocked = targets_of(&edges.blocks, viewer);
        f(&blocked)
    }

    /// Usernames `user` follows.
    pub fn followings(&self, user: &str) -> BTreeSet<String> {
        targets_of(&self.edges.read().follows, user)
    }

    /// Usernames following `user`.
    pub fn followers(&self, user: &str) -> BTreeSet<String> {
        self.edges
            .read()
            .follows
            .iter()
            .filter(|(_, to)| to == user)
            .map(|(from, _)| from.clone())
            .collect()
    }

    #[cfg(test)]
    fn follow_edge_count(&self) -> usize {
        self.edges.read().follows.len()
    }
}

fn targets_of(edges: &[Edge], from_user: &str) -> BTreeSet<String> {
    edges
        .iter()
        .filter(|(from, _)| from == from_user)
        .map(|(_, to)| to.clone())
        .collect()
}
