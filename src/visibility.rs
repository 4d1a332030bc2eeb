use crate::follow::SocialGraph;
use crate::models::models::Post;
use crate::posts::ContentStore;

/// Posts `viewer` may see: everything except posts by authors the viewer
/// blocked. Store order is preserved.
///
/// The graph stays read-locked while posts are read (graph before content),
/// so the result reflects one block state.
pub fn visible_posts(content: &ContentStore, graph: &SocialGraph, viewer: &str) -> Vec<Post> {
    graph.with_blocked_by(viewer, |blocked| {
        let posts = content.list_posts();
        if blocked.is_empty() {
            return posts;
        }
        posts
            .into_iter()
            .filter(|p| !blocked.contains(&p.author))
            .collect()
    })
}
