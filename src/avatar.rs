//! Avatar resolution for comment authors.
//!
//! Resolution is pure URL construction from the identity hash the service
//! precomputed; no network call and no hashing happens client-side.

use std::collections::HashMap;

use crate::types::Comment;

/// Mapping from comment id to resolved avatar URL, rebuilt on every fetch
pub type AvatarMap = HashMap<String, String>;

/// Deterministic avatar URL for an identity hash. The `d=404` fallback
/// makes the avatar service answer 404 instead of a placeholder image, so
/// unknown identities simply show no avatar.
pub fn avatar_url(host: &str, hash: &str, size: u16) -> String {
    format!("https://{}/avatar/{}?s={}&d=404", host, hash, size)
}

/// Build the avatar map for a comment collection, descending into any
/// embedded replies. Comments without an identity hash get no entry.
pub fn build_avatar_map(comments: &[Comment], host: &str, size: u16) -> AvatarMap {
    let mut map = AvatarMap::new();
    collect_avatars(comments, host, size, &mut map);
    map
}

fn collect_avatars(comments: &[Comment], host: &str, size: u16, map: &mut AvatarMap) {
    for comment in comments {
        if let Some(hash) = comment.author_email_hash.as_deref() {
            if !hash.is_empty() {
                map.insert(comment.id.clone(), avatar_url(host, hash, size));
            }
        }
        if let Some(replies) = &comment.replies {
            collect_avatars(replies, host, size, map);
        }
    }
}
