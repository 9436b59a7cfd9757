//! Thread construction: turn the aggregated comment collection into a
//! nested reply tree and flatten it for display.

use std::collections::{HashMap, HashSet};

use crate::avatar::AvatarMap;
use crate::types::Comment;

/// A comment with its direct replies nested beneath it
#[derive(Debug, Clone, PartialEq)]
pub struct CommentNode {
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

/// A flattened thread entry carrying the branch bookkeeping the renderer
/// needs to draw tree prefixes
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadItem {
    pub id: String,
    pub author: String,
    pub created_at: String,
    pub content: String,
    pub has_avatar: bool,
    pub depth: usize,
    pub is_last: bool,
    pub ancestors_last: Vec<bool>,
}

/// Total number of comments in a collection, including embedded replies
pub fn total_count(comments: &[Comment]) -> usize {
    comments
        .iter()
        .map(|c| 1 + c.replies.as_deref().map_or(0, total_count))
        .sum()
}

/// Build the reply tree for an aggregated comment collection.
///
/// When the service already embedded replies, that nesting wins.
/// Otherwise nesting is reconstructed by grouping on `parent_id`,
/// preserving the service's ordering at every level. A reply whose parent
/// is not present anywhere in the collection is promoted to a top-level
/// node in encounter order.
pub fn build_thread_tree(comments: Vec<Comment>) -> Vec<CommentNode> {
    let has_embedded = comments
        .iter()
        .any(|c| c.replies.as_ref().is_some_and(|r| !r.is_empty()));

    if has_embedded {
        return comments.into_iter().map(into_node).collect();
    }

    group_by_parent(comments)
}

fn into_node(mut comment: Comment) -> CommentNode {
    let replies = comment.replies.take().unwrap_or_default();
    CommentNode {
        comment,
        replies: replies.into_iter().map(into_node).collect(),
    }
}

fn group_by_parent(comments: Vec<Comment>) -> Vec<CommentNode> {
    let ids: HashSet<String> = comments.iter().map(|c| c.id.clone()).collect();

    let mut roots: Vec<Comment> = Vec::new();
    let mut children: HashMap<String, Vec<Comment>> = HashMap::new();

    for comment in comments {
        match comment.parent_id.clone() {
            // A comment may not parent itself
            Some(pid) if pid != comment.id && ids.contains(&pid) => {
                children.entry(pid).or_default().push(comment);
            }
            // Orphaned replies render as top-level
            _ => roots.push(comment),
        }
    }

    roots
        .into_iter()
        .map(|c| attach_children(c, &mut children))
        .collect()
}

fn attach_children(mut comment: Comment, children: &mut HashMap<String, Vec<Comment>>) -> CommentNode {
    comment.replies = None;
    let direct = children.remove(&comment.id).unwrap_or_default();
    CommentNode {
        comment,
        replies: direct
            .into_iter()
            .map(|c| attach_children(c, children))
            .collect(),
    }
}

/// Flatten the tree into display items, depth-first, replies immediately
/// after their parent. Flattening the same tree twice yields the same
/// items.
pub fn flatten_thread(nodes: &[CommentNode], avatars: &AvatarMap) -> Vec<ThreadItem> {
    let mut items = Vec::new();
    flatten_recursive(nodes, avatars, 0, &[], &mut items);
    items
}

fn flatten_recursive(
    nodes: &[CommentNode],
    avatars: &AvatarMap,
    depth: usize,
    ancestors_last: &[bool],
    items: &mut Vec<ThreadItem>,
) {
    let len = nodes.len();
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i == len - 1;

        items.push(ThreadItem {
            id: node.comment.id.clone(),
            author: node.comment.display_name().to_string(),
            created_at: node.comment.created_at.clone(),
            content: node.comment.content.clone(),
            has_avatar: avatars.contains_key(&node.comment.id),
            depth,
            is_last,
            ancestors_last: ancestors_last.to_vec(),
        });

        if !node.replies.is_empty() {
            let mut current_ancestors = ancestors_last.to_vec();
            current_ancestors.push(is_last);
            flatten_recursive(&node.replies, avatars, depth + 1, &current_ancestors, items);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(id: &str, parent: Option<&str>) -> Comment {
        Comment {
            id: id.to_string(),
            author_name: Some(format!("author-{}", id)),
            author_email_hash: None,
            content: format!("content {}", id),
            created_at: "2024-01-15T10:00:00Z".to_string(),
            parent_id: parent.map(|p| p.to_string()),
            replies: None,
        }
    }

    fn nested(id: &str, replies: Vec<Comment>) -> Comment {
        Comment {
            replies: if replies.is_empty() {
                None
            } else {
                Some(replies)
            },
            ..flat(id, None)
        }
    }

    fn ids(nodes: &[CommentNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.comment.id.as_str()).collect()
    }

    // ========================================================================
    // build_thread_tree tests
    // ========================================================================

    #[test]
    fn test_empty_collection() {
        assert!(build_thread_tree(Vec::new()).is_empty());
    }

    #[test]
    fn test_flat_without_parents() {
        let tree = build_thread_tree(vec![flat("a", None), flat("b", None)]);
        assert_eq!(ids(&tree), vec!["a", "b"]);
        assert!(tree[0].replies.is_empty());
    }

    #[test]
    fn test_flat_grouping_by_parent() {
        let tree = build_thread_tree(vec![
            flat("a", None),
            flat("b", Some("a")),
            flat("c", None),
            flat("d", Some("b")),
        ]);

        assert_eq!(ids(&tree), vec!["a", "c"]);
        assert_eq!(tree[0].replies.len(), 1);
        assert_eq!(tree[0].replies[0].comment.id, "b");
        assert_eq!(tree[0].replies[0].replies[0].comment.id, "d");
    }

    #[test]
    fn test_flat_grouping_preserves_sibling_order() {
        let tree = build_thread_tree(vec![
            flat("a", None),
            flat("r1", Some("a")),
            flat("r2", Some("a")),
            flat("r3", Some("a")),
        ]);

        assert_eq!(ids(&tree[0].replies), vec!["r1", "r2", "r3"]);
    }

    #[test]
    fn test_orphan_reply_promoted_to_top_level() {
        let tree = build_thread_tree(vec![
            flat("a", None),
            flat("lost", Some("missing")),
            flat("b", None),
        ]);

        // Encounter order is kept: the orphan sits between a and b
        assert_eq!(ids(&tree), vec!["a", "lost", "b"]);
    }

    #[test]
    fn test_self_parent_promoted_to_top_level() {
        let tree = build_thread_tree(vec![flat("a", Some("a"))]);
        assert_eq!(ids(&tree), vec!["a"]);
    }

    #[test]
    fn test_embedded_replies_preferred() {
        // parent_id deliberately contradicts the embedded nesting; the
        // embedded tree wins
        let mut child = flat("child", Some("elsewhere"));
        child.replies = None;
        let tree = build_thread_tree(vec![nested("root", vec![child]), flat("other", None)]);

        assert_eq!(ids(&tree), vec!["root", "other"]);
        assert_eq!(tree[0].replies[0].comment.id, "child");
    }

    #[test]
    fn test_embedded_replies_recursive() {
        let tree = build_thread_tree(vec![nested(
            "a",
            vec![nested("b", vec![flat("c", None)])],
        )]);

        assert_eq!(tree[0].replies[0].replies[0].comment.id, "c");
    }

    // ========================================================================
    // flatten_thread tests
    // ========================================================================

    #[test]
    fn test_flatten_order_and_depth() {
        let tree = build_thread_tree(vec![
            flat("a", None),
            flat("b", Some("a")),
            flat("c", Some("b")),
            flat("d", None),
        ]);
        let items = flatten_thread(&tree, &AvatarMap::new());

        let got: Vec<(&str, usize)> = items.iter().map(|i| (i.id.as_str(), i.depth)).collect();
        assert_eq!(got, vec![("a", 0), ("b", 1), ("c", 2), ("d", 0)]);
    }

    #[test]
    fn test_flatten_branch_bookkeeping() {
        let tree = build_thread_tree(vec![
            flat("a", None),
            flat("r1", Some("a")),
            flat("r2", Some("a")),
        ]);
        let items = flatten_thread(&tree, &AvatarMap::new());

        assert!(items[0].is_last); // single top-level
        assert!(!items[1].is_last); // r1 has a following sibling
        assert!(items[2].is_last);
        assert_eq!(items[1].ancestors_last, vec![true]);
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let tree = build_thread_tree(vec![
            flat("a", None),
            flat("b", Some("a")),
            flat("c", None),
        ]);
        let avatars = AvatarMap::new();

        let first = flatten_thread(&tree, &avatars);
        let second = flatten_thread(&tree, &avatars);
        assert_eq!(first, second);
    }

    #[test]
    fn test_flatten_marks_avatars() {
        let tree = build_thread_tree(vec![flat("a", None), flat("b", None)]);
        let mut avatars = AvatarMap::new();
        avatars.insert("b".to_string(), "https://x/avatar/h".to_string());

        let items = flatten_thread(&tree, &avatars);
        assert!(!items[0].has_avatar);
        assert!(items[1].has_avatar);
    }

    #[test]
    fn test_flatten_uses_display_name() {
        let mut anon = flat("a", None);
        anon.author_name = None;
        let items = flatten_thread(&build_thread_tree(vec![anon]), &AvatarMap::new());
        assert_eq!(items[0].author, "Anonymous");
    }

    // ========================================================================
    // total_count tests
    // ========================================================================

    #[test]
    fn test_total_count_flat() {
        assert_eq!(total_count(&[flat("a", None), flat("b", None)]), 2);
    }

    #[test]
    fn test_total_count_nested() {
        let comments = vec![nested("a", vec![nested("b", vec![flat("c", None)])])];
        assert_eq!(total_count(&comments), 3);
    }

    #[test]
    fn test_total_count_empty() {
        assert_eq!(total_count(&[]), 0);
    }
}
