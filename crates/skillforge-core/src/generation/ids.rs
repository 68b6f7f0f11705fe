//! Hierarchical id assignment.
//!
//! Provider-supplied ids are never trusted. Every node gets a fresh token;
//! descendants are prefixed with their parent's final id, so a node's id
//! spells out its ancestry (`a1b2c3d4-9f8e7d6c-0011aabb`).

use std::collections::HashSet;

use uuid::Uuid;

use skillforge_types::skill::SkillNode;

/// Hex characters taken from a v4 UUID per token.
const TOKEN_LEN: usize = 8;

/// Replace every id in the tree, top-down.
///
/// Uses an explicit stack. A tree-wide set of issued ids redraws on any
/// collision, so uniqueness holds by construction rather than by chance.
pub fn rewrite_ids(root: &mut SkillNode) {
    let mut issued = HashSet::new();
    root.id = issue(&mut issued, None);

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let SkillNode { id, children, .. } = node;
        if let Some(children) = children {
            for child in children.iter_mut() {
                child.id = issue(&mut issued, Some(id.as_str()));
                stack.push(child);
            }
        }
    }
}

fn issue(issued: &mut HashSet<String>, parent: Option<&str>) -> String {
    loop {
        let token = fresh_token();
        let id = match parent {
            Some(parent) => format!("{parent}-{token}"),
            None => token,
        };
        if issued.insert(id.clone()) {
            return id;
        }
    }
}

fn fresh_token() -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(TOKEN_LEN);
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_tree() -> SkillNode {
        let leaves = |prefix: &str| {
            (0..5)
                .map(|i| SkillNode::new(format!("{prefix}{i}"), "d"))
                .collect::<Vec<_>>()
        };
        SkillNode::new("root", "d").with_children(vec![
            SkillNode::new("a", "d").with_children(leaves("a")),
            SkillNode::new("b", "d").with_children(leaves("b")),
            SkillNode::new("c", "d"),
        ])
    }

    #[test]
    fn test_all_ids_unique_and_non_empty() {
        let mut tree = wide_tree();
        rewrite_ids(&mut tree);

        let ids: Vec<_> = tree.walk().into_iter().map(|(n, _)| n.id.clone()).collect();
        assert_eq!(ids.len(), 14);
        assert!(ids.iter().all(|id| !id.is_empty()));
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_child_ids_are_prefixed_by_parent() {
        let mut tree = wide_tree();
        rewrite_ids(&mut tree);

        assert_eq!(tree.id.len(), TOKEN_LEN);
        assert!(tree.id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

        let mut stack = vec![&tree];
        while let Some(node) = stack.pop() {
            for child in node.children() {
                let prefix = format!("{}-", node.id);
                assert!(child.id.starts_with(&prefix));
                assert_eq!(child.id.len(), prefix.len() + TOKEN_LEN);
                stack.push(child);
            }
        }
    }

    #[test]
    fn test_provider_ids_are_discarded() {
        let mut tree = SkillNode::new("root", "d")
            .with_children(vec![SkillNode::new("x", "d"), SkillNode::new("y", "d")]);
        tree.id = "root".to_string();
        for child in tree.children.iter_mut().flatten() {
            child.id = "dup".to_string();
        }

        rewrite_ids(&mut tree);
        assert_ne!(tree.id, "root");
        assert_ne!(tree.children()[0].id, tree.children()[1].id);
    }

    #[test]
    fn test_issue_redraws_on_collision() {
        let mut issued = HashSet::new();
        let first = issue(&mut issued, Some("p"));
        let second = issue(&mut issued, Some("p"));
        assert_ne!(first, second);
        assert_eq!(issued.len(), 2);
    }
}
