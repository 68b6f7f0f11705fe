//! Skill tree domain types.
//!
//! A skill tree is a rooted hierarchy of [`SkillNode`]s, each optionally
//! carrying typed [`ResourceLink`]s. Trees are produced fresh by the
//! generation pipeline and handed out by value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// One node of a generated learning-path tree.
///
/// `id` is unique across the whole tree once the tree has been through the
/// id rewriter. Provider-supplied trees may omit it, so it defaults to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillNode {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SkillNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<ResourceLink>>,
}

impl SkillNode {
    /// Create a leaf node with no id, children or links.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: description.into(),
            children: None,
            links: None,
        }
    }

    /// Attach child nodes.
    pub fn with_children(mut self, children: Vec<SkillNode>) -> Self {
        self.children = Some(children);
        self
    }

    /// Attach resource links.
    pub fn with_links(mut self, links: Vec<ResourceLink>) -> Self {
        self.links = Some(links);
        self
    }

    /// Direct children, empty when absent.
    pub fn children(&self) -> &[SkillNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Resource links, empty when absent.
    pub fn links(&self) -> &[ResourceLink] {
        self.links.as_deref().unwrap_or(&[])
    }

    /// Pre-order walk of the tree yielding `(node, depth)` with the root at depth 0.
    ///
    /// Uses an explicit stack so arbitrarily deep trees cannot overflow the
    /// call stack.
    pub fn walk(&self) -> Vec<(&SkillNode, usize)> {
        let mut out = Vec::new();
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            out.push((node, depth));
            for child in node.children().iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }

    /// Total number of nodes in the tree, including the root.
    pub fn node_count(&self) -> usize {
        self.walk().len()
    }

    /// Depth of the deepest node (a lone root has depth 1).
    pub fn depth(&self) -> usize {
        self.walk()
            .into_iter()
            .map(|(_, depth)| depth + 1)
            .max()
            .unwrap_or(1)
    }
}

/// A typed external learning resource attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub link_type: LinkType,
}

impl ResourceLink {
    pub fn new(title: impl Into<String>, url: impl Into<String>, link_type: LinkType) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            link_type,
        }
    }
}

/// The closed set of resource kinds a link may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Video,
    Article,
    Course,
    Documentation,
}

impl LinkType {
    /// All accepted wire values, in prompt order.
    pub const ALL: [LinkType; 4] = [
        LinkType::Documentation,
        LinkType::Video,
        LinkType::Course,
        LinkType::Article,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::Video => "video",
            LinkType::Article => "article",
            LinkType::Course => "course",
            LinkType::Documentation => "documentation",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkType {
    type Err = String;

    /// Strict: link types coming from providers are matched exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(LinkType::Video),
            "article" => Ok(LinkType::Article),
            "course" => Ok(LinkType::Course),
            "documentation" => Ok(LinkType::Documentation),
            other => Err(format!("invalid link type: '{other}'")),
        }
    }
}

/// Proficiency level a tree is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkillLevel::Beginner => write!(f, "beginner"),
            SkillLevel::Intermediate => write!(f, "intermediate"),
            SkillLevel::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" => Ok(SkillLevel::Advanced),
            other => Err(format!("invalid skill level: '{other}'")),
        }
    }
}

/// A generated tree as kept by a persistence collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSkillTree {
    /// Record id (UUID v7), distinct from the tree's root node id.
    pub id: Uuid,
    pub domain: String,
    pub level: SkillLevel,
    pub tree: SkillNode,
    pub created_at: DateTime<Utc>,
}

/// Generation count for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCount {
    pub domain: String,
    pub count: u64,
}
