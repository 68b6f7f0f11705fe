//! Schema validation for candidate skill trees.
//!
//! `validate_tree` walks the untrusted JSON with an explicit stack, so a
//! deeply nested provider answer cannot exhaust the call stack, and builds
//! the typed [`SkillNode`] in the same pass. The first violation rejects the
//! whole tree.

use std::str::FromStr;

use serde_json::{Map, Value};

use skillforge_types::error::{ValidationError, ValidationFailure};
use skillforge_types::skill::{LinkType, ResourceLink, SkillNode};

/// A validated node waiting for its children to be attached.
struct PendingNode {
    node: SkillNode,
    /// Indices into the pending list, in document order. `None` when the
    /// candidate had no `children` array.
    children: Option<Vec<usize>>,
}

/// Validate a candidate tree and convert it into a [`SkillNode`].
///
/// Rules applied to every node:
/// - `id` is optional; when present it must be a non-empty string
/// - `name` and `description` are required non-empty strings
/// - `links`, when present, is an array of objects with non-empty `title`
///   and `url` and a `type` from the closed [`LinkType`] set
/// - `children`, when present, is an array of nodes under the same rules
///
/// `null` for `children` or `links` counts as absent. Whitespace-only
/// strings count as empty.
pub fn validate_tree(candidate: &Value) -> Result<SkillNode, ValidationError> {
    let mut pending: Vec<PendingNode> = Vec::new();
    let mut stack: Vec<(&Value, String, Option<usize>)> = vec![(candidate, "$".to_string(), None)];

    while let Some((value, path, parent)) = stack.pop() {
        let fail = |reason| ValidationError {
            path: path.clone(),
            reason,
        };

        let obj = value
            .as_object()
            .ok_or_else(|| fail(ValidationFailure::NotAnObject))?;

        let id = match obj.get("id") {
            None => String::new(),
            Some(_) => required_string(obj, "id").map_err(fail)?,
        };
        let name = required_string(obj, "name").map_err(fail)?;
        let description = required_string(obj, "description").map_err(fail)?;
        let links = validate_links(obj).map_err(fail)?;
        let children = optional_array(obj, "children").map_err(fail)?;

        let index = pending.len();
        pending.push(PendingNode {
            node: SkillNode {
                id,
                name,
                description,
                children: None,
                links,
            },
            children: children.map(|items| Vec::with_capacity(items.len())),
        });

        if let Some(p) = parent {
            if let Some(siblings) = pending[p].children.as_mut() {
                siblings.push(index);
            }
        }

        if let Some(items) = children {
            for (i, child) in items.iter().enumerate().rev() {
                stack.push((child, format!("{path}.children[{i}]"), Some(index)));
            }
        }
    }

    // Children always sit at higher indices than their parent, so draining
    // from the back completes every subtree before its parent needs it.
    let mut built: Vec<Option<SkillNode>> = Vec::with_capacity(pending.len());
    built.resize_with(pending.len(), || None);
    while let Some(PendingNode { mut node, children }) = pending.pop() {
        let index = pending.len();
        node.children = children.map(|indices| {
            indices
                .into_iter()
                .filter_map(|child| built[child].take())
                .collect()
        });
        built[index] = Some(node);
    }

    built
        .into_iter()
        .next()
        .flatten()
        .ok_or_else(|| ValidationError {
            path: "$".to_string(),
            reason: ValidationFailure::NotAnObject,
        })
}

fn required_string(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<String, ValidationFailure> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationFailure::MissingField(field)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(ValidationFailure::EmptyField(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationFailure::WrongType {
            field,
            expected: "string",
        }),
    }
}

fn optional_array<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<Option<&'a Vec<Value>>, ValidationFailure> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items)),
        Some(_) => Err(ValidationFailure::WrongType {
            field,
            expected: "array",
        }),
    }
}

fn validate_links(
    obj: &Map<String, Value>,
) -> Result<Option<Vec<ResourceLink>>, ValidationFailure> {
    let Some(items) = optional_array(obj, "links")? else {
        return Ok(None);
    };

    let mut links = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let link = item.as_object().ok_or_else(|| ValidationFailure::InvalidLink {
            index,
            reason: "not an object".to_string(),
        })?;

        let title = required_string(link, "title")
            .map_err(|e| ValidationFailure::InvalidLink { index, reason: e.to_string() })?;
        let url = required_string(link, "url")
            .map_err(|e| ValidationFailure::InvalidLink { index, reason: e.to_string() })?;
        let raw_type = required_string(link, "type")
            .map_err(|e| ValidationFailure::InvalidLink { index, reason: e.to_string() })?;
        let link_type =
            LinkType::from_str(&raw_type).map_err(|_| ValidationFailure::InvalidLinkType {
                index,
                value: raw_type.clone(),
            })?;

        links.push(ResourceLink {
            title,
            url,
            link_type,
        });
    }

    Ok(Some(links))
}
