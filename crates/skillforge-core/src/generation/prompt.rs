//! Prompt builder for skill tree generation.
//!
//! The prompt is written in Chinese, the product's primary locale, and asks
//! for the tree in the requested output language. It carries explicit
//! formatting rules and exactly one worked JSON example.

use serde_json::json;
use skillforge_types::skill::{LinkType, SkillLevel};

/// Node count range requested from the provider.
const NODE_COUNT_RANGE: &str = "15-25";

/// Resources requested per node when links are enabled.
const RESOURCES_PER_NODE: usize = 3;

const DOMAIN_OPEN: &str = "为\"";
const DOMAIN_CLOSE: &str = "\"领域生成";
const HEADER_END: &str = "\n\n要求：";

/// Builds the generation prompt from a domain and its tuning knobs.
///
/// Pure and deterministic: the same inputs always produce the same prompt.
///
/// Layout:
/// ```text
/// 为"{domain}"领域生成{level}级别技能树，使用{language}。
/// 要求：1. ... 7.
/// 返回格式：{example JSON}
/// 重要：只返回JSON，不要额外文本。
/// ```
pub struct SkillTreePromptBuilder;

impl SkillTreePromptBuilder {
    pub fn build(
        domain: &str,
        level: SkillLevel,
        language: &str,
        max_depth: u32,
        include_resources: bool,
    ) -> String {
        let mut rules = vec![
            "结构化技能树：根节点、子节点、子子节点".to_string(),
            if include_resources {
                format!("每个节点：名称、描述、资源链接（最多{RESOURCES_PER_NODE}个高质量资源）")
            } else {
                "每个节点：名称、描述，不要包含 links 字段".to_string()
            },
        ];
        if include_resources {
            let types = LinkType::ALL
                .iter()
                .map(LinkType::as_str)
                .collect::<Vec<_>>()
                .join("、");
            rules.push(format!("资源类型只能是：{types}"));
        }
        rules.push(format!(
            "树深度：{}层，节点总数：{NODE_COUNT_RANGE}个",
            depth_text(max_depth)
        ));
        rules.push("学习路径：基础到高级".to_string());
        rules.push("name 和 description 不能为空".to_string());
        rules.push("严格JSON格式".to_string());

        let numbered = rules
            .iter()
            .enumerate()
            .map(|(i, rule)| format!("{}. {rule}", i + 1))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "为\"{domain}\"领域生成{level}级别技能树，使用{language}。\n\n\
             要求：\n{numbered}\n\n\
             返回格式：\n{example}\n\n\
             重要：只返回JSON，不要额外文本。",
            language = language_display_name(language),
            example = example_tree(domain, include_resources),
        )
    }

    /// Domain named in the header of a prompt produced by [`Self::build`].
    ///
    /// Reads back exactly what `build` wrote, so quotes inside the domain
    /// survive. Returns `None` for any other text.
    pub fn domain_of(prompt: &str) -> Option<&str> {
        let header = prompt.split(HEADER_END).next()?;
        let rest = header.strip_prefix(DOMAIN_OPEN)?;
        let end = rest.rfind(DOMAIN_CLOSE)?;
        Some(&rest[..end]).filter(|domain| !domain.trim().is_empty())
    }
}

/// Display name of an output language code; unknown codes pass through verbatim.
pub fn language_display_name(code: &str) -> &str {
    match code {
        "zh" => "中文",
        "en" => "English",
        "ja" => "日本語",
        other => other,
    }
}

fn depth_text(max_depth: u32) -> String {
    let max_depth = max_depth.max(1);
    if max_depth > 3 {
        format!("3-{max_depth}")
    } else {
        max_depth.to_string()
    }
}

/// The single worked example embedded in the prompt.
///
/// Built through `serde_json` so a domain containing quotes or backslashes
/// still yields valid JSON.
fn example_tree(domain: &str, include_resources: bool) -> String {
    let mut leaf = json!({
        "id": "stage1-1",
        "name": "基础语法",
        "description": "掌握语法结构",
    });
    let mut stage = json!({
        "id": "stage1",
        "name": "基础入门",
        "description": "学习基础概念",
    });
    if include_resources {
        leaf["links"] = json!([
            {"title": "语法教程", "url": "https://example.com/syntax", "type": "documentation"}
        ]);
        stage["links"] = json!([
            {"title": "官方文档", "url": "https://example.com/docs", "type": "documentation"}
        ]);
    }
    stage["children"] = json!([leaf]);

    let root = json!({
        "id": "root",
        "name": domain,
        "description": format!("{domain}技能学习路径"),
        "children": [stage],
    });
    serde_json::to_string_pretty(&root).unwrap_or_else(|_| root.to_string())
}
