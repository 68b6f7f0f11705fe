//! Deterministic fallback tree.
//!
//! When the provider, extraction or validation fails the generator still
//! answers with a small two-branch tree built here. The result always passes
//! [`super::validator::validate_tree`].

use std::sync::LazyLock;

use regex::Regex;

use skillforge_types::skill::{LinkType, ResourceLink, SkillNode};

// Domain recovery patterns, tried in order against raw provider text.
static QUOTED_DOMAIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)"领域"#).expect("valid regex"));
static GENERATE_FOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"为(.+?)生成").expect("valid regex"));
static DOMAIN_LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"领域[:：]\s*(.+)").expect("valid regex"));

/// Where the fallback takes its domain name from.
#[derive(Debug, Clone, Copy)]
pub enum DomainHint<'a> {
    /// The caller's own domain string, used as-is when non-blank.
    Known(&'a str),
    /// Raw provider text to mine for a domain name.
    RawText(&'a str),
}

struct Labels {
    unknown_domain: &'static str,
    basics: (&'static str, &'static str),
    basics_link: &'static str,
    advanced: (&'static str, &'static str),
    advanced_link: &'static str,
}

const ZH_LABELS: Labels = Labels {
    unknown_domain: "未知领域",
    basics: ("基础知识", "学习该领域的基础概念"),
    basics_link: "官方文档",
    advanced: ("进阶学习", "深入掌握核心技能"),
    advanced_link: "进阶指南",
};

const EN_LABELS: Labels = Labels {
    unknown_domain: "Unknown domain",
    basics: ("Fundamentals", "Learn the core concepts of this domain"),
    basics_link: "Official documentation",
    advanced: ("Advanced topics", "Master the key skills in depth"),
    advanced_link: "Advanced guide",
};

/// Build the fallback tree for `hint`, labelled in `language`.
///
/// Always two branches, "basics" and "advanced", each carrying one
/// placeholder documentation link. Ids are left empty for the id rewriter.
pub fn fallback_tree(hint: DomainHint<'_>, language: &str) -> SkillNode {
    let english = language.eq_ignore_ascii_case("en");
    let labels = if english { &EN_LABELS } else { &ZH_LABELS };

    let domain = match hint {
        DomainHint::Known(domain) => Some(domain.trim()).filter(|d| !d.is_empty()),
        DomainHint::RawText(text) => recover_domain(text),
    }
    .unwrap_or(labels.unknown_domain);

    let description = if english {
        format!("{domain} learning path (auto-generated)")
    } else {
        format!("{domain}技能学习路径（自动生成）")
    };

    SkillNode::new(domain, description).with_children(vec![
        SkillNode::new(labels.basics.0, labels.basics.1).with_links(vec![ResourceLink::new(
            labels.basics_link,
            "https://example.com/docs",
            LinkType::Documentation,
        )]),
        SkillNode::new(labels.advanced.0, labels.advanced.1).with_links(vec![ResourceLink::new(
            labels.advanced_link,
            "https://example.com/advanced",
            LinkType::Documentation,
        )]),
    ])
}

/// Try to recover a domain name from free text.
pub fn recover_domain(text: &str) -> Option<&str> {
    [&QUOTED_DOMAIN_REGEX, &GENERATE_FOR_REGEX, &DOMAIN_LABEL_REGEX]
        .into_iter()
        .find_map(|regex| regex.captures(text).and_then(|caps| caps.get(1)))
        .map(|m| m.as_str().trim())
        .filter(|domain| !domain.is_empty())
}
