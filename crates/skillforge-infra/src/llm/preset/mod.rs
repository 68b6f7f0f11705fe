//! Offline preset provider.
//!
//! Answers without any network access: canned trees for `前端开发` and
//! `后端开发`, and a generic two-branch tree for anything else. The answer is
//! wrapped in prose and a ```json fence, the way real providers tend to
//! reply, so the full extraction path is exercised.

use serde_json::{Value, json};

use skillforge_core::generation::prompt::SkillTreePromptBuilder;
use skillforge_core::llm::provider::LlmProvider;
use skillforge_types::llm::{
    CompletionRequest, CompletionResponse, ProviderError, StopReason, Usage,
};

/// Provider that replays built-in trees. The default when nothing is configured.
#[derive(Debug, Default)]
pub struct PresetProvider;

impl PresetProvider {
    pub fn new() -> Self {
        Self
    }

    /// Tree for `domain`: a canned one when known, a generic one otherwise.
    fn tree_for(domain: &str) -> Value {
        match domain {
            "前端开发" => frontend_tree(),
            "后端开发" => backend_tree(),
            other => generic_tree(other),
        }
    }
}

impl LlmProvider for PresetProvider {
    fn name(&self) -> &str {
        "preset"
    }

    fn model(&self) -> &str {
        "preset"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let prompt = request.prompt_text();
        let domain = SkillTreePromptBuilder::domain_of(&prompt).ok_or_else(|| {
            ProviderError::InvalidRequest("prompt does not name a domain".to_string())
        })?;

        let tree = Self::tree_for(domain);
        let body = serde_json::to_string_pretty(&tree)
            .map_err(|e| ProviderError::Deserialization(e.to_string()))?;

        Ok(CompletionResponse {
            id: String::new(),
            content: format!("以下是「{domain}」的技能树：\n\n```json\n{body}\n```\n\n祝学习顺利！"),
            model: "preset".to_string(),
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }
}

fn doc(title: &str, url: &str) -> Value {
    json!({"title": title, "url": url, "type": "documentation"})
}

fn frontend_tree() -> Value {
    json!({
        "id": "1",
        "name": "前端开发",
        "description": "前端开发技能树",
        "children": [
            {
                "id": "1-1",
                "name": "HTML/CSS",
                "description": "网页基础结构",
                "links": [
                    doc("MDN HTML教程", "https://developer.mozilla.org/zh-CN/docs/Web/HTML"),
                    doc("CSS教程", "https://developer.mozilla.org/zh-CN/docs/Web/CSS")
                ]
            },
            {
                "id": "1-2",
                "name": "JavaScript",
                "description": "前端编程语言",
                "children": [
                    {
                        "id": "1-2-1",
                        "name": "基础语法",
                        "description": "变量、函数、循环等",
                        "links": [doc("JavaScript教程", "https://developer.mozilla.org/zh-CN/docs/Web/JavaScript")]
                    },
                    {
                        "id": "1-2-2",
                        "name": "DOM操作",
                        "description": "文档对象模型操作",
                        "links": [doc("DOM教程", "https://developer.mozilla.org/zh-CN/docs/Web/API/Document_Object_Model")]
                    }
                ]
            },
            {
                "id": "1-3",
                "name": "React",
                "description": "前端框架",
                "links": [doc("React官方文档", "https://react.dev")]
            }
        ]
    })
}

fn backend_tree() -> Value {
    json!({
        "id": "2",
        "name": "后端开发",
        "description": "后端开发技能树",
        "children": [
            {
                "id": "2-1",
                "name": "Node.js",
                "description": "JavaScript运行时",
                "links": [doc("Node.js文档", "https://nodejs.org/docs")]
            },
            {
                "id": "2-2",
                "name": "数据库",
                "description": "数据存储技术",
                "children": [
                    {
                        "id": "2-2-1",
                        "name": "MongoDB",
                        "description": "NoSQL数据库",
                        "links": [doc("MongoDB教程", "https://www.mongodb.com/docs/")]
                    },
                    {
                        "id": "2-2-2",
                        "name": "MySQL",
                        "description": "关系型数据库",
                        "links": [doc("MySQL教程", "https://dev.mysql.com/doc/")]
                    }
                ]
            }
        ]
    })
}

fn generic_tree(domain: &str) -> Value {
    json!({
        "id": "root",
        "name": domain,
        "description": format!("{domain}技能学习路径"),
        "children": [
            {
                "id": "basics",
                "name": "基础入门",
                "description": format!("掌握{domain}的核心概念"),
                "links": [doc("官方文档", "https://example.com/docs")]
            },
            {
                "id": "practice",
                "name": "项目实践",
                "description": format!("通过项目巩固{domain}技能"),
                "links": [
                    {"title": "实战课程", "url": "https://example.com/course", "type": "course"}
                ]
            }
        ]
    })
}
