//! OpenTelemetry GenAI Semantic Convention attribute names.
//!
//! Use them as constant field names in span macros:
//! `tracing::info_span!("gen_ai", { GEN_AI_OPERATION_NAME } = OP_GENERATE_SKILL_TREE)`.

/// The name of the operation being performed.
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The name of the GenAI provider (e.g., "volcano").
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

/// The model ID requested.
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

/// The sampling temperature for the request.
pub const GEN_AI_REQUEST_TEMPERATURE: &str = "gen_ai.request.temperature";

/// The maximum number of output tokens requested.
pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";

// --- Operation name values ---

/// Skill tree generation (prompt, completion, extraction, validation).
pub const OP_GENERATE_SKILL_TREE: &str = "generate_skill_tree";
