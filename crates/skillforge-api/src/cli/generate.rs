//! `skillforge generate`: one-shot tree generation from the terminal.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;

use skillforge_core::generation::{GeneratedTree, TreeOrigin};
use skillforge_types::skill::{SkillLevel, SkillNode};

use crate::state::AppState;

/// Generate a tree and print it. Ctrl+C abandons the provider call.
pub async fn generate(
    state: &AppState,
    domain: &str,
    level: &str,
    language: Option<&str>,
    json: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let level: SkillLevel = level.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let spinner = if json || quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(format!(
        "Generating {level} skill tree for '{}' via {}...",
        domain.trim(),
        state.generator.provider_name()
    ));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let result = state
        .generator
        .generate_with_cancel(domain, level, language, &cancel)
        .await;
    ctrl_c.abort();
    spinner.finish_and_clear();

    let generated = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&generated)?);
        return Ok(());
    }

    print_tree(&generated, quiet);
    Ok(())
}

fn print_tree(generated: &GeneratedTree, quiet: bool) {
    if !quiet {
        println!();
        match &generated.origin {
            TreeOrigin::Provider { provider } => println!(
                "  {} Skill tree generated by {}",
                style("✓").green().bold(),
                style(provider).cyan()
            ),
            TreeOrigin::Fallback { stage } => println!(
                "  {} Provider {} step failed, showing the fallback tree",
                style("!").yellow().bold(),
                stage
            ),
        }
        println!();
    }

    for line in outline(&generated.tree) {
        println!("{line}");
    }

    if !quiet {
        println!();
        println!(
            "  {} nodes, depth {}",
            generated.tree.node_count(),
            generated.tree.depth()
        );
        println!();
    }
}

/// Render the tree as indented lines, links listed under their node.
fn outline(root: &SkillNode) -> Vec<String> {
    let mut lines = Vec::new();
    let mut stack = vec![(root, 0usize)];

    while let Some((node, depth)) = stack.pop() {
        let indent = "  ".repeat(depth + 1);
        let name = if depth == 0 {
            style(&node.name).bold().cyan().to_string()
        } else {
            style(&node.name).bold().to_string()
        };
        lines.push(format!("{indent}{name}  {}", style(&node.description).dim()));

        for link in node.links() {
            lines.push(format!(
                "{indent}    {} [{}] {} {}",
                style("•").dim(),
                link.link_type,
                link.title,
                style(&link.url).underlined()
            ));
        }

        for child in node.children().iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    lines
}
