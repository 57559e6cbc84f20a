//! Text rendering for tree, node, stats, and template output.

use crate::text::TextMetrics;
use crate::tree::NodeView;
use crate::views::DocumentStats;
use crate::workflow::Template;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline when `color` is on.
pub fn format_section_heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

/// Indented tree, one node per line, folders marked with a trailing `/`.
pub fn format_tree(views: &[NodeView], color: bool) -> String {
    let mut out = String::new();
    let mut stack: Vec<(&NodeView, usize)> = views.iter().rev().map(|view| (view, 0)).collect();
    while let Some((view, depth)) = stack.pop() {
        push_tree_line(&mut out, view, depth, color);
        stack.extend(view.children.iter().rev().map(|child| (child, depth + 1)));
    }
    if out.is_empty() {
        out.push_str("(empty)\n");
    }
    out
}

fn push_tree_line(out: &mut String, view: &NodeView, depth: usize, color: bool) {
    let indent = "  ".repeat(depth);
    if view.is_folder() {
        let label = format!("{}/", view.name);
        let label = if color {
            format!("{}", label.blue().bold())
        } else {
            label
        };
        out.push_str(&format!("{}{}  [{}]\n", indent, label, view.id));
    } else {
        let id = if color {
            format!("{}", view.id.dimmed())
        } else {
            view.id.to_string()
        };
        out.push_str(&format!(
            "{}{}  [{}]  {} words\n",
            indent,
            view.name,
            id,
            view.word_count()
        ));
    }
}

/// Project statistics as a small table.
pub fn format_stats_text(project_name: &str, stats: &DocumentStats, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(project_name, color)
    ));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Documents", "Folders", "Words"]);
    table.add_row(vec![
        stats.document_count.to_string(),
        stats.folder_count.to_string(),
        stats.total_word_count.to_string(),
    ]);
    out.push_str(&format!("{}\n", table));
    out
}

/// Detail view of one node.
pub fn format_node_text(view: &NodeView, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading(&view.name, color)));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.add_row(vec!["Id".to_string(), view.id.to_string()]);
    table.add_row(vec!["Kind".to_string(), view.kind.to_string()]);
    table.add_row(vec![
        "Parent".to_string(),
        view.parent_id
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_else(|| "(top level)".to_string()),
    ]);
    table.add_row(vec!["Created".to_string(), view.created_at.to_rfc3339()]);
    table.add_row(vec!["Updated".to_string(), view.updated_at.to_rfc3339()]);
    match &view.document {
        Some(doc) => {
            let metrics = TextMetrics::of(&doc.content);
            table.add_row(vec!["Title".to_string(), doc.title.clone()]);
            table.add_row(vec!["Words".to_string(), doc.word_count.to_string()]);
            table.add_row(vec!["Characters".to_string(), metrics.characters.to_string()]);
            table.add_row(vec![
                "Reading time".to_string(),
                format!("{} min", metrics.reading_minutes),
            ]);
            if !doc.notes.is_empty() {
                table.add_row(vec!["Notes".to_string(), doc.notes.clone()]);
            }
        }
        None => {
            table.add_row(vec!["Children".to_string(), view.children.len().to_string()]);
        }
    }
    out.push_str(&format!("{}\n", table));
    out
}

/// Template catalog as a table.
pub fn format_templates_text(templates: &[Template]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Name", "Category", "Description"]);
    for template in templates {
        table.add_row(vec![
            template.id,
            template.name,
            template.category,
            template.description,
        ]);
    }
    format!("{}\n", table)
}
