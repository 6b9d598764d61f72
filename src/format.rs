//! Format navigation trees and stats as text.

use crate::cache::NavigationSnapshot;
use crate::tree::{NavNode, NavigationStats};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Render a navigation tree with box-drawing connectors.
///
/// Folders print with a trailing `/`, files with their URL.
pub fn format_navigation_text(nodes: &[NavNode]) -> String {
    if nodes.is_empty() {
        return "No content found.\n".to_string();
    }
    let mut out = String::new();
    render_level(nodes, "", &mut out);
    out
}

fn render_level(nodes: &[NavNode], prefix: &str, out: &mut String) {
    for (i, node) in nodes.iter().enumerate() {
        let last = i + 1 == nodes.len();
        let connector = if last { "└── " } else { "├── " };
        match node {
            NavNode::Folder(folder) => {
                out.push_str(&format!(
                    "{}{}{}\n",
                    prefix,
                    connector,
                    format!("{}/", folder.name).bold()
                ));
                let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
                render_level(&folder.children, &child_prefix, out);
            }
            NavNode::File(file) => {
                out.push_str(&format!(
                    "{}{}{}  {}\n",
                    prefix,
                    connector,
                    file.name,
                    file.url.dimmed()
                ));
            }
        }
    }
}

/// Stats for a snapshot as a small table
pub fn format_stats_text(snapshot: &NavigationSnapshot) -> String {
    let stats = NavigationStats::from_tree(&snapshot.navigation);
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Categories".to_string(), stats.categories.to_string()]);
    table.add_row(vec!["Resources".to_string(), stats.resources.to_string()]);
    table.add_row(vec![
        "Last updated".to_string(),
        snapshot.last_updated.to_rfc3339(),
    ]);

    format!(
        "{}\n\n{}\n",
        format_section_heading("Navigation Stats"),
        table
    )
}
