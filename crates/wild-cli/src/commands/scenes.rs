use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use wild_story::SceneKind;

pub fn run(story: Option<&Path>, chapter: Option<u32>) -> Result<(), String> {
    let graph = super::load_graph(story)?;

    let scenes: Vec<_> = graph
        .scenes()
        .filter(|s| chapter.is_none_or(|c| s.chapter == c))
        .collect();

    if scenes.is_empty() {
        println!("  No scenes found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Chapter", "Kind", "Leads to", "Text"]);

    for scene in &scenes {
        let kind = match &scene.kind {
            SceneKind::Story { choices } => format!("story ({} choices)", choices.len()),
            SceneKind::Battle { enemy, .. } => format!("battle: {enemy}"),
        };
        let mut targets: Vec<String> = scene.successors().iter().map(ToString::to_string).collect();
        targets.dedup();
        let first_line = scene.text.lines().next().unwrap_or_default();
        let text = if first_line.chars().count() > 50 {
            format!("{}...", first_line.chars().take(47).collect::<String>())
        } else {
            first_line.to_string()
        };

        table.add_row(vec![
            scene.id.to_string(),
            format!("{} {}", scene.chapter, scene.chapter_title),
            kind,
            targets.join(", "),
            text,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} scenes", scenes.len());

    Ok(())
}
