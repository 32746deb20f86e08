use std::path::Path;

pub fn run(story: Option<&Path>) -> Result<(), String> {
    let graph = super::load_graph(story)?;

    let unreachable = graph.unreachable();
    if !unreachable.is_empty() {
        let ids: Vec<String> = unreachable.iter().map(ToString::to_string).collect();
        eprintln!("  warning: unreachable scenes: {}", ids.join(", "));
    }
    if !graph.reaches_end() {
        eprintln!("  warning: no path from the start scene reaches the ending");
    }

    let battles = graph.scenes().filter(|s| s.is_battle()).count();
    println!("  All checks passed.");
    println!(
        "  {} scenes, {} chapters, {} battles, {} enemies",
        graph.len(),
        graph.chapters().len(),
        battles,
        graph.enemies().len()
    );

    Ok(())
}
