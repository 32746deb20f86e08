use std::path::Path;

pub fn run(output: Option<&Path>) -> Result<(), String> {
    let graph = wild_story::content::call_of_the_wild().map_err(|e| e.to_string())?;
    let content = graph.to_json().map_err(|e| format!("JSON serialization error: {e}"))?;

    if let Some(path) = output {
        std::fs::write(path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        println!("{content}");
    }

    Ok(())
}
