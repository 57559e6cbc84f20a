//! Starter prompts for new documents

/// Prompt used to draft the opening content of a new document.
///
/// Picked from keywords in the name, checked in order: chapter, character,
/// research or notes, outline. Anything else gets a generic introduction.
pub fn prompt_for_document(name: &str) -> String {
    let lower = name.to_lowercase();
    if lower.contains("chapter") {
        format!(
            "Write an engaging opening for a chapter titled \"{}\". Create a compelling scene that draws readers in with vivid descriptions, interesting characters, and a hook that makes them want to continue reading.",
            name
        )
    } else if lower.contains("character") {
        format!(
            "Create a detailed character profile for \"{}\". Include their background, personality traits, motivations, physical description, and key relationships. Make them feel like a real, three-dimensional person.",
            name
        )
    } else if lower.contains("research") || lower.contains("notes") {
        format!(
            "Generate comprehensive research notes and key points for \"{}\". Include relevant facts, important considerations, and organized information that would be useful for a writing project.",
            name
        )
    } else if lower.contains("outline") {
        format!(
            "Create a detailed outline for \"{}\". Structure it with clear sections, subsections, and key points that provide a roadmap for development.",
            name
        )
    } else {
        format!(
            "Write an introductory section for \"{}\". Create engaging content that establishes the topic clearly and provides a strong foundation for further development.",
            name
        )
    }
}
