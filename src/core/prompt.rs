use crate::domain::catalog::Catalog;
use crate::utils::error::Result;

/// Context sent to compression and generation: resume, goal, then the full catalog.
pub fn compose_context(resume_text: &str, goal: &str, catalog: &Catalog) -> Result<String> {
    let courses = catalog.to_prompt_json()?;
    Ok(format!(
        "Resume Content:\n{}\n\nCareer Goal: {}\n\nAvailable Course List:\n{}",
        resume_text, goal, courses
    ))
}

pub fn final_input(context: &str, instruction: &str) -> String {
    format!("CONTEXT:\n{}\n\nINSTRUCTIONS:\n{}", context, instruction)
}
