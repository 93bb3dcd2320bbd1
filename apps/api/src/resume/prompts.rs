// Prompt composition for resume-entry improvement.

/// Composes the entry-improvement prompt. The response is consumed as free
/// text, so the prompt pins the output to a single bare paragraph.
pub fn improve_entry_prompt(
    industry: &str,
    entry_type: &str,
    organization: &str,
    current: &str,
) -> String {
    format!(
        r#"As an expert resume writer, improve the following {entry_type} description for a {industry} professional.
Make it more impactful, quantifiable, and aligned with industry standards.

Current content: "{current}"
Written for work done at: "{organization}"

Requirements:
1. Use action verbs
2. Include metrics and results where possible
3. Highlight relevant technical skills
4. Keep it concise but detailed
5. Focus on achievements over responsibilities
6. Use industry-specific keywords

Format the response as a single paragraph without any additional text or explanations."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improve_prompt_embeds_every_field() {
        let prompt = improve_entry_prompt(
            "tech-software_engineering",
            "experience",
            "Acme Corp",
            "Worked on backend services",
        );
        assert!(prompt.contains("experience description"));
        assert!(prompt.contains("tech-software_engineering professional"));
        assert!(prompt.contains("\"Worked on backend services\""));
        assert!(prompt.contains("\"Acme Corp\""));
        assert!(prompt.contains("single paragraph"));
    }
}
