// Prompt composition for quiz generation and the improvement-tip side path.

use crate::models::assessment::QuestionResult;

use super::{QUIZ_OPTION_COUNT, QUIZ_QUESTION_COUNT};

/// Composes the quiz generation prompt.
///
/// Deterministic in its inputs: the industry always appears, and the skills
/// clause is omitted entirely when the list is empty — never left as a
/// dangling fragment.
pub fn quiz_prompt(industry: &str, skills: &[String]) -> String {
    let skills_clause = if skills.is_empty() {
        String::new()
    } else {
        format!(" with expertise in {}", skills.join(", "))
    };

    format!(
        r#"Generate {QUIZ_QUESTION_COUNT} technical interview questions for a {industry} professional{skills_clause}.
Each question should be multiple choice with {QUIZ_OPTION_COUNT} options.
Return the response in this JSON format only, no additional text:
{{
    "questions": [
        {{
            "question": "string",
            "options": ["string", "string", "string", "string"],
            "correctAnswer": "string",
            "explanation": "string"
        }}
    ]
}}"#
    )
}

/// Composes the secondary prompt asking for a short improvement tip, listing
/// every question the user got wrong.
pub fn improvement_prompt(industry: &str, wrong: &[&QuestionResult]) -> String {
    let wrong_questions_text = wrong
        .iter()
        .map(|r| {
            format!(
                "Question: \"{}\"\nCorrect Answer: \"{}\"\nUser Answer: \"{}\"",
                r.question, r.answer, r.user_answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"The user got the following {industry} technical interview questions wrong:

{wrong_questions_text}

Based on these mistakes, provide a concise, specific improvement tip.
Focus on the knowledge gaps revealed by these wrong answers.
Keep the response under 2 sentences and make it encouraging.
Don't explicitly mention the mistakes, instead focus on what to learn/practice."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_prompt_with_skills() {
        let skills = vec!["Rust".to_string(), "PostgreSQL".to_string()];
        let prompt = quiz_prompt("tech-software_engineering", &skills);
        assert!(prompt.contains("10 technical interview questions"));
        assert!(prompt.contains("tech-software_engineering professional with expertise in Rust, PostgreSQL."));
        assert!(prompt.contains("\"correctAnswer\""));
    }

    #[test]
    fn test_quiz_prompt_omits_empty_skills_clause() {
        let prompt = quiz_prompt("finance", &[]);
        assert!(prompt.contains("finance professional.\n"));
        assert!(!prompt.contains("with expertise in"));
    }

    #[test]
    fn test_quiz_prompt_is_deterministic() {
        let skills = vec!["Rust".to_string()];
        assert_eq!(quiz_prompt("tech", &skills), quiz_prompt("tech", &skills));
    }

    #[test]
    fn test_improvement_prompt_lists_every_wrong_question() {
        let wrong = [
            QuestionResult {
                question: "Q1".to_string(),
                answer: "A".to_string(),
                user_answer: "B".to_string(),
                is_correct: false,
                explanation: String::new(),
            },
            QuestionResult {
                question: "Q2".to_string(),
                answer: "C".to_string(),
                user_answer: "D".to_string(),
                is_correct: false,
                explanation: String::new(),
            },
        ];
        let refs: Vec<&QuestionResult> = wrong.iter().collect();
        let prompt = improvement_prompt("tech", &refs);
        assert!(prompt.contains("Question: \"Q1\""));
        assert!(prompt.contains("Correct Answer: \"A\""));
        assert!(prompt.contains("User Answer: \"B\""));
        assert!(prompt.contains("Question: \"Q2\""));
        assert!(prompt.contains("under 2 sentences"));
    }
}
