// Prompt constants for industry-insight generation.

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// Insight generation prompt. `{industry}` and `{json_only}` are filled by
/// `insight_prompt`.
const INSIGHT_PROMPT_TEMPLATE: &str = r#"Analyze the current state of the {industry} industry and provide insights in ONLY the following JSON format without any additional notes or explanations:
{
  "salaryRanges": [
    { "role": "string", "min": number, "max": number, "median": number, "location": "string" }
  ],
  "growthRate": number,
  "demandLevel": "HIGH" | "MEDIUM" | "LOW",
  "topSkills": ["skill1", "skill2"],
  "marketOutlook": "POSITIVE" | "NEUTRAL" | "NEGATIVE",
  "keyTrends": ["trend1", "trend2"],
  "recommendedSkills": ["skill1", "skill2"]
}

{json_only}
Include at least 5 common roles for salary ranges.
Growth rate should be a percentage.
Include at least 5 skills and trends."#;

/// Composes the insight prompt for one industry key.
/// Deterministic: the same industry always yields the same prompt.
pub fn insight_prompt(industry: &str) -> String {
    INSIGHT_PROMPT_TEMPLATE
        .replace("{industry}", industry)
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
}
