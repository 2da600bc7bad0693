// LLM prompt constants for tailored question generation.

/// System prompt for question generation. JSON-only rules come from
/// `llm_client::prompts::JSON_ONLY_SYSTEM` and are appended at call time.
pub const QUESTION_SYSTEM: &str = "You are an expert technical interviewer. \
    Generate concise, senior-practical questions (no trivia) that test fundamentals \
    and applied skills. Return only a JSON list of strings without any commentary.";

/// Replace: {tech_stack}, {years_experience}, {desired_position}
pub const QUESTION_PROMPT_TEMPLATE: &str = r#"Candidate tech stack: {tech_stack}
Years of experience: {years_experience}
Desired role: {desired_position}

Generate 3-5 technical interview questions tailored to the stack.
Avoid duplicates, keep each question in one sentence.
Output a pure JSON list of strings, for example:
["How would you ...?", "Explain ..."]"#;

/// Sampling temperature for question generation.
pub const QUESTION_TEMPERATURE: f32 = 0.3;
