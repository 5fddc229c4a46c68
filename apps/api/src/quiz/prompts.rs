// Quiz generation prompt constants.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for quiz synthesis.
pub const QUIZ_SYSTEM: &str = "You are an expert educator writing multiple-choice \
    quizzes from encyclopedia articles. \
    You MUST respond with valid JSON only — a single JSON object. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Quiz prompt template.
/// Replace: {grounding_instruction}, {count}, {content}
pub const QUIZ_PROMPT_TEMPLATE: &str = r#"{grounding_instruction}

Using ONLY the article text below, write EXACTLY {count} high-quality multiple-choice questions.

ARTICLE TEXT:
"""
{content}
"""

Each question must include:
- "question": the question text
- "options": exactly four answer options
- "answer": the correct option, copied verbatim from "options"
- "difficulty": one of "easy", "medium", "hard"
- "explanation": one or two sentences citing the article

Also suggest a few related topics a reader could study next.

Return a JSON object with this EXACT schema:
{
  "quiz": [
    {
      "question": "",
      "options": ["A", "B", "C", "D"],
      "answer": "",
      "difficulty": "",
      "explanation": ""
    }
  ],
  "related_topics": []
}"#;
