use crate::traits::ScoreRequest;

/// Build the credibility prompt sent to an LLM
///
/// The model is asked for a JSON object with `credibilityScore` (0-1) and
/// `isHeadlineRelevant` (boolean).
pub fn build_prompt(request: &ScoreRequest) -> String {
    format!(
        r#"Analyze the following article for its credibility and the relevance of its headline to the main content.
Provide a JSON object with two fields:
1. "credibilityScore": a number between 0 (highly unreliable/misleading) and 1 (highly reliable/factual) for the article's content.
2. "isHeadlineRelevant": a boolean, true if the headline accurately and fairly reflects the content, false otherwise.

Example output:
{{
  "credibilityScore": 0.85,
  "isHeadlineRelevant": true
}}

Headline: "{}"
Content: "{}""#,
        request.headline.trim(),
        request.description.trim()
    )
}

/// Pull the first JSON object out of a model reply that may carry extra text
pub fn extract_json(text: &str) -> &str {
    let start = text.find('{').unwrap_or(0);
    let end = text.rfind('}').map(|i| i + 1).unwrap_or(text.len());
    if start < end { &text[start..end] } else { text }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_contains_content() {
        let request = ScoreRequest::new("  Local council approves budget ", "The council voted 7-2.");
        let prompt = build_prompt(&request);

        assert!(prompt.contains(r#"Headline: "Local council approves budget""#));
        assert!(prompt.contains(r#"Content: "The council voted 7-2.""#));
        assert!(prompt.contains("credibilityScore"));
        assert!(prompt.contains("isHeadlineRelevant"));
    }

    #[test]
    fn test_extract_json() {
        assert_eq!(extract_json(r#"{"a":1}"#), r#"{"a":1}"#);
        assert_eq!(
            extract_json("Here you go:\n```json\n{\"a\": 1}\n```"),
            "{\"a\": 1}"
        );
        assert_eq!(extract_json("no json"), "no json");
    }
}
