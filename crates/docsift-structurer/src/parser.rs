//! Parse model output into JSON

use crate::error::StructurerError;
use serde_json::Value;

/// Parse the model's reply as a single JSON value
///
/// A reply wrapped in a markdown code fence is unwrapped first; anything else
/// must be JSON as-is.
pub fn parse_llm_response(response: &str) -> Result<Value, StructurerError> {
    let json_str = extract_json(response)?;

    serde_json::from_str(json_str).map_err(StructurerError::from)
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<&str, StructurerError> {
    let trimmed = response.trim();

    if trimmed.is_empty() {
        return Err(StructurerError::Parse("Empty response".to_string()));
    }

    let Some(fenced) = trimmed.strip_prefix("```") else {
        return Ok(trimmed);
    };

    // Drop the closing fence, then the language tag up to the first whitespace
    let body = fenced.trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);
    let body = match body.find(char::is_whitespace) {
        Some(end) if !body[..end].starts_with(['{', '[']) => &body[end..],
        Some(_) => body,
        None if body.starts_with(['{', '[']) => body,
        None => "",
    };

    if body.trim().is_empty() {
        return Err(StructurerError::Parse("Empty code block".to_string()));
    }

    Ok(body.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw_object() {
        let value = parse_llm_response(r#"{"Alice": {"Quantity": 2}}"#).unwrap();
        assert_eq!(value["Alice"]["Quantity"], 2);
    }

    #[test]
    fn test_parse_markdown_wrapped() {
        let response = "```json\n{\"Total Purchase Amount\": 945.0}\n```";
        let value = parse_llm_response(response).unwrap();
        assert_eq!(value["Total Purchase Amount"], 945.0);
    }

    #[test]
    fn test_parse_fence_without_language() {
        let response = "  ```\n{\"a\": 1}\n```  ";
        assert!(parse_llm_response(response).unwrap().is_object());
    }

    #[test]
    fn test_parse_single_line_fence() {
        let value = parse_llm_response("```json {\"a\":1}```").unwrap();
        assert_eq!(value["a"], 1);

        let value = parse_llm_response("```{\"a\":2}```").unwrap();
        assert_eq!(value["a"], 2);
    }

    #[test]
    fn test_parse_fence_with_only_language_tag_fails() {
        let result = parse_llm_response("```json\n```");
        assert!(matches!(result, Err(StructurerError::Parse(msg)) if msg == "Empty code block"));
    }

    #[test]
    fn test_parse_prose_fails() {
        let result = parse_llm_response("Here is the data you asked for.");
        assert!(matches!(result, Err(StructurerError::Parse(_))));
    }

    #[test]
    fn test_parse_empty_fails() {
        assert!(matches!(parse_llm_response("   "), Err(StructurerError::Parse(_))));
        assert!(matches!(parse_llm_response("```"), Err(StructurerError::Parse(_))));
    }

    #[test]
    fn test_parse_truncated_json_fails() {
        let result = parse_llm_response(r#"{"Alice": {"Quantity": [1, 2"#);
        assert!(matches!(result, Err(StructurerError::Parse(_))));
    }
}
