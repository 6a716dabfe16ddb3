/// 去掉包裹在响应外层的 Markdown 代码围栏
///
/// 模型即便被要求返回纯 JSON，也可能包一层 ```json ... ``` 围栏。
/// 只剥离首尾围栏标记，不改动中间内容。
pub fn strip_code_fences(text: &str) -> &str {
    let mut text = text.trim();

    if let Some(rest) = text.strip_prefix("```json") {
        text = rest.trim_start();
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest.trim_start();
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }

    text
}

/// 提取文本中第一个配平的顶层 JSON 对象
///
/// 逐字符扫描，跟踪字符串与转义状态，避免把字符串里的大括号当作结构。
/// 找不到完整对象时返回 None。
pub fn extract_json_object(text: &str) -> Option<&str> {
    let mut depth: u32 = 0;
    let mut start: Option<usize> = None;
    let mut in_string = false;
    let mut escape = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            if escape {
                escape = false;
                continue;
            }
            match ch {
                '\\' => escape = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => {
                if depth == 0 {
                    start = Some(idx);
                }
                depth += 1;
            }
            '}' => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        let s = start?;
                        return Some(&text[s..=idx]);
                    }
                }
            }
            _ => {}
        }
    }

    None
}

/// 按字符截断文本，超长时追加省略号（用于日志和错误片段）
pub fn truncate_chars(input: &str, max: usize) -> String {
    let mut out = String::new();
    for (idx, ch) in input.chars().enumerate() {
        if idx >= max {
            out.push_str("...");
            break;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  ```json\n{\"a\":1}\n```  "), "{\"a\":1}");
    }

    #[test]
    fn test_strip_fences_noop_on_plain_text() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_extract_json_object_with_surrounding_prose() {
        let text = "Here is the result:\n{\"a\": {\"b\": 1}}\nHope this helps!";
        assert_eq!(extract_json_object(text), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_extract_ignores_braces_inside_strings() {
        let text = r#"note {"key": "value with } brace", "n": 1} tail"#;
        assert_eq!(
            extract_json_object(text),
            Some(r#"{"key": "value with } brace", "n": 1}"#)
        );
    }

    #[test]
    fn test_extract_handles_escaped_quotes() {
        let text = r#"{"key": "say \"hi\" {x}"}"#;
        assert_eq!(extract_json_object(text), Some(text));
    }

    #[test]
    fn test_extract_returns_none_for_unbalanced() {
        assert_eq!(extract_json_object("{\"a\": 1"), None);
        assert_eq!(extract_json_object("no json here"), None);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello world", 5), "hello...");
    }
}
