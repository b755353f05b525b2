//! JSON output formatting

use serde::Serialize;

use crate::error::Result;

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize>(data: &[T]) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct TestRow {
        name: String,
    }

    #[test]
    fn test_format_json() {
        let items = vec![TestRow {
            name: "widget".to_string(),
        }];
        let out = format_json(&items).unwrap();
        assert!(out.contains("\"name\": \"widget\""));
    }
}
