use serde::Deserialize;

/// Request payload for /chat.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    /// The user's question. Missing and blank are treated the same.
    #[serde(default)]
    pub query: Option<String>,
}

impl ChatRequest {
    /// Trimmed query, or `None` when nothing usable was sent.
    pub fn query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_missing_queries_are_rejected() {
        let missing: ChatRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.query(), None);

        let blank: ChatRequest = serde_json::from_str(r#"{"query":"   "}"#).unwrap();
        assert_eq!(blank.query(), None);

        let ok: ChatRequest = serde_json::from_str(r#"{"query":"  Is Lachung cold?\n"}"#).unwrap();
        assert_eq!(ok.query(), Some("Is Lachung cold?"));
    }
}
