use serde::Deserialize;

/// The only part of the contents metadata the gateway cares about.
#[derive(Debug, Deserialize, Default)]
pub struct FileShaResponse {
    #[serde(default)]
    pub sha: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::FileShaResponse;

    #[test]
    fn should_read_sha_from_contents_metadata() {
        let response: FileShaResponse = serde_json::from_str(
            r#"{"name":"data.xlsx","path":"data.xlsx","sha":"abc123","size":5}"#,
        )
        .unwrap();

        assert_eq!(response.sha.as_deref(), Some("abc123"));
    }

    #[test]
    fn should_treat_missing_sha_as_none() {
        let response: FileShaResponse = serde_json::from_str(r#"{"name":"data.xlsx"}"#).unwrap();

        assert_eq!(response.sha, None);
    }
}
