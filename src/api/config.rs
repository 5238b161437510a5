/// Backend base URL. `CLIPKIT_API_URL` overrides the local-dev default.
pub fn api_base_url() -> String {
    std::env::var("CLIPKIT_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        // Runs without the env var in CI; the default is the local backend.
        if std::env::var("CLIPKIT_API_URL").is_err() {
            assert_eq!(api_base_url(), "http://localhost:8000");
        }
    }
}
