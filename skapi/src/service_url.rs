#[derive(Debug, Clone)]
pub struct ServiceURL(String);

impl AsRef<str> for ServiceURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ServiceURL {
    /// Root URL of one service: `<api_url>/<service_id>`.
    pub fn new(api_url: &str, service_id: &str) -> Self {
        Self(api_url.trim_end_matches('/').to_string()).append_path(service_id)
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }
}
