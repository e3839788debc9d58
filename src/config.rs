use std::env;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub session_file: String,
}

impl ClientConfig {
    pub fn new_from_env() -> Self {
        let api_base_url = env::var("STUDYPATH_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());
        let session_file = env::var("STUDYPATH_SESSION_FILE")
            .unwrap_or_else(|_| "session.json".to_string());

        Self {
            api_base_url,
            session_file,
        }
    }
}
