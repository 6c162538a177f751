use crate::application::CredentialSource;

/// Environment variable holding the Groq API key.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";

/// Reads the API key from the process environment on every lookup.
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new() -> Self {
        Self::from_var(API_KEY_VAR)
    }

    pub fn from_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialSource for EnvCredentials {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    fn missing_hint(&self) -> String {
        format!(
            "{} is not set. Create a .env with {}=... or export it in your environment.",
            self.var, self.var
        )
    }
}

/// A fixed key, or none at all. Used for offline runs and tests.
pub struct StaticCredentials {
    key: Option<String>,
}

impl StaticCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }

    pub fn missing() -> Self {
        Self { key: None }
    }
}

impl CredentialSource for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        self.key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_credentials_reads_variable() {
        let var = "TRAVELGPT_TEST_KEY_PRESENT";
        std::env::set_var(var, "gsk_test");
        let credentials = EnvCredentials::from_var(var);
        assert_eq!(credentials.api_key().as_deref(), Some("gsk_test"));
        std::env::remove_var(var);
    }

    #[test]
    fn test_env_credentials_treats_blank_as_missing() {
        let var = "TRAVELGPT_TEST_KEY_BLANK";
        std::env::set_var(var, "   ");
        let credentials = EnvCredentials::from_var(var);
        assert!(credentials.api_key().is_none());
        assert!(credentials.missing_hint().starts_with(var));
        std::env::remove_var(var);
    }

    #[test]
    fn test_static_credentials() {
        assert_eq!(StaticCredentials::new("k").api_key().as_deref(), Some("k"));
        assert!(StaticCredentials::missing().api_key().is_none());
    }
}
