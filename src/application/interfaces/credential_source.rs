/// Supplies the API credential for the completion endpoint.
///
/// Looked up on every call so a key added to the environment mid-session is
/// picked up without restarting.
pub trait CredentialSource: Send + Sync {
    /// The credential, or `None` when it is not configured.
    fn api_key(&self) -> Option<String>;

    /// Message shown to the user when [`CredentialSource::api_key`] comes back empty.
    fn missing_hint(&self) -> String {
        "API credential is not configured".to_string()
    }
}
