//! Error taxonomy for cligpt.
//!
//! Most functions return `anyhow::Result`; these variants are constructed at
//! the failure site so callers and tests can `downcast_ref` to the concrete
//! failure when they need to distinguish it.

/// Failures the tool can hit before, during, or after talking to the
/// completion service.
#[derive(Debug, thiserror::Error)]
pub enum CligptError {
    /// The host platform has no known default command interpreter.
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// No API key in the config file or the environment.
    #[error(
        "no OpenAI API key found. Set it with 'cligpt --set-api-key <key>' \
         or export OPENAI_API_KEY"
    )]
    MissingCredential,

    /// Transport or API failure from the completion service.
    #[error("completion service error: {0}")]
    Service(String),

    /// The completion service answered with zero choices.
    #[error("completion service returned an empty response")]
    EmptyCompletion,

    /// The child process could not be started under the resolved shell.
    #[error("failed to spawn '{command}' under {shell}: {source}")]
    Spawn {
        shell: String,
        command: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failure() {
        let err = CligptError::UnsupportedPlatform("wasi".to_string());
        assert_eq!(err.to_string(), "unsupported platform: wasi");

        let err = CligptError::Service("connection refused".to_string());
        assert_eq!(err.to_string(), "completion service error: connection refused");
    }

    #[test]
    fn test_missing_credential_message_names_both_remedies() {
        let message = CligptError::MissingCredential.to_string();
        assert!(message.contains("--set-api-key"));
        assert!(message.contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_spawn_error_keeps_source() {
        let err = CligptError::Spawn {
            shell: "/bin/bash".to_string(),
            command: "ls".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("/bin/bash"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
