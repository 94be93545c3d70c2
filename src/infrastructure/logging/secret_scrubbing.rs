use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static SCRUBBER: LazyLock<SecretScrubber> = LazyLock::new(SecretScrubber::new);

/// Redact credentials from a message using the shared scrubber
pub fn scrub_secrets(message: &str) -> String {
    SCRUBBER.scrub_message(message)
}

/// Scrubs sensitive data from text before it is logged or echoed to clients
#[derive(Clone)]
pub struct SecretScrubber {
    api_key_pattern: Regex,
    token_pattern: Regex,
    bearer_pattern: Regex,
}

impl SecretScrubber {
    /// Create a new secret scrubber
    pub fn new() -> Self {
        Self {
            // OpenAI-style keys: sk-..., sk-proj-...
            api_key_pattern: Regex::new(r"sk-[a-zA-Z0-9\-_]{16,}")
                .expect("api key pattern is valid"),
            // key/value pairs naming a credential
            token_pattern: Regex::new(
                r#"["']?(?:api_key|apikey|token|secret)["']?\s*[:=]\s*["']?([a-zA-Z0-9\-_\.]{16,})["']?"#,
            )
            .expect("token pattern is valid"),
            // Authorization header values
            bearer_pattern: Regex::new(r"Bearer\s+[a-zA-Z0-9\-_\.=]+")
                .expect("bearer pattern is valid"),
        }
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let mut scrubbed = self
            .bearer_pattern
            .replace_all(message, "Bearer [TOKEN_REDACTED]")
            .to_string();
        scrubbed = self
            .token_pattern
            .replace_all(&scrubbed, |caps: &regex::Captures| {
                let full_match = &caps[0];
                if let Some(colon_pos) = full_match.find(':') {
                    format!("{}:[REDACTED]", &full_match[..colon_pos])
                } else if let Some(eq_pos) = full_match.find('=') {
                    format!("{}=[REDACTED]", &full_match[..eq_pos])
                } else {
                    "[REDACTED]".to_string()
                }
            })
            .to_string();
        self.api_key_pattern
            .replace_all(&scrubbed, "[API_KEY_REDACTED]")
            .to_string()
    }
}

impl Default for SecretScrubber {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
