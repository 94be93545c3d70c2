//! Self-description published at the well-known discovery paths.

use crate::domain::models::{AgentCapabilities, AgentCard, AgentSkill};

pub const AGENT_NAME: &str = "Text Summarization Agent";
pub const AGENT_VERSION: &str = "1.0.0";

/// The single skill this agent offers.
pub fn summarization_skill() -> AgentSkill {
    AgentSkill {
        id: "text-summarization".to_string(),
        name: "Text Summarization".to_string(),
        description:
            "Summarizes input text using LLM, producing concise summaries while preserving key information"
                .to_string(),
        tags: vec![
            "summarization".to_string(),
            "text-processing".to_string(),
            "llm".to_string(),
        ],
        examples: Vec::new(),
    }
}

/// Agent card advertising `base_url` as the service endpoint.
///
/// Streaming is advertised even though no partial summaries are produced;
/// `message/stream` relays the discrete lifecycle events.
pub fn build_agent_card(base_url: &str) -> AgentCard {
    AgentCard {
        name: AGENT_NAME.to_string(),
        description: "A2A agent that summarizes text using OpenAI-compatible LLM endpoints"
            .to_string(),
        url: base_url.to_string(),
        version: AGENT_VERSION.to_string(),
        default_input_modes: vec!["text".to_string()],
        default_output_modes: vec!["text".to_string()],
        capabilities: AgentCapabilities {
            streaming: true,
            push_notifications: false,
            state_transition_history: false,
        },
        skills: vec![summarization_skill()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_card_fields() {
        let card = build_agent_card("https://summarizer.apps.example.com");
        assert_eq!(card.name, "Text Summarization Agent");
        assert_eq!(card.url, "https://summarizer.apps.example.com");
        assert_eq!(card.version, "1.0.0");
        assert!(card.capabilities.streaming);
        assert_eq!(card.skills.len(), 1);
        assert_eq!(card.skills[0].id, "text-summarization");
    }

    #[test]
    fn test_card_wire_shape() {
        let value = serde_json::to_value(build_agent_card("http://0.0.0.0:8080")).unwrap();
        assert_eq!(value["defaultInputModes"], json!(["text"]));
        assert_eq!(value["defaultOutputModes"], json!(["text"]));
        assert_eq!(value["capabilities"]["streaming"], json!(true));
        assert_eq!(value["capabilities"]["pushNotifications"], json!(false));
        assert_eq!(
            value["skills"][0]["tags"],
            json!(["summarization", "text-processing", "llm"])
        );
    }
}
