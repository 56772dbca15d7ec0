use serde::{Deserialize, Serialize};

/// Body for `POST /support/chat`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub reply: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_reply_parses_without_conversation_id() {
        let json = r#"{"reply":"Your package is out for delivery."}"#;
        let reply: ChatReply = serde_json::from_str(json).unwrap();
        assert_eq!(reply.reply, "Your package is out for delivery.");
        assert_eq!(reply.conversation_id, None);
    }
}
