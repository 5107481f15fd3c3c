use serde::{Deserialize, Serialize};

pub mod receive_webhook {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        /// Number of events in the webhook body
        pub received_events: usize,
        /// Number of text messages that went through reminder intake
        pub handled_messages: usize,
    }
}
