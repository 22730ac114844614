use serde::{Deserialize, Serialize};
use validator::Validate;

/// Raw transcribed utterance to extract trip parameters from.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ParseVoiceRequest {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
}
