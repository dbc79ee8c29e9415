use std::time::Duration;

use super::ollama::*;
use charisma::ServiceError;

#[test]
fn test_request_body_shape() {
    let ollama = Ollama::new("http://localhost:11434/api/generate", "llama3", 60, Duration::from_secs(1))
        .unwrap();
    let body = ollama.request_body("  You are a pawn.\n", " Speak. ");
    assert_eq!(body["model"], "llama3");
    assert_eq!(body["prompt"], "You are a pawn.\n\nSpeak.");
    assert_eq!(body["stream"], false);
    assert_eq!(body["options"]["num_predict"], 60);
}

#[test]
fn test_reply_is_trimmed() {
    let generated: Generated =
        serde_json::from_str(r#"{"model":"llama3","response":"  For the king!\n","done":true}"#)
            .unwrap();
    assert_eq!(reply_text(generated).as_deref(), Ok("For the king!"));
}

#[test]
fn test_blank_reply_is_empty() {
    let generated: Generated = serde_json::from_str(r#"{"done":true}"#).unwrap();
    assert_eq!(reply_text(generated), Err(ServiceError::Empty));
}
