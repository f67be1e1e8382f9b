//! Live tests for the Gemini provider (requires --features live-tests).

#[cfg(feature = "live-tests")]
use concierge_gateway::providers::Provider;
#[cfg(feature = "live-tests")]
use concierge_gateway::providers::gemini::GeminiClient;
#[cfg(feature = "live-tests")]
use concierge_gateway::tools::ToolManager;

#[cfg(feature = "live-tests")]
fn load_gemini_client() -> Option<GeminiClient> {
    concierge_core::load_dotenv();

    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            eprintln!("GEMINI_API_KEY not set; skipping Gemini live test.");
            return None;
        }
    };

    Some(GeminiClient::new(api_key, "gemini-2.0-flash").expect("Gemini client"))
}

#[cfg(feature = "live-tests")]
#[tokio::test]
async fn test_gemini_chat_completion() {
    let Some(client) = load_gemini_client() else {
        return;
    };

    let response = client
        .send_conversation(
            vec![],
            vec![],
            Some("Reply with exactly one short sentence about holiday rentals."),
        )
        .await
        .expect("Gemini chat completion failed");

    let text = concierge_gateway::extract_all_text(&response);
    assert!(!text.trim().is_empty(), "Expected non-empty text from Gemini");
    eprintln!("Gemini response: {}", text);
}

#[cfg(feature = "live-tests")]
#[tokio::test]
async fn test_gemini_requests_booking_tool() {
    let Some(client) = load_gemini_client() else {
        return;
    };
    let tools = ToolManager::new();

    let response = client
        .send_conversation(
            vec![],
            tools.get_tools(),
            Some("Check availability for property 42 from 2025-09-01 to 2025-09-05"),
        )
        .await
        .expect("Gemini tool request failed");

    let calls = concierge_gateway::extract_tool_uses(&response);
    assert_eq!(calls.len(), 1, "Expected a single function call");
    assert_eq!(calls[0].1, "check_availability");
    eprintln!("Gemini function call args: {}", calls[0].2);
}
