//! Live embedding test against a local Ollama (requires --features live-tests).

#[cfg(feature = "live-tests")]
use concierge_knowledge::{Embedder, EmbeddingClient, KnowledgeSettings};

#[cfg(feature = "live-tests")]
#[tokio::test]
async fn test_ollama_embedding_live() {
    let settings = KnowledgeSettings::default();
    let client = EmbeddingClient::new(&settings).expect("embedding client");
    let inputs = vec![
        "What is check-in time?".to_string(),
        "¿A qué hora es el check-in?".to_string(),
    ];

    let embeddings = client.embed_batch(&inputs).await.expect("embedding request");
    assert_eq!(embeddings.len(), inputs.len());
    let dim = embeddings[0].len();
    assert!(dim > 0);
    assert!(embeddings.iter().all(|vec| vec.len() == dim));
}
