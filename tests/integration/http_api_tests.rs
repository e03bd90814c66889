/*!
 * End-to-end tests of the HTTP API over an in-memory setup
 */

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use transmem::database::Repository;
use transmem::language_utils::WhatlangDetector;
use transmem::phrase_table::TRANSLATION_UNAVAILABLE;
use transmem::server::handlers::RESPONSE_TIME_HEADER;
use transmem::translation::TranslationHandler;

use crate::common::{
    body_json, create_test_router, router_for, translate_request, translate_text_request,
    UnreachableCache,
};

#[tokio::test]
async fn test_translate_withEmptyObject_shouldReturnNoTextProvided() {
    let (app, _cache, _repo) = create_test_router();

    let response = app.oneshot(translate_request("{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({ "error": "no text provided" }));
}

#[tokio::test]
async fn test_translate_withNonStringText_shouldReturnNoTextProvided() {
    let (app, _cache, _repo) = create_test_router();

    let response = app.oneshot(translate_request(r#"{"text": 42}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "no text provided");
}

#[tokio::test]
async fn test_translate_withKnownPhrase_shouldReturnSuccess() {
    let (app, _cache, repo) = create_test_router();

    let response = app.oneshot(translate_text_request("안녕하세요")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(RESPONSE_TIME_HEADER));
    assert_eq!(
        body_json(response).await,
        json!({
            "status": "success",
            "received_text": "안녕하세요",
            "detected_language": "ko",
            "translated_text": "Hello"
        })
    );
    assert_eq!(repo.count_records().await.unwrap(), 1);
}

#[tokio::test]
async fn test_translate_withSpanishGreeting_shouldReturnSuccess() {
    let (app, _cache, _repo) = create_test_router();

    let response = app.oneshot(translate_text_request("Hola, ¿cómo estás?")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["received_text"], "Hola, ¿cómo estás?");
    assert_eq!(body["detected_language"], "es");
    assert_eq!(body["translated_text"], "Hello, how are you?");
}

#[tokio::test]
async fn test_translate_withPresetPhrases_shouldStoreCorrectLanguage() {
    let expected = [
        ("Hola, ¿cómo estás?", "es"),
        ("Bonjour tout le monde", "fr"),
        ("Guten Morgen", "de"),
        ("안녕하세요", "ko"),
        ("你好", "zh"),
        ("おはようございます", "ja"),
    ];

    for (phrase, code) in expected {
        let (app, _cache, repo) = create_test_router();

        let response = app.oneshot(translate_text_request(phrase)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["detected_language"], code, "phrase: {}", phrase);
        let records = repo.find_records(phrase).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].detected_language, code);
    }
}

#[tokio::test]
async fn test_translate_withUnknownPhrase_shouldReturnSentinelAndStoreIt() {
    let (app, cache, repo) = create_test_router();
    let text = "Thank you very much for the wonderful dinner last night";

    let response = app.oneshot(translate_text_request(text)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["translated_text"], TRANSLATION_UNAVAILABLE);
    assert_eq!(body["detected_language"], "en");

    let records = repo.find_records(text).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].detected_language, "en");
    assert_eq!(records[0].translated_text, TRANSLATION_UNAVAILABLE);
    assert_eq!(cache.lookup(text).as_deref(), Some(TRANSLATION_UNAVAILABLE));
}

#[tokio::test]
async fn test_translate_withUndetectableText_shouldReturnBadRequest() {
    for text in ["a", "", "123 ?!"] {
        let (app, cache, repo) = create_test_router();

        let response = app.oneshot(translate_text_request(text)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "text: {:?}", text);
        assert_eq!(body_json(response).await, json!({ "error": "could not detect language" }));
        assert!(cache.is_empty());
        assert_eq!(repo.count_records().await.unwrap(), 0);
    }
}

#[tokio::test]
async fn test_translate_repeatedRequest_shouldBeServedFromCache() {
    let (app, _cache, repo) = create_test_router();

    let first = app.clone().oneshot(translate_text_request("你好")).await.unwrap();
    let first_body = body_json(first).await;
    assert_eq!(first_body["detected_language"], "zh");
    assert!(first_body.get("source").is_none());

    let second = app.oneshot(translate_text_request("你好")).await.unwrap();

    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(
        body_json(second).await,
        json!({
            "status": "success",
            "received_text": "你好",
            "detected_language": "cached",
            "translated_text": "Hello",
            "source": "cache"
        })
    );
    assert_eq!(repo.count_records().await.unwrap(), 1);
}

#[tokio::test]
async fn test_translate_withMalformedJson_shouldReturnClientError() {
    let (app, _cache, repo) = create_test_router();

    let response = app.oneshot(translate_request("{\"text\": ")).await.unwrap();

    assert!(response.status().is_client_error());
    assert!(body_json(response).await["error"].is_string());
    assert_eq!(repo.count_records().await.unwrap(), 0);
}

#[tokio::test]
async fn test_translate_withoutJsonContentType_shouldReturnClientError() {
    let (app, _cache, _repo) = create_test_router();
    let request = Request::builder()
        .method("POST")
        .uri("/translate")
        .body(Body::from(r#"{"text": "Guten Morgen"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_translate_withUnreachableCache_shouldReturnInternalError() {
    let handler = TranslationHandler::new(
        Arc::new(UnreachableCache),
        Arc::new(Repository::new_in_memory().unwrap()),
        Arc::new(WhatlangDetector::default()),
    );
    let app = router_for(handler);

    let response = app.oneshot(translate_text_request("Guten Morgen")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, json!({ "error": "internal server error" }));
}

#[tokio::test]
async fn test_translate_withGetMethod_shouldNotBeAllowed() {
    let (app, _cache, _repo) = create_test_router();
    let request = Request::builder().uri("/translate").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_health_withMemoryCache_shouldReportUp() {
    let (app, _cache, _repo) = create_test_router();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "status": "ok", "cache": "up", "cache_backend": "memory" })
    );
}

#[tokio::test]
async fn test_health_withUnreachableCache_shouldReportDown() {
    let handler = TranslationHandler::new(
        Arc::new(UnreachableCache),
        Arc::new(Repository::new_in_memory().unwrap()),
        Arc::new(WhatlangDetector::default()),
    );
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = router_for(handler).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["cache"], "down");
}
