//! REST collaborator tests against a mock server.

use review_core::{GroupKey, ItemId};
use review_session::{
    AudioFetcher, DeletionService, HttpCollaborators, SessionError, TitleService, UploadRequest,
    Uploader,
};
use std::time::Duration;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HttpCollaborators {
    HttpCollaborators::new(&server.uri(), Duration::from_secs(5))
        .unwrap()
        .with_token("secret")
}

fn request(id: &str) -> UploadRequest {
    UploadRequest {
        item_id: ItemId::new(id),
        bytes: b"RIFF....WAVE".to_vec(),
        filename: format!("{id}.wav"),
        type_tag: "isolation".to_string(),
        mime: "audio/wav".to_string(),
    }
}

// =============================================================================
// Fetch
// =============================================================================

mod fetch {
    use super::*;

    #[tokio::test]
    async fn relative_url_resolves_against_base() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media/take-1.wav"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
            .expect(1)
            .mount(&server)
            .await;

        let bytes = client(&server).fetch("media/take-1.wav").await.unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn missing_file_is_collaborator_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
            .mount(&server)
            .await;

        let err = client(&server).fetch("media/x.wav").await.unwrap_err();
        match err {
            SessionError::Collaborator(msg) => assert!(msg.contains("gone")),
            other => panic!("expected Collaborator, got {other:?}"),
        }
        assert!(!SessionError::Collaborator(String::new()).is_fatal());
    }
}

// =============================================================================
// Upload
// =============================================================================

mod upload {
    use super::*;

    #[tokio::test]
    async fn posts_multipart_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/recordings"))
            .and(body_string_contains("name=\"audio\"; filename=\"take-1.wav\""))
            .and(body_string_contains("name=\"item_id\""))
            .and(body_string_contains("isolation"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "success": true, "title": "Take One" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client(&server).upload(request("take-1")).await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.title.as_deref(), Some("Take One"));
    }

    #[tokio::test]
    async fn title_is_optional() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/recordings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": false })))
            .mount(&server)
            .await;

        let outcome = client(&server).upload(request("a")).await.unwrap();
        assert!(!outcome.success);
        assert!(outcome.title.is_none());
    }

    #[tokio::test]
    async fn unauthorized_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client(&server).upload(request("a")).await.unwrap_err();
        assert!(matches!(err, SessionError::Unauthorized(_)));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn server_error_is_not_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("disk full"))
            .mount(&server)
            .await;

        let err = client(&server).upload(request("a")).await.unwrap_err();
        assert!(matches!(err, SessionError::Collaborator(_)));
        assert!(!err.is_fatal());
    }
}

// =============================================================================
// Titles and deletion
// =============================================================================

mod management {
    use super::*;

    #[tokio::test]
    async fn title_update_returns_canonical_title() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/groups/cat/title"))
            .and(body_json(serde_json::json!({ "title": "kitten " })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "title": "Kitten" })))
            .expect(1)
            .mount(&server)
            .await;

        let title = client(&server)
            .update_title(&GroupKey::new("cat"), "kitten ")
            .await
            .unwrap();
        assert_eq!(title, "Kitten");
    }

    #[tokio::test]
    async fn title_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = client(&server)
            .update_title(&GroupKey::new("cat"), "x")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/recordings/a"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/recordings/b"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let http = client(&server);
        assert!(http.delete(&ItemId::new("a")).await.unwrap());
        assert!(!http.delete(&ItemId::new("b")).await.unwrap());
    }

    #[tokio::test]
    async fn base_path_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v2/api/recordings/a"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let http = HttpCollaborators::new(&format!("{}/v2", server.uri()), Duration::from_secs(5)).unwrap();
        assert!(http.delete(&ItemId::new("a")).await.unwrap());
    }
}
