use serde_json::json;
use voatrust::operations::comment::{CommentOperation, CommentOptions};
use voatrust::operations::posts::{PostsOperation, PostsOptions};
use voatrust::{AuthToken, VoatApi, VoatClient, VoatError, VoatObject};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-api-key";

async fn client_for(server: &MockServer) -> VoatClient {
    VoatClient::with_base_url(API_KEY, &server.uri(), "voatrust-tests/1.0").unwrap()
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

fn comment(id: i64, parent: Option<i64>) -> serde_json::Value {
    json!({
        "id": id,
        "parentID": parent,
        "submissionID": 100,
        "subverse": "programming",
        "userName": format!("user{}", id),
        "content": format!("comment {}", id),
        "upVotes": 4,
        "downVotes": 1,
        "date": "2016-03-19T12:34:56.5"
    })
}

#[tokio::test]
async fn subverse_info_is_decoded_and_attached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/v/programming/info"))
        .and(header("Voat-ApiKey", API_KEY))
        .respond_with(ok(json!({
            "name": "programming",
            "title": "Programming",
            "ratedAdult": false,
            "subscriberCount": 4200,
            "creationDate": "2014-05-01T08:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let subverse = client.get_subverse("programming").await.unwrap();

    assert_eq!(subverse.title, "Programming");
    assert_eq!(subverse.subscribers, 4200);
    assert!(subverse.voat().is_some());
}

#[tokio::test]
async fn subverse_posts_are_fetched_lazily_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/v/programming/info"))
        .respond_with(ok(json!({ "name": "programming" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/v/programming"))
        .respond_with(ok(json!([
            { "id": 1, "title": "Text post", "content": "hello", "subverse": "programming" },
            { "id": 2, "title": "Link post", "url": "https://example.com", "subverse": "programming" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let subverse = client.get_subverse("programming").await.unwrap();
    assert!(!subverse.is_posts_resolved());

    let posts = subverse.posts().await.unwrap();
    assert_eq!(posts.len(), 2);
    assert!(!posts[0].is_url);
    assert!(posts[1].is_url);
    assert_eq!(posts[1].content, "https://example.com");

    // Served from the cache; the mock's expect(1) fails the test otherwise.
    assert_eq!(subverse.posts().await.unwrap().len(), 2);
}

#[tokio::test]
async fn submission_comments_and_comment_relations_resolve_through_the_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/v/programming/100"))
        .respond_with(ok(json!({ "id": 100, "title": "Thread", "subverse": "programming" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/v/programming/100/comments"))
        .respond_with(ok(json!([comment(1, None), comment(2, Some(1)), comment(3, Some(2))])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/comments/1"))
        .respond_with(ok(comment(1, None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let submission = client.get_submission("programming", 100).await.unwrap();
    let comments = submission.comments().await.unwrap();
    assert_eq!(comments.len(), 3);

    let reply = &comments[1];
    assert_eq!(reply.karma, 3);
    assert_eq!(reply.parent().await.id, 1);
    assert_eq!(reply.parent().await.id, 1);

    let children: Vec<i64> = reply.children().await.unwrap().iter().map(|c| c.id).collect();
    assert_eq!(children, vec![3]);
}

#[tokio::test]
async fn missing_parent_becomes_a_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/comments/5"))
        .respond_with(ok(comment(5, Some(4))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/comments/4"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": { "type": "NotFound", "message": "Comment not found" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let comment = client.get_comment(5).await.unwrap();
    assert!(comment.parent().await.is_placeholder());
}

#[tokio::test]
async fn http_errors_carry_status_and_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/v/nowhere/info"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": { "type": "NotFound", "message": "Subverse not found" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    match client.get_subverse("nowhere").await {
        Err(VoatError::Http { status, message }) => {
            assert_eq!(status, 404);
            assert!(message.contains("Subverse not found"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn unsuccessful_envelope_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/v/locked/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": { "type": "Denied", "message": "Subverse is private" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(matches!(
        client.get_subverse("locked").await,
        Err(VoatError::ApiError(_))
    ));
}

#[tokio::test]
async fn login_posts_password_grant_and_authorizes_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("Voat-ApiKey", API_KEY))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("username=alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userName": "alice",
            "access_token": "abc123",
            "token_type": "bearer",
            "expires_in": "1209599"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/comments/9"))
        .and(header("Authorization", "Bearer abc123"))
        .respond_with(ok(comment(9, None)))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server).await;
    let token = client.login("alice", "hunter2").await.unwrap();
    assert_eq!(token.username, "alice");
    assert_eq!(token.expires_in, 1209599);

    assert_eq!(client.get_comment(9).await.unwrap().id, 9);
}

#[tokio::test]
async fn login_rejects_bad_expiry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userName": "alice",
            "access_token": "abc123",
            "token_type": "bearer",
            "expires_in": "two weeks"
        })))
        .mount(&server)
        .await;

    let mut client = client_for(&server).await;
    assert!(matches!(
        client.login("alice", "hunter2").await,
        Err(VoatError::BadExpiry(_))
    ));
    assert!(client.auth_token.is_none());
}

#[tokio::test]
async fn expired_token_fails_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok(comment(1, None)))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = client_for(&server).await;
    let acquired = chrono::Utc::now() - chrono::Duration::seconds(120);
    client.set_token(AuthToken::with_acquired_at("alice", "abc123", "bearer", 60, acquired).unwrap());

    assert!(matches!(
        client.get_comment(1).await,
        Err(VoatError::ExpiredToken)
    ));
}

#[tokio::test]
async fn posts_operation_formats_brief_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/v/news"))
        .respond_with(ok(json!([
            { "id": 7, "title": "Headline", "userName": "bob", "upVotes": 12, "url": "https://news.example" }
        ])))
        .mount(&server)
        .await;

    let options = PostsOptions {
        subverse: "news".to_string(),
        brief: true,
        tz: chrono_tz::Tz::UTC,
    };
    let result = PostsOperation::with_client(options, client_for(&server).await)
        .execute()
        .await
        .unwrap();

    assert_eq!(result.post_count, 1);
    assert!(result.formatted_output.contains("[L] #7 (12 pts) Headline - by bob"));
}

#[tokio::test]
async fn comment_operation_shows_parent_and_replies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/comments/2"))
        .respond_with(ok(comment(2, Some(1))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/comments/1"))
        .respond_with(ok(comment(1, None)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/v/programming/100/comments"))
        .respond_with(ok(json!([comment(1, None), comment(2, Some(1)), comment(3, Some(2))])))
        .mount(&server)
        .await;

    let options = CommentOptions {
        comment_id: 2,
        tz: chrono_tz::Tz::UTC,
    };
    let result = CommentOperation::with_client(options, client_for(&server).await)
        .execute()
        .await
        .unwrap();

    assert!(result.formatted_output.contains("In reply to:\n#1 by user1"));
    assert!(result.formatted_output.contains("1 replies"));
    assert!(result.formatted_output.contains("    #3 by user3"));
}
