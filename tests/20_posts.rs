mod common;

use anyhow::Result;
use reqwest::Method;
use serde_json::{json, Value};

use common::{envelope, TestServer, ALICE, BOB};

async fn create_post(server: &TestServer, email: &str, title: &str, content: &str) -> Result<i64> {
    let resp = server
        .as_user(Method::POST, "/post", email)?
        .json(&json!({ "title": title, "content": content }))
        .send()
        .await?;
    let (_, body) = envelope(resp).await?;
    assert_eq!(body["status"], 1000, "create failed: {}", body);
    Ok(body["data"].as_i64().unwrap())
}

async fn call(server: &TestServer, method: Method, path: &str, email: &str) -> Result<Value> {
    let (_, body) = envelope(server.as_user(method, path, email)?.send().await?).await?;
    Ok(body)
}

#[tokio::test]
async fn post_lifecycle() -> Result<()> {
    let server = TestServer::spawn().await?;
    let idx = create_post(&server, ALICE, "Hello", "World").await?;

    let body = call(&server, Method::GET, &format!("/post/{}", idx), ALICE).await?;
    assert_eq!(body["status"], 1000);
    assert_eq!(body["data"]["postIdx"], idx);
    assert_eq!(body["data"]["title"], "Hello");
    assert_eq!(body["data"]["content"], "World");
    assert_eq!(body["data"]["writer"], "alice");
    assert_eq!(body["data"]["isWriter"], true);

    let resp = server
        .as_user(Method::PATCH, &format!("/post/{}", idx), ALICE)?
        .json(&json!({ "title": "Hi", "content": "There" }))
        .send()
        .await?;
    let (_, body) = envelope(resp).await?;
    assert_eq!(body["status"], 1000);
    assert!(body["data"].is_string());

    let body = call(&server, Method::GET, &format!("/post/{}", idx), ALICE).await?;
    assert_eq!(body["data"]["title"], "Hi");
    assert_eq!(body["data"]["content"], "There");

    let body = call(&server, Method::DELETE, &format!("/post/{}", idx), ALICE).await?;
    assert_eq!(body["status"], 1000);

    let body = call(&server, Method::GET, &format!("/post/{}", idx), ALICE).await?;
    assert_eq!(body["status"], 8000);
    assert!(body["data"].is_null());
    Ok(())
}

#[tokio::test]
async fn only_the_author_can_modify() -> Result<()> {
    let server = TestServer::spawn().await?;
    let idx = create_post(&server, ALICE, "Mine", "Hands off").await?;
    let path = format!("/post/{}", idx);

    let resp = server
        .as_user(Method::PATCH, &path, BOB)?
        .json(&json!({ "title": "Taken", "content": "Over" }))
        .send()
        .await?;
    let (status, body) = envelope(resp).await?;
    assert_eq!(status, 200);
    assert_eq!(body["status"], 8004);

    let body = call(&server, Method::DELETE, &path, BOB).await?;
    assert_eq!(body["status"], 8004);

    // Readable by others, unchanged
    let body = call(&server, Method::GET, &path, BOB).await?;
    assert_eq!(body["status"], 1000);
    assert_eq!(body["data"]["title"], "Mine");
    assert_eq!(body["data"]["isWriter"], false);
    Ok(())
}

#[tokio::test]
async fn missing_fields_are_reported_in_order() -> Result<()> {
    let server = TestServer::spawn().await?;

    let resp = server
        .as_user(Method::POST, "/post", ALICE)?
        .json(&json!({}))
        .send()
        .await?;
    let (_, body) = envelope(resp).await?;
    assert_eq!(body["status"], 8005);

    let resp = server
        .as_user(Method::POST, "/post", ALICE)?
        .json(&json!({ "title": "only a title", "content": "   " }))
        .send()
        .await?;
    let (_, body) = envelope(resp).await?;
    assert_eq!(body["status"], 8006);

    // Nothing was written
    let (_, body) = envelope(server.get("/posts").send().await?).await?;
    assert_eq!(body["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn listings_are_newest_first_and_scoped() -> Result<()> {
    let server = TestServer::spawn().await?;
    let first = create_post(&server, ALICE, "first", "a").await?;
    let second = create_post(&server, BOB, "second", "b").await?;
    let third = create_post(&server, ALICE, "third", "c").await?;

    let (_, body) = envelope(server.get("/posts").send().await?).await?;
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["postIdx"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![third, second, first]);

    let body = call(&server, Method::GET, "/post/findMyPosts", ALICE).await?;
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["postIdx"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![third, first]);
    Ok(())
}

#[tokio::test]
async fn likes_are_counted_once_per_user() -> Result<()> {
    let server = TestServer::spawn().await?;
    let idx = create_post(&server, ALICE, "likeable", "post").await?;
    let like_path = format!("/post/{}/like", idx);

    let body = call(&server, Method::POST, &like_path, BOB).await?;
    assert_eq!(body["data"], 1);
    let body = call(&server, Method::POST, &like_path, BOB).await?;
    assert_eq!(body["data"], 1);
    let body = call(&server, Method::POST, &like_path, ALICE).await?;
    assert_eq!(body["data"], 2);

    let body = call(&server, Method::GET, "/post/findMyLikes", BOB).await?;
    assert_eq!(body["data"][0]["postIdx"], idx);
    assert_eq!(body["data"][0]["likeCount"], 2);

    let body = call(&server, Method::GET, &format!("/post/{}", idx), BOB).await?;
    assert_eq!(body["data"]["isLiked"], true);

    let body = call(&server, Method::DELETE, &like_path, BOB).await?;
    assert_eq!(body["data"], 1);
    let body = call(&server, Method::GET, "/post/findMyLikes", BOB).await?;
    assert_eq!(body["data"], json!([]));

    let body = call(&server, Method::POST, "/post/999/like", BOB).await?;
    assert_eq!(body["status"], 8000);
    Ok(())
}

#[tokio::test]
async fn store_outage_surfaces_as_db_error() -> Result<()> {
    let server = TestServer::spawn().await?;
    server.store.set_unavailable(true);

    let (status, body) = envelope(server.get("/posts").send().await?).await?;
    assert_eq!(status, 200);
    assert_eq!(body["status"], 3000);
    assert!(body["data"].is_null());
    Ok(())
}
