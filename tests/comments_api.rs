mod common;

use chrono::DateTime;
use common::{json, setup};
use poem::http::StatusCode;
use serde_json::{Value, json};

fn ids(body: &Value) -> Vec<i64> {
    body["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|comment| comment["comment_id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn comments_listed_newest_first() {
    let app = setup().await;

    let resp = app.cli.get("/api/articles/1/comments").send().await;
    resp.assert_status_is_ok();
    let body = json(resp).await;

    assert_eq!(ids(&body), vec![2, 1, 3]);
    for comment in body["comments"].as_array().unwrap() {
        assert_eq!(comment["article_id"], 1);
        assert!(comment["body"].is_string());
        assert!(comment["author"].is_string());
        assert!(comment["votes"].is_i64());
        assert!(comment["created_at"].is_string());
    }
}

#[tokio::test]
async fn comments_paginate() {
    let app = setup().await;

    let body = json(app.cli.get("/api/articles/1/comments?limit=2").send().await).await;
    assert_eq!(ids(&body), vec![2, 1]);

    let body = json(
        app.cli
            .get("/api/articles/1/comments?limit=2&p=2")
            .send()
            .await,
    )
    .await;
    assert_eq!(ids(&body), vec![3]);

    for query in ["limit=-1", "limit=18446744073709551615", "p=1000000000000000000"] {
        let resp = app
            .cli
            .get(format!("/api/articles/1/comments?{query}"))
            .send()
            .await;
        resp.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(json(resp).await["msg"], "Bad request", "{query}");
    }
}

#[tokio::test]
async fn article_without_comments_is_empty() {
    let app = setup().await;

    let resp = app.cli.get("/api/articles/2/comments").send().await;
    resp.assert_status_is_ok();
    assert_eq!(json(resp).await["comments"], json!([]));
}

#[tokio::test]
async fn comments_for_bad_or_missing_article() {
    let app = setup().await;

    let resp = app.cli.get("/api/articles/888/comments").send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(json(resp).await["msg"], "Article not found");

    let resp = app.cli.get("/api/articles/banana/comments").send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["msg"], "Bad request");
}

#[tokio::test]
async fn post_comment_creates() {
    let app = setup().await;

    let resp = app
        .cli
        .post("/api/articles/1/comments")
        .body_json(&json!({ "username": "rogersop", "body": "always happy" }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    let comment = json(resp).await["newComment"].clone();

    assert_eq!(comment["comment_id"], 7);
    assert_eq!(comment["body"], "always happy");
    assert_eq!(comment["author"], "rogersop");
    assert_eq!(comment["article_id"], 1);
    assert_eq!(comment["votes"], 0);
    assert!(DateTime::parse_from_rfc3339(comment["created_at"].as_str().unwrap()).is_ok());

    let body = json(app.cli.get("/api/articles/1").send().await).await;
    assert_eq!(body["article"]["comment_count"], 4);
}

#[tokio::test]
async fn post_comment_requires_fields() {
    let app = setup().await;

    let resp = app
        .cli
        .post("/api/articles/1/comments")
        .body_json(&json!({ "username": "rogersop" }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["msg"], "Missing required fields: body");

    let resp = app
        .cli
        .post("/api/articles/1/comments")
        .body_json(&json!({}))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["msg"], "Missing required fields: body, username");
}

#[tokio::test]
async fn post_comment_with_unknown_references_is_not_found() {
    let app = setup().await;

    let resp = app
        .cli
        .post("/api/articles/888/comments")
        .body_json(&json!({ "username": "rogersop", "body": "hello?" }))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(json(resp).await["msg"], "Not found");

    let resp = app
        .cli
        .post("/api/articles/1/comments")
        .body_json(&json!({ "username": "nobody", "body": "hello?" }))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);

    let resp = app
        .cli
        .post("/api/articles/one/comments")
        .body_json(&json!({ "username": "rogersop", "body": "hello?" }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_comment_adds_votes() {
    let app = setup().await;

    let resp = app
        .cli
        .patch("/api/comments/1")
        .body_json(&json!({ "inc_votes": 1 }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let comment = json(resp).await["comment"].clone();

    assert_eq!(comment["comment_id"], 1);
    assert_eq!(comment["votes"], 17);
}

#[tokio::test]
async fn patch_comment_rejects_bad_input() {
    let app = setup().await;

    let resp = app
        .cli
        .patch("/api/comments/888")
        .body_json(&json!({ "inc_votes": 1 }))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(json(resp).await["msg"], "Comment not found");

    let resp = app
        .cli
        .patch("/api/comments/first")
        .body_json(&json!({ "inc_votes": 1 }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let resp = app
        .cli
        .patch("/api/comments/1")
        .body_json(&json!({ "inc_votes": 1.5 }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_comment_rejects_votes_beyond_i32() {
    let app = setup().await;

    let resp = app
        .cli
        .patch("/api/comments/3")
        .body_json(&json!({ "inc_votes": 2147483647 }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(json(resp).await["msg"], "Bad request");

    let resp = app
        .cli
        .patch("/api/comments/888")
        .body_json(&json!({ "inc_votes": 2147483647 }))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);

    let body = json(app.cli.get("/api/articles/1/comments").send().await).await;
    let votes: Vec<i64> = body["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|comment| comment["votes"].as_i64().unwrap())
        .collect();
    assert_eq!(votes, vec![14, 16, 100]);
}

#[tokio::test]
async fn delete_comment() {
    let app = setup().await;

    let resp = app.cli.delete("/api/comments/1").send().await;
    resp.assert_status(StatusCode::NO_CONTENT);

    let resp = app.cli.delete("/api/comments/1").send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(json(resp).await["msg"], "Comment not found");

    let resp = app.cli.delete("/api/comments/x1").send().await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let body = json(app.cli.get("/api/articles/1").send().await).await;
    assert_eq!(body["article"]["comment_count"], 2);
}
