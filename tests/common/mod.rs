#![allow(dead_code)]

use chrono::{DateTime, FixedOffset};
use nc_news::{
    app,
    entities::{article, comment, topic, user},
    migration::Migrator,
};
use poem::{
    EndpointExt,
    endpoint::BoxEndpoint,
    test::{TestClient, TestResponse},
};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;

pub const IMG_URL: &str =
    "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700";

/// Articles in the fixture set, and how many comments each has.
pub const ARTICLE_COUNT: usize = 5;
pub const COMMENT_COUNTS: [(i64, i64); ARTICLE_COUNT] = [(1, 3), (2, 0), (3, 2), (4, 0), (5, 1)];

pub struct TestApp {
    pub db: DatabaseConnection,
    pub cli: TestClient<BoxEndpoint<'static>>,
}

pub async fn setup() -> TestApp {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();

    Migrator::up(&db, None).await.unwrap();
    seed(&db).await;

    let cli = TestClient::new(app(db.clone()).map_to_response().boxed());
    TestApp { db, cli }
}

pub async fn json(resp: TestResponse) -> Value {
    resp.0.into_body().into_json().await.unwrap()
}

pub fn timestamp(raw: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(raw).unwrap()
}

async fn seed(db: &DatabaseConnection) {
    for (slug, description) in [
        ("mitch", "The man, the Mitch, the legend"),
        ("cats", "Not dogs"),
        ("paper", "what books are made of"),
    ] {
        topic::ActiveModel {
            slug: Set(slug.into()),
            description: Set(description.into()),
        }
        .insert(db)
        .await
        .unwrap();
    }

    for (username, name) in [
        ("butter_bridge", "jonny"),
        ("icellusedkars", "sam"),
        ("rogersop", "paul"),
        ("lurker", "do_nothing"),
    ] {
        user::ActiveModel {
            username: Set(username.into()),
            name: Set(name.into()),
            avatar_url: Set(format!("https://avatars.example.com/{username}.png")),
        }
        .insert(db)
        .await
        .unwrap();
    }

    for (title, topic, author, body, created_at, votes) in [
        (
            "Living in the shadow of a great man",
            "mitch",
            "butter_bridge",
            "I find this existence challenging",
            "2020-07-09T20:11:00Z",
            100,
        ),
        (
            "Sony Vaio; or, The Laptop",
            "mitch",
            "icellusedkars",
            "Call me Mitchell. Some years ago I found myself without a laptop.",
            "2020-10-16T05:03:00Z",
            0,
        ),
        (
            "Eight pug gifs that remind me of mitch",
            "mitch",
            "icellusedkars",
            "some gifs",
            "2020-11-03T09:12:00Z",
            0,
        ),
        (
            "Student SUES Mitch!",
            "mitch",
            "rogersop",
            "We all love Mitch and his wonderful, unique typing style.",
            "2020-05-06T01:14:00Z",
            0,
        ),
        (
            "UNCOVERED: catspiracy to bring down democracy",
            "cats",
            "rogersop",
            "Bastet walks amongst us, and the cats are taking arms!",
            "2020-08-03T13:14:00Z",
            0,
        ),
    ] {
        article::ActiveModel {
            title: Set(title.into()),
            topic: Set(topic.into()),
            author: Set(author.into()),
            body: Set(body.into()),
            created_at: Set(timestamp(created_at)),
            votes: Set(votes),
            article_img_url: Set(IMG_URL.into()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    for (body, article_id, author, votes, created_at) in [
        (
            "Oh, I've got compassion running out of my nose, pal!",
            1,
            "butter_bridge",
            16,
            "2020-04-06T12:17:00Z",
        ),
        (
            "The beautiful thing about treasure is that it exists.",
            1,
            "butter_bridge",
            14,
            "2020-10-31T03:03:00Z",
        ),
        (
            "Replacing the quiet elegance of the dark suit and tie.",
            1,
            "icellusedkars",
            100,
            "2020-03-01T01:13:00Z",
        ),
        ("Ambidextrous marsupial", 3, "icellusedkars", 0, "2020-09-19T23:10:00Z"),
        ("git push origin master", 3, "icellusedkars", 0, "2020-06-20T07:24:00Z"),
        (
            "This morning, I showered for nine minutes.",
            5,
            "butter_bridge",
            0,
            "2020-07-21T00:20:00Z",
        ),
    ] {
        comment::ActiveModel {
            body: Set(body.into()),
            article_id: Set(article_id),
            author: Set(author.into()),
            votes: Set(votes),
            created_at: Set(timestamp(created_at)),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }
}
