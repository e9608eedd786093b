use std::{error::Error, sync::Arc};

use axum::async_trait;
use common::config::Config;
use db::{faculty, student, ActiveValue, Database, DatabaseConnection, EntityTrait};
use hyper::body::{self, Bytes, HttpBody};
use migration::MigratorTrait;
use serde::Serialize;
use tempfile::TempDir;

pub(crate) async fn create_database() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("unable to create test database");

    migration::Migrator::up(&db, None)
        .await
        .expect("unable to run migrations");

    db
}

/// Create a test config that stores avatars inside of the provided directory.
pub(crate) fn create_config(avatars: &TempDir) -> Arc<Config> {
    let mut config = Config::for_tests();
    config.storage.avatars_path = avatars.path().to_path_buf();
    Arc::new(config)
}

pub(crate) async fn create_faculty(db: &DatabaseConnection, name: &str, color: &str) -> i64 {
    faculty::Entity::insert(faculty::ActiveModel {
        name: ActiveValue::Set(String::from(name)),
        color: ActiveValue::Set(String::from(color)),
        ..Default::default()
    })
    .exec(db)
    .await
    .expect("unable to create faculty")
    .last_insert_id
}

pub(crate) async fn create_student(
    db: &DatabaseConnection,
    name: &str,
    age: i32,
    faculty_id: Option<i64>,
) -> i64 {
    student::Entity::insert(student::ActiveModel {
        name: ActiveValue::Set(String::from(name)),
        age: ActiveValue::Set(age),
        faculty_id: ActiveValue::Set(faculty_id),
        ..Default::default()
    })
    .exec(db)
    .await
    .expect("unable to create student")
    .last_insert_id
}

pub(crate) trait RequestBodyExt: Sized {
    fn from_json<B: Serialize>(val: B) -> Self;
}

impl<T> RequestBodyExt for T
where
    T: HttpBody + From<Vec<u8>>,
{
    fn from_json<B: Serialize>(val: B) -> Self {
        T::from(serde_json::to_vec(&val).expect("unable to serialize"))
    }
}

#[async_trait(?Send)]
pub(crate) trait ResponseBodyExt {
    async fn bytes(self) -> Bytes;

    async fn text(self) -> String;

    async fn json(self) -> serde_json::Value;
}

#[async_trait(?Send)]
impl<T> ResponseBodyExt for T
where
    T: HttpBody,
    T::Error: Error,
{
    async fn bytes(self) -> Bytes {
        body::to_bytes(self)
            .await
            .expect("unable to convert to bytes")
    }

    async fn text(self) -> String {
        String::from_utf8(self.bytes().await.to_vec()).expect("unable to convert to text")
    }

    async fn json(self) -> serde_json::Value {
        serde_json::from_slice(&self.bytes().await).expect("unable to convert to json")
    }
}
