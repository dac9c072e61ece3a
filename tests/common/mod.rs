use std::sync::Arc;

use testcontainers::runners::AsyncRunner;
use testcontainers::ContainerAsync;
use testcontainers_modules::mongo::Mongo;

use plume::db::models::Post;
use plume::db::repository::{MongoPostStore, PostStore};
use plume::service::PostService;

/// Holds the running MongoDB container and a service wired to it.
///
/// The container is kept alive for as long as this struct lives. When
/// dropped, it is stopped and cleaned up automatically. Each environment
/// gets its own container, so tests are isolated without explicit cleanup.
pub struct TestEnv {
    _mongo: ContainerAsync<Mongo>,
    pub store: Arc<dyn PostStore>,
    pub service: PostService,
}

impl TestEnv {
    /// Spin up MongoDB and build a PostService against it.
    pub async fn start() -> Self {
        let mongo_container = Mongo::default()
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let mongo_port = mongo_container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");
        let mongo_uri = format!("mongodb://127.0.0.1:{}", mongo_port);
        let mongo_client = mongodb::Client::with_uri_str(&mongo_uri)
            .await
            .expect("Failed to connect to MongoDB");
        let mongo_db = mongo_client.database("plume_test");

        let store: Arc<dyn PostStore> = Arc::new(MongoPostStore::new(&mongo_db));
        let service = PostService::new(store.clone());

        Self {
            _mongo: mongo_container,
            store,
            service,
        }
    }

    /// Helper: build an unpersisted post fixture.
    pub fn post(title: &str, author: &str, content: &str, tags: &[&str]) -> Post {
        Post::new(
            title,
            author,
            content,
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }
}
