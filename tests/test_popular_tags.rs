mod common;

use common::TestEnv;

#[tokio::test]
async fn staircase_tags_rank_by_frequency() {
    let env = TestEnv::start().await;

    // Post i carries tags "0".."i", so tag i appears in 10 - i posts.
    let mut tags: Vec<String> = Vec::new();
    for i in 0..10 {
        tags.push(i.to_string());
        let tag_refs: Vec<&str> = tags.iter().map(|t| t.as_str()).collect();
        env.service
            .create(TestEnv::post(
                &format!("title {}", i),
                &format!("author {}", i),
                &format!("content {}", i),
                &tag_refs,
            ))
            .await
            .unwrap();
    }
    assert_eq!(env.service.count().await.unwrap(), 10);

    let tag_counts = env.service.find_most_popular_tags().await.unwrap();

    assert_eq!(tag_counts.len(), 10);
    assert_eq!(tag_counts[0].tag, "0");
    assert_eq!(tag_counts[0].count, 10);

    // Counts are non-increasing; with this fixture, strictly decreasing.
    for (i, tag_count) in tag_counts.iter().enumerate() {
        assert_eq!(tag_count.tag, i.to_string());
        assert_eq!(tag_count.count, 10 - i as i64);
    }
}

#[tokio::test]
async fn equal_counts_come_back_in_tag_order() {
    let env = TestEnv::start().await;

    env.service
        .create(TestEnv::post("one", "a", "", &["zebra"]))
        .await
        .unwrap();
    env.service
        .create(TestEnv::post("two", "b", "", &["apple"]))
        .await
        .unwrap();
    env.service
        .create(TestEnv::post("three", "c", "", &["mango", "apple"]))
        .await
        .unwrap();

    let tag_counts = env.service.find_most_popular_tags().await.unwrap();

    assert_eq!(tag_counts.len(), 3);
    // "apple" wins on count; "mango" and "zebra" tie and sort by tag.
    assert_eq!(tag_counts[0].tag, "apple");
    assert_eq!(tag_counts[0].count, 2);
    assert_eq!(tag_counts[1].tag, "mango");
    assert_eq!(tag_counts[1].count, 1);
    assert_eq!(tag_counts[2].tag, "zebra");
    assert_eq!(tag_counts[2].count, 1);
}

#[tokio::test]
async fn no_posts_means_no_tag_counts() {
    let env = TestEnv::start().await;

    let tag_counts = env.service.find_most_popular_tags().await.unwrap();
    assert!(tag_counts.is_empty());
}

#[tokio::test]
async fn untagged_posts_do_not_contribute() {
    let env = TestEnv::start().await;

    env.service
        .create(TestEnv::post("tagged", "a", "", &["rust"]))
        .await
        .unwrap();
    env.service
        .create(TestEnv::post("untagged", "b", "", &[]))
        .await
        .unwrap();

    let tag_counts = env.service.find_most_popular_tags().await.unwrap();
    assert_eq!(tag_counts.len(), 1);
    assert_eq!(tag_counts[0].tag, "rust");
    assert_eq!(tag_counts[0].count, 1);
}
