//! Channel creation and its leader membership.

use pretty_assertions::assert_eq;

use berliner::application::services::{ApiService, ServiceError};
use berliner::domain::{Channel, User};
use berliner::shared::error::AppError;
use berliner::shared::validation::FieldErrors;

use crate::common::{service, test_user, InMemoryStore, MembershipFailure};

async fn registered_leader(store: &InMemoryStore) -> User {
    let service = service(store);
    service.add_user(test_user()).await.unwrap();
    service.get_user_by_username("asyl").await.unwrap()
}

fn berlin() -> Channel {
    Channel::new("berlin", "Everything about Berlin")
}

#[tokio::test]
async fn test_create_channel_adds_leader_membership() {
    let store = InMemoryStore::new();
    let leader = registered_leader(&store).await;
    let service = service(&store);

    let result = service.create_channel(berlin(), &leader).await.unwrap();
    assert_eq!(result, FieldErrors::new());

    let channel = service.get_channel_by_name("berlin").await.unwrap();
    assert_eq!(channel.leader_id, Some(leader.id));
    assert_eq!(channel.description, "Everything about Berlin");

    let memberships = store.memberships();
    assert_eq!(memberships.len(), 1);
    assert_eq!(memberships[0].user_id, leader.id);
    assert_eq!(memberships[0].channel_id, channel.id);
    assert!(memberships[0].is_editor);

    assert_eq!(store.commits(), 1);
    assert_eq!(store.rollbacks(), 0);
}

#[tokio::test]
async fn test_create_channel_ignores_caller_supplied_leader() {
    let store = InMemoryStore::new();
    let leader = registered_leader(&store).await;
    let service = service(&store);
    let mut channel = berlin();
    channel.leader_id = Some(9999);

    service.create_channel(channel, &leader).await.unwrap();

    let stored = service.get_channel_by_name("berlin").await.unwrap();
    assert_eq!(stored.leader_id, Some(leader.id));
}

#[tokio::test]
async fn test_create_channel_with_empty_description() {
    let store = InMemoryStore::new();
    let leader = registered_leader(&store).await;
    let service = service(&store);

    let result = service
        .create_channel(Channel::new("berlin", "  "), &leader)
        .await
        .unwrap();

    assert_eq!(
        result,
        FieldErrors::from([(
            "description".to_string(),
            "Channel description can not be empty".to_string()
        )])
    );
    assert!(store.channels().is_empty());
    assert_eq!(store.commits(), 0);
}

#[tokio::test]
async fn test_create_channel_with_overlong_name() {
    let store = InMemoryStore::new();
    let leader = registered_leader(&store).await;
    let service = service(&store);

    let result = service
        .create_channel(Channel::new("b".repeat(256), "Everything about Berlin"), &leader)
        .await
        .unwrap();

    assert_eq!(
        result,
        FieldErrors::from([("name".to_string(), "Channel name is too long".to_string())])
    );
    assert!(store.channels().is_empty());
    assert_eq!(store.commits(), 0);
}

#[tokio::test]
async fn test_duplicate_channel_name_rolls_back() {
    let store = InMemoryStore::new();
    let leader = registered_leader(&store).await;
    let service = service(&store);
    service.create_channel(berlin(), &leader).await.unwrap();

    let result = service
        .create_channel(Channel::new("berlin", "Another one"), &leader)
        .await
        .unwrap();

    assert_eq!(
        result,
        FieldErrors::from([(
            "common".to_string(),
            "Channel with this name already exists".to_string()
        )])
    );
    assert_eq!(store.channels().len(), 1);
    assert_eq!(store.memberships().len(), 1);
    assert_eq!(store.rollbacks(), 1);
}

#[tokio::test]
async fn test_failed_membership_leaves_no_channel() {
    let store = InMemoryStore::new();
    let leader = registered_leader(&store).await;
    let service = service(&store);
    store.fail_memberships(MembershipFailure::Internal);

    let result = service.create_channel(berlin(), &leader).await;

    assert!(matches!(result, Err(ServiceError::Store(AppError::Internal(_)))));
    assert!(store.channels().is_empty());
    assert!(store.memberships().is_empty());
    assert!(matches!(
        service.get_channel_by_name("berlin").await,
        Err(ServiceError::ChannelNotFound)
    ));
    assert_eq!(store.commits(), 0);
    assert_eq!(store.rollbacks(), 1);
}

#[tokio::test]
async fn test_rejected_membership_is_common_error_without_channel() {
    let store = InMemoryStore::new();
    let leader = registered_leader(&store).await;
    let service = service(&store);
    store.fail_memberships(MembershipFailure::Conflict);

    let result = service.create_channel(berlin(), &leader).await.unwrap();

    assert_eq!(
        result,
        FieldErrors::from([(
            "common".to_string(),
            "User is already a member of this channel".to_string()
        )])
    );
    assert!(store.channels().is_empty());
    assert_eq!(store.commits(), 0);
}

#[tokio::test]
async fn test_channels_by_different_leaders() {
    let store = InMemoryStore::new();
    let first = registered_leader(&store).await;
    let service = service(&store);
    service
        .add_user(User {
            username: "test".into(),
            email: "email@som.com".into(),
            ..test_user()
        })
        .await
        .unwrap();
    let second = service.get_user_by_username("test").await.unwrap();

    service.create_channel(berlin(), &first).await.unwrap();
    service
        .create_channel(Channel::new("munich", "Everything about Munich"), &second)
        .await
        .unwrap();

    let munich = service.get_channel_by_name("munich").await.unwrap();
    assert_eq!(munich.leader_id, Some(second.id));
    assert_eq!(store.memberships().len(), 2);
    assert_eq!(store.commits(), 2);
}

#[tokio::test]
async fn test_get_missing_channel() {
    let service = service(&InMemoryStore::new());

    assert!(matches!(
        service.get_channel_by_name("nowhere").await,
        Err(ServiceError::ChannelNotFound)
    ));
}
