//! Tests for the in-memory document store.

use rstest::{fixture, rstest};

use super::*;
use crate::domain::{
    Coordinates, DEFAULT_PLACE_IMAGE, DEFAULT_USER_IMAGE, Password, PlaceDraft, UserName,
};

fn user(email: &str) -> User {
    User::new(
        UserId::random(),
        UserName::new("Ann").expect("valid name"),
        EmailAddress::new(email).expect("valid email"),
        Password::new("secret1").expect("valid password"),
        DEFAULT_USER_IMAGE,
        Vec::new(),
    )
}

fn place_for(owner: &User) -> Place {
    Place::new(
        PlaceId::random(),
        PlaceDraft::try_from_parts("Title", "a description", "Main St").expect("valid draft"),
        Coordinates::new(1.0, 2.0).expect("valid coordinates"),
        DEFAULT_PLACE_IMAGE,
        *owner.id(),
    )
}

#[fixture]
fn store() -> InMemoryDocumentStore {
    InMemoryDocumentStore::new()
}

async fn seeded_owner(store: &InMemoryDocumentStore) -> User {
    let owner = user("ann@example.com");
    store
        .user_repository()
        .insert(&owner)
        .await
        .expect("insert owner");
    owner
}

#[rstest]
#[tokio::test]
async fn staged_writes_are_invisible_until_commit(store: InMemoryDocumentStore) {
    let owner = seeded_owner(&store).await;
    let place = place_for(&owner);

    let mut session = store.begin().await.expect("begin");
    session.insert_place(&place).await.expect("insert");
    session
        .attach_place(owner.id(), place.id())
        .await
        .expect("attach");

    let places = store.place_repository();
    assert!(places.find_by_id(place.id()).await.expect("read").is_none());

    session.commit().await.expect("commit");

    assert!(places.find_by_id(place.id()).await.expect("read").is_some());
    let stored = store
        .user_repository()
        .find_by_id(owner.id())
        .await
        .expect("read")
        .expect("owner");
    assert_eq!(stored.places(), &[*place.id()]);
}

#[rstest]
#[tokio::test]
async fn abort_discards_staged_writes(store: InMemoryDocumentStore) {
    let owner = seeded_owner(&store).await;
    let place = place_for(&owner);

    let mut session = store.begin().await.expect("begin");
    session.insert_place(&place).await.expect("insert");
    session.abort().await.expect("abort");

    assert_eq!(store.place_count(), 0);
}

#[rstest]
#[tokio::test]
async fn dropped_session_discards_staged_writes(store: InMemoryDocumentStore) {
    let owner = seeded_owner(&store).await;
    {
        let mut session = store.begin().await.expect("begin");
        session
            .insert_place(&place_for(&owner))
            .await
            .expect("insert");
    }
    assert_eq!(store.place_count(), 0);
}

#[rstest]
#[tokio::test]
async fn closed_session_rejects_further_calls(store: InMemoryDocumentStore) {
    let owner = seeded_owner(&store).await;
    let mut session = store.begin().await.expect("begin");
    session.commit().await.expect("commit");

    assert_eq!(
        session.insert_place(&place_for(&owner)).await,
        Err(DocumentStoreError::Closed)
    );
    assert_eq!(session.abort().await, Err(DocumentStoreError::Closed));
}

#[rstest]
#[tokio::test]
async fn attach_to_unknown_user_fails(store: InMemoryDocumentStore) {
    let stranger = UserId::random();
    let mut session = store.begin().await.expect("begin");

    let result = session.attach_place(&stranger, &PlaceId::random()).await;

    assert_eq!(result, Err(DocumentStoreError::missing_user(stranger)));
}

#[rstest]
#[tokio::test]
async fn delete_of_unknown_place_fails(store: InMemoryDocumentStore) {
    let missing = PlaceId::random();
    let mut session = store.begin().await.expect("begin");

    let result = session.delete_place(&missing).await;

    assert_eq!(result, Err(DocumentStoreError::missing_place(missing)));
}

#[rstest]
#[tokio::test]
async fn concurrent_delete_reports_missing_place_at_commit(store: InMemoryDocumentStore) {
    let owner = seeded_owner(&store).await;
    let place = place_for(&owner);
    let mut setup = store.begin().await.expect("begin");
    setup.insert_place(&place).await.expect("insert");
    setup
        .attach_place(owner.id(), place.id())
        .await
        .expect("attach");
    setup.commit().await.expect("commit");

    let mut first = store.begin().await.expect("begin first");
    let mut second = store.begin().await.expect("begin second");
    for session in [&mut first, &mut second] {
        session
            .detach_place(owner.id(), place.id())
            .await
            .expect("detach");
        session.delete_place(place.id()).await.expect("delete");
    }

    first.commit().await.expect("first commit wins");
    let result = second.commit().await;

    assert_eq!(result, Err(DocumentStoreError::missing_place(*place.id())));
    assert_eq!(store.place_count(), 0);
}

#[rstest]
#[tokio::test]
async fn injected_fault_fires_once(store: InMemoryDocumentStore) {
    let owner = seeded_owner(&store).await;
    store.fail_next(SessionOp::InsertPlace);
    let mut session = store.begin().await.expect("begin");

    assert!(session.insert_place(&place_for(&owner)).await.is_err());
    assert!(session.insert_place(&place_for(&owner)).await.is_ok());
}

#[rstest]
#[tokio::test]
async fn user_insert_rejects_duplicate_email(store: InMemoryDocumentStore) {
    let users = store.user_repository();
    users.insert(&user("a@x.com")).await.expect("first insert");

    let result = users.insert(&user("A@x.com")).await;

    assert_eq!(result, Err(UserPersistenceError::duplicate_email("a@x.com")));
}

#[rstest]
#[tokio::test]
async fn find_by_email_uses_normalised_address(store: InMemoryDocumentStore) {
    let users = store.user_repository();
    let ann = user("ann@example.com");
    users.insert(&ann).await.expect("insert");

    let email = EmailAddress::new("ANN@example.com").expect("valid email");
    let found = users.find_by_email(&email).await.expect("lookup");

    assert_eq!(found.map(|found| *found.id()), Some(*ann.id()));
}

#[rstest]
#[tokio::test]
async fn save_reports_missing_place(store: InMemoryDocumentStore) {
    let owner = user("ann@example.com");
    let saved = store
        .place_repository()
        .save(&place_for(&owner))
        .await
        .expect("save");
    assert!(!saved);
}

#[rstest]
#[tokio::test]
async fn owned_places_are_listed_by_title(store: InMemoryDocumentStore) {
    let owner = seeded_owner(&store).await;
    let titled = |title: &str| {
        Place::new(
            PlaceId::random(),
            PlaceDraft::try_from_parts(title, "a description", "Main St").expect("valid draft"),
            Coordinates::new(1.0, 2.0).expect("valid coordinates"),
            DEFAULT_PLACE_IMAGE,
            *owner.id(),
        )
    };

    let mut session = store.begin().await.expect("begin");
    for place in [titled("Zoo"), titled("Aquarium"), titled("Museum")] {
        session.insert_place(&place).await.expect("insert");
        session
            .attach_place(owner.id(), place.id())
            .await
            .expect("attach");
    }
    session.commit().await.expect("commit");

    let titles: Vec<String> = store
        .place_repository()
        .find_by_creator(owner.id())
        .await
        .expect("owned places")
        .iter()
        .map(|place| place.title().as_str().to_owned())
        .collect();
    assert_eq!(titles, ["Aquarium", "Museum", "Zoo"]);
}
