use bytes::Bytes;
use chrono::Utc;

use fragments_core::{FragmentId, FragmentRecord, OwnerId};

use crate::data::ByteStore;
use crate::error::StoreError;
use crate::key::StoreKey;
use crate::metadata::MetadataStore;

fn test_key(owner: &str, id: &str) -> Result<StoreKey, StoreError> {
    StoreKey::new(owner, id)
}

fn test_record(owner: &str, id: &str, size: u64) -> FragmentRecord {
    let now = Utc::now();
    FragmentRecord {
        id: FragmentId::new(id),
        owner_id: OwnerId::new(owner),
        created: now,
        updated: now,
        content_type: "text/plain".to_owned(),
        size,
    }
}

/// Run the full metadata store conformance test suite.
///
/// Call this from your backend's test module with a fresh store instance.
///
/// # Errors
///
/// Returns an error if any conformance test fails.
pub async fn run_metadata_conformance_tests(store: &dyn MetadataStore) -> Result<(), StoreError> {
    test_get_missing(store).await?;
    test_put_and_get(store).await?;
    test_put_overwrites(store).await?;
    test_delete(store).await?;
    test_list_by_owner(store).await?;
    test_list_missing_owner(store).await?;
    test_owners_are_isolated(store).await?;
    Ok(())
}

async fn test_get_missing(store: &dyn MetadataStore) -> Result<(), StoreError> {
    let key = test_key("conf-a", "missing")?;
    let val = store.get(&key).await?;
    assert!(val.is_none(), "get on missing key should return None");
    Ok(())
}

async fn test_put_and_get(store: &dyn MetadataStore) -> Result<(), StoreError> {
    let key = test_key("conf-a", "put-get")?;
    let record = test_record("conf-a", "put-get", 3);
    store.put(&key, &record).await?;
    let val = store.get(&key).await?;
    assert_eq!(val.as_ref(), Some(&record));
    Ok(())
}

async fn test_put_overwrites(store: &dyn MetadataStore) -> Result<(), StoreError> {
    let key = test_key("conf-a", "overwrite")?;
    store.put(&key, &test_record("conf-a", "overwrite", 1)).await?;
    store.put(&key, &test_record("conf-a", "overwrite", 2)).await?;
    let val = store.get(&key).await?;
    assert_eq!(val.map(|r| r.size), Some(2), "last put should win");
    Ok(())
}

async fn test_delete(store: &dyn MetadataStore) -> Result<(), StoreError> {
    let key = test_key("conf-a", "to-delete")?;
    store.put(&key, &test_record("conf-a", "to-delete", 0)).await?;
    store.delete(&key).await?;
    let val = store.get(&key).await?;
    assert!(val.is_none(), "get after delete should return None");

    let second = store.delete(&key).await;
    assert!(
        matches!(second, Err(StoreError::NotFound(_))),
        "delete on missing key should fail with NotFound"
    );
    Ok(())
}

async fn test_list_by_owner(store: &dyn MetadataStore) -> Result<(), StoreError> {
    for id in ["c", "a", "b"] {
        let key = test_key("conf-list", id)?;
        store.put(&key, &test_record("conf-list", id, 0)).await?;
    }
    // An upsert keeps its original slot.
    let key = test_key("conf-list", "c")?;
    store.put(&key, &test_record("conf-list", "c", 9)).await?;

    let listed = store.list_by_owner("conf-list").await?.unwrap_or_default();
    let ids: Vec<&str> = listed.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b"], "list should keep insertion order");
    assert_eq!(listed[0].size, 9);
    Ok(())
}

async fn test_list_missing_owner(store: &dyn MetadataStore) -> Result<(), StoreError> {
    let listed = store.list_by_owner("conf-nobody").await?;
    assert!(listed.is_none(), "unknown owner should list as None");

    let empty_owner = store.list_by_owner("").await;
    assert!(
        matches!(empty_owner, Err(StoreError::InvalidKey(_))),
        "empty owner should be rejected"
    );
    Ok(())
}

async fn test_owners_are_isolated(store: &dyn MetadataStore) -> Result<(), StoreError> {
    let key = test_key("conf-owner-1", "shared-id")?;
    store
        .put(&key, &test_record("conf-owner-1", "shared-id", 0))
        .await?;
    let other = test_key("conf-owner-2", "shared-id")?;
    assert!(store.get(&other).await?.is_none());
    assert!(store.list_by_owner("conf-owner-2").await?.is_none());
    Ok(())
}

/// Run the full byte store conformance test suite.
///
/// # Errors
///
/// Returns an error if any conformance test fails.
pub async fn run_byte_conformance_tests(store: &dyn ByteStore) -> Result<(), StoreError> {
    test_read_missing(store).await?;
    test_write_and_read(store).await?;
    test_write_replaces(store).await?;
    test_delete_data(store).await?;
    Ok(())
}

async fn test_read_missing(store: &dyn ByteStore) -> Result<(), StoreError> {
    let key = test_key("conf-b", "missing")?;
    let res = store.read(&key).await;
    assert!(
        matches!(res, Err(StoreError::NotFound(_))),
        "read on missing key should fail with NotFound"
    );
    Ok(())
}

async fn test_write_and_read(store: &dyn ByteStore) -> Result<(), StoreError> {
    let key = test_key("conf-b", "write-read")?;
    store.write(&key, Bytes::from_static(&[1, 2, 3])).await?;
    let data = store.read(&key).await?;
    assert_eq!(&data[..], &[1, 2, 3]);
    Ok(())
}

async fn test_write_replaces(store: &dyn ByteStore) -> Result<(), StoreError> {
    let key = test_key("conf-b", "replace")?;
    store.write(&key, Bytes::from_static(b"first, longer")).await?;
    store.write(&key, Bytes::from_static(b"second")).await?;
    let data = store.read(&key).await?;
    assert_eq!(&data[..], b"second", "writes replace the whole object");
    Ok(())
}

async fn test_delete_data(store: &dyn ByteStore) -> Result<(), StoreError> {
    let key = test_key("conf-b", "to-delete")?;
    store.write(&key, Bytes::from_static(b"bye")).await?;
    store.delete(&key).await?;
    assert!(matches!(
        store.read(&key).await,
        Err(StoreError::NotFound(_))
    ));
    assert!(
        matches!(store.delete(&key).await, Err(StoreError::NotFound(_))),
        "delete on missing key should fail with NotFound"
    );
    Ok(())
}
