//! Construction and metadata resolution.

use serde_json::json;

use table_store_core::{StoreError, StoreOptions, TableStore};

use super::helpers::{blog_options, blog_value};

#[test]
fn test_construct_from_options() -> anyhow::Result<()> {
    let store = TableStore::from_value(blog_value(), Some(blog_options()))?;
    assert_eq!(store.table_count(), 3);
    assert!(store.metadata().declares_table("Comment"));
    Ok(())
}

#[test]
fn test_construct_from_embedded_metadata() -> anyhow::Result<()> {
    let mut value = blog_value();
    value["metadata"] = json!({
        "tables": ["User"],
        "columns": {"User": ["id"]}
    });
    let store = TableStore::from_value(value, None)?;
    // metadata is not a table
    assert_eq!(store.table_count(), 3);
    assert!(store.rows("metadata").is_err());
    assert_eq!(store.metadata().tables, Some(vec!["User".to_string()]));
    Ok(())
}

#[test]
fn test_embedded_metadata_takes_precedence() -> anyhow::Result<()> {
    let mut value = blog_value();
    value["metadata"] = json!({
        "tables": ["User"],
        "columns": {"User": ["id"]}
    });
    let store = TableStore::from_value(value, Some(blog_options()))?;
    assert_eq!(store.metadata().tables, Some(vec!["User".to_string()]));
    assert_eq!(
        store.metadata().columns_of("User"),
        Some(&["id".to_string()][..])
    );
    assert!(store.metadata().columns_of("Post").is_none());
    Ok(())
}

#[test]
fn test_construct_without_metadata_fails() {
    let err = TableStore::from_value(blog_value(), None).unwrap_err();
    assert!(matches!(err, StoreError::Configuration { .. }));

    let err = TableStore::from_value(blog_value(), Some(StoreOptions::default())).unwrap_err();
    assert!(matches!(err, StoreError::Configuration { .. }));
}

#[test]
fn test_null_metadata_falls_back_to_options() -> anyhow::Result<()> {
    let mut value = blog_value();
    value["metadata"] = json!(null);
    let store = TableStore::from_value(value, Some(blog_options()))?;
    assert_eq!(store.metadata().tables.as_ref().map(Vec::len), Some(3));
    Ok(())
}

#[test]
fn test_malformed_dataset_values() {
    for value in [
        json!([1, 2, 3]),
        json!({"User": {"id": 1}}),
        json!({"User": [1, 2]}),
        json!({"User": [], "metadata": {"tables": "User"}}),
    ] {
        let err = TableStore::from_value(value, Some(blog_options())).unwrap_err();
        assert!(matches!(err, StoreError::Deserialization(_)), "{}", err);
    }
}
