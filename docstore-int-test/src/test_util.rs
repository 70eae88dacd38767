use docstore::{doc, CollectionConfig, Store, StoreResult};
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temp directory and a path to a store file inside it. The
/// directory is removed when the guard drops.
pub fn temp_store_path(file_name: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join(file_name);
    (dir, path)
}

/// Builds a small store with two populated collections.
pub fn sample_store() -> StoreResult<Store> {
    let mut store = Store::new();

    let users = store.create_collection("users", CollectionConfig::new("id"))?;
    users.put(doc! { id: "u1", name: "Alice", age: 30i64, active: true })?;
    users.put(doc! {
        id: "u2",
        name: "Bob",
        scores: [10i64, 20i64, 30i64],
        address: { city: "Kyiv", zip: "01001" },
    })?;

    let orders = store.create_collection("orders", CollectionConfig::new("order_id"))?;
    orders.put(doc! { order_id: "o1", user: "u1", total: 9.99f64 })?;

    Ok(store)
}
