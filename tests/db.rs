use storefront::domain::product::NewProduct;
use storefront::repository::{DieselRepository, ProductReader, ProductWriter};

mod common;

#[test]
fn test_migrated_schema_accepts_writes() {
    let test_db = common::TestDb::new("test_migrated_schema_accepts_writes.db");
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_product(&NewProduct::new("Smoke Test", 100, "USD"))
        .unwrap();

    let reloaded = repo.get_product_by_id(created.id).unwrap().unwrap();
    assert_eq!(reloaded.name, "Smoke Test");
}

#[test]
fn test_creates_and_removes_db_files() {
    let base = "test_db_file_cleanup.db";

    {
        let test_db = common::TestDb::new(base);
        let conn = test_db.pool().get();
        assert!(conn.is_ok());
    }

    let db_path = std::path::Path::new(base);
    assert!(!db_path.exists());
    assert!(!std::path::Path::new(&format!("{base}-shm")).exists());
    assert!(!std::path::Path::new(&format!("{base}-wal")).exists());
}
