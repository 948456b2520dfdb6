//! Export tests against a live store: CSV shape, SQL shape and delivery.

use std::sync::Arc;

use closet_store::{
    Collection, CollectionStore, DirectorySink, ExportFormat, InMemoryKeyValueStore,
    MemorySink, Product, StoreConfig,
};
use tempfile::tempdir;

fn empty_store() -> CollectionStore {
    CollectionStore::open(Arc::new(InMemoryKeyValueStore::new()), StoreConfig::unseeded()).unwrap()
}

#[test]
fn test_csv_has_header_plus_one_line_per_record() {
    let store = CollectionStore::in_memory().unwrap();
    for collection in Collection::ALL {
        let csv = store.generate_csv(collection).unwrap();
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), store.count(collection) + 1, "{collection}");
        assert!(lines[0].starts_with("id,"), "{collection} header: {}", lines[0]);
    }
}

#[test]
fn test_csv_of_empty_collection_is_empty() {
    let store = empty_store();
    assert_eq!(store.generate_csv(Collection::Suppliers).unwrap(), "");
}

#[test]
fn test_csv_escapes_embedded_quotes() {
    let store = empty_store();
    let mut p = Product::new("p1", "Coat", 500.0);
    p.statement = "Say \"less\"".to_string();
    store.add_product(p).unwrap();

    let csv = store.generate_csv(Collection::Products).unwrap();
    let row = csv.lines().nth(1).unwrap();
    assert!(row.starts_with(r#""p1","Coat","#));
    assert!(row.contains(r#""Say \"less\"""#));
    assert!(row.contains(r#","500","#));
}

#[test]
fn test_sql_statements_match_records_and_arity() {
    let store = CollectionStore::in_memory().unwrap();
    for collection in Collection::ALL {
        let sql = store.generate_sql(collection).unwrap();
        let lines: Vec<&str> = sql.lines().collect();
        assert_eq!(lines[0], format!("-- Closet Craze export: {collection}"));
        assert!(lines[1].starts_with("-- Generated: "));

        let prefix = format!("INSERT INTO {collection} (");
        let stmts: Vec<&str> = lines.iter().copied().filter(|l| l.starts_with(&prefix)).collect();
        assert_eq!(stmts.len(), store.count(collection), "{collection}");

        for (stmt, record) in stmts.iter().zip(store.records_as_json(collection).unwrap()) {
            let arity = record.as_object().unwrap().len();
            let columns = stmt[prefix.len()..].split(')').next().unwrap();
            assert_eq!(columns.split(", ").count(), arity, "{stmt}");
            assert!(stmt.ends_with(");"));
        }
    }
}

#[test]
fn test_sql_escapes_single_quotes() {
    let store = empty_store();
    store.add_product(Product::new("p1", "Rock 'n' Roll", 12.5)).unwrap();
    let sql = store.generate_sql(Collection::Products).unwrap();
    assert!(sql.contains("'Rock ''n'' Roll', '', '', 12.5,"));
    assert!(sql.contains("'DEPLOYED');"));
}

#[test]
fn test_export_never_mutates() {
    let store = CollectionStore::in_memory().unwrap();
    let before = store.get_all_orders();
    store.generate_csv(Collection::Orders).unwrap();
    store.generate_sql(Collection::Orders).unwrap();
    assert_eq!(store.get_all_orders(), before);
}

#[test]
fn test_export_to_memory_sink() {
    let store = CollectionStore::in_memory().unwrap();
    let sink = MemorySink::new();
    let name = store.export(Collection::Users, ExportFormat::Sql, &sink).unwrap();

    assert!(name.starts_with("closet_craze_users_"));
    assert!(name.ends_with(".sql"));
    let files = sink.files();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name, name);
    assert_eq!(files[0].mime_type, "application/sql");
    assert!(files[0].content.contains("INSERT INTO users"));
}

#[test]
fn test_export_to_directory_sink() {
    let dir = tempdir().unwrap();
    let store = CollectionStore::in_memory().unwrap();
    let sink = DirectorySink::new(dir.path());
    let name = store.export(Collection::Products, ExportFormat::Csv, &sink).unwrap();

    let written = std::fs::read_to_string(dir.path().join(&name)).unwrap();
    assert_eq!(written, store.generate_csv(Collection::Products).unwrap());
}
