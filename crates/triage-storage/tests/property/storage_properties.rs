use proptest::prelude::*;
use triage_core::traits::IRecordStore;
use triage_storage::{MemoryRecordStore, SqliteRecordStore};

proptest! {
    #[test]
    fn read_all_preserves_append_order(keys in prop::collection::hash_set("[a-z]{1,8}", 0..20)) {
        let keys: Vec<String> = keys.into_iter().collect();
        let sqlite = SqliteRecordStore::open_in_memory().unwrap();
        let memory = MemoryRecordStore::new();
        for (i, k) in keys.iter().enumerate() {
            sqlite.append("ns", k, &i.to_string()).unwrap();
            memory.append("ns", k, &i.to_string()).unwrap();
        }
        let from_sqlite: Vec<String> = sqlite.read_all("ns").unwrap().into_iter().map(|r| r.key).collect();
        let from_memory: Vec<String> = memory.read_all("ns").unwrap().into_iter().map(|r| r.key).collect();
        prop_assert_eq!(&from_sqlite, &keys);
        prop_assert_eq!(&from_memory, &keys);
    }

    #[test]
    fn last_write_wins(values in prop::collection::vec("[a-z0-9]{0,12}", 1..10)) {
        let store = SqliteRecordStore::open_in_memory().unwrap();
        for v in &values {
            store.write("ns", "key", v).unwrap();
        }
        let records = store.read_all("ns").unwrap();
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(&records[0].payload, values.last().unwrap());
    }
}
