use accountkeep_core::{KeyValueStore, MemoryKeyValueStore, RecordStore, DEFAULT_STORAGE_KEY};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

struct CapturingLogger {
    events: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        self.events
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    events: Mutex::new(Vec::new()),
};

fn drain_store_load_events() -> Vec<(Level, String)> {
    LOGGER
        .events
        .lock()
        .unwrap()
        .drain(..)
        .filter(|(_, message)| message.contains("event=store_load"))
        .collect()
}

fn errors(events: &[(Level, String)]) -> Vec<&str> {
    events
        .iter()
        .filter(|(level, _)| *level == Level::Error)
        .map(|(_, message)| message.as_str())
        .collect()
}

#[test]
fn load_reports_parse_failures_only() {
    log::set_logger(&LOGGER).expect("no other logger in this test binary");
    log::set_max_level(LevelFilter::Trace);

    let backend = MemoryKeyValueStore::new();
    let mut store = RecordStore::new(&backend);
    let id = store.add().unwrap();
    backend.remove_item(DEFAULT_STORAGE_KEY).unwrap();
    drain_store_load_events();

    store.load();
    let absent = drain_store_load_events();
    assert!(errors(&absent).is_empty(), "absent key logged: {absent:?}");
    assert!(absent
        .iter()
        .any(|(_, message)| message.contains("status=skip")));

    backend.set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();
    store.load();
    let malformed = drain_store_load_events();
    let malformed_errors = errors(&malformed);
    assert_eq!(malformed_errors.len(), 1, "events: {malformed:?}");
    assert!(malformed_errors[0].contains("error_code=parse_failed"));
    assert!(malformed_errors[0].contains(DEFAULT_STORAGE_KEY));
    assert!(store.get_by_id(&id).is_some());

    backend.set_item(DEFAULT_STORAGE_KEY, "[]").unwrap();
    store.load();
    let valid = drain_store_load_events();
    assert!(errors(&valid).is_empty(), "valid payload logged: {valid:?}");
    assert!(store.is_empty());
}
