use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::Duration;

use gridlog_engine::{append_row, AppendOptions, ScriptLock};
use gridlog_model::{CellValue, MemTable, RowStore};

fn submission(who: &str) -> Vec<CellValue> {
    vec!["t".into(), who.into()]
}

#[test]
fn concurrent_appends_land_on_distinct_rows() {
    let table = Arc::new(Mutex::new(
        MemTable::new(1, 2).push_row(&submission("Who")),
    ));
    let barrier = Arc::new(Barrier::new(2));

    let mut handles = Vec::new();
    for who in ["alice", "bob"] {
        let table = Arc::clone(&table);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            let mut table = table.lock().unwrap();
            append_row(&mut *table, &submission(who), &AppendOptions::default())
                .unwrap()
                .location
                .row
        }));
    }

    let mut rows: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    rows.sort_unstable();
    assert_eq!(rows, vec![2, 3]);
    assert_eq!(table.lock().unwrap().last_data_row(), 3);
}

#[test]
fn critical_sections_never_overlap() {
    let lock = Arc::new(ScriptLock::new());
    let in_section = Arc::new(Mutex::new(0u32));
    let barrier = Arc::new(Barrier::new(4));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let lock = Arc::clone(&lock);
        let in_section = Arc::clone(&in_section);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            let _guard = lock.acquire(Duration::from_secs(5)).unwrap();
            {
                let mut n = in_section.lock().unwrap();
                *n += 1;
                assert_eq!(*n, 1, "two holders inside the critical section");
            }
            thread::sleep(Duration::from_millis(5));
            let mut n = in_section.lock().unwrap();
            *n -= 1;
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn waiting_past_the_timeout_fails() {
    let lock = ScriptLock::new();
    let _guard = lock.acquire(Duration::from_millis(100)).unwrap();
    assert!(lock.acquire(Duration::from_millis(10)).is_err());
}
