extern crate ordset;
use ordset::*;

extern crate rand;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn new() {
    let list: SkipList<i32> = Default::default();
    assert_eq!(list.len(), 0);
    assert!(list.is_empty());
    assert_eq!(list.height(), 1);
    assert_eq!(list.max_height(), MAX_HEIGHT);
}

#[test]
fn insert_get_duplicate() {
    let key = 55;
    let mut list = SkipList::with_seed(11);

    assert!(list.insert(key));
    let first: *const i32 = list.get(&key).unwrap();

    // The second insertion should fail, the key is already there
    assert!(!list.insert(key));
    // Duplicate insertions don't change the length
    assert_eq!(list.len(), 1);
    assert!(std::ptr::eq(first, list.get(&key).unwrap()));
}

#[test]
fn insert_two_remove() {
    let key_1 = 435;
    let key_2 = 555;
    let mut list = SkipList::with_seed(12);
    assert_eq!(list.len(), 0);

    assert!(list.insert(key_1));
    assert_eq!(list.len(), 1);
    assert!(list.contains(&key_1));
    assert!(!list.contains(&key_2));

    assert!(list.insert(key_2));
    assert_eq!(list.len(), 2);
    assert!(list.contains(&key_1));
    assert!(list.contains(&key_2));

    assert!(list.remove(&key_1));
    assert_eq!(list.len(), 1);
    assert!(!list.contains(&key_1));
    assert!(list.contains(&key_2));

    assert!(list.insert(key_1));
    assert_eq!(list.len(), 2);

    assert!(list.remove(&key_2));
    assert_eq!(list.len(), 1);
    assert!(list.contains(&key_1));
    assert!(!list.contains(&key_2));

    assert!(list.remove(&key_1));
    assert_eq!(list.len(), 0);
    assert!(!list.contains(&key_1));
    assert!(!list.contains(&key_2));
}

#[test]
fn remove_single() {
    let key = 12;
    let mut list = SkipList::with_seed(13);

    assert!(list.insert(key));
    assert!(list.remove(&key));
    assert_eq!(list.len(), 0);
    assert!(!list.contains(&key));
    assert!(!list.remove(&key));
    assert!(list.check_invariants().is_ok());
}

#[test]
fn height_never_shrinks_on_remove() {
    init_logging();
    let mut list: SkipList<u32> = SkipList::with_seed(14);
    list.extend(0..1000);
    let height = list.height();
    assert!(height > 1);

    for key in 0..1000 {
        assert!(list.remove(&key));
        assert_eq!(list.height(), height);
    }
    assert!(list.is_empty());
    assert!(list.check_invariants().is_ok());
}

#[test]
fn active_height_respects_cap() {
    init_logging();
    let mut list: SkipList<u32> = SkipList::with_seed(15);
    for key in 0..3000 {
        list.insert(key);
        assert!(list.height() <= MAX_HEIGHT);
    }

    let generator = GeometricalGenerator::new(4, 0.5, StdRng::seed_from_u64(16));
    let mut list: SkipList<u32> = SkipList::new(Box::new(generator));
    list.extend(0..2000);
    assert_eq!(list.max_height(), 4);
    assert_eq!(list.height(), 4);
    assert!(list.check_invariants().is_ok());
}

#[test]
fn borrowed_lookups() {
    let mut list: SkipList<String> = SkipList::with_seed(17);
    list.insert("pear".to_string());
    list.insert("apple".to_string());
    assert!(list.contains("pear"));
    assert_eq!(list.first().map(String::as_str), Some("apple"));
    assert!(list.remove("pear"));
    assert!(!list.contains("pear"));
}

#[test]
fn clear_does_not_invalidate() {
    let mut list: SkipList<usize> = SkipList::with_seed(18);

    for i in 0..10 {
        assert_eq!(list.len(), i);
        assert!(list.insert(i));
        assert!(!list.insert(i));
    }

    list.clear();
    assert_eq!(list.len(), 0);

    for i in 0..10 {
        assert!(!list.contains(&i));
        assert!(list.insert(i));
    }

    list.clear();
    for i in 0..10 {
        assert!(!list.remove(&i));
        assert_eq!(list.len(), 0);
    }
}

#[test]
fn format_empty() {
    let list: SkipList<u32> = Default::default();
    assert_eq!(format!("{}", list), "[]");
}

#[test]
fn format_singleton() {
    let mut list: SkipList<u32> = Default::default();
    list.insert(1);
    assert_eq!(format!("{}", list), "[1]");
}

#[test]
fn format_multiple() {
    let mut list: SkipList<u32> = Default::default();
    list.insert(6);
    list.insert(2);
    list.insert(3);
    list.insert(1);
    list.insert(5);
    list.insert(4);
    assert_eq!(format!("{}", list), "[1, 2, 3, 4, 5, 6]");
    assert_eq!(format!("{:?}", list), "{1, 2, 3, 4, 5, 6}");
}

#[test]
fn shared_across_threads() {
    use std::sync::{Arc, Mutex};
    use std::thread;

    init_logging();
    let list = Arc::new(Mutex::new(SkipList::with_seed(17)));

    let workers: Vec<_> = (0..4u32)
        .map(|worker| {
            let list = Arc::clone(&list);
            thread::spawn(move || {
                for key in (0..250).map(|i| i * 4 + worker) {
                    assert!(list.lock().unwrap().insert(key));
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let list = Arc::try_unwrap(list).ok().unwrap().into_inner().unwrap();
    assert_eq!(list.len(), 1000);
    assert!(list.iter().copied().eq(0..1000u32));
    assert!(list.check_invariants().is_ok());

    // A finished list can also be moved wholesale and read elsewhere.
    let total = thread::spawn(move || list.iter().map(|&key| key as u64).sum::<u64>())
        .join()
        .unwrap();
    assert_eq!(total, 999 * 1000 / 2);
}
