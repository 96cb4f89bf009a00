use dupefinder::duplicates::{DuplicateFinder, FinderConfig};
use dupefinder::progress::ProgressCallback;
use dupefinder::scanner::{FileEntry, Walker};
use std::fs::{self, File};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 0);
    assert_eq!(summary.duplicate_groups, 0);
    assert!(!summary.has_skipped());
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();

    File::create(dir.path().join("a.txt"))
        .unwrap()
        .write_all(b"content a")
        .unwrap();
    File::create(dir.path().join("b.txt"))
        .unwrap()
        .write_all(b"content b")
        .unwrap();
    File::create(dir.path().join("c.txt"))
        .unwrap()
        .write_all(b"content c")
        .unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert_eq!(summary.total_files, 3);
    assert_eq!(summary.fingerprinted_files, 3);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_scan_duplicate_files() {
    let dir = tempdir().unwrap();

    fs::write(dir.path().join("a.txt"), b"hello world").unwrap();
    fs::write(dir.path().join("b.txt"), b"hello world").unwrap();
    fs::write(dir.path().join("c.txt"), b"different").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(
        groups[0].fingerprint.to_hex(),
        "5eb63bbbe01eeed093cb22bb8f5acdc3"
    );
    assert_eq!(
        groups[0].paths(),
        vec![dir.path().join("a.txt"), dir.path().join("b.txt")]
    );
    assert_eq!(summary.duplicate_files, 1);
    assert_eq!(summary.reclaimable_space, 11);
}

#[test]
fn test_scan_multiple_groups_in_first_seen_order() {
    let dir = tempdir().unwrap();

    // Walk order is sorted by name: a1, a2, b1, b2, z1
    fs::write(dir.path().join("a1"), b"group two").unwrap();
    fs::write(dir.path().join("a2"), b"group one").unwrap();
    fs::write(dir.path().join("b1"), b"group one").unwrap();
    fs::write(dir.path().join("b2"), b"group two").unwrap();
    fs::write(dir.path().join("z1"), b"group two").unwrap();

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(
        groups[0].paths(),
        vec![
            dir.path().join("a1"),
            dir.path().join("b2"),
            dir.path().join("z1")
        ]
    );
    assert_eq!(
        groups[1].paths(),
        vec![dir.path().join("a2"), dir.path().join("b1")]
    );
    assert_eq!(summary.duplicate_files, 3);
}

#[test]
fn test_scan_duplicates_across_subdirectories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("nested").join("deeper");
    fs::create_dir_all(&sub).unwrap();

    fs::write(dir.path().join("top.dat"), b"same bytes").unwrap();
    fs::write(sub.join("bottom.dat"), b"same bytes").unwrap();

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert!(groups[0].paths().contains(&sub.join("bottom.dat")));
    assert!(groups[0].paths().contains(&dir.path().join("top.dat")));
}

#[test]
fn test_scan_same_prefix_different_tail() {
    let dir = tempdir().unwrap();
    let mut a = vec![0xABu8; 100_000];
    let b = a.clone();
    a[99_999] = 0xAC;

    fs::write(dir.path().join("a.bin"), &a).unwrap();
    fs::write(dir.path().join("b.bin"), &b).unwrap();

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(groups.is_empty());
}

#[test]
fn test_scan_large_duplicates_span_many_chunks() {
    let dir = tempdir().unwrap();
    let content: Vec<u8> = (0..50_000u32).map(|i| (i * 7 % 251) as u8).collect();

    fs::write(dir.path().join("one.bin"), &content).unwrap();
    fs::write(dir.path().join("two.bin"), &content).unwrap();

    let (groups, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].size(), 50_000);
    assert_eq!(summary.total_size, 100_000);
}

#[test]
fn test_find_from_prelisted_files() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    fs::write(&a, b"xyz").unwrap();
    fs::write(&b, b"xyz").unwrap();

    let files = vec![FileEntry::new(b.clone(), 3), FileEntry::new(a.clone(), 3)];
    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates_from_files(files)
        .unwrap();

    // Given order is preserved, not re-sorted.
    assert_eq!(groups[0].paths(), vec![b, a]);
}

#[test]
fn test_walker_yields_only_regular_files() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("f"), b"1").unwrap();
    fs::write(dir.path().join("g"), b"2").unwrap();

    let files: Vec<_> = Walker::new(dir.path())
        .walk()
        .filter_map(Result::ok)
        .collect();

    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.path.is_file()));
}

struct CountingProgress {
    phases: AtomicUsize,
    items: AtomicUsize,
}

impl ProgressCallback for CountingProgress {
    fn on_phase_start(&self, _phase: &str, _total: usize) {
        self.phases.fetch_add(1, Ordering::SeqCst);
    }

    fn on_progress(&self, _current: usize, _path: &str) {}

    fn on_item_completed(&self, _bytes: u64) {
        self.items.fetch_add(1, Ordering::SeqCst);
    }

    fn on_phase_end(&self, _phase: &str) {}
}

#[test]
fn test_progress_callback_sees_every_fingerprinted_file() {
    let dir = tempdir().unwrap();
    for i in 0..5 {
        fs::write(dir.path().join(format!("f{i}")), format!("{}", i % 2)).unwrap();
    }

    let progress = Arc::new(CountingProgress {
        phases: AtomicUsize::new(0),
        items: AtomicUsize::new(0),
    });
    let config = FinderConfig::default().with_progress_callback(progress.clone());
    let (groups, _) = DuplicateFinder::new(config)
        .find_duplicates(dir.path())
        .unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(progress.phases.load(Ordering::SeqCst), 1);
    assert_eq!(progress.items.load(Ordering::SeqCst), 5);
}
