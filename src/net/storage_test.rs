use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

fn temp_session_path(name: &str) -> PathBuf {
    let n = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir()
        .join(format!("bankportal-storage-test-{}-{n}", std::process::id()))
        .join(format!("{name}.json"))
}

// =============================================================================
// MemoryStorage
// =============================================================================

#[test]
fn memory_get_missing_is_none() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get(TOKEN_KEY), None);
    assert!(storage.is_empty());
}

#[test]
fn memory_set_then_get() {
    let storage = MemoryStorage::new();
    storage.set(TOKEN_KEY, "abc").unwrap();
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("abc"));
    assert_eq!(storage.len(), 1);
}

#[test]
fn memory_set_overwrites() {
    let storage = MemoryStorage::new();
    storage.set(USER_KEY, "one").unwrap();
    storage.set(USER_KEY, "two").unwrap();
    assert_eq!(storage.get(USER_KEY).as_deref(), Some("two"));
}

#[test]
fn memory_remove_absent_key_is_ok() {
    let storage = MemoryStorage::new();
    storage.remove("nope").unwrap();
}

#[test]
fn memory_with_entries_seeds_values() {
    let storage = MemoryStorage::with_entries([(TOKEN_KEY, "t"), (USER_KEY, "{}")]);
    assert_eq!(storage.len(), 2);
    assert_eq!(storage.get(USER_KEY).as_deref(), Some("{}"));
}

#[test]
fn clear_session_removes_both_keys_only() {
    let storage = MemoryStorage::with_entries([(TOKEN_KEY, "t"), (USER_KEY, "{}"), ("theme", "dark")]);
    clear_session(&storage);
    assert_eq!(storage.get(TOKEN_KEY), None);
    assert_eq!(storage.get(USER_KEY), None);
    assert_eq!(storage.get("theme").as_deref(), Some("dark"));
}

// =============================================================================
// FileStorage
// =============================================================================

#[test]
fn file_missing_reads_as_empty() {
    let storage = FileStorage::new(temp_session_path("missing"));
    assert_eq!(storage.get(TOKEN_KEY), None);
}

#[test]
fn file_persists_across_instances() {
    let path = temp_session_path("persist");
    FileStorage::new(&path).set(TOKEN_KEY, "tok-1").unwrap();

    let reopened = FileStorage::new(&path);
    assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("tok-1"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn file_write_leaves_no_staging_file() {
    let path = temp_session_path("staging");
    let storage = FileStorage::new(&path);
    storage.set(TOKEN_KEY, "tok").unwrap();
    storage.set(USER_KEY, "{}").unwrap();

    assert!(path.exists());
    assert!(!storage.staging_path().exists());
    let _ = std::fs::remove_file(&path);
}

#[cfg(unix)]
#[test]
fn file_is_private_to_owner() {
    use std::os::unix::fs::PermissionsExt;

    let path = temp_session_path("private");
    FileStorage::new(&path).set(TOKEN_KEY, "secret-token").unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    let _ = std::fs::remove_file(&path);
}

#[cfg(unix)]
#[test]
fn file_rewrite_tightens_loose_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let path = temp_session_path("loose");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{}").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    FileStorage::new(&path).set(TOKEN_KEY, "tok").unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn file_remove_last_entry_deletes_file() {
    let path = temp_session_path("remove-last");
    let storage = FileStorage::new(&path);
    storage.set(TOKEN_KEY, "tok").unwrap();
    assert!(path.exists());

    storage.remove(TOKEN_KEY).unwrap();
    assert!(!path.exists());
}

#[test]
fn file_remove_keeps_other_entries() {
    let path = temp_session_path("remove-one");
    let storage = FileStorage::new(&path);
    storage.set(TOKEN_KEY, "tok").unwrap();
    storage.set(USER_KEY, "{\"id\":1}").unwrap();

    storage.remove(TOKEN_KEY).unwrap();
    assert_eq!(storage.get(TOKEN_KEY), None);
    assert_eq!(storage.get(USER_KEY).as_deref(), Some("{\"id\":1}"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn file_corrupt_reads_as_absent_and_can_be_overwritten() {
    let path = temp_session_path("corrupt");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json at all").unwrap();

    let storage = FileStorage::new(&path);
    assert_eq!(storage.get(TOKEN_KEY), None);

    storage.set(TOKEN_KEY, "fresh").unwrap();
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("fresh"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn file_remove_clears_corrupt_file() {
    let path = temp_session_path("corrupt-clear");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[1, 2").unwrap();

    FileStorage::new(&path).remove(USER_KEY).unwrap();
    assert!(!path.exists());
}
