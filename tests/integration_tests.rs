// Integration tests - cross-module flows over real (temp) files

use hypermark::bytemark::{bytemarks_to_tables, tables_to_bytemarks, Bytemark};
use hypermark::output::{self, OutputError, OutputTarget};
use hypermark::services::clipboard::Clipboard;
use hypermark::{hyperpaths, ops};
use proptest::prelude::*;
use std::io::Cursor;
use tempfile::TempDir;

fn record(title: &str) -> Bytemark {
    Bytemark {
        title: title.to_string(),
        date_time: "11/3/2026 17:9".to_string(),
        root_url: format!("https://example.com/{title}"),
        rows: vec![format!("Comments: https://news.ycombinator.com/item?id={title}")],
    }
}

fn internal_clipboard() -> Clipboard {
    let mut cb = Clipboard::new();
    cb.set_internal_only(true);
    cb
}

#[test]
fn registry_round_trips_through_disk_with_renumbering() {
    let dir = TempDir::new().unwrap();
    let registry = dir.path().join("hyperpaths");

    // Seed a file with gappy, out-of-order indices and junk lines.
    std::fs::write(&registry, "9: /tmp/a.md\nnoise\n2: /tmp/b.md\n").unwrap();
    let paths = hyperpaths::load(&registry).unwrap();
    assert_eq!(paths, vec!["/tmp/a.md", "/tmp/b.md"]);

    hyperpaths::persist(&registry, &paths).unwrap();
    let raw = std::fs::read_to_string(&registry).unwrap();
    assert_eq!(raw, "0: /tmp/a.md\n1: /tmp/b.md\n");
    assert_eq!(hyperpaths::load(&registry).unwrap(), paths);
}

#[test]
fn registry_with_only_junk_is_an_error() {
    let dir = TempDir::new().unwrap();
    let registry = dir.path().join("hyperpaths");
    std::fs::write(&registry, "nothing parses here\n").unwrap();
    assert_eq!(
        hyperpaths::load(&registry).unwrap_err(),
        hyperpaths::HyperpathError::NoHyperpaths
    );
}

#[test]
fn empty_registry_is_an_empty_list() {
    let dir = TempDir::new().unwrap();
    let registry = dir.path().join("hyperpaths");
    hyperpaths::ensure_registry(&registry).unwrap();
    assert_eq!(hyperpaths::load(&registry).unwrap(), Vec::<String>::new());
}

#[test]
fn edit_nth_outcomes() {
    let dir = TempDir::new().unwrap();
    let registry = dir.path().join("hyperpaths");
    hyperpaths::persist(&registry, &["/tmp/seed.md".to_string()]).unwrap();

    // Existing regular file: written and valid, persisted at the index.
    let real = dir.path().join("real.md");
    std::fs::write(&real, "").unwrap();
    let outcome = hyperpaths::edit_nth(&registry, &real.display().to_string(), 1).unwrap();
    assert!(outcome.written && outcome.valid);
    let paths = hyperpaths::load(&registry).unwrap();
    assert_eq!(paths[1], real.display().to_string());

    // Missing file in an existing directory: valid but not written.
    let missing = dir.path().join("missing.md");
    let outcome = hyperpaths::edit_nth(&registry, &missing.display().to_string(), 0).unwrap();
    assert!(!outcome.written && outcome.valid);

    // Missing parent directory: unusable.
    let bad = dir.path().join("no/such/dir/f.md");
    let outcome = hyperpaths::edit_nth(&registry, &bad.display().to_string(), 0).unwrap();
    assert!(!outcome.written && !outcome.valid);

    // A directory is never a valid target.
    let outcome =
        hyperpaths::edit_nth(&registry, &dir.path().display().to_string(), 0).unwrap();
    assert!(!outcome.written && !outcome.valid);
}

#[test]
fn edit_nth_rejects_index_past_append_slot() {
    let dir = TempDir::new().unwrap();
    let registry = dir.path().join("hyperpaths");
    hyperpaths::persist(&registry, &["/tmp/seed.md".to_string()]).unwrap();
    let real = dir.path().join("real.md");
    std::fs::write(&real, "").unwrap();

    let err = hyperpaths::edit_nth(&registry, &real.display().to_string(), 5).unwrap_err();
    assert_eq!(
        err,
        hyperpaths::HyperpathError::OutOfRange { index: 5, len: 1 }
    );
}

#[test]
fn choose_output_precedence() {
    let dir = TempDir::new().unwrap();
    let registry = dir.path().join("hyperpaths");
    hyperpaths::persist(&registry, &["/tmp/default.md".to_string()]).unwrap();
    let mut input = Cursor::new(Vec::new());
    let mut out = Vec::new();

    // Clipboard beats everything.
    let target = output::choose_output(
        Some("/tmp/x.md"),
        false,
        true,
        true,
        &registry,
        &mut input,
        &mut out,
    )
    .unwrap();
    assert_eq!(target, OutputTarget::Clipboard);

    // Then stdout.
    let target = output::choose_output(
        Some("/tmp/x.md"),
        false,
        true,
        false,
        &registry,
        &mut input,
        &mut out,
    )
    .unwrap();
    assert_eq!(target, OutputTarget::Stdout);

    // Then the explicit path.
    let target = output::choose_output(
        Some("/tmp/x.md"),
        false,
        false,
        false,
        &registry,
        &mut input,
        &mut out,
    )
    .unwrap();
    assert_eq!(target, OutputTarget::File("/tmp/x.md".into()));

    // Finally hyperpath[0].
    let target =
        output::choose_output(None, false, false, false, &registry, &mut input, &mut out).unwrap();
    assert_eq!(target, OutputTarget::File("/tmp/default.md".into()));
}

#[test]
fn overwrite_confirmation_wipes_on_yes() {
    let dir = TempDir::new().unwrap();
    let registry = dir.path().join("hyperpaths");
    let file = dir.path().join("notes.md");
    let file_arg = file.display().to_string();
    std::fs::write(&file, "old content\n").unwrap();

    let mut input = Cursor::new(b"y\n".to_vec());
    let mut out = Vec::new();
    let target = output::choose_output(
        Some(&file_arg),
        true,
        false,
        false,
        &registry,
        &mut input,
        &mut out,
    )
    .unwrap();

    let prompt = String::from_utf8(out).unwrap();
    assert!(prompt.contains("will be overwritten"));
    assert!(!file.exists());

    let mut cb = internal_clipboard();
    let dest = output::write(&target, "new content\n", &mut cb).unwrap();
    assert_eq!(dest, file.display().to_string());
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "new content\n");
}

#[test]
fn overwrite_confirmation_aborts_on_anything_else() {
    let dir = TempDir::new().unwrap();
    let registry = dir.path().join("hyperpaths");
    let file = dir.path().join("notes.md");
    let file_arg = file.display().to_string();
    std::fs::write(&file, "precious\n").unwrap();

    for answer in ["n\n", "maybe\n", "\n"] {
        let mut input = Cursor::new(answer.as_bytes().to_vec());
        let mut out = Vec::new();
        let err = output::choose_output(
            Some(&file_arg),
            true,
            false,
            false,
            &registry,
            &mut input,
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(err, OutputError::Aborted));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "precious\n");
    }
}

#[test]
fn append_mode_accumulates_records() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("marks.md");
    let target = OutputTarget::File(file.clone());
    let mut cb = internal_clipboard();

    output::write(&target, &record("first").to_table(), &mut cb).unwrap();
    output::write(&target, &record("second").to_table(), &mut cb).unwrap();

    let decoded = tables_to_bytemarks(&std::fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded[0].title, "first");
    assert_eq!(decoded[1].title, "second");
}

#[test]
fn manager_style_load_mutate_rewrite_cycle() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("marks.md");
    let originals = vec![record("a"), record("b"), record("c")];
    std::fs::write(&file, bytemarks_to_tables(&originals)).unwrap();

    // load -> duplicate b above itself, delete a, move c to front
    let mut list = tables_to_bytemarks(&std::fs::read_to_string(&file).unwrap()).unwrap();
    list = ops::insert_at(&list, list[1].clone(), 1).unwrap();
    list = ops::delete_at(&list, 0).unwrap();
    list = ops::swap_at(&list, 0, 2).unwrap();

    output::rewrite_file(&file, &bytemarks_to_tables(&list)).unwrap();

    let reloaded = tables_to_bytemarks(&std::fs::read_to_string(&file).unwrap()).unwrap();
    let titles: Vec<_> = reloaded.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["c", "b", "b"]);
    assert_eq!(reloaded, list);
}

proptest! {
    // Records whose titles carry no `|` survive encode -> decode intact.
    #[test]
    fn prop_record_round_trip(
        title in "[a-zA-Z0-9 ,.:/_'()-]{0,40}",
        url in "https://[a-z]{1,10}\\.example\\.com/[a-z0-9]{0,12}",
        rows in proptest::collection::vec("[a-zA-Z0-9 ,.:/-]{0,30}", 0..4),
    ) {
        let b = Bytemark {
            title,
            date_time: "2/14/2026 8:3".to_string(),
            root_url: url,
            rows,
        };
        let decoded = tables_to_bytemarks(&b.to_table()).unwrap();
        prop_assert_eq!(decoded, vec![b]);
    }

    #[test]
    fn prop_multi_record_file_preserves_order(count in 1usize..6) {
        let records: Vec<Bytemark> = (0..count).map(|i| record(&format!("r{i}"))).collect();
        let decoded = tables_to_bytemarks(&bytemarks_to_tables(&records)).unwrap();
        prop_assert_eq!(decoded, records);
    }

    #[test]
    fn prop_delete_preserves_untouched_order(
        list in proptest::collection::vec("[a-z]{1,6}", 1..10),
        index_seed in 0usize..64,
    ) {
        let index = index_seed % list.len();
        let out = ops::delete_at(&list, index).unwrap();
        prop_assert_eq!(out.len(), list.len() - 1);
        let mut expected = list.clone();
        expected.remove(index);
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn prop_swap_twice_is_identity(
        list in proptest::collection::vec("[a-z]{1,6}", 2..10),
        seed_a in 0usize..64,
        seed_b in 0usize..64,
    ) {
        let a = seed_a % list.len();
        let b = seed_b % list.len();
        let twice = ops::swap_at(&ops::swap_at(&list, a, b).unwrap(), a, b).unwrap();
        prop_assert_eq!(twice, list);
    }
}
