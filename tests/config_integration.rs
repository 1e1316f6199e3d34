use std::path::PathBuf;

use faqview::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".faqviewrc");
    let content = r"
# comment
--watch

--category billing

--log-file=faq.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.watch);
    assert_eq!(flags.category.as_deref(), Some("billing"));
    assert_eq!(flags.log_file, Some(PathBuf::from("faq.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".faqviewrc");
    let content = "--watch\n--category billing\n--log-file file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "faqview".to_string(),
        "--category".to_string(),
        "technical".to_string(),
        "--no-mouse".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.watch, "file flags should remain enabled");
    assert!(effective.no_mouse, "cli flags should be applied");
    assert_eq!(
        effective.category.as_deref(),
        Some("technical"),
        "cli should override category"
    );
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_local_override_layers_on_global() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("config");
    let local = dir.path().join(".faqviewrc");
    std::fs::write(&global, "--search-delay 500\n--marker [,]\n").unwrap();
    std::fs::write(&local, "--search-delay 100\n--no-search\n").unwrap();

    let merged = load_config_flags(&global)
        .unwrap()
        .union(&load_config_flags(&local).unwrap());
    assert_eq!(merged.search_delay_ms, Some(100));
    assert_eq!(merged.marker, Some(("[".to_string(), "]".to_string())));
    assert!(merged.no_search);
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        watch: true,
        ..ConfigFlags::default()
    };
    let cli = ConfigFlags {
        no_mouse: true,
        no_search: true,
        ..ConfigFlags::default()
    };
    let merged = file.union(&cli);
    assert!(merged.watch);
    assert!(merged.no_mouse);
    assert!(merged.no_search);
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}
