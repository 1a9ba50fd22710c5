use command_hub::settings::Settings;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn missing_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let settings = Settings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.columns, 3);
    assert!(settings.seed_default_layout);
}

#[test]
fn partial_file_fills_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"columns": 4, "debug_logging": true}"#).unwrap();
    let settings = Settings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(settings.columns, 4);
    assert!(settings.debug_logging);
    assert_eq!(settings.dashboard_path, "dashboard.json");
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ columns: ").unwrap();
    assert!(Settings::load(path.to_str().unwrap()).is_err());
}

#[test]
fn column_count_out_of_range_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    for columns in ["0", "65"] {
        std::fs::write(&path, format!(r#"{{"columns": {columns}}}"#)).unwrap();
        let err = Settings::load(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("columns"), "{err}");
    }
    std::fs::write(&path, r#"{"columns": 64}"#).unwrap();
    assert_eq!(Settings::load(path.to_str().unwrap()).unwrap().columns, 64);
}

#[test]
fn save_and_reload() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let settings = Settings {
        log_file: Some("hub.log".into()),
        dashboard_path: dir.path().to_string_lossy().to_string(),
        ..Settings::default()
    };
    settings.save(path.to_str().unwrap()).unwrap();
    let loaded = Settings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(loaded, settings);
    assert_eq!(loaded.dashboard_file(), dir.path().join("dashboard.json"));
    assert_eq!(loaded.log_path(), Some(PathBuf::from("hub.log")));
}
