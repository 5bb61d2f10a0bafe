use std::fs;

use taskpulse::config::{Config, CONFIG_FILE};
use taskpulse::error::{exit_codes, Error};

#[test]
fn config_defaults_when_missing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config = Config::load_from_dir(dir.path())?;

    assert_eq!(config.source.data, None);
    assert_eq!(config.team.size, 1);
    assert_eq!(config.team.hours_per_week, 40.0);
    assert_eq!(config.launch.keyword, "launch");
    assert_eq!(config.weekly.weeks, 12);
    Ok(())
}

#[test]
fn partial_sections_keep_other_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join(CONFIG_FILE), "[team]\nsize = 4\n")?;

    let config = Config::load_from_dir(dir.path())?;
    assert_eq!(config.team.size, 4);
    assert_eq!(config.team.hours_per_week, 40.0);
    assert!(config.launch.name_fallback);
    Ok(())
}

#[test]
fn saved_config_loads_back() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(CONFIG_FILE);
    let mut config = Config::default();
    config.team.size = 5;
    config.launch.keyword = "go-live".to_string();
    config.source.folder_id = Some("77".to_string());
    config.save(&path)?;

    let loaded = Config::load(&path)?;
    assert_eq!(loaded.team.size, 5);
    assert_eq!(loaded.launch.rule().keyword, "go-live");
    assert_eq!(loaded.source.folder_id.as_deref(), Some("77"));
    Ok(())
}

#[test]
fn invalid_values_are_user_errors() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(CONFIG_FILE);

    for content in [
        "[team]\nhours_per_week = 0",
        "[team]\nhours_per_week = 200",
        "[launch]\nkeyword = \"  \"",
        "[source]\nfolder_id = \"\"",
        "[weekly]\nweeks = 521",
    ] {
        fs::write(&path, content)?;
        let err = Config::load(&path).expect_err(content);
        assert!(matches!(err, Error::InvalidConfig(_)), "{content}: {err:?}");
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }
    Ok(())
}

#[test]
fn malformed_toml_is_a_user_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "[team\nsize = ")?;

    let err = Config::load(&path).expect_err("malformed");
    assert!(matches!(err, Error::TomlParse(_)));
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    Ok(())
}
