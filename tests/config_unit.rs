//! Tests for config file loading, validation and CLI merging.

use ascii_lens::ascii::{CellColor, Charset, ColorMode, ConfigError, EdgeMethod, RenderSettings};
use ascii_lens::cli::{handle_config_action, load_config, Args, CliError, ConfigAction};
use ascii_lens::config::{Config, ConfigFileError, DEFAULT_CONFIG};
use clap::Parser;
use std::io::Write;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ==================== Loading Tests ====================

#[test]
fn test_missing_default_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let config = Config::load(Some(path.as_path())).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_explicit_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = load_config(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, ConfigFileError::NotFound(_)));
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let file = write_config(
        r##"
[render]
ascii_width = 80
charset = "blocks"
edge_method = "dog"
color_mode = "rainbow"
theme_color = "#112233"

[output]
fps = 24
"##,
    );
    let config = Config::load(Some(file.path())).unwrap();

    assert_eq!(config.render.ascii_width, 80);
    assert_eq!(config.render.charset, Charset::Blocks);
    assert_eq!(config.render.edge_method, EdgeMethod::Dog);
    assert_eq!(config.render.color_mode, ColorMode::Rainbow);
    assert_eq!(config.render.theme_color, CellColor::new(0x11, 0x22, 0x33));
    assert_eq!(config.output.fps, 24);
    // Untouched fields keep their defaults
    assert!(config.output.ansi);
    assert!(config.render.dithering);
    assert_eq!(config.render.edge_threshold, 100.0);
}

#[test]
fn test_unknown_enum_value_is_parse_error() {
    let file = write_config("[render]\ncharset = \"braille\"\n");
    let err = Config::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, ConfigFileError::Parse { .. }));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn test_bad_color_is_parse_error() {
    let file = write_config("[render]\ntheme_color = \"blue\"\n");
    assert!(matches!(
        Config::load(Some(file.path())),
        Err(ConfigFileError::Parse { .. })
    ));
}

#[test]
fn test_invalid_values_fail_validation() {
    let file = write_config("[render]\nascii_width = 0\n");
    assert!(matches!(
        Config::load(Some(file.path())),
        Err(ConfigFileError::Invalid(ConfigError::InvalidWidth))
    ));

    let file = write_config("[render]\ncharset = \"manual\"\n");
    assert!(matches!(
        Config::load(Some(file.path())),
        Err(ConfigFileError::Invalid(ConfigError::EmptyManualChars))
    ));
}

#[test]
fn test_default_template_round_trips() {
    let config = Config::from_toml(DEFAULT_CONFIG).unwrap();
    assert_eq!(config, Config::default());

    let rendered = config.to_toml().unwrap();
    assert_eq!(Config::from_toml(&rendered).unwrap(), config);
}

#[test]
fn test_init_writes_template_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    Config::init(&path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    assert!(matches!(
        Config::init(&path),
        Err(ConfigFileError::AlreadyExists(_))
    ));
}

#[test]
fn test_config_init_action_keeps_existing_file() {
    let file = write_config("[output]\nfps = 3\n");

    let err = handle_config_action(&ConfigAction::Init, Some(file.path())).unwrap_err();
    assert!(matches!(
        err,
        CliError::Config(ConfigFileError::AlreadyExists(_))
    ));
    assert!(err.to_string().contains("already exists"));
    assert_eq!(
        std::fs::read_to_string(file.path()).unwrap(),
        "[output]\nfps = 3\n"
    );
}

#[test]
fn test_config_init_action_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    handle_config_action(&ConfigAction::Init, Some(path.as_path())).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
}

// ==================== Settings Serialization Tests ====================

#[test]
fn test_settings_json_round_trip() {
    let settings = RenderSettings {
        ascii_width: 64,
        charset: Charset::Manual,
        manual_chars: "@#. ".to_string(),
        color_mode: ColorMode::True,
        ..Default::default()
    };
    let json = serde_json::to_string(&settings).unwrap();
    assert!(json.contains("\"color_mode\":\"true\""));
    assert!(json.contains("\"theme_color\":\"#eeeeee\""));
    let back: RenderSettings = serde_json::from_str(&json).unwrap();
    assert_eq!(back, settings);
}

// ==================== CLI Merge Tests ====================

#[test]
fn test_cli_flags_override_file() {
    let file = write_config("[render]\nascii_width = 80\ninvert = true\n\n[output]\nansi = true\n");
    let path = file.path().to_str().unwrap();
    let args = Args::parse_from(["ascii-lens", "img.png", "--config", path, "-w", "40", "--no-ansi"]);

    let mut config = load_config(args.config.as_deref()).unwrap();
    args.apply_to(&mut config);

    assert_eq!(config.render.ascii_width, 40);
    assert!(config.render.invert);
    assert!(!config.output.ansi);
}
