//! Tests for configuration file loading.

use super::*;
use crate::model::OptionValue;
use serial_test::serial;
use std::env;
use std::fs;
use std::time::Duration;

#[test]
fn default_config_path_contains_wordcloud_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("wordcloud") && path_str.ends_with("config.toml"),
        "Path should contain 'wordcloud' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("wordcloud_test_config.toml");

    let toml_content = r#"
words = ["rust", "cargo", "crate"]
label_class = "plain"
tick_interval = 0.02
debounce = 0.5
max_iterations = 500
highlight_effect = "bounce"
seed = 42

[label_options]
padding_x = 2
color = "yellow"
bold = true
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(
        config.words,
        Some(vec!["rust".to_string(), "cargo".to_string(), "crate".to_string()])
    );
    assert_eq!(config.label_class, Some(LabelClass::Plain));
    assert_eq!(config.tick_interval, Some(0.02));
    assert_eq!(config.debounce, Some(0.5));
    assert_eq!(config.max_iterations, Some(500));
    assert_eq!(config.highlight_effect, Some("bounce".to_string()));
    assert_eq!(config.seed, Some(42));

    let options = config.label_options.expect("label_options table parsed");
    assert_eq!(options.get("padding_x"), Some(&OptionValue::Number(2.0)));
    assert_eq!(options.get("color"), Some(&OptionValue::Text("yellow".into())));
    assert_eq!(options.get("bold"), Some(&OptionValue::Bool(true)));

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("wordcloud_test_invalid.toml");

    fs::write(&config_path, "this is not valid TOML ][}{")
        .expect("Failed to write invalid test config");

    let result = load_config_file(&config_path);

    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => {
            assert_eq!(path, config_path);
        }
        _ => panic!("Expected ParseError, got {:?}", result),
    }

    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str(
        r#"
debounce = 0.1
unknown_field = "should fail"
"#,
    );
    assert!(
        result.is_err(),
        "Should reject TOML with unknown fields due to deny_unknown_fields"
    );
}

#[test]
fn config_file_rejects_unknown_label_class() {
    let result: Result<ConfigFile, _> = toml::from_str(r#"label_class = "sparkly""#);
    assert!(result.is_err(), "Only 'animated' and 'plain' are label classes");
}

// ===== Merging =====

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_uses_defaults_for_none_fields() {
    let config_file = ConfigFile {
        debounce: Some(0.3),
        clip_to_canvas: Some(false),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(config_file));
    let defaults = ResolvedConfig::default();

    assert_eq!(resolved.debounce, 0.3);
    assert!(!resolved.clip_to_canvas);
    assert_eq!(resolved.tick_interval, defaults.tick_interval);
    assert_eq!(resolved.max_iterations, defaults.max_iterations);
    assert_eq!(resolved.highlight_effect, defaults.highlight_effect);
}

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();

    assert!(config.words.is_empty());
    assert_eq!(config.label_class, LabelClass::Animated);
    assert_eq!(config.tick_interval, 0.01);
    assert_eq!(config.debounce, 0.1);
    assert_eq!(config.max_iterations, 20_000);
    assert_eq!(config.highlight_mean, 0.5);
    assert_eq!(config.highlight_std_dev, 0.3);
    assert_eq!(config.highlight_effect, "zoom");
    assert!(config.clip_to_canvas);
    assert!(config.attention);
}

// ===== Layout conversion =====

#[test]
fn default_resolved_config_matches_default_layout_config() {
    let layout = ResolvedConfig::default()
        .to_layout_config()
        .expect("defaults are valid");
    let expected = LayoutConfig::default();

    assert_eq!(layout.tick_interval, expected.tick_interval);
    assert_eq!(layout.debounce, expected.debounce);
    assert_eq!(layout.spiral, expected.spiral);
    assert_eq!(layout.entrance, expected.entrance);
    assert_eq!(layout.attention.mean, expected.attention.mean);
    assert_eq!(layout.attention.animation, expected.attention.animation);
    let std_dev_error = layout.attention.std_dev.as_secs_f64() - 0.3;
    assert!(std_dev_error.abs() < 1e-6, "std_dev {:?}", layout.attention.std_dev);
}

#[test]
fn plain_label_class_disables_animations() {
    let config = ResolvedConfig {
        label_class: LabelClass::Plain,
        ..ResolvedConfig::default()
    };

    let layout = config.to_layout_config().expect("valid config");

    assert_eq!(layout.entrance, Animation::still());
    assert!(!layout.attention.enabled);
}

#[test]
fn highlight_effect_selects_animation() {
    let config = ResolvedConfig {
        highlight_effect: "flash".to_string(),
        highlight_mean: 2.0,
        ..ResolvedConfig::default()
    };

    let layout = config.to_layout_config().expect("valid config");

    assert_eq!(layout.attention.animation, Animation::flash());
    assert_eq!(layout.attention.mean, Duration::from_secs(2));
}

#[test]
fn unknown_highlight_effect_is_rejected() {
    let config = ResolvedConfig {
        highlight_effect: "wobble".to_string(),
        ..ResolvedConfig::default()
    };

    assert!(matches!(
        config.to_layout_config(),
        Err(ConfigError::InvalidValue {
            field: "highlight_effect",
            ..
        })
    ));
}

#[test]
fn negative_duration_is_rejected() {
    let config = ResolvedConfig {
        debounce: -1.0,
        ..ResolvedConfig::default()
    };

    assert!(matches!(
        config.to_layout_config(),
        Err(ConfigError::InvalidValue {
            field: "debounce",
            ..
        })
    ));
}

#[test]
fn engine_rejection_surfaces_as_layout_error() {
    let config = ResolvedConfig {
        tick_interval: 0.0,
        ..ResolvedConfig::default()
    };

    assert!(matches!(
        config.to_layout_config(),
        Err(ConfigError::Layout(CloudError::InvalidConfiguration(_)))
    ));
}

#[test]
fn word_entries_rejects_empty_words() {
    let config = ResolvedConfig {
        words: vec!["ok".to_string(), String::new()],
        ..ResolvedConfig::default()
    };

    assert!(config.word_entries().is_err());
}

// ===== Environment and CLI =====

/// RAII guard to ensure environment variable cleanup even under test parallelism.
/// Removes the var on drop, preventing test pollution in parallel execution.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
#[serial(wordcloud_effect)]
fn apply_env_overrides_respects_wordcloud_effect() {
    let _guard = EnvGuard::new(EFFECT_ENV);
    env::set_var(EFFECT_ENV, "bounce");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert_eq!(
        result.highlight_effect, "bounce",
        "WORDCLOUD_EFFECT should override highlight_effect"
    );
}

#[test]
#[serial(wordcloud_effect)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _guard = EnvGuard::new(EFFECT_ENV);

    let base = ResolvedConfig::default();
    let result = apply_env_overrides(base.clone());

    assert_eq!(
        result, base,
        "Config should be unchanged when WORDCLOUD_EFFECT not set"
    );
}

#[test]
#[serial(wordcloud_effect)]
fn cli_effect_beats_environment() {
    let _guard = EnvGuard::new(EFFECT_ENV);
    env::set_var(EFFECT_ENV, "bounce");

    let with_env = apply_env_overrides(ResolvedConfig::default());
    let result = apply_cli_overrides(
        with_env,
        CliOverrides {
            effect: Some("flash".to_string()),
            ..CliOverrides::default()
        },
    );

    assert_eq!(result.highlight_effect, "flash");
}

#[test]
fn apply_cli_overrides_only_touches_given_flags() {
    let base = ResolvedConfig {
        words: vec!["from-file".to_string()],
        seed: Some(1),
        ..ResolvedConfig::default()
    };

    let result = apply_cli_overrides(
        base.clone(),
        CliOverrides {
            seed: Some(9),
            label_class: Some(LabelClass::Plain),
            ..CliOverrides::default()
        },
    );

    assert_eq!(result.words, base.words, "words were not given on the CLI");
    assert_eq!(result.seed, Some(9));
    assert_eq!(result.label_class, LabelClass::Plain);
    assert_eq!(result.highlight_effect, base.highlight_effect);
}

#[test]
#[serial(wordcloud_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    let temp_dir = env::temp_dir();

    let explicit_path = temp_dir.join("wordcloud_explicit.toml");
    fs::write(&explicit_path, "debounce = 1.0\n").expect("Failed to write explicit config");

    let env_path = temp_dir.join("wordcloud_env.toml");
    fs::write(&env_path, "debounce = 2.0\n").expect("Failed to write env config");
    env::set_var(CONFIG_ENV, &env_path);

    let config = load_config_with_precedence(Some(explicit_path.clone()))
        .expect("explicit config parses")
        .expect("explicit config exists");

    assert_eq!(
        config.debounce,
        Some(1.0),
        "Should use explicit path, not WORDCLOUD_CONFIG env var"
    );

    fs::remove_file(explicit_path).ok();
    fs::remove_file(env_path).ok();
}

#[test]
#[serial(wordcloud_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);

    let env_path = env::temp_dir().join("wordcloud_env_only.toml");
    fs::write(&env_path, "seed = 5\n").expect("Failed to write env config");
    env::set_var(CONFIG_ENV, &env_path);

    let config = load_config_with_precedence(None)
        .expect("env config parses")
        .expect("env config exists");

    assert_eq!(
        config.seed,
        Some(5),
        "Should use WORDCLOUD_CONFIG when no explicit path"
    );

    fs::remove_file(env_path).ok();
}
