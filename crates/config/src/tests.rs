use std::io::Write;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn empty_document_yields_defaults() {
	let config = StatuslineConfig::parse("").ok();
	assert_eq!(config, Some(StatuslineConfig::default()));
}

#[test]
fn layout_lists_and_indicator_are_resolved() {
	let config = StatuslineConfig::parse(
		r#"
left = ["git", "filename"]
right = ["curpos"]
mode_indicator = "background"
"#,
	)
	.ok();
	let Some(config) = config else {
		panic!("config should parse");
	};

	assert_eq!(config.left, vec![FieldToken::Git, FieldToken::Filename]);
	assert_eq!(config.right, vec![FieldToken::Curpos]);
	assert_eq!(config.mode_indicator, ModeIndicator::Background);
	assert!(config.warnings.is_empty());
	assert!(config.shows(FieldToken::Git));
	assert!(!config.shows(FieldToken::Lint));
}

#[test]
fn unknown_tokens_are_skipped_with_warnings() {
	let Ok(config) = StatuslineConfig::parse(
		r#"
left = ["mode", "clock"]
right = ["battery", "lint"]
mode_indicator = "sparkles"
"#,
	) else {
		panic!("unknown tokens must not fail parsing");
	};

	assert_eq!(config.left, vec![FieldToken::Mode]);
	assert_eq!(config.right, vec![FieldToken::Lint]);
	assert_eq!(config.mode_indicator, ModeIndicator::None);
	assert_eq!(
		config.warnings,
		vec![
			ConfigWarning::UnknownField {
				side: Side::Left,
				token: "clock".into()
			},
			ConfigWarning::UnknownField {
				side: Side::Right,
				token: "battery".into()
			},
			ConfigWarning::UnknownModeIndicator("sparkles".into()),
		]
	);
	assert_eq!(
		config.warnings[0].to_string(),
		"unknown status line field 'clock' in left list (ignored)"
	);
}

#[test]
fn partial_tables_keep_remaining_defaults() {
	let Ok(config) = StatuslineConfig::parse(
		r##"
[colors]
insert = "#000000"

[channel]
overflow = "drop-oldest"

[git]
timeout_ms = 250
"##,
	) else {
		panic!("config should parse");
	};

	assert_eq!(config.colors.insert, Color::rgb(0, 0, 0));
	assert_eq!(config.colors.normal, ModeColors::default().normal);
	assert_eq!(config.channel, ChannelConfig {
		capacity: 1000,
		overflow: Overflow::DropOldest,
	});
	assert_eq!(config.git.program, "git");
	assert_eq!(config.git.timeout(), Duration::from_millis(250));
}

#[test]
fn invalid_color_is_an_error() {
	let result = StatuslineConfig::parse(
		r#"
[colors]
visual = "purple"
"#,
	);
	assert!(matches!(result, Err(ConfigError::Toml(_))), "got {result:?}");
}

#[test]
fn zero_capacity_is_rejected() {
	let result = StatuslineConfig::parse("[channel]\ncapacity = 0\n");
	assert!(matches!(result, Err(ConfigError::ZeroCapacity)));
}

#[test]
fn zero_git_timeout_is_rejected() {
	let result = StatuslineConfig::parse("[git]\ntimeout_ms = 0\n");
	assert!(matches!(result, Err(ConfigError::ZeroTimeout)));

	let config = StatuslineConfig::parse("[git]\ntimeout_ms = 250\n").expect("parse config");
	assert_eq!(config.git.timeout(), std::time::Duration::from_millis(250));
}

#[test]
fn load_reads_file_and_reports_missing_path() {
	let dir = tempfile::tempdir().expect("tempdir");
	let path = dir.path().join(CONFIG_FILE);
	let mut file = std::fs::File::create(&path).expect("create config");
	writeln!(file, "visible = false").expect("write config");

	let config = StatuslineConfig::load(&path).expect("load config");
	assert!(!config.visible);

	let missing = dir.path().join("missing.toml");
	match StatuslineConfig::load_or_default(Some(&missing)) {
		Err(ConfigError::Io { path, .. }) => assert_eq!(path, missing),
		other => panic!("expected Io error, got {other:?}"),
	}
}
