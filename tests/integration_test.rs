#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use kvconf::{Destination, ErrorKind, KvconfError, ListMode, Loader, Schema, SyntaxError};
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn kvconf_cmd() -> assert_cmd::Command {
	assert_cmd::Command::cargo_bin("kvconf").unwrap()
}

/// Write `content` to a fresh temp dir, returning the dir guard and file path.
fn config_file(content: &str) -> (tempfile::TempDir, PathBuf) {
	let temp_dir = tempfile::tempdir().unwrap();
	let path = temp_dir.path().join("test.cfg");
	fs::write(&path, content).unwrap();
	(temp_dir, path)
}

#[derive(Debug, Default, PartialEq)]
struct Single<T> {
	foo: T,
}

impl<T: kvconf::Field> Destination for Single<T> {
	fn schema(&mut self) -> Schema<'_> {
		Schema::new().field("Foo", &mut self.foo)
	}
}

fn load_single<T: kvconf::Field + Default>(content: &str) -> kvconf::Result<T> {
	let (_dir, path) = config_file(content);
	let mut config = Single::<T>::default();
	kvconf::load(&path, &mut config)?;
	Ok(config.foo)
}

// ============================================================================
// Scalar values
// ============================================================================

#[test]
fn test_string() {
	assert_eq!(load_single::<String>("Foo = bar\n").unwrap(), "bar");
}

#[test]
fn test_bool() {
	assert!(load_single::<bool>("Foo = true\n").unwrap());
}

#[test]
fn test_int() {
	assert_eq!(load_single::<i32>("Foo = -1\n").unwrap(), -1);
}

#[test]
fn test_uint() {
	assert_eq!(load_single::<u32>("Foo = 1\n").unwrap(), 1);
}

#[test]
fn test_float() {
	assert_eq!(load_single::<f32>("Foo = 0.5\n").unwrap(), 0.5);
}

#[test]
fn test_out_of_range_uint() {
	let err = load_single::<u8>("Foo = 256\n").unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Value);
	assert!(err.to_string().contains("invalid uint \"256\" for u8"));
}

// ============================================================================
// Line syntax
// ============================================================================

#[test]
fn test_no_spaces() {
	assert_eq!(load_single::<i64>("Foo=1\n").unwrap(), 1);
}

#[test]
fn test_weird_spaces() {
	assert_eq!(load_single::<i64>("  \t Foo   =\t  1   \n").unwrap(), 1);
}

#[test]
fn test_quoted_value() {
	assert_eq!(load_single::<String>("Foo = \"bar\"\n").unwrap(), "bar");
}

#[test]
fn test_quotes_inside_value() {
	assert_eq!(load_single::<String>("Foo = \"quo\"te\n").unwrap(), "quote");
	assert_eq!(load_single::<String>("Foo = str\"ing\"\n").unwrap(), "string");
}

#[test]
fn test_two_quotes() {
	assert_eq!(load_single::<String>("Foo = \"\"test\n").unwrap(), "test");
	assert_eq!(
		load_single::<String>("Foo = \"test\"\"ing\"\n").unwrap(),
		"testing"
	);
}

#[test]
fn test_string_with_hash() {
	assert_eq!(
		load_single::<String>("Foo = \"#something\"\n").unwrap(),
		"#something"
	);
}

#[test]
fn test_end_of_line_comment() {
	assert_eq!(load_single::<i32>("Foo = 1 # the answer\n").unwrap(), 1);
	assert_eq!(
		load_single::<String>("Foo = bar # comment\n").unwrap(),
		"bar"
	);
}

#[test]
fn test_escaped_quote() {
	assert_eq!(
		load_single::<String>("Foo = \"hel\\\"lo\"\n").unwrap(),
		"hel\"lo"
	);
}

#[test]
fn test_quoted_hash_then_comment() {
	assert_eq!(
		load_single::<String>("Foo = \"hel\"lo # \"not part of it\"\n").unwrap(),
		"hello"
	);
}

#[test]
fn test_full_line_comment() {
	let (_dir, path) = config_file("# Foo = bar\n   # indented\n");
	let mut config = Single {
		foo: "unchanged".to_string(),
	};
	kvconf::load(&path, &mut config).unwrap();
	assert_eq!(config.foo, "unchanged");
}

#[test]
fn test_key_with_quote() {
	let err = load_single::<String>("\"Foo\" = test\n").unwrap_err();
	assert!(matches!(
		err,
		KvconfError::Syntax {
			reason: SyntaxError::QuoteInKey { .. },
			..
		}
	));
}

#[test]
fn test_no_equals() {
	let err = load_single::<String>("Foo\n").unwrap_err();
	assert!(matches!(
		err,
		KvconfError::Syntax {
			line: 1,
			reason: SyntaxError::MissingEquals,
			..
		}
	));
}

#[test]
fn test_empty_key() {
	let err = load_single::<String>("= value\n").unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn test_empty_value() {
	let err = load_single::<String>("Foo =   # nothing\n").unwrap_err();
	assert!(matches!(
		err,
		KvconfError::Syntax {
			reason: SyntaxError::EmptyValue { .. },
			..
		}
	));
	assert_eq!(load_single::<String>("Foo = \"\"\n").unwrap(), "");
}

#[test]
fn test_multiple_definitions() {
	let err = load_single::<String>("Foo = bar\nFoo = baz\n").unwrap_err();
	match err {
		KvconfError::DuplicateKey {
			path,
			line,
			first_line,
			..
		} => {
			assert!(path.ends_with("test.cfg"));
			assert_eq!(line, 2);
			assert_eq!(first_line, 1);
		}
		other => panic!("Expected DuplicateKey error, got {other:?}"),
	}
}

// ============================================================================
// Records
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct ServerConfig {
	port: i32,
	templates_folder: String,
	debug: bool,
	admin_email: Vec<String>,
	unexported: String,
}

impl Default for ServerConfig {
	fn default() -> Self {
		ServerConfig {
			port: 8080,
			templates_folder: "tmpl".to_string(),
			debug: false,
			admin_email: vec!["test@example.org".to_string()],
			unexported: "foo".to_string(),
		}
	}
}

impl Destination for ServerConfig {
	fn schema(&mut self) -> Schema<'_> {
		Schema::new()
			.field("Port", &mut self.port)
			.field("TemplatesFolder", &mut self.templates_folder)
			.field("Debug", &mut self.debug)
			.field("AdminEmail", &mut self.admin_email)
			.read_only("unexported", &self.unexported)
	}
}

struct Empty;

impl Destination for Empty {
	fn schema(&mut self) -> Schema<'_> {
		Schema::new()
	}
}

const EXAMPLE: &str = r#"# Server configuration
Port = 8000
TemplatesFolder = templates
Debug = true

# Who gets error reports
AdminEmail = foo@mailinator.com
AdminEmail = "bar@mailinator.com"
"#;

#[test]
fn test_loading_example_config() {
	let (_dir, path) = config_file(EXAMPLE);
	let mut config = ServerConfig::default();
	kvconf::load(&path, &mut config).unwrap();

	assert_eq!(
		config,
		ServerConfig {
			port: 8000,
			templates_folder: "templates".to_string(),
			debug: true,
			admin_email: vec![
				"test@example.org".to_string(),
				"foo@mailinator.com".to_string(),
				"bar@mailinator.com".to_string(),
			],
			..ServerConfig::default()
		}
	);
}

#[test]
fn test_loading_example_config_replacing_lists() {
	let (_dir, path) = config_file(EXAMPLE);
	let mut config = ServerConfig::default();
	Loader::new()
		.list_mode(ListMode::Replace)
		.load(&path, &mut config)
		.unwrap();

	assert_eq!(
		config.admin_email,
		vec!["foo@mailinator.com", "bar@mailinator.com"]
	);
}

#[test]
fn test_loading_empty_config() {
	let (_dir, path) = config_file("");
	kvconf::load(&path, &mut Empty).unwrap();
}

#[test]
fn test_config_specifies_non_existent_field() {
	let (_dir, path) = config_file(EXAMPLE);
	let err = kvconf::load(&path, &mut Empty).unwrap_err();

	assert_eq!(err.kind(), ErrorKind::Schema);
	assert_eq!(err.line(), Some(2));
}

#[test]
fn test_unexported_field() {
	let (_dir, path) = config_file("unexported = bar\n");
	let mut config = ServerConfig::default();
	let err = kvconf::load(&path, &mut config).unwrap_err();

	assert!(matches!(err, KvconfError::ReadOnlyField { .. }));
	assert_eq!(config.unexported, "foo");
}

#[test]
fn test_missing_file() {
	let temp_dir = tempfile::tempdir().unwrap();
	let err = kvconf::load(temp_dir.path().join("nope.cfg"), &mut Empty).unwrap_err();

	assert_eq!(err.kind(), ErrorKind::Resource);
}

// ============================================================================
// CLI tests
// ============================================================================

#[test]
fn test_help_flag() {
	kvconf_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("key = value"));
}

#[test]
fn test_version_flag() {
	kvconf_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("kvconf"));
}

#[test]
fn test_no_args_shows_help() {
	kvconf_cmd()
		.assert()
		.failure()
		.stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_check_valid_file() {
	let (_dir, path) = config_file(EXAMPLE);

	kvconf_cmd()
		.arg("check")
		.arg(&path)
		.assert()
		.success()
		.stdout(predicate::str::contains("ok (5 entries)"));
}

#[test]
fn test_check_reports_syntax_error_with_line() {
	let (_dir, path) = config_file("Foo = bar\nBroken line\n");

	kvconf_cmd()
		.arg("check")
		.arg(&path)
		.assert()
		.failure()
		.stderr(predicate::str::contains("test.cfg:2"))
		.stderr(predicate::str::contains("must contain"));
}

#[test]
fn test_check_strict_rejects_repeated_keys() {
	let (_dir, path) = config_file(EXAMPLE);

	kvconf_cmd()
		.args(["check", "--strict"])
		.arg(&path)
		.assert()
		.failure()
		.stderr(predicate::str::contains("already defined on line 7"));
}

#[test]
fn test_check_missing_file() {
	let temp_dir = tempfile::tempdir().unwrap();

	kvconf_cmd()
		.arg("check")
		.arg(temp_dir.path().join("nope.cfg"))
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to open config file"));
}

#[test]
fn test_dump_prints_normalized_entries() {
	let (_dir, path) = config_file("Foo = \"  spaced \\\" # kept\"  # dropped\nBar=1\n");

	kvconf_cmd()
		.arg("dump")
		.arg(&path)
		.assert()
		.success()
		.stdout(predicate::str::contains(r#"1: Foo = "  spaced \" # kept""#))
		.stdout(predicate::str::contains(r#"2: Bar = "1""#));
}

#[test]
fn test_dump_fails_on_bad_line() {
	let (_dir, path) = config_file("Foo = bar\n= nothing\n");

	kvconf_cmd()
		.arg("dump")
		.arg(&path)
		.assert()
		.failure()
		.stdout(predicate::str::contains("1: Foo = \"bar\""))
		.stderr(predicate::str::contains("key can't be empty"));
}
