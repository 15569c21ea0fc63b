//! Integration tests for fixture document resolution over real files.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use seedbed_fixture::{FixtureError, ResolveOptions, TableRef, Value, resolve};
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn users() -> TableRef {
    TableRef::new("public", "users")
}

#[test]
fn resolves_plain_document() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "fixtures.yml",
        r#"
public.table1:
  - key1: value1
    key2: value2
public.table2:
  - key3: value3
  - key5: value5
"#,
    );

    let dataset = resolve(&path, &ResolveOptions::default()).unwrap();
    assert_eq!(dataset.len(), 2);

    let table1 = dataset.rows(&TableRef::new("public", "table1")).unwrap();
    assert_eq!(table1.len(), 1);
    assert_eq!(table1[0]["key1"], Value::Text("value1".into()));

    let table2 = dataset.rows(&TableRef::new("public", "table2")).unwrap();
    assert_eq!(table2.len(), 2);
}

#[test]
fn resolves_empty_document() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "empty.yml", "");

    let dataset = resolve(&path, &ResolveOptions::default()).unwrap();
    assert!(dataset.is_empty());
}

#[test]
fn rejects_invalid_yaml() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "bad.yml", "key1: value1\n  key2: value2\n");

    let err = resolve(&path, &ResolveOptions::default()).unwrap_err();
    assert!(matches!(err, FixtureError::Yaml(_)));
}

#[test]
fn rejects_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = resolve(dir.path().join("nope.yml"), &ResolveOptions::default()).unwrap_err();
    assert!(matches!(err, FixtureError::FileNotFound(_)));
}

#[test]
fn merges_includes_with_identity_precedence() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "base.yml",
        r#"
public.users:
  - id: 1
    name: Base
  - id: 2
    name: Overridden
public.products:
  - id: 1
    name: Milk
"#,
    );
    write(
        dir.path(),
        "addon.yml",
        r#"
public.users:
  - id: 3
    name: Addon
public.products:
  - id: 2
    name: Bread
"#,
    );
    let main = write(
        dir.path(),
        "main.yml",
        r#"
include:
  - base.yml
  - addon.yml
public.users:
  - id: 2
    name: OverriddenMain
  - id: 4
    name: Main
"#,
    );

    let dataset = resolve(&main, &ResolveOptions::default()).unwrap();

    let rows = dataset.rows(&users()).unwrap();
    let names: Vec<_> = rows
        .iter()
        .map(|row| (row["id"].clone(), row["name"].clone()))
        .collect();
    assert_eq!(
        names,
        vec![
            (Value::Int(1), Value::Text("Base".into())),
            (Value::Int(2), Value::Text("OverriddenMain".into())),
            (Value::Int(3), Value::Text("Addon".into())),
            (Value::Int(4), Value::Text("Main".into())),
        ]
    );

    let products = dataset.rows(&TableRef::new("public", "products")).unwrap();
    assert_eq!(products.len(), 2);
}

#[test]
fn merges_nested_includes() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "base.yml",
        "public.users:\n  - id: 1\n    name: Base\n",
    );
    write(
        dir.path(),
        "mid.yml",
        "include: base.yml\npublic.users:\n  - id: 2\n    name: Mid\n",
    );
    let main = write(
        dir.path(),
        "main.yml",
        "include: mid.yml\npublic.users:\n  - id: 3\n    name: Main\n",
    );

    let dataset = resolve(&main, &ResolveOptions::default()).unwrap();
    let rows = dataset.rows(&users()).unwrap();
    let ids: Vec<_> = rows.iter().map(|row| row["id"].clone()).collect();
    assert_eq!(ids, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
}

#[test]
fn reports_include_cycle() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "a.yml",
        "include: b.yml\npublic.users:\n  - id: 1\n",
    );
    write(
        dir.path(),
        "b.yml",
        "include: a.yml\npublic.users:\n  - id: 2\n",
    );

    let err = resolve(dir.path().join("a.yml"), &ResolveOptions::default()).unwrap_err();
    assert!(matches!(err, FixtureError::IncludeCycle(_)));
}

#[test]
fn accepts_empty_include_list() {
    let dir = TempDir::new().unwrap();
    let main = write(dir.path(), "main.yml", "include: []\npublic.users:\n  - id: 1\n");

    let dataset = resolve(&main, &ResolveOptions::default()).unwrap();
    assert_eq!(dataset.rows(&users()).unwrap().len(), 1);
}

#[test]
fn resolves_row_templates() {
    let dir = TempDir::new().unwrap();
    let main = write(
        dir.path(),
        "main.yml",
        r#"
templates:
  - table: public.users
    name: base
    fields:
      name: Base User
      created_at: $eval(SELECT NOW())
  - table: public.users
    name: admin
    extends: base
    fields:
      name: Admin User
      is_admin: true
public.users:
  - id: 1
    extends: base
    email: user1@example.com
  - id: 2
    extends: admin
    email: admin@example.com
"#,
    );

    let dataset = resolve(&main, &ResolveOptions::default()).unwrap();
    let rows = dataset.rows(&users()).unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0]["id"], Value::Int(1));
    assert_eq!(rows[0]["name"], Value::Text("Base User".into()));
    assert_eq!(rows[0]["email"], Value::Text("user1@example.com".into()));
    assert_eq!(rows[0]["created_at"], Value::Eval("SELECT NOW()".into()));
    assert!(!rows[0].contains_key("extends"));

    assert_eq!(rows[1]["name"], Value::Text("Admin User".into()));
    assert_eq!(rows[1]["is_admin"], Value::Bool(true));
    assert_eq!(rows[1]["created_at"], Value::Eval("SELECT NOW()".into()));
}

#[test]
fn resolves_template_defined_in_include() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "base.yml",
        r#"
templates:
  - table: public.users
    name: base
    fields:
      name: Base User
public.users:
  - id: 1
    extends: base
"#,
    );
    let main = write(
        dir.path(),
        "main.yml",
        r#"
include: base.yml
templates:
  - table: public.users
    name: admin
    extends: base
    fields:
      is_admin: true
public.users:
  - id: 2
    extends: admin
"#,
    );

    let dataset = resolve(&main, &ResolveOptions::default()).unwrap();
    let rows = dataset.rows(&users()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["name"], Value::Text("Base User".into()));
    assert_eq!(rows[1]["is_admin"], Value::Bool(true));
}

#[test]
fn row_fields_override_template_fields() {
    let dir = TempDir::new().unwrap();
    let main = write(
        dir.path(),
        "main.yml",
        r#"
templates:
  - table: public.users
    name: base
    fields:
      name: Base User
public.users:
  - id: 1
    extends: base
    name: Overridden
"#,
    );

    let dataset = resolve(&main, &ResolveOptions::default()).unwrap();
    let rows = dataset.rows(&users()).unwrap();
    assert_eq!(rows[0]["name"], Value::Text("Overridden".into()));
}

#[test]
fn reports_unknown_template() {
    let dir = TempDir::new().unwrap();
    let main = write(
        dir.path(),
        "main.yml",
        "public.users:\n  - id: 1\n    extends: nope\n",
    );

    let err = resolve(&main, &ResolveOptions::default()).unwrap_err();
    assert!(matches!(err, FixtureError::TemplateNotFound { .. }));
}

#[test]
fn reports_template_cycle_as_error() {
    let dir = TempDir::new().unwrap();
    let main = write(
        dir.path(),
        "main.yml",
        r#"
templates:
  - table: public.users
    name: a
    extends: b
    fields: {}
  - table: public.users
    name: b
    extends: a
    fields: {}
public.users:
  - id: 1
    extends: a
"#,
    );

    let err = resolve(&main, &ResolveOptions::default()).unwrap_err();
    assert!(matches!(err, FixtureError::TemplateCycle { .. }));
}

#[test]
fn qualifies_bare_table_names_with_default_schema() {
    let dir = TempDir::new().unwrap();
    let main = write(dir.path(), "main.yml", "users:\n  - id: 1\n");

    let dataset = resolve(&main, &ResolveOptions::default()).unwrap();
    assert!(dataset.rows(&users()).is_some());

    let dataset = resolve(&main, &ResolveOptions::new().default_schema("crm")).unwrap();
    assert!(dataset.rows(&TableRef::new("crm", "users")).is_some());
}

#[test]
fn rejects_non_scalar_column_values() {
    let dir = TempDir::new().unwrap();
    let main = write(
        dir.path(),
        "main.yml",
        "public.users:\n  - id: 1\n    tags: [a, b]\n",
    );

    let err = resolve(&main, &ResolveOptions::default()).unwrap_err();
    assert!(matches!(err, FixtureError::InvalidValue { .. }));
}

#[test]
fn rejects_non_list_table_content() {
    let dir = TempDir::new().unwrap();
    let main = write(dir.path(), "main.yml", "public.users:\n  id: 1\n");

    let err = resolve(&main, &ResolveOptions::default()).unwrap_err();
    assert!(matches!(err, FixtureError::Document(_)));
}
