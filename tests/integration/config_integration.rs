//! Configuration layering feeding the site context

use std::fs;
use std::rc::Rc;
use tempfile::TempDir;
use trellis::capability::{CapabilityKey, CapabilityRegistry};
use trellis::config::ConfigLoader;
use trellis::context::Context;
use trellis::site::build_site_context;

use crate::integration::test_utils::with_xdg_env;

fn write(path: &std::path::Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_global_and_workspace_files_merge() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("ws");

    with_xdg_env(&test_dir, || {
        write(
            &test_dir.path().join("trellis").join("config.toml"),
            r#"
[site]
name = "global-site"

[site.remember]
hand = "left"
session = "global"
"#,
        );
        write(
            &workspace.join("config").join("config.toml"),
            r#"
[site.remember]
session = "workspace"

[site.slots]
title = "Workspace title"
"#,
        );

        let config = ConfigLoader::load(&workspace).unwrap();
        assert_eq!(config.site.name, "global-site");
        assert_eq!(config.site.remember.get("hand").unwrap(), "left");
        assert_eq!(config.site.remember.get("session").unwrap(), "workspace");

        let site = build_site_context(&config.site, Rc::new(CapabilityRegistry::with_conventions()));
        let leaf = Context::page(&site, None).child(None);
        assert_eq!(
            leaf.locate_as::<String>(&CapabilityKey::HAND).unwrap().as_str(),
            "left"
        );
        let title = leaf.locate_slot_data("title").unwrap();
        assert_eq!(title.downcast_ref::<String>().unwrap(), "Workspace title");
    });
}

#[test]
fn test_environment_file_and_variable_overrides() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("ws");

    with_xdg_env(&test_dir, || {
        write(
            &workspace.join("config").join("config.toml"),
            "[site]\nname = \"base\"\n",
        );
        write(
            &workspace.join("config").join("production.toml"),
            "[site]\nname = \"prod\"\n",
        );

        assert_eq!(ConfigLoader::load(&workspace).unwrap().site.name, "base");

        std::env::set_var("TRELLIS_ENV", "production");
        assert_eq!(ConfigLoader::load(&workspace).unwrap().site.name, "prod");

        std::env::set_var("TRELLIS__SITE__NAME", "from-env");
        assert_eq!(ConfigLoader::load(&workspace).unwrap().site.name, "from-env");
    });
}

#[test]
fn test_invalid_file_is_a_config_error() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("ws");

    with_xdg_env(&test_dir, || {
        write(
            &workspace.join("config").join("config.toml"),
            "[site\nname = ",
        );
        let err = ConfigLoader::load(&workspace).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    });
}

#[test]
fn test_validation_reports_logging_problems() {
    let test_dir = TempDir::new().unwrap();
    let file = test_dir.path().join("site.toml");

    with_xdg_env(&test_dir, || {
        write(&file, "[logging]\noutput = \"file\"\n");
        let config = ConfigLoader::load_from_file(&file).unwrap();
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("requires a log file path"));
    });
}
