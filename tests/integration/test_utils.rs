//! Shared helpers for integration tests.

use std::any::Any;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Mutex;
use tempfile::TempDir;
use trellis::context::Tag;

// Serializes tests that change process environment variables
static XDG_ENV_MUTEX: Mutex<()> = Mutex::new(());

const TRACKED_VARS: [&str; 4] = ["HOME", "XDG_CONFIG_HOME", "TRELLIS_ENV", "TRELLIS__SITE__NAME"];

struct EnvState {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            saved: TRACKED_VARS
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.saved {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with HOME and XDG_CONFIG_HOME pointing into `test_dir`.
///
/// XDG_CONFIG_HOME is `test_dir` itself, so the global config file lives at
/// `test_dir/trellis/config.toml`.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = XDG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_home = test_dir.path().join("home");
    std::fs::create_dir_all(&test_home).unwrap();

    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_dir.path().to_str().unwrap());
    std::env::remove_var("TRELLIS_ENV");
    std::env::remove_var("TRELLIS__SITE__NAME");

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    env_state.restore();

    match result {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Request object carrying query arguments.
#[derive(Debug, Default, Clone)]
pub struct TestRequest {
    pub path: String,
    pub args: HashMap<String, String>,
}

impl TestRequest {
    pub fn new(path: &str, args: &[(&str, &str)]) -> Rc<dyn Tag> {
        Rc::new(TestRequest {
            path: path.to_string(),
            args: args
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
    }
}

impl Tag for TestRequest {
    fn clone_tag(&self, _deep: bool) -> Rc<dyn Tag> {
        Rc::new(self.clone())
    }

    fn query_arg(&self, name: &str) -> Option<String> {
        self.args.get(name).cloned()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
