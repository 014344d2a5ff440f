// icon-tool - platform/tools.rs
//
// Tool environment (search path + platform) and the executable resolver.
//
// The resolver memoises every lookup, hit or miss, for its lifetime: a tool
// is searched for at most once per name. Whether a miss is fatal is up to
// the caller (`find` vs `require`).

use crate::core::model::Platform;
use crate::util::error::ToolError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;

/// Where and for which platform executables are looked up.
#[derive(Debug, Clone)]
pub struct ToolEnv {
    /// Search path in `PATH` syntax. `None` means "use the process `PATH`".
    pub search_path: Option<OsString>,

    /// Platform whose tool preferences apply.
    pub platform: Platform,
}

impl ToolEnv {
    /// The process environment, with `extra_dirs` searched before `PATH`.
    pub fn from_process(extra_dirs: &[PathBuf]) -> Self {
        let search_path = if extra_dirs.is_empty() {
            None
        } else {
            let inherited = std::env::var_os("PATH").unwrap_or_default();
            let paths = extra_dirs
                .iter()
                .cloned()
                .chain(std::env::split_paths(&inherited));
            match std::env::join_paths(paths) {
                Ok(joined) => Some(joined),
                Err(e) => {
                    tracing::warn!(error = %e, "Ignoring extra search dirs");
                    None
                }
            }
        };

        Self {
            search_path,
            platform: Platform::current(),
        }
    }

    /// A fully explicit environment (used by tests to point at stub tools).
    pub fn with_search_path(search_path: impl Into<OsString>, platform: Platform) -> Self {
        Self {
            search_path: Some(search_path.into()),
            platform,
        }
    }
}

/// Memoising executable lookup.
#[derive(Debug)]
pub struct ExeResolver {
    env: ToolEnv,
    cache: RefCell<HashMap<String, Option<PathBuf>>>,
}

impl ExeResolver {
    pub fn new(env: ToolEnv) -> Self {
        Self {
            env,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn env(&self) -> &ToolEnv {
        &self.env
    }

    /// Look `name` up, returning `None` if it is not on the search path.
    pub fn find(&self, name: &str) -> Option<PathBuf> {
        if let Some(cached) = self.cache.borrow().get(name) {
            return cached.clone();
        }

        let found = self.search(name);
        match &found {
            Some(path) => tracing::debug!(tool = name, path = %path.display(), "Executable found"),
            None => tracing::debug!(tool = name, "Executable not found"),
        }
        self.cache
            .borrow_mut()
            .insert(name.to_string(), found.clone());
        found
    }

    /// Look `name` up, failing with `MissingTool` if it is absent.
    pub fn require(&self, name: &str) -> Result<PathBuf, ToolError> {
        self.find(name).ok_or_else(|| ToolError::MissingTool {
            name: name.to_string(),
        })
    }

    /// Forget every cached lookup.
    pub fn clear(&mut self) {
        self.cache.get_mut().clear();
    }

    fn search(&self, name: &str) -> Option<PathBuf> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let result = match &self.env.search_path {
            Some(paths) => which::which_in(name, Some(paths), cwd),
            None => which::which(name),
        };
        result.ok()
    }
}
