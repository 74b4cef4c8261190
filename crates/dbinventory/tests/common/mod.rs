use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "DBINVENTORY_PATH",
    "DBINVENTORY_SECRET",
    "DO_CLIENT_ID",
    "DO_API_KEY",
    "DO_CACHE_PATH",
    "DO_CACHE_MAX_AGE",
];

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    pub fn db_path(&self) -> PathBuf {
        self.root.path().join("hosts.sqlite3")
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// The binary, run inside the project with a clean environment
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("dbinventory").unwrap();
        cmd.current_dir(self.path());
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Run with the given args and parse stdout as JSON
    #[allow(dead_code)]
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.cmd().args(args).output().unwrap();
        assert!(
            output.status.success(),
            "dbinventory {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }
}
