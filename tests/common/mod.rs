//! Shared setup for CLI tests: a project directory with a stand-in formatter.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// Behaves like prettier for the tests: puts exactly one space after the first
/// colon of each line, drops trailing blanks, and rejects an unclosed `[`.
/// With `--check` it exits 1 when the input is not already canonical.
const FAKE_FORMATTER: &str = r#"#!/bin/sh
check=0
for arg in "$@"; do
    if [ "$arg" = "--check" ]; then check=1; fi
done
input=$(mktemp)
output=$(mktemp)
cat > "$input"
if grep -q '\[' "$input" && ! grep -q '\]' "$input"; then
    echo "[error] stdin: SyntaxError: unclosed bracket (1:1)" >&2
    rm -f "$input" "$output"
    exit 2
fi
sed -e 's/: */: /' -e 's/ *$//' "$input" > "$output"
if [ "$check" = "1" ]; then
    if cmp -s "$input" "$output"; then status=0; else echo "[warn] (stdin)"; status=1; fi
else
    cat "$output"
    status=0
fi
rm -f "$input" "$output"
exit $status
"#;

pub struct Project {
    pub dir: TempDir,
}

impl Project {
    /// A temp directory with the fake formatter and a `.fencefmt.toml` using it.
    pub fn new(extra_config: &str) -> Self {
        let dir = tempdir().unwrap();
        let script = dir.path().join("fake-prettier.sh");
        fs::write(&script, FAKE_FORMATTER).unwrap();
        let config = format!(
            "formatter = [\"sh\", {:?}]\n{extra_config}",
            script.display().to_string()
        );
        fs::write(dir.path().join(".fencefmt.toml"), config).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.path().join(name)).unwrap()
    }
}
