//! Reading inputs and naming outputs.

use std::borrow::Cow;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Path that stands for standard input.
pub(crate) const STDIN: &str = "-";

pub(crate) fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN
}

/// Read an input file, or standard input for `-`.
pub(crate) fn read_input(path: &Path) -> Result<String, CliError> {
    let result = if is_stdin(path) {
        let mut content = String::new();
        std::io::stdin().lock().read_to_string(&mut content).map(|_| content)
    } else {
        std::fs::read_to_string(path)
    };
    result.map_err(|source| CliError::Input {
        path: path.to_path_buf(),
        source,
    })
}

/// Output path for `input` inside `out_dir`: the file stem with `.html`.
pub(crate) fn output_path(input: &Path, out_dir: &Path) -> PathBuf {
    let stem: Cow<'_, str> = if is_stdin(input) {
        "stdin".into()
    } else {
        input
            .file_stem()
            .map_or_else(|| "page".into(), |s| s.to_string_lossy())
    };
    out_dir.join(format!("{stem}.html"))
}
