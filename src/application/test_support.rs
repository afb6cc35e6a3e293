//! Fixtures shared by the application tests.

use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{ExitStatus, Output};

/// Builds a finished process output with the given exit code.
pub fn process_output(stdout: &str, stderr: &str, exit_code: i32) -> Output {
    Output {
        // Raw wait status carries the exit code in the high byte
        status: ExitStatus::from_raw(exit_code << 8),
        stdout: stdout.as_bytes().to_vec(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Writes `count` encoder-named segments next to `template`, like ffmpeg would.
pub fn write_segments(template: &Path, names: &[&str]) {
    let dir = template.parent().expect("template has a parent directory");
    std::fs::create_dir_all(dir).unwrap();
    for name in names {
        std::fs::write(dir.join(name), b"segment").unwrap();
    }
}

/// Writes a source video of `size` bytes.
pub fn write_source(path: &Path, size: usize) {
    std::fs::write(path, vec![0u8; size]).unwrap();
}
