//! Tests for the file sink and the untagged verbose printer.

use logger::{enable_verbose, error, info, set_level, verbose, warn, Level};

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_captures_tagged_lines() {
    use logger::init_file_logging;
    use std::fs;

    let dir = std::env::temp_dir().join(format!("noto-logger-{}", std::process::id()));
    let log_path = dir.join("noto.log");
    let _ = fs::remove_file(&log_path);

    assert!(init_file_logging(&log_path));
    set_level(Level::Info);

    info!("grading scheme saved");
    warn!("task references unknown component");
    error!("could not write store");

    enable_verbose();
    verbose!("this verbose line stays on stdout");

    let contents = fs::read_to_string(&log_path).expect("read log file");
    assert!(contents.contains("[INFO] grading scheme saved"));
    assert!(contents.contains("[WARN] task references unknown component"));
    assert!(contents.contains("[ERROR] could not write store"));
    assert!(!contents.contains("verbose line"));

    let _ = fs::remove_dir_all(&dir);
}
