use crate::errors::{Result, TallyError};
use serde::Serialize;
use std::path::Path;

/// Write `value` as 2-space indented JSON, replacing any existing file.
/// Missing parent directories are created.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let output_err = |source: std::io::Error| TallyError::Output {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(output_err)?;
    }

    let json = serde_json::to_string_pretty(value)
        .map_err(|e| output_err(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    std::fs::write(path, json).map_err(output_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_creates_parent_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("out.json");

        write_json(&path, &json!({"a": 1})).unwrap();
        write_json(&path, &json!([1, 2])).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "[\n  1,\n  2\n]");
    }
}
