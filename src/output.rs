use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

const INDENT: &[u8] = b"    ";

/// Pretty-prints `value` with a four-space indent.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Serializes the whole document first, then writes it, creating parent directories.
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
    let content = to_pretty_json(value)?;
    write_file(path, &content)
}

pub fn write_file(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}
