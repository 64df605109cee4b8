//! JSON persistence helpers for ~/.skyflap/ files (profile, server store).

use std::fs;
use std::io;
use std::path::PathBuf;

/// Get the ~/.skyflap/ directory path, creating it if needed.
pub fn data_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".skyflap");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Full path for a file in ~/.skyflap/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(data_dir()?.join(filename))
}

/// Save a value as pretty-printed JSON to ~/.skyflap/.
pub fn save_json<T: serde::Serialize>(filename: &str, data: &T) -> io::Result<()> {
    let path = data_path(filename)?;
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a JSON file from ~/.skyflap/; `None` if missing or unreadable.
pub fn load_json<T: serde::de::DeserializeOwned>(filename: &str) -> Option<T> {
    let path = data_path(filename).ok()?;
    let json = fs::read_to_string(path).ok()?;
    serde_json::from_str(&json).ok()
}

/// Remove a file from ~/.skyflap/; missing files are not an error.
pub fn remove(filename: &str) -> io::Result<()> {
    match fs::remove_file(data_path(filename)?) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        result => result,
    }
}
