use serde_json::{json, Value};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "curate.json";

/// Roots remembered from the last run, so the paths can be omitted on the
/// command line once they have been used successfully.
#[derive(Debug, Default)]
pub struct Config {
    pub library_root: Option<String>,
    pub mirror_root: Option<String>,
}

/// Loads the remembered roots. A missing file is a normal first run; a
/// broken one is reported and treated as empty rather than failing the run.
pub fn load(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }

    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<Value>(&content) {
            Ok(value) => Config {
                library_root: string_field(&value, "library_root"),
                mirror_root: string_field(&value, "mirror_root"),
            },
            Err(err) => {
                eprintln!("error parsing config {}: {}", path.display(), err);
                Config::default()
            }
        },
        Err(err) => {
            eprintln!("error reading config {}: {}", path.display(), err);
            Config::default()
        }
    }
}

pub fn save(path: &Path, config: &Config) {
    let value = json!({
        "library_root": config.library_root,
        "mirror_root": config.mirror_root,
    });

    match serde_json::to_string_pretty(&value) {
        Ok(text) => {
            if let Err(err) = fs::write(path, text) {
                eprintln!("error writing config {}: {}", path.display(), err);
            }
        }
        Err(err) => eprintln!("error serializing config: {}", err),
    }
}

/// Remembers the validated roots for the next run. A dry run promises not
/// to touch the filesystem, so it skips the write entirely.
pub fn remember(path: &Path, config: &Config, dry_run: bool) {
    if dry_run {
        return;
    }
    save(path, config);
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(String::from)
}
