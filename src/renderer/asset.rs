use crate::types::session::SessionError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extensions tried, in order, when resolving a named asset.
pub const AUDIO_EXTENSIONS: [&str; 5] = ["wav", "mp3", "m4a", "flac", "ogg"];

/// An audio resource read fully into memory.
#[derive(Debug, Clone)]
pub struct AudioAsset {
    pub name: String,
    pub path: PathBuf,
    pub data: Vec<u8>,
}

/// Find the first file named `name.<ext>` in `dir`.
pub fn resolve_asset_path(dir: &Path, name: &str) -> Option<PathBuf> {
    AUDIO_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", name, ext)))
        .find(|candidate| candidate.is_file())
}

/// Load a bundled asset by name.
pub fn load_asset(dir: &Path, name: &str) -> Result<AudioAsset, SessionError> {
    let missing = |detail: String| SessionError::AssetMissing {
        name: name.to_string(),
        detail,
    };

    let path = resolve_asset_path(dir, name)
        .ok_or_else(|| missing(format!("no audio file found in {}", dir.display())))?;
    debug!("Resolved asset {} to {:?}", name, path);

    let data = fs::read(&path).map_err(|e: io::Error| missing(e.to_string()))?;
    if data.is_empty() {
        return Err(SessionError::DecodeInit(format!(
            "{} is empty",
            path.display()
        )));
    }

    info!("Loaded asset {} ({} bytes)", name, data.len());
    Ok(AudioAsset {
        name: name.to_string(),
        path,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_asset() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_asset(dir.path(), "sound");
        assert!(matches!(result, Err(SessionError::AssetMissing { .. })));
    }

    #[test]
    fn test_resolves_first_known_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("sound.mp3"), b"ID3").unwrap();
        fs::write(dir.path().join("sound.ogg"), b"OggS").unwrap();
        fs::write(dir.path().join("sound.txt"), b"nope").unwrap();

        let asset = load_asset(dir.path(), "sound").unwrap();
        assert_eq!(asset.path, dir.path().join("sound.mp3"));
        assert_eq!(asset.data, b"ID3");
    }

    #[test]
    fn test_empty_asset_fails_decoder_init() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("sound.wav"), b"").unwrap();
        let result = load_asset(dir.path(), "sound");
        assert!(matches!(result, Err(SessionError::DecodeInit(_))));
    }
}
