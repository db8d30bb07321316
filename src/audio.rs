//! Sound effect matching and loading
//!
//! Every creature is paired with one clip from a small fixed library. The
//! category comes from keywords in the description, the file within the
//! category from the seed. Loading reads the clip from an asset directory and
//! returns it as a self-contained `data:audio/wav` URL.

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "hybrid")]
pub use loader::{AudioError, AudioLibrary};

/// Default directory holding the clip files.
pub const DEFAULT_ASSET_ROOT: &str = "assets/audio";

/// Sound categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCategory {
    Roar,
    Scream,
    Growl,
    Laugh,
    Cry,
}

impl AudioCategory {
    /// Library order, used for the seeded fallback when no keyword matches.
    pub const ALL: [AudioCategory; 5] = [
        AudioCategory::Roar,
        AudioCategory::Scream,
        AudioCategory::Growl,
        AudioCategory::Laugh,
        AudioCategory::Cry,
    ];

    /// Keyword priority: the first category with a matching keyword wins.
    const PRIORITY: [AudioCategory; 5] = [
        AudioCategory::Roar,
        AudioCategory::Scream,
        AudioCategory::Laugh,
        AudioCategory::Cry,
        AudioCategory::Growl,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            AudioCategory::Roar => &["roar", "咆哮", "aggressive", "beast"],
            AudioCategory::Scream => &["scream", "尖叫", "angry"],
            AudioCategory::Laugh => &["laugh", "笑", "troll"],
            AudioCategory::Cry => &["cry", "hurt", "哭"],
            AudioCategory::Growl => &["growl", "低吼", "calm"],
        }
    }

    /// Clip file names, relative to the asset root.
    pub fn files(self) -> &'static [&'static str] {
        match self {
            AudioCategory::Roar => &[
                "mixkit-aggressive-beast-roar-13.wav",
                "mixkit-giant-monster-roar-1972 (1).wav",
                "mixkit-wild-lion-animal-roar-6.wav",
            ],
            AudioCategory::Scream => &["mixkit-angry-monster-scream-1963 (1).wav"],
            AudioCategory::Growl => &[
                "mixkit-monster-calm-growl-1956 (1).wav",
                "mixkit-wild-creature-growl-1957.wav",
                "mixkit-zombie-monster-growl-1973.wav",
            ],
            AudioCategory::Laugh => &["mixkit-troll-warrior-laugh-409.wav"],
            AudioCategory::Cry => &["mixkit-creature-cry-of-hurt-2208.wav"],
        }
    }

    /// Category whose keywords appear in `description`, if any.
    pub fn detect(description: &str) -> Option<Self> {
        let lower = description.to_lowercase();
        Self::PRIORITY
            .into_iter()
            .find(|category| category.keywords().iter().any(|k| lower.contains(k)))
    }
}

impl fmt::Display for AudioCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AudioCategory::Roar => "roar",
            AudioCategory::Scream => "scream",
            AudioCategory::Growl => "growl",
            AudioCategory::Laugh => "laugh",
            AudioCategory::Cry => "cry",
        };
        f.write_str(name)
    }
}

/// One selected clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioClip {
    pub category: AudioCategory,
    pub file: &'static str,
}

/// Pick the clip for a description.
///
/// Keywords choose the category; without a match the seed does. The file is
/// `seed % files.len()` within the category.
pub fn select_audio(description: &str, seed: u32) -> AudioClip {
    let category = AudioCategory::detect(description)
        .unwrap_or(AudioCategory::ALL[seed as usize % AudioCategory::ALL.len()]);
    let files = category.files();
    AudioClip { category, file: files[seed as usize % files.len()] }
}

#[cfg(feature = "hybrid")]
mod loader {
    use std::io;
    use std::path::PathBuf;

    use thiserror::Error;
    use tokio::task::JoinSet;
    use tracing::{debug, warn};

    use super::{AudioClip, DEFAULT_ASSET_ROOT};
    use crate::output::{to_data_url, SILENT_AUDIO};

    /// Error type for loading a clip
    #[derive(Debug, Error)]
    pub enum AudioError {
        #[error("failed to read audio asset {path}: {source}")]
        Read {
            path: PathBuf,
            #[source]
            source: io::Error,
        },
    }

    /// Clip files on disk under one asset root.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct AudioLibrary {
        root: PathBuf,
    }

    impl Default for AudioLibrary {
        fn default() -> Self {
            Self::new(DEFAULT_ASSET_ROOT)
        }
    }

    impl AudioLibrary {
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self { root: root.into() }
        }

        pub fn path_for(&self, clip: &AudioClip) -> PathBuf {
            self.root.join(clip.file)
        }

        /// Read one clip and encode it as a `data:audio/wav` URL.
        pub async fn load(&self, clip: &AudioClip) -> Result<String, AudioError> {
            let path = self.path_for(clip);
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|source| AudioError::Read { path: path.clone(), source })?;
            debug!(path = %path.display(), bytes = bytes.len(), "loaded audio clip");
            Ok(to_data_url("audio/wav", &bytes))
        }

        /// Load every clip concurrently, keeping input order.
        ///
        /// Each load settles on its own: a failure becomes [`SILENT_AUDIO`] in
        /// its slot and never affects the others.
        pub async fn load_all(&self, clips: &[AudioClip]) -> Vec<String> {
            let mut tasks = JoinSet::new();
            for (index, clip) in clips.iter().copied().enumerate() {
                let library = self.clone();
                tasks.spawn(async move { (index, library.load(&clip).await) });
            }

            let mut audios = vec![SILENT_AUDIO.to_string(); clips.len()];
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((index, Ok(url))) => audios[index] = url,
                    Ok((index, Err(e))) => {
                        warn!(index, error = %e, "audio load failed, using silent placeholder")
                    }
                    Err(e) => warn!(error = %e, "audio load task failed"),
                }
            }
            audios
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::hash_description;

    #[test]
    fn test_roar_beast_selects_roar() {
        for seed in 0..50 {
            let clip = select_audio("roar beast", seed);
            assert_eq!(clip.category, AudioCategory::Roar);
            assert!(AudioCategory::Roar.files().contains(&clip.file));
        }
    }

    #[test]
    fn test_priority_order() {
        // scream beats cry, laugh beats growl, roar beats everything
        assert_eq!(AudioCategory::detect("angry and hurt"), Some(AudioCategory::Scream));
        assert_eq!(AudioCategory::detect("calm troll"), Some(AudioCategory::Laugh));
        assert_eq!(AudioCategory::detect("Crying BEAST"), Some(AudioCategory::Roar));
        assert_eq!(AudioCategory::detect("hurt and calm"), Some(AudioCategory::Cry));
    }

    #[test]
    fn test_cjk_keywords() {
        assert_eq!(AudioCategory::detect("会咆哮的龙"), Some(AudioCategory::Roar));
        assert_eq!(AudioCategory::detect("低吼的史莱姆"), Some(AudioCategory::Growl));
        assert_eq!(AudioCategory::detect("爱笑的幽灵"), Some(AudioCategory::Laugh));
    }

    #[test]
    fn test_no_keyword_falls_back_to_seed() {
        assert_eq!(AudioCategory::detect("purple ghost"), None);
        let seed = hash_description("purple ghost");
        let clip = select_audio("purple ghost", seed);
        assert_eq!(clip.category, AudioCategory::ALL[seed as usize % 5]);
    }

    #[test]
    fn test_file_index_follows_seed() {
        assert_eq!(select_audio("growl", 0).file, AudioCategory::Growl.files()[0]);
        assert_eq!(select_audio("growl", 4).file, AudioCategory::Growl.files()[1]);
        assert_eq!(select_audio("growl", 5).file, AudioCategory::Growl.files()[2]);
    }

    #[cfg(feature = "hybrid")]
    #[tokio::test]
    async fn test_load_all_keeps_order_and_substitutes_failures() {
        use crate::output::{decode_data_url, SILENT_AUDIO};

        let dir = tempfile::tempdir().unwrap();
        let roar = select_audio("roar", 0);
        std::fs::write(dir.path().join(roar.file), b"RIFFfake").unwrap();
        let missing = select_audio("laugh", 0);

        let library = AudioLibrary::new(dir.path());
        let audios = library.load_all(&[roar, missing, roar]).await;

        assert_eq!(audios.len(), 3);
        assert_eq!(decode_data_url(&audios[0]).unwrap().1, b"RIFFfake");
        assert_eq!(audios[1], SILENT_AUDIO);
        assert_eq!(audios[2], audios[0]);
    }

    #[cfg(feature = "hybrid")]
    #[tokio::test]
    async fn test_load_missing_file_is_an_error() {
        let library = AudioLibrary::new("/nonexistent/pixmon/audio");
        let clip = select_audio("cry", 0);
        assert!(matches!(library.load(&clip).await, Err(AudioError::Read { .. })));
    }
}
