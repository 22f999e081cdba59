use crate::{CONFIG_DIRECTORY, SOUNDS_DIRECTORY, expand_tilde};
use std::path::{Path, PathBuf};

/// A directory of named sound resources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bundle {
    root: PathBuf,
}

impl Bundle {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Bundle {
            root: expand_tilde(root).unwrap_or_else(|_| root.to_path_buf()),
        }
    }

    /// `<data dir>/playbar/sounds`, falling back to the working directory.
    pub fn main() -> Self {
        let root = dirs::data_dir()
            .map(|dir| dir.join(CONFIG_DIRECTORY).join(SOUNDS_DIRECTORY))
            .unwrap_or_else(|| PathBuf::from("."));
        Bundle { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the resource called `name` (extension included), if it exists.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }

        let candidate = self.root.join(name);
        match candidate.is_file() {
            true => Some(candidate),
            false => {
                log::debug!("{name} not found in {}", self.root.display());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_existing_resources_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ding.wav"), b"RIFF").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();

        let bundle = Bundle::new(dir.path());

        assert_eq!(bundle.resolve("ding.wav"), Some(dir.path().join("ding.wav")));
        assert_eq!(bundle.resolve("ding"), None);
        assert_eq!(bundle.resolve("nested"), None);
        assert_eq!(bundle.resolve(""), None);
    }
}
