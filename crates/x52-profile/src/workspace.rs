use std::path::{Path, PathBuf};

use log::debug;

use crate::{parse_profile, Profile, ProfileError};

/// Profile looked up in the working directory when no path is given.
pub const PROFILE_FILE_NAME: &str = "x52_profile.yaml";

/// Where the profile comes from.
pub struct Workspace {
    path: PathBuf,
    explicit: bool,
}

impl Workspace {
    /// An explicit `path` must exist when loaded. Without one, the profile
    /// file in the current directory is optional.
    pub fn new(path: Option<&Path>) -> Result<Self, ProfileError> {
        match path {
            Some(path) => Ok(Self {
                path: path.to_owned(),
                explicit: true,
            }),
            None => Ok(Self {
                path: Self::default_path()?,
                explicit: false,
            }),
        }
    }

    pub fn profile_path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Profile, ProfileError> {
        if !self.path.exists() {
            if self.explicit {
                return Err(ProfileError::ProfileNotFound(
                    self.path.display().to_string(),
                ));
            }
            debug!("no profile at {}, using defaults", self.path.display());
            return Ok(Profile::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        parse_profile(&content)
    }

    pub fn default_path() -> Result<PathBuf, ProfileError> {
        let dir = std::env::current_dir().map_err(|_| ProfileError::CurrentDirNotSet)?;
        Ok(dir.join(PROFILE_FILE_NAME))
    }
}
