use crate::files::FileAccess;
use anyhow::{Context as AnyhowContext, Result};
use log::info;
use std::io;
use std::path::{Path, PathBuf};

/// The build counter, distinguishing builds that share the same major.minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BuildNumber(pub u64);

impl BuildNumber {
    pub fn advance(self) -> Result<BuildNumber> {
        self.0
            .checked_add(1)
            .map(BuildNumber)
            .ok_or_else(|| anyhow::anyhow!("Build number {} cannot be advanced", self.0))
    }
}

impl std::fmt::Display for BuildNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What was found in the counter file at the start of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredCounter {
    Found(BuildNumber),
    Missing,
    Unparseable(String),
    Unreadable(String),
}

impl StoredCounter {
    /// The baseline to advance from; anything but `Found` counts as zero.
    pub fn baseline(&self) -> BuildNumber {
        match self {
            StoredCounter::Found(number) => *number,
            _ => BuildNumber(0),
        }
    }
}

pub struct BuildNumberStore {
    path: PathBuf,
}

impl BuildNumberStore {
    pub fn new(path: &Path) -> Self {
        BuildNumberStore {
            path: PathBuf::from(path),
        }
    }

    pub fn read(&self, files: &dyn FileAccess) -> StoredCounter {
        let contents = match files.read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return StoredCounter::Missing,
            Err(err) => return StoredCounter::Unreadable(err.to_string()),
        };
        let first_line = contents.lines().next().unwrap_or("").trim();
        match first_line.parse::<u64>() {
            Ok(value) => StoredCounter::Found(BuildNumber(value)),
            Err(_) => StoredCounter::Unparseable(first_line.to_string()),
        }
    }

    pub fn persist(&self, files: &dyn FileAccess, number: BuildNumber) -> Result<()> {
        files
            .write(&self.path, &number.to_string())
            .with_context(|| format!("Failed to write build number file {:?}", self.path))?;
        info!("Build number: {number}");
        Ok(())
    }

    /// Reads the stored counter, advances it by one and writes it back.
    ///
    /// A missing or malformed counter file is not an error: the run starts
    /// over from 1.
    pub fn bump(&self, files: &dyn FileAccess) -> Result<BuildNumber> {
        let stored = self.read(files);
        match &stored {
            StoredCounter::Found(_) => (),
            StoredCounter::Missing => {
                info!("No build number file {:?}", self.path);
                info!("Starting build number from 1..");
            }
            StoredCounter::Unparseable(content) => {
                info!("Build number file {:?} contains {content:?}", self.path);
                info!("Starting build number from 1..");
            }
            StoredCounter::Unreadable(err) => {
                info!("Cannot read build number file {:?}: {err}", self.path);
                info!("Starting build number from 1..");
            }
        }
        let number = stored.baseline().advance()?;
        self.persist(files, number)?;
        Ok(number)
    }
}
