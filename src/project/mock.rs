use crate::domain::SemanticVersion;
use crate::error::{ReleaseError, Result};
use crate::project::VersionFile;
use std::sync::Mutex;

/// In-memory version file that records every write
pub struct MemoryVersionFile {
    current: Mutex<SemanticVersion>,
    writes: Mutex<Vec<SemanticVersion>>,
}

impl MemoryVersionFile {
    pub fn new(version: SemanticVersion) -> Self {
        MemoryVersionFile {
            current: Mutex::new(version),
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Versions written so far, oldest first
    pub fn writes(&self) -> Vec<SemanticVersion> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl VersionFile for MemoryVersionFile {
    fn read_version(&self) -> Result<SemanticVersion> {
        self.current
            .lock()
            .map(|v| *v)
            .map_err(|_| ReleaseError::project_file("version file lock poisoned"))
    }

    fn write_version(&self, version: &SemanticVersion) -> Result<()> {
        let mut current = self
            .current
            .lock()
            .map_err(|_| ReleaseError::project_file("version file lock poisoned"))?;
        *current = *version;
        if let Ok(mut writes) = self.writes.lock() {
            writes.push(*version);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_version_file_records_writes() {
        let file = MemoryVersionFile::new(SemanticVersion::new(1, 0, 0));
        file.write_version(&SemanticVersion::new(2, 0, 0)).unwrap();
        file.write_version(&SemanticVersion::new(3, 0, 0)).unwrap();

        assert_eq!(file.read_version().unwrap(), SemanticVersion::new(3, 0, 0));
        assert_eq!(
            file.writes(),
            vec![SemanticVersion::new(2, 0, 0), SemanticVersion::new(3, 0, 0)]
        );
    }
}
