use crate::build_number::BuildNumber;
use crate::files::FileAccess;
use anyhow::{Context as AnyhowContext, Result};
use serde::Serialize;
use std::path::Path;

/// Everything that goes into the generated header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub build_number: u64,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl VersionInfo {
    /// `version_prefix` is the major.minor part, e.g. "0.1".
    pub fn new(
        version_prefix: &str,
        build_number: BuildNumber,
        commit_ref: Option<String>,
        branch: Option<String>,
    ) -> Self {
        VersionInfo {
            build_number: build_number.0,
            version: format!("{version_prefix}.{build_number}"),
            commit_ref,
            branch,
        }
    }

    /// The value of the `__VERSION` macro: version, commit and branch.
    pub fn full_version(&self) -> String {
        format!(
            "{}-{}-{}",
            self.version,
            self.commit_ref.as_deref().unwrap_or(""),
            self.branch.as_deref().unwrap_or("")
        )
    }

    // Values are embedded as-is; quotes in a branch name will break the header
    pub fn render(&self) -> String {
        format!(
            r#"
#ifndef BUILD_NUMBER
  #define BUILD_NUMBER "{build_number}"
#endif
#ifndef __VERSION
  #define __VERSION "{full_version}"
#endif
#ifndef VERSION_SHORT
  #define VERSION_SHORT "{version}"
#endif
#ifndef VERSION
  #ifdef DEBUG
    #define VERSION __VERSION "-debug"
  #else
    #define VERSION __VERSION
  #endif
#endif
"#,
            build_number = self.build_number,
            full_version = self.full_version(),
            version = self.version,
        )
    }

    pub fn write(&self, files: &dyn FileAccess, path: &Path) -> Result<()> {
        files
            .write(path, &self.render())
            .with_context(|| format!("Failed to write version header {path:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::MemoryFiles;

    fn release_42() -> VersionInfo {
        VersionInfo::new(
            "0.1",
            BuildNumber(42),
            Some("deadbeef".to_string()),
            Some("release".to_string()),
        )
    }

    #[test]
    fn test_version_string() {
        let info = release_42();
        assert_eq!(info.version, "0.1.42");
        assert_eq!(info.full_version(), "0.1.42-deadbeef-release");

        let info = VersionInfo::new("2.7", BuildNumber(1), None, None);
        assert_eq!(info.version, "2.7.1");
    }

    #[test]
    fn test_render() {
        let expected = "
#ifndef BUILD_NUMBER
  #define BUILD_NUMBER \"42\"
#endif
#ifndef __VERSION
  #define __VERSION \"0.1.42-deadbeef-release\"
#endif
#ifndef VERSION_SHORT
  #define VERSION_SHORT \"0.1.42\"
#endif
#ifndef VERSION
  #ifdef DEBUG
    #define VERSION __VERSION \"-debug\"
  #else
    #define VERSION __VERSION
  #endif
#endif
";
        assert_eq!(release_42().render(), expected);
    }

    #[test]
    fn test_render_absent_values_are_empty() {
        let info = VersionInfo::new("0.1", BuildNumber(3), None, None);
        assert_eq!(info.full_version(), "0.1.3--");
        assert!(info.render().contains("  #define __VERSION \"0.1.3--\"\n"));
    }

    #[test]
    fn test_write_overwrites() {
        let files = MemoryFiles::new().with_file("src/version.h", "old contents that are longer");
        release_42()
            .write(&files, Path::new("src/version.h"))
            .unwrap();
        assert_eq!(files.get("src/version.h"), Some(release_42().render()));
    }

    #[test]
    fn test_write_failure_is_an_error() {
        let files = MemoryFiles::new().read_only();
        let err = release_42()
            .write(&files, Path::new("src/version.h"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("version.h"));
    }

    #[test]
    fn test_json() {
        let json = serde_json::to_value(release_42()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "build_number": 42,
                "version": "0.1.42",
                "commit_ref": "deadbeef",
                "branch": "release",
            })
        );
    }
}
