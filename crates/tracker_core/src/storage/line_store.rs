use crate::error::AppError;
use crate::model::TaskRecord;
use crate::storage::PersistenceGateway;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub const SCHEMA_VERSION: u32 = 1;
const STORE_FILE_NAME: &str = "tasks.jsonl";

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    schema_version: u32,
    saved_at: String,
}

/// File-backed persistence gateway. One JSON object per line: a header with
/// the schema version and save timestamp, then task records in save order.
/// Commits go through a temp file and a rename, so a save cycle lands whole
/// or not at all.
pub struct LineStore {
    path: PathBuf,
    staged: Option<Vec<String>>,
}

impl LineStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            staged: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl PersistenceGateway for LineStore {
    fn prepare(&mut self) -> Result<(), AppError> {
        let saved_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|err| AppError::persistence(err.to_string()))?;
        let header = Header {
            schema_version: SCHEMA_VERSION,
            saved_at,
        };
        let line =
            serde_json::to_string(&header).map_err(|err| AppError::persistence(err.to_string()))?;
        self.staged = Some(vec![line]);
        Ok(())
    }

    fn write(&mut self, record: &TaskRecord) -> Result<(), AppError> {
        let staged = self
            .staged
            .as_mut()
            .ok_or_else(|| AppError::persistence("save cycle is not prepared"))?;
        let line =
            serde_json::to_string(record).map_err(|err| AppError::persistence(err.to_string()))?;
        staged.push(line);
        Ok(())
    }

    fn commit(&mut self) -> Result<(), AppError> {
        let staged = self
            .staged
            .take()
            .ok_or_else(|| AppError::persistence("save cycle is not prepared"))?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|err| AppError::persistence(err.to_string()))?;
        }

        let mut content = staged.join("\n");
        content.push('\n');

        let temp = self.temp_path();
        std::fs::write(&temp, content).map_err(|err| AppError::persistence(err.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&temp, permissions)
                .map_err(|err| AppError::persistence(err.to_string()))?;
        }

        std::fs::rename(&temp, &self.path).map_err(|err| AppError::persistence(err.to_string()))
    }

    fn load_all(&self) -> Result<Vec<TaskRecord>, AppError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|err| AppError::persistence(err.to_string()))?;

        let mut records = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Ok(header) = serde_json::from_str::<Header>(line) {
                if !(1..=SCHEMA_VERSION).contains(&header.schema_version) {
                    return Err(AppError::persistence(format!(
                        "schema_version {} is not supported",
                        header.schema_version
                    )));
                }
                continue;
            }

            if let Ok(record) = serde_json::from_str::<TaskRecord>(line) {
                records.push(record);
            }
            // lines that parse as neither are dropped; record-level
            // corruption is the store's concern
        }

        Ok(records)
    }
}

pub fn store_path(configured: Option<&str>) -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var("TRACKER_STORE_PATH")
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if let Some(path) = configured
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::persistence("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("tracker").join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::persistence("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("tracker")
            .join(STORE_FILE_NAME))
    }
}
