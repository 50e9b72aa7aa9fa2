use crate::error::{Result, SwitcherError};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Lock-файл единственного экземпляра демона.
///
/// Файл создаётся эксклюзивно; существующий файл означает уже запущенный
/// процесс. Удаляется при сбросе guard'а.
pub struct LockFile {
    path: PathBuf,
    file: File,
}

impl LockFile {
    pub fn acquire<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    SwitcherError::Lock(format!(
                        "не удалось создать {:?}. Процесс уже запущен?",
                        path
                    ))
                } else {
                    SwitcherError::Io(e)
                }
            })?;

        Ok(Self { path, file })
    }

    /// Записать pid владельца. Вызывается после возможного ухода в фон,
    /// чтобы в файле оказался pid реального владельца.
    pub fn write_pid(&mut self) -> Result<()> {
        write!(self.file, "{}", std::process::id())?;
        self.file.flush()?;
        Ok(())
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!("Не удалось удалить lock-файл {:?}: {}", self.path, e);
        } else {
            debug!("Lock-файл {:?} удалён", self.path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_lock_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sway-xkb-rust-test-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_acquire_is_exclusive() {
        let path = test_lock_path("exclusive");
        let _lock = LockFile::acquire(&path).unwrap();

        // Второй экземпляр получает отказ
        let second = LockFile::acquire(&path);
        assert!(matches!(second, Err(SwitcherError::Lock(_))));
    }

    #[test]
    fn test_drop_releases_lock() {
        let path = test_lock_path("release");

        {
            let mut lock = LockFile::acquire(&path).unwrap();
            lock.write_pid().unwrap();
            assert!(path.exists());
        }

        assert!(!path.exists());
        // После освобождения файл снова доступен
        let _lock = LockFile::acquire(&path).unwrap();
    }
}
