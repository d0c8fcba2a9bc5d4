//! 资产缓存存储
//!
//! 应用缓存目录下的扁平字节存储。replace 先写临时文件再 rename，
//! 读者看到的要么是旧内容要么是新内容。

use crate::services::ports::ByteStore;
use std::fs;
use std::io;
use std::path::PathBuf;

pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// 打开（必要时创建）指定目录下的存储
    pub fn open(dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// 打开应用默认的资产缓存目录
    pub fn open_default() -> io::Result<Self> {
        Self::open(super::ensure_asset_cache_dir()?)
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn blob_path(&self, name: &str) -> io::Result<PathBuf> {
        // 名字是扁平文件名，拒绝路径分隔符
        if name.is_empty() || name.contains('/') || name.contains('\\') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid blob name: {:?}", name),
            ));
        }
        Ok(self.dir.join(name))
    }
}

impl ByteStore for CacheStore {
    fn exists(&self, name: &str) -> bool {
        self.blob_path(name).map(|p| p.is_file()).unwrap_or(false)
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.blob_path(name)?)
    }

    fn replace(&self, name: &str, bytes: &[u8]) -> io::Result<()> {
        let target = self.blob_path(name)?;
        let tmp = self.dir.join(format!(".{}.tmp", name));
        fs::write(&tmp, bytes)?;
        match fs::rename(&tmp, &target) {
            Ok(()) => Ok(()),
            Err(e) => {
                let _ = fs::remove_file(&tmp);
                Err(e)
            }
        }
    }
}
