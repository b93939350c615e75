use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use color_eyre::{Result, eyre::eyre};

use crate::DOWNLOAD_FILE_PREFIX;

pub fn download_file_name() -> String {
    format!("{DOWNLOAD_FILE_PREFIX}-{}.png", unix_millis())
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

pub fn save_into(dir: &Path, data: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(download_file_name());
    fs::write(&path, data)?;
    Ok(path)
}

pub fn save_to_downloads(data: &[u8]) -> Result<PathBuf> {
    let dir = dirs::download_dir().ok_or(eyre!("Couldn't find download dir"))?;
    save_into(&dir, data)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn file_name_pattern() {
        let name = download_file_name();
        let stamp = name
            .strip_prefix("ai-generated-image-")
            .unwrap()
            .strip_suffix(".png")
            .unwrap();
        assert!(stamp.parse::<u128>().is_ok(), "bad timestamp in {name}");
    }

    #[test]
    fn save_writes_bytes() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let data = vec![7u8, 8, 9];

        let path = save_into(dir.path(), &data)?;
        assert_eq!(fs::read(&path)?, data);
        assert!(path.starts_with(dir.path()));
        Ok(())
    }

    #[test]
    fn save_creates_missing_dirs() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("a").join("b");

        let path = save_into(&nested, &[1u8])?;
        assert!(path.exists());
        Ok(())
    }
}
