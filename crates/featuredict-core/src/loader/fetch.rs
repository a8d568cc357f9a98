// crates/featuredict-core/src/loader/fetch.rs

//! Download preset files from the iD tagging schema distribution.

use crate::error::{DictionaryError, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub const PRESETS_BASE_URL: &str = "https://raw.githubusercontent.com/openstreetmap/id-tagging-schema/main/dist";

const TIMEOUT: Duration = Duration::from_secs(60);

/// Download `url` into the file `dest`, returning the number of bytes written.
pub fn download(url: &str, dest: &Path) -> Result<u64> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()
        .map_err(|e| DictionaryError::Fetch(e.to_string()))?;

    let mut response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| DictionaryError::Fetch(format!("{url}: {e}")))?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(dest)?);
    let bytes = io::copy(&mut response, &mut writer)?;
    info!(url, dest = %dest.display(), bytes, "downloaded");
    Ok(bytes)
}

/// Download `presets.json` and the translation files of `locales` from
/// `base_url` into `dir`, in the layout [`crate::catalog::IdLocalizedCatalog`]
/// reads.
pub fn download_presets(base_url: &str, dir: &Path, locales: &[&str]) -> Result<()> {
    let base_url = base_url.trim_end_matches('/');
    download(&format!("{base_url}/presets.json"), &dir.join("presets.json"))?;
    for locale in locales {
        download(
            &format!("{base_url}/translations/{locale}.json"),
            &dir.join(format!("{locale}.json")),
        )?;
    }
    Ok(())
}
