//! List files on disk: load-or-create, then regenerate the titles script.
//!
//! Layout under the base directory:
//!
//! ```text
//! aspect_ratios.txt
//! resolutions.txt
//! javascript/button_titles.js   (overwritten on every load)
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::buttons::ButtonTable;
use crate::lists::{
    DEFAULT_ASPECT_RATIOS, DEFAULT_RESOLUTIONS, ListParse, ListWarning, RatioEntry,
    ResolutionEntry, parse_aspect_ratios, parse_resolutions, render_titles,
};

pub const ASPECT_RATIOS_FILE: &str = "aspect_ratios.txt";
pub const RESOLUTIONS_FILE: &str = "resolutions.txt";
/// Relative to the base directory.
pub const TITLES_FILE: &str = "javascript/button_titles.js";

/// Filesystem error while loading or writing lists.
#[derive(Debug, thiserror::Error)]
pub enum FilesError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Both lists as loaded from a base directory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lists {
    pub ratios: ListParse<RatioEntry>,
    pub resolutions: ListParse<ResolutionEntry>,
}

impl Lists {
    /// Skipped lines of both lists, ratios first.
    pub fn warnings(&self) -> impl Iterator<Item = &ListWarning> {
        self.ratios
            .warnings
            .iter()
            .chain(self.resolutions.warnings.iter())
    }

    /// Button table over the parsed entries.
    pub fn button_table(&self) -> ButtonTable {
        ButtonTable::new(
            self.ratios.entries.clone(),
            self.resolutions.entries.clone(),
        )
    }

    /// The titles script for these lists.
    pub fn titles(&self) -> String {
        render_titles(&self.ratios.entries, &self.resolutions.entries)
    }
}

/// Load both lists from `base_dir`, creating missing files from defaults,
/// and rewrite the titles script.
///
/// Malformed lines are skipped, logged at `warn`, and kept in the returned
/// [`Lists`].
pub fn load_lists(base_dir: &Path) -> Result<Lists, FilesError> {
    let ratios_path = base_dir.join(ASPECT_RATIOS_FILE);
    let ratios = parse_aspect_ratios(&read_or_create(&ratios_path, DEFAULT_ASPECT_RATIOS)?);
    log_warnings(&ratios_path, &ratios.warnings);

    let resolutions_path = base_dir.join(RESOLUTIONS_FILE);
    let resolutions = parse_resolutions(&read_or_create(&resolutions_path, DEFAULT_RESOLUTIONS)?);
    log_warnings(&resolutions_path, &resolutions.warnings);

    let lists = Lists {
        ratios,
        resolutions,
    };
    write_titles(base_dir, &lists)?;
    Ok(lists)
}

/// Read `path`, first writing `default` there if the file does not exist.
pub fn read_or_create(path: &Path, default: &str) -> Result<String, FilesError> {
    if !path.exists() {
        log::info!("{} not found, writing defaults", path.display());
        write_file(path, default)?;
        return Ok(String::from(default));
    }
    fs::read_to_string(path).map_err(|source| FilesError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the titles script under `base_dir`. Returns its path.
pub fn write_titles(base_dir: &Path, lists: &Lists) -> Result<PathBuf, FilesError> {
    let path = base_dir.join(TITLES_FILE);
    write_file(&path, &lists.titles())?;
    log::debug!("wrote {}", path.display());
    Ok(path)
}

fn write_file(path: &Path, contents: &str) -> Result<(), FilesError> {
    let to_error = |source: io::Error| FilesError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    fs::write(path, contents).map_err(to_error)
}

fn log_warnings(path: &Path, warnings: &[ListWarning]) {
    for warning in warnings {
        log::warn!("{}: skipped {warning}", path.display());
    }
}
