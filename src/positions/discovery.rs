//! Discovery of position tables under a data root.
//!
//! Layout expected on disk: `<root>/<category>/<object>.csv`. Each immediate
//! subdirectory of the root is a category, each `.csv` file inside it an
//! object whose id is the file stem. Directories listed in `skip_dirs`
//! (compared lowercase) are ignored. Both levels are visited in name order,
//! which fixes the processing order of the whole pipeline.
//!
//! Only an unreadable root is an error. Entries whose name is not UTF-8 and
//! category directories that cannot be listed are skipped with a warning.
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

use crate::scene_errors::SceneError;

/// One position table found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSource {
    pub category: String,
    pub id: String,
    pub path: Utf8PathBuf,
}

fn sorted_entries(dir: &Utf8Path) -> io::Result<Vec<Utf8PathBuf>> {
    let mut entries: Vec<Utf8PathBuf> = dir
        .read_dir_utf8()?
        .filter_map(|entry| match entry {
            Ok(e) => Some(e.into_path()),
            Err(err) => {
                warn!("Skipping unreadable entry in {dir}: {err}");
                None
            }
        })
        .collect();
    entries.sort();
    Ok(entries)
}

/// Walk `root` and list every position table.
///
/// Arguments
/// -----------------
/// * `root` – Data directory holding one subdirectory per category.
/// * `skip_dirs` – Subdirectory names which never contain objects.
///
/// Return
/// ----------
/// * The discovered tables in stable (category, file name) order.
pub fn discover_objects(
    root: &Utf8Path,
    skip_dirs: &[String],
) -> Result<Vec<ObjectSource>, SceneError> {
    let mut sources = Vec::new();

    for sub in sorted_entries(root)? {
        if !sub.is_dir() {
            continue;
        }
        let Some(category) = sub.file_name() else {
            continue;
        };
        let lowered = category.to_lowercase();
        if skip_dirs.iter().any(|s| s.to_lowercase() == lowered) {
            debug!("Skipping non-object directory {sub}");
            continue;
        }

        let files = match sorted_entries(&sub) {
            Ok(files) => files,
            Err(err) => {
                warn!("Cannot list category directory {sub}: {err}");
                continue;
            }
        };

        for file in files {
            let is_csv = file
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv || !file.is_file() {
                continue;
            }
            let Some(id) = file.file_stem() else {
                continue;
            };
            sources.push(ObjectSource {
                category: category.to_string(),
                id: id.to_string(),
                path: file.clone(),
            });
        }
    }

    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discover_objects_order_and_skips() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(tmp.path()).unwrap();

        fs::create_dir_all(root.join("tnos")).unwrap();
        fs::create_dir_all(root.join("moons")).unwrap();
        fs::create_dir_all(root.join("Diameters")).unwrap();
        fs::write(root.join("tnos/Sedna.csv"), "").unwrap();
        fs::write(root.join("tnos/Eris.CSV"), "").unwrap();
        fs::write(root.join("tnos/readme.txt"), "").unwrap();
        fs::write(root.join("moons/Triton.csv"), "").unwrap();
        fs::write(root.join("Diameters/table.csv"), "").unwrap();
        fs::write(root.join("stray.csv"), "").unwrap();

        let skip = vec!["diameters".to_string()];
        let found = discover_objects(root, &skip).unwrap();
        let ids: Vec<(&str, &str)> = found
            .iter()
            .map(|s| (s.category.as_str(), s.id.as_str()))
            .collect();
        assert_eq!(
            ids,
            vec![("moons", "Triton"), ("tnos", "Eris"), ("tnos", "Sedna")]
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_names_are_skipped() {
        use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(tmp.path()).unwrap();

        fs::create_dir_all(root.join("tnos")).unwrap();
        fs::write(root.join("tnos/Eris.csv"), "").unwrap();
        fs::write(
            tmp.path().join("tnos").join(OsStr::from_bytes(b"bad\xff.csv")),
            "",
        )
        .unwrap();
        fs::create_dir_all(tmp.path().join(OsStr::from_bytes(b"odd\xfe"))).unwrap();

        let found = discover_objects(root, &[]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "Eris");
        assert_eq!(found[0].category, "tnos");
    }
}
