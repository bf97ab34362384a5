// SPDX-FileCopyrightText: 2026 Sébastien Helleu <flashcode@flashtux.org>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Directory utilities.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::{collections::HashSet, sync::Arc};

use colored::Colorize;
use ignore::WalkBuilder;

/// Return `true` if the path has one of the extensions (case insensitive).
fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Recursively find all source files with one of the given extensions under the given
/// paths.
///
/// The .gitignore rules are respected: ignored files are skipped.
pub fn find_source_files(paths: &[PathBuf], extensions: &[String]) -> HashSet<PathBuf> {
    let all_paths: Vec<PathBuf> = if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths.to_vec()
    };

    let mut builder = WalkBuilder::new(&all_paths[0]);
    for root in all_paths.iter().skip(1) {
        builder.add(root);
    }

    builder.follow_links(false);

    let files = Arc::new(Mutex::new(HashSet::new()));
    builder.build_parallel().run(|| {
        let files = Arc::clone(&files);
        Box::new(move |entry| {
            match entry {
                Ok(dirent) => {
                    if dirent.file_type().is_some_and(|ft| ft.is_file())
                        && has_extension(dirent.path(), extensions)
                    {
                        let mut files = files.lock().unwrap();
                        files.insert(
                            dirent
                                .path()
                                .strip_prefix("./")
                                .unwrap_or(dirent.path())
                                .to_path_buf(),
                        );
                    }
                }
                Err(err) => {
                    eprintln!("{}: could not read entry: {err}", "Warning".yellow());
                }
            }
            ignore::WalkState::Continue
        })
    });
    files.lock().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        let extensions = vec!["cs".to_string(), "vb".to_string()];
        assert!(has_extension(Path::new("src/Program.cs"), &extensions));
        assert!(has_extension(Path::new("Module.VB"), &extensions));
        assert!(!has_extension(Path::new("README.md"), &extensions));
        assert!(!has_extension(Path::new("Makefile"), &extensions));
    }

    #[test]
    fn test_find_source_files() {
        let root = std::env::temp_dir().join(format!("fmtorder-dir-{}", std::process::id()));
        std::fs::create_dir_all(root.join("sub")).unwrap();
        std::fs::write(root.join("a.cs"), "").unwrap();
        std::fs::write(root.join("sub").join("b.cs"), "").unwrap();
        std::fs::write(root.join("c.txt"), "").unwrap();
        let files = find_source_files(std::slice::from_ref(&root), &["cs".to_string()]);
        std::fs::remove_dir_all(&root).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains(&root.join("a.cs")));
        assert!(files.contains(&root.join("sub").join("b.cs")));
    }
}
