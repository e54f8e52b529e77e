//! Pruning of files that should not ship in a packaged CLI
//!
//! Walks `node_modules` under the project root and removes documentation,
//! VCS/CI metadata, test directories, source maps and other known offenders.
//! Template and message directories are left alone because their markdown and
//! dotfiles are runtime content.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::ui;

/// Directories whose `test` subdirectories hold production code
const ALLOWED_TEST_DIRS: [&str; 7] = [
    "command",
    "commands",
    "lib",
    "dist",
    "salesforce-alm",
    "@salesforce/plugin-templates",
    "@salesforce/plugin-generator",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct PruneOptions {
    /// List what would be removed without deleting
    pub dry_run: bool,
    /// Also remove TypeScript declaration files
    pub types: bool,
    /// Print every matched path
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    File,
    Dir,
    Any,
}

/// One class of artifacts to remove
struct Rule {
    label: &'static str,
    kind: Kind,
    matches: fn(&Path, &str) -> bool,
    /// Ancestor directory names under which matches are kept
    keep_under: &'static [&'static str],
}

fn rules(types: bool) -> Vec<Rule> {
    let mut rules = vec![
        Rule {
            label: "JSforceTestSuite files",
            kind: Kind::Dir,
            matches: |rel, _| rel == Path::new("JSforceTestSuite"),
            keep_under: &[],
        },
        Rule {
            label: ".md files",
            kind: Kind::File,
            matches: |_, name| name.ends_with(".md"),
            keep_under: &["templates", "messages"],
        },
        Rule {
            label: ".gitignore files",
            kind: Kind::File,
            matches: |_, name| name == ".gitignore",
            keep_under: &["templates"],
        },
        Rule {
            label: ".gitattributes files",
            kind: Kind::File,
            matches: |_, name| name == ".gitattributes",
            keep_under: &["templates"],
        },
        Rule {
            label: ".eslintrc files",
            kind: Kind::File,
            matches: |_, name| name == ".eslintrc",
            keep_under: &["templates"],
        },
        Rule {
            label: "appveyor.yml files",
            kind: Kind::File,
            matches: |_, name| name == "appveyor.yml",
            keep_under: &["templates"],
        },
        Rule {
            label: "circle.yml files",
            kind: Kind::File,
            matches: |_, name| name == "circle.yml",
            keep_under: &["templates"],
        },
        Rule {
            label: "test directories",
            kind: Kind::Dir,
            matches: |rel, name| {
                let path = rel.to_string_lossy();
                name == "test" && !ALLOWED_TEST_DIRS.iter().any(|d| path.contains(d))
            },
            keep_under: &[],
        },
        Rule {
            label: "*.map files",
            kind: Kind::File,
            matches: |rel, name| {
                name.ends_with(".map") && !rel.to_string_lossy().contains("lodash.map")
            },
            keep_under: &[],
        },
        Rule {
            label: ".nyc_output files",
            kind: Kind::Any,
            matches: |_, name| name == ".nyc_output",
            keep_under: &[],
        },
        Rule {
            label: "jsforce/build directory",
            kind: Kind::Dir,
            matches: |rel, _| rel == Path::new("jsforce/build"),
            keep_under: &[],
        },
    ];

    if types {
        rules.push(Rule {
            label: "*.d.ts files",
            kind: Kind::File,
            matches: |_, name| name.ends_with(".d.ts"),
            keep_under: &[],
        });
    }

    rules
}

/// Find everything under `node_modules` that `rule` selects
///
/// Matched directories are not descended into.
fn find(modules: &Path, rule: &Rule) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut walker = WalkDir::new(modules).min_depth(1).into_iter();

    while let Some(entry) = walker.next() {
        let Ok(entry) = entry else {
            continue;
        };
        let Ok(rel) = entry.path().strip_prefix(modules) else {
            continue;
        };
        let name = entry.file_name().to_string_lossy();
        let is_dir = entry.file_type().is_dir();

        let kind_ok = match rule.kind {
            Kind::File => !is_dir,
            Kind::Dir => is_dir,
            Kind::Any => true,
        };
        let kept = rel
            .parent()
            .map(|parent| {
                parent.components().any(|c| {
                    rule.keep_under
                        .iter()
                        .any(|keep| c.as_os_str() == *keep)
                })
            })
            .unwrap_or(false);

        if kind_ok && !kept && (rule.matches)(rel, &name) {
            found.push(entry.path().to_path_buf());
            if is_dir {
                walker.skip_current_dir();
            }
        }
    }

    found
}

/// Prune `<root>/node_modules`
///
/// # Returns
/// Paths removed (or, in dry-run mode, that would be removed)
pub fn prune(root: &Path, options: PruneOptions) -> Result<Vec<PathBuf>> {
    let modules = root.join("node_modules");
    let mut removed = Vec::new();

    if !modules.is_dir() {
        ui::display_warning(&format!("{} does not exist", modules.display()));
        return Ok(removed);
    }

    for rule in rules(options.types) {
        let paths = find(&modules, &rule);
        let listed: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        ui::display_prune(&listed, rule.label, options.dry_run, options.verbose);

        for path in paths {
            if !options.dry_run {
                remove_path(&path)?;
            }
            removed.push(path);
        }
    }

    Ok(removed)
}

fn remove_path(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path)?,
        Ok(_) => fs::remove_file(path)?,
        // Already gone with an earlier rule's directory
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
