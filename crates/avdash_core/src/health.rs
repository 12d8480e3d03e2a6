use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::LibrarySnapshot;

/// Fixed messy-filename patterns, each a stable key plus a predicate over the
/// extension-stripped stem. Vocabulary mirrors the tags the rename tool strips.
static FIXED_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    vec![
        (
            "resolution",
            Regex::new(r"(?i)\b(480p|720p|1080p|2160p|4K|UHD)\b").expect("resolution pattern"),
        ),
        (
            "source",
            Regex::new(r"(?i)\b(WEB[-.]?DL|WEBRip|BluRay|BDRip|HDTV|DVDRip|REMUX)\b")
                .expect("source pattern"),
        ),
        (
            "codec",
            Regex::new(r"(?i)\b(x264|x265|H\.?264|H\.?265|HEVC|AVC|AV1|AAC|DDP?5?\.?1|Atmos|DTS)\b")
                .expect("codec pattern"),
        ),
        (
            "release_group",
            Regex::new(r"(\[[^\]]+\])|(-[A-Za-z0-9]+$)").expect("release group pattern"),
        ),
        (
            "streaming",
            Regex::new(r"(?i)\b(NF|AMZN|DSNP|HULU|MAX|HBO|ATVP|PCOK|PMTP)\b")
                .expect("streaming pattern"),
        ),
    ]
});

/// One library file flagged by at least one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedFile {
    pub filepath: String,
    pub filename: String,
    /// Keys of the fixed patterns and custom keywords that matched.
    pub matched: Vec<String>,
}

/// Flagged files rolled up by containing folder, for bulk cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderGroup {
    pub folder: String,
    pub count: usize,
}

/// Result of a filename health pass over a library snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HealthReport {
    pub flagged: Vec<FlaggedFile>,
    /// Sorted by descending affected-file count, name breaking ties.
    pub folders: Vec<FolderGroup>,
}

/// Live match count for one operator-supplied keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCount {
    pub keyword: String,
    pub matches: usize,
}

/// Scans the library for messy filenames, tagging each flagged file with the
/// pattern keys that matched and grouping the results by folder.
pub fn analyze(library: &LibrarySnapshot, custom_keywords: &[String]) -> HealthReport {
    let keyword_patterns = compile_keywords(custom_keywords);

    let mut flagged = Vec::new();
    let mut folder_counts: BTreeMap<String, usize> = BTreeMap::new();

    for file in &library.files {
        let stem = strip_extension(&file.filename);
        let mut matched = Vec::new();

        if count_dots(stem) >= 3 {
            matched.push("dot_separated".to_string());
        }
        for (key, pattern) in FIXED_PATTERNS.iter() {
            if pattern.is_match(stem) {
                matched.push((*key).to_string());
            }
        }
        for (keyword, pattern) in &keyword_patterns {
            if pattern.is_match(stem) {
                matched.push(keyword.clone());
            }
        }

        if matched.is_empty() {
            continue;
        }
        let folder = folder_key(&file.filepath);
        *folder_counts.entry(folder).or_insert(0) += 1;
        flagged.push(FlaggedFile {
            filepath: file.filepath.clone(),
            filename: file.filename.clone(),
            matched,
        });
    }

    let mut folders: Vec<FolderGroup> = folder_counts
        .into_iter()
        .map(|(folder, count)| FolderGroup { folder, count })
        .collect();
    folders.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.folder.cmp(&b.folder)));

    HealthReport { flagged, folders }
}

/// Counts, per keyword, how many library files it would flag. Keyword order
/// is preserved so the editor can show counts next to the inputs.
pub fn keyword_match_counts(library: &LibrarySnapshot, keywords: &[String]) -> Vec<KeywordCount> {
    keywords
        .iter()
        .map(|keyword| {
            let matches = compile_keyword(keyword)
                .map(|pattern| {
                    library
                        .files
                        .iter()
                        .filter(|f| pattern.is_match(strip_extension(&f.filename)))
                        .count()
                })
                .unwrap_or(0);
            KeywordCount {
                keyword: keyword.clone(),
                matches,
            }
        })
        .collect()
}

/// Compiles an operator keyword into a word-boundary, case-insensitive
/// pattern. The keyword is escaped first so metacharacters match literally;
/// a keyword that still fails to compile matches nothing.
///
/// A `\b` next to a non-word character can never match, so the boundary is
/// only anchored at edges where the keyword itself has a word character
/// (e.g. `c++` keeps its leading boundary but not a trailing one).
fn compile_keyword(keyword: &str) -> Option<Regex> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        return None;
    }
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut pattern = String::from("(?i)");
    if trimmed.chars().next().is_some_and(is_word) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(trimmed));
    if trimmed.chars().last().is_some_and(is_word) {
        pattern.push_str(r"\b");
    }
    Regex::new(&pattern).ok()
}

fn compile_keywords(keywords: &[String]) -> Vec<(String, Regex)> {
    keywords
        .iter()
        .filter_map(|k| compile_keyword(k).map(|p| (k.clone(), p)))
        .collect()
}

fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => filename,
    }
}

fn count_dots(stem: &str) -> usize {
    stem.chars().filter(|c| *c == '.').count()
}

/// Folder key for grouping: the file's parent directory, except that a
/// season directory ("Season 02", "season1", ...) groups under the show
/// directory one level up.
fn folder_key(filepath: &str) -> String {
    let path = Path::new(filepath);
    let parent = match path.parent() {
        Some(p) => p,
        None => return String::new(),
    };
    let parent_name = parent
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let grouped = if parent_name.to_ascii_lowercase().starts_with("season") {
        parent.parent().unwrap_or(parent)
    } else {
        parent
    };
    grouped.to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::{count_dots, folder_key, strip_extension};

    #[test]
    fn extension_stripping_keeps_dotfiles_whole() {
        assert_eq!(strip_extension("Movie.2019.mkv"), "Movie.2019");
        assert_eq!(strip_extension(".hidden"), ".hidden");
        assert_eq!(strip_extension("noext"), "noext");
    }

    #[test]
    fn dot_counting_runs_on_the_stem() {
        assert_eq!(count_dots("Movie.2019.1080p.BluRay"), 3);
        assert_eq!(count_dots("Movie (2019)"), 0);
    }

    #[test]
    fn season_directories_group_under_the_show() {
        assert_eq!(
            folder_key("/nas/series/Fargo/Season 02/Fargo.S02E04.mkv"),
            "/nas/series/Fargo"
        );
        assert_eq!(
            folder_key("/nas/movies/Movie.2019.mkv"),
            "/nas/movies"
        );
    }
}
