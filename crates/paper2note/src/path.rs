//! Resolution of user supplied paths.

use super::*;

/// Makes `path` absolute and optionally checks that it exists.
///
/// Relative paths are joined onto the current working directory. No further normalization
/// happens: `..` components and symlinks are kept as given.
///
/// # Errors
///
/// - [`Paper2NoteError::NotFound`] with the resolved path if `must_exist` is set and nothing is
///   there
/// - [`Paper2NoteError::Path`] if the current working directory cannot be determined
///
/// # Examples
///
/// ```no_run
/// use paper2note::path::resolve_path;
///
/// let pdf = resolve_path("papers/2304.02532.pdf", true)?;
/// assert!(pdf.is_absolute());
/// # Ok::<(), paper2note::error::Paper2NoteError>(())
/// ```
pub fn resolve_path(path: impl AsRef<Path>, must_exist: bool) -> Result<PathBuf> {
  let path = path.as_ref();
  let path =
    if path.is_absolute() { path.to_path_buf() } else { std::env::current_dir()?.join(path) };

  if must_exist && !path.exists() {
    return Err(Paper2NoteError::NotFound(path));
  }

  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_absolute_path_is_unchanged() {
    let dir = tempdir().unwrap();
    let resolved = resolve_path(dir.path(), true).unwrap();
    assert_eq!(resolved, dir.path());
  }

  #[test]
  fn test_relative_path_joins_cwd() {
    let resolved = resolve_path("some/where/paper.pdf", false).unwrap();
    assert_eq!(resolved, std::env::current_dir().unwrap().join("some/where/paper.pdf"));
    assert!(resolved.is_absolute());
  }

  #[test]
  fn test_dot_dot_is_not_normalized() {
    let resolved = resolve_path("a/../b", false).unwrap();
    assert!(resolved.ends_with("a/../b"));
  }

  #[test]
  fn test_missing_path_when_required() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.pdf");

    match resolve_path(&missing, true) {
      Err(Paper2NoteError::NotFound(path)) => assert_eq!(path, missing),
      other => panic!("Expected NotFound, got {other:?}"),
    }
  }

  #[test]
  fn test_missing_path_when_not_required() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("notes");
    assert_eq!(resolve_path(&missing, false).unwrap(), missing);
  }
}
