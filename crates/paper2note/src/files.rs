//! The two filesystem side effects of a run: renaming the PDF and writing the note.

use std::{fs::OpenOptions, io::Write};

use super::*;

/// What [`rename_pdf`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
  /// The PDF was moved to this path.
  Renamed(PathBuf),
  /// The PDF stays where it is, either because the pattern yields its current name or because
  /// another file already occupies the target.
  Unchanged(PathBuf),
}

impl RenameOutcome {
  /// Where the PDF lives after the rename step.
  pub fn path(&self) -> &Path {
    match self {
      Self::Renamed(path) | Self::Unchanged(path) => path,
    }
  }

  /// Whether the file was actually moved.
  pub fn is_renamed(&self) -> bool { matches!(self, Self::Renamed(_)) }
}

/// What [`write_note`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteWriteOutcome {
  /// A new note was written at this path.
  Created(PathBuf),
  /// A note already existed at this path and was left untouched.
  AlreadyExists(PathBuf),
}

impl NoteWriteOutcome {
  /// The note's path, whether or not it was written by this run.
  pub fn path(&self) -> &Path {
    match self {
      Self::Created(path) | Self::AlreadyExists(path) => path,
    }
  }

  /// Whether this run created the note.
  pub fn is_created(&self) -> bool { matches!(self, Self::Created(_)) }
}

/// Renames `pdf` to `{rendered pattern}.pdf` in its own directory.
///
/// The move is skipped when the target equals the current path or when a file already exists
/// there. Existing files are never overwritten.
#[instrument(skip(pattern, fields), fields(pattern = %pattern), level = "debug")]
pub fn rename_pdf(
  pdf: &Path,
  pattern: &Pattern,
  fields: &NormalizedMetadata,
) -> Result<RenameOutcome> {
  let parent = pdf.parent().ok_or_else(|| {
    Paper2NoteError::InvalidInput(format!("{} has no parent directory.", pdf.display()))
  })?;
  let renamed = parent.join(format!("{}.pdf", pattern.render(fields)?));

  if renamed != pdf && !renamed.exists() {
    info!("Renaming {} to {}.", pdf.display(), renamed.display());
    std::fs::rename(pdf, &renamed)?;
    Ok(RenameOutcome::Renamed(renamed))
  } else {
    info!("Did not rename {}.", pdf.display());
    Ok(RenameOutcome::Unchanged(pdf.to_path_buf()))
  }
}

/// Writes `{folder}/{rendered pattern}.md` from `template`.
///
/// The filename and the note body are both rendered before anything touches the filesystem, so a
/// template with an unknown placeholder leaves no file behind. An existing note is never
/// modified. `folder` is created, including parents, when it does not exist yet.
#[instrument(skip(pattern, template, fields), fields(pattern = %pattern), level = "debug")]
pub fn write_note(
  folder: &Path,
  pattern: &Pattern,
  template: &NoteTemplate,
  fields: &NormalizedMetadata,
) -> Result<NoteWriteOutcome> {
  let note_path = folder.join(format!("{}.md", pattern.render(fields)?));
  let content = template.render(fields)?;

  if note_path.exists() {
    warn!("Did not create note at {} because it already exists.", note_path.display());
    return Ok(NoteWriteOutcome::AlreadyExists(note_path));
  }

  if !folder.exists() {
    debug!(folder = %folder.display(), "Creating note folder");
    std::fs::create_dir_all(folder)?;
  }

  info!("Creating note at {}.", note_path.display());
  let mut file = OpenOptions::new().write(true).create_new(true).open(&note_path)?;
  file.write_all(content.as_bytes())?;
  Ok(NoteWriteOutcome::Created(note_path))
}
