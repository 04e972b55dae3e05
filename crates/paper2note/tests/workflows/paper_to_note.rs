use super::*;

#[tokio::test]
async fn test_rename_and_note() -> TestResult<()> {
  let (dir, pdf) = pdf_in_tempdir("2304.02532.pdf");
  let extractor = FakeExtractor::new(example_extraction());

  let outcome =
    paper2note_with(&extractor, NoteRequest::new(&pdf).with_pdf_rename_pattern("{year}_{title}"))
      .await?;

  let renamed = dir.path().join("2023_Example Paper.pdf");
  let note = dir.path().join("2023_Example Paper.md");
  assert_eq!(outcome.pdf, RenameOutcome::Renamed(renamed.clone()));
  assert_eq!(outcome.note, NoteWriteOutcome::Created(note.clone()));
  assert!(renamed.exists());
  assert!(!pdf.exists());

  let content = std::fs::read_to_string(&note)?;
  assert!(content.starts_with("# Example Paper\n"));
  assert!(content.contains("Jane Doe"));
  assert!(content.contains("<no doi found>"));
  assert!(content.contains("<no abstract found>"));
  assert_eq!(extractor.calls(), 1);
  Ok(())
}

#[tokio::test]
async fn test_second_run_changes_nothing() -> TestResult<()> {
  let (dir, pdf) = pdf_in_tempdir("2304.02532.pdf");
  let extractor = FakeExtractor::new(example_extraction());

  let first =
    paper2note_with(&extractor, NoteRequest::new(&pdf).with_pdf_rename_pattern("{year}_{title}"))
      .await?;
  let note = first.note.path().to_path_buf();
  std::fs::write(&note, "edited by hand")?;

  let second = paper2note_with(
    &extractor,
    NoteRequest::new(first.pdf.path()).with_pdf_rename_pattern("{year}_{title}"),
  )
  .await?;

  assert_eq!(second.pdf, RenameOutcome::Unchanged(first.pdf.path().to_path_buf()));
  assert_eq!(second.note, NoteWriteOutcome::AlreadyExists(note.clone()));
  assert_eq!(std::fs::read_to_string(&note)?, "edited by hand");
  assert_eq!(notes_in(dir.path()), vec![note]);
  Ok(())
}

#[tokio::test]
async fn test_renamed_pdf_is_identified_on_second_run() -> TestResult<()> {
  let (dir, pdf) = blank_pdf_in_tempdir("2304.02532.pdf");
  let extractor =
    KnownRecordExtractor::new(Identifier::Arxiv("2304.02532".into()), example_extraction());

  let first =
    paper2note_with(&extractor, NoteRequest::new(&pdf).with_pdf_rename_pattern("{year}_{title}"))
      .await?;
  let renamed = dir.path().join("2023_Example Paper.pdf");
  assert_eq!(first.pdf, RenameOutcome::Renamed(renamed.clone()));

  let second = paper2note_with(
    &extractor,
    NoteRequest::new(&renamed).with_pdf_rename_pattern("{year}_{title}"),
  )
  .await?;

  assert_eq!(second.metadata.get("title"), Some("Example Paper"));
  assert_eq!(second.pdf, RenameOutcome::Unchanged(renamed.clone()));
  assert_eq!(second.note, NoteWriteOutcome::AlreadyExists(first.note.path().to_path_buf()));
  assert_eq!(notes_in(dir.path()), vec![dir.path().join("2023_Example Paper.md")]);
  Ok(())
}

#[tokio::test]
async fn test_defaults_keep_name_and_folder() -> TestResult<()> {
  let (dir, pdf) = pdf_in_tempdir("2304.02532.pdf");
  let extractor = FakeExtractor::new(example_extraction());

  let outcome = paper2note_with(&extractor, NoteRequest::new(&pdf)).await?;

  assert_eq!(outcome.pdf, RenameOutcome::Unchanged(pdf.clone()));
  assert_eq!(outcome.note.path(), dir.path().join("2304.02532.md"));
  assert!(pdf.exists());
  Ok(())
}

#[tokio::test]
async fn test_empty_options_count_as_unset() -> TestResult<()> {
  let (dir, pdf) = pdf_in_tempdir("2304.02532.pdf");
  let extractor = FakeExtractor::new(example_extraction());

  let request = NoteRequest::new(&pdf)
    .with_pdf_rename_pattern("")
    .with_note_target_folder("")
    .with_note_template_path("")
    .with_note_filename_pattern("");
  let outcome = paper2note_with(&extractor, request).await?;

  assert!(!outcome.pdf.is_renamed());
  assert_eq!(outcome.note.path(), dir.path().join("2304.02532.md"));
  Ok(())
}

#[tokio::test]
async fn test_braces_in_filename_survive_default_pattern() -> TestResult<()> {
  let (dir, pdf) = pdf_in_tempdir("draft {v2}.pdf");
  let extractor = FakeExtractor::new(example_extraction());

  let outcome = paper2note_with(&extractor, NoteRequest::new(&pdf)).await?;

  assert_eq!(outcome.pdf, RenameOutcome::Unchanged(pdf.clone()));
  assert_eq!(outcome.note.path(), dir.path().join("draft {v2}.md"));
  Ok(())
}

#[tokio::test]
async fn test_nested_note_folder_is_created() -> TestResult<()> {
  let (dir, pdf) = pdf_in_tempdir("2304.02532.pdf");
  let folder = dir.path().join("vault").join("papers");
  let extractor = FakeExtractor::new(example_extraction());

  let outcome = paper2note_with(
    &extractor,
    NoteRequest::new(&pdf)
      .with_pdf_rename_pattern("{year}_{title}")
      .with_note_target_folder(&folder),
  )
  .await?;

  assert_eq!(outcome.note, NoteWriteOutcome::Created(folder.join("2023_Example Paper.md")));
  assert!(dir.path().join("2023_Example Paper.pdf").exists());
  Ok(())
}

#[tokio::test]
async fn test_separate_note_filename_pattern() -> TestResult<()> {
  let (dir, pdf) = pdf_in_tempdir("2304.02532.pdf");
  let extractor = FakeExtractor::new(example_extraction());

  let outcome = paper2note_with(
    &extractor,
    NoteRequest::new(&pdf)
      .with_pdf_rename_pattern("{year}_{title}")
      .with_note_filename_pattern("{author_last} - {title}"),
  )
  .await?;

  assert_eq!(outcome.pdf.path(), dir.path().join("2023_Example Paper.pdf"));
  assert_eq!(outcome.note.path(), dir.path().join("Jane Doe - Example Paper.md"));
  Ok(())
}

#[tokio::test]
async fn test_custom_template() -> TestResult<()> {
  let (dir, pdf) = pdf_in_tempdir("2304.02532.pdf");
  let template = dir.path().join("template.md");
  std::fs::write(&template, "---\ntitle: {title}\nyear: {year}\n---\n{{not a field}}\n")?;
  let extractor = FakeExtractor::new(example_extraction());

  let outcome =
    paper2note_with(&extractor, NoteRequest::new(&pdf).with_note_template_path(&template)).await?;

  assert_eq!(
    std::fs::read_to_string(outcome.note.path())?,
    "---\ntitle: Example Paper\nyear: 2023\n---\n{not a field}\n"
  );
  Ok(())
}

#[tokio::test]
async fn test_nothing_found_uses_sentinels() -> TestResult<()> {
  let (dir, pdf) = pdf_in_tempdir("scan.pdf");
  let extractor = FakeExtractor::new(Extraction::default());

  let outcome = paper2note_with(
    &extractor,
    NoteRequest::new(&pdf).with_pdf_rename_pattern("{year}_{author_1}"),
  )
  .await;

  // Without authors there is no author_1 to substitute.
  assert!(matches!(outcome, Err(Paper2NoteError::MissingField(field)) if field == "author_1"));
  assert!(pdf.exists());

  let outcome = paper2note_with(&extractor, NoteRequest::new(&pdf)).await?;
  let content = std::fs::read_to_string(outcome.note.path())?;
  assert!(content.starts_with("# <no title found>\n"));
  assert!(content.contains("<no authors found>"));
  assert!(content.contains("????-??-??"));
  assert!(content.contains("<no bibtex found>"));
  assert_eq!(notes_in(dir.path()), vec![dir.path().join("scan.md")]);
  Ok(())
}

#[tokio::test]
async fn test_rename_target_taken() -> TestResult<()> {
  let (dir, pdf) = pdf_in_tempdir("2304.02532.pdf");
  let taken = dir.path().join("2023_Example Paper.pdf");
  std::fs::write(&taken, b"someone else")?;
  let extractor = FakeExtractor::new(example_extraction());

  let outcome =
    paper2note_with(&extractor, NoteRequest::new(&pdf).with_pdf_rename_pattern("{year}_{title}"))
      .await?;

  assert_eq!(outcome.pdf, RenameOutcome::Unchanged(pdf.clone()));
  assert_eq!(std::fs::read(&taken)?, b"someone else");
  assert!(outcome.note.is_created());
  Ok(())
}

#[tokio::test]
async fn test_config_is_passed_per_call() -> TestResult<()> {
  let (_dir, pdf) = pdf_in_tempdir("2304.02532.pdf");
  let extractor = FakeExtractor::new(example_extraction());
  let config = ExtractorConfig::default()
    .with_doi(DoiConfig { n_characters_in_pdf: 42, check_filename: false, ..Default::default() });

  let outcome =
    paper2note_with(&extractor, NoteRequest::new(&pdf).with_extractor_config(config.clone()))
      .await?;
  paper2note_with(&extractor, NoteRequest::new(outcome.pdf.path())).await?;

  assert_eq!(extractor.configs(), vec![config, ExtractorConfig::default()]);
  Ok(())
}
