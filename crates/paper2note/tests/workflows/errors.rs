use super::*;

#[tokio::test]
async fn test_missing_pdf() {
  let dir = tempdir().unwrap();
  let missing = dir.path().join("missing.pdf");
  let extractor = FakeExtractor::new(example_extraction());

  match paper2note_with(&extractor, NoteRequest::new(&missing)).await {
    Err(Paper2NoteError::NotFound(path)) => assert_eq!(path, missing),
    other => panic!("Expected NotFound, got {other:?}"),
  }
  assert_eq!(extractor.calls(), 0);
}

#[tokio::test]
async fn test_extension_is_case_sensitive() {
  for name in ["paper.PDF", "paper.txt", "paper"] {
    let (_dir, pdf) = pdf_in_tempdir(name);
    let extractor = FakeExtractor::new(example_extraction());

    match paper2note_with(&extractor, NoteRequest::new(&pdf)).await {
      Err(Paper2NoteError::InvalidInput(message)) =>
        assert_eq!(message, "The provided file is not a pdf file."),
      other => panic!("Expected InvalidInput for {name}, got {other:?}"),
    }
    assert_eq!(extractor.calls(), 0);
    assert!(pdf.exists());
  }
}

#[tokio::test]
async fn test_missing_template_is_checked_before_extraction() {
  let (dir, pdf) = pdf_in_tempdir("2304.02532.pdf");
  let template = dir.path().join("no_such_template.md");
  let extractor = FakeExtractor::new(example_extraction());

  let result = paper2note_with(
    &extractor,
    NoteRequest::new(&pdf)
      .with_pdf_rename_pattern("{year}_{title}")
      .with_note_template_path(&template),
  )
  .await;

  assert!(matches!(result, Err(Paper2NoteError::NotFound(path)) if path == template));
  assert_eq!(extractor.calls(), 0);
  assert!(pdf.exists());
}

#[tokio::test]
async fn test_unknown_template_field_keeps_rename() {
  let (dir, pdf) = pdf_in_tempdir("2304.02532.pdf");
  let template = dir.path().join("template.md");
  std::fs::write(&template, "# {title}\n\n{nonexistent_field}\n").unwrap();
  let extractor = FakeExtractor::new(example_extraction());

  let result = paper2note_with(
    &extractor,
    NoteRequest::new(&pdf)
      .with_pdf_rename_pattern("{year}_{title}")
      .with_note_template_path(&template),
  )
  .await;

  assert!(matches!(
    result,
    Err(Paper2NoteError::MissingField(field)) if field == "nonexistent_field"
  ));
  assert!(dir.path().join("2023_Example Paper.pdf").exists());
  assert!(notes_in(dir.path()).iter().all(|note| note == &template));
}

#[tokio::test]
async fn test_unknown_rename_field_touches_nothing() {
  let (dir, pdf) = pdf_in_tempdir("2304.02532.pdf");
  let extractor = FakeExtractor::new(example_extraction());

  let result =
    paper2note_with(&extractor, NoteRequest::new(&pdf).with_pdf_rename_pattern("{publisher}"))
      .await;

  assert!(matches!(result, Err(Paper2NoteError::MissingField(field)) if field == "publisher"));
  assert!(pdf.exists());
  assert!(notes_in(dir.path()).is_empty());
}

#[tokio::test]
async fn test_extractor_errors_pass_through() {
  let (dir, pdf) = pdf_in_tempdir("2304.02532.pdf");

  let result = paper2note_with(&FailingExtractor, NoteRequest::new(&pdf)).await;

  match result {
    Err(Paper2NoteError::ApiError(message)) => assert_eq!(message, "service unavailable"),
    other => panic!("Expected ApiError, got {other:?}"),
  }
  assert!(pdf.exists());
  assert!(notes_in(dir.path()).is_empty());
}
