//! End-to-end engine tests with a fake analyzer.

mod common;

use assert_matches::assert_matches;
use common::{engine, engine_with, release, FakeAnalyzer, EMPTY_REPORT, INCEPTION_REPORT};
use std::sync::Arc;
use tempfile::TempDir;
use torrentmate::generators::{ArtifactKind, Generator};
use torrentmate::naming::NamingOptions;
use torrentmate::reconcile::Advisory;
use torrentmate_av::Resolution;
use torrentmate_common::{Error, ErrorKind};
use torrentmate_parser::{Classifier, ContentType, Precedence};

#[tokio::test]
async fn test_inception_token() {
    let root = TempDir::new().unwrap();
    let dir = release(
        &root,
        "Inception (2010)",
        &[("Inception.2010.1080p.BluRay.x265.mkv", 64), ("sample.mkv", 8)],
    );
    let analyzer = Arc::new(FakeAnalyzer::returning(INCEPTION_REPORT));

    let outcome = engine(analyzer.clone()).process_folder(&dir).await.unwrap();

    assert_eq!(
        outcome.token.as_str(),
        "Inception (2010) - EN - BluRay - 1080p - x265"
    );
    assert_eq!(outcome.metadata.content_type(), ContentType::Movie);
    assert_eq!(outcome.metadata.resolution(), Resolution::_1080p);
    assert_eq!(outcome.metadata.runtime_minutes(), Some(148));
    assert!(outcome.metadata.advisories().is_empty());
    assert_eq!(analyzer.calls(), 1);
}

#[tokio::test]
async fn test_source_comes_from_largest_file_name() {
    let root = TempDir::new().unwrap();
    let dir = release(&root, "Inception (2010)", &[("movie.mkv", 64)]);
    let analyzer = Arc::new(FakeAnalyzer::returning(INCEPTION_REPORT));

    let outcome = engine(analyzer).process_folder(&dir).await.unwrap();
    assert_eq!(outcome.token.as_str(), "Inception (2010) - EN - 1080p - x265");
}

#[tokio::test]
async fn test_series_without_media_file() {
    let root = TempDir::new().unwrap();
    let dir = release(&root, "Some.Show.S02E05.WEBRip", &[("readme.txt", 10)]);
    let analyzer = Arc::new(FakeAnalyzer::returning(INCEPTION_REPORT));

    let err = engine(analyzer.clone()).process_folder(&dir).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NoMediaFileFound);
    assert_matches!(err.source, Error::NoMediaFileFound { .. });
    assert!(err.to_string().contains("Some.Show.S02E05.WEBRip"));
    assert_eq!(analyzer.calls(), 0);
}

#[tokio::test]
async fn test_empty_title() {
    let root = TempDir::new().unwrap();
    let dir = release(&root, "???", &[("a.mkv", 10)]);
    let analyzer = Arc::new(FakeAnalyzer::returning(INCEPTION_REPORT));

    let err = engine(analyzer).process_folder(&dir).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyTitle);
}

#[tokio::test]
async fn test_empty_title_wins_over_missing_media() {
    let root = TempDir::new().unwrap();
    let dir = release(&root, "???", &[]);
    let analyzer = Arc::new(FakeAnalyzer::returning(INCEPTION_REPORT));

    let err = engine(analyzer).process_folder(&dir).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyTitle);
}

#[tokio::test]
async fn test_analyzer_unavailable() {
    let root = TempDir::new().unwrap();
    let dir = release(&root, "Movie (1999)", &[("m.mkv", 10)]);
    let analyzer = Arc::new(FakeAnalyzer::failing("not installed"));

    let err = engine(analyzer).process_folder(&dir).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AnalyzerUnavailable);
}

#[tokio::test]
async fn test_malformed_report() {
    let root = TempDir::new().unwrap();
    let dir = release(&root, "Movie (1999)", &[("m.mkv", 10)]);
    let analyzer = Arc::new(FakeAnalyzer::returning("Unable to open file"));

    let err = engine(analyzer).process_folder(&dir).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedTechnicalReport);
}

#[tokio::test]
async fn test_missing_folder_is_io_error() {
    let root = TempDir::new().unwrap();
    let analyzer = Arc::new(FakeAnalyzer::returning(INCEPTION_REPORT));

    let err = engine(analyzer)
        .process_folder(&root.path().join("does-not-exist"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[tokio::test]
async fn test_all_sentinels_give_title_and_year_with_advisory() {
    let root = TempDir::new().unwrap();
    let dir = release(&root, "Inception (2010)", &[("movie.mkv", 10)]);
    let analyzer = Arc::new(FakeAnalyzer::returning(EMPTY_REPORT));

    let outcome = engine(analyzer).process_folder(&dir).await.unwrap();
    assert_eq!(outcome.token.as_str(), "Inception (2010)");
    assert_eq!(
        outcome.metadata.advisories(),
        [Advisory::LowConfidenceMetadata]
    );
}

#[tokio::test]
async fn test_token_is_deterministic() {
    let root = TempDir::new().unwrap();
    let dir = release(
        &root,
        "Show.S01-S03.1080p",
        &[("b.mkv", 10), ("a.mkv", 10), ("c.mkv", 10)],
    );
    let analyzer = Arc::new(FakeAnalyzer::returning(INCEPTION_REPORT));
    let engine = engine(analyzer);

    let first = engine.process_folder(&dir).await.unwrap();
    for _ in 0..5 {
        let again = engine.process_folder(&dir).await.unwrap();
        assert_eq!(again.token, first.token);
        assert_eq!(again.metadata, first.metadata);
    }
    assert_eq!(first.token.as_str(), "Show S01-S03 - EN - 1080p - x265");
}

#[tokio::test]
async fn test_precedence_and_language_label_from_options() {
    let root = TempDir::new().unwrap();
    let dir = release(&root, "Fargo (2014) S01E01", &[("fargo.mkv", 10)]);
    let report = r#"{"media":{"track":[
        {"@type":"Video","Format":"AVC","Height":"720"},
        {"@type":"Audio","Language":"en"},
        {"@type":"Audio","Language":"fr"}
    ]}}"#;
    let analyzer = Arc::new(FakeAnalyzer::returning(report));

    let engine = engine_with(
        analyzer,
        Classifier::new()
            .with_max_year(2026)
            .with_precedence(Precedence::SeriesFirst),
        NamingOptions {
            multi_language_label: Some("MULTI".into()),
        },
    );
    let outcome = engine.process_folder(&dir).await.unwrap();
    assert_eq!(
        outcome.token.as_str(),
        "Fargo (2014) S01E01 - MULTI - 720p - x264"
    );
}

#[tokio::test]
async fn test_batch_isolates_failures_and_keeps_order() {
    let root = TempDir::new().unwrap();
    let good = release(&root, "Inception (2010)", &[("movie.BluRay.mkv", 10)]);
    let empty = release(&root, "Some.Show.S02E05.WEBRip", &[]);
    let other = release(&root, "The.Matrix.1999", &[("matrix.mkv", 10)]);
    let analyzer = Arc::new(FakeAnalyzer::returning(INCEPTION_REPORT));

    let items = engine(analyzer)
        .process_batch(vec![good.clone(), empty.clone(), other.clone()], 2, None)
        .await;

    assert_eq!(items.len(), 3);
    assert_eq!(items[0].folder, good);
    assert!(items[0].is_success());
    assert_eq!(items[1].folder, empty);
    assert_matches!(&items[1].result, Err(e) if e.kind() == ErrorKind::NoMediaFileFound);
    assert_eq!(
        items[2].result.as_ref().unwrap().token.as_str(),
        "The Matrix (1999) - EN - 1080p - x265"
    );
}

#[tokio::test]
async fn test_batch_generates_artifacts() {
    let root = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let dir = release(
        &root,
        "Inception (2010)",
        &[("Inception.2010.1080p.BluRay.x265.mkv", 10)],
    );
    let failed = release(&root, "???", &[("x.mkv", 10)]);
    let analyzer = Arc::new(FakeAnalyzer::returning(INCEPTION_REPORT));
    let generator = Generator::new(out.path());

    let items = engine(analyzer)
        .process_batch(vec![dir, failed], 1, Some(&generator))
        .await;

    let token = "Inception (2010) - EN - BluRay - 1080p - x265";
    let kinds: Vec<_> = items[0].artifacts.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, [ArtifactKind::Nfo, ArtifactKind::BbCode]);

    let nfo = std::fs::read_to_string(out.path().join(format!("{token}.nfo"))).unwrap();
    assert!(nfo.contains("INCEPTION (2010)"));
    assert!(nfo.contains("1080p (1920x1080)"));
    assert!(nfo.contains("E-AC-3 6ch"));
    assert!(nfo.contains("▪ Subtitles.........: N/A"));

    let bbcode = std::fs::read_to_string(out.path().join(format!("{token}.txt"))).unwrap();
    assert!(bbcode.contains(&format!("[b]{token}[/b]")));

    // The failed folder produced nothing.
    assert!(items[1].artifacts.is_empty());
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 2);
}

#[tokio::test]
async fn test_torrent_failure_does_not_block_other_artifacts() {
    let root = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let dir = release(&root, "Inception (2010)", &[("movie.mkv", 10)]);
    let analyzer = Arc::new(FakeAnalyzer::returning(INCEPTION_REPORT));
    let generator = Generator::new(out.path()).with_torrent(Some(
        torrentmate::generators::TorrentSettings {
            program: "/nonexistent/mktorrent".into(),
            ..Default::default()
        },
    ));

    let items = engine(analyzer)
        .process_batch(vec![dir], 1, Some(&generator))
        .await;

    let item = &items[0];
    assert!(item.result.is_ok());
    assert!(!item.is_success());
    let torrent = item
        .artifacts
        .iter()
        .find(|a| a.kind == ArtifactKind::Torrent)
        .unwrap();
    assert_matches!(torrent.outcome, Err(Error::Tool { .. }));
    assert_eq!(item.artifacts.iter().filter(|a| a.is_ok()).count(), 2);
}

#[tokio::test]
async fn test_year_span_series_pack_keeps_season_segment() {
    let root = TempDir::new().unwrap();
    let dir = release(
        &root,
        "Breaking Bad (2008-2013)",
        &[
            ("Season 1/Breaking.Bad.S01E01.mkv", 20),
            ("Season 2/Breaking.Bad.S02E01.mkv", 10),
        ],
    );
    let analyzer = Arc::new(FakeAnalyzer::returning(INCEPTION_REPORT));

    let outcome = engine(analyzer).process_folder(&dir).await.unwrap();
    assert_eq!(outcome.metadata.content_type(), ContentType::Series);
    assert_eq!(
        outcome.token.as_str(),
        "Breaking Bad (2008) S01-S02 - EN - 1080p - x265"
    );
}

#[tokio::test]
async fn test_batch_refuses_artifacts_for_repeated_token() {
    let root = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let first = release(&root, "a/Show.S01", &[("show.s01e01.mkv", 10)]);
    let second = release(
        &root,
        "b/Show.S01",
        &[
            ("show.s01e01.mkv", 10),
            ("show.s01e02.mkv", 10),
            ("show.s01e03.mkv", 10),
        ],
    );
    let analyzer = Arc::new(FakeAnalyzer::returning(INCEPTION_REPORT));
    let generator = Generator::new(out.path());

    let items = engine(analyzer)
        .process_batch(vec![first.clone(), second], 2, Some(&generator))
        .await;

    let token = "Show S01 - EN - 1080p - x265";
    assert_eq!(items[0].result.as_ref().unwrap().token.as_str(), token);
    assert_eq!(items[1].result.as_ref().unwrap().token.as_str(), token);

    assert!(items[0].is_success());
    assert!(!items[1].is_success());
    assert_eq!(items[1].artifacts.len(), 2);
    let first = first.canonicalize().unwrap();
    for artifact in &items[1].artifacts {
        assert_matches!(
            &artifact.outcome,
            Err(Error::DuplicateToken { first: owner, .. }) if owner == &first
        );
    }

    // Only the first folder's files are on disk.
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 2);
    let nfo = std::fs::read_to_string(out.path().join(format!("{token}.nfo"))).unwrap();
    assert!(nfo.contains("▪ Files.............: 1"));
}

#[tokio::test]
async fn test_file_instead_of_folder_is_io_error() {
    let root = TempDir::new().unwrap();
    let file = root.path().join("Inception (2010).mkv");
    std::fs::write(&file, b"data").unwrap();
    let analyzer = Arc::new(FakeAnalyzer::returning(INCEPTION_REPORT));

    let err = engine(analyzer.clone()).process_folder(&file).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.folder, file);
    assert_eq!(analyzer.calls(), 0);
}
