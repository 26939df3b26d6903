//! Tests for reading READMEs from local git repositories.

mod common;

use anyhow::Result;
use common::{create_test_repo, git_add, git_commit, write_file};
use readme_render::{
    AssetManifest, ContentKind, FetchError, GitReadmeSource, LoadOutcome, ReadmeLoader,
    ReadmeRequest, ReadmeSource, StaticPage, Target,
};

fn request(revision: &str) -> ReadmeRequest {
    ReadmeRequest::new("local", "demo", revision)
}

/// Finds the top-level README at HEAD.
#[tokio::test]
async fn test_fetch_readme_at_head() -> Result<()> {
    // Arrange
    let repo = create_test_repo()?;
    write_file(repo.path(), "README.md", "# Demo\n")?;
    write_file(repo.path(), "src/lib.rs", "pub fn demo() {}\n")?;
    git_add(repo.path(), &["."])?;
    git_commit(repo.path(), "Initial commit")?;
    let source = GitReadmeSource::new(repo.path());

    // Act
    let payload = source.fetch(&request("HEAD")).await?;

    // Assert
    assert_eq!(payload.file_name, "README.md");
    assert_eq!(payload.content, "# Demo\n");
    Ok(())
}

/// Reads the README as it was at an older commit.
#[tokio::test]
async fn test_fetch_readme_at_commit() -> Result<()> {
    // Arrange
    let repo = create_test_repo()?;
    write_file(repo.path(), "readme.txt", "first\n")?;
    git_add(repo.path(), &["."])?;
    let first = git_commit(repo.path(), "First")?;
    write_file(repo.path(), "readme.txt", "second\n")?;
    git_add(repo.path(), &["."])?;
    git_commit(repo.path(), "Second")?;
    let source = GitReadmeSource::new(repo.path());

    // Act
    let old = source.fetch(&request(&first)).await?;
    let head = source.fetch(&request("HEAD")).await?;

    // Assert
    assert_eq!(old.content, "first\n");
    assert_eq!(head.content, "second\n");
    Ok(())
}

/// Only top-level files count; a nested README is ignored.
#[tokio::test]
async fn test_fetch_without_readme_is_not_found() -> Result<()> {
    // Arrange
    let repo = create_test_repo()?;
    write_file(repo.path(), "docs/README.md", "# Nested\n")?;
    write_file(repo.path(), "main.rs", "fn main() {}\n")?;
    git_add(repo.path(), &["."])?;
    git_commit(repo.path(), "No top-level readme")?;
    let source = GitReadmeSource::new(repo.path());

    // Act
    let result = source.fetch(&request("HEAD")).await;

    // Assert
    assert_eq!(result, Err(FetchError::NotFound));
    Ok(())
}

/// An unknown revision means there is no README to show.
#[tokio::test]
async fn test_fetch_unknown_revision_is_not_found() -> Result<()> {
    // Arrange
    let repo = create_test_repo()?;
    write_file(repo.path(), "README", "text\n")?;
    git_add(repo.path(), &["."])?;
    git_commit(repo.path(), "Initial commit")?;
    let source = GitReadmeSource::new(repo.path());

    // Act
    let result = source.fetch(&request("no-such-branch")).await;

    // Assert
    assert_eq!(result, Err(FetchError::NotFound));
    Ok(())
}

/// A path that is not a repository is a transport failure.
#[tokio::test]
async fn test_fetch_outside_repository_is_transport_error() -> Result<()> {
    // Arrange
    let dir = tempfile::TempDir::new()?;
    let source = GitReadmeSource::new(dir.path().join("missing"));

    // Act
    let result = source.fetch(&request("HEAD")).await;

    // Assert
    assert!(
        matches!(result, Err(FetchError::Transport(_))),
        "Got {:?}",
        result
    );
    Ok(())
}

/// Full pipeline from a git repository into a static page.
#[tokio::test]
async fn test_git_readme_into_page() -> Result<()> {
    // Arrange
    let repo = create_test_repo()?;
    write_file(
        repo.path(),
        "README.md",
        "# Demo\n\n![logo](https://example.com/logo.png)\n\n```rust\nfn main() {}\n```\n",
    )?;
    git_add(repo.path(), &["."])?;
    git_commit(repo.path(), "Initial commit")?;
    let manifest = AssetManifest::default();
    let page = StaticPage::new(&manifest);
    let loader = ReadmeLoader::new(
        GitReadmeSource::new(repo.path()),
        &page,
        &page,
        manifest,
    );

    // Act
    let outcome = loader.load(&request("HEAD")).await;
    let html = page.render("demo", &["assets/readme.css"]).into_string();

    // Assert
    assert_eq!(outcome, LoadOutcome::Rendered(ContentKind::Markdown));
    assert!(!page.has_placeholder(Target::ReadmeBody));
    assert!(html.contains("<h1 class=\"ui header\">Demo</h1>"), "Got {}", html);
    assert!(html.contains("/api/proxy/"), "Got {}", html);
    assert!(!html.contains("https://example.com/logo.png"), "Got {}", html);
    assert!(html.contains("hljs-"), "Got {}", html);
    Ok(())
}

/// A repository without commits hides the README section.
#[tokio::test]
async fn test_empty_repository_hides_section() -> Result<()> {
    // Arrange
    let repo = create_test_repo()?;
    let page = StaticPage::default();
    let loader = ReadmeLoader::new(
        GitReadmeSource::new(repo.path()),
        &page,
        &page,
        AssetManifest::default(),
    );

    // Act
    let outcome = loader.load(&request("HEAD")).await;

    // Assert
    assert_eq!(outcome, LoadOutcome::Hidden);
    assert!(!page.is_visible(Target::ReadmeSection));
    Ok(())
}
