use anyhow::{Context, Result};
use readme_render::{
    AssetManifest, Config, GitReadmeSource, HIGHLIGHT_STYLESHEET, LoadOutcome, PAGE_STYLESHEET,
    ReadmeLoader, ReadmeRequest, StaticPage,
};
use std::fs;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    let name = config
        .project_name()
        .context("Failed to determine project name")?;

    let assets_dir = config.output.join("assets");
    fs::create_dir_all(&assets_dir).context("Failed to create assets directory")?;
    readme_render::write_stylesheets(&assets_dir, &config.theme)
        .context("Failed to write stylesheets")?;

    let manifest = AssetManifest {
        highlighter_style: format!("assets/{}", HIGHLIGHT_STYLESHEET),
        ..AssetManifest::default()
    };

    let page = StaticPage::new(&manifest);
    let source = GitReadmeSource::new(&config.repo);
    let loader = ReadmeLoader::new(source, &page, &page, manifest);
    let request = ReadmeRequest::new(config.owner_name(), &name, &config.revision);

    match loader.load(&request).await {
        LoadOutcome::Rendered(kind) => println!("Rendered {:?} README for {}", kind, name),
        LoadOutcome::Hidden => println!("No README found at {}", config.revision),
        LoadOutcome::Failed => eprintln!("Warning: Failed to load README for {}", name),
        LoadOutcome::Superseded => {}
    }

    let page_stylesheet = format!("assets/{}", PAGE_STYLESHEET);
    let html = page.render(&name, &[&page_stylesheet]);

    let index_path = config.output.join("index.html");
    fs::write(&index_path, html.into_string())
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    println!("Generated: {}", index_path.display());

    if config.open {
        open::that(&index_path)
            .with_context(|| format!("Failed to open {}", index_path.display()))?;
    }

    Ok(())
}
