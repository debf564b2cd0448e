//! Build every language's posts and report failures

use anyhow::Result;

use crate::Folio;

pub async fn run(folio: &Folio) -> Result<()> {
    let service = folio.content_service();
    let languages = service.list_languages()?;
    let mut failed = 0;

    for lang in &languages {
        match service.get_posts(lang).await {
            Ok(posts) => println!("  {}: {} posts ok", lang, posts.len()),
            Err(e) => {
                failed += 1;
                println!("  {}: {}", lang, e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} languages failed to build", failed, languages.len());
    }
    println!("Checked {} languages", languages.len());
    Ok(())
}
