//! List site content

use anyhow::Result;

use crate::content::SortDirection;
use crate::Folio;

/// Print every slug across all languages
pub fn slugs(folio: &Folio) -> Result<()> {
    let slugs = folio.content_service().list_slugs()?;
    println!("Slugs ({}):", slugs.len());
    for slug in slugs {
        println!("  {}", slug);
    }
    Ok(())
}

/// List posts for a language, newest first, optionally filtered by a query
pub async fn run(folio: &Folio, lang: &str, query: Option<&str>) -> Result<()> {
    let service = folio.content_service();
    let posts = match query {
        Some(q) => service.search(lang, q).await?,
        None => service
            .get_posts(lang)
            .await?
            .sort_by_update_at(SortDirection::Desc),
    };

    match query {
        Some(q) => println!("Posts matching {:?} ({}):", q, posts.len()),
        None => println!("Posts ({}):", posts.len()),
    }
    for post in posts.all() {
        println!(
            "  {} - {} [{}]",
            post.update_at_with_format(),
            post.title(),
            post.slug()
        );
    }

    Ok(())
}
