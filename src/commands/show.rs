//! Show one post

use anyhow::{Context, Result};

use crate::Folio;

pub async fn run(folio: &Folio, lang: &str, slug: &str, json: bool) -> Result<()> {
    let service = folio.content_service();
    let post = service
        .get_post(lang, slug)
        .await?
        .with_context(|| format!("No post {:?} for language {:?}", slug, lang))?;

    if json {
        let output = serde_json::to_string_pretty(&post.serialize())
            .context("Failed to serialize post")?;
        println!("{}", output);
        return Ok(());
    }

    let neighbors = service.get_neighbors(lang, slug).await?;

    println!("{}", post.title());
    println!("  link:    {}", post.link());
    println!("  author:  {}", post.author());
    println!("  created: {}", post.create_at_with_format());
    if post.is_update_at() {
        println!("  updated: {}", post.update_at_with_format());
    }
    let tags = post.tags();
    if !tags.is_empty() {
        println!("  tags:    {}", tags.join(", "));
    }
    if let Some(navigation) = post.navigation() {
        let links: usize = post.navigation_menu().iter().map(|i| i.link_count()).sum();
        println!("  menu:    {} ({} links)", navigation, links);
    }
    if let Some(prev) = &neighbors.prev {
        println!("  prev:    {} [{}]", prev.title(), prev.slug());
    }
    if let Some(next) = &neighbors.next {
        println!("  next:    {} [{}]", next.title(), next.slug());
    }

    Ok(())
}
