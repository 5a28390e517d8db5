use std::sync::Arc;

use futures::{stream, StreamExt};
use itertools::Itertools;
use poise::serenity_prelude::{CreateEmbed, Http, Message};
use tracing::{info, warn};

use crate::message::EMBED_COLOR;
use crate::preview::probe_image;
use crate::resolver::{self, PlatformLink};

/// Discord allows at most 10 embeds per message
const MAX_EMBEDS: usize = 10;

/// Reply with preview images for every platform link in a message
pub async fn reply_link_previews(http: Arc<Http>, message: &Message, verify: bool) {
    let links = preview_links(&message.content);
    if links.is_empty() {
        return;
    }

    let embeds: Vec<CreateEmbed> = stream::iter(links)
        .filter_map(|link| preview_embed(link, verify))
        .collect()
        .await;
    if embeds.is_empty() {
        return;
    }

    info!(
        "Replying with {} link previews in {}",
        embeds.len(),
        message.channel_id.0
    );
    if let Err(e) = message
        .channel_id
        .send_message(&http, |m| {
            m.reference_message(message)
                .allowed_mentions(|am| am.replied_user(false))
                .set_embeds(embeds)
        })
        .await
    {
        warn!("Error sending link previews: {:?}", e);
    }
}

/// Distinct platform links in a message, in order of appearance
fn preview_links(text: &str) -> Vec<PlatformLink> {
    resolver::links_in(text)
        .iter()
        .filter_map(|url| resolver::classify(url))
        .unique()
        .take(MAX_EMBEDS)
        .collect()
}

/// Links without a preview image are skipped, a bare placeholder adds nothing to the chat
async fn preview_embed(link: PlatformLink, verify: bool) -> Option<CreateEmbed> {
    let image = link.preview_url()?;
    if verify && !probe_image(&image).await {
        return None;
    }

    let mut e = CreateEmbed::default();
    e.title(format!("{} preview", link.platform));
    if let Some(player) = link.embed_url() {
        e.url(player);
    }
    e.image(image).color(*EMBED_COLOR);
    Some(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Platform;

    #[test]
    fn test_preview_links() {
        let text = "https://youtu.be/abc, https://www.youtube.com/watch?v=abc and \
                    https://example.com then (https://dribbble.com/shots/12-x)";
        let links = preview_links(text);
        assert_eq!(2, links.len());
        assert_eq!(Platform::YouTube, links[0].platform);
        assert_eq!("abc", &*links[0].id);
        assert_eq!(Platform::Dribbble, links[1].platform);
        assert_eq!("12", &*links[1].id);
    }

    #[test]
    fn test_preview_links_capped() {
        let text = (0..15)
            .map(|i| format!("https://dribbble.com/shots/{i}"))
            .join(" ");
        let links = preview_links(&text);
        assert_eq!(MAX_EMBEDS, links.len());
        assert_eq!("0", &*links[0].id);
        assert_eq!("9", &*links[MAX_EMBEDS - 1].id);
    }

    #[tokio::test]
    async fn test_preview_embed() {
        let instagram = resolver::classify("https://www.instagram.com/p/abc/").unwrap();
        assert!(preview_embed(instagram, false).await.is_none());

        let video = resolver::classify("https://youtu.be/dQw4w9WgXcQ").unwrap();
        let e = preview_embed(video, false).await.unwrap();
        assert_eq!(
            Some(&serde_json::json!("https://www.youtube.com/embed/dQw4w9WgXcQ")),
            e.0.get("url")
        );
        assert_eq!(
            Some(&serde_json::json!("YouTube preview")),
            e.0.get("title")
        );
    }
}
