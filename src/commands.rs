use itertools::Itertools;
use poise::serenity_prelude as serenity;
use time::OffsetDateTime;

use crate::contribution::{self, ContributionGraph};
use crate::error::ShowcaseError;
use crate::message::{CustomSendMessage, SendMessage, SendableMessage};
use crate::presence::online_label;
use crate::preview::probe_image;
use crate::project::store;
use crate::resolver;
use crate::{Error, PoiseContext};

/// Show which platform a link belongs to and the preview it gets
#[poise::command(slash_command, prefix_command)]
pub async fn preview(
    ctx: PoiseContext<'_>,
    #[description = "Any link"] url: String,
) -> Result<(), Error> {
    let placeholder = ctx.data().config.placeholder();
    let Some(link) = resolver::classify(&url) else {
        CustomSendMessage::new(move |e| {
            e.title("Unrecognised link");
            e.description("No preview can be derived, the placeholder will be shown");
            e.image(placeholder);
        })
        .send_msg(ctx)
        .await?;
        return Ok(());
    };

    let mut image = link.preview_url();
    if let Some(url) = &image {
        if ctx.data().config.verify_thumbnails && !probe_image(url).await {
            image = None;
        }
    }
    let player = link.embed_url();

    CustomSendMessage::new(move |e| {
        e.title(format!("{} link", link.platform));
        e.field("Identifier", format!("`{}`", link.id), true);
        if let Some(player) = &player {
            e.field("Player", player, false);
        }
        e.image(image.as_deref().unwrap_or(&placeholder));
    })
    .send_msg(ctx)
    .await?;
    Ok(())
}

/// Calendar of projects added per day
#[poise::command(slash_command, prefix_command)]
pub async fn contributions(
    ctx: PoiseContext<'_>,
    #[description = "Year, defaults to this one"] year: Option<i32>,
    #[description = "Whose contributions, defaults to yours"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let user = user.as_ref().unwrap_or_else(|| ctx.author());
    let today = OffsetDateTime::now_utc().date();
    let year = year.unwrap_or(today.year());
    if !(1970..=today.year()).contains(&year) {
        return Err(ShowcaseError::BadYear(year).into());
    }

    let projects = store::list_by_owner(&ctx.data().db, user.id.0).await?;
    let graph = ContributionGraph::new(year, today, &projects);
    let years = contribution::years(&projects, today).iter().join(", ");
    let title = format!("{}'s contributions in {year}", user.name);

    CustomSendMessage::new(move |e| {
        e.title(title);
        e.description(graph.render());
        e.footer(|f| f.text(format!("Years with projects: {years}")));
    })
    .send_msg(ctx)
    .await?;
    Ok(())
}

/// How many developers are online
#[poise::command(slash_command, prefix_command)]
pub async fn online(ctx: PoiseContext<'_>) -> Result<(), Error> {
    let count = ctx.data().presence.count().await;
    SendMessage::Normal(online_label(count))
        .send_msg(ctx)
        .await?;
    Ok(())
}
