use poise::serenity_prelude as serenity;
use serenity::builder::CreateEmbed;

use super::{
    filter, profile_url, store, tweet_intent_url, NewProject, Project, ProjectForm, ProjectType, Tab,
};
use crate::message::{CustomSendMessage, SendMessage, SendableMessage};
use crate::preview::{self, Preview};
use crate::{Data, Error, PoiseContext};

/// Discord caps embeds at 25 fields
const MAX_LISTED: usize = 25;

/// Manage your showcase
#[poise::command(
    slash_command,
    prefix_command,
    subcommands("add", "list", "view", "remove")
)]
pub async fn project(_ctx: PoiseContext<'_>) -> Result<(), Error> {
    Ok(())
}

/// Add a project to your showcase
#[poise::command(slash_command)]
pub async fn add(
    ctx: PoiseContext<'_>,
    #[description = "Project title"] title: String,
    #[description = "Link to the project"] url: String,
    #[description = "Website, Figma design or something else"] kind: Option<ProjectType>,
    #[description = "Short description"] description: Option<String>,
    #[description = "Link to the source code or design file"] code_url: Option<String>,
    #[description = "Technologies used, comma separated"] tags: Option<String>,
    #[description = "Link to a cover image"] image_url: Option<String>,
) -> Result<(), Error> {
    let new_project = NewProject::parse(ProjectForm {
        title: &title,
        description: description.as_deref(),
        kind,
        url: &url,
        code_url: code_url.as_deref(),
        image_url: image_url.as_deref(),
        tags: tags.as_deref(),
    })?;
    let project = store::insert(&ctx.data().db, ctx.author().id.0, new_project).await?;
    send_project(ctx, project, "Project added").await
}

/// List your projects
#[poise::command(slash_command, prefix_command)]
pub async fn list(
    ctx: PoiseContext<'_>,
    #[description = "Only show one kind of project"] tab: Option<Tab>,
    #[description = "Search titles, descriptions and technologies"]
    #[rest]
    search: Option<String>,
) -> Result<(), Error> {
    let author = ctx.author();
    let projects = store::list_by_owner(&ctx.data().db, author.id.0).await?;
    let shown = filter(&projects, tab.unwrap_or_default(), search.as_deref().unwrap_or(""));
    let title = format!("{}'s projects", author.name);
    let url = profile_url(&ctx.data().config.site_url, author.id.0);
    let fields = list_fields(&shown);
    let hidden = shown.len().saturating_sub(MAX_LISTED);

    CustomSendMessage::new(move |e| {
        e.title(title).url(url);
        list_embed(e, fields, hidden);
    })
    .send_msg(ctx)
    .await?;
    Ok(())
}

/// Show a single project
#[poise::command(slash_command, prefix_command)]
pub async fn view(
    ctx: PoiseContext<'_>,
    #[description = "Project number"] id: i64,
) -> Result<(), Error> {
    let project = store::find(&ctx.data().db, id).await?;
    send_project(ctx, project, "").await
}

/// Remove one of your projects
#[poise::command(slash_command, prefix_command)]
pub async fn remove(
    ctx: PoiseContext<'_>,
    #[description = "Project number"] id: i64,
) -> Result<(), Error> {
    let project = store::delete_owned(&ctx.data().db, ctx.author().id.0, id).await?;
    SendMessage::Normal(format!("Removed **{}**", project.title))
        .send_msg(ctx)
        .await?;
    Ok(())
}

/// Show someone's public showcase and its shareable link
#[poise::command(slash_command, prefix_command)]
pub async fn profile(
    ctx: PoiseContext<'_>,
    #[description = "Whose profile, defaults to yours"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let user = user.as_ref().unwrap_or_else(|| ctx.author());
    let projects = store::list_by_owner(&ctx.data().db, user.id.0).await?;
    let shown: Vec<&Project> = projects.iter().collect();
    let title = format!("{}'s showcase", user.name);
    let url = profile_url(&ctx.data().config.site_url, user.id.0);
    let avatar = user.face();
    let fields = list_fields(&shown);
    let hidden = shown.len().saturating_sub(MAX_LISTED);

    CustomSendMessage::new(move |e| {
        e.title(title).url(&url).thumbnail(avatar);
        e.description(format!("Share this profile: {url}"));
        list_embed(e, fields, hidden);
    })
    .send_msg(ctx)
    .await?;
    Ok(())
}

async fn send_project(ctx: PoiseContext<'_>, project: Project, footer: &str) -> Result<(), Error> {
    let preview = preview_for(ctx.data(), &project).await;
    let placeholder = ctx.data().config.placeholder();
    let footer = match footer {
        "" => format!("Project #{}", project.id),
        s => format!("{s} · Project #{}", project.id),
    };

    CustomSendMessage::new(move |e| {
        project_embed(e, &project, &preview, &placeholder);
        e.footer(|f| f.text(footer));
    })
    .send_msg(ctx)
    .await?;
    Ok(())
}

async fn preview_for(data: &Data, project: &Project) -> Preview {
    if data.config.verify_thumbnails {
        preview::resolve_checked(project).await
    } else {
        preview::resolve(project)
    }
}

fn project_embed<'e>(
    e: &'e mut CreateEmbed,
    project: &Project,
    preview: &Preview,
    placeholder: &str,
) -> &'e mut CreateEmbed {
    e.title(&project.title).url(&project.url);
    if !project.description.is_empty() {
        e.description(&project.description);
    }
    e.field("Type", project.kind.as_str(), true);
    e.field("Added", format!("<t:{}:D>", project.created_at.unix_timestamp()), true);
    if let Some(code_url) = &project.code_url {
        e.field("Code / file", code_url, true);
    }
    if !project.tags.is_empty() {
        e.field("Technologies", project.tags.join(", "), false);
    }
    if let Preview::Frame { url, .. } = preview {
        if **url != *project.url {
            e.field("Watch", url, false);
        }
    }
    let tweet = tweet_intent_url(project);
    if tweet.len() < 1000 {
        e.field("Share", format!("[Post on X]({tweet})"), true);
    }
    e.image(preview.image_or(placeholder))
}

/// Name and value of one embed field per project
fn list_fields(projects: &[&Project]) -> Vec<(String, String)> {
    projects
        .iter()
        .take(MAX_LISTED)
        .map(|p| {
            let mut value = format!(
                "{} · {} · <t:{}:R>",
                p.kind.as_str(),
                p.url,
                p.created_at.unix_timestamp()
            );
            if !p.tags.is_empty() {
                value.push_str(&format!("\n{}", p.tags.join(", ")));
            }
            (format!("#{} {}", p.id, p.title), value)
        })
        .collect()
}

fn list_embed(e: &mut CreateEmbed, fields: Vec<(String, String)>, hidden: usize) {
    if fields.is_empty() {
        e.field("No projects added yet", "Use `/project add` to add one", false);
        return;
    }
    e.fields(fields.into_iter().map(|(name, value)| (name, value, false)));
    if hidden > 0 {
        e.footer(|f| f.text(format!("and {hidden} more")));
    }
}
