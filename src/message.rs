use std::fmt::Display;
use std::sync::LazyLock;

use poise::{async_trait, serenity_prelude as serenity, CreateReply, ReplyHandle};
use serenity::builder::CreateEmbed;
use serenity::Color;

use crate::PoiseContext;

pub static EMBED_COLOR: LazyLock<Color> = LazyLock::new(|| Color::from_rgb(0x8b, 0x5c, 0xf6));
pub static EMBED_ERROR_COLOR: LazyLock<Color> = LazyLock::new(|| Color::from_rgb(0x8a, 0x2a, 0x2b));

pub enum SendMessage<T>
where
    T: Display,
{
    Normal(T),
    Error(T),
}

/// Embed built by the caller
pub struct CustomSendMessage<'a>(Box<dyn FnOnce(&mut CreateEmbed) + Send + Sync + 'a>);

impl<'a> CustomSendMessage<'a> {
    pub fn new(build: impl FnOnce(&mut CreateEmbed) + Send + Sync + 'a) -> Self {
        Self(Box::new(build))
    }
}

#[async_trait]
pub trait SendableMessage {
    /// Send a reply to a command
    async fn send_msg(self, ctx: PoiseContext<'_>) -> Result<ReplyHandle<'_>, serenity::Error>
    where
        Self: Sized + Send,
    {
        ctx.send(|m| self.build_message(m)).await
    }

    fn build_message<'b, 'c>(self, m: &'b mut CreateReply<'c>) -> &'b mut CreateReply<'c>
    where
        Self: Sized,
    {
        // Errors are only shown to the user who caused them
        m.ephemeral(self.is_ephemeral());
        m.embed(|e| self.build_embed(e))
    }

    fn build_embed(self, e: &mut CreateEmbed) -> &mut CreateEmbed;
    fn is_ephemeral(&self) -> bool;
}

impl<T> SendableMessage for SendMessage<T>
where
    T: Display,
{
    fn build_embed(self, e: &mut CreateEmbed) -> &mut CreateEmbed {
        match self {
            Self::Normal(s) => {
                let s = to_string_or_default(s);
                e.description(s);
                e.color(*EMBED_COLOR);
            }
            Self::Error(s) => {
                e.title("Error");
                e.description(capitalise(to_string_or_default(s)));
                e.color(*EMBED_ERROR_COLOR);
            }
        }
        e
    }

    fn is_ephemeral(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl<'a> SendableMessage for CustomSendMessage<'a> {
    fn build_embed(self, e: &mut CreateEmbed) -> &mut CreateEmbed {
        (self.0)(e);
        e.color(*EMBED_COLOR);
        e
    }

    fn is_ephemeral(&self) -> bool {
        false
    }
}

fn capitalise(mut s: String) -> String {
    if let Some(c) = s.get_mut(0..1) {
        c.make_ascii_uppercase();
    }
    s
}

fn to_string_or_default(val: impl Display) -> String {
    let s = val.to_string();
    if s.is_empty() {
        String::from("no description")
    } else {
        s
    }
}
