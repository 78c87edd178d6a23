use poise::{serenity_prelude as serenity, CreateReply};

use crate::{Context, Result};

// Discord rejects messages above 2000 characters.
const MAX_PAGE_LENGTH: usize = 2000;

/// A formatted command reply: either plain text (possibly spanning several
/// messages) or a single rich embed.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Embed(serenity::CreateEmbed),
}

/// Splits `text` into message-sized pages, preferring line boundaries.
pub fn pagify(text: &str) -> Vec<String> {
    let mut pages = vec![];
    let mut page = String::new();

    for line in text.split_inclusive('\n') {
        if page.len() + line.len() > MAX_PAGE_LENGTH && !page.is_empty() {
            pages.push(std::mem::take(&mut page));
        }

        // A single oversized line is hard-split.
        let mut rest = line;
        while rest.len() > MAX_PAGE_LENGTH {
            let mut split = MAX_PAGE_LENGTH;
            while !rest.is_char_boundary(split) {
                split -= 1;
            }
            let (head, tail) = rest.split_at(split);
            pages.push(head.to_string());
            rest = tail;
        }
        page.push_str(rest);
    }

    if !page.is_empty() {
        pages.push(page);
    }
    pages
}

/// Sends a reply to the invoking channel. Empty text sends nothing.
pub async fn send_reply(ctx: Context<'_>, reply: &Reply) -> Result<()> {
    match reply {
        Reply::Embed(embed) => {
            ctx.send(CreateReply::default().embed(embed.clone())).await?;
        }
        Reply::Text(text) => {
            for page in pagify(text) {
                ctx.say(page).await?;
            }
        }
    }
    Ok(())
}

/// Sends a reply to the invoking user's DMs instead of the channel.
pub async fn send_private(ctx: Context<'_>, reply: &Reply) -> Result<()> {
    let author = ctx.author();
    match reply {
        Reply::Embed(embed) => {
            author
                .dm(
                    ctx.serenity_context(),
                    serenity::CreateMessage::new().embed(embed.clone()),
                )
                .await?;
        }
        Reply::Text(text) => {
            for page in pagify(text) {
                author
                    .dm(
                        ctx.serenity_context(),
                        serenity::CreateMessage::new().content(page),
                    )
                    .await?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_produces_no_pages() {
        assert!(pagify("").is_empty());
    }

    #[test]
    fn short_text_is_one_page() {
        assert_eq!(pagify("hello\nworld"), vec!["hello\nworld"]);
    }

    #[test]
    fn long_text_splits_on_line_boundaries() {
        let line = "x".repeat(600);
        let text = format!("{line}\n{line}\n{line}\n{line}");
        let pages = pagify(&text);

        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|page| page.len() <= MAX_PAGE_LENGTH));
        assert_eq!(pages.concat(), text);
    }

    #[test]
    fn oversized_single_line_is_hard_split() {
        let text = "y".repeat(MAX_PAGE_LENGTH * 2 + 10);
        let pages = pagify(&text);

        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|page| page.len() <= MAX_PAGE_LENGTH));
        assert_eq!(pages.concat(), text);
    }
}
