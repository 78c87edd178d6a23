use poise::serenity_prelude::{CreateEmbed, CreateEmbedFooter};

use crate::clients::compendium::{CompendiumClient, Ruling, COMPENDIUM_ICON};
use crate::state::Data;
use crate::util::{self, Reply};
use crate::{Context, Result};

use super::Cog;

pub fn cog() -> Cog {
    Cog::new(vec![compendium()], "Compendium".to_string())
}

// Maximum number of rulings shown in one embed.
const MAX_RULINGS: usize = 3;

async fn run_compendium(data: &Data, text: &str) -> Result<(Option<Reply>, usize)> {
    let rulings = data.compendium.search_rulings(text).await?;
    let count = rulings.len();
    if count == 0 {
        return Ok((None, 0));
    }

    let embed = if count == 1 {
        single_ruling_embed(text, &rulings[0])
    } else {
        ruling_list_embed(text, &rulings)
    };
    Ok((Some(Reply::Embed(embed)), count))
}

fn single_ruling_embed(text: &str, ruling: &Ruling) -> CreateEmbed {
    CreateEmbed::new()
        .title(title_case(text))
        .url(&ruling.link)
        .field("Question", &ruling.meta.question, true)
        .field("Answer", ruling.meta.answer(), true)
        .footer(CreateEmbedFooter::new(ruling.meta.source.first()).icon_url(COMPENDIUM_ICON))
}

// Oversized result sets are truncated rather than dropped; the command posts
// a refine-your-search notice alongside.
fn ruling_list_embed(text: &str, rulings: &[Ruling]) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(title_case(text))
        .url(CompendiumClient::search_url(text));

    for ruling in rulings.iter().take(MAX_RULINGS) {
        embed = embed.field("Question", &ruling.meta.question, true).field(
            "Answer",
            format!("{} ({})", ruling.meta.answer(), ruling.meta.source.first()),
            true,
        );
    }

    embed.footer(CreateEmbedFooter::new("Compendium Team").icon_url(COMPENDIUM_ICON))
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Returns rulings related to the search terms.
///
/// Examples:
///     !compendium Abyssal Gate
///     !compendium Recycle Energy Spectral Breach
#[poise::command(prefix_command, slash_command)]
async fn compendium(
    ctx: Context<'_>,
    #[description = "Terms to search rulings for"]
    #[rest]
    searchtext: String,
) -> Result<()> {
    if searchtext.trim().is_empty() {
        ctx.say("Search terms are required, for example `Abyssal Gate`.")
            .await?;
        return Ok(());
    }

    let (reply, results) = run_compendium(ctx.data(), &searchtext).await?;

    if results == 0 {
        ctx.say("No results were found, check the terms you're searching.")
            .await?;
        return Ok(());
    }

    if results > MAX_RULINGS {
        ctx.say(format!(
            "{results} rulings matched, showing the first {MAX_RULINGS}. Try using more terms."
        ))
        .await?;
    }
    if let Some(reply) = reply {
        util::send_reply(ctx, &reply).await?;
    }
    Ok(())
}
