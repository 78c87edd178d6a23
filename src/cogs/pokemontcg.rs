use poise::serenity_prelude::{Color, CreateEmbed, CreateEmbedFooter};

use crate::clients::pokemontcg::{Card, Legalities};
use crate::config::CONFIG;
use crate::constants::{short_energy, type_color, type_emoji};
use crate::state::Data;
use crate::util::{self, Reply};
use crate::{Context, Result};

use super::Cog;

pub fn cog() -> Cog {
    Cog::new(vec![card(), show(), text()], "Pokémon TCG".to_string())
}

// The maximum number of lines the bot will post to a public server in one
// message. Anything larger will be private messaged to avoid clutter
const MAX_LINES: usize = 15;

const ZWSP: &str = "\u{200b}";

/// What a raw search string asks us to do, decided before any request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SearchPlan {
    Empty,
    TooBroad,
    Fixed { text: String, count: usize },
    Queries {
        queries: Vec<String>,
        order_by: Option<&'static str>,
    },
}

fn plan_search(name: &str) -> SearchPlan {
    if name.is_empty() {
        return SearchPlan::Empty;
    }

    // Single-letter searches would match half the catalog. "N" is the one
    // legitimate single-letter card, and its printings are known, so answer
    // it from a fixed list instead of the API.
    if name.chars().count() == 1 {
        if name.eq_ignore_ascii_case("n") {
            return SearchPlan::Fixed {
                text: "Matches for search 'N'\n\
                       N - Noble Victories 92/101 (`bw3-92`)\n\
                       N - Noble Victories 101/101 (`bw3-101`)\n\
                       N - Dark Explorers 96/108 (`bw5-96`)\n\
                       N - BW Black Star Promos BW100 (`bwp-BW100`)\n\
                       N - Fates Collide 105/124 (`xy10-105`)\n\
                       N - Fates Collide 105a/124 (`xy10-105a`)\n"
                    .to_string(),
                count: 6,
            };
        }
        return SearchPlan::TooBroad;
    }

    let lower = name.to_lowercase();

    // Users will often enter 'hydreigon ex' when they really mean
    // 'hydreigon-ex'. Simply inserting the dash does not work as it makes
    // Ruby/Sapphire era ex cards unaccessible, so search for both.
    if let Some(base) = lower.strip_suffix(" ex") {
        return SearchPlan::Queries {
            queries: vec![
                format!("name:\"{lower}\""),
                format!("name:\"{base}-ex\""),
            ],
            order_by: None,
        };
    }
    // GX cards do not have the same issue, so the dash can go straight in.
    if let Some(base) = lower.strip_suffix(" gx") {
        return SearchPlan::Queries {
            queries: vec![format!("name:\"{base}-gx\"")],
            order_by: None,
        };
    }
    // Delta species cards are printed with the δ symbol.
    if let Some(base) = lower.strip_suffix(" delta") {
        return SearchPlan::Queries {
            queries: vec![format!("name:\"{base} δ\"")],
            order_by: None,
        };
    }

    SearchPlan::Queries {
        queries: vec![format!("name:\"{name}\"")],
        order_by: Some("set.releaseDate"),
    }
}

/// Searches cards by name. Returns the reply and the number of matches; the
/// caller uses the count to decide between the channel and a DM.
async fn run_search(data: &Data, name: &str) -> Result<(Reply, usize)> {
    let (queries, order_by) = match plan_search(name) {
        SearchPlan::Empty => return Ok((Reply::Text(String::new()), 0)),
        SearchPlan::TooBroad => {
            return Ok((
                Reply::Text("Only one letter was entered! The list will take too long!".to_string()),
                1,
            ))
        }
        SearchPlan::Fixed { text, count } => return Ok((Reply::Text(text), count)),
        SearchPlan::Queries { queries, order_by } => (queries, order_by),
    };

    let mut cards = vec![];
    for query in &queries {
        cards.extend(data.tcg.search_cards(query, order_by).await?);
    }

    if cards.is_empty() {
        return Ok((Reply::Text(format!("No matches for search '{name}'")), 0));
    }

    // A single match skips straight to the show output to save the user a
    // round trip.
    if cards.len() == 1 {
        let card = &cards[0];
        let reply = run_show(data, Some(&card.name), &card.set.id).await?;
        return Ok((reply, 1));
    }

    Ok((Reply::Text(match_listing(name, &cards)), cards.len()))
}

// Listings above MAX_LINES go to the requester's DMs instead of the channel.
fn too_long_for_channel(results: usize) -> bool {
    results > MAX_LINES
}

fn match_listing(name: &str, cards: &[Card]) -> String {
    let mut listing = format!("Matches for search '{name}'\n");
    for card in cards {
        listing.push_str(&format!(
            "{} - {} {}/{} (`{}-{}`)\n",
            card.name,
            card.set.name,
            card.number,
            card.set.printed_total,
            card.set.id,
            card.number,
        ));
    }
    listing
}

/// Resolves `!show`/`!text` arguments to a single card, or to a user-facing
/// message explaining what else is needed.
async fn resolve_card(
    data: &Data,
    name: Option<&str>,
    set_text: &str,
) -> Result<std::result::Result<Card, String>> {
    // A dash means the full card id was given, e.g. `xy11-91`.
    if set_text.contains('-') {
        return Ok(match data.tcg.find_card(set_text).await? {
            Some(card) => Ok(card),
            None => Err(format!("No results for card `{set_text}`")),
        });
    }

    let Some(name) = name.filter(|name| !name.is_empty()) else {
        return Ok(Err(
            "Add the card name after the set code, or use the full card id, \
             for example `xy11-91`"
                .to_string(),
        ));
    };

    let query = format!("name:\"{name}\" set.id:{set_text}");
    let cards = data.tcg.search_cards(&query, None).await?;

    Ok(match cards.len() {
        0 => Err(format!("No results found for '{name}' in set `{set_text}`")),
        1 => Ok(cards.into_iter().next().expect("list has one element")),
        _ => Err(format!(
            "Too many results. Try specifying the card number too, \
             for example `{set_text}-{}`",
            cards[0].number
        )),
    })
}

/// Builds the detail embed for a card, memoized on the raw arguments. The
/// catalog does not change card data mid-session, so every outcome (including
/// not-found messages) is cached.
async fn run_show(data: &Data, name: Option<&str>, set_text: &str) -> Result<Reply> {
    let key = (name.unwrap_or_default().to_string(), set_text.to_string());

    {
        let mut cache = data.show_cache.lock().expect("cache mutex is no longer valid");
        if let Some(reply) = cache.get(&key) {
            return Ok(reply.clone());
        }
    }

    let reply = match resolve_card(data, name, set_text).await? {
        Ok(card) => Reply::Embed(embed_create(&card, CONFIG.default_embed_color)),
        Err(message) => Reply::Text(message),
    };

    data.show_cache
        .lock()
        .expect("cache mutex is no longer valid")
        .insert(key, reply.clone());
    Ok(reply)
}

async fn run_text(data: &Data, name: Option<&str>, set_text: &str) -> Result<Reply> {
    Ok(match resolve_card(data, name, set_text).await? {
        Ok(card) => Reply::Text(card_text(&card)),
        Err(message) => Reply::Text(message),
    })
}

fn embed_create(card: &Card, default_color: Color) -> CreateEmbed {
    let embed = if card.supertype == "Pokémon" {
        pokemon_embed(card)
    } else {
        trainer_embed(card, default_color)
    };

    let mut footer = format!(
        "{} - {}/{}",
        card.set.name, card.number, card.set.printed_total
    );
    if let Some(rarity) = &card.rarity {
        footer.push_str(&format!(" -- {rarity}"));
    }
    footer.push('\n');
    footer.push_str(&legality_marks(&card.set.legalities).join(" - "));

    embed
        .image(&card.images.large)
        .footer(CreateEmbedFooter::new(footer).icon_url(&card.set.images.symbol))
}

fn legality_marks(legalities: &Legalities) -> Vec<String> {
    let formats = [
        (&legalities.standard, "Standard"),
        (&legalities.expanded, "Expanded"),
        (&legalities.unlimited, "Legacy"),
    ];

    let mut marks = vec![];
    for (status, label) in formats {
        match status.as_deref() {
            Some("Legal") => marks.push(format!("\u{2705} ({label})")),
            Some("Banned") => marks.push(format!("\u{274c} ({label})")),
            _ => {}
        }
    }
    marks
}

// Construct an embed from a Pokémon card
fn pokemon_embed(card: &Card) -> CreateEmbed {
    let mut title = card.name.clone();
    if let Some(hp) = &card.hp {
        title.push_str(&format!(" - HP{hp}"));
    }
    if !card.types.is_empty() {
        title.push_str(" - ");
        title.push_str(
            &card
                .types
                .iter()
                .map(|energy| type_emoji(energy))
                .collect::<Vec<_>>()
                .join(" / "),
        );
    }

    let mut description = match card.subtypes.first() {
        Some(subtype) => format!("{subtype} Pokémon"),
        None => "Pokémon".to_string(),
    };
    if let Some(evolves_from) = card.evolves_from.as_deref().filter(|from| !from.is_empty()) {
        description.push_str(&format!(" (Evolves from {evolves_from})"));
    }
    if let Some(extra) = card.subtypes.get(1) {
        description.push_str(&format!("\n{extra}"));
    }

    let color = card
        .types
        .first()
        .map(|energy| type_color(energy))
        .unwrap_or(type_color(""));

    let mut embed = CreateEmbed::new()
        .title(title)
        .color(color)
        .description(description);

    if let Some(ancient_trait) = &card.ancient_trait {
        embed = embed.field(
            format!("Ancient Trait: {}", ancient_trait.name),
            nonempty(&ancient_trait.text),
            true,
        );
    }

    if let Some(abilities) = &card.abilities {
        for ability in abilities {
            embed = embed.field(
                format!("{}: {}", ability.ability_type, ability.name),
                nonempty(&ability.text),
                true,
            );
        }
    }

    if let Some(attacks) = &card.attacks {
        for attack in attacks {
            let mut name = String::new();
            for cost in &attack.cost {
                name.push_str(type_emoji(cost));
            }
            name.push_str(&format!(" {}", attack.name));
            if !attack.damage.is_empty() {
                name.push_str(&format!(" - {}", attack.damage));
            }

            let text = attack
                .text
                .as_deref()
                .filter(|text| !text.is_empty())
                .unwrap_or(ZWSP);
            embed = embed.field(name, text, false);
        }
    }

    // Weakness, resistance, retreat on one line, with any rule-box text
    // underneath.
    let mut name = String::new();
    if let Some(weaknesses) = &card.weaknesses {
        name.push_str("Weakness: ");
        for weakness in weaknesses {
            name.push_str(&format!(
                "{} ({})",
                type_emoji(&weakness.energy_type),
                weakness.value
            ));
        }
    }
    if let Some(resistances) = &card.resistances {
        name.push_str(" - Resistance: ");
        for resistance in resistances {
            name.push_str(&format!(
                "{} ({})",
                type_emoji(&resistance.energy_type),
                resistance.value
            ));
        }
    }
    if let Some(retreat_cost) = &card.retreat_cost {
        name.push_str(" - Retreat: ");
        name.push_str(&type_emoji("Colorless").repeat(retreat_cost.len()));
    }

    let rules = card
        .rules
        .as_deref()
        .map(|rules| rules.join("\n"))
        .unwrap_or_default();

    if !name.is_empty() || !rules.is_empty() {
        embed = embed.field(nonempty(&name), nonempty(&rules), false);
    }

    embed
}

// Construct an embed from a Trainer or Energy card
fn trainer_embed(card: &Card, default_color: Color) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(&card.name)
        .color(default_color)
        .description(format!("{} - {}", card.supertype, card.subtypes.join(", ")));

    if let Some(rules) = &card.rules {
        for rule in rules {
            embed = embed.field(ZWSP, rule, true);
        }
    }

    embed
}

fn nonempty(text: &str) -> &str {
    if text.is_empty() {
        ZWSP
    } else {
        text
    }
}

/// Renders a card as copy-and-pastable plain text inside a code block.
fn card_text(card: &Card) -> String {
    let mut out = String::from("```\n");

    if card.supertype == "Pokémon" {
        out.push_str(&format!("{} - {}", card.name, card.types.join("/")));

        // Some Pokémon have no HP, e.g. the second half of LEGEND cards.
        match &card.hp {
            Some(hp) => out.push_str(&format!(" - HP{hp}\n")),
            None => out.push('\n'),
        }

        match card.subtypes.first() {
            Some(subtype) => out.push_str(&format!("{subtype} Pokemon")),
            None => out.push_str("Pokemon"),
        }
        if let Some(evolves_from) = card.evolves_from.as_deref().filter(|from| !from.is_empty()) {
            out.push_str(&format!(" (Evolves from {evolves_from})"));
        }
        if let Some(extra) = card.subtypes.get(1) {
            out.push_str(&format!("\n{extra}"));
        }
        out.push_str("\n\n");

        if let Some(ancient_trait) = &card.ancient_trait {
            out.push_str(&format!(
                "Ancient Trait: {}\n{}\n\n",
                ancient_trait.name, ancient_trait.text
            ));
        }

        if let Some(abilities) = &card.abilities {
            for ability in abilities {
                out.push_str(&format!(
                    "{}: {}\n{}\n\n",
                    ability.ability_type, ability.name, ability.text
                ));
            }
        }

        if let Some(attacks) = &card.attacks {
            for attack in attacks {
                for cost in &attack.cost {
                    out.push_str(short_energy(cost));
                }
                out.push_str(&format!(" {}", attack.name));
                if attack.damage.is_empty() {
                    out.push('\n');
                } else {
                    out.push_str(&format!(": {} damage\n", attack.damage));
                }
                if let Some(text) = &attack.text {
                    out.push_str(&format!("{text}\n"));
                }
                out.push('\n');
            }
        }

        if let Some(weaknesses) = &card.weaknesses {
            for weakness in weaknesses {
                out.push_str(&format!(
                    "Weakness: {} ({})\n",
                    weakness.energy_type, weakness.value
                ));
            }
        }
        if let Some(resistances) = &card.resistances {
            for resistance in resistances {
                out.push_str(&format!(
                    "Resistance: {} ({})\n",
                    resistance.energy_type, resistance.value
                ));
            }
        }
        if let Some(retreat_cost) = &card.retreat_cost {
            out.push_str(&format!("Retreat: {}", retreat_cost.len()));
        }
        if let Some(rules) = &card.rules {
            out.push_str("\n\n");
            out.push_str(&rules.join("\n"));
        }
    } else {
        out.push_str(&format!("{}\n{}\n\n", card.name, card.subtypes.join(", ")));
        if let Some(rules) = &card.rules {
            out.push_str(&format!("{}\n", rules.join("\n\n")));
        }
    }

    out.push_str(&format!(
        "\n\n{} - {}/{}",
        card.set.name, card.number, card.set.printed_total
    ));
    for mark in legality_marks(&card.set.legalities) {
        out.push(' ');
        out.push_str(&mark);
    }
    out.push_str("```\n");
    out
}

/// Gives a list of all cards matching the search.
///
/// Also displays the set code and name.
///
/// Examples:
///     !card ambipom
///     !card ninja boy
///     !card splash energy
#[poise::command(prefix_command, slash_command)]
async fn card(
    ctx: Context<'_>,
    #[description = "Card name to search for"]
    #[rest]
    card_name: String,
) -> Result<()> {
    let (reply, results) = run_search(ctx.data(), &card_name).await?;

    if too_long_for_channel(results) {
        ctx.say("Results list is too long, messaging instead").await?;
        util::send_private(ctx, &reply).await?;
    } else {
        util::send_reply(ctx, &reply).await?;
    }
    Ok(())
}

/// Displays the text and image of the given card from the given set.
///
/// If you are unsure of the set code, find it using the card command first.
///
/// Examples:
///     !show xy11-91
///     !show xy11 Yveltal
///     !show xy9-113
#[poise::command(prefix_command, slash_command)]
async fn show(
    ctx: Context<'_>,
    #[description = "Set code or full card id"] set_text: String,
    #[description = "Card name"]
    #[rest]
    name: Option<String>,
) -> Result<()> {
    let reply = run_show(ctx.data(), name.as_deref(), &set_text).await?;
    util::send_reply(ctx, &reply).await?;
    Ok(())
}

/// Similar to show, but gives just the card text in a copy-and-pastable format.
///
/// Examples:
///     !text xy11-91
///     !text xy11 Yveltal
///     !text xy9-113
#[poise::command(prefix_command, slash_command)]
async fn text(
    ctx: Context<'_>,
    #[description = "Set code or full card id"] set_text: String,
    #[description = "Card name"]
    #[rest]
    name: Option<String>,
) -> Result<()> {
    let reply = run_text(ctx.data(), name.as_deref(), &set_text).await?;
    util::send_reply(ctx, &reply).await?;
    Ok(())
}
