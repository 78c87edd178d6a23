//! Fixed lookup tables for rendering card energy types.

use poise::serenity_prelude as serenity;

/// Custom server emoji for an energy type.
pub fn type_emoji(energy: &str) -> &'static str {
    match energy {
        "Colorless" => "<:ecolorless:543156672219054100>",
        "Darkness" => "<:edarkness:543156641772732438>",
        "Dragon" => "<:edragon:543156672059670541>",
        "Fairy" => "<:efairy:543156671824789504>",
        "Fighting" => "<:efighting:543156617579986995>",
        "Fire" => "<:efire:543156506485587968>",
        "Free" => "<:efree:618879505007902750>",
        "Grass" => "<:egrass:543154867540066307>",
        "Lightning" => "<:elightning:543156557072957441>",
        "Psychic" => "<:epsychic:543156587100110851>",
        "Metal" => "<:emetal:543156671648628768>",
        "Water" => "<:ewater:543156529956651008>",
        _ => "\u{2753}",
    }
}

/// Embed accent colour for an energy type.
pub fn type_color(energy: &str) -> serenity::Color {
    serenity::Colour(match energy {
        "Colorless" => 0xF5F5DA,
        "Darkness" => 0x027798,
        "Dragon" => 0xD1A300,
        "Fairy" => 0xDD4787,
        "Fighting" => 0xC24635,
        "Fire" => 0xD7080C,
        "Grass" => 0x427B18,
        "Lightning" => 0xF9D029,
        "Psychic" => 0xB139B6,
        "Metal" => 0xAFAFAF,
        "Water" => 0x02B2E6,
        _ => 0x99AAB5,
    })
}

/// PokeBeach shorthand for an energy type, used in plain-text card dumps.
pub fn short_energy(energy: &str) -> &'static str {
    match energy {
        "Colorless" => "[C]",
        "Darkness" => "[D]",
        "Fairy" => "[Y]",
        "Fighting" => "[F]",
        "Fire" => "[R]",
        "Free" => "[ ]",
        "Grass" => "[G]",
        "Lightning" => "[L]",
        "Psychic" => "[P]",
        "Metal" => "[M]",
        "Water" => "[W]",
        _ => "[?]",
    }
}
