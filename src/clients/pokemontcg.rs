use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

const TCG_API: &str = "https://api.pokemontcg.io/v2";

#[derive(Debug, Deserialize)]
struct TcgResponse<T> {
    data: Option<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    pub supertype: String,
    #[serde(default)]
    pub subtypes: Vec<String>,
    pub hp: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    pub evolves_from: Option<String>,
    pub ancient_trait: Option<AncientTrait>,
    pub abilities: Option<Vec<Ability>>,
    pub attacks: Option<Vec<Attack>>,
    pub weaknesses: Option<Vec<TypeValue>>,
    pub resistances: Option<Vec<TypeValue>>,
    pub retreat_cost: Option<Vec<String>>,
    pub number: String,
    pub rarity: Option<String>,
    pub rules: Option<Vec<String>>,
    pub images: CardImages,
    pub set: CardSet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AncientTrait {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ability {
    pub name: String,
    pub text: String,
    #[serde(rename = "type")]
    pub ability_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Attack {
    #[serde(default)]
    pub cost: Vec<String>,
    pub name: String,
    #[serde(default)]
    pub damage: String,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeValue {
    #[serde(rename = "type")]
    pub energy_type: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardImages {
    pub small: String,
    pub large: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSet {
    pub id: String,
    pub name: String,
    pub series: String,
    pub printed_total: u32,
    pub legalities: Legalities,
    pub images: SetImages,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Legalities {
    pub standard: Option<String>,
    pub expanded: Option<String>,
    pub unlimited: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetImages {
    pub symbol: String,
    pub logo: String,
}

/// Client for the pokemontcg.io v2 card catalog.
///
/// The catalog occasionally answers wide searches with HTTP 500; that and any
/// other non-success status are reported as "no results" rather than errors,
/// so only transport and decoding failures propagate.
#[derive(Debug)]
pub struct TcgClient {
    client: Client,
    api_key: String,
}

impl TcgClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    /// Searches cards with a v2 query expression such as `name:"pikachu"`.
    pub async fn search_cards(&self, query: &str, order_by: Option<&str>) -> Result<Vec<Card>> {
        let mut url = format!("{}/cards?q={}", TCG_API, urlencoding::encode(query));
        if let Some(order) = order_by {
            url.push_str("&orderBy=");
            url.push_str(order);
        }

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), query, "card search failed, treating as no results");
            return Ok(vec![]);
        }

        let response: TcgResponse<Vec<Card>> = response.json().await?;
        Ok(response.data.unwrap_or_default())
    }

    /// Fetches a single card by its catalog id, e.g. `xy11-91`.
    pub async fn find_card(&self, id: &str) -> Result<Option<Card>> {
        let url = format!("{}/cards/{}", TCG_API, urlencoding::encode(id));
        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let response: TcgResponse<Card> = response.json().await?;
        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POKEMON_FIXTURE: &str = r#"{
        "id": "xy7-54",
        "name": "Hydreigon-EX",
        "supertype": "Pokémon",
        "subtypes": ["Basic", "EX"],
        "hp": "170",
        "types": ["Darkness"],
        "attacks": [
            {
                "name": "Crazy Headbutt",
                "cost": ["Darkness", "Colorless", "Colorless"],
                "convertedEnergyCost": 3,
                "damage": "60",
                "text": ""
            }
        ],
        "weaknesses": [{"type": "Fighting", "value": "×2"}],
        "resistances": [{"type": "Psychic", "value": "-20"}],
        "retreatCost": ["Colorless", "Colorless", "Colorless"],
        "number": "54",
        "rarity": "Rare Holo EX",
        "rules": ["When a Pokémon-EX has been Knocked Out, your opponent takes 2 Prize cards."],
        "images": {
            "small": "https://images.pokemontcg.io/xy7/54.png",
            "large": "https://images.pokemontcg.io/xy7/54_hires.png"
        },
        "set": {
            "id": "xy7",
            "name": "Ancient Origins",
            "series": "XY",
            "printedTotal": 98,
            "total": 100,
            "legalities": {"unlimited": "Legal", "expanded": "Legal"},
            "releaseDate": "2015/08/12",
            "images": {
                "symbol": "https://images.pokemontcg.io/xy7/symbol.png",
                "logo": "https://images.pokemontcg.io/xy7/logo.png"
            }
        }
    }"#;

    #[test]
    fn parses_pokemon_card() {
        let card: Card = serde_json::from_str(POKEMON_FIXTURE).unwrap();
        assert_eq!(card.name, "Hydreigon-EX");
        assert_eq!(card.hp.as_deref(), Some("170"));
        assert_eq!(card.types, vec!["Darkness"]);
        assert_eq!(card.retreat_cost.as_ref().map(Vec::len), Some(3));
        assert_eq!(card.set.printed_total, 98);
        assert_eq!(card.set.legalities.standard, None);
        assert_eq!(card.set.legalities.expanded.as_deref(), Some("Legal"));

        let attacks = card.attacks.unwrap();
        assert_eq!(attacks[0].damage, "60");
        assert_eq!(attacks[0].cost.len(), 3);
    }

    #[test]
    fn parses_trainer_card_without_combat_fields() {
        let card: Card = serde_json::from_str(
            r#"{
                "id": "sm9-143",
                "name": "Ingo & Emmet",
                "supertype": "Trainer",
                "subtypes": ["Supporter"],
                "rules": ["Discard your hand and draw 4 cards."],
                "number": "143",
                "images": {"small": "s.png", "large": "l.png"},
                "set": {
                    "id": "sm9",
                    "name": "Team Up",
                    "series": "Sun & Moon",
                    "printedTotal": 181,
                    "legalities": {"unlimited": "Legal"},
                    "images": {"symbol": "sym.png", "logo": "logo.png"}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(card.supertype, "Trainer");
        assert!(card.types.is_empty());
        assert!(card.attacks.is_none());
        assert_eq!(card.rules.unwrap().len(), 1);
    }

    #[test]
    fn search_envelope_tolerates_null_data() {
        let page: TcgResponse<Vec<Card>> = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(page.data.is_none());
    }
}
