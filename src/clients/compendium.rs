use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

const COMPENDIUM_API: &str = "https://compendium.pokegym.net/wp-json/relevanssi/v1/search";

// Read-only search credentials published with the compendium cog.
const COMPENDIUM_AUTH: &str = "Basic Um90b21QaG9uZTpYc2xOIHBXa1YgTFVnciAxdHNGIHBkM08gTHNvMw==";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/97.0.4692.99 Safari/537.36";

pub const COMPENDIUM_ICON: &str =
    "https://compendium.pokegym.net/wp-content/uploads/2021/08/cropped-cpdm_ball-32x32.png";

#[derive(Debug, Clone, Deserialize)]
pub struct Ruling {
    pub link: String,
    pub meta: RulingMeta,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RulingMeta {
    pub question: String,
    // The endpoint has used both field names for the answer text over time.
    pub ruling: Option<String>,
    pub answer: Option<String>,
    #[serde(default)]
    pub source: Sources,
}

impl RulingMeta {
    pub fn answer(&self) -> &str {
        self.ruling
            .as_deref()
            .or(self.answer.as_deref())
            .unwrap_or("")
    }
}

/// The `source` field is a bare string on some rulings and a list on others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Sources {
    One(String),
    Many(Vec<String>),
}

impl Default for Sources {
    fn default() -> Self {
        Sources::One(String::new())
    }
}

impl Sources {
    pub fn first(&self) -> &str {
        match self {
            Sources::One(source) => source,
            Sources::Many(sources) => sources.first().map(String::as_str).unwrap_or(""),
        }
    }
}

// Successful searches answer with a JSON array; errors answer with a
// WordPress error object. Anything that is not a non-empty array of rulings
// counts as zero results.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SearchBody {
    Rulings(Vec<Ruling>),
    Other(serde_json::Value),
}

/// Client for the PokéGym Compendium ruling search.
#[derive(Debug)]
pub struct CompendiumClient {
    client: Client,
}

impl Default for CompendiumClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CompendiumClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// The public search page for a keyword, used as the link target on
    /// multi-ruling replies.
    pub fn search_url(text: &str) -> String {
        format!("{}?keyword={}&type=ruling", COMPENDIUM_API, keyword(text))
    }

    pub async fn search_rulings(&self, text: &str) -> Result<Vec<Ruling>> {
        let url = Self::search_url(text);
        let response = self
            .client
            .get(&url)
            .header("Authorization", COMPENDIUM_AUTH)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "ruling search failed, treating as no results");
            return Ok(vec![]);
        }

        match response.json::<SearchBody>().await? {
            SearchBody::Rulings(rulings) => Ok(rulings),
            SearchBody::Other(_) => Ok(vec![]),
        }
    }
}

// Relevanssi expects +-separated keywords rather than %20 escapes.
fn keyword(text: &str) -> String {
    urlencoding::encode(text).replace("%20", "+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_plus_separated() {
        assert_eq!(keyword("Abyssal Gate"), "Abyssal+Gate");
        assert_eq!(keyword("Recycle Energy Spectral Breach"), "Recycle+Energy+Spectral+Breach");
    }

    #[test]
    fn parses_ruling_with_string_source() {
        let ruling: Ruling = serde_json::from_str(
            r#"{
                "link": "https://compendium.pokegym.net/ruling/1234/",
                "meta": {
                    "question": "Can I retreat twice?",
                    "ruling": "No, once per turn.",
                    "source": "Pokémon Organized Play"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(ruling.meta.answer(), "No, once per turn.");
        assert_eq!(ruling.meta.source.first(), "Pokémon Organized Play");
    }

    #[test]
    fn parses_ruling_with_answer_alias_and_source_list() {
        let ruling: Ruling = serde_json::from_str(
            r#"{
                "link": "https://compendium.pokegym.net/ruling/5678/",
                "meta": {
                    "question": "Does Abyssal Gate stack?",
                    "answer": "Yes.",
                    "source": ["Rules Team", "2021-08-01"]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(ruling.meta.answer(), "Yes.");
        assert_eq!(ruling.meta.source.first(), "Rules Team");
    }

    #[test]
    fn error_object_body_counts_as_empty() {
        let body: SearchBody =
            serde_json::from_str(r#"{"code": "rest_no_route", "data": {"status": 500}}"#).unwrap();
        assert!(matches!(body, SearchBody::Other(_)));
    }
}
