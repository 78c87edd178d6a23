use std::sync::Mutex;

use crate::cache::LruCache;
use crate::clients::{compendium::CompendiumClient, pokemontcg::TcgClient};
use crate::config::CONFIG;
use crate::util::Reply;

// Cached card detail replies, keyed by the raw (name, set text) arguments.
pub const SHOW_CACHE_CAPACITY: usize = 1024;

pub type ShowKey = (String, String);

// Shared state
#[derive(Debug)]
pub struct Data {
    pub tcg: TcgClient,
    pub compendium: CompendiumClient,
    pub show_cache: Mutex<LruCache<ShowKey, Reply>>,
}

impl Data {
    pub fn new() -> Self {
        Self {
            tcg: TcgClient::new(CONFIG.secrets.tcg_api_key.clone()),
            compendium: CompendiumClient::new(),
            show_cache: Mutex::new(LruCache::new(SHOW_CACHE_CAPACITY)),
        }
    }
}
