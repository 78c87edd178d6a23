pub mod compendium;
pub mod pokemontcg;
