pub mod feature;
pub mod power;
pub mod rarity;
pub mod sentience;
pub mod theme;
pub mod weapon;
