//! Version 2: the light theme, more voices for sentient weapons.

use super::{text, theme, CatalogDelta, CategoryDelta, Element};
use crate::core::condition::Condition;
use crate::core::version::{Field, Modification};
use crate::schema::feature::ids;
use crate::schema::power::{
    ActivePower, ActivePowerPatch, Cost, Damage, PassivePower, PassivePowerPatch,
};
use crate::schema::rarity::Rarity;
use crate::schema::theme::Theme;
use crate::schema::weapon::{Descriptor, EnergyCore, Material};

pub fn delta() -> CatalogDelta {
    let light = || Condition::always().themes_any([Theme::Light]);
    CatalogDelta {
        // Light and dark weapons don't mix.
        themes: CategoryDelta::new()
            .add(theme(Theme::Light).when(Condition::always().themes_none([Theme::Dark])))
            .modify(
                "theme.dark",
                Modification::condition(Condition::always().themes_none([Theme::Light])),
            ),
        hard_materials: CategoryDelta::new().add(
            Element::new(
                "material.silver",
                Material::new("silver").with(Descriptor::property("never tarnished")),
            )
            .when(light()),
        ),
        grip_materials: CategoryDelta::new()
            .add(Element::new("grip.white-leather", Material::new("white leather")).when(light())),
        embellishments: CategoryDelta::new().add(
            Element::new("embellish.halo", Descriptor::possession("a faint halo"))
                .when(light().rarity_gte(Rarity::Rare)),
        ),
        energy_cores: CategoryDelta::new().add(
            Element::new(
                "core.sunstone",
                EnergyCore {
                    name: "sunstone".to_string(),
                    colour: "gold".to_string(),
                },
            )
            .when(light()),
        ),
        active_powers: CategoryDelta::new()
            .add(
                Element::new(
                    "active.daylight",
                    ActivePower::new("Cast Daylight.", Cost::Charges(3)),
                )
                .when(light().rarity_gte(Rarity::Rare)),
            )
            .add(
                Element::new(
                    "active.blinding-flash",
                    ActivePower::new("Blind a creature you hit until the end of its next turn.", Cost::Charges(1)),
                )
                .when(light()),
            )
            .modify(
                "active.fireball",
                Modification::payload(ActivePowerPatch {
                    notes: Field::Clear,
                    ..Default::default()
                }),
            ),
        passive_powers: CategoryDelta::new()
            .add(
                Element::new(
                    "passive.sun-warmth",
                    PassivePower::new("The weapon feels like sunlight on your skin."),
                )
                .when(light()),
            )
            .add(
                Element::new(
                    "passive.radiant",
                    PassivePower::new("Deals an extra 1d4 radiant damage.")
                        .with_damage(Damage::dice(1, 4)),
                )
                .when(light().rarity_gte(Rarity::Uncommon).ids_none(ids(["passive.necrotic"]))),
            )
            .add(
                Element::new(
                    "passive.undead-sense",
                    PassivePower::new("The weapon glows when undead are within 60ft."),
                )
                .when(light().rarity_gte(Rarity::Uncommon)),
            )
            .modify(
                "passive.plus-one",
                Modification::payload(PassivePowerPatch {
                    desc: Field::Set("+1 to attack and damage rolls with this weapon.".to_string()),
                    ..Default::default()
                }),
            ),
        languages: [
            ("language.celestial", "Celestial"),
            ("language.primordial", "Primordial"),
            ("language.goblin", "Goblin"),
        ]
        .into_iter()
        .fold(CategoryDelta::new(), |d, (id, name)| d.add(text(id, name))),
        personalities: [
            ("personality.pious", "pious"),
            ("personality.sarcastic", "sarcastic"),
            ("personality.forgetful", "forgetful"),
        ]
        .into_iter()
        .fold(CategoryDelta::new(), |d, (id, name)| d.add(text(id, name))),
        recharge_methods: CategoryDelta::new()
            .add(text("recharge.sunrise", "at sunrise").when(light())),
        ..CatalogDelta::default()
    }
}
