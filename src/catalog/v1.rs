//! Version 1: the earth theme and two-handed swords.

use super::{text, theme, CatalogDelta, CategoryDelta, Element};
use crate::core::condition::Condition;
use crate::core::version::{Field, Modification};
use crate::schema::power::{ActivePower, ActivePowerPatch, Cost, Damage, PassivePower};
use crate::schema::rarity::Rarity;
use crate::schema::theme::Theme;
use crate::schema::weapon::{Descriptor, EnergyCore, Material, PartSlot, Shape};

pub fn delta() -> CatalogDelta {
    let earth = || Condition::always().themes_any([Theme::Earth]);
    CatalogDelta {
        themes: CategoryDelta::new().add(theme(Theme::Earth)),
        shapes: CategoryDelta::new().add(Element::new(
            "shape.greatsword",
            Shape {
                name: "greatsword".to_string(),
                parts: vec![
                    PartSlot::hard("blade"),
                    PartSlot::hard("crossguard"),
                    PartSlot::grip("grip"),
                ],
                damage: Damage::dice(2, 6),
            },
        )),
        hard_materials: CategoryDelta::new()
            .add(
                Element::new(
                    "material.granite",
                    Material::new("granite").with(Descriptor::property("heavier than it looks")),
                )
                .when(earth()),
            )
            .add(
                Element::new(
                    "material.geode",
                    Material::new("split geode").with(Descriptor::possession("glittering crystals inside")),
                )
                .when(earth().rarity_gte(Rarity::Uncommon)),
            ),
        grip_materials: CategoryDelta::new()
            .add(Element::new("grip.clay", Material::new("fired clay")).when(earth())),
        embellishments: CategoryDelta::new().add(
            Element::new("embellish.moss-stones", Descriptor::possession("pebbles set into it"))
                .when(earth()),
        ),
        energy_cores: CategoryDelta::new().add(
            Element::new(
                "core.magma",
                EnergyCore {
                    name: "magma".to_string(),
                    colour: "a deep red".to_string(),
                },
            )
            .when(earth()),
        ),
        active_powers: CategoryDelta::new()
            .add(
                Element::new(
                    "active.tremor",
                    ActivePower::new("Knock prone every creature within 10ft.", Cost::Charges(2)),
                )
                .when(earth()),
            )
            .add(
                Element::new(
                    "active.stone-shape",
                    ActivePower::new("Cast Stone Shape.", Cost::Charges(1)),
                )
                .when(earth()),
            )
            .modify(
                "active.invisible",
                Modification::payload(ActivePowerPatch {
                    cost: Field::Set(Cost::Charges(2)),
                    ..Default::default()
                }),
            ),
        passive_powers: CategoryDelta::new()
            .add(
                Element::new(
                    "passive.dowsing",
                    PassivePower::new("The weapon points towards the nearest cave."),
                )
                .when(earth()),
            )
            .add(
                Element::new(
                    "passive.tremorsense",
                    PassivePower::new("You can feel footsteps within 15ft."),
                )
                .when(earth().rarity_gte(Rarity::Uncommon)),
            )
            .add(
                Element::new(
                    "passive.stone-skin",
                    PassivePower::new("You have resistance to bludgeoning damage."),
                )
                .when(earth().rarity_gte(Rarity::Epic)),
            )
            .remove("passive.disarm"),
        languages: CategoryDelta::new().add(text("language.terran", "Terran")),
        recharge_methods: CategoryDelta::new().add(
            text("recharge.buried", "when buried overnight")
                .when(earth()),
        ),
        ..CatalogDelta::default()
    }
}
