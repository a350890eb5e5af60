//! Version 3: curved and polearm shapes, small rebalances.

use super::{text, CatalogDelta, CategoryDelta, Element};
use crate::core::condition::Condition;
use crate::core::version::Modification;
use crate::schema::power::{ActivePower, Cost, Damage, PassivePower};
use crate::schema::rarity::Rarity;
use crate::schema::theme::Theme;
use crate::schema::weapon::{Descriptor, PartSlot, Shape};

pub fn delta() -> CatalogDelta {
    CatalogDelta {
        shapes: CategoryDelta::new()
            .add(Element::new(
                "shape.scimitar",
                Shape {
                    name: "scimitar".to_string(),
                    parts: vec![PartSlot::hard("blade"), PartSlot::grip("grip"), PartSlot::hard("pommel")],
                    damage: Damage::dice(1, 6),
                },
            ))
            .add(Element::new(
                "shape.halberd",
                Shape {
                    name: "halberd".to_string(),
                    parts: vec![PartSlot::hard("blade"), PartSlot::hard("spike"), PartSlot::hard("pole")],
                    damage: Damage::dice(1, 10),
                },
            ))
            .modify("shape.sword", Modification::default().and_weight(2)),
        embellishments: CategoryDelta::new().modify(
            "embellish.runes",
            Modification::payload(Descriptor::possession("runes that glow in moonlight")),
        ),
        eye_colours: CategoryDelta::new().add(text("eye.gold", "gold")),
        active_powers: CategoryDelta::new().add(
            Element::new(
                "active.shatter",
                ActivePower::new("Cast Shatter.", Cost::Charges(2)),
            )
            .when(Condition::always().themes_any([Theme::Ice, Theme::Earth])),
        ),
        passive_powers: CategoryDelta::new()
            .add(
                Element::new(
                    "passive.keen",
                    PassivePower::new("Scores a critical hit on a 19 or 20."),
                )
                .when(Condition::always().rarity_gte(Rarity::Rare)),
            )
            .modify(
                "passive.returning",
                Modification::condition(Condition::always().rarity_gte(Rarity::Uncommon)),
            ),
        ..CatalogDelta::default()
    }
}
