//! Version 0: the launch catalog.

use super::{text, theme, CatalogDelta, CategoryDelta, Element};
use crate::core::condition::Condition;
use crate::core::pipeline::{Draft, SENTIENT};
use crate::core::provider::Pick;
use crate::core::rng::{self, UniformRng};
use crate::schema::feature::ids;
use crate::schema::power::{ActivePower, Cost, Damage, PassivePower};
use crate::schema::rarity::Rarity;
use crate::schema::theme::Theme;
use crate::schema::weapon::{Descriptor, EnergyCore, Material, PartSlot, Shape};

pub fn delta() -> CatalogDelta {
    CatalogDelta {
        themes: themes(),
        shapes: shapes(),
        hard_materials: hard_materials(),
        grip_materials: grip_materials(),
        embellishments: embellishments(),
        energy_cores: energy_cores(),
        eye_colours: eye_colours(),
        active_powers: active_powers(),
        passive_powers: passive_powers(),
        languages: languages(),
        personalities: personalities(),
        recharge_methods: recharge_methods(),
    }
}

fn themes() -> CategoryDelta<Theme> {
    [
        Theme::Fire,
        Theme::Steampunk,
        Theme::Ice,
        Theme::Nature,
        Theme::Wizard,
        Theme::Dark,
        Theme::Cloud,
        Theme::Sweet,
    ]
    .into_iter()
    .fold(CategoryDelta::new(), |d, t| d.add(theme(t)))
}

fn shape(name: &str, parts: Vec<PartSlot>, damage: Damage) -> Shape {
    Shape {
        name: name.to_string(),
        parts,
        damage,
    }
}

fn shapes() -> CategoryDelta<Shape> {
    CategoryDelta::new()
        .add(Element::new(
            "shape.sword",
            shape(
                "sword",
                vec![
                    PartSlot::hard("blade"),
                    PartSlot::hard("crossguard"),
                    PartSlot::grip("grip"),
                    PartSlot::hard("pommel"),
                ],
                Damage::dice(1, 8),
            ),
        ))
        .add(Element::new(
            "shape.dagger",
            shape(
                "dagger",
                vec![PartSlot::hard("blade"), PartSlot::grip("handle")],
                Damage::dice(1, 4),
            ),
        ))
        .add(Element::new(
            "shape.axe",
            shape(
                "axe",
                vec![PartSlot::hard("head"), PartSlot::hard("haft"), PartSlot::grip("grip")],
                Damage::dice(1, 8),
            ),
        ))
        .add(Element::new(
            "shape.spear",
            shape(
                "spear",
                vec![PartSlot::hard("head"), PartSlot::hard("shaft")],
                Damage::dice(1, 6),
            ),
        ))
        .add(Element::new(
            "shape.mace",
            shape(
                "mace",
                vec![PartSlot::hard("head"), PartSlot::hard("haft"), PartSlot::grip("grip")],
                Damage::dice(1, 6),
            ),
        ))
        .add(Element::new(
            "shape.bow",
            shape(
                "bow",
                vec![PartSlot::hard("limbs").plural(), PartSlot::grip("grip")],
                Damage::dice(1, 6),
            ),
        ))
        .add(
            Element::new(
                "shape.gauntlet",
                shape(
                    "clockwork gauntlet",
                    vec![PartSlot::hard("knuckles").plural(), PartSlot::grip("straps").plural()],
                    Damage::dice(1, 4) + Damage::flat(1),
                ),
            )
            .when(Condition::always().themes_any([Theme::Steampunk])),
        )
        .add(
            Element::new(
                "shape.staff",
                shape(
                    "staff",
                    vec![PartSlot::hard("head"), PartSlot::hard("staff")],
                    Damage::dice(1, 6),
                ),
            )
            .when(Condition::always().themes_any([Theme::Wizard, Theme::Nature])),
        )
}

fn hard_materials() -> CategoryDelta<Material> {
    CategoryDelta::new()
        .add(Element::new("material.steel", Material::new("steel")))
        .add(Element::new("material.iron", Material::new("iron")))
        .add(Element::new("material.bronze", Material::new("bronze")))
        .add(Element::new("material.oak", Material::new("oak")))
        .add(
            Element::new(
                "material.obsidian",
                Material::new("obsidian").with(Descriptor::property("warm to the touch")),
            )
            .when(Condition::always().themes_any([Theme::Fire, Theme::Dark])),
        )
        .add(
            Element::new(
                "material.brass",
                Material::new("brass").with(Descriptor::possession("tiny ticking gears")),
            )
            .when(Condition::always().themes_any([Theme::Steampunk])),
        )
        .add(
            Element::new(
                "material.glacial-ice",
                Material::new("glacial ice").with(Descriptor::property("cold enough to sting")),
            )
            .when(Condition::always().themes_any([Theme::Ice])),
        )
        .add(
            Element::new(
                "material.living-wood",
                Material::new("living wood").with(Descriptor::possession("small green leaves")),
            )
            .when(Condition::always().themes_any([Theme::Nature])),
        )
        .add(
            Element::new(
                "material.star-metal",
                Material::new("star metal").with(Descriptor::property("faintly humming")),
            )
            .when(Condition::always().themes_any([Theme::Wizard]).rarity_gte(Rarity::Rare)),
        )
        .add(
            Element::new("material.bone", Material::new("bone"))
                .when(Condition::always().themes_any([Theme::Dark])),
        )
        .add(
            Element::new(
                "material.storm-glass",
                Material::new("storm glass").with(Descriptor::possession("tiny clouds drifting inside")),
            )
            .when(Condition::always().themes_any([Theme::Cloud])),
        )
        .add(
            Element::new("material.hard-candy", Material::new("hard candy"))
                .when(Condition::always().themes_any([Theme::Sweet])),
        )
}

fn grip_materials() -> CategoryDelta<Material> {
    CategoryDelta::new()
        .add(Element::new("grip.leather", Material::new("leather")))
        .add(Element::new("grip.cord", Material::new("waxed cord")))
        .add(Element::new("grip.ash", Material::new("ash wood")))
        .add(
            Element::new("grip.copper-wire", Material::new("copper wire"))
                .when(Condition::always().themes_any([Theme::Steampunk])),
        )
        .add(
            Element::new("grip.fur", Material::new("white fur"))
                .when(Condition::always().themes_any([Theme::Ice])),
        )
        .add(
            Element::new(
                "grip.vine",
                Material::new("braided vine").with(Descriptor::possession("a single white flower")),
            )
            .when(Condition::always().themes_any([Theme::Nature])),
        )
        .add(
            Element::new("grip.silk", Material::new("star-patterned silk"))
                .when(Condition::always().themes_any([Theme::Wizard])),
        )
        .add(
            Element::new("grip.dragonhide", Material::new("black dragonhide"))
                .when(Condition::always().themes_any([Theme::Dark, Theme::Fire]).rarity_gte(Rarity::Rare)),
        )
        .add(
            Element::new("grip.cloud-cotton", Material::new("cloud-spun cotton"))
                .when(Condition::always().themes_any([Theme::Cloud])),
        )
        .add(
            Element::new("grip.licorice", Material::new("licorice"))
                .when(Condition::always().themes_any([Theme::Sweet])),
        )
}

/// "a"/"an" for a following word.
fn article(word: &str) -> &'static str {
    match word.chars().next() {
        Some(c) if "aeiouAEIOU".contains(c) => "an",
        _ => "a",
    }
}

/// Every part that mentions a core mentions the same one.
fn core_embellishment(rng: &mut dyn UniformRng, draft: &Draft) -> Descriptor {
    let fallback = EnergyCore {
        name: "humming".to_string(),
        colour: "a dull white".to_string(),
    };
    let pick = draft
        .catalog
        .energy_cores
        .pick_or_link_with_element(rng, 1, draft, fallback);
    let id = pick.id().cloned();
    let core = pick.into_value();
    let descriptor = Descriptor::possession(format!(
        "{} {} core that glows {}",
        article(&core.name),
        core.name,
        core.colour
    ));
    match id {
        Some(id) => descriptor.attaching(id),
        None => descriptor,
    }
}

fn eye_embellishment(rng: &mut dyn UniformRng, draft: &Draft) -> Descriptor {
    let pick = draft
        .catalog
        .eye_colours
        .pick_or_link_with_element(rng, 1, draft, "grey".to_string());
    let linked = matches!(pick, Pick::Linked(_));
    let id = pick.id().cloned();
    let colour = pick.into_value();
    let text = if linked {
        format!("another {} eye, watching", colour)
    } else {
        format!("a single {} eye that blinks", colour)
    };
    let descriptor = Descriptor::possession(text);
    match id {
        Some(id) => descriptor.attaching(id),
        None => descriptor,
    }
}

fn embellishments() -> CategoryDelta<Descriptor> {
    CategoryDelta::new()
        .add(Element::new(
            "embellish.runes",
            Descriptor::possession("runes along its length"),
        ))
        .add(Element::new("embellish.chip", Descriptor::possession("a small chip")))
        .add(Element::new(
            "embellish.polished",
            Descriptor::property("polished to a mirror shine"),
        ))
        .add(
            Element::deferred("embellish.core", core_embellishment)
                .when(Condition::always().rarity_gte(Rarity::Uncommon)),
        )
        .add(Element::deferred("embellish.eye", eye_embellishment).when(Condition::always().ids_any(ids([SENTIENT]))))
        .add(
            Element::new("embellish.gauge", Descriptor::possession("a tiny pressure gauge"))
                .when(Condition::always().themes_any([Theme::Steampunk])),
        )
        .add(
            Element::new("embellish.flames", Descriptor::property("wreathed in tiny flames"))
                .when(Condition::always().themes_any([Theme::Fire])),
        )
        .add(
            Element::new("embellish.icicles", Descriptor::possession("icicles hanging from it"))
                .when(Condition::always().themes_any([Theme::Ice])),
        )
        .add(
            Element::new("embellish.moss", Descriptor::property("covered in soft moss"))
                .when(Condition::always().themes_any([Theme::Nature])),
        )
        .add(
            Element::new("embellish.sprinkles", Descriptor::possession("rainbow sprinkles"))
                .when(Condition::always().themes_any([Theme::Sweet])),
        )
}

fn core(name: &str, colour: &str) -> EnergyCore {
    EnergyCore {
        name: name.to_string(),
        colour: colour.to_string(),
    }
}

fn energy_cores() -> CategoryDelta<EnergyCore> {
    let themed = |id: &str, name: &str, colour: &str, t: Theme| {
        Element::new(id, core(name, colour)).when(Condition::always().themes_any([t]))
    };
    CategoryDelta::new()
        .add(Element::new("core.humming", core("humming", "softly yellow")))
        .add(themed("core.ember", "ember", "orange", Theme::Fire))
        .add(themed("core.clockwork", "clockwork", "a coppery red", Theme::Steampunk))
        .add(themed("core.frost", "frost", "pale blue", Theme::Ice))
        .add(themed("core.verdant", "verdant", "green", Theme::Nature))
        .add(themed("core.arcane", "arcane", "violet", Theme::Wizard))
        .add(themed("core.void", "void", "a lightless black", Theme::Dark))
        .add(themed("core.storm", "storm", "white", Theme::Cloud))
        .add(themed("core.sugar", "sugar", "pink", Theme::Sweet))
}

fn eye_colours() -> CategoryDelta<String> {
    CategoryDelta::new()
        .add(text("eye.amber", "amber"))
        .add(text("eye.emerald", "emerald"))
        .add(text("eye.crimson", "crimson"))
        .add(text("eye.silver", "silver"))
        .add(Element::new("eye.violet", "violet".to_string()).when(Condition::always().themes_any([Theme::Wizard])))
}

/// Names the element a themed bolt is made of.
fn element_of(theme: Theme) -> &'static str {
    match theme {
        Theme::Fire => "flame",
        Theme::Ice => "frost",
        Theme::Steampunk => "scalding steam",
        Theme::Nature => "thorns",
        Theme::Wizard => "raw magic",
        Theme::Dark => "shadow",
        Theme::Cloud => "lightning",
        Theme::Sweet => "boiling caramel",
        Theme::Earth => "stone",
        Theme::Light => "radiance",
    }
}

fn elemental_bolt(rng: &mut dyn UniformRng, draft: &Draft) -> ActivePower {
    let element = rng::choose(rng, &draft.weapon.themes)
        .map(|t| element_of(*t))
        .unwrap_or("force");
    ActivePower::new(
        format!("Shoot a bolt of {} dealing 2d6 damage.", element),
        Cost::Charges(2),
    )
    .note("Range 60ft.")
}

fn active_powers() -> CategoryDelta<ActivePower> {
    let themed = |t: Theme| Condition::always().themes_any([t]);
    CategoryDelta::new()
        // Available to every theme.
        .add(
            Element::new("active.light", ActivePower::new("Cast Light on the weapon.", Cost::Charges(1)))
                .when(Condition::always().ids_none(ids(["active.darkness"]))),
        )
        .add(Element::new(
            "active.animals",
            ActivePower::new("Speak with animals for 10 minutes.", Cost::Charges(1)),
        ))
        .add(
            Element::new(
                "active.invisible",
                ActivePower::new("Become invisible until you next attack.", Cost::Charges(3)),
            )
            .when(Condition::always().rarity_gte(Rarity::Rare)),
        )
        .add(Element::new(
            "active.blink",
            ActivePower::new("Teleport up to 30ft to a space you can see.", Cost::Charges(2)),
        ))
        .add(Element::new(
            "active.feather-fall",
            ActivePower::new("Cast Feather Fall.", Cost::Charges(1)),
        ))
        .add(Element::new(
            "active.mend",
            ActivePower::new("Heal a creature you touch for 2d4 hit points.", Cost::Charges(2)),
        ))
        .add(Element::new(
            "active.mage-hand",
            ActivePower::new("Cast Mage Hand.", Cost::AtWill),
        ))
        .add(Element::new(
            "active.glow",
            ActivePower::new("Make the weapon glow or stop glowing.", Cost::AtWill),
        ))
        .add(
            Element::deferred("active.elemental-bolt", elemental_bolt)
                .when(Condition::always().rarity_gte(Rarity::Rare)),
        )
        // Fire
        .add(
            Element::new(
                "active.ignite",
                ActivePower::new("Set a creature you hit on fire for 1d4 damage per turn.", Cost::Charges(1)),
            )
            .when(themed(Theme::Fire)),
        )
        .add(
            Element::new(
                "active.fireball",
                ActivePower::new("Cast Fireball.", Cost::Charges(3))
                    .note("Save DC 15.")
                    .attaching("passive.ember-heart"),
            )
            .when(themed(Theme::Fire).rarity_gte(Rarity::Epic)),
        )
        // Ice
        .add(
            Element::new(
                "active.freeze-water",
                ActivePower::new("Freeze a 10ft square of water solid.", Cost::Charges(1)),
            )
            .when(themed(Theme::Ice)),
        )
        .add(
            Element::new("active.cone-of-cold", ActivePower::new("Cast Cone of Cold.", Cost::Charges(4)))
                .when(themed(Theme::Ice).rarity_gte(Rarity::Legendary)),
        )
        // Steampunk
        .add(
            Element::new(
                "active.spider",
                ActivePower::new("Deploy a clockwork spider that scouts for 1 hour.", Cost::Charges(2))
                    .attaching("passive.spider-friend"),
            )
            .when(themed(Theme::Steampunk)),
        )
        .add(
            Element::new(
                "active.steam-vent",
                ActivePower::new("Vent steam to fill a 15ft cube with fog.", Cost::Charges(1)),
            )
            .when(themed(Theme::Steampunk)),
        )
        // Nature
        .add(
            Element::new(
                "active.entangle",
                ActivePower::new("Cause vines to grab a creature within 30ft.", Cost::Charges(1)),
            )
            .when(themed(Theme::Nature)),
        )
        .add(
            Element::new("active.speak-plants", ActivePower::new("Speak with plants.", Cost::AtWill))
                .when(themed(Theme::Nature)),
        )
        // Wizard
        .add(
            Element::new("active.magic-missile", ActivePower::new("Cast Magic Missile.", Cost::Charges(1)))
                .when(themed(Theme::Wizard)),
        )
        .add(
            Element::new("active.counterspell", ActivePower::new("Cast Counterspell.", Cost::Charges(3)))
                .when(themed(Theme::Wizard).rarity_gte(Rarity::Rare)),
        )
        // Dark
        .add(
            Element::new("active.darkness", ActivePower::new("Cast Darkness.", Cost::Charges(2)))
                .when(themed(Theme::Dark).ids_none(ids(["active.light"]))),
        )
        .add(
            Element::new(
                "active.drain",
                ActivePower::new("Drain 1d8 life from a creature you hit.", Cost::Charges(2))
                    .attaching("passive.hungering"),
            )
            .when(themed(Theme::Dark)),
        )
        // Cloud
        .add(
            Element::new("active.gust", ActivePower::new("Cast Gust of Wind.", Cost::Charges(2)))
                .when(themed(Theme::Cloud)),
        )
        .add(
            Element::new(
                "active.rain-cloud",
                ActivePower::new("Summon a small rain cloud over a creature.", Cost::Charges(1)),
            )
            .when(themed(Theme::Cloud)),
        )
        // Sweet
        .add(
            Element::new(
                "active.cake",
                ActivePower::new("Conjure a delicious cake.", Cost::Charges(1)),
            )
            .when(themed(Theme::Sweet)),
        )
        .add(
            Element::new(
                "active.syrup",
                ActivePower::new("Turn up to a gallon of liquid into syrup.", Cost::AtWill),
            )
            .when(themed(Theme::Sweet)),
        )
}

fn passive_powers() -> CategoryDelta<PassivePower> {
    let themed = |t: Theme| Condition::always().themes_any([t]);
    let uncommon = Condition::always().rarity_gte(Rarity::Uncommon);
    let themed_up = |t: Theme| Condition::always().themes_any([t]).rarity_gte(Rarity::Uncommon);
    CategoryDelta::new()
        // One per theme at every rarity.
        .add(Element::new("passive.warm", PassivePower::new("The weapon is always warm to the touch.")).when(themed(Theme::Fire)))
        .add(
            Element::new("passive.widget-clock", PassivePower::new("A widget on the weapon displays the time."))
                .when(themed(Theme::Steampunk)),
        )
        .add(
            Element::new("passive.morning-frost", PassivePower::new("Frost forms on the weapon every morning."))
                .when(themed(Theme::Ice)),
        )
        .add(
            Element::new("passive.blooms", PassivePower::new("Flowers bloom where the weapon rests."))
                .when(themed(Theme::Nature)),
        )
        .add(
            Element::new("passive.magic-hum", PassivePower::new("The weapon hums when magic is cast nearby."))
                .when(themed(Theme::Wizard)),
        )
        .add(
            Element::new("passive.no-shadow", PassivePower::new("The weapon casts no shadow."))
                .when(themed(Theme::Dark)),
        )
        .add(
            Element::new("passive.feather-light", PassivePower::new("The weapon is light as a feather."))
                .when(themed(Theme::Cloud)),
        )
        .add(
            Element::new("passive.baking", PassivePower::new("The weapon smells of fresh baking."))
                .when(themed(Theme::Sweet)),
        )
        // Any theme, uncommon and up.
        .add(
            Element::new(
                "passive.plus-one",
                PassivePower::new("+1 to attack and damage rolls.").with_damage(Damage::flat(1)),
            )
            .when(uncommon.clone().ids_none(ids(["passive.plus-two"]))),
        )
        .add(
            Element::new(
                "passive.plus-two",
                PassivePower::new("+2 to attack and damage rolls.").with_damage(Damage::flat(2)),
            )
            .when(Condition::always().rarity_gte(Rarity::Epic).ids_none(ids(["passive.plus-one"]))),
        )
        .add(
            Element::new("passive.alert", PassivePower::new("You can't be surprised while holding the weapon."))
                .when(uncommon.clone()),
        )
        .add(
            Element::new("passive.unbreakable", PassivePower::new("The weapon can't be broken by mundane means."))
                .when(uncommon.clone()),
        )
        .add(
            Element::new(
                "passive.disarm",
                PassivePower::new("You have advantage on checks to resist being disarmed."),
            )
            .when(uncommon),
        )
        .add(
            Element::new("passive.returning", PassivePower::new("The weapon returns to your hand when thrown."))
                .when(Condition::always().rarity_gte(Rarity::Rare)),
        )
        // Themed, uncommon and up.
        .add(
            Element::new(
                "passive.fire-damage",
                PassivePower::new("Deals an extra 1d4 fire damage.").with_damage(Damage::dice(1, 4)),
            )
            .when(themed_up(Theme::Fire)),
        )
        .add(
            Element::new("passive.fire-resist", PassivePower::new("You have resistance to fire damage."))
                .when(themed(Theme::Fire).rarity_gte(Rarity::Rare)),
        )
        .add(
            Element::new("passive.folding", PassivePower::new("The weapon folds into a compact case."))
                .when(themed_up(Theme::Steampunk)),
        )
        .add(
            Element::new("passive.music-box", PassivePower::new("A tiny music box in the hilt plays on command."))
                .when(themed_up(Theme::Steampunk)),
        )
        .add(
            Element::new(
                "passive.cold-damage",
                PassivePower::new("Deals an extra 1d4 cold damage.").with_damage(Damage::dice(1, 4)),
            )
            .when(themed_up(Theme::Ice)),
        )
        .add(
            Element::new("passive.ice-walk", PassivePower::new("You can walk across ice without slipping."))
                .when(themed_up(Theme::Ice)),
        )
        .add(
            Element::new("passive.animal-trust", PassivePower::new("Small animals are not afraid of you."))
                .when(themed_up(Theme::Nature)),
        )
        .add(
            Element::new("passive.thorn-walk", PassivePower::new("You pass through thorny undergrowth unharmed."))
                .when(themed_up(Theme::Nature)),
        )
        .add(
            Element::new("passive.prestidigitation", PassivePower::new("You know the Prestidigitation cantrip."))
                .when(themed_up(Theme::Wizard)),
        )
        .add(
            Element::new("passive.spell-focus", PassivePower::new("+1 to spell attack rolls."))
                .when(themed(Theme::Wizard).rarity_gte(Rarity::Rare)),
        )
        .add(
            Element::new("passive.dark-sight", PassivePower::new("You can see in magical darkness up to 30ft."))
                .when(themed_up(Theme::Dark)),
        )
        .add(
            Element::new(
                "passive.necrotic",
                PassivePower::new("Deals an extra 1d4 necrotic damage.").with_damage(Damage::dice(1, 4)),
            )
            .when(themed_up(Theme::Dark)),
        )
        .add(
            Element::new("passive.soft-landing", PassivePower::new("You take no falling damage."))
                .when(themed_up(Theme::Cloud)),
        )
        .add(
            Element::new("passive.deep-breath", PassivePower::new("You can hold your breath for an hour."))
                .when(themed_up(Theme::Cloud)),
        )
        .add(
            Element::new(
                "passive.healing-sweet",
                PassivePower::new("Once a day the weapon produces a sweet that heals 1 hit point."),
            )
            .when(themed_up(Theme::Sweet)),
        )
        .add(
            Element::new("passive.bee-friend", PassivePower::new("Bees are friendly to you."))
                .when(themed_up(Theme::Sweet)),
        )
        // Only ever attached by another feature.
        .add(
            Element::new("passive.ember-heart", PassivePower::new("You can't be harmed by mundane fire."))
                .when(Condition::never()),
        )
        .add(
            Element::new(
                "passive.hungering",
                PassivePower::new("The weapon must taste blood once a week or it sulks."),
            )
            .when(Condition::never()),
        )
        .add(
            Element::new(
                "passive.spider-friend",
                PassivePower::new("The clockwork spider rides on your shoulder when not scouting."),
            )
            .when(Condition::never()),
        )
}

fn languages() -> CategoryDelta<String> {
    [
        ("language.elvish", "Elvish"),
        ("language.dwarvish", "Dwarvish"),
        ("language.draconic", "Draconic"),
        ("language.giant", "Giant"),
        ("language.sylvan", "Sylvan"),
        ("language.infernal", "Infernal"),
    ]
    .into_iter()
    .fold(CategoryDelta::new(), |d, (id, name)| d.add(text(id, name)))
}

fn personalities() -> CategoryDelta<String> {
    [
        ("personality.proud", "proud"),
        ("personality.curious", "curious"),
        ("personality.grumpy", "grumpy"),
        ("personality.cheerful", "cheerful"),
        ("personality.melancholy", "melancholy"),
        ("personality.boastful", "boastful"),
        ("personality.timid", "timid"),
    ]
    .into_iter()
    .fold(CategoryDelta::new(), |d, (id, name)| d.add(text(id, name)))
}

fn recharge_methods() -> CategoryDelta<String> {
    let themed = |id: &str, method: &str, t: Theme| text(id, method).when(Condition::always().themes_any([t]));
    CategoryDelta::new()
        .add(text("recharge.dawn", "at dawn"))
        .add(text("recharge.dusk", "at dusk"))
        .add(themed("recharge.fire", "when left in a fire overnight", Theme::Fire))
        .add(themed("recharge.wind-up", "when wound up with its key", Theme::Steampunk))
        .add(themed("recharge.snow", "when buried in snow for an hour", Theme::Ice))
        .add(themed("recharge.sunlight", "after a day in the sun", Theme::Nature))
        .add(themed("recharge.moonlight", "under a full moon", Theme::Wizard))
        .add(themed("recharge.blood", "when it tastes blood", Theme::Dark))
        .add(themed("recharge.storm", "during a thunderstorm", Theme::Cloud))
        .add(themed("recharge.sugar", "when dipped in honey", Theme::Sweet))
}
