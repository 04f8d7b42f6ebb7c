//! Builds the map, the helicopter and the HUD into a `Scene`.
//!
//! Every root is spawned at the origin of its own unit frame; the frame
//! composer places it on the map by passing a parent matrix to
//! `Scene::render`. That lets one house sub-tree be drawn three times and the
//! whole map be drawn again in the minimap.

use rotorlift_engine::paint::Colour;
use rotorlift_engine::scene::{Entity, EntityId, Scene, SceneError};

use crate::palette;

/// Handles to the entities the rules animate or the frame composer draws.
#[derive(Debug, Copy, Clone)]
pub struct Rig {
    pub water: EntityId,
    pub flood: EntityId,
    pub helipad: EntityId,
    pub house: EntityId,
    pub person: EntityId,
    pub speedometer: EntityId,
    pub needle: EntityId,
    pub helicopter: EntityId,
    pub front_rotor: EntityId,
    pub rear_rotor: EntityId,
    pub minimap_border: EntityId,
}

/// Spawns everything the game draws and returns the handles.
pub fn build(scene: &mut Scene, flying_scale: f32) -> Result<Rig, SceneError> {
    let water = scene.spawn(Entity::rectangle(palette::MURKY_GREEN));
    let flood = scene.spawn(Entity::circle(palette::MURKY_GREEN, 8));

    let house = build_house(scene)?;
    let helipad = build_helipad(scene)?;
    let (helicopter, front_rotor, rear_rotor) = build_helicopter(scene, flying_scale)?;
    let person = build_person(scene)?;
    let (speedometer, needle) = build_speedometer(scene)?;
    let minimap_border = build_minimap_border(scene)?;

    log::debug!("scene assembled with {} entities", scene.len());

    Ok(Rig {
        water,
        flood,
        helipad,
        house,
        person,
        speedometer,
        needle,
        helicopter,
        front_rotor,
        rear_rotor,
        minimap_border,
    })
}

/// Stilt house: a brown roof with four diagonal struts and a round vent.
fn build_house(scene: &mut Scene) -> Result<EntityId, SceneError> {
    let base = scene.spawn(Entity::rectangle(palette::BROWN));

    let struts = [
        (0.0, 0.0, 135.0),
        (0.0, 1.0, 45.0),
        (1.0, 0.0, -135.0),
        (1.0, 1.0, -45.0),
    ];
    for (x, y, deg) in struts {
        scene.spawn_child(
            base,
            Entity::rectangle(palette::WOOD)
                .at(x, y)
                .rotated(deg)
                .scaled(0.02, -0.6),
        )?;
    }

    scene.spawn_child(
        base,
        Entity::circle(palette::LIGHT_WOOD, 8)
            .at(0.5, 0.5)
            .scaled(0.2, 0.2),
    )?;

    Ok(base)
}

/// Concrete pad with a painted "H".
fn build_helipad(scene: &mut Scene) -> Result<EntityId, SceneError> {
    let base = scene.spawn(Entity::circle(palette::GREY, 8));

    scene.spawn_child(base, Entity::circle(palette::LIGHT_GREY, 8).scaled(0.8, 0.8))?;

    let strokes = [
        (-0.5, -0.6, 0.1, 1.2),
        (0.4, -0.6, 0.1, 1.2),
        (-0.5, 0.0, 0.9, 0.1),
    ];
    for (x, y, sx, sy) in strokes {
        scene.spawn_child(base, Entity::rectangle(palette::YELLOW).at(x, y).scaled(sx, sy))?;
    }

    Ok(base)
}

/// Returns `(body, front rotor hub, rear rotor hub)`.
///
/// The body's local frame is the flight frame: the rules move and turn it
/// directly, and its nose points along +Y.
fn build_helicopter(
    scene: &mut Scene,
    flying_scale: f32,
) -> Result<(EntityId, EntityId, EntityId), SceneError> {
    let body = scene.spawn(Entity::circle(palette::BLACK, 8).scaled(flying_scale, flying_scale));

    let cabin = scene.spawn_child(
        body,
        Entity::circle(palette::RED, 8).at(0.0, 12.0).scaled(6.0, 12.0),
    )?;
    scene.spawn_child(
        body,
        Entity::circle(palette::RED, 8).at(0.0, -13.0).scaled(6.0, 12.0),
    )?;
    scene.spawn_child(
        body,
        Entity::rectangle(palette::RED).at(-5.0, -8.0).scaled(10.0, 15.0),
    )?;

    // Mirrored pair forming the windscreen.
    for sx in [0.7, -0.7] {
        scene.spawn_child(cabin, Entity::triangle(palette::WHITE).at(0.0, 0.4).scaled(sx, 0.4))?;
    }

    let front = scene.spawn_child(
        body,
        Entity::circle(palette::BLACK, 8).at(0.0, 13.0).scaled(3.0, 3.0),
    )?;
    let rear = scene.spawn_child(
        body,
        Entity::circle(palette::BLACK, 8).at(0.0, -15.0).scaled(3.0, 3.0),
    )?;

    attach_blades(scene, front, [0.0, 90.0, -90.0, 180.0])?;
    attach_blades(scene, rear, [45.0, 135.0, -45.0, 225.0])?;

    Ok((body, front, rear))
}

fn attach_blades(scene: &mut Scene, hub: EntityId, angles: [f32; 4]) -> Result<(), SceneError> {
    let offsets = [(-0.38, 0.0), (0.0, -0.38), (0.0, 0.4), (0.4, 0.0)];
    for ((x, y), deg) in offsets.into_iter().zip(angles) {
        scene.spawn_child(
            hub,
            Entity::rectangle(palette::BLACK)
                .at(x, y)
                .rotated(deg)
                .scaled(0.8, 5.0),
        )?;
    }
    Ok(())
}

/// Stranded person waving both arms.
fn build_person(scene: &mut Scene) -> Result<EntityId, SceneError> {
    let torso = scene.spawn(Entity::rectangle(palette::BLUE).scaled(0.4, 0.4));

    scene.spawn_child(torso, Entity::rectangle(palette::SKIN).at(-0.7, 0.25).scaled(0.7, 0.4))?;
    scene.spawn_child(torso, Entity::rectangle(palette::SKIN).at(1.0, 0.25).scaled(0.7, 0.4))?;
    scene.spawn_child(torso, Entity::circle(palette::SKIN, 8).at(0.5, 0.5).scaled(0.4, 0.4))?;

    Ok(torso)
}

/// Returns `(dial, needle hub)`. The needle's rotation is the reading.
fn build_speedometer(scene: &mut Scene) -> Result<(EntityId, EntityId), SceneError> {
    let dial = scene.spawn(Entity::circle(palette::DARK_GREY, 32));

    let needle = scene.spawn_child(
        dial,
        Entity::circle(palette::YELLOW, 12).rotated(180.0).scaled(0.2, 0.2),
    )?;
    scene.spawn_child(needle, Entity::rectangle(palette::YELLOW).at(0.0, -0.05).scaled(4.0, 0.4))?;
    scene.spawn_child(needle, Entity::triangle(palette::YELLOW).at(4.0, -0.05).scaled(0.5, 0.4))?;

    let ticks = [
        (-0.5, 0.0, 180.0),
        (0.0, 0.5, 90.0),
        (-0.35, 0.35, 135.0),
        (0.5, 0.0, 0.0),
        (0.35, 0.35, 45.0),
        (0.35, -0.35, -45.0),
    ];
    for (x, y, deg) in ticks {
        scene.spawn_child(dial, tick(palette::WHITE).at(x, y).rotated(deg))?;
    }

    Ok((dial, needle))
}

fn tick(colour: Colour) -> Entity {
    Entity::rectangle(colour).scaled(0.5, 0.01)
}

/// Black frame drawn around the minimap inset.
fn build_minimap_border(scene: &mut Scene) -> Result<EntityId, SceneError> {
    let frame = scene.spawn(Entity::group());

    let edges = [
        (-10.0, -8.5, 20.0, 1.0),
        (-10.5, -8.0, 1.0, 20.0),
        (9.5, -8.0, 1.0, 20.0),
        (-10.0, 7.5, 20.0, 1.0),
    ];
    for (x, y, sx, sy) in edges {
        scene.spawn_child(frame, Entity::rectangle(palette::BLACK).at(x, y).scaled(sx, sy))?;
    }

    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotorlift_engine::scene::shapes::Shape;

    fn built() -> (Scene, Rig) {
        let mut scene = Scene::new();
        let rig = build(&mut scene, 0.5).expect("assembly");
        (scene, rig)
    }

    #[test]
    fn every_rig_handle_is_a_root_except_animated_parts() {
        let (scene, rig) = built();
        for root in [
            rig.water,
            rig.flood,
            rig.helipad,
            rig.house,
            rig.person,
            rig.speedometer,
            rig.helicopter,
            rig.minimap_border,
        ] {
            assert_eq!(scene.parent(root), None);
        }
        assert_eq!(scene.parent(rig.front_rotor), Some(rig.helicopter));
        assert_eq!(scene.parent(rig.rear_rotor), Some(rig.helicopter));
        assert_eq!(scene.parent(rig.needle), Some(rig.speedometer));
    }

    #[test]
    fn house_has_four_struts_and_a_vent() {
        let (scene, rig) = built();
        let children = scene.children(rig.house);
        assert_eq!(children.len(), 5);
        let struts = children
            .iter()
            .filter(|&&c| scene[c].visual.as_ref().map(|v| &v.shape) == Some(&Shape::rectangle()))
            .count();
        assert_eq!(struts, 4);
    }

    #[test]
    fn each_rotor_has_four_blades() {
        let (scene, rig) = built();
        assert_eq!(scene.children(rig.front_rotor).len(), 4);
        assert_eq!(scene.children(rig.rear_rotor).len(), 4);
    }

    #[test]
    fn helicopter_starts_at_flying_scale() {
        let (scene, rig) = built();
        let body = &scene[rig.helicopter];
        assert_eq!(body.scale.x, 0.5);
        assert_eq!(body.scale.y, 0.5);
        assert_eq!(body.rotation, 0.0);
    }

    #[test]
    fn needle_rests_at_one_eighty() {
        let (scene, rig) = built();
        assert_eq!(scene[rig.needle].rotation, 180.0);
        // Arm and tip.
        assert_eq!(scene.children(rig.needle).len(), 2);
    }

    #[test]
    fn minimap_border_is_an_undrawn_group() {
        let (scene, rig) = built();
        assert!(scene[rig.minimap_border].visual.is_none());
        assert_eq!(scene.children(rig.minimap_border).len(), 4);
    }
}
