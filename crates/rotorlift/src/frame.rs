use rotorlift_engine::coords::Viewport;
use rotorlift_engine::math::Mat3;
use rotorlift_engine::scene::{DrawList, DrawTarget, Scene};

use crate::assembly::Rig;
use crate::config::GameConfig;
use crate::rules::GameState;

const FLOOD_TOP: f32 = 10.0;
const FLOOD_BOTTOM: f32 = -10.0;
const FLOOD_COLUMNS: [f32; 2] = [-4.0, 0.0];

/// Which extras a pass over the map includes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Pass {
    Main,
    Minimap,
}

/// Records one frame into `list`: the full view, then the minimap inset.
pub fn compose(
    config: &GameConfig,
    scene: &Scene,
    rig: &Rig,
    state: &GameState,
    canvas: Viewport,
    list: &mut DrawList,
) {
    list.clear();
    list.set_view_matrix(config.view.view_matrix(canvas));

    list.set_viewport(None);
    draw_map(scene, rig, state, list, Pass::Main);

    list.set_viewport(Some(config.minimap.inset(canvas)));
    draw_map(scene, rig, state, list, Pass::Minimap);

    list.set_viewport(None);
}

fn draw_map(scene: &Scene, rig: &Rig, state: &GameState, list: &mut DrawList, pass: Pass) {
    scene.render(rig.water, list, Mat3::trs(-4.0, -10.0, 0.0, 4.0, 20.0));

    for y in flood_rows(state.flood) {
        for x in FLOOD_COLUMNS {
            scene.render(rig.flood, list, Mat3::translate(x, y));
        }
    }

    if pass == Pass::Minimap {
        scene.render(rig.minimap_border, list, Mat3::IDENTITY);
    }

    scene.render(rig.helipad, list, Mat3::trs(7.0, 3.0, 0.0, 1.2, 1.2));

    for (x, y, deg, sx, sy) in HOUSES {
        scene.render(rig.house, list, Mat3::trs(x, y, deg, sx, sy));
    }

    if state.person_visible {
        scene.render(rig.person, list, Mat3::translate(state.person.x, state.person.y));
    }

    if pass == Pass::Main {
        scene.render(rig.speedometer, list, Mat3::trs(8.0, -6.0, 0.0, 1.5, 1.5));
    }

    scene.render(rig.helicopter, list, Mat3::scale(0.1, 0.1));
}

const HOUSES: [(f32, f32, f32, f32, f32); 3] = [
    (-8.0, -6.0, 45.0, 2.5, 2.0),
    (-6.0, 0.0, 28.0, 3.0, 1.8),
    (-6.5, 5.0, 36.0, 2.5, 2.0),
];

/// Ripple rows from the bottom of the map upward, `spacing` apart.
fn flood_rows(spacing: f32) -> impl Iterator<Item = f32> {
    let spacing = spacing.max(0.01);
    std::iter::successors(Some(FLOOD_BOTTOM), move |y| Some(y + spacing))
        .take_while(|y| *y < FLOOD_TOP)
}
