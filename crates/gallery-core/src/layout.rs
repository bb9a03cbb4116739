//! Layout generator: places rooms, doorways and pillars along the -z axis.

use crate::config::LayoutParams;
use crate::geometry::{build_doorway, build_pillar, build_room, SurfaceGroup};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoomSpec {
    /// z of the room's near (open) end; the room extends toward -z.
    pub start_offset: f32,
    pub length: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorwaySpec {
    pub offset: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PillarSpec {
    pub x: f32,
    pub z: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    pub rooms: Vec<RoomSpec>,
    pub doorways: Vec<DoorwaySpec>,
    pub pillars: Vec<PillarSpec>,
}

pub fn generate_layout(params: &LayoutParams) -> Layout {
    let n = params.room_count;
    let step = params.step;
    let room_offset = |i: usize| params.start - i as f32 * step;

    let rooms = (0..n)
        .map(|i| RoomSpec {
            start_offset: room_offset(i),
            length: step,
            width: params.room_width,
            height: params.room_height,
        })
        .collect::<Vec<_>>();

    let doorways = (1..n)
        .map(|i| DoorwaySpec {
            offset: (room_offset(i - 1) + room_offset(i)) / 2.0,
            width: params.doorway_width,
            height: params.doorway_height,
        })
        .collect::<Vec<_>>();

    let mut pillars = Vec::with_capacity(n * 4);
    for i in 0..n {
        let near = room_offset(i) - params.pillar_inset;
        for z in [near, near - step / 2.0] {
            pillars.push(PillarSpec {
                x: -params.pillar_lateral,
                z,
            });
            pillars.push(PillarSpec {
                x: params.pillar_lateral,
                z,
            });
        }
    }

    log::debug!(
        "[layout] rooms={} doorways={} pillars={}",
        rooms.len(),
        doorways.len(),
        pillars.len()
    );

    Layout {
        rooms,
        doorways,
        pillars,
    }
}

impl Layout {
    /// Run every room, doorway and pillar through the geometry factory.
    pub fn build_surfaces(&self, vault: Option<f32>) -> SurfaceGroup {
        let mut world = SurfaceGroup::default();
        for room in &self.rooms {
            world.extend(build_room(room, vault));
        }
        for doorway in &self.doorways {
            world.extend(build_doorway(doorway));
        }
        for pillar in &self.pillars {
            world.extend(build_pillar(pillar));
        }
        world
    }
}
