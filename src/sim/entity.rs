//! Arena entities: characters, walls, and the polygonal view over both

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{closest_point_on_boundary, direction_vector, perpendicular};
use crate::wrap_heading;

/// Index of the center vertex in a character polygon
pub const CENTER_VERTEX: usize = 0;
/// Index of the leading (nose) vertex in a character polygon
pub const NOSE_VERTEX: usize = 2;

/// Discrete action codes accepted by a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Action {
    #[default]
    Idle,
    Accelerate,
    Brake,
    RotateCcw,
    RotateCw,
    /// Consumes ammo; projectiles belong to an external weapons system
    Fire,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Idle,
        Action::Accelerate,
        Action::Brake,
        Action::RotateCcw,
        Action::RotateCw,
        Action::Fire,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Action {
    type Error = crate::ArenaError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Action::ALL
            .get(code as usize)
            .copied()
            .ok_or(crate::ArenaError::InvalidAction(code))
    }
}

/// Object kind tag carried in observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Character,
    Wall,
}

impl ObjectKind {
    /// Numeric feature value (character = 0, wall = 1)
    pub fn feature(self) -> f32 {
        match self {
            ObjectKind::Character => 0.0,
            ObjectKind::Wall => 1.0,
        }
    }
}

/// Shape lengths for character polygons
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterShape {
    /// Distance from center to nose tip
    pub nose_length: f32,
    /// Distance from center to each base corner
    pub base_half_width: f32,
}

impl Default for CharacterShape {
    fn default() -> Self {
        Self {
            nose_length: crate::consts::NOSE_LENGTH,
            base_half_width: crate::consts::BASE_HALF_WIDTH,
        }
    }
}

/// Speed/rotation step sizes applied by actions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionSteps {
    pub speed: f32,
    pub rotation: f32,
}

/// An agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub position: Vec2,
    /// Heading in radians, kept in [0, 2π)
    pub heading: f32,
    /// Forward speed in units per tick (never negative)
    pub speed: f32,
    pub team: u8,
    pub ammo: u32,
    /// Set when the last tick detected a collision
    #[serde(default)]
    pub intersecting: bool,
    pub shape: CharacterShape,
}

impl Character {
    pub fn new(position: Vec2, heading: f32, team: u8) -> Self {
        Self {
            position,
            heading: wrap_heading(heading),
            speed: 0.0,
            team,
            ammo: 0,
            intersecting: false,
            shape: CharacterShape::default(),
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed.max(0.0);
        self
    }

    pub fn with_ammo(mut self, ammo: u32) -> Self {
        self.ammo = ammo;
        self
    }

    pub fn with_shape(mut self, shape: CharacterShape) -> Self {
        self.shape = shape;
        self
    }

    /// Unit vector along the heading
    #[inline]
    pub fn direction(&self) -> Vec2 {
        direction_vector(self.heading)
    }

    /// Polygon: `[center, left base, nose, right base]`
    pub fn vertices(&self) -> [Vec2; 4] {
        let dir = self.direction();
        let side = perpendicular(dir) * self.shape.base_half_width;
        [
            self.position,
            self.position + side,
            self.position + dir * self.shape.nose_length,
            self.position - side,
        ]
    }

    /// Leading vertex used as the collision probe point
    #[inline]
    pub fn nose(&self) -> Vec2 {
        self.vertices()[NOSE_VERTEX]
    }

    /// Vector from center to nose
    pub fn forward(&self) -> Vec2 {
        let vertices = self.vertices();
        vertices[NOSE_VERTEX] - vertices[CENTER_VERTEX]
    }

    pub fn closest_point_to(&self, point: Vec2) -> Vec2 {
        closest_point_on_boundary(&self.vertices(), point).unwrap_or(self.position)
    }

    /// Apply one action's speed/heading/ammo effect (no movement)
    pub fn apply_action(&mut self, action: Action, steps: ActionSteps) {
        match action {
            Action::Idle => {}
            Action::Accelerate => self.speed += steps.speed,
            Action::Brake => self.speed = (self.speed - steps.speed).max(0.0),
            Action::RotateCcw => self.heading = wrap_heading(self.heading + steps.rotation),
            Action::RotateCw => self.heading = wrap_heading(self.heading - steps.rotation),
            Action::Fire => self.ammo = self.ammo.saturating_sub(1),
        }
    }

    /// Advance along the heading by the current speed
    pub fn integrate(&mut self) {
        self.position += self.direction() * self.speed;
    }

    /// Turn around in place
    pub fn reverse(&mut self) {
        self.heading = wrap_heading(self.heading + std::f32::consts::PI);
    }
}

/// An axis-aligned rectangular obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Wall {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Unit wall covering layout cell (row, col)
    pub fn cell(row: usize, col: usize) -> Self {
        let (x, y) = (row as f32, col as f32);
        Self::new(x, y, x + 1.0, y + 1.0)
    }

    pub fn vertices(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x1, self.y1),
            Vec2::new(self.x2, self.y1),
            Vec2::new(self.x2, self.y2),
            Vec2::new(self.x1, self.y2),
        ]
    }

    pub fn closest_point_to(&self, point: Vec2) -> Vec2 {
        closest_point_on_boundary(&self.vertices(), point).unwrap_or(Vec2::new(self.x1, self.y1))
    }
}

/// Anything collidable and queryable by polygon
#[derive(Debug, Clone, Copy)]
pub enum PolygonalObject<'a> {
    Character(&'a Character),
    Wall(&'a Wall),
}

impl PolygonalObject<'_> {
    pub fn kind(&self) -> ObjectKind {
        match self {
            PolygonalObject::Character(_) => ObjectKind::Character,
            PolygonalObject::Wall(_) => ObjectKind::Wall,
        }
    }

    pub fn vertices(&self) -> [Vec2; 4] {
        match self {
            PolygonalObject::Character(c) => c.vertices(),
            PolygonalObject::Wall(w) => w.vertices(),
        }
    }

    pub fn closest_point_to(&self, point: Vec2) -> Vec2 {
        match self {
            PolygonalObject::Character(c) => c.closest_point_to(point),
            PolygonalObject::Wall(w) => w.closest_point_to(point),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        super::geometry::point_in_polygon(point, &self.vertices())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const STEPS: ActionSteps = ActionSteps {
        speed: 0.001,
        rotation: PI / 100.0,
    };

    #[test]
    fn test_character_vertices_facing_east() {
        let c = Character::new(Vec2::new(5.0, 5.0), 0.0, 0);
        let v = c.vertices();
        assert_eq!(v[CENTER_VERTEX], Vec2::new(5.0, 5.0));
        assert!(v[1].distance(Vec2::new(5.0, 5.1)) < 1e-6);
        assert!(v[NOSE_VERTEX].distance(Vec2::new(5.4, 5.0)) < 1e-6);
        assert!(v[3].distance(Vec2::new(5.0, 4.9)) < 1e-6);
    }

    #[test]
    fn test_character_forward_follows_heading() {
        let c = Character::new(Vec2::new(1.0, 1.0), FRAC_PI_2, 0);
        assert!(c.forward().distance(Vec2::new(0.0, 0.4)) < 1e-6);
        assert!(c.nose().distance(Vec2::new(1.0, 1.4)) < 1e-6);
    }

    #[test]
    fn test_wall_cell_corners() {
        let wall = Wall::cell(2, 5);
        assert_eq!(
            wall.vertices(),
            [
                Vec2::new(2.0, 5.0),
                Vec2::new(3.0, 5.0),
                Vec2::new(3.0, 6.0),
                Vec2::new(2.0, 6.0),
            ]
        );
    }

    #[test]
    fn test_brake_floors_at_zero() {
        let mut c = Character::new(Vec2::ZERO, 0.0, 0).with_speed(0.0005);
        c.apply_action(Action::Brake, STEPS);
        assert_eq!(c.speed, 0.0);
        c.apply_action(Action::Brake, STEPS);
        assert_eq!(c.speed, 0.0);
        c.apply_action(Action::Accelerate, STEPS);
        assert!((c.speed - 0.001).abs() < 1e-9);
    }

    #[test]
    fn test_fire_consumes_ammo_until_empty() {
        let mut c = Character::new(Vec2::ZERO, 0.0, 0).with_ammo(1);
        c.apply_action(Action::Fire, STEPS);
        assert_eq!(c.ammo, 0);
        c.apply_action(Action::Fire, STEPS);
        assert_eq!(c.ammo, 0);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut c = Character::new(Vec2::ZERO, 0.0, 0);
        c.apply_action(Action::RotateCw, STEPS);
        assert!((c.heading - (2.0 * PI - PI / 100.0)).abs() < 1e-5);
        c.apply_action(Action::RotateCcw, STEPS);
        assert!(c.heading < 1e-5 || (2.0 * PI - c.heading) < 1e-5);
    }

    #[test]
    fn test_reverse_flips_direction() {
        let mut c = Character::new(Vec2::ZERO, 0.25, 0);
        let before = c.direction();
        c.reverse();
        assert!((c.direction() + before).length() < 1e-5);
    }

    #[test]
    fn test_action_codes() {
        for (code, action) in Action::ALL.iter().enumerate() {
            assert_eq!(Action::try_from(code as u8).unwrap(), *action);
            assert_eq!(action.code() as usize, code);
        }
        assert!(matches!(
            Action::try_from(6),
            Err(crate::ArenaError::InvalidAction(6))
        ));
    }

    #[test]
    fn test_polygonal_object_dispatch() {
        let wall = Wall::cell(0, 0);
        let object = PolygonalObject::Wall(&wall);
        assert_eq!(object.kind(), ObjectKind::Wall);
        assert!(object.contains(Vec2::new(0.5, 0.5)));
        let closest = object.closest_point_to(Vec2::new(0.5, 3.0));
        assert!(closest.distance(Vec2::new(0.5, 1.0)) < 1e-6);

        let c = Character::new(Vec2::new(4.0, 4.0), 0.0, 1);
        let object = PolygonalObject::Character(&c);
        assert_eq!(object.kind(), ObjectKind::Character);
        assert_eq!(object.vertices(), c.vertices());
    }
}
