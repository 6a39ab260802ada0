use glam::Vec2;

/// Axis-aligned bounding box in world pixels (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }
}

/// A static, immovable slab the player can stand on.
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    pub body: Aabb,
    pub color: [f32; 4],
}

impl Platform {
    pub fn new(center: Vec2, size: Vec2, color: [f32; 4]) -> Self {
        Self {
            body: Aabb::from_center_size(center, size),
            color,
        }
    }
}

/// Static level data: world extent, platforms, spawn point.
///
/// Coordinates are screen-style: origin at the top-left, y grows downward,
/// so "up" is negative y everywhere in the controller and physics code.
pub struct Level {
    pub width: f32,
    pub height: f32,
    pub platforms: Vec<Platform>,
    pub spawn: Vec2,
}

pub const GROUND_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

impl Level {
    /// The prototype level: an 800x600 world with a single full-width
    /// ground slab near the bottom edge.
    pub fn prototype() -> Self {
        let width = 800.0;
        let height = 600.0;
        Self {
            width,
            height,
            platforms: vec![Platform::new(
                Vec2::new(width / 2.0, height - 16.0),
                Vec2::new(width, 32.0),
                GROUND_COLOR,
            )],
            spawn: Vec2::new(100.0, height - 150.0),
        }
    }

    /// World extent as an AABB, for bounds clamping.
    pub fn bounds(&self) -> Aabb {
        Aabb {
            min: Vec2::ZERO,
            max: Vec2::new(self.width, self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_center_size(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::from_center_size(Vec2::new(8.0, 0.0), Vec2::new(10.0, 10.0));
        let c = Aabb::from_center_size(Vec2::new(20.0, 0.0), Vec2::new(10.0, 10.0));

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_aabb_touching_edges_do_not_overlap() {
        // Bodies that merely share an edge are resting, not colliding
        let a = Aabb::from_center_size(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::from_center_size(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_prototype_ground_spans_world() {
        let level = Level::prototype();
        assert_eq!(level.platforms.len(), 1);

        let ground = level.platforms[0].body;
        assert_eq!(ground.min.x, 0.0);
        assert_eq!(ground.max.x, level.width);
        assert_eq!(ground.max.y, level.height);
        assert!(level.bounds().contains(&ground));
    }

    #[test]
    fn test_spawn_is_above_ground() {
        let level = Level::prototype();
        let ground_top = level.platforms[0].body.min.y;
        assert!(level.spawn.y < ground_top);
    }
}
