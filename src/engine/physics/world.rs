use glam::Vec2;

use super::body::Body;
use super::collision::{detect, CollisionMatrix, Rect};
use super::error::ConfigError;
use super::field::Field;
use super::integrator::advance_all;
use super::resolver::Resolver;

/// Index of a body inside the world's container
pub type BodyIndex = usize;

/// What happened during one physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Non-empty cells in this frame's collision matrix
    pub contacts: usize,
    /// Pairs handled and put on cooldown, including separating ones
    pub resolved: usize,
}

/// Physics world that owns every body for the lifetime of the run
pub struct PhysicsWorld {
    /// Forces and limits shared by all bodies
    field: Field,

    /// Arena border, derived once from the field
    border: Rect,

    /// Body storage; never grows past `capacity`
    bodies: Vec<Body>,

    /// Fixed capacity chosen at creation
    capacity: usize,

    /// Collision response with its cooldown table
    resolver: Resolver,

    /// Matrix from the most recent step
    last_collisions: CollisionMatrix,

    /// Number of steps executed
    step_count: u64,
}

impl PhysicsWorld {
    /// Create an empty world with room for `capacity` bodies
    pub fn new(field: Field, capacity: usize) -> Result<Self, ConfigError> {
        field.validate()?;
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }

        let mut bodies = Vec::new();
        bodies
            .try_reserve_exact(capacity)
            .map_err(|_| ConfigError::Allocation(capacity))?;
        let resolver = Resolver::new(capacity)?;

        Ok(Self {
            border: field.border(),
            field,
            bodies,
            capacity,
            resolver,
            last_collisions: CollisionMatrix::new(0),
            step_count: 0,
        })
    }

    /// Create a world sized exactly for `bodies` and populate it
    pub fn with_bodies(field: Field, bodies: &[Body]) -> Result<Self, ConfigError> {
        let mut world = Self::new(field, bodies.len())?;
        for body in bodies {
            world.add_body(*body)?;
        }
        Ok(world)
    }

    /// Add a body to the world
    pub fn add_body(&mut self, body: Body) -> Result<BodyIndex, ConfigError> {
        let index = self.bodies.len();
        if index >= self.capacity {
            return Err(ConfigError::CapacityExceeded {
                count: index + 1,
                capacity: self.capacity,
            });
        }
        body.validate(index)?;

        self.bodies.push(body);
        Ok(index)
    }

    /// Step the simulation forward by one timestep: detect, resolve, integrate
    pub fn step(&mut self) -> StepReport {
        let matrix = detect(&self.bodies, &self.border);
        let resolved = self.resolver.resolve(&mut self.bodies, &matrix, &self.field);
        advance_all(&mut self.bodies, &self.field);

        let report = StepReport {
            contacts: matrix.hits(),
            resolved,
        };
        self.last_collisions = matrix;
        self.step_count += 1;
        report
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, index: BodyIndex) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: BodyIndex) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn border(&self) -> Rect {
        self.border
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Collision matrix computed by the last step
    pub fn last_collisions(&self) -> &CollisionMatrix {
        &self.last_collisions
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Sum of mass * velocity over all bodies
    pub fn total_momentum(&self) -> Vec2 {
        self.bodies.iter().map(|b| b.mass * b.velocity).sum()
    }

    /// Sum of kinetic energy over all bodies
    pub fn kinetic_energy(&self) -> f32 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::BodyBuilder;
    use crate::engine::physics::collision::EdgeMask;
    use crate::engine::physics::field::FieldBuilder;
    use approx::assert_relative_eq;

    fn field() -> Field {
        FieldBuilder::new()
            .timestep(0.1)
            .arena(100.0, 100.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_world_creation() {
        let world = PhysicsWorld::new(field(), 4).unwrap();
        assert_eq!(world.capacity(), 4);
        assert!(world.is_empty());
        assert_eq!(world.border(), field().border());
        assert_eq!(world.step_count(), 0);
    }

    #[test]
    fn test_rejects_invalid_field() {
        let bad = FieldBuilder::new().timestep(0.0).build_unchecked();
        assert_eq!(
            PhysicsWorld::new(bad, 1).err(),
            Some(ConfigError::InvalidTimestep(0.0))
        );
    }

    #[test]
    fn test_rejects_zero_capacity() {
        assert_eq!(
            PhysicsWorld::new(field(), 0).err(),
            Some(ConfigError::ZeroCapacity)
        );
    }

    #[test]
    fn test_capacity_is_fixed() {
        let mut world = PhysicsWorld::new(field(), 1).unwrap();
        assert_eq!(world.add_body(BodyBuilder::new(1.0).build()), Ok(0));
        assert_eq!(
            world.add_body(BodyBuilder::new(1.0).build()),
            Err(ConfigError::CapacityExceeded {
                count: 2,
                capacity: 1
            })
        );
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_add_body_validates() {
        let mut world = PhysicsWorld::new(field(), 2).unwrap();
        let result = world.add_body(BodyBuilder::new(-1.0).build());
        assert!(matches!(result, Err(ConfigError::InvalidMass { index: 0, .. })));
        assert!(world.is_empty());
    }

    #[test]
    fn test_step_runs_detect_resolve_integrate() {
        let bodies = [
            BodyBuilder::new(1.0)
                .size(2.0, 2.0)
                .position(-0.5, 0.0)
                .velocity(5.0, 0.0)
                .build(),
            BodyBuilder::new(1.0)
                .size(2.0, 2.0)
                .position(0.5, 0.0)
                .velocity(-5.0, 0.0)
                .build(),
        ];
        let mut world = PhysicsWorld::with_bodies(field(), &bodies).unwrap();

        let report = world.step();

        assert_eq!(report, StepReport { contacts: 2, resolved: 1 });
        assert_eq!(world.last_collisions().get(0, 1), EdgeMask::RIGHT);
        // Swapped and then integrated apart
        assert_relative_eq!(world.bodies()[0].velocity.x, -5.0);
        assert_relative_eq!(world.bodies()[0].position.x, -1.0);
        assert_relative_eq!(world.bodies()[1].position.x, 1.0);
        assert_eq!(world.step_count(), 1);
    }

    #[test]
    fn test_elastic_world_conserves_momentum() {
        let bodies = [
            BodyBuilder::new(2.0)
                .size(4.0, 4.0)
                .position(-3.0, 0.0)
                .velocity(6.0, 1.0)
                .build(),
            BodyBuilder::new(3.0)
                .size(4.0, 4.0)
                .position(3.0, 0.5)
                .velocity(-4.0, 0.0)
                .build(),
        ];
        let mut world = PhysicsWorld::with_bodies(field(), &bodies).unwrap();
        let before = world.total_momentum();

        // Long enough for the pair to meet but not to reach the border
        for _ in 0..20 {
            world.step();
        }

        let after = world.total_momentum();
        assert_relative_eq!(before.x, after.x, epsilon = 1e-3);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-3);
    }

    #[test]
    fn test_body_stays_in_arena_under_gravity() {
        let field = FieldBuilder::new()
            .timestep(1.0 / 60.0)
            .acceleration_bias(0.0, -200.0)
            .max_velocity(60.0, 60.0)
            .arena(100.0, 100.0)
            .build()
            .unwrap();
        let body = BodyBuilder::new(1.0).size(10.0, 10.0).velocity(40.0, 0.0).build();
        let mut world = PhysicsWorld::with_bodies(field, &[body]).unwrap();

        for _ in 0..2000 {
            world.step();
            let center = world.bodies()[0].position;
            assert!(world.border().contains(center), "escaped: {:?}", center);
        }
    }

    #[test]
    fn test_inelastic_floor_holds_resting_body() {
        for restitution in [0.0, 0.5] {
            let field = FieldBuilder::new()
                .timestep(1.0 / 240.0)
                .acceleration_bias(0.0, -150.0)
                .arena(921.6, 518.4)
                .restitution(restitution)
                .build()
                .unwrap();
            let body = BodyBuilder::new(1.0).size(24.0, 24.0).position(0.0, -240.0).build();
            let mut world = PhysicsWorld::with_bodies(field, &[body]).unwrap();

            for frame in 0..20_000 {
                world.step();
                let body = world.bodies()[0];
                assert!(
                    world.border().contains(body.position),
                    "e = {}: escaped at frame {}: {:?}",
                    restitution,
                    frame,
                    body.position
                );
                assert!(body.rect().min.y > world.border().min.y - 1.0);
            }
        }
    }

    #[test]
    fn test_runs_are_deterministic() {
        let bodies = [
            BodyBuilder::new(1.0).size(5.0, 5.0).position(-20.0, 0.0).velocity(30.0, 7.0).build(),
            BodyBuilder::new(4.0).size(8.0, 8.0).position(20.0, 5.0).velocity(-10.0, -3.0).build(),
            BodyBuilder::new(2.0).size(6.0, 6.0).position(0.0, -30.0).velocity(2.0, 25.0).build(),
        ];
        let mut a = PhysicsWorld::with_bodies(field(), &bodies).unwrap();
        let mut b = PhysicsWorld::with_bodies(field(), &bodies).unwrap();

        for _ in 0..500 {
            a.step();
            b.step();
        }

        assert_eq!(a.bodies(), b.bodies());
    }

    #[test]
    fn test_kinetic_energy_sum() {
        let bodies = [
            BodyBuilder::new(2.0).velocity(1.0, 0.0).build(),
            BodyBuilder::new(1.0).position(10.0, 0.0).velocity(0.0, 2.0).build(),
        ];
        let world = PhysicsWorld::with_bodies(field(), &bodies).unwrap();
        assert_relative_eq!(world.kinetic_energy(), 3.0);
    }
}
