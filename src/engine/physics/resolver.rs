use log::debug;

use super::body::Body;
use super::collision::{CollisionMatrix, EdgeMask, Rect};
use super::error::ConfigError;
use super::field::Field;

/// Frames a pair stays suppressed after it has been resolved
pub const COOLDOWN_FRAMES: u8 = 2;

/// Mass of the virtual counter-body standing in for the arena border
pub const BORDER_MASS: f32 = 1.0e9;

/// Per-pair cooldown counters, one per unordered pair (including each
/// body's border pair). Lives for the whole run.
#[derive(Debug, Clone)]
pub struct CooldownTable {
    size: usize,
    counters: Vec<u8>,
}

impl CooldownTable {
    /// Table for `size` bodies; fails instead of aborting if the
    /// `size * size` counters cannot be allocated
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        let cells = size
            .checked_mul(size)
            .ok_or(ConfigError::Allocation(size))?;

        let mut counters = Vec::new();
        counters
            .try_reserve_exact(cells)
            .map_err(|_| ConfigError::Allocation(size))?;
        counters.resize(cells, 0);

        Ok(Self { size, counters })
    }

    /// Number of bodies the table has counters for
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, i: usize, j: usize) -> usize {
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        lo * self.size + hi
    }

    /// Remaining cooldown frames for a pair; order of `i`/`j` is irrelevant
    pub fn get(&self, i: usize, j: usize) -> u8 {
        self.counters[self.index(i, j)]
    }

    fn arm(&mut self, i: usize, j: usize) {
        let idx = self.index(i, j);
        self.counters[idx] = COOLDOWN_FRAMES;
    }

    /// Decrement a cooling pair. Returns true if the pair was cooling
    /// at the start of this frame.
    fn tick(&mut self, i: usize, j: usize) -> bool {
        let idx = self.index(i, j);
        let counter = &mut self.counters[idx];
        if *counter > 0 {
            *counter -= 1;
            true
        } else {
            false
        }
    }
}

/// Turns a frame's collision matrix into velocity changes
#[derive(Debug, Clone)]
pub struct Resolver {
    cooldowns: CooldownTable,
}

impl Resolver {
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            cooldowns: CooldownTable::new(capacity)?,
        })
    }

    pub fn cooldowns(&self) -> &CooldownTable {
        &self.cooldowns
    }

    /// Apply impulses for every collision in `matrix`.
    ///
    /// Walks the upper triangle of the matrix: `(j, i)` is the mirror of
    /// `(i, j)` and is never resolved on its own. Bodies past the size the
    /// resolver was created for are ignored.
    ///
    /// Returns the number of pairs handled and put on cooldown this frame.
    /// A pair already separating along its contact axis is counted even
    /// though its velocities are left alone.
    pub fn resolve(&mut self, bodies: &mut [Body], matrix: &CollisionMatrix, field: &Field) -> usize {
        let n = bodies.len().min(matrix.size()).min(self.cooldowns.size());
        let border = field.border();
        let mut resolved = 0;

        for i in 0..n {
            for j in i..n {
                if self.cooldowns.tick(i, j) {
                    continue;
                }

                let mask = pair_mask(matrix, i, j);
                if mask.is_empty() {
                    continue;
                }

                if i == j {
                    resolve_border(&mut bodies[i], mask, &border, field.restitution);
                    debug!("Body {} hit border (mask {:#06b})", i, mask.bits());
                } else {
                    let (head, tail) = bodies.split_at_mut(j);
                    resolve_pair(&mut head[i], &mut tail[0], mask, field.restitution);
                    debug!("Bodies {} and {} collided (mask {:#06b})", i, j, mask.bits());
                }

                self.cooldowns.arm(i, j);
                resolved += 1;
            }
        }

        resolved
    }
}

/// Mask of the (i, j) event as seen from body i
fn pair_mask(matrix: &CollisionMatrix, i: usize, j: usize) -> EdgeMask {
    let mask = matrix.get(i, j);
    if mask.is_empty() && i != j {
        matrix.get(j, i).mirrored()
    } else {
        mask
    }
}

/// One-dimensional impulse exchange along a contact axis.
///
/// `e = 1` is the perfectly elastic law; the heavier side barely moves.
///
/// Written in mass-ratio form so huge masses never form `m * v` products.
fn exchange(m1: f32, v1: f32, m2: f32, v2: f32, e: f32) -> (f32, f32) {
    // Share of the total mass held by body 2, in [0, 1]
    let w2 = 1.0 / (1.0 + m1 / m2);
    let w1 = 1.0 - w2;
    let k = 1.0 + e;
    let v1_new = v1 + k * w2 * (v2 - v1);
    let v2_new = v2 + k * w1 * (v1 - v2);
    (v1_new, v2_new)
}

/// Whether two bodies close in on each other along one axis.
///
/// `toward_positive`/`toward_negative` are a's edges facing b; both set
/// means the centers coincide and there is no approach direction.
fn approaching(mask: EdgeMask, toward_positive: EdgeMask, toward_negative: EdgeMask, va: f32, vb: f32) -> bool {
    match (mask.contains(toward_positive), mask.contains(toward_negative)) {
        (true, true) => true,
        (true, false) => va > vb,
        (false, true) => va < vb,
        (false, false) => false,
    }
}

fn resolve_pair(a: &mut Body, b: &mut Body, mask: EdgeMask, e: f32) {
    if mask.is_horizontal()
        && approaching(mask, EdgeMask::RIGHT, EdgeMask::LEFT, a.velocity.x, b.velocity.x)
    {
        let (va, vb) = exchange(a.mass, a.velocity.x, b.mass, b.velocity.x, e);
        a.velocity.x = va;
        b.velocity.x = vb;
    }

    if mask.is_vertical()
        && approaching(mask, EdgeMask::TOP, EdgeMask::BOTTOM, a.velocity.y, b.velocity.y)
    {
        let (va, vb) = exchange(a.mass, a.velocity.y, b.mass, b.velocity.y, e);
        a.velocity.y = va;
        b.velocity.y = vb;
    }
}

/// Bounce a body off the border.
///
/// The border acts as a very heavy body at rest along the contact normal
/// that shares the body's tangential velocity, so only the normal
/// component changes. Afterwards that component points back into the arena
/// and the body is moved back flush with the crossed edge, so gravity acting
/// during the cooldown cannot walk it out through an inelastic floor.
fn resolve_border(body: &mut Body, mask: EdgeMask, border: &Rect, e: f32) {
    let rect = body.rect();

    if mask.is_horizontal() {
        let (left, right) = (mask.contains(EdgeMask::LEFT), mask.contains(EdgeMask::RIGHT));
        let (v, _) = exchange(body.mass, body.velocity.x, BORDER_MASS, 0.0, e);
        body.velocity.x = inward(v, left, right);
        body.position.x += push_back(rect.min.x, rect.max.x, border.min.x, border.max.x, left, right);
    }

    if mask.is_vertical() {
        let (bottom, top) = (mask.contains(EdgeMask::BOTTOM), mask.contains(EdgeMask::TOP));
        let (v, _) = exchange(body.mass, body.velocity.y, BORDER_MASS, 0.0, e);
        body.velocity.y = inward(v, bottom, top);
        body.position.y += push_back(rect.min.y, rect.max.y, border.min.y, border.max.y, bottom, top);
    }
}

/// Offset that brings a crossed edge back onto the border along one axis
fn push_back(lo: f32, hi: f32, border_lo: f32, border_hi: f32, crossed_lo: bool, crossed_hi: bool) -> f32 {
    match (crossed_lo, crossed_hi) {
        (true, false) => border_lo - lo,
        (false, true) => border_hi - hi,
        // Wider than the arena: nowhere to put it
        _ => 0.0,
    }
}

/// Point a rebound velocity away from the crossed edge
fn inward(v: f32, crossed_negative: bool, crossed_positive: bool) -> f32 {
    match (crossed_negative, crossed_positive) {
        (true, false) => v.abs(),
        (false, true) => -v.abs(),
        // Body spans the whole axis: no inward direction
        _ => v,
    }
}
