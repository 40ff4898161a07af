use super::body::KinematicBody;
use crate::core::math::Rect;

/// A resolved top-down landing on a platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    /// Index of the platform in world iteration order
    pub platform_index: usize,
    /// Y coordinate of the platform's top surface
    pub surface_y: f32,
}

/// Check whether `body` crossed onto `platform` from above during this tick.
///
/// Expects the body to already be integrated for the tick: the pre-movement
/// bottom edge is reconstructed as `bottom - vy`. Bodies that were already
/// below the surface, or that only touch the platform edge-to-edge
/// horizontally, do not land.
pub fn lands_on(body: &KinematicBody, platform: &Rect) -> bool {
    let bottom = body.bottom();
    let previous_bottom = bottom - body.velocity.y;

    body.bounds().overlaps_horizontally(platform)
        && bottom > platform.top()
        && previous_bottom <= platform.top()
}

/// Find the landing for this tick, if any.
///
/// Every platform is tested against the same post-integration state. When
/// more than one qualifies, the last one in iteration order wins.
pub fn find_landing(body: &KinematicBody, platforms: &[Rect]) -> Option<Landing> {
    platforms
        .iter()
        .enumerate()
        .rev()
        .find(|(_, platform)| lands_on(body, platform))
        .map(|(platform_index, platform)| Landing {
            platform_index,
            surface_y: platform.top(),
        })
}

/// Snap the body onto the landing surface and mark it grounded
pub fn apply_landing(body: &mut KinematicBody, landing: Landing) {
    body.position.y = landing.surface_y - body.height();
    body.velocity.y = 0.0;
    body.on_ground = true;
}
