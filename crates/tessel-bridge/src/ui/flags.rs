use bitflags::bitflags;

bitflags! {
    /// Flags for path and rectangle drawing.
    ///
    /// When none of the `ROUND_CORNERS_*` bits are set, rounding applies to
    /// all four corners.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub struct DrawFlags: u32 {
        /// Stroke the path as a closed loop.
        const CLOSED                    = 1 << 0;
        const ROUND_CORNERS_TOP_LEFT    = 1 << 4;
        const ROUND_CORNERS_TOP_RIGHT   = 1 << 5;
        const ROUND_CORNERS_BOTTOM_LEFT = 1 << 6;
        const ROUND_CORNERS_BOTTOM_RIGHT = 1 << 7;
        /// Disable rounding even when a radius is given.
        const ROUND_CORNERS_NONE        = 1 << 8;

        const ROUND_CORNERS_TOP    = Self::ROUND_CORNERS_TOP_LEFT.bits() | Self::ROUND_CORNERS_TOP_RIGHT.bits();
        const ROUND_CORNERS_BOTTOM = Self::ROUND_CORNERS_BOTTOM_LEFT.bits() | Self::ROUND_CORNERS_BOTTOM_RIGHT.bits();
        const ROUND_CORNERS_LEFT   = Self::ROUND_CORNERS_TOP_LEFT.bits() | Self::ROUND_CORNERS_BOTTOM_LEFT.bits();
        const ROUND_CORNERS_RIGHT  = Self::ROUND_CORNERS_TOP_RIGHT.bits() | Self::ROUND_CORNERS_BOTTOM_RIGHT.bits();
        const ROUND_CORNERS_ALL    = Self::ROUND_CORNERS_TOP.bits() | Self::ROUND_CORNERS_BOTTOM.bits();

        const ROUND_CORNERS_MASK   = Self::ROUND_CORNERS_ALL.bits() | Self::ROUND_CORNERS_NONE.bits();
    }
}

impl DrawFlags {
    /// Corner bits with the "nothing set means all corners" default applied.
    #[inline]
    pub fn corners(self) -> DrawFlags {
        if self.intersects(DrawFlags::ROUND_CORNERS_MASK) {
            self & DrawFlags::ROUND_CORNERS_MASK
        } else {
            DrawFlags::ROUND_CORNERS_ALL
        }
    }

    #[inline]
    pub fn rounds_nothing(self) -> bool {
        let c = self.corners();
        c.contains(DrawFlags::ROUND_CORNERS_NONE) || !c.intersects(DrawFlags::ROUND_CORNERS_ALL)
    }
}
