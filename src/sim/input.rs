use bitflags::bitflags;

bitflags! {
    /// Currently-held movement / rotation / action keys.
    ///
    /// Set and cleared by the input collaborator on key-down/key-up; the
    /// simulation only ever tests bits.  STRAFE and SWITCH are modifiers:
    /// held together with LEFT/RIGHT they suppress rotation.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct InputFlags: u8 {
        const UP     = 0x01;
        const DOWN   = 0x02;
        const LEFT   = 0x04;
        const RIGHT  = 0x08;
        const FIRE   = 0x10;
        const USE    = 0x20;
        const STRAFE = 0x40;
        const SWITCH = 0x80;
    }
}

impl InputFlags {
    /// True while either modifier turns LEFT/RIGHT into strafing or
    /// weapon cycling instead of rotation.
    #[inline]
    pub fn rotation_suppressed(self) -> bool {
        self.intersects(Self::STRAFE | Self::SWITCH)
    }
}
