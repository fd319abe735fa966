use enumflags2::bitflags;

#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CoverFeature {
    Open = 1,
    Close = 2,
    SetPosition = 4,
    Stop = 8,
    OpenTilt = 16,
    CloseTilt = 32,
    StopTilt = 64,
    SetTiltPosition = 128,
}
