// Hand-off seam to the e-paper panel driver.
// The driver owns SPI/GPIO sequencing; this side only delivers a
// finished frame once per render and logs whatever the driver reports.

use core::fmt::Debug;

pub use super::canvas::Frame;

pub trait Panel {
    type Error: Debug;

    /// Transmit one full frame to the hardware.
    fn show(&mut self, frame: Frame<'_>) -> Result<(), Self::Error>;
}

impl<P: Panel + ?Sized> Panel for &mut P {
    type Error = P::Error;

    fn show(&mut self, frame: Frame<'_>) -> Result<(), Self::Error> {
        (**self).show(frame)
    }
}
