//! embedded-graphics adapter for the display drivers
//!
//! A thin passthrough: drawing targets the framebuffer, nothing more. By
//! default the buffer is only marked and the caller flushes explicitly
//! with `display()`; switch [`crate::max7219::Max7219::set_auto_flush`]
//! on to refresh the hardware after every completed draw call instead.

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::BinaryColor;
use embedded_graphics_core::Pixel;

use lychnos_hal::{OutputPin, SpiBus};

use crate::max7219::Max7219;

impl<SPI, CS> OriginDimensions for Max7219<'_, SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    fn size(&self) -> Size {
        Size::new(
            self.framebuffer().width() as u32,
            self.framebuffer().height() as u32,
        )
    }
}

impl<SPI, CS> DrawTarget for Max7219<'_, SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    type Color = BinaryColor;
    type Error = SPI::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Negative and oversized coordinates are dropped, matching the
            // framebuffer's silent addressing contract
            if let (Ok(x), Ok(y)) = (u16::try_from(point.x), u8::try_from(point.y)) {
                self.framebuffer_mut().set_pixel(x, y, color.is_on());
            }
        }
        if self.auto_flush() {
            self.display()?;
        }
        Ok(())
    }
}
