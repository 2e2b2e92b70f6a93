//! ST7789 panel, 320×170 over SPI with DMA, landscape.

use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    Async,
    delay::Delay,
    dma::{
        DmaRxBuf,
        DmaTxBuf,
    },
    dma_buffers,
    gpio::{
        Level,
        Output,
        OutputConfig,
    },
    spi::master::{
        Config,
        Spi,
        SpiDmaBus,
    },
    time::Rate,
};
use mipidsi::{
    Builder,
    models::ST7789,
    options::{
        ColorInversion,
        Orientation,
        Rotation,
    },
};

use super::DisplayResources;

const DMA_BYTES: usize = 32_000;

type SpiInterface<'a> = mipidsi::interface::SpiInterface<
    'a,
    ExclusiveDevice<SpiDmaBus<'a, Async>, Output<'a>, Delay>,
    Output<'a>,
>;

/// The badge's LCD, an `embedded-graphics` draw target.
pub type Display<'a> = mipidsi::Display<SpiInterface<'a>, ST7789, Output<'a>>;

impl From<DisplayResources<'static>> for Display<'static> {
    fn from(res: DisplayResources<'static>) -> Self {
        let (rx_buffer, rx_descriptors, tx_buffer, tx_descriptors) = dma_buffers!(DMA_BYTES);
        let spi = Spi::new(res.spi, Config::default().with_frequency(Rate::from_mhz(80)))
            .unwrap()
            .with_sck(res.sck)
            .with_mosi(res.mosi)
            .with_miso(res.miso)
            .with_dma(res.dma)
            .with_buffers(
                DmaRxBuf::new(rx_descriptors, rx_buffer).unwrap(),
                DmaTxBuf::new(tx_descriptors, tx_buffer).unwrap(),
            )
            .into_async();

        let mut delay = Delay::new();
        let cs = Output::new(res.cs, Level::High, OutputConfig::default());
        let device = ExclusiveDevice::new(spi, cs, delay).unwrap();

        let dc = Output::new(res.dc, Level::Low, OutputConfig::default());
        let mut rst = Output::new(res.rst, Level::Low, OutputConfig::default());
        rst.set_high();

        let buffer = crate::mk_static!([u8; DMA_BYTES], [0_u8; DMA_BYTES]);
        let interface = mipidsi::interface::SpiInterface::new(device, dc, buffer);

        Builder::new(ST7789, interface)
            .reset_pin(rst)
            .display_size(170, 320)
            .invert_colors(ColorInversion::Inverted)
            .orientation(Orientation::new().rotate(Rotation::Deg90))
            .display_offset(35, 0)
            .init(&mut delay)
            .unwrap()
    }
}
