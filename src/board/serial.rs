//! Terminal input on UART0.

use esp_hal::{
    Blocking,
    uart::{
        Config,
        Uart,
    },
};

use super::SerialResources;
use crate::input::SerialSource;

const BAUD_RATE: u32 = 19_200;

pub struct Serial {
    uart: Uart<'static, Blocking>,
}

impl From<SerialResources<'static>> for Serial {
    fn from(res: SerialResources<'static>) -> Self {
        let uart = Uart::new(res.uart, Config::default().with_baudrate(BAUD_RATE))
            .unwrap()
            .with_rx(res.rx)
            .with_tx(res.tx);
        Self { uart }
    }
}

impl SerialSource for Serial {
    fn available(&mut self) -> bool {
        self.uart.read_ready()
    }

    fn read_byte(&mut self) -> u8 {
        let mut byte = [0_u8; 1];
        loop {
            match self.uart.read(&mut byte) {
                Ok(0) => {}
                Ok(_) => return byte[0],
                // Framing or overrun: drop it and keep waiting.
                Err(e) => error!("UART read failed: {}", e),
            }
        }
    }
}
