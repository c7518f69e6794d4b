use core::cell::RefCell;
use core::convert::Infallible;

use avr_device::atmega328p::USART0;
use avr_device::interrupt::{self, Mutex};

use crate::config::{CPU_FREQ_HZ, UART_BAUD};

// Ring size must be a power of two for cheap index masking.
const BUFFER_SIZE: usize = 32;
const BUFFER_MASK: usize = BUFFER_SIZE - 1;

const UBRR_VALUE: u16 = (CPU_FREQ_HZ / (16 * UART_BAUD) - 1) as u16;

// UCSR0B bits.
const RXCIE0: u8 = 1 << 7;
const UDRIE0: u8 = 1 << 5;
const RXEN0: u8 = 1 << 4;
const TXEN0: u8 = 1 << 3;
// UCSR0C: asynchronous, 8 data bits, no parity, 1 stop bit.
const FRAME_8N1: u8 = 0b0000_0110;

struct RingBuffer {
    data: [u8; BUFFER_SIZE],
    write_idx: usize,
    read_idx: usize,
}

impl RingBuffer {
    const fn new() -> Self {
        Self {
            data: [0; BUFFER_SIZE],
            write_idx: 0,
            read_idx: 0,
        }
    }

    fn push(&mut self, byte: u8) -> bool {
        let next = (self.write_idx + 1) & BUFFER_MASK;
        if next == self.read_idx {
            return false;
        }
        self.data[self.write_idx] = byte;
        self.write_idx = next;
        true
    }

    fn pop(&mut self) -> Option<u8> {
        if self.read_idx == self.write_idx {
            return None;
        }
        let byte = self.data[self.read_idx];
        self.read_idx = (self.read_idx + 1) & BUFFER_MASK;
        Some(byte)
    }

    fn is_empty(&self) -> bool {
        self.read_idx == self.write_idx
    }
}

// Shared with the RX/UDRE interrupt handlers below.
static TX_BUFFER: Mutex<RefCell<RingBuffer>> = Mutex::new(RefCell::new(RingBuffer::new()));
static RX_BUFFER: Mutex<RefCell<RingBuffer>> = Mutex::new(RefCell::new(RingBuffer::new()));

/// Interrupt-driven USART0.
pub struct Uart {
    _marker: (),
}

impl Uart {
    pub fn new() -> Self {
        unsafe {
            let usart = &*USART0::ptr();
            usart.ubrr0.write(|w| w.bits(UBRR_VALUE));
            usart.ucsr0c.write(|w| w.bits(FRAME_8N1));
            usart.ucsr0b.write(|w| w.bits(RXCIE0 | RXEN0 | TXEN0));
        }
        Self { _marker: () }
    }

    /// Queue a byte for transmission. A full queue drops the byte rather
    /// than blocking; diagnostics are best-effort.
    pub fn write_byte(&mut self, byte: u8) {
        interrupt::free(|cs| {
            TX_BUFFER.borrow(cs).borrow_mut().push(byte);
        });
        arm_tx_interrupt();
    }

    pub fn read_byte(&mut self) -> Option<u8> {
        interrupt::free(|cs| RX_BUFFER.borrow(cs).borrow_mut().pop())
    }

    pub fn write_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
    }
}

impl Default for Uart {
    fn default() -> Self {
        Self::new()
    }
}

impl embedded_hal::serial::Read<u8> for Uart {
    type Error = Infallible;

    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        self.read_byte().ok_or(nb::Error::WouldBlock)
    }
}

impl embedded_hal::serial::Write<u8> for Uart {
    type Error = Infallible;

    fn write(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        let queued = interrupt::free(|cs| TX_BUFFER.borrow(cs).borrow_mut().push(byte));
        if !queued {
            return Err(nb::Error::WouldBlock);
        }
        arm_tx_interrupt();
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        if interrupt::free(|cs| TX_BUFFER.borrow(cs).borrow().is_empty()) {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}

/// Enable the data-register-empty interrupt so the handler drains the queue.
fn arm_tx_interrupt() {
    unsafe {
        (*USART0::ptr()).ucsr0b.modify(|r, w| w.bits(r.bits() | UDRIE0));
    }
}

#[avr_device::interrupt(atmega328p)]
fn USART_RX() {
    unsafe {
        let byte = (*USART0::ptr()).udr0.read().bits();
        interrupt::free(|cs| {
            RX_BUFFER.borrow(cs).borrow_mut().push(byte);
        });
    }
}

#[avr_device::interrupt(atmega328p)]
fn USART_UDRE() {
    interrupt::free(|cs| {
        if let Some(byte) = TX_BUFFER.borrow(cs).borrow_mut().pop() {
            unsafe {
                (*USART0::ptr()).udr0.write(|w| w.bits(byte));
            }
        } else {
            // Queue drained - disarm until the next write.
            unsafe {
                (*USART0::ptr()).ucsr0b.modify(|r, w| w.bits(r.bits() & !UDRIE0));
            }
        }
    });
}
