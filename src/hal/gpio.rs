use avr_device::atmega328p::{PORTB, PORTC, PORTD};
use core::convert::Infallible;
use core::marker::PhantomData;

pub trait PinMode {}
pub struct Input;
pub struct Output;
impl PinMode for Input {}
impl PinMode for Output {}

/// A single port pin with its mode tracked in the type.
pub struct Pin<PORT, const P: u8, MODE> {
    _port: PhantomData<PORT>,
    _mode: PhantomData<MODE>,
}

impl<PORT, const P: u8, MODE> Pin<PORT, P, MODE> {
    const fn new() -> Self {
        Self {
            _port: PhantomData,
            _mode: PhantomData,
        }
    }
}

impl<PORT, const P: u8, MODE> Default for Pin<PORT, P, MODE> {
    fn default() -> Self {
        Self::new()
    }
}

// Register names differ per port (ddrb/portb/pinb, ...), so each port gets
// its own impl block out of this macro.
macro_rules! impl_port {
    ($PORT:ident, $ddr:ident, $out:ident, $pinr:ident) => {
        impl<const P: u8, MODE: PinMode> Pin<$PORT, P, MODE> {
            pub fn into_output(self) -> Pin<$PORT, P, Output> {
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Pin::new()
            }

            /// Input with the pull-up off; the button board has external
            /// pull-ups.
            pub fn into_input(self) -> Pin<$PORT, P, Input> {
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                    (*$PORT::ptr()).$out.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                }
                Pin::new()
            }
        }

        impl<const P: u8> Pin<$PORT, P, Output> {
            #[inline]
            pub fn set_high(&mut self) {
                unsafe {
                    (*$PORT::ptr()).$out.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
            }

            #[inline]
            pub fn set_low(&mut self) {
                unsafe {
                    (*$PORT::ptr()).$out.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                }
            }

            /// Writing 1 to PINx toggles the output latch in hardware.
            #[inline]
            pub fn toggle(&mut self) {
                unsafe {
                    (*$PORT::ptr()).$pinr.write(|w| w.bits(1 << P));
                }
            }
        }

        impl<const P: u8> Pin<$PORT, P, Input> {
            #[inline]
            pub fn is_high(&self) -> bool {
                unsafe { ((*$PORT::ptr()).$pinr.read().bits() & (1 << P)) != 0 }
            }

            #[inline]
            pub fn is_low(&self) -> bool {
                !self.is_high()
            }
        }

        impl<const P: u8> embedded_hal::digital::v2::OutputPin for Pin<$PORT, P, Output> {
            type Error = Infallible;

            fn set_high(&mut self) -> Result<(), Self::Error> {
                Pin::set_high(self);
                Ok(())
            }

            fn set_low(&mut self) -> Result<(), Self::Error> {
                Pin::set_low(self);
                Ok(())
            }
        }

        impl<const P: u8> embedded_hal::digital::v2::InputPin for Pin<$PORT, P, Input> {
            type Error = Infallible;

            fn is_high(&self) -> Result<bool, Self::Error> {
                Ok(Pin::is_high(self))
            }

            fn is_low(&self) -> Result<bool, Self::Error> {
                Ok(Pin::is_low(self))
            }
        }
    };
}

impl_port!(PORTB, ddrb, portb, pinb);
impl_port!(PORTC, ddrc, portc, pinc);
impl_port!(PORTD, ddrd, portd, pind);

/// Matrix and button wiring.
pub mod board {
    use avr_device::atmega328p::{PORTB, PORTC, PORTD};

    use super::{Input, Output, Pin};

    // Row-select lines, top row first (PORTC 0-4).
    pub type ROW0 = Pin<PORTC, 0, Output>;
    pub type ROW1 = Pin<PORTC, 1, Output>;
    pub type ROW2 = Pin<PORTC, 2, Output>;
    pub type ROW3 = Pin<PORTC, 3, Output>;
    pub type ROW4 = Pin<PORTC, 4, Output>;

    // Column lines, leftmost column first (PORTB 0-6, active low).
    pub type COL0 = Pin<PORTB, 0, Output>;
    pub type COL1 = Pin<PORTB, 1, Output>;
    pub type COL2 = Pin<PORTB, 2, Output>;
    pub type COL3 = Pin<PORTB, 3, Output>;
    pub type COL4 = Pin<PORTB, 4, Output>;
    pub type COL5 = Pin<PORTB, 5, Output>;
    pub type COL6 = Pin<PORTB, 6, Output>;

    /// Up button, INT0.
    pub type BTN_UP = Pin<PORTD, 2, Input>;
    /// Down button, INT1.
    pub type BTN_DOWN = Pin<PORTD, 3, Input>;
    /// Left button, PCINT13.
    pub type BTN_LEFT = Pin<PORTC, 5, Input>;
    /// Right button, PCINT23.
    pub type BTN_RIGHT = Pin<PORTD, 7, Input>;
}
